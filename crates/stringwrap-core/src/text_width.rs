//! Display width helpers shared by every stage of the wrapper.
//!
//! Widths come from Unicode data tables, never from ad-hoc emoji
//! heuristics. Grapheme clusters are measured as a unit so ZWJ sequences,
//! flags and base-plus-combining-mark clusters get the width a terminal
//! actually gives them.
//!
//! East-Asian ambiguous characters are one column wide under
//! [`WidthPolicy::Standard`] and two under [`WidthPolicy::Cjk`]. The
//! process-wide default is detected from the environment once:
//!
//! - `STRINGWRAP_CJK_WIDTH=1` (also `true`, `yes`, `on`) forces CJK width,
//!   any other value forces standard width;
//! - otherwise a `ja`, `zh` or `ko` locale in `LC_ALL`, `LC_CTYPE` or `LANG`
//!   selects CJK width.

use std::sync::OnceLock;

use unicode_display_width::width as unicode_display_width;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Environment variable that overrides locale-based width detection.
pub const CJK_WIDTH_ENV: &str = "STRINGWRAP_CJK_WIDTH";

/// How East-Asian ambiguous-width characters are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum WidthPolicy {
    /// Ambiguous characters occupy one column.
    #[default]
    Standard,
    /// Ambiguous characters occupy two columns.
    Cjk,
}

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[inline]
fn is_cjk_locale(locale: &str) -> bool {
    let lower = locale.trim().to_ascii_lowercase();
    lower.starts_with("ja") || lower.starts_with("zh") || lower.starts_with("ko")
}

impl WidthPolicy {
    /// Resolve the policy using a custom environment lookup.
    pub fn from_env<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(CJK_WIDTH_ENV) {
            return if env_flag(&value) {
                Self::Cjk
            } else {
                Self::Standard
            };
        }
        let locale = get_env("LC_ALL")
            .filter(|v| !v.is_empty())
            .or_else(|| get_env("LC_CTYPE").filter(|v| !v.is_empty()))
            .or_else(|| get_env("LANG"));
        match locale {
            Some(locale) if is_cjk_locale(&locale) => Self::Cjk,
            _ => Self::Standard,
        }
    }

    /// Cached policy for this process.
    pub fn detect() -> Self {
        static POLICY: OnceLock<WidthPolicy> = OnceLock::new();
        *POLICY.get_or_init(|| Self::from_env(|key| std::env::var(key).ok()))
    }

    /// Width of a single grapheme cluster.
    #[must_use]
    pub fn grapheme_width(self, grapheme: &str) -> usize {
        if grapheme.is_ascii() {
            return ascii_width(grapheme).unwrap_or_else(|| ascii_display_width(grapheme));
        }
        if grapheme.chars().all(is_zero_width_codepoint) {
            return 0;
        }
        match self {
            Self::Cjk => grapheme.width_cjk(),
            Self::Standard => unicode_display_width(grapheme) as usize,
        }
    }

    /// Width of a single Unicode scalar.
    #[must_use]
    pub fn char_width(self, ch: char) -> usize {
        if ch.is_ascii() {
            return match ch {
                '\t' | '\n' | '\r' => 1,
                ' '..='~' => 1,
                _ => 0,
            };
        }
        if is_zero_width_codepoint(ch) {
            return 0;
        }
        match self {
            Self::Cjk => ch.width_cjk().unwrap_or(0),
            Self::Standard => ch.width().unwrap_or(0),
        }
    }

    /// Width of a string in terminal cells.
    #[must_use]
    pub fn display_width(self, text: &str) -> usize {
        if let Some(width) = ascii_width(text) {
            return width;
        }
        if text.is_ascii() {
            return ascii_display_width(text);
        }
        text.graphemes(true).map(|g| self.grapheme_width(g)).sum()
    }
}

/// ASCII text with controls: tab, LF and CR count one column, other
/// controls none.
#[inline]
fn ascii_display_width(text: &str) -> usize {
    text.bytes()
        .filter(|&b| matches!(b, b'\t' | b'\n' | b'\r' | 0x20..=0x7E))
        .count()
}

/// Byte length when every byte is printable ASCII.
#[inline]
fn ascii_width(text: &str) -> Option<usize> {
    text.bytes()
        .all(|b| b.is_ascii_graphic() || b == b' ')
        .then_some(text.len())
}

/// Controls, combining marks, variation selectors and invisible format
/// characters.
#[inline]
fn is_zero_width_codepoint(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{001F}'
            | '\u{007F}'..='\u{009F}'
            | '\u{00AD}'
            | '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'
            | '\u{2066}'..='\u{206F}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{FE20}'..='\u{FE2F}'
            | '\u{FEFF}'
            | '\u{E0100}'..='\u{E01EF}'
    )
}

/// Width of a single grapheme cluster under the detected policy.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    WidthPolicy::detect().grapheme_width(grapheme)
}

/// Width of a single Unicode scalar under the detected policy.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    WidthPolicy::detect().char_width(ch)
}

/// Width of a string in terminal cells under the detected policy.
///
/// Escape sequences are *not* skipped here; see
/// [`crate::escape::visible_width`] for that.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    WidthPolicy::detect().display_width(text)
}
