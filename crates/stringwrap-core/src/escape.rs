//! Terminal escape sequence scanning.
//!
//! The wrapper never interprets escape sequences. It only needs to know
//! where one starts and where it ends so the bytes can be copied through
//! verbatim with zero width.
//!
//! Recognized forms (ECMA-48 framing):
//! - CSI: `ESC [` parameter bytes `0x30..=0x3F`, intermediate bytes
//!   `0x20..=0x2F`, final byte `0x40..=0x7E`
//! - OSC: `ESC ]` ... terminated by BEL or ST (`ESC \`)
//! - DCS / SOS / PM / APC: `ESC P` / `ESC X` / `ESC ^` / `ESC _` ... ST
//! - nF: `ESC` intermediates `0x20..=0x2F` then a final `0x30..=0x7E`
//!   (e.g. `ESC ( B`)
//! - Fp / Fe / Fs: `ESC` followed by a single byte `0x30..=0x7E`
//!
//! A lone ESC, or a control string that never terminates, is *not* a
//! sequence: it is left to the caller as ordinary text.
//!
//! # Performance
//! Inputs without an ESC byte are detected with a single `memchr` scan and
//! returned borrowed.

use std::borrow::Cow;

use memchr::memchr;

use crate::text_width::WidthPolicy;

/// The escape byte (0x1B).
pub const ESC: u8 = 0x1B;

const BEL: u8 = 0x07;

/// Byte span `[start, end)` of one or more adjacent escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeSequence {
    /// Byte index of the introducing ESC.
    pub start: usize,
    /// Byte index immediately after the sequence.
    pub end: usize,
}

impl EscapeSequence {
    /// Length of the sequence in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false; a recognized sequence spans at least two bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The sequence text within the string it was scanned from.
    #[inline]
    #[must_use]
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Returns true if `text` contains an ESC byte.
#[inline]
#[must_use]
pub fn contains_escape(text: &str) -> bool {
    memchr(ESC, text.as_bytes()).is_some()
}

/// Recognize a single escape sequence starting exactly at byte `pos`.
#[must_use]
pub fn sequence_at(text: &str, pos: usize) -> Option<EscapeSequence> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&ESC) {
        return None;
    }
    let end = sequence_end(bytes, pos)?;
    Some(EscapeSequence { start: pos, end })
}

/// Recognize a run of back-to-back escape sequences starting at `pos`.
///
/// `ESC[1mESC[31m` is reported as one span so callers can copy it in one
/// step.
#[must_use]
pub fn run_at(text: &str, pos: usize) -> Option<EscapeSequence> {
    let first = sequence_at(text, pos)?;
    let mut end = first.end;
    while let Some(next) = sequence_at(text, end) {
        end = next.end;
    }
    Some(EscapeSequence { start: pos, end })
}

/// Index after the sequence introduced by the ESC at `start`, if it forms
/// a complete sequence.
fn sequence_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let introducer = *bytes.get(i)?;

    match introducer {
        // CSI: ESC [ params... intermediates... final
        b'[' => {
            i += 1;
            while let Some(&b) = bytes.get(i) {
                match b {
                    0x40..=0x7E => return Some(i + 1),
                    0x20..=0x3F => i += 1,
                    _ => return None,
                }
            }
            None
        }
        // OSC: ESC ] ... (BEL or ST)
        b']' => string_end(bytes, i + 1, true),
        // DCS / SOS / PM / APC: ESC P|X|^|_ ... ST
        b'P' | b'X' | b'^' | b'_' => string_end(bytes, i + 1, false),
        // nF: intermediates then a final byte
        0x20..=0x2F => {
            i += 1;
            while let Some(&b) = bytes.get(i) {
                match b {
                    0x20..=0x2F => i += 1,
                    0x30..=0x7E => return Some(i + 1),
                    _ => return None,
                }
            }
            None
        }
        // Two-byte escapes (ESC 7, ESC c, ESC =, ...)
        0x30..=0x7E => Some(i + 1),
        _ => None,
    }
}

/// End of a control string body starting at `i`.
///
/// Terminated by ST, or by BEL when `bel` is set. Any other C0 control
/// (including a bare ESC) aborts the string.
fn string_end(bytes: &[u8], mut i: usize, bel: bool) -> Option<usize> {
    while let Some(&b) = bytes.get(i) {
        match b {
            BEL if bel => return Some(i + 1),
            ESC => return (bytes.get(i + 1) == Some(&b'\\')).then_some(i + 2),
            0x00..=0x1F => return None,
            _ => i += 1,
        }
    }
    None
}

/// Remove every recognized escape sequence from `text`.
///
/// Returns the input borrowed when it contains no ESC byte.
#[must_use]
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    if !contains_escape(text) {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut cursor = 0;
    while let Some(offset) = memchr(ESC, &bytes[cursor..]) {
        let at = cursor + offset;
        match sequence_at(text, at) {
            Some(seq) => {
                out.push_str(&text[copied..at]);
                copied = seq.end;
                cursor = seq.end;
            }
            // Unrecognized ESC stays as text.
            None => cursor = at + 1,
        }
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

/// Display width of `text` with escape sequences counted as zero columns.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    visible_width_with(text, WidthPolicy::detect())
}

/// [`visible_width`] under an explicit [`WidthPolicy`].
///
/// The text between sequences is measured piecewise, so a sequence never
/// glues two clusters together.
#[must_use]
pub fn visible_width_with(text: &str, policy: WidthPolicy) -> usize {
    if !contains_escape(text) {
        return policy.display_width(text);
    }

    let bytes = text.as_bytes();
    let mut width = 0;
    let mut piece_start = 0;
    let mut cursor = 0;
    while let Some(offset) = memchr(ESC, &bytes[cursor..]) {
        let at = cursor + offset;
        match sequence_at(text, at) {
            Some(seq) => {
                width += policy.display_width(&text[piece_start..at]);
                piece_start = seq.end;
                cursor = seq.end;
            }
            None => cursor = at + 1,
        }
    }
    width + policy.display_width(&text[piece_start..])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn strip_removes_every_sgr(words in proptest::collection::vec("[a-z ]{0,8}", 1..6), codes in proptest::collection::vec(0u8..108, 1..6)) {
            let mut text = String::new();
            for (word, code) in words.iter().zip(codes.iter().cycle()) {
                text.push_str(&format!("\x1b[{code}m"));
                text.push_str(word);
            }
            let plain: String = words.concat();
            let stripped = strip_escapes(&text);
            prop_assert_eq!(stripped.as_ref(), plain.as_str());
            prop_assert_eq!(visible_width_with(&text, WidthPolicy::Standard), plain.len());
        }

        #[test]
        fn sequence_end_is_char_boundary(s in "\\PC{0,40}") {
            let text = format!("\x1b]{s}\x07{s}");
            if let Some(seq) = sequence_at(&text, 0) {
                prop_assert!(text.is_char_boundary(seq.end));
            }
        }
    }
}
