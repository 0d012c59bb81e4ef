#![forbid(unsafe_code)]

//! Grapheme- and escape-aware text wrapping.
//!
//! Wraps UTF-8 text to a column limit without ever breaking a grapheme
//! cluster or a terminal escape sequence, and reports for every wrapped
//! line which bytes and runes of the input it came from.
//!
//! # Example
//!
//! ```
//! use stringwrap::wrap;
//!
//! let out = wrap("The quick brown fox jumps over the lazy dog", 10, 4, true)?;
//! assert_eq!(out.text, "The quick\nbrown fox\njumps over\nthe lazy\ndog");
//! assert_eq!(out.seq.len(), 5);
//!
//! let first = &out.segments()[0];
//! assert_eq!(first.orig_byte_offset.range(), 0..10);
//! assert_eq!(first.width, 9);
//! # Ok::<(), stringwrap::WrapError>(())
//! ```
//!
//! # Line breaking
//!
//! - Spaces and tabs are break opportunities. Tabs expand to the next tab
//!   stop.
//! - `\n`, `\r`, NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR end the line
//!   unconditionally (a *hard* break).
//! - U+00A0 joins its neighbours into one word that is never split.
//! - Escape sequences are copied through verbatim and take no columns.
//! - With [`wrap_split`], words that do not fit are cut at cluster
//!   boundaries, with a hyphen when both sides of the cut are letters or
//!   numbers.
//!
//! # Offsets
//!
//! Segment spans are contiguous: each starts where the previous one ended,
//! the first starts at 0, and whitespace removed by trimming is charged to
//! the line it was removed from. Expanded tabs render wider than the single
//! byte they replace, so spans after a tab on the same original line are
//! approximate; [`WrappedSegment::original_text`] returns `None` when a
//! span no longer lands on character boundaries.

mod config;
mod error;
mod position;
mod scan;
pub mod segment;
mod split;
mod state;

pub use config::{DEFAULT_TAB_SIZE, MIN_LIMIT, WrapConfig};
pub use error::WrapError;
pub use segment::{LineOffset, Wrapped, WrappedSegment, WrappedSeq};
pub use stringwrap_core::WidthPolicy;

use tracing::debug;

use crate::scan::Scanner;
use crate::state::WrapStateMachine;

/// Wrap `input` to `limit` columns, moving overlong words to their own
/// line intact.
///
/// Fails with [`WrapError::InvalidLimit`] if `limit` is below
/// [`MIN_LIMIT`].
pub fn wrap(
    input: &str,
    limit: usize,
    tab_size: usize,
    trim_whitespace: bool,
) -> Result<Wrapped, WrapError> {
    let config = WrapConfig::new(limit)
        .tab_size(tab_size)
        .trim_whitespace(trim_whitespace);
    wrap_with_config(input, &config)
}

/// Wrap `input` to `limit` columns, cutting words that do not fit.
///
/// ```
/// let out = stringwrap::wrap_split("Supercalifragilisticexpialidocious", 10, 4, true)?;
/// assert_eq!(out.text, "Supercali-\nfragilist-\nicexpiali-\ndocious");
/// assert!(out.segments()[0].hyphenated);
/// # Ok::<(), stringwrap::WrapError>(())
/// ```
pub fn wrap_split(
    input: &str,
    limit: usize,
    tab_size: usize,
    trim_whitespace: bool,
) -> Result<Wrapped, WrapError> {
    let config = WrapConfig::new(limit)
        .tab_size(tab_size)
        .trim_whitespace(trim_whitespace)
        .split_words(true);
    wrap_with_config(input, &config)
}

/// Wrap `input` with explicit options.
pub fn wrap_with_config(input: &str, config: &WrapConfig) -> Result<Wrapped, WrapError> {
    config.validate()?;

    let _span = tracing::debug_span!(
        "wrap",
        input_len = input.len(),
        limit = config.limit,
        split = config.split_words
    )
    .entered();

    let mut machine = WrapStateMachine::new(*config, input.len());
    for token in Scanner::new(input, config.width_policy) {
        machine.feed(token);
    }
    let wrapped = machine.finish();

    debug!(segments = wrapped.seq.len(), "wrap complete");
    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn invalid_limit_is_rejected_before_work() {
        assert_eq!(
            wrap("anything", 1, 4, true),
            Err(WrapError::InvalidLimit { limit: 1 })
        );
        assert_eq!(
            wrap_split("", 0, 0, false),
            Err(WrapError::InvalidLimit { limit: 0 })
        );
    }

    #[test]
    fn empty_input_has_no_segments() {
        let out = wrap("", 5, 4, true).unwrap();
        assert_eq!(out.text, "");
        assert!(out.seq.is_empty());
        assert_eq!(out.lines().count(), 0);
    }

    #[test]
    fn seq_records_settings() {
        let out = wrap_split("abc", 7, 3, true).unwrap();
        assert!(out.seq.word_split_allowed);
        assert_eq!(out.seq.tab_size, 3);
        assert_eq!(out.seq.limit, 7);

        let out = wrap("abc", 7, 3, true).unwrap();
        assert!(!out.seq.word_split_allowed);
    }

    #[test]
    fn lines_pair_text_with_segments() {
        let out = wrap("foo\u{2028}bar baz", 5, 4, true).unwrap();
        let lines: Vec<_> = out.lines().map(|(l, s)| (l, s.is_hard_break)).collect();
        assert_eq!(lines, vec![("foo", true), ("bar", false), ("baz", false)]);
    }

    #[test]
    fn original_text_recovers_input() {
        let input = "alpha beta gamma";
        let out = wrap(input, 6, 4, true).unwrap();
        let pieces: Vec<_> = out
            .segments()
            .iter()
            .map(|s| s.original_text(input).unwrap())
            .collect();
        assert_eq!(pieces, vec!["alpha ", "beta ", "gamma"]);
    }

    #[test]
    fn cjk_policy_widens_ambiguous_characters() {
        let input = "\u{00B1}\u{00B1}\u{00B1}";
        let standard = WrapConfig::new(4).width_policy(WidthPolicy::Standard);
        let cjk = WrapConfig::new(4).width_policy(WidthPolicy::Cjk);
        assert_eq!(wrap_with_config(input, &standard).unwrap().segments()[0].width, 3);
        let out = wrap_with_config(input, &cjk).unwrap();
        assert_eq!(out.segments()[0].width, 6);
        assert!(out.segments()[0].not_within_limit);
    }

    #[test]
    fn public_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Wrapped>();
        assert_send_sync::<WrapConfig>();
        assert_send_sync::<WrapError>();
    }

    #[traced_test]
    #[test]
    fn wrap_logs_summary() {
        let _ = wrap("one two three", 5, 4, true).unwrap();
        assert!(logs_contain("wrap complete"));
        assert!(logs_contain("segments=3"));
    }
}
