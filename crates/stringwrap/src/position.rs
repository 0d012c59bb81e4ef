//! Position tracking for a single wrap call.
//!
//! Counters fall into three groups:
//!
//! - **word-local**, reset when the word moves into the line:
//!   `word_width`;
//! - **line-local**, reset when a line is finalized: `line_width`,
//!   `trimmed_whitespace`;
//! - **persistent**, advanced explicitly: `line_num`, `orig_line_num`,
//!   `orig_line_segment`, `orig_line_start_byte`, `orig_line_start_rune`.
//!
//! Flow: clusters → word (`word_width`) → line (`line_width`) → output.

use crate::segment::LineOffset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Positions {
    /// Visual width of the line being built.
    pub(crate) line_width: usize,
    /// 1-based number of the wrapped line being built.
    pub(crate) line_num: usize,
    /// Visual width of the word being built.
    pub(crate) word_width: usize,
    /// 1-based number of the original line being consumed.
    pub(crate) orig_line_num: usize,
    /// Segments emitted so far for the current original line.
    pub(crate) orig_line_segment: usize,
    /// Byte offset where the current line's content starts in the input.
    pub(crate) orig_line_start_byte: usize,
    /// Rune offset where the current line's content starts in the input.
    pub(crate) orig_line_start_rune: usize,
    /// Whitespace consumed from the input but not rendered, pending
    /// inclusion in the next segment's end offset.
    pub(crate) trimmed_whitespace: usize,
}

impl Positions {
    pub(crate) fn new() -> Self {
        Self {
            line_width: 0,
            line_num: 1,
            word_width: 0,
            orig_line_num: 1,
            orig_line_segment: 0,
            orig_line_start_byte: 0,
            orig_line_start_rune: 0,
            trimmed_whitespace: 0,
        }
    }

    /// Width the line would have if the pending word were appended.
    #[inline]
    pub(crate) fn write_position(&self) -> usize {
        self.word_width + self.line_width
    }

    #[inline]
    pub(crate) fn advance_line(&mut self) {
        self.line_num += 1;
    }

    /// Move to the next original line. Segment numbering restarts.
    #[inline]
    pub(crate) fn advance_orig_line(&mut self) {
        self.orig_line_num += 1;
        self.orig_line_segment = 0;
    }

    /// Reset the line-local counters after a line is finalized.
    #[inline]
    pub(crate) fn reset_line(&mut self) {
        self.line_width = 0;
        self.trimmed_whitespace = 0;
    }

    /// End offset of a finished line.
    ///
    /// `rendered_len` counts the appended terminator, which stands in for
    /// nothing in the input unless the line ended on a hard break. A
    /// synthetic hyphen occupies a rendered position the input never had.
    fn end_offset(&self, start: usize, rendered_len: usize, hard: bool, hyphen: bool) -> usize {
        (start + rendered_len + usize::from(hard) + self.trimmed_whitespace)
            .saturating_sub(1 + usize::from(hyphen))
    }

    /// Byte span of a finished line (`line` includes its terminator).
    pub(crate) fn byte_span(&self, line: &str, hard: bool, hyphen: bool) -> LineOffset {
        let start = self.orig_line_start_byte;
        LineOffset::new(start, self.end_offset(start, line.len(), hard, hyphen))
    }

    /// Rune span of a finished line (`line` includes its terminator).
    pub(crate) fn rune_span(&self, line: &str, hard: bool, hyphen: bool) -> LineOffset {
        let start = self.orig_line_start_rune;
        let runes = line.chars().count();
        LineOffset::new(start, self.end_offset(start, runes, hard, hyphen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_line_one() {
        let pos = Positions::new();
        assert_eq!(pos.line_num, 1);
        assert_eq!(pos.orig_line_num, 1);
        assert_eq!(pos.write_position(), 0);
    }

    #[test]
    fn soft_line_excludes_terminator() {
        let pos = Positions::new();
        assert_eq!(pos.byte_span("Hello\n", false, false), LineOffset::new(0, 5));
    }

    #[test]
    fn hard_line_includes_break() {
        let mut pos = Positions::new();
        pos.orig_line_start_byte = 6;
        assert_eq!(pos.byte_span("world!\n", true, false), LineOffset::new(6, 13));
    }

    #[test]
    fn hyphen_and_trim_adjust_end() {
        let mut pos = Positions::new();
        assert_eq!(pos.byte_span("Supercali-\n", false, true), LineOffset::new(0, 9));
        pos.trimmed_whitespace = 2;
        assert_eq!(pos.byte_span("with\n", false, false), LineOffset::new(0, 6));
    }

    #[test]
    fn runes_and_bytes_diverge_on_multibyte() {
        let mut pos = Positions::new();
        pos.orig_line_start_byte = 27;
        pos.orig_line_start_rune = 27;
        let line = "\u{1F31F}stars\n";
        assert_eq!(pos.byte_span(line, true, false), LineOffset::new(27, 37));
        assert_eq!(pos.rune_span(line, true, false), LineOffset::new(27, 34));
    }

    #[test]
    fn orig_line_advance_resets_segment() {
        let mut pos = Positions::new();
        pos.orig_line_segment = 3;
        pos.advance_orig_line();
        assert_eq!(pos.orig_line_num, 2);
        assert_eq!(pos.orig_line_segment, 0);
    }

    #[test]
    fn reset_line_keeps_persistent_fields() {
        let mut pos = Positions::new();
        pos.line_width = 7;
        pos.trimmed_whitespace = 2;
        pos.orig_line_start_byte = 11;
        pos.reset_line();
        assert_eq!(pos.line_width, 0);
        assert_eq!(pos.trimmed_whitespace, 0);
        assert_eq!(pos.orig_line_start_byte, 11);
    }
}
