//! Per-line metadata mapping wrapped output back to the original input.
//!
//! # Invariants
//!
//! 1. **One segment per output line**: the number of segments equals the
//!    number of `\n`-separated pieces of the wrapped text (zero for empty
//!    output).
//!
//! 2. **Contiguous spans**: `segments[i].end == segments[i + 1].start` in
//!    both the byte and the rune coordinate space, and the first segment
//!    starts at 0.
//!
//! 3. **Immutable after emission**: only the last segment's
//!    `last_segment_in_orig` flag is ever revised, once, at end of input.
//!    If trimming leaves the whole output empty, the segments are dropped.

use std::ops::Range;

use crate::position::Positions;

/// Half-open interval `[start, end)` of byte or rune indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LineOffset {
    pub start: usize,
    pub end: usize,
}

impl LineOffset {
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One wrapped line together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSegment {
    /// 1-based wrapped line number.
    pub cur_line_num: usize,
    /// 1-based number of the original line this content came from.
    pub orig_line_num: usize,
    /// Byte span in the original input.
    pub orig_byte_offset: LineOffset,
    /// Rune span in the original input.
    pub orig_rune_offset: LineOffset,
    /// 1-based position of this segment within its original line.
    pub segment_in_orig: usize,
    /// This is the last segment produced from its original line.
    pub last_segment_in_orig: bool,
    /// The visual width exceeds the limit (unsplittable content).
    pub not_within_limit: bool,
    /// The line was ended by a line terminator in the input.
    pub is_hard_break: bool,
    /// Visual width in columns, escape sequences excluded.
    pub width: usize,
    /// The line ends part-way through a word.
    pub ends_with_split_word: bool,
    /// The line ends with a hyphen that is not in the input.
    pub hyphenated: bool,
}

impl WrappedSegment {
    /// The input text covered by this segment's byte span.
    ///
    /// Returns `None` when the span does not land on character boundaries
    /// of `input`, which can happen once expanded tabs have shifted the
    /// rendered length away from the consumed length.
    #[must_use]
    pub fn original_text<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.orig_byte_offset.range())
    }
}

/// How a line was ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineBreak {
    /// Wrap point, explicit break or end of input.
    Soft,
    /// A line terminator in the input.
    Hard,
    /// The splitter cut a word here.
    Split { hyphenated: bool },
}

/// Assemble the segment for a just-finished line.
///
/// `line` is the rendered text including its terminator; `pos` must already
/// count this segment in `orig_line_segment`.
pub(crate) fn build(pos: &Positions, line: &str, brk: LineBreak, limit: usize) -> WrappedSegment {
    let hard = brk == LineBreak::Hard;
    let (split, hyphen) = match brk {
        LineBreak::Split { hyphenated } => (true, hyphenated),
        LineBreak::Soft | LineBreak::Hard => (false, false),
    };
    WrappedSegment {
        cur_line_num: pos.line_num,
        orig_line_num: pos.orig_line_num,
        orig_byte_offset: pos.byte_span(line, hard, hyphen),
        orig_rune_offset: pos.rune_span(line, hard, hyphen),
        segment_in_orig: pos.orig_line_segment,
        last_segment_in_orig: hard,
        not_within_limit: pos.line_width > limit,
        is_hard_break: hard,
        width: pos.line_width,
        ends_with_split_word: split,
        hyphenated: hyphen,
    }
}

/// The ordered segments of one wrap call and the settings that made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSeq {
    segments: Vec<WrappedSegment>,
    /// Whether words could be split.
    pub word_split_allowed: bool,
    /// Tab size in effect.
    pub tab_size: usize,
    /// Column limit in effect.
    pub limit: usize,
}

impl WrappedSeq {
    pub(crate) fn new(limit: usize, tab_size: usize, word_split_allowed: bool) -> Self {
        Self {
            segments: Vec::new(),
            word_split_allowed,
            tab_size,
            limit,
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[WrappedSegment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The most recently emitted segment.
    #[must_use]
    pub fn last(&self) -> Option<&WrappedSegment> {
        self.segments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WrappedSegment> {
        self.segments.iter()
    }

    #[must_use]
    pub fn into_segments(self) -> Vec<WrappedSegment> {
        self.segments
    }

    pub(crate) fn push(&mut self, segment: WrappedSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut WrappedSegment> {
        self.segments.last_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a WrappedSeq {
    type Item = &'a WrappedSegment;
    type IntoIter = std::slice::Iter<'a, WrappedSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Result of a wrap call: the wrapped text and its segment map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped {
    /// Wrapped text, lines separated by `\n`.
    pub text: String,
    /// One segment per line of `text`.
    pub seq: WrappedSeq,
}

impl Wrapped {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn segments(&self) -> &[WrappedSegment] {
        self.seq.segments()
    }

    /// Each output line paired with its segment.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &WrappedSegment)> {
        self.text.split('\n').zip(self.seq.iter())
    }

    #[must_use]
    pub fn into_parts(self) -> (String, WrappedSeq) {
        (self.text, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_offset_basics() {
        let off = LineOffset::new(3, 7);
        assert_eq!(off.len(), 4);
        assert!(!off.is_empty());
        assert_eq!(off.range(), 3..7);
        assert!(LineOffset::new(5, 5).is_empty());
    }

    #[test]
    fn build_soft_segment() {
        let mut pos = Positions::new();
        pos.orig_line_segment = 1;
        pos.line_width = 5;
        let seg = build(&pos, "Hello\n", LineBreak::Soft, 8);
        assert_eq!(seg.cur_line_num, 1);
        assert_eq!(seg.orig_byte_offset, LineOffset::new(0, 5));
        assert_eq!(seg.segment_in_orig, 1);
        assert!(!seg.is_hard_break);
        assert!(!seg.last_segment_in_orig);
        assert!(!seg.not_within_limit);
        assert_eq!(seg.width, 5);
    }

    #[test]
    fn build_flags_overflow() {
        let mut pos = Positions::new();
        pos.line_width = 12;
        let seg = build(&pos, "Pneumothorax\n", LineBreak::Soft, 10);
        assert!(seg.not_within_limit);
    }

    #[test]
    fn build_hard_segment_is_last_in_orig() {
        let pos = Positions::new();
        let seg = build(&pos, "foo\n", LineBreak::Hard, 5);
        assert!(seg.is_hard_break);
        assert!(seg.last_segment_in_orig);
        assert_eq!(seg.orig_byte_offset, LineOffset::new(0, 4));
    }

    #[test]
    fn build_split_segment() {
        let mut pos = Positions::new();
        pos.line_width = 10;
        let seg = build(&pos, "Supercali-\n", LineBreak::Split { hyphenated: true }, 10);
        assert!(seg.ends_with_split_word);
        assert!(seg.hyphenated);
        assert_eq!(seg.orig_byte_offset, LineOffset::new(0, 9));

        let seg = build(&pos, "ab\n", LineBreak::Split { hyphenated: false }, 10);
        assert!(seg.ends_with_split_word);
        assert!(!seg.hyphenated);
        assert_eq!(seg.orig_byte_offset, LineOffset::new(0, 2));
    }

    #[test]
    fn original_text_checks_boundaries() {
        let seg = WrappedSegment {
            cur_line_num: 1,
            orig_line_num: 1,
            orig_byte_offset: LineOffset::new(0, 1),
            orig_rune_offset: LineOffset::new(0, 1),
            segment_in_orig: 1,
            last_segment_in_orig: true,
            not_within_limit: false,
            is_hard_break: false,
            width: 1,
            ends_with_split_word: false,
            hyphenated: false,
        };
        assert_eq!(seg.original_text("ab"), Some("a"));
        assert_eq!(seg.original_text("\u{e9}"), None);
    }
}
