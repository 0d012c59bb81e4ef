//! The wrap state machine.
//!
//! Three buffers, each owned here for one call:
//!
//! - `word`: clusters of the word being read;
//! - `line`: rendered text of the line being built;
//! - `output`: finished lines.
//!
//! Words move into the line at word boundaries (whitespace, escape runs,
//! end of input), lines move into the output when they are finalized.

use tracing::trace;

use crate::config::WrapConfig;
use crate::position::Positions;
use crate::scan::{NBSP, Token};
use crate::segment::{self, LineBreak, Wrapped, WrappedSeq};
use crate::split;

pub(crate) struct WrapStateMachine {
    word: String,
    line: String,
    output: String,
    pos: Positions,
    seq: WrappedSeq,
    config: WrapConfig,
    word_has_nbsp: bool,
}

impl WrapStateMachine {
    pub(crate) fn new(config: WrapConfig, capacity: usize) -> Self {
        Self {
            word: String::new(),
            line: String::new(),
            output: String::with_capacity(capacity),
            pos: Positions::new(),
            seq: WrappedSeq::new(config.limit, config.tab_size, config.split_words),
            config,
            word_has_nbsp: false,
        }
    }

    /// Apply one token.
    pub(crate) fn feed(&mut self, token: Token<'_>) {
        match token {
            Token::Cluster { text, width } => {
                self.word.push_str(text);
                self.pos.word_width += width;
            }
            Token::NoBreakSpace => {
                self.word.push(NBSP);
                self.pos.word_width += 1;
                self.word_has_nbsp = true;
            }
            Token::Escape(seq) => {
                self.flush_word();
                self.line.push_str(seq);
            }
            Token::Space { ch, width } => {
                self.flush_word();
                self.write_space(ch, width);
            }
            Token::HardBreak => {
                self.flush_word();
                self.write_line(LineBreak::Hard);
                self.pos.advance_orig_line();
            }
            Token::Tab => {
                self.flush_word();
                self.write_tab();
            }
            Token::Ignorable => self.flush_word(),
        }
    }

    /// Flush everything pending and assemble the result.
    pub(crate) fn finish(mut self) -> Wrapped {
        self.flush_word();
        if !self.line.is_empty() {
            self.write_line(LineBreak::Soft);
        }

        let ends_hard = match self.seq.last_mut() {
            Some(last) if !last.is_hard_break => {
                last.last_segment_in_orig = true;
                false
            }
            Some(_) => true,
            None => false,
        };
        if ends_hard {
            self.write_trailing_empty_line();
        } else if !self.seq.is_empty() {
            self.output.pop();
            if self.output.is_empty() {
                // Everything rendered was trimmed away.
                self.seq.clear();
            }
        }

        Wrapped {
            text: self.output,
            seq: self.seq,
        }
    }

    fn write_space(&mut self, ch: char, width: usize) {
        self.break_if_overflow(width);
        if !self.config.trim_whitespace || self.pos.line_width > 0 {
            self.line.push(ch);
            self.pos.line_width += width;
        } else {
            self.pos.trimmed_whitespace += 1;
        }
    }

    fn write_tab(&mut self) {
        let tab_size = self.config.tab_size;
        let mut columns = if tab_size > 0 {
            tab_size - self.pos.line_width % tab_size
        } else {
            0
        };
        self.break_if_overflow(columns);

        if self.line.is_empty() {
            columns = if self.config.trim_whitespace { 0 } else { tab_size };
        }
        if columns == 0 {
            // Consumed from the input but rendered as nothing.
            self.pos.trimmed_whitespace += 1;
            return;
        }
        self.line.extend(std::iter::repeat_n(' ', columns));
        self.pos.line_width += columns;
    }

    /// End the current line if appending `columns` more would pass the
    /// limit. A line with no visible content is never ended this way.
    fn break_if_overflow(&mut self, columns: usize) {
        if self.pos.line_width > 0 && self.pos.line_width + columns > self.config.limit {
            self.write_line(LineBreak::Soft);
        }
    }

    /// Move the word into the line.
    fn write_word(&mut self) {
        self.line.push_str(&self.word);
        self.word.clear();
        self.pos.line_width += self.pos.word_width;
        self.pos.word_width = 0;
    }

    /// Decide where the pending word goes.
    fn flush_word(&mut self) {
        let limit = self.config.limit;
        loop {
            if self.pos.write_position() <= limit {
                self.write_word();
                break;
            }
            if self.pos.word_width == 0 {
                // The line alone is over the limit; zero-width content
                // always fits on the next one.
                self.write_line(LineBreak::Soft);
                self.write_word();
                break;
            }
            if !self.config.split_words || self.word_has_nbsp {
                if self.pos.line_width > 0 {
                    self.write_line(LineBreak::Soft);
                }
                self.write_word();
                break;
            }

            let cut = split::find_cut(
                &self.word,
                self.pos.line_width,
                limit,
                self.config.width_policy,
            );
            if cut.len == 0 {
                self.write_line(LineBreak::Soft);
                continue;
            }
            if cut.len == self.word.len() {
                // A single cluster wider than the limit.
                self.write_word();
                break;
            }

            trace!(
                line = self.pos.line_num,
                prefix_width = cut.width,
                hyphenated = cut.hyphenate,
                "splitting word"
            );
            self.line.push_str(&self.word[..cut.len]);
            self.pos.line_width += cut.width;
            if cut.hyphenate {
                self.line.push('-');
                self.pos.line_width += 1;
            }
            self.write_line(LineBreak::Split {
                hyphenated: cut.hyphenate,
            });
            self.word.drain(..cut.len);
            self.pos.word_width = self.pos.word_width.saturating_sub(cut.width);
        }
        self.word_has_nbsp = false;
    }

    /// Strip trailing whitespace from the line, folding the removed columns
    /// into the pending trimmed count.
    fn trim_line_end(&mut self) {
        let kept = self.line.trim_end_matches(char::is_whitespace).len();
        if kept == self.line.len() {
            return;
        }
        let policy = self.config.width_policy;
        let removed: usize = self.line[kept..].chars().map(|c| policy.char_width(c)).sum();
        self.line.truncate(kept);
        self.pos.line_width = self.pos.line_width.saturating_sub(removed);
        self.pos.trimmed_whitespace += removed;
    }

    /// Finalize the line buffer into the output and record its segment.
    fn write_line(&mut self, brk: LineBreak) {
        if self.config.trim_whitespace {
            self.trim_line_end();
        }
        self.line.push('\n');
        self.pos.orig_line_segment += 1;

        let segment = segment::build(&self.pos, &self.line, brk, self.config.limit);
        if segment.not_within_limit {
            trace!(
                line = segment.cur_line_num,
                width = segment.width,
                limit = self.config.limit,
                "line exceeds limit"
            );
        }

        self.output.push_str(&self.line);
        self.line.clear();
        self.pos.advance_line();
        self.pos.orig_line_start_byte = segment.orig_byte_offset.end;
        self.pos.orig_line_start_rune = segment.orig_rune_offset.end;
        self.pos.reset_line();
        self.seq.push(segment);
    }

    /// The input ended right after a hard break: record the empty original
    /// line that follows it. Nothing is appended to the output.
    fn write_trailing_empty_line(&mut self) {
        self.pos.orig_line_segment += 1;
        let mut segment = segment::build(&self.pos, "\n", LineBreak::Soft, self.config.limit);
        segment.last_segment_in_orig = true;
        self.pos.reset_line();
        self.seq.push(segment);
    }
}
