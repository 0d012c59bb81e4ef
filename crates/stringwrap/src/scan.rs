//! Input classification.
//!
//! The input is walked once, left to right. Each position is classified
//! into exactly one [`Token`] and the scanner advances past it.

use stringwrap_core::WidthPolicy;
use stringwrap_core::escape::{self, ESC};
use unicode_segmentation::GraphemeCursor;

pub(crate) const NBSP: char = '\u{00A0}';

/// One classified piece of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// One or more adjacent escape sequences, copied verbatim.
    Escape(&'a str),
    /// U+00A0, which glues the surrounding word together.
    NoBreakSpace,
    /// A breakable space and its display width.
    Space { ch: char, width: usize },
    /// `\n`, `\r`, NEL, LINE SEPARATOR or PARAGRAPH SEPARATOR.
    HardBreak,
    Tab,
    /// Vertical tab and form feed.
    Ignorable,
    /// A grapheme cluster that belongs to a word.
    Cluster { text: &'a str, width: usize },
}

/// Iterator over the tokens of an input string.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    cursor: GraphemeCursor,
    policy: WidthPolicy,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str, policy: WidthPolicy) -> Self {
        Self {
            input,
            pos: 0,
            cursor: GraphemeCursor::new(0, input.len(), true),
            policy,
        }
    }

    /// End of the grapheme cluster starting at `self.pos`.
    fn cluster_end(&mut self, ch: char) -> usize {
        if self.cursor.cur_cursor() != self.pos {
            self.cursor.set_cursor(self.pos);
        }
        match self.cursor.next_boundary(self.input, 0) {
            Ok(Some(end)) if end > self.pos => end,
            _ => self.pos + ch.len_utf8(),
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = self.input.get(self.pos..)?;
        if rest.as_bytes().first() == Some(&ESC) {
            if let Some(run) = escape::run_at(self.input, self.pos) {
                self.pos = run.end;
                return Some(Token::Escape(run.as_str(self.input)));
            }
        }

        let ch = rest.chars().next()?;
        let token = match ch {
            NBSP => Token::NoBreakSpace,
            '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}' => Token::HardBreak,
            '\t' => Token::Tab,
            '\u{000B}' | '\u{000C}' => Token::Ignorable,
            ' ' => Token::Space { ch, width: 1 },
            c if c.is_whitespace() => Token::Space {
                ch: c,
                width: self.policy.char_width(c),
            },
            _ => {
                let start = self.pos;
                let end = self.cluster_end(ch);
                self.pos = end;
                let text = &self.input[start..end];
                return Some(Token::Cluster {
                    text,
                    width: self.policy.grapheme_width(text),
                });
            }
        };
        self.pos += ch.len_utf8();
        Some(token)
    }
}
