//! Character cursor over a fully loaded document.
//!
//! The [`Cursor`] owns the decoded input and a position into it. It supports
//! non-consuming [`peek`](Cursor::peek), consuming [`read`](Cursor::read), block
//! reads and bounded [`backtrack`](Cursor::backtrack), which is all the lookahead the
//! parser needs. It does not count lines; every consumer that reads a newline is
//! responsible for its own line counter.
//!
//! The second `impl` block holds the lexical helpers composed on top of those
//! primitives (skip/read while, whitespace, comments).

use crate::chars;
use crate::{Error, Result};

pub(crate) struct Cursor {
    chars: Vec<char>,
    position: usize,
}

/// Comments and blank lines collected between two statements.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Trivia {
    /// Total newlines consumed.
    pub newlines: usize,
    /// Blank lines seen before the first comment line.
    pub padding: usize,
    /// Text of each comment line, without the `#`.
    pub comments: Vec<String>,
}

impl Trivia {
    pub(crate) fn comment_text(&self) -> Option<String> {
        if self.comments.is_empty() {
            None
        } else {
            Some(self.comments.join("\n"))
        }
    }
}

impl Cursor {
    pub(crate) fn new(input: &str) -> Self {
        // A leading byte-order mark is not part of the document.
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Cursor {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    #[inline]
    pub(crate) fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Fills `buffer` with up to `buffer.len()` characters and returns how many were
    /// read; fewer at the end of input, zero when already there.
    pub(crate) fn read_block(&mut self, buffer: &mut [char]) -> usize {
        let available = self.chars.len() - self.position;
        let count = buffer.len().min(available);
        buffer[..count].copy_from_slice(&self.chars[self.position..self.position + count]);
        self.position += count;
        count
    }

    pub(crate) fn backtrack(&mut self, n: usize) -> Result<()> {
        if n > self.position {
            return Err(Error::BacktrackOutOfRange {
                requested: n,
                position: self.position,
            });
        }
        self.position -= n;
        Ok(())
    }

    /// Returns `true` if the upcoming characters spell out `prefix`, without
    /// consuming anything.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        let mut index = self.position;
        for expected in prefix.chars() {
            match self.chars.get(index) {
                Some(&c) if c == expected => index += 1,
                _ => return false,
            }
        }
        true
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }
}

impl Cursor {
    /// Consumes characters while `pred` holds and returns how many were consumed.
    pub(crate) fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.position;
        while self.peek().is_some_and(&pred) {
            self.position += 1;
        }
        self.position - start
    }

    /// Consumes characters while `pred` holds and returns them.
    pub(crate) fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.position;
        self.skip_while(pred);
        self.chars[start..self.position].iter().collect()
    }

    pub(crate) fn skip_whitespace(&mut self) -> usize {
        self.skip_while(chars::is_whitespace)
    }

    /// Consumes a `#` comment up to, but not including, the end of the line, and
    /// returns its text with the `#` and surrounding whitespace removed.
    pub(crate) fn read_comment(&mut self) -> Option<String> {
        if !self.peek().is_some_and(chars::is_hash) {
            return None;
        }
        self.read();
        let text = self.read_while(|c| !chars::is_newline(c));
        Some(text.trim().to_string())
    }

    /// Skips any mix of whitespace, comments and newlines, returning the number of
    /// newlines consumed.
    pub(crate) fn skip_comments_newlines_whitespace(&mut self) -> usize {
        self.read_trivia().newlines
    }

    /// Consumes whitespace, comments and newlines, keeping the comment text and the
    /// blank-line count that precede the next token.
    pub(crate) fn read_trivia(&mut self) -> Trivia {
        let mut trivia = Trivia::default();
        let mut line_has_content = false;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('#') => {
                    if let Some(comment) = self.read_comment() {
                        trivia.comments.push(comment);
                    }
                    line_has_content = true;
                }
                Some('\r') => {
                    self.read();
                }
                Some('\n') => {
                    self.read();
                    trivia.newlines += 1;
                    if !line_has_content && trivia.comments.is_empty() {
                        trivia.padding += 1;
                    }
                    line_has_content = false;
                }
                _ => return trivia,
            }
        }
    }

    /// Consumes `expected` if it is the next character.
    pub(crate) fn expect_and_consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }
}
