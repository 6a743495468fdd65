//! UTF-8 decoding on top of [`ByteSource`] with position tracking.
//!
//! Malformed input never fails: it decodes to U+FFFD and the bytes that did
//! not belong to the broken sequence are pushed back so they are decoded on
//! their own.

use std::io::{self, Read};

use crate::source::ByteSource;

/// U+FFFD, produced for every malformed byte sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// A 1-based line and column in the decoded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column in code points, starting at 1.
    pub column: usize,
}

/// Decodes code points from a [`ByteSource`], one code point of pushback.
#[derive(Debug)]
pub(crate) struct CodePointReader<R> {
    source: ByteSource<R>,
    pending: Option<char>,
    line: usize,
    column: usize,
    prev_column: usize,
}

impl<R: Read> CodePointReader<R> {
    pub(crate) fn new(source: ByteSource<R>) -> Self {
        Self {
            source,
            pending: None,
            line: 1,
            column: 0,
            prev_column: 0,
        }
    }

    /// Position of the code point returned by the last call to [`Self::next`].
    ///
    /// After end of input this is one column past the last code point.
    pub(crate) fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Returns the next code point, `None` at end of input.
    ///
    /// End of input also advances the column, so errors reported there point
    /// just past the last code point.
    pub(crate) fn next(&mut self) -> io::Result<Option<char>> {
        let c = match self.pending.take() {
            Some(c) => Some(c),
            None => self.decode()?,
        };
        if c == Some('\n') {
            self.line += 1;
            self.prev_column = self.column;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Ok(c)
    }

    /// Undoes the last [`Self::next`], restoring the previous position.
    pub(crate) fn push_back(&mut self, c: Option<char>) {
        debug_assert!(self.pending.is_none(), "code point already pushed back");
        if c == Some('\n') {
            self.line -= 1;
            self.column = self.prev_column;
        } else {
            self.column -= 1;
        }
        self.pending = c;
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.source.read()? else {
            return Ok(None);
        };

        let (continuations, initial) = match lead {
            0x00..=0x7F => return Ok(Some(char::from(lead))),
            0xC0..=0xDF => (1, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (2, u32::from(lead & 0x0F)),
            0xF0..=0xF7 => (3, u32::from(lead & 0x07)),
            _ => return Ok(Some(REPLACEMENT_CHARACTER)),
        };

        let mut seen = [0u8; 3];
        let mut scalar = initial;
        for i in 0..continuations {
            let Some(byte) = self.source.read()? else {
                return Ok(Some(REPLACEMENT_CHARACTER));
            };
            seen[i] = byte;
            if byte & 0xC0 != 0x80 {
                self.source.push_back(&seen[..=i]);
                return Ok(Some(REPLACEMENT_CHARACTER));
            }
            scalar = (scalar << 6) | u32::from(byte & 0x3F);
        }

        Ok(Some(char::from_u32(scalar).unwrap_or(REPLACEMENT_CHARACTER)))
    }
}
