//! Decoding of `\uXXXX` escapes, including UTF-16 surrogate pairs.
//!
//! [`UnicodeEscapeBuffer`] accumulates the four hexadecimal digits of one
//! escape and yields the UTF-16 code unit. Code units are then handed to
//! [`UnicodeEscapeBuffer::push_unit`], which joins a high surrogate with an
//! immediately following low surrogate. Unpaired surrogates become U+FFFD.

use crate::decoder::REPLACEMENT_CHARACTER;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u16,
    len: u8,
    high_surrogate: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one hexadecimal digit of the current escape.
    ///
    /// Returns `Ok(Some(unit))` after the fourth digit and `Ok(None)` before
    /// it. A non-hexadecimal character is handed back as the error.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, char> {
        let digit = c.to_digit(16).ok_or(c)?;
        // `digit` is below 16, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.unit = (self.unit << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.unit;
        self.unit = 0;
        self.len = 0;
        Ok(Some(unit))
    }

    /// Appends the character for `unit`, pairing surrogates.
    pub fn push_unit(&mut self, unit: u16, out: &mut String) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush(out);
                self.high_surrogate = Some(unit);
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let scalar =
                        0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    out.push(char::from_u32(scalar).unwrap_or(REPLACEMENT_CHARACTER));
                }
                None => out.push(REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush(out);
                out.push(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER));
            }
        }
    }

    /// Emits U+FFFD for a high surrogate that was not followed by a low one.
    ///
    /// Called before any character that is not a `\u` escape is appended.
    pub fn flush(&mut self, out: &mut String) {
        if self.high_surrogate.take().is_some() {
            out.push(REPLACEMENT_CHARACTER);
        }
    }
}
