//! A pull-based JSON document engine.
//!
//! Bytes flow from any [`std::io::Read`] through a chunked [`ByteSource`], a
//! forgiving UTF-8 decoder and a streaming [`Tokenizer`] into a [`Parser`]
//! that builds an immutable [`Value`] tree. Every syntax error carries the
//! line and column where it was found; malformed UTF-8 is replaced with
//! U+FFFD instead of failing.
//!
//! ```
//! let value = jsontree::from_str(r#"{"foo": [1, 2], "bar": {"baz": "qux"}}"#)
//!     .unwrap()
//!     .unwrap();
//! let foo = value.as_object().unwrap().get("foo").unwrap();
//! assert_eq!(foo.as_array().unwrap().len(), 2);
//! assert_eq!(value.to_string(), r#"{"foo":[1,2],"bar":{"baz":"qux"}}"#);
//!
//! let err = jsontree::from_str("[1, 2,]").unwrap_err();
//! assert_eq!(err.to_string(), "syntax error: unexpected token ']' at 1:7");
//! ```

use std::io::Read;

mod decoder;
mod error;
mod escape_buffer;
mod lexer;
mod options;
mod parser;
pub mod ser;
mod source;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::{Position, REPLACEMENT_CHARACTER};
pub use error::{AccessError, ErrorKind, ErrorSource, ParserError, Result, SyntaxError};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use options::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_DEPTH, FormatOptions, ParserOptions};
pub use parser::Parser;
pub use ser::{to_compact_text, to_indented_text, to_indented_text_with};
pub use source::{ByteSource, PUSHBACK_CAPACITY};
pub use value::{Array, Object, Value};

/// Parses one document from `reader`, refilling `buffer_size` bytes at a
/// time.
///
/// Returns `Ok(None)` if the input is empty or only whitespace.
///
/// # Errors
///
/// Any [`ParserError`]: malformed input, unexpected end of input, or a
/// reader failure.
pub fn parse<R: Read>(reader: R, buffer_size: usize) -> Result<Option<Value>> {
    parse_with_options(
        reader,
        ParserOptions {
            buffer_size,
            ..ParserOptions::default()
        },
    )
}

/// Parses one document from `reader` with explicit options.
///
/// # Errors
///
/// Any [`ParserError`].
pub fn parse_with_options<R: Read>(reader: R, options: ParserOptions) -> Result<Option<Value>> {
    Parser::new(reader, options).parse()
}

/// Parses one document held in memory.
///
/// # Errors
///
/// Any [`ParserError`] other than an I/O failure.
pub fn from_slice(bytes: &[u8]) -> Result<Option<Value>> {
    parse(bytes, bytes.len())
}

/// Parses one document from a string.
///
/// # Errors
///
/// Any [`ParserError`] other than an I/O failure.
pub fn from_str(text: &str) -> Result<Option<Value>> {
    from_slice(text.as_bytes())
}
