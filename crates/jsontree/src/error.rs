use std::io;

use thiserror::Error;

use crate::decoder::Position;

/// Result alias used throughout the crate.
pub type Result<T, E = ParserError> = core::result::Result<T, E>;

/// A failure while turning bytes into a [`Value`](crate::Value).
///
/// Every error carries the 1-based line and column where it was detected.
/// Parsing stops at the first error; there is no recovery.
#[derive(Error, Debug)]
#[error("{source} at {line}:{column}")]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    /// 1-based line of the offending input.
    pub line: usize,
    /// 1-based column (in code points) of the offending input.
    pub column: usize,
}

/// The cause of a [`ParserError`].
#[derive(Error, Debug)]
pub enum ErrorSource {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The input is not a well-formed JSON document.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

/// Why a document was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A code point that cannot start or continue the current token.
    #[error("unexpected character {}", display_char(.0))]
    UnexpectedCharacter(char),
    /// A run of letters that is not `true`, `false` or `null`.
    #[error("unknown token '{0}'")]
    UnknownToken(String),
    /// The input ended inside a token or an unclosed container.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A well-formed token in a position the grammar does not allow.
    #[error("unexpected token {0}")]
    UnexpectedToken(&'static str),
    /// A numeric literal outside the `i64` range, or a float overflowing to infinity.
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),
    /// Arrays and objects nested deeper than the configured limit.
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Coarse classification of a [`ParserError`], convenient for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ErrorSource::Io`].
    IoFailure,
    /// See [`SyntaxError::UnexpectedCharacter`].
    UnexpectedCharacter,
    /// See [`SyntaxError::UnknownToken`].
    UnknownToken,
    /// See [`SyntaxError::UnexpectedEndOfInput`].
    UnexpectedEndOfInput,
    /// See [`SyntaxError::UnexpectedToken`].
    UnexpectedToken,
    /// See [`SyntaxError::NumberOutOfRange`].
    NumberOutOfRange,
    /// See [`SyntaxError::NestingTooDeep`].
    NestingTooDeep,
}

impl ParserError {
    pub(crate) fn new(source: impl Into<ErrorSource>, at: Position) -> Self {
        Self {
            source: source.into(),
            line: at.line,
            column: at.column,
        }
    }

    /// The classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match &self.source {
            ErrorSource::Io(_) => ErrorKind::IoFailure,
            ErrorSource::Syntax(err) => match err {
                SyntaxError::UnexpectedCharacter(_) => ErrorKind::UnexpectedCharacter,
                SyntaxError::UnknownToken(_) => ErrorKind::UnknownToken,
                SyntaxError::UnexpectedEndOfInput => ErrorKind::UnexpectedEndOfInput,
                SyntaxError::UnexpectedToken(_) => ErrorKind::UnexpectedToken,
                SyntaxError::NumberOutOfRange(_) => ErrorKind::NumberOutOfRange,
                SyntaxError::NestingTooDeep(_) => ErrorKind::NestingTooDeep,
            },
        }
    }

    /// The syntax error, unless the reader failed.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            ErrorSource::Io(_) => None,
        }
    }

    /// The position of the error as `(line, column)`.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Consumes the error and returns its cause.
    #[must_use]
    pub fn into_source(self) -> ErrorSource {
        self.source
    }
}

/// A failed lookup on an [`Array`](crate::Array) or [`Object`](crate::Object).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The index is not smaller than the array length.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The array length.
        len: usize,
    },
    /// The object has no member with this name.
    #[error("no member named \"{0}\"")]
    NoSuchMember(String),
}

fn display_char(c: &char) -> String {
    let c = *c;
    if c.is_control() {
        format!("U+{:04X}", u32::from(c))
    } else {
        format!("'{c}'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParserError::new(
            SyntaxError::UnexpectedCharacter('('),
            Position { line: 1, column: 3 },
        );
        assert_eq!(
            err.to_string(),
            "syntax error: unexpected character '(' at 1:3"
        );
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(err.position(), (1, 3));
    }

    #[test]
    fn control_characters_are_shown_as_code_points() {
        let err = SyntaxError::UnexpectedCharacter('\t');
        assert_eq!(err.to_string(), "unexpected character U+0009");
    }

    #[test]
    fn io_errors_are_chained() {
        use std::error::Error as _;

        let err = ParserError::new(
            io::Error::other("disk on fire"),
            Position { line: 2, column: 1 },
        );
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.syntax().is_none());
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("I/O error: disk on fire"));
    }
}
