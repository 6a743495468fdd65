//! Streaming tokenizer.
//!
//! [`Tokenizer`] pulls code points from the decoder on demand and turns them
//! into [`Token`]s tagged with the position of their first code point.

use std::io::Read;

use log::trace;

use crate::{
    decoder::{CodePointReader, Position},
    error::{ParserError, Result, SyntaxError},
    escape_buffer::UnicodeEscapeBuffer,
    source::ByteSource,
};

/// The lexical class of a [`Token`], with its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// A string literal with its escapes decoded.
    String(String),
    /// A number literal without fraction or exponent.
    Integer(i64),
    /// A number literal with a fraction and/or exponent.
    Float(f64),
}

impl TokenKind {
    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}

/// A lexical unit and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was recognized.
    pub kind: TokenKind,
    /// 1-based line of the first code point.
    pub line: usize,
    /// 1-based column of the first code point.
    pub column: usize,
}

impl Token {
    /// Where the token starts.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Builds the error for a token the grammar does not allow here.
    pub(crate) fn unexpected(&self) -> ParserError {
        ParserError::new(SyntaxError::UnexpectedToken(self.kind.name()), self.position())
    }
}

/// Pull-based tokenizer over a byte reader.
///
/// # Examples
///
/// ```
/// use jsontree::{TokenKind, Tokenizer};
///
/// let mut tokens = Tokenizer::new(&b"[true]"[..], 4096);
/// assert_eq!(tokens.next_token().unwrap().kind, TokenKind::LeftBracket);
/// assert_eq!(tokens.next_token().unwrap().kind, TokenKind::True);
/// assert_eq!(tokens.next_token().unwrap().column, 6);
/// assert!(!tokens.has_next().unwrap());
/// ```
#[derive(Debug)]
pub struct Tokenizer<R> {
    chars: CodePointReader<R>,
    peeked: Option<Token>,
    end: Option<Position>,
    failed: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Tokenizes `reader`, refilling `buffer_size` bytes at a time.
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            chars: CodePointReader::new(ByteSource::new(reader, buffer_size)),
            peeked: None,
            end: None,
            failed: false,
        }
    }

    /// Whether another token is available.
    ///
    /// # Errors
    ///
    /// Fails if the next token is malformed or the reader fails.
    pub fn has_next(&mut self) -> Result<bool> {
        Ok(self.peek()?.is_some())
    }

    /// The next token without consuming it, `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails if the next token is malformed or the reader fails.
    pub fn peek(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() && self.end.is_none() {
            self.peeked = self.scan()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    ///
    /// Fails with [`SyntaxError::UnexpectedEndOfInput`] when no token is
    /// left, or if the next token is malformed or the reader fails.
    pub fn next_token(&mut self) -> Result<Token> {
        self.peek()?;
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => Err(self.end_of_input()),
        }
    }

    pub(crate) fn end_of_input(&self) -> ParserError {
        let at = self.end.unwrap_or_else(|| self.chars.position());
        ParserError::new(SyntaxError::UnexpectedEndOfInput, at)
    }

    // ---------- Scanner ----------

    fn read(&mut self) -> Result<Option<char>> {
        self.chars
            .next()
            .map_err(|err| ParserError::new(err, self.chars.position()))
    }

    fn error_here(&self, err: SyntaxError) -> ParserError {
        ParserError::new(err, self.chars.position())
    }

    /// Error for a code point that cannot continue the current token.
    fn unexpected(&self, c: Option<char>) -> ParserError {
        match c {
            Some(c) => self.error_here(SyntaxError::UnexpectedCharacter(c)),
            None => self.error_here(SyntaxError::UnexpectedEndOfInput),
        }
    }

    fn scan(&mut self) -> Result<Option<Token>> {
        let c = loop {
            match self.read()? {
                Some(' ' | '\t' | '\n' | '\r') => {}
                Some(c) => break c,
                None => {
                    self.end = Some(self.chars.position());
                    return Ok(None);
                }
            }
        };

        let start = self.chars.position();
        let kind = match c {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '"' => TokenKind::String(self.scan_string()?),
            '-' | '0'..='9' => self.scan_number(c, start)?,
            c if c.is_ascii_alphabetic() => self.scan_keyword(c, start)?,
            c => return Err(self.error_here(SyntaxError::UnexpectedCharacter(c))),
        };

        trace!("token {} at {}:{}", kind.name(), start.line, start.column);
        Ok(Some(Token {
            kind,
            line: start.line,
            column: start.column,
        }))
    }

    fn scan_keyword(&mut self, first: char, start: Position) -> Result<TokenKind> {
        let mut word = String::from(first);
        let terminator = loop {
            match self.read()? {
                Some(c) if c.is_ascii_alphabetic() => word.push(c),
                other => break other,
            }
        };
        self.chars.push_back(terminator);

        match word.as_str() {
            "true" => Ok(TokenKind::True),
            "false" => Ok(TokenKind::False),
            "null" => Ok(TokenKind::Null),
            _ => Err(ParserError::new(SyntaxError::UnknownToken(word), start)),
        }
    }

    /// Appends a run of digits to `text`, returning the first non-digit.
    ///
    /// Fails unless at least one digit is present.
    fn scan_digits(&mut self, text: &mut String) -> Result<Option<char>> {
        let mut c = self.read()?;
        if !matches!(c, Some('0'..='9')) {
            return Err(self.unexpected(c));
        }
        while let Some(d @ '0'..='9') = c {
            text.push(d);
            c = self.read()?;
        }
        Ok(c)
    }

    fn scan_number(&mut self, first: char, start: Position) -> Result<TokenKind> {
        let mut text = String::new();
        let mut c = Some(first);
        if first == '-' {
            text.push('-');
            c = self.read()?;
        }

        match c {
            Some('0') => {
                text.push('0');
                c = self.read()?;
                if let Some(d @ '0'..='9') = c {
                    return Err(self.error_here(SyntaxError::UnexpectedCharacter(d)));
                }
            }
            Some('1'..='9') => {
                self.chars.push_back(c);
                c = self.scan_digits(&mut text)?;
            }
            other => return Err(self.unexpected(other)),
        }

        let mut is_float = false;
        if c == Some('.') {
            is_float = true;
            text.push('.');
            c = self.scan_digits(&mut text)?;
        }
        if let Some(e @ ('e' | 'E')) = c {
            is_float = true;
            text.push(e);
            c = self.read()?;
            if let Some(sign @ ('+' | '-')) = c {
                text.push(sign);
            } else {
                self.chars.push_back(c);
            }
            c = self.scan_digits(&mut text)?;
        }
        self.chars.push_back(c);

        let out_of_range = || ParserError::new(SyntaxError::NumberOutOfRange(text.clone()), start);
        if is_float {
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(TokenKind::Float(f)),
                _ => Err(out_of_range()),
            }
        } else {
            text.parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| out_of_range())
        }
    }

    fn scan_string(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut escapes = UnicodeEscapeBuffer::new();
        loop {
            let Some(c) = self.read()? else {
                return Err(self.error_here(SyntaxError::UnexpectedEndOfInput));
            };
            match c {
                '"' => {
                    escapes.flush(&mut out);
                    return Ok(out);
                }
                '\\' => {
                    let escaped = match self.read()? {
                        Some('u') => {
                            let unit = self.scan_unicode_escape(&mut escapes)?;
                            escapes.push_unit(unit, &mut out);
                            continue;
                        }
                        Some(c @ ('"' | '\\' | '/')) => c,
                        Some('b') => '\u{08}',
                        Some('f') => '\u{0C}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        other => return Err(self.unexpected(other)),
                    };
                    escapes.flush(&mut out);
                    out.push(escaped);
                }
                c if c < '\u{20}' => {
                    return Err(self.error_here(SyntaxError::UnexpectedCharacter(c)));
                }
                c => {
                    escapes.flush(&mut out);
                    out.push(c);
                }
            }
        }
    }

    fn scan_unicode_escape(&mut self, escapes: &mut UnicodeEscapeBuffer) -> Result<u16> {
        loop {
            let Some(c) = self.read()? else {
                return Err(self.error_here(SyntaxError::UnexpectedEndOfInput));
            };
            match escapes.feed(c) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(c) => return Err(self.error_here(SyntaxError::UnexpectedCharacter(c))),
            }
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.has_next() {
            Ok(true) => self.peeked.take().map(Ok),
            Ok(false) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    fn tokens(text: &str) -> Vec<TokenKind> {
        Tokenizer::new(text.as_bytes(), 4096)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    fn first_error(bytes: &[u8]) -> ParserError {
        Tokenizer::new(bytes, 4096)
            .find_map(Result::err)
            .expect("tokenizing should fail")
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens("{ } [ ] : ,"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Colon,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn punctuation_followed_by_garbage() {
        let mut tokens = Tokenizer::new(&b"[]();,"[..], 4096);
        assert_eq!(tokens.next_token().unwrap().kind, TokenKind::LeftBracket);
        assert_eq!(tokens.next_token().unwrap().kind, TokenKind::RightBracket);
        let err = tokens.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(err.position(), (1, 3));
    }

    #[test]
    fn keywords() {
        assert_eq!(
            tokens("true false null"),
            vec![TokenKind::True, TokenKind::False, TokenKind::Null]
        );
    }

    #[test]
    fn unknown_keyword_reports_start() {
        let err = first_error(b"true false nil");
        assert_eq!(err.syntax(), Some(&SyntaxError::UnknownToken("nil".into())));
        assert_eq!(err.position(), (1, 12));
    }

    #[test]
    fn keyword_terminated_by_punctuation() {
        assert_eq!(
            tokens("[null]"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::Null,
                TokenKind::RightBracket
            ]
        );
    }

    #[rstest]
    #[case("0", TokenKind::Integer(0))]
    #[case("-0", TokenKind::Integer(0))]
    #[case("42", TokenKind::Integer(42))]
    #[case("-17", TokenKind::Integer(-17))]
    #[case("9223372036854775807", TokenKind::Integer(i64::MAX))]
    #[case("-9223372036854775808", TokenKind::Integer(i64::MIN))]
    #[case("42.0", TokenKind::Float(42.0))]
    #[case("42e1", TokenKind::Float(420.0))]
    #[case("-0.5", TokenKind::Float(-0.5))]
    #[case("1E+2", TokenKind::Float(100.0))]
    #[case("2.5e-3", TokenKind::Float(0.0025))]
    fn numbers(#[case] text: &str, #[case] expected: TokenKind) {
        assert_eq!(tokens(text), vec![expected]);
    }

    #[rstest]
    #[case::lone_minus("-", ErrorKind::UnexpectedEndOfInput, 2)]
    #[case::minus_letter("-x", ErrorKind::UnexpectedCharacter, 2)]
    #[case::dot_eof("0.", ErrorKind::UnexpectedEndOfInput, 3)]
    #[case::dot_letter("0.x", ErrorKind::UnexpectedCharacter, 3)]
    #[case::exponent_eof("0e", ErrorKind::UnexpectedEndOfInput, 3)]
    #[case::signed_exponent_eof("0e+", ErrorKind::UnexpectedEndOfInput, 4)]
    #[case::signed_exponent_letter("1e-z", ErrorKind::UnexpectedCharacter, 4)]
    #[case::leading_zero("01", ErrorKind::UnexpectedCharacter, 2)]
    #[case::too_large("9223372036854775808", ErrorKind::NumberOutOfRange, 1)]
    #[case::float_overflow(" 1e400", ErrorKind::NumberOutOfRange, 2)]
    fn bad_numbers(#[case] text: &str, #[case] kind: ErrorKind, #[case] column: usize) {
        let err = first_error(text.as_bytes());
        assert_eq!(err.kind(), kind, "{err}");
        assert_eq!(err.position(), (1, column), "{err}");
    }

    #[test]
    fn number_terminator_is_pushed_back() {
        assert_eq!(
            tokens("[1,2.5]"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::Integer(1),
                TokenKind::Comma,
                TokenKind::Float(2.5),
                TokenKind::RightBracket,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            tokens(r#""a\"b\\c\/d\b\f\n\r\tA""#),
            vec![TokenKind::String("a\"b\\c/d\u{8}\u{c}\n\r\tA".into())]
        );
    }

    #[test]
    fn string_surrogate_pair_escape() {
        assert_eq!(
            tokens(r#""\uD83D\uDC4B""#),
            vec![TokenKind::String("👋".into())]
        );
        assert_eq!(
            tokens(r#""\uD83Dx""#),
            vec![TokenKind::String("\u{FFFD}x".into())]
        );
    }

    #[rstest]
    #[case::raw_tab(b"\"Hello\tWorld\"", ErrorKind::UnexpectedCharacter, 7)]
    #[case::bad_escape(br#""\x""#, ErrorKind::UnexpectedCharacter, 3)]
    #[case::bad_hex(br#""\u000G""#, ErrorKind::UnexpectedCharacter, 7)]
    #[case::short_hex(br#""\u001""#, ErrorKind::UnexpectedCharacter, 7)]
    #[case::unterminated_empty(b"\"", ErrorKind::UnexpectedEndOfInput, 2)]
    #[case::unterminated(b"\"foo", ErrorKind::UnexpectedEndOfInput, 5)]
    #[case::eof_after_backslash(b"\"\\", ErrorKind::UnexpectedEndOfInput, 3)]
    fn bad_strings(#[case] bytes: &[u8], #[case] kind: ErrorKind, #[case] column: usize) {
        let err = first_error(bytes);
        assert_eq!(err.kind(), kind, "{err}");
        assert_eq!(err.position(), (1, column), "{err}");
    }

    #[test]
    fn columns_count_code_points() {
        let text = r#"["Olá", "👋", ""]"#;
        let columns: Vec<usize> = Tokenizer::new(text.as_bytes(), 3)
            .map(|token| token.unwrap().column)
            .collect();
        assert_eq!(columns, vec![1, 2, 7, 9, 12, 14, 16]);
    }

    #[test]
    fn lines_advance_on_newline() {
        let positions: Vec<(usize, usize)> = Tokenizer::new(&b"[\n  1,\n  2\n]"[..], 4096)
            .map(|token| token.unwrap().position())
            .map(|p| (p.line, p.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 4), (3, 3), (4, 1)]);
    }

    #[test]
    fn malformed_utf8_outside_string_is_unexpected() {
        let err = first_error(b"\xC0");
        assert_eq!(
            err.syntax(),
            Some(&SyntaxError::UnexpectedCharacter('\u{FFFD}'))
        );
    }

    #[test]
    fn malformed_utf8_inside_string_is_replaced() {
        assert_eq!(
            tokens_bytes(b"\"a\xC0\x40b\""),
            vec![TokenKind::String("a\u{FFFD}@b".into())]
        );
    }

    fn tokens_bytes(bytes: &[u8]) -> Vec<TokenKind> {
        Tokenizer::new(bytes, 1)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokens = Tokenizer::new(&b" 7 "[..], 4096);
        assert_eq!(tokens.peek().unwrap().map(|t| t.column), Some(2));
        assert!(tokens.has_next().unwrap());
        assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Integer(7));
        assert!(!tokens.has_next().unwrap());
        let err = tokens.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.position(), (1, 4));
        // End of input is remembered rather than re-read.
        assert_eq!(tokens.next_token().unwrap_err().position(), (1, 4));
    }

    #[test]
    fn iterator_stops_after_error() {
        let results: Vec<_> = Tokenizer::new(&b"1 ? 2"[..], 4096).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
