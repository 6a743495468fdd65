//! Recursive-descent parser building a [`Value`] tree from [`Token`]s.
//!
//! Arrays and objects are each driven by a small state machine; a token that
//! does not fit the current state is reported as
//! [`SyntaxError::UnexpectedToken`] at that token's position.

use std::io::Read;

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::{ParserError, Result, SyntaxError},
    lexer::{Token, TokenKind, Tokenizer},
    options::ParserOptions,
    value::{Array, Object, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    Init,
    AfterValue,
    AfterComma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    Init,
    AfterName,
    AfterColon,
    AfterValue,
    AfterComma,
}

/// Builds value trees from a byte reader.
///
/// A `Parser` is also an [`Iterator`] over the whitespace-separated values of
/// its input, which suits newline-delimited JSON. Iteration stops after the
/// first error.
///
/// # Examples
///
/// ```
/// use jsontree::{Parser, ParserOptions, Value};
///
/// let input = "{\"id\": 1}\n{\"id\": 2}\n";
/// let parser = Parser::new(input.as_bytes(), ParserOptions::default());
/// let ids: Vec<i64> = parser
///     .map(|value| value.unwrap().as_object().unwrap().get("id").unwrap().as_i64().unwrap())
///     .collect();
/// assert_eq!(ids, [1, 2]);
/// ```
#[derive(Debug)]
pub struct Parser<R> {
    tokens: Tokenizer<R>,
    options: ParserOptions,
    depth: usize,
    failed: bool,
}

impl<R: Read> Parser<R> {
    /// Parses `reader` with `options`.
    pub fn new(reader: R, options: ParserOptions) -> Self {
        Self::from_tokenizer(Tokenizer::new(reader, options.buffer_size), options)
    }

    /// Parses the tokens of an existing tokenizer.
    pub fn from_tokenizer(tokens: Tokenizer<R>, options: ParserOptions) -> Self {
        Self {
            tokens,
            options,
            depth: 0,
            failed: false,
        }
    }

    /// Parses one document.
    ///
    /// Returns `Ok(None)` when the input holds nothing but whitespace. Unless
    /// [`ParserOptions::allow_multiple_values`] is set, a token after the
    /// root value is an error.
    ///
    /// # Errors
    ///
    /// Any [`ParserError`]: malformed input, unexpected end of input, or a
    /// reader failure.
    pub fn parse(mut self) -> Result<Option<Value>> {
        debug!("parsing with {:?}", self.options);
        let result = self.parse_document();
        match &result {
            Ok(Some(value)) => debug!("parsed {}", value.kind_name()),
            Ok(None) => debug!("empty input"),
            Err(err) => debug!("parse failed: {err}"),
        }
        result
    }

    /// Parses the next root value of a multi-value stream, `Ok(None)` at end
    /// of input.
    ///
    /// # Errors
    ///
    /// Any [`ParserError`].
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        if !self.tokens.has_next()? {
            return Ok(None);
        }
        let token = self.tokens.next_token()?;
        self.parse_value(token).map(Some)
    }

    fn parse_document(&mut self) -> Result<Option<Value>> {
        let value = self.next_value()?;
        if value.is_some() && !self.options.allow_multiple_values {
            if let Some(trailing) = self.tokens.peek()? {
                return Err(trailing.unexpected());
            }
        }
        Ok(value)
    }

    fn parse_value(&mut self, token: Token) -> Result<Value> {
        match token.kind {
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Integer(i) => Ok(Value::Integer(i)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::String(s) => Ok(Value::String(s)),
            TokenKind::LeftBracket => self.nested(&token, Self::parse_array),
            TokenKind::LeftBrace => self.nested(&token, Self::parse_object),
            _ => Err(token.unexpected()),
        }
    }

    fn nested(
        &mut self,
        open: &Token,
        parse: fn(&mut Self) -> Result<Value>,
    ) -> Result<Value> {
        if self.depth >= self.options.max_depth {
            return Err(ParserError::new(
                SyntaxError::NestingTooDeep(self.options.max_depth),
                open.position(),
            ));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    // ---------- Arrays ----------

    fn parse_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        let mut state = ArrayState::Init;
        loop {
            let token = self.tokens.next_token()?;
            state = match (state, token.kind) {
                (ArrayState::Init | ArrayState::AfterValue, TokenKind::RightBracket) => {
                    return Ok(Value::Array(Array::from(items)));
                }
                (ArrayState::AfterValue, TokenKind::Comma) => ArrayState::AfterComma,
                (ArrayState::AfterValue, kind) => {
                    return Err(Token { kind, ..token }.unexpected());
                }
                (ArrayState::Init | ArrayState::AfterComma, kind) => {
                    items.push(self.parse_value(Token { kind, ..token })?);
                    ArrayState::AfterValue
                }
            };
        }
    }

    // ---------- Objects ----------

    fn parse_object(&mut self) -> Result<Value> {
        let mut members = IndexMap::new();
        let mut name = String::new();
        let mut state = ObjectState::Init;
        loop {
            let token = self.tokens.next_token()?;
            state = match (state, token.kind) {
                (ObjectState::Init | ObjectState::AfterComma, TokenKind::String(s)) => {
                    name = s;
                    ObjectState::AfterName
                }
                (ObjectState::Init | ObjectState::AfterValue, TokenKind::RightBrace) => {
                    return Ok(Value::Object(Object::from(members)));
                }
                (ObjectState::AfterName, TokenKind::Colon) => ObjectState::AfterColon,
                (ObjectState::AfterColon, kind) => {
                    let value = self.parse_value(Token { kind, ..token })?;
                    members.insert(std::mem::take(&mut name), value);
                    ObjectState::AfterValue
                }
                (ObjectState::AfterValue, TokenKind::Comma) => ObjectState::AfterComma,
                (_, kind) => return Err(Token { kind, ..token }.unexpected()),
            };
        }
    }
}

impl<R: Read> Iterator for Parser<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_value();
        if result.is_err() {
            self.failed = true;
        }
        result.transpose()
    }
}
