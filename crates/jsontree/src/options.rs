/// Default capacity of the byte buffer between the reader and the decoder.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default bound on array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the JSON parser.
///
/// # Examples
///
/// ```rust
/// use jsontree::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions {
///     buffer_size: 16,
///     allow_multiple_values: true,
///     ..Default::default()
/// };
/// let value = parse_with_options(&b"[1, 2] [3]"[..], options).unwrap();
/// assert_eq!(value.unwrap().to_string(), "[1,2]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Number of bytes requested from the reader per refill.
    ///
    /// Any positive size yields the same result; only the number of
    /// `read` calls changes. Zero is treated as one.
    ///
    /// # Default
    ///
    /// [`DEFAULT_BUFFER_SIZE`]
    pub buffer_size: usize,

    /// Whether more values may follow the first one.
    ///
    /// When `false`, any token after the root value is rejected as
    /// [`UnexpectedToken`](crate::SyntaxError::UnexpectedToken). When `true`,
    /// [`Parser::parse`](crate::Parser::parse) returns the first value and
    /// leaves the rest unread, and iterating a [`Parser`](crate::Parser)
    /// yields each whitespace-delimited value in turn.
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,

    /// Maximum number of nested arrays and objects.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            allow_multiple_values: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Layout of the indented text form.
///
/// # Default
///
/// Two spaces per level, every non-empty container expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces added per nesting level.
    pub indent: usize,

    /// Write a one-element array on a single line as `[element]`.
    ///
    /// # Default
    ///
    /// `false`
    pub inline_single_element: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            inline_single_element: false,
        }
    }
}
