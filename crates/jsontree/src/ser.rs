//! Compact and indented text forms of a [`Value`].
//!
//! The compact form is also available through `Display` (`{}`), and the
//! default indented form through the alternate flag (`{:#}`).

use core::fmt::{self, Write};

use crate::{
    options::FormatOptions,
    value::{Array, Object, Value},
};

/// Writes `value` without any whitespace.
///
/// # Examples
///
/// ```
/// let v = jsontree::from_str(r#"[ "foo", 42, 3.14 ]"#).unwrap().unwrap();
/// assert_eq!(jsontree::to_compact_text(&v), r#"["foo",42,3.14]"#);
/// ```
#[must_use]
pub fn to_compact_text(value: &Value) -> String {
    value.to_string()
}

/// Writes `value` with two spaces of indentation per level.
#[must_use]
pub fn to_indented_text(value: &Value) -> String {
    to_indented_text_with(value, &FormatOptions::default())
}

/// Writes `value` in the indented form described by `options`.
#[must_use]
pub fn to_indented_text_with(value: &Value, options: &FormatOptions) -> String {
    Indented { value, options }.to_string()
}

struct Indented<'a> {
    value: &'a Value,
    options: &'a FormatOptions,
}

impl fmt::Display for Indented<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_indented(f, self.value, self.options, 0)
    }
}

/// Escapes `src` for inclusion in a JSON string literal.
///
/// Quotes, backslashes and the usual control characters get their short
/// escapes; other control characters and the Unicode line separators are
/// written as `\uXXXX`.
pub(crate) fn write_escaped_string<W: Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // Pre-2019 JSON parsers reject raw line separators.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", u32::from(c))?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_quoted<W: Write>(src: &str, f: &mut W) -> fmt::Result {
    f.write_char('"')?;
    write_escaped_string(src, f)?;
    f.write_char('"')
}

/// Shortest representation that reads back as the same float.
///
/// Always contains a `.` or an exponent so it never re-parses as an integer.
fn write_float<W: Write>(n: f64, f: &mut W) -> fmt::Result {
    if n.is_finite() {
        write!(f, "{n:?}")
    } else {
        f.write_str("null")
    }
}

fn write_scalar<W: Write>(value: &Value, f: &mut W) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => write!(f, "{i}"),
        Value::Float(n) => write_float(*n, f),
        Value::String(s) => write_quoted(s, f),
        Value::Array(a) => write!(f, "{a}"),
        Value::Object(o) => write!(f, "{o}"),
    }
}

fn write_indent<W: Write>(f: &mut W, width: usize) -> fmt::Result {
    write!(f, "{:width$}", "")
}

fn write_indented<W: Write>(
    f: &mut W,
    value: &Value,
    options: &FormatOptions,
    level: usize,
) -> fmt::Result {
    let inner = level + 1;
    match value {
        Value::Array(array) if array.is_empty() => f.write_str("[]"),
        Value::Array(array) if array.len() == 1 && options.inline_single_element => {
            f.write_char('[')?;
            for item in array {
                write_indented(f, item, options, level)?;
            }
            f.write_char(']')
        }
        Value::Array(array) => {
            f.write_str("[\n")?;
            for (i, item) in array.iter().enumerate() {
                if i > 0 {
                    f.write_str(",\n")?;
                }
                write_indent(f, options.indent * inner)?;
                write_indented(f, item, options, inner)?;
            }
            f.write_char('\n')?;
            write_indent(f, options.indent * level)?;
            f.write_char(']')
        }
        Value::Object(object) if object.is_empty() => f.write_str("{}"),
        Value::Object(object) => {
            f.write_str("{\n")?;
            for (i, (name, item)) in object.iter().enumerate() {
                if i > 0 {
                    f.write_str(",\n")?;
                }
                write_indent(f, options.indent * inner)?;
                write_quoted(name, f)?;
                f.write_str(": ")?;
                write_indented(f, item, options, inner)?;
            }
            f.write_char('\n')?;
            write_indent(f, options.indent * level)?;
            f.write_char('}')
        }
        scalar => write_scalar(scalar, f),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write_indented(f, self, &FormatOptions::default(), 0)
        } else {
            write_scalar(self, f)
        }
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_scalar(item, f)?;
        }
        f.write_char(']')
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (name, item)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_quoted(name, f)?;
            f.write_char(':')?;
            write_scalar(item, f)?;
        }
        f.write_char('}')
    }
}
