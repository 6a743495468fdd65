//! The immutable JSON value tree.
//!
//! [`Value`] distinguishes integers from floats, and [`Object`] keeps its
//! members in the order their names first appeared. Neither [`Array`] nor
//! [`Object`] offers mutation once built.

use std::{cmp::Ordering, slice};

use indexmap::{IndexMap, map};

use crate::error::AccessError;

/// A JSON value.
///
/// `Display` writes the compact text form; see [`crate::ser`] for the
/// indented form.
///
/// # Examples
///
/// ```
/// use jsontree::Value;
///
/// let v = jsontree::from_str(r#"{"key": [1, 2.5, "x"]}"#).unwrap().unwrap();
/// assert_eq!(v.to_string(), r#"{"key":[1,2.5,"x"]}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number written without fraction or exponent.
    Integer(i64),
    /// A number written with a fraction and/or exponent.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// Named members in insertion order.
    Object(Object),
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Bool(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// assert!(Value::Integer(42).is_integer());
    /// assert!(!Value::Float(42.0).is_integer());
    /// ```
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Float`].
    ///
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` for both [`Integer`] and [`Float`].
    ///
    /// [`Integer`]: Value::Integer
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The boolean, if this is a [`Value::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is a [`Value::Integer`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as a float, for both [`Value::Float`] and
    /// [`Value::Integer`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jsontree::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    /// assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The string slice, if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The array, if this is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The object, if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Lower-case name of the variant, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Scalars of the same variant are ordered; anything else is unordered
/// unless equal.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(Array(v))
    }
}

/// An immutable, ordered sequence of values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Array(Vec<Value>);

impl Array {
    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<&Value, AccessError> {
        self.0.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: self.0.len(),
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Array {
    fn from(v: Vec<Value>) -> Self {
        Self(v)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An immutable map from member names to values, in insertion order.
///
/// Equality ignores member order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Object(IndexMap<String, Value>);

impl Object {
    /// The value of the member called `name`.
    ///
    /// # Errors
    ///
    /// [`AccessError::NoSuchMember`] if there is no such member.
    pub fn get(&self, name: &str) -> Result<&Value, AccessError> {
        self.0
            .get(name)
            .ok_or_else(|| AccessError::NoSuchMember(name.to_owned()))
    }

    /// Returns `true` if a member called `name` exists.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Member names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<IndexMap<String, Value>> for Object {
    fn from(v: IndexMap<String, Value>) -> Self {
        Self(v)
    }
}

/// Later duplicates overwrite the value but keep the first position.
impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    use super::{Array, Object, Value};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Integer(i) => serializer.serialize_i64(*i),
                Value::Float(f) => serializer.serialize_f64(*f),
                Value::String(s) => serializer.serialize_str(s),
                Value::Array(a) => a.serialize(serializer),
                Value::Object(o) => o.serialize(serializer),
            }
        }
    }

    impl Serialize for Array {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for item in self {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }

    impl Serialize for Object {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self {
                map.serialize_entry(name, value)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_are_distinct() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::Float(1.0), Value::Float(1.0));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn object_equality_ignores_order() {
        let a: Object = [("x", Value::Integer(1)), ("y", Value::Null)]
            .into_iter()
            .collect();
        let b: Object = [("y", Value::Null), ("x", Value::Integer(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.names().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(b.names().collect::<Vec<_>>(), ["y", "x"]);
    }

    #[test]
    fn array_equality_is_ordered() {
        let a = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
        let b = Value::from(vec![Value::Integer(2), Value::Integer(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn ordering_within_variants() {
        assert!(Value::Bool(false) < Value::Bool(true));
        assert!(Value::Integer(-3) < Value::Integer(2));
        assert!(Value::Float(-0.0) < Value::Float(0.0));
        assert!(Value::from("abc") < Value::from("abd"));
        assert_eq!(
            Value::Null.partial_cmp(&Value::Null),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn ordering_across_variants_is_undefined() {
        assert_eq!(Value::Integer(1).partial_cmp(&Value::Float(1.0)), None);
        assert_eq!(Value::Null.partial_cmp(&Value::Bool(false)), None);
        let a = Value::from(vec![Value::Null]);
        let b = Value::from(vec![Value::Bool(true)]);
        assert_eq!(a.partial_cmp(&b), None);
        assert_eq!(a.partial_cmp(&a.clone()), Some(Ordering::Equal));
    }

    #[test]
    fn array_access() {
        let array: Array = [Value::Integer(7), Value::Null].into_iter().collect();
        assert_eq!(array.len(), 2);
        assert_eq!(array.get(0), Ok(&Value::Integer(7)));
        assert_eq!(
            array.get(2),
            Err(AccessError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(array.iter().filter(|v| v.is_null()).count(), 1);
    }

    #[test]
    fn object_access() {
        let object: Object = [("a", Value::Integer(1)), ("a", Value::Integer(2))]
            .into_iter()
            .collect();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("a"), Ok(&Value::Integer(2)));
        assert!(object.contains_name("a"));
        assert_eq!(
            object.get("b"),
            Err(AccessError::NoSuchMember("b".into()))
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(5).as_i64(), Some(5));
        assert_eq!(Value::Float(5.0).as_i64(), None);
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert!(Value::Null.as_array().is_none());
        assert!(Value::Object(Object::default()).as_object().is_some());
        assert_eq!(Value::Float(1.5).kind_name(), "float");
    }
}
