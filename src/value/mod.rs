//! Value model shared by every diff operation.
//!
//! Comparisons never inspect Rust values directly. Each operand is lowered
//! once, at the entry point, into a [`Value`]: a type name plus one of a
//! closed set of categories ([`ValueKind`]). Every differ then matches on
//! that tagged union instead of re-deriving the shape of its inputs.
//!
//! Types opt in through the [`Diffable`] trait. Implementations are
//! provided for primitives, strings, the standard collections, smart
//! pointers, `Option` and small tuples; structs get one through
//! `#[derive(Diffable)]` (with the `macros` feature) and arbitrary `Debug`
//! types through [`opaque_diffable!`](crate::opaque_diffable).
//!
//! # Example
//!
//! ```rust
//! use assertkit::value::{Category, Diffable};
//!
//! let v = vec![1, 2, 3].to_value();
//! assert_eq!(v.category(), Category::Seq);
//! assert_eq!(v.to_string(), "[1, 2, 3]");
//!
//! let s = "hello".to_value();
//! assert_eq!(s.category(), Category::Str);
//! assert_eq!(s.quoted(), "\"hello\"");
//! ```

mod impls;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Conversion into the diff engine's [`Value`] model.
///
/// # Implementing by hand
///
/// ```rust
/// use assertkit::value::{Diffable, Field, Value};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Diffable for Point {
///     fn to_value(&self) -> Value {
///         Value::structure(
///             std::any::type_name::<Self>(),
///             vec![
///                 Field::new("x", true, self.x.to_value()),
///                 Field::new("y", true, self.y.to_value()),
///             ],
///         )
///     }
/// }
///
/// let v = Point { x: 1, y: 2 }.to_value();
/// assert_eq!(v.to_string(), "Point { x: 1, y: 2 }");
/// ```
pub trait Diffable {
    /// Lower `self` into a [`Value`].
    fn to_value(&self) -> Value;

    /// Type name recorded on the lowered value.
    ///
    /// Two operands are only structurally compared when their labels
    /// match. Strings (`str`, `String`, `Cow<str>`) share the label `str`
    /// and sequences (`Vec`, `VecDeque`, arrays, slices) share `[T]`, so
    /// owned and borrowed forms compare freely.
    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// The closed set of value categories the differs dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// An absent value (`None`).
    Nil,
    /// Numbers, booleans, chars and opaque values.
    Scalar,
    /// Text.
    Str,
    /// Ordered sequences (`Vec`, slices, arrays, sets, tuples).
    Seq,
    /// Key/value containers.
    Map,
    /// Records with named or positional fields.
    Struct,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Scalar => "scalar",
            Self::Str => "string",
            Self::Seq => "sequence",
            Self::Map => "map",
            Self::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// A scalar payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `()`
    Unit,
    /// A boolean.
    Bool(bool),
    /// Any signed integer, widened.
    Int(i128),
    /// Any unsigned integer, widened.
    UInt(u128),
    /// A 32-bit float, kept narrow so it renders as written.
    Float32(f32),
    /// A 64-bit float.
    Float(f64),
    /// A single `char`.
    Char(char),
    /// A value only known through its `Debug` rendering.
    Opaque(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float32(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Opaque(repr) => f.write_str(repr),
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name (`"0"`, `"1"`, ... for tuple structs).
    pub name: Cow<'static, str>,
    /// Whether the field is part of the type's public surface.
    ///
    /// Non-exported fields take part in equality but are never named in a
    /// struct diff.
    pub exported: bool,
    /// The field's value.
    pub value: Value,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<Cow<'static, str>>, exported: bool, value: Value) -> Self {
        Self {
            name: name.into(),
            exported,
            value,
        }
    }
}

/// Category payload of a [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// See [`Category::Nil`].
    Nil,
    /// See [`Category::Scalar`].
    Scalar(Scalar),
    /// See [`Category::Str`].
    Str(String),
    /// See [`Category::Seq`].
    Seq(Vec<Value>),
    /// See [`Category::Map`]. Entries keep the container's order.
    Map(Vec<(Value, Value)>),
    /// See [`Category::Struct`]. Fields keep declaration order.
    Struct(Vec<Field>),
}

/// A lowered, comparable value: a type name plus a categorised payload.
///
/// Equality is structural and includes the type name, so two values of
/// different types are never equal even when they render identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    type_name: Cow<'static, str>,
    kind: ValueKind,
}

impl Value {
    /// Create a value from its parts.
    pub fn new(type_name: impl Into<Cow<'static, str>>, kind: ValueKind) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
        }
    }

    /// An absent value of the given type.
    pub fn nil(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(type_name, ValueKind::Nil)
    }

    /// A scalar value.
    pub fn scalar(type_name: impl Into<Cow<'static, str>>, scalar: Scalar) -> Self {
        Self::new(type_name, ValueKind::Scalar(scalar))
    }

    /// A string value.
    pub fn string(type_name: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Self {
        Self::new(type_name, ValueKind::Str(text.into()))
    }

    /// A sequence value.
    pub fn seq(type_name: impl Into<Cow<'static, str>>, items: Vec<Value>) -> Self {
        Self::new(type_name, ValueKind::Seq(items))
    }

    /// A map value; entries are kept in the given order.
    pub fn map(type_name: impl Into<Cow<'static, str>>, entries: Vec<(Value, Value)>) -> Self {
        Self::new(type_name, ValueKind::Map(entries))
    }

    /// A struct value; fields are kept in the given order.
    pub fn structure(type_name: impl Into<Cow<'static, str>>, fields: Vec<Field>) -> Self {
        Self::new(type_name, ValueKind::Struct(fields))
    }

    /// A scalar known only through its `Debug` rendering.
    ///
    /// ```rust
    /// use assertkit::value::Value;
    /// use std::time::Duration;
    ///
    /// let v = Value::opaque(&Duration::from_millis(5));
    /// assert_eq!(v.to_string(), "5ms");
    /// ```
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::scalar(
            std::any::type_name::<T>(),
            Scalar::Opaque(format!("{value:?}")),
        )
    }

    /// Replace the type name, keeping the payload.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<Cow<'static, str>>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// The full type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The categorised payload.
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The payload's category.
    #[must_use]
    pub fn category(&self) -> Category {
        match self.kind {
            ValueKind::Nil => Category::Nil,
            ValueKind::Scalar(_) => Category::Scalar,
            ValueKind::Str(_) => Category::Str,
            ValueKind::Seq(_) => Category::Seq,
            ValueKind::Map(_) => Category::Map,
            ValueKind::Struct(_) => Category::Struct,
        }
    }

    /// Whether this is an absent value.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self.kind, ValueKind::Nil)
    }

    /// Container length: bytes for strings, items for sequences, entries
    /// for maps. `None` for every other category.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match &self.kind {
            ValueKind::Str(s) => Some(s.len()),
            ValueKind::Seq(items) => Some(items.len()),
            ValueKind::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether this is a container with no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Render with strings and chars quoted, as used for map keys and
    /// field names in diagnostics.
    #[must_use]
    pub fn quoted(&self) -> String {
        Nested(self).to_string()
    }

    /// Type name with module paths stripped from every segment.
    ///
    /// ```rust
    /// use assertkit::value::Diffable;
    ///
    /// let v = vec![String::from("a")].to_value();
    /// assert_eq!(v.short_type_name(), "[str]");
    /// ```
    #[must_use]
    pub fn short_type_name(&self) -> String {
        short_name(&self.type_name)
    }

    /// Ordering used to give unordered containers a reproducible order.
    ///
    /// Numbers compare numerically, strings lexically, anything else by
    /// its quoted rendering.
    #[must_use]
    pub fn order(&self, other: &Self) -> Ordering {
        match (&self.kind, &other.kind) {
            (ValueKind::Scalar(Scalar::Int(a)), ValueKind::Scalar(Scalar::Int(b))) => a.cmp(b),
            (ValueKind::Scalar(Scalar::UInt(a)), ValueKind::Scalar(Scalar::UInt(b))) => a.cmp(b),
            (ValueKind::Scalar(Scalar::Bool(a)), ValueKind::Scalar(Scalar::Bool(b))) => a.cmp(b),
            (ValueKind::Scalar(Scalar::Char(a)), ValueKind::Scalar(Scalar::Char(b))) => a.cmp(b),
            (ValueKind::Str(a), ValueKind::Str(b)) => a.cmp(b),
            _ => self.quoted().cmp(&other.quoted()),
        }
    }
}

impl Diffable for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("Value")
    }
}

/// Top-level rendering: strings and chars appear raw, everything nested
/// inside a container is quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Str(s) => f.write_str(s),
            ValueKind::Scalar(Scalar::Char(c)) => write!(f, "{c}"),
            _ => Nested(self).fmt(f),
        }
    }
}

struct Nested<'a>(&'a Value);

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        match &value.kind {
            ValueKind::Nil => f.write_str("None"),
            ValueKind::Scalar(Scalar::Char(c)) => write!(f, "{c:?}"),
            ValueKind::Scalar(scalar) => write!(f, "{scalar}"),
            ValueKind::Str(s) => write!(f, "{s:?}"),
            ValueKind::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    Nested(item).fmt(f)?;
                }
                f.write_str("]")
            }
            ValueKind::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", Nested(k), Nested(v))?;
                }
                f.write_str("}")
            }
            ValueKind::Struct(fields) => {
                let name = value.short_type_name();
                if fields.is_empty() {
                    return f.write_str(&name);
                }
                write!(f, "{name} {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, Nested(&field.value))?;
                }
                f.write_str(" }")
            }
        }
    }
}

// `alloc::vec::Vec<my_crate::Point>` -> `Vec<Point>`
fn short_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or(""));
            segment.clear();
            out.push(ch);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_paths() {
        assert_eq!(short_name("alloc::vec::Vec<my::Point>"), "Vec<Point>");
        assert_eq!(short_name("i32"), "i32");
        assert_eq!(
            short_name("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
            "HashMap<String, i32>"
        );
    }

    #[test]
    fn test_top_level_string_is_raw() {
        let v = Value::string("str", "hi");
        assert_eq!(v.to_string(), "hi");
        assert_eq!(v.quoted(), "\"hi\"");
    }

    #[test]
    fn test_nested_strings_are_quoted() {
        let v = Value::seq(
            "[str]",
            vec![Value::string("str", "a"), Value::string("str", "b")],
        );
        assert_eq!(v.to_string(), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_struct_rendering() {
        let v = Value::structure(
            "demo::User",
            vec![
                Field::new("name", true, Value::string("str", "Ann")),
                Field::new("age", false, Value::scalar("u8", Scalar::UInt(30))),
            ],
        );
        assert_eq!(v.to_string(), "User { name: \"Ann\", age: 30 }");
    }

    #[test]
    fn test_unit_struct_rendering() {
        let v = Value::structure("demo::Marker", Vec::new());
        assert_eq!(v.to_string(), "Marker");
    }

    #[test]
    fn test_len_by_category() {
        assert_eq!(Value::string("str", "héllo").len(), Some(6));
        assert_eq!(Value::seq("[i32]", Vec::new()).len(), Some(0));
        assert_eq!(Value::scalar("i32", Scalar::Int(1)).len(), None);
        assert_eq!(Value::nil("Option<i32>").len(), None);
    }

    #[test]
    fn test_equality_includes_type_name() {
        let a = Value::scalar("i32", Scalar::Int(1));
        let b = Value::scalar("i64", Scalar::Int(1));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_order_numeric() {
        let two = Value::scalar("i32", Scalar::Int(2));
        let ten = Value::scalar("i32", Scalar::Int(10));
        assert_eq!(two.order(&ten), Ordering::Less);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Seq.to_string(), "sequence");
        assert_eq!(Category::Str.to_string(), "string");
    }
}
