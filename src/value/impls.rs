//! `Diffable` implementations for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::{Diffable, Scalar, Value};

macro_rules! signed {
    ($($t:ty),*) => {$(
        impl Diffable for $t {
            fn to_value(&self) -> Value {
                Value::scalar(Self::type_label(), Scalar::Int(i128::from(*self)))
            }
        }
    )*};
}

macro_rules! unsigned {
    ($($t:ty),*) => {$(
        impl Diffable for $t {
            fn to_value(&self) -> Value {
                Value::scalar(Self::type_label(), Scalar::UInt(u128::from(*self)))
            }
        }
    )*};
}

signed!(i8, i16, i32, i64, i128);
unsigned!(u8, u16, u32, u64, u128);

impl Diffable for isize {
    fn to_value(&self) -> Value {
        // isize is at most 64 bits on every supported target
        Value::scalar(Self::type_label(), Scalar::Int(*self as i128))
    }
}

impl Diffable for usize {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::UInt(*self as u128))
    }
}

impl Diffable for f32 {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::Float32(*self))
    }
}

impl Diffable for f64 {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::Float(*self))
    }
}

impl Diffable for bool {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::Bool(*self))
    }
}

impl Diffable for char {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::Char(*self))
    }
}

impl Diffable for () {
    fn to_value(&self) -> Value {
        Value::scalar(Self::type_label(), Scalar::Unit)
    }
}

impl Diffable for Duration {
    fn to_value(&self) -> Value {
        Value::opaque(self)
    }
}

// Strings

impl Diffable for str {
    fn to_value(&self) -> Value {
        Value::string(Self::type_label(), self)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("str")
    }
}

impl Diffable for String {
    fn to_value(&self) -> Value {
        self.as_str().to_value()
    }

    fn type_label() -> Cow<'static, str> {
        str::type_label()
    }
}

impl Diffable for Cow<'_, str> {
    fn to_value(&self) -> Value {
        self.as_ref().to_value()
    }

    fn type_label() -> Cow<'static, str> {
        str::type_label()
    }
}

impl Diffable for Path {
    fn to_value(&self) -> Value {
        Value::string(Self::type_label(), self.to_string_lossy())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("Path")
    }
}

impl Diffable for PathBuf {
    fn to_value(&self) -> Value {
        self.as_path().to_value()
    }

    fn type_label() -> Cow<'static, str> {
        Path::type_label()
    }
}

// Pointers and wrappers delegate to the pointee.

macro_rules! delegate {
    ($($ptr:ident),*) => {$(
        impl<T: Diffable + ?Sized> Diffable for $ptr<T> {
            fn to_value(&self) -> Value {
                (**self).to_value()
            }

            fn type_label() -> Cow<'static, str> {
                T::type_label()
            }
        }
    )*};
}

delegate!(Box, Rc, Arc);

impl<T: Diffable + ?Sized> Diffable for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn type_label() -> Cow<'static, str> {
        T::type_label()
    }
}

impl<T: Diffable + ?Sized> Diffable for &mut T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn type_label() -> Cow<'static, str> {
        T::type_label()
    }
}

impl<T: Diffable> Diffable for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value().with_type_name(Self::type_label()),
            None => Value::nil(Self::type_label()),
        }
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("Option<{}>", T::type_label()))
    }
}

// Sequences

fn seq_label<T: Diffable>() -> Cow<'static, str> {
    Cow::Owned(format!("[{}]", T::type_label()))
}

impl<T: Diffable> Diffable for [T] {
    fn to_value(&self) -> Value {
        Value::seq(Self::type_label(), self.iter().map(Diffable::to_value).collect())
    }

    fn type_label() -> Cow<'static, str> {
        seq_label::<T>()
    }
}

impl<T: Diffable, const N: usize> Diffable for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }

    fn type_label() -> Cow<'static, str> {
        seq_label::<T>()
    }
}

impl<T: Diffable> Diffable for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }

    fn type_label() -> Cow<'static, str> {
        seq_label::<T>()
    }
}

impl<T: Diffable> Diffable for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::seq(Self::type_label(), self.iter().map(Diffable::to_value).collect())
    }

    fn type_label() -> Cow<'static, str> {
        seq_label::<T>()
    }
}

impl<T: Diffable> Diffable for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::seq(Self::type_label(), self.iter().map(Diffable::to_value).collect())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("BTreeSet<{}>", T::type_label()))
    }
}

impl<T: Diffable, S> Diffable for HashSet<T, S> {
    fn to_value(&self) -> Value {
        let mut items: Vec<Value> = self.iter().map(Diffable::to_value).collect();
        items.sort_by(Value::order);
        Value::seq(Self::type_label(), items)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("HashSet<{}>", T::type_label()))
    }
}

// Maps

impl<K: Diffable, V: Diffable> Diffable for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::map(
            Self::type_label(),
            self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect(),
        )
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("BTreeMap<{}, {}>", K::type_label(), V::type_label()))
    }
}

impl<K: Diffable, V: Diffable, S> Diffable for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        let mut entries: Vec<(Value, Value)> = self
            .iter()
            .map(|(k, v)| (k.to_value(), v.to_value()))
            .collect();
        entries.sort_by(|a, b| a.0.order(&b.0));
        Value::map(Self::type_label(), entries)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("HashMap<{}, {}>", K::type_label(), V::type_label()))
    }
}

// Tuples lower to heterogeneous sequences.

macro_rules! tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Diffable),+> Diffable for ($($name,)+) {
            fn to_value(&self) -> Value {
                Value::seq(Self::type_label(), vec![$(self.$idx.to_value()),+])
            }

            fn type_label() -> Cow<'static, str> {
                let parts: Vec<Cow<'static, str>> = vec![$($name::type_label()),+];
                Cow::Owned(format!("({})", parts.join(", ")))
            }
        }
    };
}

tuple!(A.0);
tuple!(A.0, B.1);
tuple!(A.0, B.1, C.2);
tuple!(A.0, B.1, C.2, D.3);

/// Implement [`Diffable`](crate::value::Diffable) for types that are only
/// compared through their `Debug` rendering.
///
/// ```rust
/// use assertkit::opaque_diffable;
/// use assertkit::value::Diffable;
///
/// #[derive(Debug)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// opaque_diffable!(Color);
///
/// assert_eq!(Color::Red.to_value().to_string(), "Red");
/// assert_ne!(Color::Red.to_value(), Color::Green.to_value());
/// ```
#[macro_export]
macro_rules! opaque_diffable {
    ($($t:ty),+ $(,)?) => {$(
        impl $crate::value::Diffable for $t {
            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::opaque(self)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Category;

    #[test]
    fn test_strings_share_a_label() {
        assert_eq!("a".to_value(), String::from("a").to_value());
        assert_eq!(
            Cow::Borrowed("a").to_value(),
            String::from("a").to_value()
        );
    }

    #[test]
    fn test_sequences_share_a_label() {
        let v = vec![1, 2].to_value();
        let a = [1, 2].to_value();
        let d: VecDeque<i32> = [1, 2].into_iter().collect();
        assert_eq!(v, a);
        assert_eq!(v, d.to_value());
        assert_eq!(vec!["a"].to_value(), vec![String::from("a")].to_value());
    }

    #[test]
    fn test_integer_widths_are_distinct_types() {
        assert_ne!(1i32.to_value(), 1i64.to_value());
        assert_eq!(1i32.to_value().type_name(), "i32");
    }

    #[test]
    fn test_option_lowering() {
        let some = Some(3).to_value();
        let none: Option<i32> = None;
        let none = none.to_value();
        assert_eq!(some.type_name(), "Option<i32>");
        assert_eq!(none.type_name(), "Option<i32>");
        assert_eq!(some.category(), Category::Scalar);
        assert_eq!(none.category(), Category::Nil);
    }

    #[test]
    fn test_hash_map_entries_are_sorted() {
        let mut m = HashMap::new();
        m.insert(10, "ten");
        m.insert(2, "two");
        m.insert(7, "seven");
        assert_eq!(m.to_value().to_string(), "{2: \"two\", 7: \"seven\", 10: \"ten\"}");
    }

    #[test]
    fn test_hash_set_items_are_sorted() {
        let s: HashSet<&str> = ["b", "c", "a"].into_iter().collect();
        assert_eq!(s.to_value().to_string(), "[\"a\", \"b\", \"c\"]");
    }

    #[test]
    fn test_tuple_lowering() {
        let v = (1u8, "x").to_value();
        assert_eq!(v.category(), Category::Seq);
        assert_eq!(v.type_name(), "(u8, str)");
        assert_eq!(v.to_string(), "[1, \"x\"]");
    }

    #[test]
    fn test_pointers_delegate() {
        let boxed: Box<str> = "x".into();
        assert_eq!(boxed.to_value(), "x".to_value());
        assert_eq!(Arc::new(5u8).to_value(), 5u8.to_value());
    }

    #[test]
    fn test_path_lowering() {
        let p = PathBuf::from("/tmp/a");
        assert_eq!(p.to_value().category(), Category::Str);
        assert_eq!(p.to_value().type_name(), "Path");
    }
}
