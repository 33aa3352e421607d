//! Schema adapters between Rust data and [`Value`].
//!
//! [`Inspect`] is how field paths step into an element, and [`ToValue`] is
//! how value predicates see an element. Both are implemented by
//! `#[derive(Inspect)]` from the `condmap-macros` crate, but can also be
//! implemented by hand.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::value::{Record, Value};

/// Field access for [`FieldCheck`](crate::FieldCheck) paths.
///
/// # Derive Usage
///
/// ```ignore
/// use condmap_macros::Inspect;
///
/// #[derive(Inspect)]
/// struct Entry {
///     name: String,
///     code: i64,
///     #[inspect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use std::borrow::Cow;
/// use condmap::{Inspect, Value};
///
/// struct Entry {
///     name: String,
///     code: i64,
/// }
///
/// impl Inspect for Entry {
///     fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
///         match name {
///             "name" => Some(Cow::Owned(Value::from(self.name.as_str()))),
///             "code" => Some(Cow::Owned(Value::from(self.code))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Inspect {
    /// Resolves one path segment.
    ///
    /// Returns `None` if the field or key doesn't exist, or if this shape
    /// has no named members.
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;
}

/// Steps through one pointer indirection, then resolves a record field or a
/// map key.
impl Inspect for Value {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        match self.deref_pointer()? {
            Value::Record(record) => record.field(name).map(Cow::Borrowed),
            Value::Map(map) => map.get(name).map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Inspect for Record {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        Record::field(self, name).map(Cow::Borrowed)
    }
}

impl Inspect for serde_json::Value {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.as_object()?
            .get(name)
            .map(|value| Cow::Owned(Value::from(value.clone())))
    }
}

impl<K, V> Inspect for HashMap<String, V, K>
where
    K: std::hash::BuildHasher,
    V: ToValue,
{
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(ToValue::as_value)
    }
}

impl<V: ToValue> Inspect for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(ToValue::as_value)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }
}

/// Conversion of Rust data into a [`Value`].
pub trait ToValue {
    /// Builds an owned value.
    fn to_value(&self) -> Value;

    /// Borrows the value when `self` already is one.
    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Owned(self.to_value())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn as_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

impl ToValue for Record {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

macro_rules! to_value_via_from {
    ($($ty:ty),+) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )+
    };
}

to_value_via_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

/// `None` becomes [`Value::Null`]; `Some` is transparent.
impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<V: ToValue> ToValue for BTreeMap<String, V> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }
}

impl<V: ToValue, S> ToValue for HashMap<String, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

/// Shared values keep their identity as a [`Value::Pointer`].
impl ToValue for Arc<Value> {
    fn to_value(&self) -> Value {
        Value::Pointer(Some(Arc::clone(self)))
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn as_value(&self) -> Cow<'_, Value> {
        (**self).as_value()
    }
}

/// Resolves a dot-separated path from an element.
///
/// The first segment goes through the element's own [`Inspect`] impl, every
/// later segment through [`Value`]'s. Returns `None` as soon as a segment
/// cannot be resolved.
pub fn resolve_path<'a, T>(element: &'a T, segments: &[String]) -> Option<Cow<'a, Value>>
where
    T: Inspect + ?Sized,
{
    let (first, rest) = segments.split_first()?;
    let mut current = element.field(first)?;

    for segment in rest {
        current = match current {
            Cow::Borrowed(value) => value.field(segment)?,
            Cow::Owned(value) => Cow::Owned(value.field(segment)?.into_owned()),
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested() -> Value {
        Value::Record(
            Record::new("Outer")
                .with_field(
                    "inner",
                    Value::pointer(Record::new("Inner").with_field("code", 420)),
                )
                .with_field("missing", Value::null_pointer())
                .with_field("label", "outer"),
        )
    }

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(str::to_string).collect()
    }

    #[test]
    fn value_field_through_pointer() {
        let value = nested();
        assert_eq!(
            resolve_path(&value, &path("inner.code")).as_deref(),
            Some(&Value::from(420))
        );
    }

    #[test]
    fn value_field_null_pointer_is_unresolved() {
        let value = nested();
        assert!(resolve_path(&value, &path("missing.code")).is_none());
    }

    #[test]
    fn value_field_on_scalar_is_unresolved() {
        let value = nested();
        assert!(resolve_path(&value, &path("label.code")).is_none());
    }

    #[test]
    fn map_keys_resolve() {
        let value = Value::from(json!({"a": {"b": 7}}));
        assert_eq!(
            resolve_path(&value, &path("a.b")).as_deref(),
            Some(&Value::from(7))
        );
        assert!(resolve_path(&value, &path("a.c")).is_none());
    }

    #[test]
    fn json_elements_inspect_directly() {
        let doc = json!({"user": {"name": "john"}});
        assert_eq!(
            resolve_path(&doc, &path("user.name")).as_deref(),
            Some(&Value::from("john"))
        );
        assert!(json!(5).field("user").is_none());
    }

    #[test]
    fn hash_map_elements_inspect() {
        let mut map = HashMap::new();
        map.insert("code".to_string(), 500i64);
        assert_eq!(map.field("code").as_deref(), Some(&Value::from(500)));
        assert!(map.field("name").is_none());
    }

    #[test]
    fn to_value_conversions() {
        assert_eq!(Some(3u8).to_value(), Value::from(3u8));
        assert_eq!(None::<u8>.to_value(), Value::Null);
        assert_eq!(vec!["a", "b"].to_value(), Value::from(json!(["a", "b"])));
        assert_eq!(Box::new(1.5).to_value(), Value::from(1.5));
    }

    #[test]
    fn arc_values_keep_identity() {
        let shared = Arc::new(Value::from(1));
        assert!(shared.to_value().shallow_eq(&shared.to_value()));
    }

    #[test]
    fn value_as_value_borrows() {
        let value = Value::from(1);
        assert!(matches!(value.as_value(), Cow::Borrowed(_)));
    }
}
