//! Dynamic value model for field inspection and value predicates.
//!
//! A [`Value`] is the shape-aware view of an element that field paths walk
//! through and that [`eq`](crate::eq), [`deep_eq`](crate::deep_eq) and
//! [`len`](crate::len) inspect. Rust data is turned into values through
//! [`ToValue`](crate::ToValue) or `#[derive(Inspect)]`; decoded JSON converts
//! directly via `From<serde_json::Value>`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// An owned, dynamically shaped value.
///
/// # Example
///
/// ```
/// use condmap::{Record, Value};
///
/// let user = Value::Record(
///     Record::new("User")
///         .with_field("name", "john")
///         .with_field("code", 500),
/// );
///
/// assert_eq!(user.kind(), "record");
/// assert_eq!(user.as_record().and_then(|r| r.field("name")), Some(&Value::from("john")));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Text value.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Keyed container with string keys.
    Map(BTreeMap<String, Value>),
    /// Named record with ordered fields.
    Record(Record),
    /// Indirection to a shared value. `None` is a null pointer.
    ///
    /// Pointers have identity: two pointers are shallow-equal only when
    /// they point at the same allocation.
    Pointer(Option<Arc<Value>>),
}

impl Value {
    /// Wraps a value behind a fresh pointer.
    pub fn pointer(value: impl Into<Value>) -> Self {
        Value::Pointer(Some(Arc::new(value.into())))
    }

    /// Returns a null pointer.
    pub fn null_pointer() -> Self {
        Value::Pointer(None)
    }

    /// Returns the name of this value's shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Pointer(_) => "pointer",
        }
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Follows one level of pointer indirection.
    ///
    /// Non-pointer values are returned unchanged. A null pointer yields
    /// `None`.
    pub fn deref_pointer(&self) -> Option<&Value> {
        match self {
            Value::Pointer(Some(target)) => Some(target),
            Value::Pointer(None) => None,
            other => Some(other),
        }
    }

    /// Returns the length of a list, map or string (in characters).
    ///
    /// Every other shape has no length.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            Value::String(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    /// Shallow equality.
    ///
    /// Primitives compare by value. Numbers must share the same [`Number`]
    /// variant, so `I64(1)` and `U64(1)` differ while `1i8` and `1i64`,
    /// which both widen to `I64`, are equal. Pointers compare by identity.
    /// Records compare field by field with the same shallow rule. Lists and
    /// maps are not comparable and never shallow-equal anything.
    pub fn shallow_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                a.name == b.name
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.shallow_eq(vb))
            }
            (Value::Pointer(a), Value::Pointer(b)) => match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }

    /// Structural equality, recursing through containers and pointers.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.deep_eq(y)))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.name == b.name
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(&b.fields)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
            }
            (Value::Pointer(a), Value::Pointer(b)) => match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.deep_eq(b),
                (None, None) => true,
                _ => false,
            },
            _ => self.shallow_eq(other),
        }
    }
}

/// Values compare structurally.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.deep_eq(other)
    }
}

/// A named record with ordered fields.
///
/// Records are what `#[derive(Inspect)]` turns structs into. Field order is
/// declaration order and takes part in equality.
#[derive(Debug, Clone, Default)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    /// The record's type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers widen to one variant per signedness class: every signed width
/// becomes `I64` and every unsigned width becomes `U64`. The variant matters
/// for shallow equality. Ordering comparisons between variants go through
/// `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed representations.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    match u64::try_from(signed) {
        Ok(s) => s.cmp(&unsigned),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Arc<Value>> for Value {
    fn from(target: Arc<Value>) -> Self {
        Value::Pointer(Some(target))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
