//! Record model: declared kinds, field values and the records built from them.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::decimal::Decimal;

/// Error type returned by formatting rules and text conversions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unix seconds of 0001-01-01T00:00:00Z, the zero timestamp.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Declared semantic type of a field. Type rules are registered under a `Kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Untyped null with no declared type
    Null,
    Bool,
    Int,
    Uint,
    Float,
    Decimal,
    Timestamp,
    String,
    Record,
    /// User type rendered through [`MarshalText`], keyed by its type name
    Custom(&'static str),
}

/// A user type that knows how to turn itself into text.
pub trait MarshalText: fmt::Debug + Send + Sync {
    /// Name used as the `Kind::Custom` key for this type.
    fn type_name(&self) -> &'static str;

    fn marshal_text(&self) -> Result<String, BoxError>;

    /// Whether the value counts as zero when zero fields are omitted.
    fn is_zero(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Decimal(Decimal),
    Timestamp(DateTime<FixedOffset>),
    String(String),
    Record(Record),
    Text(Arc<dyn MarshalText>),
}

impl Value {
    pub fn text<T: MarshalText + 'static>(value: T) -> Self {
        Value::Text(Arc::new(value))
    }

    /// Kind of the payload, `None` for `Null`.
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Decimal(_) => Kind::Decimal,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::String(_) => Kind::String,
            Value::Record(_) => Kind::Record,
            Value::Text(t) => Kind::Custom(t.type_name()),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Zero value test used by `omit_zero_fields`.
    ///
    /// `Null` is zero for every kind. A non-null decimal is never zero, and a
    /// timestamp is zero when it denotes the instant 0001-01-01T00:00:00Z in
    /// any offset.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Decimal(_) => false,
            Value::Timestamp(t) => {
                t.timestamp() == ZERO_TIMESTAMP_SECS && t.timestamp_subsec_nanos() == 0
            }
            Value::String(s) => s.is_empty(),
            Value::Record(r) => r.is_zero(),
            Value::Text(t) => t.is_zero(),
        }
    }
}

/// The zero timestamp, 0001-01-01T00:00:00Z.
pub fn zero_timestamp() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(ZERO_TIMESTAMP_SECS, 0)
        .unwrap_or_default()
        .fixed_offset()
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

value_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    f64 => Float as f64,
    Decimal => Decimal as Decimal,
    DateTime<FixedOffset> => Timestamp as DateTime<FixedOffset>,
    String => String as String,
    &str => String as String,
    Record => Record as Record,
}

/// Keeps the shortest digits that identify the `f32`, so `0.1f32` stays `0.1`
/// instead of exposing the widened binary value.
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        if !v.is_finite() {
            return Value::Float(f64::from(v));
        }
        let mut buf = ryu::Buffer::new();
        Value::Float(buf.format_finite(v).parse().unwrap_or(f64::from(v)))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v.fixed_offset())
    }
}

/// Rust types with a fixed [`Kind`], used by typed formatting rules.
pub trait FieldType: Into<Value> + 'static {
    const KIND: Kind;

    /// Borrow the payload out of a value of this kind.
    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! field_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: Kind = Kind::$variant;

                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

field_type! {
    bool => Bool,
    i64 => Int,
    u64 => Uint,
    f64 => Float,
    Decimal => Decimal,
    DateTime<FixedOffset> => Timestamp,
    String => String,
    Record => Record,
}

/// A named value with a declared kind. Immutable once built.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    kind: Kind,
    value: Value,
}

impl Field {
    /// Field whose kind is taken from the value itself.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let kind = value.kind().unwrap_or(Kind::Null);
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    /// Unset field of a declared kind.
    pub fn null(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Value::Null,
        }
    }

    /// `Some` becomes a regular field, `None` a null field of `T::KIND`.
    pub fn optional<T: FieldType>(name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => Self::new(name, v),
            None => Self::null(name, T::KIND),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered sequence of fields, encoded as one JSON object.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::new(name, value))
    }

    pub fn with_null(self, name: impl Into<String>, kind: Kind) -> Self {
        self.with_field(Field::null(name, kind))
    }

    pub fn with_optional<T: FieldType>(self, name: impl Into<String>, value: Option<T>) -> Self {
        self.with_field(Field::optional(name, value))
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A record is zero when every one of its fields is.
    pub fn is_zero(&self) -> bool {
        self.fields.iter().all(|f| f.value.is_zero())
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Application types that can be viewed as a [`Record`].
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

impl ToRecord for Record {
    fn to_record(&self) -> Record {
        self.clone()
    }
}
