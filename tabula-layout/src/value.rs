use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::FieldType;

/// An owned cell value.
///
/// Reals compare and hash by bit pattern, so equality is total and `NaN == NaN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    /// The absent value, an instance of every type
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Integer(i64),
    /// An unsigned counter
    Count(u64),
    /// A floating point number
    Real(f64),
    /// Nanoseconds since the UNIX epoch
    Timestamp(i64),
    /// A span of time in nanoseconds
    Duration(i64),
    /// A UTF-8 string
    String(Arc<str>),
    /// A list of values
    List(Arc<[Value]>),
}

/// A borrowed, copyable view of a cell value, as returned by slice accessors.
#[derive(Debug, Clone, Copy)]
pub enum ValueView<'a> {
    /// The absent value
    Null,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Integer(i64),
    /// An unsigned counter
    Count(u64),
    /// A floating point number
    Real(f64),
    /// Nanoseconds since the UNIX epoch
    Timestamp(i64),
    /// A span of time in nanoseconds
    Duration(i64),
    /// A UTF-8 string
    String(&'a str),
    /// A list of values
    List(&'a [Value]),
}

impl Value {
    /// Borrow the value as a [`ValueView`].
    pub fn as_view(&self) -> ValueView<'_> {
        match self {
            Value::Null => ValueView::Null,
            Value::Bool(b) => ValueView::Bool(*b),
            Value::Integer(i) => ValueView::Integer(*i),
            Value::Count(c) => ValueView::Count(*c),
            Value::Real(r) => ValueView::Real(*r),
            Value::Timestamp(t) => ValueView::Timestamp(*t),
            Value::Duration(d) => ValueView::Duration(*d),
            Value::String(s) => ValueView::String(s),
            Value::List(l) => ValueView::List(l),
        }
    }

    /// Returns true if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type-check the value against a field type. `Null` is an instance of every type.
    pub fn is_instance_of(&self, ty: &FieldType) -> bool {
        self.as_view().is_instance_of(ty)
    }
}

impl<'a> ValueView<'a> {
    /// Materialize an owned [`Value`].
    pub fn to_owned(self) -> Value {
        match self {
            ValueView::Null => Value::Null,
            ValueView::Bool(b) => Value::Bool(b),
            ValueView::Integer(i) => Value::Integer(i),
            ValueView::Count(c) => Value::Count(c),
            ValueView::Real(r) => Value::Real(r),
            ValueView::Timestamp(t) => Value::Timestamp(t),
            ValueView::Duration(d) => Value::Duration(d),
            ValueView::String(s) => Value::String(s.into()),
            ValueView::List(l) => Value::List(l.into()),
        }
    }

    /// Returns true if the value is `Null`.
    pub fn is_null(self) -> bool {
        matches!(self, ValueView::Null)
    }

    /// Type-check the value against a field type. `Null` is an instance of every type.
    pub fn is_instance_of(self, ty: &FieldType) -> bool {
        match (self, ty) {
            (ValueView::Null, _) => true,
            (ValueView::Bool(_), FieldType::Bool)
            | (ValueView::Integer(_), FieldType::Integer)
            | (ValueView::Count(_), FieldType::Count)
            | (ValueView::Real(_), FieldType::Real)
            | (ValueView::Timestamp(_), FieldType::Timestamp)
            | (ValueView::Duration(_), FieldType::Duration)
            | (ValueView::String(_), FieldType::String) => true,
            (ValueView::List(values), FieldType::List(element)) => {
                values.iter().all(|v| v.is_instance_of(element))
            }
            _ => false,
        }
    }

    /// The name of the value's kind, for diagnostics.
    pub fn kind(self) -> &'static str {
        match self {
            ValueView::Null => "null",
            ValueView::Bool(_) => "bool",
            ValueView::Integer(_) => "int",
            ValueView::Count(_) => "count",
            ValueView::Real(_) => "real",
            ValueView::Timestamp(_) => "time",
            ValueView::Duration(_) => "duration",
            ValueView::String(_) => "string",
            ValueView::List(_) => "list",
        }
    }
}

impl PartialEq for ValueView<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Count(s), Self::Count(o)) => s == o,
            (Self::Real(s), Self::Real(o)) => s.to_bits() == o.to_bits(),
            (Self::Timestamp(s), Self::Timestamp(o)) => s == o,
            (Self::Duration(s), Self::Duration(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (..) => false,
        }
    }
}

impl Eq for ValueView<'_> {}

impl Hash for ValueView<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Integer(i) | Self::Timestamp(i) | Self::Duration(i) => i.hash(state),
            Self::Count(c) => c.hash(state),
            Self::Real(r) => r.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::List(l) => l.hash(state),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_view() == other.as_view()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_view().hash(state)
    }
}

impl PartialEq<Value> for ValueView<'_> {
    fn eq(&self, other: &Value) -> bool {
        *self == other.as_view()
    }
}

impl PartialEq<ValueView<'_>> for Value {
    fn eq(&self, other: &ValueView<'_>) -> bool {
        self.as_view() == *other
    }
}

impl Display for ValueView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i:+}"),
            Self::Count(c) => write!(f, "{c}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Timestamp(t) => write!(f, "{t}ns"),
            Self::Duration(d) => write!(f, "{d}ns"),
            Self::String(s) => write!(f, "\"{}\"", s.escape_debug()),
            Self::List(l) => write!(f, "[{}]", l.iter().join(", ")),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.as_view(), f)
    }
}

macro_rules! value_from {
    ($T:ty, $variant:ident) => {
        impl From<$T> for Value {
            fn from(value: $T) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

value_from!(bool, Bool);
value_from!(i64, Integer);
value_from!(u64, Count);
value_from!(f64, Real);
value_from!(&str, String);
value_from!(String, String);
value_from!(Vec<Value>, List);

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
