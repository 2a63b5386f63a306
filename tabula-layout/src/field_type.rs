use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::RecordType;

/// The logical type of one column of a layout.
///
/// Every field is nullable, so a type only constrains the non-null values of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `true` or `false`
    Bool,
    /// Signed 64-bit integers
    Integer,
    /// Unsigned 64-bit counters
    Count,
    /// 64-bit floating point numbers
    Real,
    /// Nanoseconds since the UNIX epoch
    Timestamp,
    /// A span of time in nanoseconds
    Duration,
    /// UTF-8 strings
    String,
    /// A variable-length list, parameterized by a single element type
    List(Arc<FieldType>),
    /// A nested record, flattened into top-level columns when stored in a slice
    Record(RecordType),
}

impl FieldType {
    /// Create a list type of the given element type.
    pub fn list(element: FieldType) -> Self {
        Self::List(Arc::new(element))
    }

    /// Check if `self` is a nested record.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Get the `RecordType` if `self` is a record, otherwise `None`.
    pub fn as_record(&self) -> Option<&RecordType> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "int"),
            Self::Count => write!(f, "count"),
            Self::Real => write!(f, "real"),
            Self::Timestamp => write!(f, "time"),
            Self::Duration => write!(f, "duration"),
            Self::String => write!(f, "string"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}
