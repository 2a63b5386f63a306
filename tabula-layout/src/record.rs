use std::fmt::{Display, Formatter};
use std::sync::Arc;

use itertools::Itertools;
use tabula_error::tabula_panic;

use crate::FieldType;

/// A name for a field in a record
pub type FieldName = Arc<str>;

/// A named, typed member of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordField {
    name: FieldName,
    ty: FieldType,
}

impl RecordField {
    /// Create a new field.
    pub fn new(name: impl Into<FieldName>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// The name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type of the field.
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }
}

/// A record type is a name and an ordered list of named, typed fields.
///
/// Records may nest. The layout stored with a table slice is always the flattened form, see
/// [`RecordType::flatten`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordType {
    name: Arc<str>,
    fields: Arc<[RecordField]>,
}

impl RecordType {
    /// Create a new [`RecordType`] from a name and a list of fields.
    pub fn new(name: impl Into<Arc<str>>, fields: Vec<RecordField>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into(),
        }
    }

    /// The name of the record, e.g. `zeek.conn`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields of the record, in order.
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// The number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the field at `index`.
    pub fn field(&self, index: usize) -> Option<&RecordField> {
        self.fields.get(index)
    }

    /// Find the index of a field by name
    /// Returns `None` if the field is not found
    pub fn find_name(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns true if no field is itself a record.
    pub fn is_flat(&self) -> bool {
        !self.fields.iter().any(|field| field.ty.is_record())
    }

    /// Flatten nested records into top-level fields named `outer.inner`.
    pub fn flatten(&self) -> Self {
        if self.is_flat() {
            return self.clone();
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        flatten_into(&mut fields, None, &self.fields);
        Self {
            name: self.name.clone(),
            fields: fields.into(),
        }
    }

    /// Project the contiguous field range `[first, first + count)`, where a count of `None`
    /// means "to the end".
    ///
    /// ## Panics
    ///
    /// Panics if the range does not lie within the record.
    pub fn sub_record(&self, first: usize, count: Option<usize>) -> Self {
        let end = match count {
            Some(count) => first.checked_add(count),
            None => Some(self.len()),
        };
        let end = match end {
            Some(end) if first <= end && end <= self.len() => end,
            _ => tabula_panic!(
                "field range starting at {first} with {count:?} fields exceeds {} fields",
                self.len()
            ),
        };

        Self {
            name: self.name.clone(),
            fields: self.fields[first..end].into(),
        }
    }
}

fn flatten_into(out: &mut Vec<RecordField>, prefix: Option<&str>, fields: &[RecordField]) {
    for field in fields {
        let name: FieldName = match prefix {
            Some(prefix) => format!("{prefix}.{}", field.name).into(),
            None => field.name.clone(),
        };
        match &field.ty {
            FieldType::Record(inner) => flatten_into(out, Some(&name), inner.fields()),
            ty => out.push(RecordField {
                name,
                ty: ty.clone(),
            }),
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{{{}}}",
            self.name,
            self.fields
                .iter()
                .map(|field| format!("{}: {}", field.name, field.ty))
                .join(", ")
        )
    }
}

impl<N> FromIterator<(N, FieldType)> for RecordType
where
    N: Into<FieldName>,
{
    fn from_iter<I: IntoIterator<Item = (N, FieldType)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(name, ty)| RecordField::new(name, ty))
            .collect::<Vec<_>>();
        Self::new("", fields)
    }
}
