use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use crate::RecordType;

/// A cheap, shared handle to an immutable record type.
///
/// Equality is structural: two handles are equal when their records are, whether or not they
/// point to the same allocation. Handles interned through a [`crate::LayoutCache`] are
/// additionally pointer-equal, which makes the comparison O(1).
#[derive(Debug, Clone)]
pub struct Layout(Arc<LayoutData>);

#[derive(Debug)]
struct LayoutData {
    record: RecordType,
    // Empty for flat records, which are their own flat form.
    flat: OnceLock<Layout>,
}

impl Layout {
    /// Wrap a record type in a new, uncached handle.
    pub fn new(record: RecordType) -> Self {
        Self(Arc::new(LayoutData {
            record,
            flat: OnceLock::new(),
        }))
    }

    /// A handle to a nested record whose flat form is already known.
    pub(crate) fn with_flat(record: RecordType, flat: Layout) -> Self {
        Self(Arc::new(LayoutData {
            record,
            flat: OnceLock::from(flat),
        }))
    }

    /// Returns true if both handles share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The record this handle points to.
    pub fn record(&self) -> &RecordType {
        &self.0.record
    }

    /// Returns a handle to the flattened record.
    ///
    /// A flat layout is its own flat form. A nested layout computes its flat form once, so every
    /// call on clones of the same handle returns the same allocation.
    pub fn flatten(&self) -> Self {
        if self.0.record.is_flat() {
            return self.clone();
        }
        self.0
            .flat
            .get_or_init(|| Self::new(self.0.record.flatten()))
            .clone()
    }
}

impl Deref for Layout {
    type Target = RecordType;

    fn deref(&self) -> &Self::Target {
        &self.0.record
    }
}

impl From<RecordType> for Layout {
    fn from(record: RecordType) -> Self {
        Self::new(record)
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.record == other.0.record
    }
}

impl Eq for Layout {}

impl Hash for Layout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.record.hash(state);
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.record, f)
    }
}

#[cfg(test)]
mod test {
    use crate::{FieldType, Layout, RecordField, RecordType};

    #[test]
    fn structural_equality() {
        let record = RecordType::new("x", vec![RecordField::new("a", FieldType::Integer)]);
        let lhs = Layout::new(record.clone());
        let rhs = Layout::new(record);
        assert!(!lhs.ptr_eq(&rhs));
        assert_eq!(lhs, rhs);
        assert!(lhs.ptr_eq(&lhs.flatten()));
    }

    #[test]
    fn flat_form_is_computed_once() {
        let inner = RecordType::new("", vec![RecordField::new("p", FieldType::Count)]);
        let nested = Layout::new(RecordType::new(
            "x",
            vec![RecordField::new("d", FieldType::Record(inner))],
        ));
        let flat = nested.flatten();
        assert_eq!(flat.fields()[0].name(), "d.p");
        assert!(flat.ptr_eq(&nested.clone().flatten()));
        assert!(flat.ptr_eq(&flat.flatten()));
    }
}
