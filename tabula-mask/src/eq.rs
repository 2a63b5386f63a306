use crate::{AllOr, Mask};

// Runs are kept maximal, so equal selections have equal runs whatever they were built from.
impl PartialEq for Mask {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.true_count() != other.true_count() {
            return false;
        }
        match (self.values(), other.values()) {
            (AllOr::Some(lhs), AllOr::Some(rhs)) => lhs.runs() == rhs.runs(),
            _ => true,
        }
    }
}

impl Eq for Mask {}
