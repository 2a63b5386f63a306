#![deny(missing_docs)]

//! The schema side of Tabula.
//!
//! A [`Layout`] is the shared, immutable record type of a table slice. Layouts are compared
//! structurally, and a [`LayoutCache`] hands out one shared handle per distinct record so that
//! slices of the same family also share the allocation. Cells are read as [`ValueView`]s and
//! written as owned [`Value`]s.

pub use cache::*;
pub use field_type::*;
pub use layout::*;
pub use record::*;
pub use value::*;

mod cache;
mod field_type;
mod layout;
mod record;
mod value;
