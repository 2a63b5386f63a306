#![deny(missing_docs)]

//! Table slices: immutable, shared batches of events addressed by a contiguous range of ids.
//!
//! A [`TableSlice`] stores the rows `[offset, offset + rows)` of one [`tabula_layout::Layout`]
//! in an encoding-specific representation. Handles are [`TableSliceRef`]s; cloning a handle
//! shares the slice and mutation goes through [`make_mut`], which copies shared slices first.
//!
//! Slices are cut without copying by [`truncate`], [`split`] and [`select`], and are moved
//! between processes as binary envelopes by the [`serde`] module, with a [`Registry`] mapping
//! encoding codes back to implementations.

use static_assertions::assert_impl_all;

pub use builder::*;
pub use counter::*;
pub use encoding::*;
pub use header::*;
pub use ids::*;
pub use random::*;
pub use registry::*;
pub use select::*;
pub use slice::*;
pub use view::*;

mod builder;
mod counter;
mod encoding;
pub mod encodings;
mod header;
mod ids;
mod random;
mod registry;
mod select;
pub mod serde;
mod slice;
mod view;

assert_impl_all!(TableSliceRef: Send, Sync);
assert_impl_all!(Registry: Send, Sync);
assert_impl_all!(InstanceCounter: Send, Sync);
