//! Identifiers and the factory contract of physical table slice encodings.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use tabula_error::TabulaResult;
use tabula_layout::Value;

use crate::{SliceHeader, TableSliceRef};

/// The stable name and envelope code of a table slice encoding.
///
/// Codes `0x0001..=0x00ff` belong to the encodings shipped with Tabula; embedders pick codes
/// above that range. Code zero is never assigned.
#[derive(Clone, Copy, Debug, Eq)]
pub struct EncodingId(&'static str, u16);

impl EncodingId {
    /// Create an identifier from a stable name and code.
    pub const fn new(id: &'static str, code: u16) -> Self {
        Self(id, code)
    }

    /// The code written into envelope headers.
    pub const fn code(&self) -> u16 {
        self.1
    }

    /// The human-readable name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

// Envelopes only carry the code.
impl PartialEq for EncodingId {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl Hash for EncodingId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.1.hash(state);
    }
}

impl Display for EncodingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:#04x})", self.0, self.1)
    }
}

impl AsRef<str> for EncodingId {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// A static reference to an encoding, as stored in a [`crate::Registry`].
pub type EncodingRef = &'static dyn SliceEncoding;

/// The factory side of a physical table slice encoding.
pub trait SliceEncoding: 'static + Send + Sync + Debug {
    /// The unique identifier of the encoding.
    fn id(&self) -> EncodingId;

    /// The version of the body format this encoding writes and reads.
    fn version(&self) -> u16;

    /// Rehydrate a slice from a body written by [`crate::TableSlice::encode_body`].
    ///
    /// Fails on a body that does not describe exactly `header.num_rows()` rows of the header's
    /// layout.
    fn decode(&self, header: SliceHeader, body: &[u8]) -> TabulaResult<TableSliceRef>;

    /// Build a slice from rows of owned values.
    ///
    /// Fails if the rows do not match the header's row count and layout.
    fn from_rows(&self, header: SliceHeader, rows: Vec<Vec<Value>>) -> TabulaResult<TableSliceRef>;
}
