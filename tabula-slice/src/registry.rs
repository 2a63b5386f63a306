use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tabula_error::tabula_panic;

use crate::InstanceCounter;
use crate::encoding::EncodingRef;
use crate::encodings::{ColumnarEncoding, RowEncoding};

/// A mapping between an encoding's code and an [`EncodingRef`], used to rehydrate slices
/// without knowing their concrete encoding.
///
/// Decoded slices are registered with the registry's [`InstanceCounter`].
#[derive(Debug, Clone)]
pub struct Registry {
    encodings: HashMap<u16, EncodingRef>,
    counter: InstanceCounter,
}

impl Registry {
    /// A registry without any encoding.
    pub fn empty() -> Self {
        Self {
            encodings: HashMap::new(),
            counter: InstanceCounter::global().clone(),
        }
    }

    /// Add an encoding.
    ///
    /// ## Panics
    ///
    /// Panics if another encoding with the same code is registered.
    pub fn with_encoding(mut self, encoding: EncodingRef) -> Self {
        self.register(encoding);
        self
    }

    /// Add several encodings.
    ///
    /// ## Panics
    ///
    /// Panics if two encodings share a code.
    pub fn with_encodings<E: IntoIterator<Item = EncodingRef>>(mut self, encodings: E) -> Self {
        for encoding in encodings {
            self.register(encoding);
        }
        self
    }

    /// Register slices decoded through this registry with `counter`.
    pub fn with_counter(mut self, counter: InstanceCounter) -> Self {
        self.counter = counter;
        self
    }

    /// Add an encoding.
    ///
    /// ## Panics
    ///
    /// Panics if another encoding with the same code is registered.
    pub fn register(&mut self, encoding: EncodingRef) {
        let id = encoding.id();
        match self.encodings.entry(id.code()) {
            Entry::Occupied(existing) => tabula_panic!(
                "encoding {} conflicts with registered encoding {}",
                id,
                existing.get().id()
            ),
            Entry::Vacant(slot) => {
                log::debug!("Registering encoding {} version {}", id, encoding.version());
                slot.insert(encoding);
            }
        }
    }

    /// The registered encodings, in no particular order.
    pub fn encodings(&self) -> impl Iterator<Item = EncodingRef> + '_ {
        self.encodings.values().copied()
    }

    /// Find the encoding registered under `encoding_code`.
    pub fn lookup_encoding(&self, encoding_code: u16) -> Option<EncodingRef> {
        self.encodings.get(&encoding_code).copied()
    }

    /// The counter decoded slices are registered with.
    pub fn counter(&self) -> &InstanceCounter {
        &self.counter
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty().with_encodings([&RowEncoding as EncodingRef, &ColumnarEncoding])
    }
}
