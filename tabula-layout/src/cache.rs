use std::sync::LazyLock;

use hashbrown::HashMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::{Layout, RecordType};

static GLOBAL: LazyLock<LayoutCache> = LazyLock::new(LayoutCache::default);

/// Deduplicates structurally equal layouts so that many slices share one allocation.
///
/// Entries are never evicted. Lookups take a shared read lock, so concurrent readers never
/// block each other; the write lock is only taken to insert a record seen for the first time.
#[derive(Debug, Default)]
pub struct LayoutCache {
    layouts: RwLock<HashMap<RecordType, Layout, FxBuildHasher>>,
}

impl LayoutCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static LayoutCache {
        &GLOBAL
    }

    /// Returns the shared handle for `record`, inserting it on first use.
    ///
    /// A nested record is interned together with its flat form, and the handle's
    /// [`Layout::flatten`] returns the interned flat handle.
    pub fn intern(&self, record: RecordType) -> Layout {
        if let Some(layout) = self.layouts.read().get(&record) {
            return layout.clone();
        }

        let mut layouts = self.layouts.write();
        // Another writer may have inserted the record between the two locks.
        if let Some(layout) = layouts.get(&record) {
            return layout.clone();
        }
        let layout = if record.is_flat() {
            Layout::new(record.clone())
        } else {
            let flat = layouts
                .entry(record.flatten())
                .or_insert_with_key(|flat| {
                    log::debug!("Interning layout {}", flat);
                    Layout::new(flat.clone())
                })
                .clone();
            Layout::with_flat(record.clone(), flat)
        };
        log::debug!("Interning layout {}", record);
        layouts.insert(record, layout.clone());
        layout
    }

    /// Returns true if a structurally equal record has been interned.
    pub fn contains(&self, record: &RecordType) -> bool {
        self.layouts.read().contains_key(record)
    }

    /// The number of distinct layouts in the cache.
    pub fn len(&self) -> usize {
        self.layouts.read().len()
    }

    /// Returns true if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.layouts.read().is_empty()
    }
}
