use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<InstanceCounter> = LazyLock::new(InstanceCounter::new);

/// Counts live table slice instances, for diagnostics.
///
/// A process-wide counter backs every slice that is not given one explicitly. Tests attach a
/// private counter to observe their own slices without interference from other threads.
#[derive(Debug, Clone, Default)]
pub struct InstanceCounter(Arc<AtomicUsize>);

impl InstanceCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide counter.
    pub fn global() -> &'static InstanceCounter {
        &GLOBAL
    }

    /// The number of live instances tracked by this counter.
    pub fn live(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    /// Register a new instance. The count drops again when the guard is dropped.
    pub fn track(&self) -> InstanceGuard {
        self.0.fetch_add(1, Ordering::Relaxed);
        InstanceGuard(self.clone())
    }

    /// Returns true if both handles update the same count.
    pub fn same_counter(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Keeps one instance registered with an [`InstanceCounter`].
///
/// Cloning a guard registers another instance.
#[derive(Debug)]
pub struct InstanceGuard(InstanceCounter);

impl InstanceGuard {
    /// The counter this guard is registered with.
    pub fn counter(&self) -> &InstanceCounter {
        &self.0
    }
}

impl Clone for InstanceGuard {
    fn clone(&self) -> Self {
        self.0.track()
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        self.0.0.fetch_sub(1, Ordering::Relaxed);
    }
}
