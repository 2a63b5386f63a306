use tabula_error::tabula_panic;
use tabula_layout::Layout;

use crate::counter::{InstanceCounter, InstanceGuard};

/// The encoding-independent part of every table slice: its flattened layout, its row count and
/// the identifier of its first row.
///
/// Row `i` of the slice has the identifier `offset + i`. A header also keeps its slice
/// registered with an [`InstanceCounter`].
#[derive(Debug, Clone)]
pub struct SliceHeader {
    layout: Layout,
    num_rows: usize,
    offset: u64,
    guard: InstanceGuard,
}

impl SliceHeader {
    /// Create a header tracked by the process-wide counter.
    ///
    /// ## Panics
    ///
    /// Panics if `offset + num_rows` overflows.
    pub fn new(layout: Layout, num_rows: usize, offset: u64) -> Self {
        Self::with_counter(layout, num_rows, offset, InstanceCounter::global())
    }

    /// Create a header tracked by `counter`.
    ///
    /// ## Panics
    ///
    /// Panics if `offset + num_rows` overflows.
    pub fn with_counter(
        layout: Layout,
        num_rows: usize,
        offset: u64,
        counter: &InstanceCounter,
    ) -> Self {
        check_range(offset, num_rows);
        Self {
            layout: layout.flatten(),
            num_rows,
            offset,
            guard: counter.track(),
        }
    }

    /// The flattened layout shared by all rows.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// The number of columns.
    pub fn num_columns(&self) -> usize {
        self.layout.len()
    }

    /// The identifier of the first row.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The counter this slice is registered with.
    pub fn counter(&self) -> &InstanceCounter {
        self.guard.counter()
    }

    /// Renumber the rows so that the first row has the identifier `offset`.
    ///
    /// ## Panics
    ///
    /// Panics if `offset + num_rows` overflows.
    pub fn set_offset(&mut self, offset: u64) {
        check_range(offset, self.num_rows);
        self.offset = offset;
    }

    /// The header of rows `[start, end)`, registered with the same counter.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= self.num_rows,
            "row range {start}..{end} out of bounds for {} rows",
            self.num_rows
        );
        Self {
            layout: self.layout.clone(),
            num_rows: end - start,
            offset: self.offset + start as u64,
            guard: self.guard.clone(),
        }
    }
}

fn check_range(offset: u64, num_rows: usize) {
    if offset.checked_add(num_rows as u64).is_none() {
        tabula_panic!("offset {offset} with {num_rows} rows overflows the id space");
    }
}
