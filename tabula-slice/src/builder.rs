use std::mem;

use tabula_error::{TabulaResult, tabula_bail};
use tabula_layout::{Layout, Value};

use crate::encodings::check_row;
use crate::{EncodingRef, InstanceCounter, SliceHeader, TableSliceRef};

/// Accumulates rows of one layout and turns them into a table slice of a chosen encoding.
///
/// Rows are type-checked as they are pushed, so a failed push leaves the builder unchanged.
#[derive(Debug)]
pub struct SliceBuilder {
    layout: Layout,
    encoding: EncodingRef,
    counter: InstanceCounter,
    rows: Vec<Vec<Value>>,
}

impl SliceBuilder {
    /// Create a builder for `layout`. Nested records are flattened into top-level columns.
    pub fn new(layout: Layout, encoding: EncodingRef) -> Self {
        Self {
            layout: layout.flatten(),
            encoding,
            counter: InstanceCounter::global().clone(),
            rows: Vec::new(),
        }
    }

    /// Register the built slices with `counter`.
    pub fn with_counter(mut self, counter: InstanceCounter) -> Self {
        self.counter = counter;
        self
    }

    /// The flattened layout of the slices this builder produces.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The number of rows pushed since the last [`SliceBuilder::finish`].
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row is pending.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append one row, given as one value per column of the flattened layout.
    pub fn push_row(&mut self, row: Vec<Value>) -> TabulaResult<()> {
        check_row(&self.layout, &row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Turn the pending rows into a slice whose first row has the identifier `offset`.
    ///
    /// The builder is empty afterwards and can be reused.
    pub fn finish(&mut self, offset: u64) -> TabulaResult<TableSliceRef> {
        if offset.checked_add(self.rows.len() as u64).is_none() {
            tabula_bail!(
                "offset {} with {} rows overflows the id space",
                offset,
                self.rows.len()
            );
        }
        let rows = mem::take(&mut self.rows);
        let header =
            SliceHeader::with_counter(self.layout.clone(), rows.len(), offset, &self.counter);
        self.encoding.from_rows(header, rows)
    }
}
