//! Lazy, borrowing accessors over the rows and columns of a table slice.
//!
//! Views borrow the slice they read from, so a slice always outlives its views. Iterating a
//! view reads cells on demand and can be restarted by calling `iter` again.

use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;
use std::ops::Range;

use tabula_layout::{FieldType, Value, ValueView};

use crate::TableSlice;

/// The cells of one row, one per column, in layout order.
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    slice: &'a dyn TableSlice,
    row: usize,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(slice: &'a dyn TableSlice, row: usize) -> Self {
        Self { slice, row }
    }

    /// The position of the row within its slice.
    pub fn index(&self) -> usize {
        self.row
    }

    /// The global identifier of the row.
    pub fn id(&self) -> u64 {
        self.slice.offset() + self.row as u64
    }

    /// The number of cells, equal to the number of columns.
    pub fn len(&self) -> usize {
        self.slice.columns()
    }

    /// Returns true if the layout has no columns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell in `column`.
    ///
    /// ## Panics
    ///
    /// Panics if the column is out of bounds.
    pub fn get(&self, column: usize) -> ValueView<'a> {
        self.slice.at(self.row, column)
    }

    /// Iterate the cells of the row.
    pub fn iter(&self) -> Cells<'a> {
        Cells {
            slice: self.slice,
            along: Along::Row(self.row),
            positions: 0..self.len(),
        }
    }

    /// Materialize the row as owned values.
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().map(ValueView::to_owned).collect()
    }
}

impl<'a> IntoIterator for RowView<'a> {
    type Item = ValueView<'a>;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for RowView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The cells of one column, one per row, in row order.
#[derive(Clone, Copy)]
pub struct ColumnView<'a> {
    slice: &'a dyn TableSlice,
    column: usize,
}

impl<'a> ColumnView<'a> {
    pub(crate) fn new(slice: &'a dyn TableSlice, column: usize) -> Self {
        Self { slice, column }
    }

    /// The position of the column within the flattened layout.
    pub fn index(&self) -> usize {
        self.column
    }

    /// The name of the column.
    pub fn name(&self) -> &'a str {
        self.slice.column_name(self.column)
    }

    /// The type of the column.
    pub fn field_type(&self) -> &'a FieldType {
        self.slice.column_type(self.column)
    }

    /// The number of cells, equal to the number of rows.
    pub fn len(&self) -> usize {
        self.slice.rows()
    }

    /// Returns true if the slice has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cell in `row`.
    ///
    /// ## Panics
    ///
    /// Panics if the row is out of bounds.
    pub fn get(&self, row: usize) -> ValueView<'a> {
        self.slice.at(row, self.column)
    }

    /// Iterate the cells of the column.
    pub fn iter(&self) -> Cells<'a> {
        Cells {
            slice: self.slice,
            along: Along::Column(self.column),
            positions: 0..self.len(),
        }
    }

    /// Materialize the column as owned values.
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().map(ValueView::to_owned).collect()
    }
}

impl<'a> IntoIterator for ColumnView<'a> {
    type Item = ValueView<'a>;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for ColumnView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnView")
            .field("name", &self.name())
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
enum Along {
    Row(usize),
    Column(usize),
}

/// An iterator over the cells of a [`RowView`] or a [`ColumnView`].
#[derive(Clone)]
pub struct Cells<'a> {
    slice: &'a dyn TableSlice,
    along: Along,
    positions: Range<usize>,
}

impl<'a> Cells<'a> {
    fn cell(&self, position: usize) -> ValueView<'a> {
        match self.along {
            Along::Row(row) => self.slice.value_at(row, position),
            Along::Column(column) => self.slice.value_at(position, column),
        }
    }
}

impl<'a> Iterator for Cells<'a> {
    type Item = ValueView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        Some(self.cell(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl DoubleEndedIterator for Cells<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let position = self.positions.next_back()?;
        Some(self.cell(position))
    }
}

impl ExactSizeIterator for Cells<'_> {}

impl FusedIterator for Cells<'_> {}
