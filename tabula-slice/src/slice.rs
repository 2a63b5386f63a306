use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bytes::Bytes;
use tabula_error::{TabulaExpect, TabulaResult, tabula_panic};
use tabula_layout::{FieldType, Layout, RecordType, ValueView};

use crate::encoding::{EncodingId, EncodingRef};
use crate::header::SliceHeader;
use crate::view::{ColumnView, RowView};

/// A shared, immutable handle to a table slice.
pub type TableSliceRef = Arc<dyn TableSlice>;

/// A horizontal partition of events that share one layout, addressed by the contiguous
/// identifier range `[offset, offset + rows)`.
///
/// This is the contract every physical encoding implements. Callers use the accessors on
/// `dyn TableSlice`, which check bounds before reaching the encoding.
pub trait TableSlice: 'static + Send + Sync + Debug {
    /// Returns the slice as a reference to a generic [`Any`] trait object.
    fn as_any(&self) -> &dyn Any;

    /// The layout, row count and offset of the slice.
    fn header(&self) -> &SliceHeader;

    /// Mutable access to the header, used to renumber a uniquely owned slice.
    fn header_mut(&mut self) -> &mut SliceHeader;

    /// The encoding that owns the payload of this slice.
    fn encoding(&self) -> EncodingRef;

    /// Read one cell. Callers guarantee `row < rows()` and `column < columns()`.
    fn value_at(&self, row: usize, column: usize) -> ValueView<'_>;

    /// Clone the concrete slice into a new, uniquely owned instance.
    fn copy(&self) -> TableSliceRef;

    /// A zero-copy view of rows `[start, end)`, whose offset is advanced by `start`.
    ///
    /// Callers guarantee `start <= end <= rows()`.
    fn slice(&self, start: usize, end: usize) -> TableSliceRef;

    /// Encode the payload into the body of a binary envelope.
    fn encode_body(&self) -> TabulaResult<Bytes>;
}

impl dyn TableSlice + '_ {
    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.header().num_rows()
    }

    /// The number of columns of the flattened layout.
    pub fn columns(&self) -> usize {
        self.header().num_columns()
    }

    /// The identifier of the first row.
    pub fn offset(&self) -> u64 {
        self.header().offset()
    }

    /// The identifier one past the last row.
    pub fn end(&self) -> u64 {
        self.offset() + self.rows() as u64
    }

    /// The flattened layout of the slice.
    pub fn layout(&self) -> &Layout {
        self.header().layout()
    }

    /// The identifier of the concrete encoding.
    pub fn implementation_id(&self) -> EncodingId {
        self.encoding().id()
    }

    /// The layout of the columns `[first_column, first_column + num_columns)`, where `None`
    /// means "to the last column".
    ///
    /// ## Panics
    ///
    /// Panics if the columns exceed the layout.
    pub fn sub_layout(&self, first_column: usize, num_columns: Option<usize>) -> RecordType {
        self.layout().sub_record(first_column, num_columns)
    }

    /// Read the cell at `row` and `column`.
    ///
    /// ## Panics
    ///
    /// Panics if the row or the column is out of bounds.
    pub fn at(&self, row: usize, column: usize) -> ValueView<'_> {
        if row >= self.rows() {
            tabula_panic!(OutOfBounds: row, 0, self.rows());
        }
        if column >= self.columns() {
            tabula_panic!(OutOfBounds: column, 0, self.columns());
        }
        self.value_at(row, column)
    }

    /// The name of a column of the flattened layout.
    ///
    /// ## Panics
    ///
    /// Panics if the column is out of bounds.
    pub fn column_name(&self, column: usize) -> &str {
        self.column_field(column).0
    }

    /// The type of a column of the flattened layout.
    ///
    /// ## Panics
    ///
    /// Panics if the column is out of bounds.
    pub fn column_type(&self, column: usize) -> &FieldType {
        self.column_field(column).1
    }

    fn column_field(&self, column: usize) -> (&str, &FieldType) {
        let field = self
            .layout()
            .record()
            .field(column)
            .unwrap_or_else(|| tabula_panic!(OutOfBounds: column, 0, self.columns()));
        (field.name(), field.field_type())
    }

    /// A lazy view of one column.
    ///
    /// ## Panics
    ///
    /// Panics if the column is out of bounds.
    pub fn column(&self, column: usize) -> ColumnView<'_> {
        if column >= self.columns() {
            tabula_panic!(OutOfBounds: column, 0, self.columns());
        }
        ColumnView::new(self, column)
    }

    /// A lazy view of the column called `name`, or `None` if there is no such column.
    pub fn column_by_name(&self, name: &str) -> Option<ColumnView<'_>> {
        self.layout()
            .find_name(name)
            .map(|column| ColumnView::new(self, column))
    }

    /// A lazy view of one row.
    ///
    /// ## Panics
    ///
    /// Panics if the row is out of bounds.
    pub fn row(&self, row: usize) -> RowView<'_> {
        if row >= self.rows() {
            tabula_panic!(OutOfBounds: row, 0, self.rows());
        }
        RowView::new(self, row)
    }

    /// Lazy views of every row, in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = RowView<'_>> + '_ {
        (0..self.rows()).map(move |row| RowView::new(self, row))
    }
}

/// Rewrite the offset of a uniquely owned slice.
///
/// ## Panics
///
/// Panics if the handle is shared, or if the new range overflows the id space.
pub fn set_offset(slice: &mut TableSliceRef, offset: u64) {
    match Arc::get_mut(slice) {
        Some(slice) => slice.header_mut().set_offset(offset),
        None => tabula_panic!("cannot rewrite the offset of a shared table slice"),
    }
}

/// Mutable access to the slice, copying it first if the handle is shared.
pub fn make_mut(slice: &mut TableSliceRef) -> &mut dyn TableSlice {
    if Arc::get_mut(slice).is_none() {
        log::trace!(
            "Unsharing {} slice at offset {}",
            slice.implementation_id(),
            slice.offset()
        );
        *slice = slice.copy();
    }
    Arc::get_mut(slice).tabula_expect("a fresh copy is uniquely owned")
}

impl PartialEq for dyn TableSlice + '_ {
    fn eq(&self, other: &Self) -> bool {
        if self.rows() != other.rows()
            || self.offset() != other.offset()
            || self.layout() != other.layout()
        {
            return false;
        }
        (0..self.rows()).all(|row| {
            (0..self.columns())
                .all(|column| self.value_at(row, column) == other.value_at(row, column))
        })
    }
}

impl Eq for dyn TableSlice + '_ {}

impl Hash for dyn TableSlice + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.layout().hash(state);
        self.offset().hash(state);
        self.rows().hash(state);
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                self.value_at(row, column).hash(state);
            }
        }
    }
}

impl Display for dyn TableSlice + '_ {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}..{}] {}",
            self.implementation_id(),
            self.offset(),
            self.end(),
            self.layout()
        )
    }
}
