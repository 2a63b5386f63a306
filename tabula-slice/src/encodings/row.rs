use std::any::Any;
use std::sync::Arc;

use bytes::Bytes;
use tabula_error::{TabulaResult, tabula_bail};
use tabula_layout::{Value, ValueView};

use crate::encodings::{check_row, corrupt_body};
use crate::{EncodingId, EncodingRef, SliceEncoding, SliceHeader, TableSlice, TableSliceRef};

/// Stores the cells of a slice row by row in one shared buffer.
///
/// The body is a flexbuffer vector of rows, each a vector of values.
#[derive(Debug)]
pub struct RowEncoding;

impl RowEncoding {
    /// The identifier of the row encoding.
    pub const ID: EncodingId = EncodingId::new("tabula.row", 0x01);
    /// The current body format.
    pub const VERSION: u16 = 1;
}

/// A table slice whose cells are stored row-major.
///
/// Slicing shares the buffer and only moves the window of visible rows.
#[derive(Debug, Clone)]
pub struct RowSlice {
    header: SliceHeader,
    cells: Arc<[Value]>,
    first_row: usize,
}

impl RowSlice {
    fn cell(&self, row: usize, column: usize) -> &Value {
        &self.cells[(self.first_row + row) * self.header.num_columns() + column]
    }

    fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        let columns = self.header.num_columns();
        (self.first_row..self.first_row + self.header.num_rows())
            .map(move |row| &self.cells[row * columns..(row + 1) * columns])
    }
}

impl TableSlice for RowSlice {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn header(&self) -> &SliceHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut SliceHeader {
        &mut self.header
    }

    fn encoding(&self) -> EncodingRef {
        &RowEncoding
    }

    fn value_at(&self, row: usize, column: usize) -> ValueView<'_> {
        self.cell(row, column).as_view()
    }

    fn copy(&self) -> TableSliceRef {
        Arc::new(self.clone())
    }

    fn slice(&self, start: usize, end: usize) -> TableSliceRef {
        Arc::new(Self {
            header: self.header.slice(start, end),
            cells: self.cells.clone(),
            first_row: self.first_row + start,
        })
    }

    fn encode_body(&self) -> TabulaResult<Bytes> {
        let rows = self.rows().collect::<Vec<_>>();
        Ok(Bytes::from(flexbuffers::to_vec(rows)?))
    }
}

impl SliceEncoding for RowEncoding {
    fn id(&self) -> EncodingId {
        Self::ID
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn decode(&self, header: SliceHeader, body: &[u8]) -> TabulaResult<TableSliceRef> {
        let rows: Vec<Vec<Value>> = flexbuffers::from_slice(body)?;
        self.from_rows(header, rows).map_err(corrupt_body)
    }

    fn from_rows(&self, header: SliceHeader, rows: Vec<Vec<Value>>) -> TabulaResult<TableSliceRef> {
        if rows.len() != header.num_rows() {
            tabula_bail!(
                "expected {} rows but got {}",
                header.num_rows(),
                rows.len()
            );
        }
        for row in &rows {
            check_row(header.layout(), row)?;
        }
        Ok(Arc::new(RowSlice {
            header,
            cells: rows.into_iter().flatten().collect(),
            first_row: 0,
        }))
    }
}
