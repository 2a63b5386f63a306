use std::any::Any;
use std::sync::Arc;

use bytes::Bytes;
use itertools::Itertools;
use tabula_error::{TabulaResult, tabula_bail};
use tabula_layout::{Value, ValueView};

use crate::encodings::{check_column, check_row, corrupt_body};
use crate::{EncodingId, EncodingRef, SliceEncoding, SliceHeader, TableSlice, TableSliceRef};

/// Stores each column of a slice in its own shared buffer.
///
/// The body is a flexbuffer vector of columns, each a vector of values.
#[derive(Debug)]
pub struct ColumnarEncoding;

impl ColumnarEncoding {
    /// The identifier of the columnar encoding.
    pub const ID: EncodingId = EncodingId::new("tabula.columnar", 0x02);
    /// The current body format.
    pub const VERSION: u16 = 1;
}

/// A table slice whose cells are stored column by column.
#[derive(Debug, Clone)]
pub struct ColumnarSlice {
    header: SliceHeader,
    columns: Arc<[Arc<[Value]>]>,
    first_row: usize,
}

impl ColumnarSlice {
    fn column_window(&self, column: usize) -> &[Value] {
        &self.columns[column][self.first_row..self.first_row + self.header.num_rows()]
    }
}

impl TableSlice for ColumnarSlice {
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
        &ColumnarEncoding
    }

    fn value_at(&self, row: usize, column: usize) -> ValueView<'_> {
        self.columns[column][self.first_row + row].as_view()
    }

    fn copy(&self) -> TableSliceRef {
        Arc::new(self.clone())
    }

    fn slice(&self, start: usize, end: usize) -> TableSliceRef {
        Arc::new(Self {
            header: self.header.slice(start, end),
            columns: self.columns.clone(),
            first_row: self.first_row + start,
        })
    }

    fn encode_body(&self) -> TabulaResult<Bytes> {
        let columns = (0..self.header.num_columns())
            .map(|column| self.column_window(column))
            .collect::<Vec<_>>();
        Ok(Bytes::from(flexbuffers::to_vec(columns)?))
    }
}

impl SliceEncoding for ColumnarEncoding {
    fn id(&self) -> EncodingId {
        Self::ID
    }

    fn version(&self) -> u16 {
        Self::VERSION
    }

    fn decode(&self, header: SliceHeader, body: &[u8]) -> TabulaResult<TableSliceRef> {
        let columns: Vec<Vec<Value>> = flexbuffers::from_slice(body)?;
        if columns.len() != header.num_columns() {
            tabula_bail!(
                InvalidSerde: "expected {} columns but got {}",
                header.num_columns(),
                columns.len()
            );
        }
        for (index, column) in columns.iter().enumerate() {
            check_column(header.layout(), index, column, header.num_rows())
                .map_err(corrupt_body)?;
        }
        Ok(Arc::new(ColumnarSlice {
            header,
            columns: columns.into_iter().map(Arc::from).collect(),
            first_row: 0,
        }))
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

        let mut columns = (0..header.num_columns())
            .map(|_| Vec::with_capacity(rows.len()))
            .collect_vec();
        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Ok(Arc::new(ColumnarSlice {
            header,
            columns: columns.into_iter().map(Arc::from).collect(),
            first_row: 0,
        }))
    }
}
