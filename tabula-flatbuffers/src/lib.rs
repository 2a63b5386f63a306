//! The binary envelope of a Tabula table slice.
//!
//! See [table_slice] for the flatbuffer schema. The envelope carries the encoding code,
//! the body format version, the row count and the offset of a slice, followed by an opaque,
//! encoding-specific body.

#[allow(clippy::all)]
#[allow(clippy::derive_partial_eq_without_eq)]
#[allow(clippy::many_single_char_names)]
#[allow(clippy::unwrap_used)]
#[allow(dead_code)]
#[allow(non_snake_case)]
#[allow(non_camel_case_types)]
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(unused_imports)]
#[allow(unused_lifetimes)]
#[allow(unused_qualifications)]
#[rustfmt::skip]
#[path = "./generated/table_slice.rs"]
/// A serialized table slice without its layout.
///
/// `table_slice.fbs`:
/// ```flatbuffers
#[doc = include_str!("../flatbuffers/table_slice.fbs")]
/// ```
pub mod table_slice;

use bytes::Bytes;
use flatbuffers::{FlatBufferBuilder, Follow, InvalidFlatbuffer, Verifiable, WIPOffset, root};

/// Marker for types that may be written as the root of a flatbuffer.
pub trait FlatBufferRoot {}

/// Read a value from its flatbuffer representation.
pub trait ReadFlatBuffer: Sized {
    /// The flatbuffer table the value is read from.
    type Source<'a>: Verifiable + Follow<'a>;
    /// The error raised on invalid input.
    type Error: From<InvalidFlatbuffer>;

    /// Read the value from an already verified table.
    fn read_flatbuffer<'buf>(
        fb: &<Self::Source<'buf> as Follow<'buf>>::Inner,
    ) -> Result<Self, Self::Error>;

    /// Verify `bytes` as a root table and read the value from it.
    fn read_flatbuffer_bytes<'buf>(bytes: &'buf [u8]) -> Result<Self, Self::Error>
    where
        <Self as ReadFlatBuffer>::Source<'buf>: 'buf,
    {
        let fb = root::<Self::Source<'buf>>(bytes)?;
        Self::read_flatbuffer(&fb)
    }
}

/// Write a value as a flatbuffer table.
pub trait WriteFlatBuffer {
    /// The flatbuffer table the value is written as.
    type Target<'a>;

    /// Write the value into `fbb`, returning the offset of the table.
    fn write_flatbuffer<'fb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fb>,
    ) -> WIPOffset<Self::Target<'fb>>;
}

/// Serialize a value into a standalone buffer holding it as the root table.
pub trait WriteFlatBufferExt: WriteFlatBuffer + FlatBufferRoot {
    /// Write the flatbuffer into a [`Bytes`].
    fn write_flatbuffer_bytes(&self) -> Bytes;
}

impl<F: WriteFlatBuffer + FlatBufferRoot> WriteFlatBufferExt for F {
    fn write_flatbuffer_bytes(&self) -> Bytes {
        let mut fbb = FlatBufferBuilder::new();
        let root = self.write_flatbuffer(&mut fbb);
        finish_bytes(fbb, root)
    }
}

/// Finish `fbb` with `root` as its root table and hand out the written bytes without copying.
///
/// No file identifier or size prefix is written.
pub fn finish_bytes<T>(mut fbb: FlatBufferBuilder<'_>, root: WIPOffset<T>) -> Bytes {
    fbb.finish_minimal(root);
    let (buffer, head) = fbb.collapse();
    let tail = buffer.len();
    Bytes::from(buffer).slice(head..tail)
}

#[cfg(test)]
mod tests {
    use flatbuffers::FlatBufferBuilder;

    use crate::finish_bytes;
    use crate::table_slice::{TableSlice, TableSliceArgs, root_as_table_slice};

    #[test]
    fn envelope_fields_round_trip() {
        let mut fbb = FlatBufferBuilder::new();
        let data = fbb.create_vector(&[1u8, 2, 3]);
        let root = TableSlice::create(
            &mut fbb,
            &TableSliceArgs {
                encoding: 2,
                version: 1,
                num_rows: 7,
                offset: 1 << 40,
                data: Some(data),
            },
        );
        fbb.finish_minimal(root);

        let fb = root_as_table_slice(fbb.finished_data()).unwrap();
        assert_eq!(fb.encoding(), 2);
        assert_eq!(fb.version(), 1);
        assert_eq!(fb.num_rows(), 7);
        assert_eq!(fb.offset(), 1 << 40);
        assert_eq!(fb.data().map(|d| d.bytes().to_vec()), Some(vec![1, 2, 3]));
    }

    #[test]
    fn garbage_fails_verification() {
        assert!(root_as_table_slice(&[0xff; 3]).is_err());
    }

    #[test]
    fn finished_bytes_start_at_the_root() {
        let mut fbb = FlatBufferBuilder::new();
        let root = TableSlice::create(&mut fbb, &TableSliceArgs::default());
        let bytes = finish_bytes(fbb, root);
        let fb = root_as_table_slice(&bytes).unwrap();
        assert_eq!(fb.num_rows(), 0);
        assert!(fb.data().is_none());
    }
}
