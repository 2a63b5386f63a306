//! Packing table slices into binary envelopes and rehydrating them.
//!
//! An envelope carries the encoding code, the body version, the row count and the offset of a
//! slice, followed by the encoding-specific body. The layout is never embedded; readers supply
//! it, usually from a [`tabula_layout::LayoutCache`].

use bytes::Bytes;
use flatbuffers::{FlatBufferBuilder, Follow, VerifierOptions, WIPOffset, root_with_opts};
use tabula_error::{TabulaError, TabulaResult, tabula_bail, tabula_err};
use tabula_flatbuffers::table_slice as fb;
use tabula_flatbuffers::{
    FlatBufferRoot, ReadFlatBuffer, WriteFlatBuffer, WriteFlatBufferExt, finish_bytes,
};
use tabula_layout::Layout;

use crate::{Registry, SliceHeader, TableSlice, TableSliceRef};

/// Limits applied while verifying an envelope buffer before it is read.
#[derive(Debug, Clone)]
pub struct UnpackOptions {
    /// The maximum nesting depth of flatbuffer tables.
    pub max_depth: usize,
    /// The maximum number of flatbuffer tables.
    pub max_tables: usize,
    /// The maximum number of bytes the verifier may visit, counting overlapping reads.
    pub max_apparent_size: usize,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        let defaults = VerifierOptions::default();
        Self {
            max_depth: defaults.max_depth,
            max_tables: defaults.max_tables,
            max_apparent_size: defaults.max_apparent_size,
        }
    }
}

impl UnpackOptions {
    fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            max_depth: self.max_depth,
            max_tables: self.max_tables,
            max_apparent_size: self.max_apparent_size,
            ..Default::default()
        }
    }
}

/// The owned contents of one envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceParts {
    /// The code of the encoding that wrote `body`.
    pub encoding: u16,
    /// The body format version.
    pub version: u16,
    /// The number of rows.
    pub num_rows: u64,
    /// The identifier of the first row.
    pub offset: u64,
    /// The encoding-specific body.
    pub body: Bytes,
}

impl TryFrom<&dyn TableSlice> for SliceParts {
    type Error = TabulaError;

    fn try_from(slice: &dyn TableSlice) -> Result<Self, Self::Error> {
        let encoding = slice.encoding();
        let body = slice
            .encode_body()
            .map_err(|err| err.with_context(format!("Failed to encode {} slice", encoding.id())))?;
        Ok(Self {
            encoding: encoding.id().code(),
            version: encoding.version(),
            num_rows: slice.rows() as u64,
            offset: slice.offset(),
            body,
        })
    }
}

impl FlatBufferRoot for SliceParts {}

impl WriteFlatBuffer for SliceParts {
    type Target<'a> = fb::TableSlice<'a>;

    fn write_flatbuffer<'fb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fb>,
    ) -> WIPOffset<Self::Target<'fb>> {
        let data = fbb.create_vector(self.body.as_ref());
        fb::TableSlice::create(
            fbb,
            &fb::TableSliceArgs {
                encoding: self.encoding,
                version: self.version,
                num_rows: self.num_rows,
                offset: self.offset,
                data: Some(data),
            },
        )
    }
}

impl ReadFlatBuffer for SliceParts {
    type Source<'a> = fb::TableSlice<'a>;
    type Error = TabulaError;

    fn read_flatbuffer<'buf>(
        fb: &<Self::Source<'buf> as Follow<'buf>>::Inner,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            encoding: fb.encoding(),
            version: fb.version(),
            num_rows: fb.num_rows(),
            offset: fb.offset(),
            body: Bytes::copy_from_slice(body_of(fb)?),
        })
    }
}

fn body_of<'a>(fb: &fb::TableSlice<'a>) -> TabulaResult<&'a [u8]> {
    fb.data()
        .map(|data| data.bytes())
        .ok_or_else(|| tabula_err!(InvalidSerde: "TableSlice envelope is missing its body"))
}

/// Write `slice` into `fbb`, returning the offset of its envelope within the builder.
pub fn pack<'fb>(
    fbb: &mut FlatBufferBuilder<'fb>,
    slice: &dyn TableSlice,
) -> TabulaResult<WIPOffset<fb::TableSlice<'fb>>> {
    Ok(SliceParts::try_from(slice)?.write_flatbuffer(fbb))
}

/// Rehydrate the slice stored in `fb`, using `layout` as its schema.
///
/// Fails if the encoding is not registered, the body version is not the one the registered
/// encoding reads, or the body does not describe the rows the header announces.
pub fn unpack(
    fb: fb::TableSlice<'_>,
    layout: Layout,
    registry: &Registry,
) -> TabulaResult<TableSliceRef> {
    let encoding = registry
        .lookup_encoding(fb.encoding())
        .ok_or_else(|| tabula_err!(InvalidSerde: "Unknown encoding {:#06x}", fb.encoding()))?;
    if fb.version() != encoding.version() {
        tabula_bail!(
            InvalidSerde: "Unsupported version {} of encoding {}, expected {}",
            fb.version(),
            encoding.id(),
            encoding.version()
        );
    }

    let num_rows = usize::try_from(fb.num_rows()).map_err(|_| {
        tabula_err!(
            InvalidSerde: "Row count {} does not fit into a usize",
            fb.num_rows()
        )
    })?;
    if fb.offset().checked_add(fb.num_rows()).is_none() {
        tabula_bail!(
            InvalidSerde: "Offset {} with {} rows overflows the id space",
            fb.offset(),
            fb.num_rows()
        );
    }

    let header = SliceHeader::with_counter(layout, num_rows, fb.offset(), registry.counter());
    let slice = encoding
        .decode(header, body_of(&fb)?)
        .map_err(|err| err.with_context(format!("Failed to decode {} slice", encoding.id())))?;
    if slice.rows() != num_rows {
        tabula_bail!(
            InvalidSerde: "Decoded {} rows but the envelope announces {}",
            slice.rows(),
            num_rows
        );
    }

    log::trace!(
        "Unpacked {} rows at offset {} with {}",
        num_rows,
        slice.offset(),
        encoding.id()
    );
    Ok(slice)
}

/// Write `slice` into a standalone buffer.
pub fn serialize(slice: &dyn TableSlice) -> TabulaResult<Bytes> {
    Ok(SliceParts::try_from(slice)?.write_flatbuffer_bytes())
}

/// Verify `bytes` as a standalone envelope and rehydrate the slice it holds.
pub fn deserialize(
    bytes: &[u8],
    layout: Layout,
    registry: &Registry,
    options: &UnpackOptions,
) -> TabulaResult<TableSliceRef> {
    let fb = root_with_opts::<fb::TableSlice>(&options.verifier_options(), bytes)?;
    unpack(fb, layout, registry)
}

/// Write several slices of one layout into `fbb` as a single batch.
pub fn pack_batch<'fb, 'a>(
    fbb: &mut FlatBufferBuilder<'fb>,
    slices: impl IntoIterator<Item = &'a TableSliceRef>,
) -> TabulaResult<WIPOffset<fb::TableSliceBatch<'fb>>> {
    let packed = slices
        .into_iter()
        .map(|slice| pack(fbb, slice.as_ref()))
        .collect::<TabulaResult<Vec<_>>>()?;
    let slices = fbb.create_vector(&packed);
    Ok(fb::TableSliceBatch::create(
        fbb,
        &fb::TableSliceBatchArgs {
            slices: Some(slices),
        },
    ))
}

/// Rehydrate every slice of a batch, using `layout` as their schema.
pub fn unpack_batch(
    fb: fb::TableSliceBatch<'_>,
    layout: &Layout,
    registry: &Registry,
) -> TabulaResult<Vec<TableSliceRef>> {
    fb.slices()
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(index, slice)| {
            unpack(slice, layout.clone(), registry)
                .map_err(|err| err.with_context(format!("Failed to unpack slice {index} of batch")))
        })
        .collect()
}

/// Write several slices of one layout into a standalone buffer.
pub fn serialize_batch<'a>(
    slices: impl IntoIterator<Item = &'a TableSliceRef>,
) -> TabulaResult<Bytes> {
    let mut fbb = FlatBufferBuilder::new();
    let root = pack_batch(&mut fbb, slices)?;
    Ok(finish_bytes(fbb, root))
}

/// Verify `bytes` as a standalone batch and rehydrate its slices.
pub fn deserialize_batch(
    bytes: &[u8],
    layout: &Layout,
    registry: &Registry,
    options: &UnpackOptions,
) -> TabulaResult<Vec<TableSliceRef>> {
    let fb = root_with_opts::<fb::TableSliceBatch>(&options.verifier_options(), bytes)?;
    unpack_batch(fb, layout, registry)
}

#[cfg(test)]
mod tests {
    use flatbuffers::FlatBufferBuilder;
    use tabula_flatbuffers::ReadFlatBuffer;
    use tabula_flatbuffers::table_slice as fb;
    use tabula_layout::{FieldType, Layout, RecordField, RecordType, Value};

    use super::{SliceParts, UnpackOptions, deserialize, serialize, unpack};
    use crate::encodings::{ColumnarEncoding, RowEncoding};
    use crate::{InstanceCounter, Registry, SliceBuilder, TableSliceRef};

    fn layout() -> Layout {
        Layout::new(RecordType::new(
            "test",
            vec![
                RecordField::new("a", FieldType::Integer),
                RecordField::new("b", FieldType::String),
            ],
        ))
    }

    fn slice() -> TableSliceRef {
        let mut builder = SliceBuilder::new(layout(), &ColumnarEncoding);
        builder.push_row(vec![Value::Integer(-1), "x".into()]).unwrap();
        builder.push_row(vec![Value::Null, "y".into()]).unwrap();
        builder.finish(42).unwrap()
    }

    fn envelope(encoding: u16, version: u16, num_rows: u64, body: &[u8]) -> Vec<u8> {
        let mut fbb = FlatBufferBuilder::new();
        let data = fbb.create_vector(body);
        let root = fb::TableSlice::create(
            &mut fbb,
            &fb::TableSliceArgs {
                encoding,
                version,
                num_rows,
                offset: 0,
                data: Some(data),
            },
        );
        fbb.finish_minimal(root);
        fbb.finished_data().to_vec()
    }

    #[test]
    fn header_is_readable_without_registry() {
        let bytes = serialize(slice().as_ref()).unwrap();
        let parts = SliceParts::read_flatbuffer_bytes(&bytes).unwrap();
        assert_eq!(parts.encoding, ColumnarEncoding::ID.code());
        assert_eq!(parts.version, ColumnarEncoding::VERSION);
        assert_eq!(parts.num_rows, 2);
        assert_eq!(parts.offset, 42);
    }

    #[test]
    fn decoded_slices_use_registry_counter() {
        let counter = InstanceCounter::new();
        let registry = Registry::default().with_counter(counter.clone());
        let bytes = serialize(slice().as_ref()).unwrap();
        let decoded = deserialize(&bytes, layout(), &registry, &UnpackOptions::default()).unwrap();
        assert_eq!(counter.live(), 1);
        drop(decoded);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn unknown_encoding() {
        let bytes = envelope(0x4242, 1, 0, &[]);
        let err = deserialize(&bytes, layout(), &Registry::default(), &UnpackOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Unknown encoding 0x4242"));
    }

    #[test]
    fn unsupported_version() {
        let bytes = envelope(RowEncoding::ID.code(), 99, 0, &[]);
        let err = deserialize(&bytes, layout(), &Registry::default(), &UnpackOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported version 99"));
    }

    #[test]
    fn corrupt_body() {
        let bytes = envelope(RowEncoding::ID.code(), RowEncoding::VERSION, 2, &[1, 2, 3]);
        let fb = flatbuffers::root::<fb::TableSlice>(&bytes).unwrap();
        assert!(unpack(fb, layout(), &Registry::default()).is_err());
    }

    #[test]
    fn row_count_mismatch() {
        let body = slice().encode_body().unwrap();
        let bytes = envelope(ColumnarEncoding::ID.code(), ColumnarEncoding::VERSION, 3, &body);
        assert!(
            deserialize(&bytes, layout(), &Registry::default(), &UnpackOptions::default())
                .is_err()
        );
    }

    #[test]
    fn verifier_limits_apply() {
        let bytes = serialize(slice().as_ref()).unwrap();
        let options = UnpackOptions {
            max_apparent_size: 4,
            ..Default::default()
        };
        assert!(deserialize(&bytes, layout(), &Registry::default(), &options).is_err());
    }
}
