// automatically generated by the FlatBuffers compiler, do not modify


// @generated

use core::mem;
use core::cmp::Ordering;

extern crate flatbuffers;
use self::flatbuffers::{EndianScalar, Follow};

pub enum TableSliceOffset {}
#[derive(Copy, Clone, PartialEq)]

/// The binary envelope of one table slice.
///
/// The layout is not embedded: readers supply it when unpacking.
pub struct TableSlice<'a> {
  pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for TableSlice<'a> {
  type Inner = TableSlice<'a>;
  #[inline]
  unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
    Self { _tab: unsafe { flatbuffers::Table::new(buf, loc) } }
  }
}

impl<'a> TableSlice<'a> {
  pub const VT_ENCODING: flatbuffers::VOffsetT = 4;
  pub const VT_VERSION: flatbuffers::VOffsetT = 6;
  pub const VT_NUM_ROWS: flatbuffers::VOffsetT = 8;
  pub const VT_OFFSET: flatbuffers::VOffsetT = 10;
  pub const VT_DATA: flatbuffers::VOffsetT = 12;

  #[inline]
  pub unsafe fn init_from_table(table: flatbuffers::Table<'a>) -> Self {
    TableSlice { _tab: table }
  }
  #[allow(unused_mut)]
  pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
    _fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
    args: &'args TableSliceArgs<'args>
  ) -> flatbuffers::WIPOffset<TableSlice<'bldr>> {
    let mut builder = TableSliceBuilder::new(_fbb);
    builder.add_offset(args.offset);
    builder.add_num_rows(args.num_rows);
    if let Some(x) = args.data { builder.add_data(x); }
    builder.add_version(args.version);
    builder.add_encoding(args.encoding);
    builder.finish()
  }


  /// The code of the encoding that wrote `data`.
  #[inline]
  pub fn encoding(&self) -> u16 {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<u16>(TableSlice::VT_ENCODING, Some(0)).unwrap()}
  }
  /// The version of that encoding's body format.
  #[inline]
  pub fn version(&self) -> u16 {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<u16>(TableSlice::VT_VERSION, Some(0)).unwrap()}
  }
  #[inline]
  pub fn num_rows(&self) -> u64 {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<u64>(TableSlice::VT_NUM_ROWS, Some(0)).unwrap()}
  }
  /// The identifier of the first row.
  #[inline]
  pub fn offset(&self) -> u64 {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<u64>(TableSlice::VT_OFFSET, Some(0)).unwrap()}
  }
  /// The encoding-specific body.
  #[inline]
  pub fn data(&self) -> Option<flatbuffers::Vector<'a, u8>> {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'a, u8>>>(TableSlice::VT_DATA, None)}
  }
}

impl flatbuffers::Verifiable for TableSlice<'_> {
  #[inline]
  fn run_verifier(
    v: &mut flatbuffers::Verifier, pos: usize
  ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
    use self::flatbuffers::Verifiable;
    v.visit_table(pos)?
     .visit_field::<u16>("encoding", Self::VT_ENCODING, false)?
     .visit_field::<u16>("version", Self::VT_VERSION, false)?
     .visit_field::<u64>("num_rows", Self::VT_NUM_ROWS, false)?
     .visit_field::<u64>("offset", Self::VT_OFFSET, false)?
     .visit_field::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'_, u8>>>("data", Self::VT_DATA, false)?
     .finish();
    Ok(())
  }
}
pub struct TableSliceArgs<'a> {
    pub encoding: u16,
    pub version: u16,
    pub num_rows: u64,
    pub offset: u64,
    pub data: Option<flatbuffers::WIPOffset<flatbuffers::Vector<'a, u8>>>,
}
impl<'a> Default for TableSliceArgs<'a> {
  #[inline]
  fn default() -> Self {
    TableSliceArgs {
      encoding: 0,
      version: 0,
      num_rows: 0,
      offset: 0,
      data: None,
    }
  }
}

pub struct TableSliceBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
  fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
  start_: flatbuffers::WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}
impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> TableSliceBuilder<'a, 'b, A> {
  #[inline]
  pub fn add_encoding(&mut self, encoding: u16) {
    self.fbb_.push_slot::<u16>(TableSlice::VT_ENCODING, encoding, 0);
  }
  #[inline]
  pub fn add_version(&mut self, version: u16) {
    self.fbb_.push_slot::<u16>(TableSlice::VT_VERSION, version, 0);
  }
  #[inline]
  pub fn add_num_rows(&mut self, num_rows: u64) {
    self.fbb_.push_slot::<u64>(TableSlice::VT_NUM_ROWS, num_rows, 0);
  }
  #[inline]
  pub fn add_offset(&mut self, offset: u64) {
    self.fbb_.push_slot::<u64>(TableSlice::VT_OFFSET, offset, 0);
  }
  #[inline]
  pub fn add_data(&mut self, data: flatbuffers::WIPOffset<flatbuffers::Vector<'b , u8>>) {
    self.fbb_.push_slot_always::<flatbuffers::WIPOffset<_>>(TableSlice::VT_DATA, data);
  }
  #[inline]
  pub fn new(_fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> TableSliceBuilder<'a, 'b, A> {
    let start = _fbb.start_table();
    TableSliceBuilder {
      fbb_: _fbb,
      start_: start,
    }
  }
  #[inline]
  pub fn finish(self) -> flatbuffers::WIPOffset<TableSlice<'a>> {
    let o = self.fbb_.end_table(self.start_);
    flatbuffers::WIPOffset::new(o.value())
  }
}

impl core::fmt::Debug for TableSlice<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let mut ds = f.debug_struct("TableSlice");
      ds.field("encoding", &self.encoding());
      ds.field("version", &self.version());
      ds.field("num_rows", &self.num_rows());
      ds.field("offset", &self.offset());
      ds.field("data", &self.data());
      ds.finish()
  }
}
pub enum TableSliceBatchOffset {}
#[derive(Copy, Clone, PartialEq)]

/// Several envelopes packed into one buffer.
pub struct TableSliceBatch<'a> {
  pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for TableSliceBatch<'a> {
  type Inner = TableSliceBatch<'a>;
  #[inline]
  unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
    Self { _tab: unsafe { flatbuffers::Table::new(buf, loc) } }
  }
}

impl<'a> TableSliceBatch<'a> {
  pub const VT_SLICES: flatbuffers::VOffsetT = 4;

  #[inline]
  pub unsafe fn init_from_table(table: flatbuffers::Table<'a>) -> Self {
    TableSliceBatch { _tab: table }
  }
  #[allow(unused_mut)]
  pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr, A: flatbuffers::Allocator + 'bldr>(
    _fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr, A>,
    args: &'args TableSliceBatchArgs<'args>
  ) -> flatbuffers::WIPOffset<TableSliceBatch<'bldr>> {
    let mut builder = TableSliceBatchBuilder::new(_fbb);
    if let Some(x) = args.slices { builder.add_slices(x); }
    builder.finish()
  }


  #[inline]
  pub fn slices(&self) -> Option<flatbuffers::Vector<'a, flatbuffers::ForwardsUOffset<TableSlice<'a>>>> {
    // Safety:
    // Created from valid Table for this object
    // which contains a valid value in this slot
    unsafe { self._tab.get::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'a, flatbuffers::ForwardsUOffset<TableSlice>>>>(TableSliceBatch::VT_SLICES, None)}
  }
}

impl flatbuffers::Verifiable for TableSliceBatch<'_> {
  #[inline]
  fn run_verifier(
    v: &mut flatbuffers::Verifier, pos: usize
  ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
    use self::flatbuffers::Verifiable;
    v.visit_table(pos)?
     .visit_field::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'_, flatbuffers::ForwardsUOffset<TableSlice>>>>("slices", Self::VT_SLICES, false)?
     .finish();
    Ok(())
  }
}
pub struct TableSliceBatchArgs<'a> {
    pub slices: Option<flatbuffers::WIPOffset<flatbuffers::Vector<'a, flatbuffers::ForwardsUOffset<TableSlice<'a>>>>>,
}
impl<'a> Default for TableSliceBatchArgs<'a> {
  #[inline]
  fn default() -> Self {
    TableSliceBatchArgs {
      slices: None,
    }
  }
}

pub struct TableSliceBatchBuilder<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> {
  fbb_: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
  start_: flatbuffers::WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}
impl<'a: 'b, 'b, A: flatbuffers::Allocator + 'a> TableSliceBatchBuilder<'a, 'b, A> {
  #[inline]
  pub fn add_slices(&mut self, slices: flatbuffers::WIPOffset<flatbuffers::Vector<'b , flatbuffers::ForwardsUOffset<TableSlice<'b >>>>) {
    self.fbb_.push_slot_always::<flatbuffers::WIPOffset<_>>(TableSliceBatch::VT_SLICES, slices);
  }
  #[inline]
  pub fn new(_fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>) -> TableSliceBatchBuilder<'a, 'b, A> {
    let start = _fbb.start_table();
    TableSliceBatchBuilder {
      fbb_: _fbb,
      start_: start,
    }
  }
  #[inline]
  pub fn finish(self) -> flatbuffers::WIPOffset<TableSliceBatch<'a>> {
    let o = self.fbb_.end_table(self.start_);
    flatbuffers::WIPOffset::new(o.value())
  }
}

impl core::fmt::Debug for TableSliceBatch<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let mut ds = f.debug_struct("TableSliceBatch");
      ds.field("slices", &self.slices());
      ds.finish()
  }
}
#[inline]
/// Verifies that a buffer of bytes contains a `TableSlice`
/// and returns it.
/// Note that verification is still experimental and may not
/// catch every error, or be maximally performant. For the
/// previous, unchecked, behavior use
/// `root_as_table_slice_unchecked`.
pub fn root_as_table_slice(buf: &[u8]) -> Result<TableSlice, flatbuffers::InvalidFlatbuffer> {
  flatbuffers::root::<TableSlice>(buf)
}
#[inline]
/// Assumes, without verification, that a buffer of bytes contains a TableSlice and returns it.
/// # Safety
/// Callers must trust the given bytes do indeed contain a valid `TableSlice`.
pub unsafe fn root_as_table_slice_unchecked(buf: &[u8]) -> TableSlice {
  unsafe { flatbuffers::root_unchecked::<TableSlice>(buf) }
}
#[inline]
pub fn finish_table_slice_buffer<'a, 'b, A: flatbuffers::Allocator + 'a>(
    fbb: &'b mut flatbuffers::FlatBufferBuilder<'a, A>,
    root: flatbuffers::WIPOffset<TableSlice<'a>>) {
  fbb.finish(root, None);
}
