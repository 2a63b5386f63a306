pub use tabula_slice::*;
pub use {
    tabula_error as error, tabula_flatbuffers as flatbuffers, tabula_layout as layout,
    tabula_mask as mask,
};
