//! Deterministic random table slices for tests and benchmarks.

use rand::distr::Alphanumeric;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use tabula_error::TabulaResult;
use tabula_layout::{FieldType, Layout, Value};

use crate::{EncodingRef, SliceBuilder, TableSliceRef};

/// Generate `num_slices` consecutive slices of `slice_size` random rows each.
///
/// The first slice starts at `offset` and every following slice starts where the previous one
/// ends. The same seed always produces the same slices.
pub fn make_random_table_slices(
    num_slices: usize,
    slice_size: usize,
    layout: Layout,
    offset: u64,
    seed: u64,
    encoding: EncodingRef,
) -> TabulaResult<Vec<TableSliceRef>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = SliceBuilder::new(layout, encoding);
    let types = builder
        .layout()
        .fields()
        .iter()
        .map(|field| field.field_type().clone())
        .collect::<Vec<_>>();

    let mut next_offset = offset;
    let mut slices = Vec::with_capacity(num_slices);
    for _ in 0..num_slices {
        for _ in 0..slice_size {
            builder.push_row(types.iter().map(|ty| random_value(&mut rng, ty)).collect())?;
        }
        let slice = builder.finish(next_offset)?;
        next_offset = slice.end();
        slices.push(slice);
    }
    Ok(slices)
}

fn random_value(rng: &mut StdRng, ty: &FieldType) -> Value {
    if rng.random_ratio(1, 8) {
        return Value::Null;
    }
    match ty {
        FieldType::Bool => Value::Bool(rng.random()),
        FieldType::Integer => Value::Integer(rng.random()),
        FieldType::Count => Value::Count(rng.random()),
        FieldType::Real => Value::Real(rng.random_range(-1e9..1e9)),
        FieldType::Timestamp => Value::Timestamp(rng.random_range(0..i64::MAX)),
        FieldType::Duration => Value::Duration(rng.random_range(0..3_600_000_000_000)),
        FieldType::String => {
            let len = rng.random_range(0..16);
            Value::String(
                rng.sample_iter(Alphanumeric)
                    .take(len)
                    .map(char::from)
                    .collect::<String>()
                    .into(),
            )
        }
        FieldType::List(element) => {
            let len = rng.random_range(0..4);
            Value::List((0..len).map(|_| random_value(rng, element)).collect())
        }
        // Slice layouts are flat, records never reach this point.
        FieldType::Record(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use tabula_layout::{FieldType, Layout, RecordField, RecordType};

    use super::make_random_table_slices;
    use crate::encodings::{ColumnarEncoding, RowEncoding};

    fn layout() -> Layout {
        Layout::new(RecordType::new(
            "random",
            vec![
                RecordField::new("b", FieldType::Bool),
                RecordField::new("r", FieldType::Real),
                RecordField::new("s", FieldType::String),
                RecordField::new("l", FieldType::list(FieldType::Duration)),
            ],
        ))
    }

    #[test]
    fn slices_are_consecutive() {
        let slices = make_random_table_slices(3, 10, layout(), 1000, 7, &RowEncoding).unwrap();
        assert_eq!(slices.len(), 3);
        for (index, slice) in slices.iter().enumerate() {
            assert_eq!(slice.offset(), 1000 + 10 * index as u64);
            assert_eq!(slice.rows(), 10);
        }
    }

    #[test]
    fn same_seed_same_content() {
        let rows = make_random_table_slices(2, 8, layout(), 0, 42, &RowEncoding).unwrap();
        let columns = make_random_table_slices(2, 8, layout(), 0, 42, &ColumnarEncoding).unwrap();
        assert_eq!(rows, columns);
        let other = make_random_table_slices(2, 8, layout(), 0, 43, &RowEncoding).unwrap();
        assert_ne!(rows, other);
    }
}
