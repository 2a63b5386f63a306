//! Deriving new slices from existing ones by row position or by identifier membership.
//!
//! Every derived slice covers a contiguous identifier range and shares the payload of its input.

use tabula_error::tabula_panic;
use tabula_mask::AllOr;

use crate::{Ids, TableSliceRef};

/// Keep at most the first `n` rows of `slice`.
///
/// Returns `slice` itself when it has no more than `n` rows.
///
/// ## Panics
///
/// Panics if `n` is zero.
pub fn truncate(slice: TableSliceRef, n: usize) -> TableSliceRef {
    if n == 0 {
        tabula_panic!("cannot truncate a table slice to zero rows");
    }
    if slice.rows() <= n {
        return slice;
    }
    slice.slice(0, n)
}

/// Split `slice` into rows `[0, position)` and `[position, rows)`.
///
/// The right half starts at identifier `offset + position`. Splitting at either boundary is a
/// no-op and returns `(slice, None)`.
pub fn split(slice: TableSliceRef, position: usize) -> (TableSliceRef, Option<TableSliceRef>) {
    if position == 0 || position >= slice.rows() {
        return (slice, None);
    }
    let left = slice.slice(0, position);
    let right = slice.slice(position, slice.rows());
    (left, Some(right))
}

/// The rows of `slice` whose identifiers are in `ids`, as one slice per maximal run.
///
/// An empty intersection yields no slices. A selection covering the whole slice yields the
/// input handle itself.
pub fn select(slice: TableSliceRef, ids: &Ids) -> Vec<TableSliceRef> {
    let mut selected = Vec::new();
    select_into(&mut selected, slice, ids);
    selected
}

/// Like [`select`], appending the selected slices to `out`.
pub fn select_into(out: &mut Vec<TableSliceRef>, slice: TableSliceRef, ids: &Ids) {
    let range = slice.offset()..slice.end();
    let mask = ids.row_mask(&range);
    match mask.runs() {
        AllOr::All => out.push(slice),
        AllOr::None => {}
        AllOr::Some(runs) => {
            log::trace!(
                "Selecting {} runs from {} rows at offset {}",
                runs.len(),
                slice.rows(),
                slice.offset()
            );
            out.reserve(runs.len());
            for &(start, end) in runs {
                let tail = match split(slice.clone(), start) {
                    (_, Some(right)) => right,
                    (whole, None) => whole,
                };
                out.push(truncate(tail, end - start));
            }
        }
    }
}

/// Apply [`select`] to each slice and concatenate the results in input order.
///
/// Runs never span two input slices, even when their identifier ranges touch.
pub fn select_all<I>(slices: I, ids: &Ids) -> Vec<TableSliceRef>
where
    I: IntoIterator<Item = TableSliceRef>,
{
    let mut selected = Vec::new();
    for slice in slices {
        select_into(&mut selected, slice, ids);
    }
    selected
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;
    use tabula_layout::{FieldType, Layout, RecordField, RecordType, Value};

    use crate::encodings::{ColumnarEncoding, RowEncoding};
    use crate::{EncodingRef, Ids, SliceBuilder, TableSliceRef, select, split, truncate};

    fn numbered(offset: u64, rows: u64, encoding: EncodingRef) -> TableSliceRef {
        let layout = Layout::new(RecordType::new(
            "numbered",
            vec![RecordField::new("id", FieldType::Count)],
        ));
        let mut builder = SliceBuilder::new(layout, encoding);
        for id in offset..offset + rows {
            builder.push_row(vec![Value::Count(id)]).unwrap();
        }
        builder.finish(offset).unwrap()
    }

    fn ids_of(slices: &[TableSliceRef]) -> Vec<u64> {
        slices
            .iter()
            .flat_map(|slice| {
                slice
                    .column(0)
                    .iter()
                    .map(|v| match v.to_owned() {
                        Value::Count(id) => id,
                        other => panic!("unexpected {other}"),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[rstest]
    #[case(&RowEncoding)]
    #[case(&ColumnarEncoding)]
    fn select_splits_at_gaps(#[case] encoding: EncodingRef) {
        let slice = numbered(100, 5, encoding);
        let selected = select(slice, &Ids::from_iter([100, 101, 103, 104]));
        assert_eq!(selected.len(), 2);
        assert_eq!((selected[0].offset(), selected[0].rows()), (100, 2));
        assert_eq!((selected[1].offset(), selected[1].rows()), (103, 2));
        assert_eq!(ids_of(&selected), vec![100, 101, 103, 104]);
    }

    #[test]
    fn select_full_range_returns_input() {
        let slice = numbered(100, 5, &RowEncoding);
        let selected = select(slice.clone(), &Ids::from_range(0..1000));
        assert_eq!(selected.len(), 1);
        assert!(Arc::ptr_eq(&selected[0], &slice));
    }

    #[rstest]
    #[case(Ids::new())]
    #[case(Ids::from_range(0..100))]
    #[case(Ids::from_iter([105, 2000]))]
    fn select_disjoint_is_empty(#[case] ids: Ids) {
        assert!(select(numbered(100, 5, &RowEncoding), &ids).is_empty());
    }

    #[test]
    fn select_all_keeps_slices_apart() {
        let slices = vec![numbered(0, 4, &RowEncoding), numbered(4, 4, &ColumnarEncoding)];
        let selected = super::select_all(slices, &Ids::from_range(2..6));
        assert_eq!(selected.len(), 2);
        assert_eq!(ids_of(&selected), vec![2, 3, 4, 5]);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(9)]
    fn split_at_boundary_is_noop(#[case] position: usize) {
        let slice = numbered(10, 5, &RowEncoding);
        let (left, right) = split(slice.clone(), position);
        assert!(Arc::ptr_eq(&left, &slice));
        assert!(right.is_none());
    }

    #[test]
    fn split_reassembles() {
        let slice = numbered(10, 5, &ColumnarEncoding);
        let (left, right) = split(slice.clone(), 2);
        let right = right.unwrap();
        assert_eq!(right.offset(), slice.offset() + 2);
        assert_eq!(left.rows() + right.rows(), slice.rows());
        assert_eq!(ids_of(&[left, right]), ids_of(&[slice]));
    }

    #[test]
    fn truncate_is_idempotent() {
        let slice = numbered(10, 5, &RowEncoding);
        let once = truncate(slice.clone(), 3);
        let twice = truncate(once.clone(), 3);
        assert_eq!(once.as_ref(), twice.as_ref());
        assert!(Arc::ptr_eq(&once, &twice));
        assert_eq!(once.offset(), 10);
        assert!(Arc::ptr_eq(&truncate(slice.clone(), 7), &slice));
    }

    #[test]
    #[should_panic(expected = "zero rows")]
    fn truncate_to_zero_panics() {
        truncate(numbered(0, 1, &RowEncoding), 0);
    }
}
