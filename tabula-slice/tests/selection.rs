#![cfg(test)]

use std::sync::Arc;

use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;
use tabula_layout::{FieldType, Layout, RecordField, RecordType};
use tabula_slice::encodings::{ColumnarEncoding, RowEncoding};
use tabula_slice::{
    EncodingRef, Ids, TableSliceRef, make_random_table_slices, select, select_all, split,
    truncate,
};

fn layout() -> Layout {
    Layout::new(RecordType::new(
        "conn",
        vec![
            RecordField::new("uid", FieldType::String),
            RecordField::new("bytes", FieldType::Count),
            RecordField::new("hops", FieldType::list(FieldType::Integer)),
        ],
    ))
}

fn random_ids(rng: &mut StdRng, range: std::ops::Range<u64>, density: f64) -> Ids {
    range.filter(|_| rng.random_bool(density)).collect()
}

fn assert_same_rows(selected: &TableSliceRef, source: &TableSliceRef) {
    let shift = usize::try_from(selected.offset() - source.offset()).unwrap();
    for row in 0..selected.rows() {
        assert_eq!(
            selected.row(row).to_values(),
            source.row(row + shift).to_values()
        );
    }
}

#[rstest]
#[case::row(&RowEncoding)]
#[case::columnar(&ColumnarEncoding)]
fn select_yields_maximal_runs(#[case] encoding: EncodingRef) {
    let slice = make_random_table_slices(1, 200, layout(), 10_000, 3, encoding)
        .unwrap()
        .remove(0);
    let mut rng = StdRng::seed_from_u64(11);

    for density in [0.1, 0.5, 0.9] {
        // Ids outside the slice must be ignored.
        let ids = random_ids(&mut rng, 9_900..10_300, density);
        let selected = select(slice.clone(), &ids);

        let expected = (slice.offset()..slice.end())
            .filter(|id| ids.contains(*id))
            .count();
        assert_eq!(selected.iter().map(|s| s.rows()).sum::<usize>(), expected);

        for part in &selected {
            assert!(part.rows() > 0);
            assert!((part.offset()..part.end()).all(|id| ids.contains(id)));
            assert_same_rows(part, &slice);
        }
        for pair in selected.windows(2) {
            assert!(pair[0].end() < pair[1].offset());
        }
        if let (Some(first), Some(last)) = (selected.first(), selected.last()) {
            assert!(first.offset() == slice.offset() || !ids.contains(first.offset() - 1));
            assert!(last.end() == slice.end() || !ids.contains(last.end()));
        }
    }
}

#[test]
fn select_full_coverage_returns_input_handle() {
    let slice = make_random_table_slices(1, 64, layout(), 0, 1, &RowEncoding)
        .unwrap()
        .remove(0);
    let selected = select(slice.clone(), &Ids::from_range(0..1_000));
    assert_eq!(selected.len(), 1);
    assert!(Arc::ptr_eq(&selected[0], &slice));
}

#[test]
fn select_all_never_bridges_slices() {
    let slices = make_random_table_slices(4, 25, layout(), 500, 9, &ColumnarEncoding).unwrap();
    let selected = select_all(slices.iter().cloned(), &Ids::from_range(510..580));
    assert_eq!(
        selected
            .iter()
            .map(|s| (s.offset(), s.rows()))
            .collect::<Vec<_>>(),
        vec![(510, 15), (525, 25), (550, 25), (575, 5)]
    );
    for part in &selected {
        let source = slices
            .iter()
            .find(|s| s.offset() <= part.offset() && part.end() <= s.end())
            .unwrap();
        assert_same_rows(part, source);
    }
}

#[rstest]
#[case(1)]
#[case(17)]
#[case(63)]
fn split_then_truncate_reassembles(#[case] position: usize) {
    let slice = make_random_table_slices(1, 64, layout(), 7, 5, &RowEncoding)
        .unwrap()
        .remove(0);
    let (left, right) = split(slice.clone(), position);
    let right = right.unwrap();
    assert_eq!(left.rows() + right.rows(), slice.rows());
    assert_eq!(right.offset(), slice.offset() + position as u64);
    assert_same_rows(&left, &slice);
    assert_same_rows(&right, &slice);

    let head = truncate(slice.clone(), position);
    assert_eq!(head.as_ref(), left.as_ref());
    assert_eq!(truncate(head.clone(), position).as_ref(), head.as_ref());
}
