#![allow(clippy::unwrap_used)]

use divan::Bencher;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use tabula_layout::{FieldType, Layout, RecordField, RecordType};
use tabula_slice::encodings::RowEncoding;
use tabula_slice::{Ids, TableSliceRef, make_random_table_slices, select_all};

fn main() {
    divan::main();
}

const DENSITIES: &[f64] = &[0.01, 0.5, 0.99];

#[divan::bench(args = DENSITIES)]
fn select_scattered(bencher: Bencher, density: f64) {
    let (slices, ids) = fixture(density);
    bencher
        .with_inputs(|| slices.clone())
        .bench_values(|slices| select_all(slices, &ids));
}

#[divan::bench]
fn select_everything(bencher: Bencher) {
    let (slices, _) = fixture(0.0);
    let ids = Ids::from_range(0..16 * 4096);
    bencher
        .with_inputs(|| slices.clone())
        .bench_values(|slices| select_all(slices, &ids));
}

fn fixture(density: f64) -> (Vec<TableSliceRef>, Ids) {
    let layout = Layout::new(RecordType::new(
        "bench",
        vec![
            RecordField::new("id", FieldType::Count),
            RecordField::new("name", FieldType::String),
        ],
    ));
    let slices = make_random_table_slices(16, 4096, layout, 0, 0, &RowEncoding).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let ids = (0..16 * 4096)
        .filter(|_| rng.random_bool(density))
        .collect();
    (slices, ids)
}
