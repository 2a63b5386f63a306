#![cfg(test)]

use std::sync::Arc;
use std::thread;

use tabula_layout::{FieldType, Layout, LayoutCache, RecordField, RecordType, Value};
use tabula_slice::encodings::{ColumnarEncoding, RowEncoding};
use tabula_slice::serde::{UnpackOptions, deserialize, serialize};
use tabula_slice::{InstanceCounter, Registry, SliceBuilder, make_mut, select, set_offset, split};

fn record() -> RecordType {
    RecordType::new(
        "dns",
        vec![
            RecordField::new("query", FieldType::String),
            RecordField::new("ttl", FieldType::Duration),
        ],
    )
}

fn builder(counter: &InstanceCounter) -> SliceBuilder {
    let mut builder =
        SliceBuilder::new(Layout::new(record()), &RowEncoding).with_counter(counter.clone());
    for (query, ttl) in [("a.example", 60), ("b.example", 300), ("c.example", 30)] {
        builder
            .push_row(vec![query.into(), Value::Duration(ttl)])
            .unwrap();
    }
    builder
}

#[test]
fn clones_share_and_copies_count() {
    let counter = InstanceCounter::new();
    let slice = builder(&counter).finish(10).unwrap();
    assert_eq!(counter.live(), 1);

    let shared = slice.clone();
    assert_eq!(counter.live(), 1);
    assert!(Arc::ptr_eq(&shared, &slice));

    let copy = slice.copy();
    assert_eq!(counter.live(), 2);
    assert!(!Arc::ptr_eq(&copy, &slice));
    assert_eq!(copy.as_ref(), slice.as_ref());

    let (left, right) = split(slice.clone(), 1);
    assert_eq!(counter.live(), 4);
    drop((left, right, copy, shared, slice));
    assert_eq!(counter.live(), 0);
}

#[test]
fn make_mut_unshares_before_writing() {
    let counter = InstanceCounter::new();
    let original = builder(&counter).finish(10).unwrap();
    let mut handle = original.clone();

    make_mut(&mut handle).header_mut().set_offset(500);
    assert!(!Arc::ptr_eq(&handle, &original));
    assert_eq!(original.offset(), 10);
    assert_eq!(handle.offset(), 500);
    assert_eq!(handle.row(2).to_values(), original.row(2).to_values());
    assert_eq!(counter.live(), 2);

    // A unique handle is reused in place.
    let before = Arc::as_ptr(&handle).cast::<()>();
    make_mut(&mut handle).header_mut().set_offset(600);
    assert_eq!(Arc::as_ptr(&handle).cast::<()>(), before);
    assert_eq!(counter.live(), 2);
}

#[test]
fn set_offset_on_unique_handle() {
    let counter = InstanceCounter::new();
    let mut slice = builder(&counter).finish(0).unwrap();
    set_offset(&mut slice, 1_000);
    assert_eq!(slice.offset(), 1_000);
    assert_eq!(slice.end(), 1_003);
    assert_eq!(slice.row(0).id(), 1_000);
}

#[test]
#[should_panic(expected = "shared")]
fn set_offset_on_shared_handle_panics() {
    let counter = InstanceCounter::new();
    let mut slice = builder(&counter).finish(0).unwrap();
    let _other = slice.clone();
    set_offset(&mut slice, 1);
}

#[test]
fn selections_survive_their_source() {
    let counter = InstanceCounter::new();
    let slice = builder(&counter).finish(100).unwrap();
    let ids = [100, 102].into_iter().collect();
    let selected = select(slice, &ids);
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[1].at(0, 0), Value::from("c.example").as_view());
    assert_eq!(counter.live(), 2);
}

#[test]
fn decoded_slices_share_cached_layouts() {
    let cache = LayoutCache::new();
    let layout = cache.intern(record());
    assert!(cache.intern(record()).ptr_eq(&layout));

    let counter = InstanceCounter::new();
    let registry = Registry::default().with_counter(counter.clone());
    let original = builder(&InstanceCounter::new()).finish(0).unwrap();
    let bytes = serialize(original.as_ref()).unwrap();

    let decoded = thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    deserialize(&bytes, layout.clone(), &registry, &UnpackOptions::default())
                        .unwrap()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(counter.live(), 4);
    for slice in &decoded {
        assert!(slice.layout().ptr_eq(&layout));
        assert_eq!(slice.as_ref(), original.as_ref());
    }
    drop(decoded);
    assert_eq!(counter.live(), 0);
}

#[test]
fn nested_layouts_share_their_flat_form() {
    let endpoint = RecordType::new("", vec![RecordField::new("port", FieldType::Count)]);
    let nested = RecordType::new(
        "flow",
        vec![RecordField::new("dst", FieldType::Record(endpoint))],
    );
    let cache = LayoutCache::new();
    let layout = cache.intern(nested.clone());
    let flat = cache.intern(nested.flatten());

    let build = |port| {
        let mut builder = SliceBuilder::new(layout.clone(), &RowEncoding);
        builder.push_row(vec![Value::Count(port)]).unwrap();
        builder.finish(0).unwrap()
    };
    let built = [build(53), build(443)];
    let decoded = built
        .iter()
        .map(|slice| {
            let bytes = serialize(slice.as_ref()).unwrap();
            deserialize(&bytes, layout.clone(), &Registry::default(), &UnpackOptions::default())
                .unwrap()
        })
        .collect::<Vec<_>>();

    for slice in built.iter().chain(&decoded) {
        assert!(slice.layout().ptr_eq(&flat));
        assert_eq!(slice.column_name(0), "dst.port");
    }
}

#[test]
fn columnar_copy_preserves_content() {
    let counter = InstanceCounter::new();
    let mut builder = SliceBuilder::new(Layout::new(record()), &ColumnarEncoding)
        .with_counter(counter.clone());
    builder
        .push_row(vec![Value::Null, Value::Duration(1)])
        .unwrap();
    let slice = builder.finish(5).unwrap();
    let copy = slice.copy();
    assert_eq!(copy.layout(), slice.layout());
    assert_eq!(copy.offset(), 5);
    assert_eq!(copy.as_ref(), slice.as_ref());
    assert!(copy.at(0, 0).is_null());
}
