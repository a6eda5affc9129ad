#![allow(dead_code)]

use labelmask::label_table::IGNORE_LABEL;
use labelmask::{ImageSize, LabelTable, Point, Shape, ShapeType};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const LABELS: &[&str] = &["cat", "dog", "bird", "unlisted"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Table with `__ignore__` at 0 and every label but "unlisted".
pub fn standard_table() -> LabelTable {
    LabelTable::from([(IGNORE_LABEL, 0), ("cat", 1), ("dog", 2), ("bird", 3)])
}

pub fn arb_size() -> BoxedStrategy<ImageSize> {
    (1usize..=40, 1usize..=40)
        .prop_map(|(h, w)| ImageSize::new(h, w))
        .boxed()
}

/// Integer-valued points that may fall a little outside the image.
pub fn arb_point(size: ImageSize) -> BoxedStrategy<Point> {
    let (w, h) = (size.width as i32, size.height as i32);
    (-5i32..w + 5, -5i32..h + 5)
        .prop_map(|(x, y)| Point::new(x as f64, y as f64))
        .boxed()
}

/// Points strictly inside the image.
pub fn arb_inner_point(size: ImageSize) -> BoxedStrategy<Point> {
    (0..size.width, 0..size.height)
        .prop_map(|(x, y)| Point::new(x as f64, y as f64))
        .boxed()
}

pub fn arb_label() -> BoxedStrategy<String> {
    prop::sample::select(LABELS).prop_map(str::to_string).boxed()
}

/// A shape with a point count valid for its type.
pub fn arb_shape(size: ImageSize) -> BoxedStrategy<Shape> {
    let point = arb_point(size);
    let label = arb_label();
    let group = prop::option::of(0i64..4);

    let geometry = prop_oneof![
        prop::collection::vec(point.clone(), 2).prop_map(|p| (ShapeType::Circle, p)),
        prop::collection::vec(point.clone(), 2).prop_map(|p| (ShapeType::Rectangle, p)),
        prop::collection::vec(point.clone(), 2).prop_map(|p| (ShapeType::Line, p)),
        prop::collection::vec(point.clone(), 0..6).prop_map(|p| (ShapeType::Linestrip, p)),
        prop::collection::vec(point.clone(), 1).prop_map(|p| (ShapeType::Point, p)),
        prop::collection::vec(point, 3..8).prop_map(|p| (ShapeType::Polygon, p)),
    ];

    (label, geometry, group)
        .prop_map(|(label, (shape_type, points), group_id)| {
            let mut shape = Shape::new(label, shape_type, points);
            shape.group_id = group_id;
            shape
        })
        .boxed()
}

/// An image size together with shapes drawn on it.
pub fn arb_scene(max_shapes: usize) -> BoxedStrategy<(ImageSize, Vec<Shape>)> {
    arb_size()
        .prop_flat_map(move |size| {
            (
                Just(size),
                prop::collection::vec(arb_shape(size), 0..=max_shapes),
            )
        })
        .boxed()
}
