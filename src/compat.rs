//! Deprecated entry points kept for callers of the older API.
//!
//! Both forward to the current builders and log a deprecation warning on
//! every call.

use ndarray::Array2;

use crate::error::LabelmaskError;
use crate::label_map::build_label_maps;
use crate::label_table::{LabelTable, BACKGROUND_LABEL, IGNORE_LABEL};
use crate::raster::{self, Mask, RasterizeOptions};
use crate::shape::{ImageSize, Point, Shape, ShapeType};

/// Rasterizes a point sequence with default options.
#[deprecated(note = "use `raster::shape_to_mask` instead")]
pub fn polygons_to_mask(
    size: ImageSize,
    polygons: &[Point],
    shape_type: Option<ShapeType>,
) -> Result<Mask, LabelmaskError> {
    log::warn!("The 'polygons_to_mask' function is deprecated, use 'shape_to_mask' instead.");
    raster::shape_to_mask(
        size,
        polygons,
        shape_type.unwrap_or_default(),
        &RasterizeOptions::default(),
    )
}

/// Builds a class map with a label table generated from the shapes.
///
/// The table maps `_background_` to 0 and every other label to the next
/// id in first-seen order. `_background_` also serves as the ignore class.
/// Returns the class map and the generated table.
#[deprecated(note = "use `label_map::build_label_maps` instead")]
pub fn labelme_shapes_to_label(
    size: ImageSize,
    shapes: &[Shape],
) -> Result<(Array2<i32>, LabelTable), LabelmaskError> {
    log::warn!("labelme_shapes_to_label is deprecated, so please use build_label_maps.");

    let table = LabelTable::from_labels(shapes.iter().map(|s| s.label.as_str()));
    let background = table.get(BACKGROUND_LABEL).unwrap_or(0);
    let routing = table.clone().with(IGNORE_LABEL, background);

    let maps = build_label_maps(size, shapes, &routing)?;
    Ok((maps.class_map, table))
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    #[test]
    fn test_polygons_to_mask_defaults_to_polygon() {
        let points: Vec<Point> = vec![
            (1.0, 1.0).into(),
            (8.0, 1.0).into(),
            (8.0, 8.0).into(),
            (1.0, 8.0).into(),
        ];
        let mask = polygons_to_mask(ImageSize::new(10, 10), &points, None).unwrap();
        assert!(mask[[4, 4]]);
        assert!(!mask[[9, 9]]);

        let err = polygons_to_mask(ImageSize::new(10, 10), &points[..2], None).unwrap_err();
        assert!(matches!(err, LabelmaskError::InvalidShape { .. }));
    }

    #[test]
    fn test_labelme_shapes_to_label_generates_table() {
        let shapes = [
            Shape::rectangle("dog", (0.0, 0.0), (1.0, 1.0)),
            Shape::rectangle("cat", (3.0, 3.0), (4.0, 4.0)),
            Shape::rectangle("dog", (6.0, 6.0), (7.0, 7.0)),
        ];
        let (class_map, table) = labelme_shapes_to_label(ImageSize::new(8, 8), &shapes).unwrap();
        assert_eq!(table.get(BACKGROUND_LABEL), Some(0));
        assert_eq!(table.get("dog"), Some(1));
        assert_eq!(table.get("cat"), Some(2));
        assert!(!table.contains(IGNORE_LABEL));

        assert_eq!(class_map[[0, 0]], 1);
        assert_eq!(class_map[[3, 3]], 2);
        assert_eq!(class_map[[7, 7]], 1);
        assert_eq!(class_map[[5, 0]], 0);
    }
}
