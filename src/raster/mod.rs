//! Shape rasterization.
//!
//! Converts one shape into a boolean mask of the requested image size.
//! Geometry outside the image is clipped by the canvas; it never errors.
//!
//! | type        | points    | drawn as                                     |
//! |-------------|-----------|----------------------------------------------|
//! | `circle`    | 2         | disc centred on the first point through the second |
//! | `rectangle` | 2         | filled box between opposite corners          |
//! | `line`      | 2         | stroke of `line_width` pixels                |
//! | `linestrip` | any       | stroke of `line_width` pixels through all points |
//! | `point`     | 1         | disc of radius `point_size`                  |
//! | `polygon`   | more than 2 | filled polygon, even-odd rule              |

mod canvas;

use ndarray::Array2;

use crate::error::LabelmaskError;
use crate::shape::{ImageSize, Point, Shape, ShapeType};
use canvas::Canvas;

/// A row-major `(height, width)` grid; `true` marks pixels covered by a shape.
pub type Mask = Array2<bool>;

/// Stroke and marker sizes used when drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterizeOptions {
    /// Stroke width in pixels for `line` and `linestrip` shapes.
    pub line_width: u32,
    /// Radius in pixels of the disc drawn for `point` shapes.
    pub point_size: u32,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            line_width: 10,
            point_size: 5,
        }
    }
}

/// Rasterizes a shape with default options.
///
/// # Errors
/// [`LabelmaskError::InvalidShape`] if the point count does not suit the
/// shape type.
pub fn rasterize(size: ImageSize, shape: &Shape) -> Result<Mask, LabelmaskError> {
    shape_to_mask(
        size,
        &shape.points,
        shape.shape_type,
        &RasterizeOptions::default(),
    )
}

/// Rasterizes a shape with explicit options.
pub fn rasterize_with(
    size: ImageSize,
    shape: &Shape,
    opts: &RasterizeOptions,
) -> Result<Mask, LabelmaskError> {
    shape_to_mask(size, &shape.points, shape.shape_type, opts)
}

/// Draws a point sequence of the given type into a fresh mask.
///
/// # Errors
/// - [`LabelmaskError::InvalidShape`] if the point count does not suit
///   `shape_type`. Nothing is drawn in that case.
/// - [`LabelmaskError::ImageTooLarge`] if the drawing surface cannot hold
///   `size`. A size with a zero dimension yields an empty mask instead.
pub fn shape_to_mask(
    size: ImageSize,
    points: &[Point],
    shape_type: ShapeType,
    opts: &RasterizeOptions,
) -> Result<Mask, LabelmaskError> {
    let expected = shape_type.point_count();
    if !expected.accepts(points.len()) {
        return Err(LabelmaskError::InvalidShape {
            shape_type,
            expected,
            actual: points.len(),
        });
    }

    if size.height == 0 || size.width == 0 {
        return Ok(Mask::from_elem(size.dim(), false));
    }
    let mut canvas = Canvas::new(size).ok_or(LabelmaskError::ImageTooLarge {
        height: size.height,
        width: size.width,
    })?;

    match shape_type {
        ShapeType::Circle => {
            let radius = points[0].distance(&points[1]);
            canvas.disc(&points[0], radius);
        }
        ShapeType::Rectangle => canvas.rect(&points[0], &points[1]),
        ShapeType::Line | ShapeType::Linestrip => canvas.polyline(points, opts.line_width),
        ShapeType::Point => canvas.disc(&points[0], f64::from(opts.point_size)),
        ShapeType::Polygon => canvas.polygon(points),
    }

    log::trace!(
        "rasterized {} with {} point(s) into {}x{}",
        shape_type,
        points.len(),
        size.height,
        size.width
    );
    Ok(canvas.into_mask())
}

/// Number of covered pixels.
pub fn mask_area(mask: &Mask) -> usize {
    mask.iter().filter(|&&v| v).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(h: usize, w: usize) -> ImageSize {
        ImageSize::new(h, w)
    }

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_wrong_point_counts_fail() {
        let opts = RasterizeOptions::default();
        let cases = [
            (ShapeType::Circle, pts(&[(1.0, 1.0)])),
            (ShapeType::Circle, pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])),
            (ShapeType::Rectangle, pts(&[(1.0, 1.0)])),
            (ShapeType::Line, pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)])),
            (ShapeType::Point, pts(&[])),
            (ShapeType::Point, pts(&[(1.0, 1.0), (2.0, 2.0)])),
            (ShapeType::Polygon, pts(&[(1.0, 1.0), (2.0, 2.0)])),
        ];
        for (shape_type, points) in cases {
            let res = shape_to_mask(size(10, 10), &points, shape_type, &opts);
            assert!(
                matches!(res, Err(LabelmaskError::InvalidShape { .. })),
                "{} with {} points should fail",
                shape_type,
                points.len()
            );
        }
    }

    #[test]
    fn test_rectangle_is_inclusive_and_order_independent() {
        let shape = Shape::rectangle("r", (3.0, 4.0), (1.0, 2.0));
        let mask = rasterize(size(8, 8), &shape).unwrap();
        for row in 0..8 {
            for col in 0..8 {
                let inside = (2..=4).contains(&row) && (1..=3).contains(&col);
                assert_eq!(mask[[row, col]], inside, "pixel ({}, {})", row, col);
            }
        }
        assert_eq!(mask_area(&mask), 9);
    }

    #[test]
    fn test_triangle_has_pixels() {
        let shape = Shape::polygon("t", [(2.0, 2.0), (17.0, 2.0), (2.0, 17.0)]);
        let mask = rasterize(size(20, 20), &shape).unwrap();
        assert!(mask_area(&mask) > 0);
        assert!(mask[[5, 5]]);
        assert!(!mask[[16, 16]]);
        // vertices are part of the boundary
        assert!(mask[[2, 2]]);
    }

    #[test]
    fn test_circle_radius_from_second_point() {
        let shape = Shape::circle("c", (10.0, 10.0), (10.0, 14.0));
        let mask = rasterize(size(21, 21), &shape).unwrap();
        assert!(mask[[10, 10]]);
        assert!(mask[[10, 13]]);
        assert!(mask[[6, 10]]);
        assert!(!mask[[10, 16]]);
        assert!(!mask[[4, 4]]);
    }

    #[test]
    fn test_point_uses_point_size() {
        let shape = Shape::point("p", (10.0, 10.0));
        let opts = RasterizeOptions {
            point_size: 2,
            ..Default::default()
        };
        let mask = rasterize_with(size(21, 21), &shape, &opts).unwrap();
        assert!(mask[[10, 10]]);
        assert!(mask[[10, 11]]);
        assert!(!mask[[10, 14]]);
    }

    #[test]
    fn test_zero_point_size_marks_single_pixel() {
        let shape = Shape::point("p", (3.0, 4.0));
        let opts = RasterizeOptions {
            point_size: 0,
            ..Default::default()
        };
        let mask = rasterize_with(size(8, 8), &shape, &opts).unwrap();
        assert_eq!(mask_area(&mask), 1);
        assert!(mask[[4, 3]]);
    }

    #[test]
    fn test_horizontal_line_has_stroke_width() {
        let shape = Shape::line("l", (5.0, 10.0), (25.0, 10.0));
        let mask = rasterize(size(21, 31), &shape).unwrap();
        let column: Vec<bool> = (0..21).map(|row| mask[[row, 15]]).collect();
        let covered = column.iter().filter(|&&v| v).count();
        assert!((9..=11).contains(&covered), "stroke covered {} rows", covered);
        assert!(mask[[10, 15]]);
        assert!(!mask[[10, 28]]);
    }

    #[test]
    fn test_linestrip_follows_all_segments() {
        let shape = Shape::linestrip("s", [(2.0, 2.0), (20.0, 2.0), (20.0, 20.0)]);
        let opts = RasterizeOptions {
            line_width: 2,
            ..Default::default()
        };
        let mask = rasterize_with(size(24, 24), &shape, &opts).unwrap();
        assert!(mask[[2, 10]]);
        assert!(mask[[12, 20]]);
        assert!(!mask[[12, 10]]);
    }

    #[test]
    fn test_linestrip_without_points_is_empty() {
        let shape = Shape::linestrip("s", Vec::<Point>::new());
        let mask = rasterize(size(4, 4), &shape).unwrap();
        assert_eq!(mask_area(&mask), 0);
    }

    #[test]
    fn test_output_size_is_fixed_when_shape_exceeds_image() {
        let shape = Shape::rectangle("r", (-50.0, -50.0), (500.0, 500.0));
        let mask = rasterize(size(6, 9), &shape).unwrap();
        assert_eq!(mask.dim(), (6, 9));
        assert_eq!(mask_area(&mask), 54);
    }

    #[test]
    fn test_rectangle_with_huge_corners_fills_image() {
        let shape = Shape::rectangle("r", (-1e300, -1e300), (1e300, 1e300));
        let mask = rasterize(size(6, 9), &shape).unwrap();
        assert_eq!(mask_area(&mask), 54);

        let beyond = Shape::rectangle("r", (1e300, 0.0), (f64::MAX, 3.0));
        let mask = rasterize(size(6, 9), &beyond).unwrap();
        assert_eq!(mask_area(&mask), 0);
    }

    #[test]
    fn test_shape_entirely_outside_is_empty() {
        let shape = Shape::polygon("t", [(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)]);
        let mask = rasterize(size(10, 10), &shape).unwrap();
        assert_eq!(mask.dim(), (10, 10));
        assert_eq!(mask_area(&mask), 0);
    }

    #[test]
    fn test_zero_sized_image() {
        let shape = Shape::rectangle("r", (0.0, 0.0), (3.0, 3.0));
        let mask = rasterize(size(0, 5), &shape).unwrap();
        assert_eq!(mask.dim(), (0, 5));
    }

    #[test]
    fn test_oversized_image_is_an_error() {
        let shape = Shape::rectangle("r", (0.0, 0.0), (10.0, 0.0));
        let err = rasterize(size(1, 536_870_912), &shape).unwrap_err();
        assert!(matches!(
            err,
            LabelmaskError::ImageTooLarge {
                height: 1,
                width: 536_870_912
            }
        ));
    }
}
