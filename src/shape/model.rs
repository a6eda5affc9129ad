//! Shape records and image dimensions.
//!
//! A [`Shape`] mirrors one entry of an annotation file's `shapes` list:
//! a label, a type, an ordered point sequence and an optional group id.

use serde::{Deserialize, Serialize};

use super::coord::Point;
use super::ids::{GroupIdSource, GroupKey, InstanceKey};
use super::kind::ShapeType;
use crate::error::LabelmaskError;

/// A labelled vector annotation.
///
/// Construction with [`Shape::new`] is permissive so that shapes read from
/// files can be represented and reported on; [`Shape::try_new`] checks the
/// point count up front. Rasterization checks it again either way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Class name of the shape.
    pub label: String,

    /// Ordered vertices, `[x, y]` in pixel coordinates.
    pub points: Vec<Point>,

    /// Optional instance grouping id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,

    /// Rasterization rule; absent or unknown means polygon.
    #[serde(default)]
    pub shape_type: ShapeType,
}

impl Shape {
    /// Creates a shape without checking its point count.
    pub fn new<P: Into<Point>>(
        label: impl Into<String>,
        shape_type: ShapeType,
        points: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            label: label.into(),
            points: points.into_iter().map(Into::into).collect(),
            group_id: None,
            shape_type,
        }
    }

    /// Creates a shape, failing if the point count does not suit its type.
    pub fn try_new<P: Into<Point>>(
        label: impl Into<String>,
        shape_type: ShapeType,
        points: impl IntoIterator<Item = P>,
    ) -> Result<Self, LabelmaskError> {
        let shape = Self::new(label, shape_type, points);
        shape.check_point_count()?;
        Ok(shape)
    }

    /// Creates a polygon from its vertices.
    pub fn polygon<P: Into<Point>>(
        label: impl Into<String>,
        points: impl IntoIterator<Item = P>,
    ) -> Self {
        Self::new(label, ShapeType::Polygon, points)
    }

    /// Creates a rectangle from two opposite corners.
    pub fn rectangle(label: impl Into<String>, a: impl Into<Point>, b: impl Into<Point>) -> Self {
        Self::new(label, ShapeType::Rectangle, [a.into(), b.into()])
    }

    /// Creates a circle from its centre and a point on the circumference.
    pub fn circle(
        label: impl Into<String>,
        center: impl Into<Point>,
        on_circle: impl Into<Point>,
    ) -> Self {
        Self::new(label, ShapeType::Circle, [center.into(), on_circle.into()])
    }

    /// Creates a single-segment line.
    pub fn line(label: impl Into<String>, a: impl Into<Point>, b: impl Into<Point>) -> Self {
        Self::new(label, ShapeType::Line, [a.into(), b.into()])
    }

    /// Creates an open polyline.
    pub fn linestrip<P: Into<Point>>(
        label: impl Into<String>,
        points: impl IntoIterator<Item = P>,
    ) -> Self {
        Self::new(label, ShapeType::Linestrip, points)
    }

    /// Creates a point marker.
    pub fn point(label: impl Into<String>, at: impl Into<Point>) -> Self {
        Self::new(label, ShapeType::Point, [at.into()])
    }

    /// Sets the group id.
    pub fn with_group_id(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Checks that the number of points matches the shape type.
    pub fn check_point_count(&self) -> Result<(), LabelmaskError> {
        let expected = self.shape_type.point_count();
        if expected.accepts(self.points.len()) {
            Ok(())
        } else {
            Err(LabelmaskError::InvalidShape {
                shape_type: self.shape_type,
                expected,
                actual: self.points.len(),
            })
        }
    }

    /// Returns true if every point has finite coordinates.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point::is_finite)
    }

    /// Resolves the group of this shape, drawing a fresh id when none is set.
    pub fn group_key<G: GroupIdSource + ?Sized>(&self, ids: &mut G) -> GroupKey {
        match self.group_id {
            Some(id) => GroupKey::Given(id),
            None => GroupKey::Generated(ids.next_id()),
        }
    }

    /// The (label, group) identity of this shape.
    pub fn instance_key<G: GroupIdSource + ?Sized>(&self, ids: &mut G) -> InstanceKey {
        InstanceKey::new(self.label.clone(), self.group_key(ids))
    }

    /// Axis-aligned extent of the points as `(xmin, ymin, xmax, ymax)`.
    ///
    /// Returns `None` for a shape without points.
    pub fn extent(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        ))
    }
}

/// Height and width of the target raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub height: usize,
    pub width: usize,
}

impl ImageSize {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Takes the first two entries of an array shape as (height, width).
    ///
    /// Channel or depth dimensions after the first two are ignored.
    pub fn from_shape(shape: &[usize]) -> Option<Self> {
        match shape {
            [height, width, ..] => Some(Self::new(*height, *width)),
            _ => None,
        }
    }

    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// The `(rows, cols)` pair used for array allocation.
    pub fn dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from((height, width): (usize, usize)) -> Self {
        Self::new(height, width)
    }
}
