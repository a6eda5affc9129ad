//! Image-space points.

use serde::{Deserialize, Serialize};

/// A 2D point in image pixel coordinates.
///
/// Integer coordinates refer to pixel centres: `(x, y)` is the centre of
/// column `x`, row `y`. Values outside the image are allowed; drawing
/// clips them to the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

// Points travel as `[x, y]` pairs in annotation files.
impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(10.0, 20.0).is_finite());
        assert!(!Point::new(f64::NAN, 20.0).is_finite());
        assert!(!Point::new(10.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_point_serde_as_pair() {
        let p: Point = serde_json::from_str("[1.5, 2]").expect("parse point");
        assert_eq!(p, Point::new(1.5, 2.0));
        assert_eq!(serde_json::to_string(&p).expect("write point"), "[1.5,2.0]");
    }
}
