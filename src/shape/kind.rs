//! Shape type discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PointCount;

/// Selects the rasterization rule for a shape.
///
/// Any type name not listed here is treated as a polygon, which is also
/// the default when the type is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Circle,
    Rectangle,
    Line,
    Linestrip,
    Point,
    #[default]
    Polygon,
}

impl ShapeType {
    /// Parses a type name; unknown names fall back to [`ShapeType::Polygon`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" => ShapeType::Circle,
            "rectangle" => ShapeType::Rectangle,
            "line" => ShapeType::Line,
            "linestrip" => ShapeType::Linestrip,
            "point" => ShapeType::Point,
            _ => ShapeType::Polygon,
        }
    }

    /// The lowercase name used in annotation files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Rectangle => "rectangle",
            ShapeType::Line => "line",
            ShapeType::Linestrip => "linestrip",
            ShapeType::Point => "point",
            ShapeType::Polygon => "polygon",
        }
    }

    /// How many points a shape of this type must carry.
    pub fn point_count(&self) -> PointCount {
        match self {
            ShapeType::Circle | ShapeType::Rectangle | ShapeType::Line => PointCount::Exactly(2),
            ShapeType::Point => PointCount::Exactly(1),
            ShapeType::Polygon => PointCount::MoreThan(2),
            ShapeType::Linestrip => PointCount::Any,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ShapeType {
    fn from(name: &str) -> Self {
        ShapeType::from_name(name)
    }
}

impl Serialize for ShapeType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShapeType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(ShapeType::from_name).unwrap_or_default())
    }
}
