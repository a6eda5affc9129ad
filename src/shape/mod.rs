//! Shape data model.
//!
//! Shapes are plain labelled point sequences plus a type discriminator.
//! They carry no raster state; see [`crate::raster`] for drawing.
//!
//! # Example
//!
//! ```
//! use labelmask::shape::{Shape, ShapeType};
//!
//! let tri = Shape::polygon("cat", [(10.0, 10.0), (30.0, 10.0), (20.0, 25.0)]).with_group_id(1);
//! assert_eq!(tri.shape_type, ShapeType::Polygon);
//! assert!(tri.check_point_count().is_ok());
//! ```

mod coord;
mod ids;
pub mod io_json;
mod kind;
mod model;

pub use coord::Point;
pub use ids::{GroupIdSource, GroupKey, InstanceKey, RandomGroupIds, SequentialGroupIds};
pub use kind::ShapeType;
pub use model::{ImageSize, Shape};
