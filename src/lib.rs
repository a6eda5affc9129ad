//! Labelmask: vector annotation shapes to raster labels.
//!
//! Labelmask turns labelled shapes (polygons, rectangles, circles, lines,
//! line strips and points) into the raster forms segmentation training
//! needs: per-shape boolean masks, one-hot class segmentation maps, paired
//! class/instance label maps, and tight bounding boxes of masks.
//!
//! Every call is a pure function of its inputs. Nothing is cached or
//! shared between calls, so independent images can be processed in
//! parallel (see [`batch`]).
//!
//! # Modules
//!
//! - [`shape`]: Shape records, image sizes and group ids
//! - [`label_table`]: Label name to class id tables
//! - [`raster`]: Drawing one shape into a mask
//! - [`segmap`]: Multi-channel class segmentation maps
//! - [`label_map`]: Class and instance label maps
//! - [`bbox`]: Bounding boxes of mask stacks
//! - [`validation`]: Issue reports for shape sets
//! - [`compat`]: Deprecated entry points
//! - [`error`]: Error types for labelmask operations
//!
//! # Example
//!
//! ```
//! use labelmask::label_map::build_label_maps;
//! use labelmask::label_table::LabelTable;
//! use labelmask::shape::{ImageSize, Shape};
//!
//! let table = LabelTable::from([("__ignore__", 0), ("cat", 1), ("dog", 2)]);
//! let shapes = vec![
//!     Shape::rectangle("cat", (2.0, 2.0), (10.0, 8.0)).with_group_id(1),
//!     Shape::circle("dog", (20.0, 12.0), (24.0, 12.0)),
//! ];
//!
//! let maps = build_label_maps(ImageSize::new(32, 32), &shapes, &table)?;
//! assert_eq!(maps.class_map[[5, 5]], 1);
//! assert_eq!(maps.instance_map[[12, 20]], 2);
//! # Ok::<(), labelmask::LabelmaskError>(())
//! ```

#[cfg(feature = "parallel")]
pub mod batch;
pub mod bbox;
pub mod compat;
pub mod error;
pub mod label_map;
pub mod label_table;
pub mod raster;
pub mod segmap;
pub mod shape;
pub mod validation;

pub use bbox::{bboxes_from_masks, masks_to_bboxes, MaskBBox, MaskStack};
pub use error::LabelmaskError;
pub use label_map::{build_label_maps, LabelMaps};
pub use label_table::LabelTable;
pub use raster::{rasterize, shape_to_mask, Mask, RasterizeOptions};
pub use segmap::{build_segmap, SegMap};
pub use shape::{ImageSize, Point, Shape, ShapeType};
