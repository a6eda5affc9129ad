//! Multi-channel class segmentation maps.
//!
//! Each shape sets its class channel to 1 wherever it covers a pixel.
//! Channels accumulate independently, so overlapping shapes of different
//! classes leave several channels set on the same pixel. Pixels no shape
//! touched get the ignore channel set afterwards.

use ndarray::{Array2, Array3, ArrayView3, Axis};

use crate::bbox::DType;
use crate::error::LabelmaskError;
use crate::label_table::LabelTable;
use crate::raster::{self, Mask, RasterizeOptions};
use crate::shape::{GroupIdSource, ImageSize, SequentialGroupIds, Shape};

/// A `(height, width, classes)` indicator array.
///
/// Stored as `i8` when the largest class id is below 255 and as `i32`
/// otherwise. Values are always 0 or 1.
#[derive(Clone, Debug, PartialEq)]
pub enum SegMap {
    I8(Array3<i8>),
    I32(Array3<i32>),
}

impl SegMap {
    fn zeros(size: ImageSize, max_class: u32) -> Self {
        let dim = (size.height, size.width, max_class as usize + 1);
        if max_class < 255 {
            SegMap::I8(Array3::zeros(dim))
        } else {
            SegMap::I32(Array3::zeros(dim))
        }
    }

    /// Element type of the backing array.
    pub fn dtype(&self) -> DType {
        match self {
            SegMap::I8(_) => DType::I8,
            SegMap::I32(_) => DType::I32,
        }
    }

    /// `(height, width, classes)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        match self {
            SegMap::I8(a) => a.dim(),
            SegMap::I32(a) => a.dim(),
        }
    }

    /// Number of class channels (largest class id + 1).
    pub fn num_classes(&self) -> usize {
        self.dim().2
    }

    /// Returns true if channel `class` is set at `(row, col)`.
    ///
    /// # Panics
    /// If the index is out of bounds.
    pub fn is_set(&self, row: usize, col: usize, class: usize) -> bool {
        match self {
            SegMap::I8(a) => a[[row, col, class]] != 0,
            SegMap::I32(a) => a[[row, col, class]] != 0,
        }
    }

    /// The indicator grid of one class channel.
    ///
    /// # Panics
    /// If `class` is not below [`SegMap::num_classes`].
    pub fn channel(&self, class: usize) -> Array2<bool> {
        match self {
            SegMap::I8(a) => a.index_axis(Axis(2), class).mapv(|v| v != 0),
            SegMap::I32(a) => a.index_axis(Axis(2), class).mapv(|v| v != 0),
        }
    }

    /// Widens to `i32` regardless of storage type.
    pub fn to_i32(&self) -> Array3<i32> {
        match self {
            SegMap::I8(a) => a.mapv(i32::from),
            SegMap::I32(a) => a.clone(),
        }
    }

    fn mark(&mut self, mask: &Mask, class: u32) {
        match self {
            SegMap::I8(a) => mark_channel(a, mask, class as usize),
            SegMap::I32(a) => mark_channel(a, mask, class as usize),
        }
    }

    fn fill_untouched(&mut self, ignore: u32) {
        match self {
            SegMap::I8(a) => fill_untouched(a, ignore as usize),
            SegMap::I32(a) => fill_untouched(a, ignore as usize),
        }
    }

    /// Number of pixels with no channel set.
    pub fn count_unset(&self) -> usize {
        fn count<T: Copy + PartialEq + From<i8>>(a: ArrayView3<'_, T>) -> usize {
            a.lanes(Axis(2))
                .into_iter()
                .filter(|lane| lane.iter().all(|&v| v == T::from(0)))
                .count()
        }
        match self {
            SegMap::I8(a) => count(a.view()),
            SegMap::I32(a) => count(a.view()),
        }
    }
}

fn mark_channel<T: Copy + From<i8>>(segmap: &mut Array3<T>, mask: &Mask, class: usize) {
    let mut channel = segmap.index_axis_mut(Axis(2), class);
    ndarray::Zip::from(&mut channel)
        .and(mask)
        .for_each(|v, &covered| {
            if covered {
                *v = T::from(1);
            }
        });
}

fn fill_untouched<T: Copy + PartialEq + From<i8>>(segmap: &mut Array3<T>, ignore: usize) {
    for mut lane in segmap.lanes_mut(Axis(2)) {
        if lane.iter().all(|&v| v == T::from(0)) {
            lane[ignore] = T::from(1);
        }
    }
}

/// Builds a segmentation map with default options and group ids.
///
/// # Errors
/// - [`LabelmaskError::MissingIgnoreLabel`] if the table lacks `__ignore__`.
/// - [`LabelmaskError::MinValueNotZero`] if the smallest class id is not 0.
/// - [`LabelmaskError::InvalidShape`] if any shape has a bad point count.
pub fn build_segmap(
    size: ImageSize,
    shapes: &[Shape],
    table: &LabelTable,
) -> Result<SegMap, LabelmaskError> {
    build_segmap_with(
        size,
        shapes,
        table,
        &RasterizeOptions::default(),
        &mut SequentialGroupIds::new(),
    )
}

/// Builds a segmentation map with explicit options and group id source.
///
/// Shapes whose label is not in the table are drawn into the ignore
/// channel. Group ids play no part in the result; shapes without one
/// still draw a generated id from `ids`.
pub fn build_segmap_with<G: GroupIdSource + ?Sized>(
    size: ImageSize,
    shapes: &[Shape],
    table: &LabelTable,
    opts: &RasterizeOptions,
    ids: &mut G,
) -> Result<SegMap, LabelmaskError> {
    let ignore = table.ignore_id()?;
    table.check_min_is_zero()?;
    let max_class = table.max_value().unwrap_or(ignore);

    let mut segmap = SegMap::zeros(size, max_class);

    for shape in shapes {
        let _group = shape.group_key(ids);
        let class = table.class_id_or(&shape.label, ignore);
        let mask = raster::rasterize_with(size, shape, opts)?;
        segmap.mark(&mask, class);
    }

    segmap.fill_untouched(ignore);

    log::debug!(
        "built {}x{} segmap with {} class(es) from {} shape(s)",
        size.height,
        size.width,
        segmap.num_classes(),
        shapes.len()
    );
    Ok(segmap)
}
