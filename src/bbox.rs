//! Tight bounding boxes of boolean masks.
//!
//! Boxes use half-open pixel ranges in (row, column) order:
//! `(ymin, xmin, ymax, xmax)` where `ymax`/`xmax` are one past the last
//! covered row/column.

use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LabelmaskError;

/// An axis-aligned box around the covered pixels of one mask.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskBBox {
    pub ymin: f32,
    pub xmin: f32,
    pub ymax: f32,
    pub xmax: f32,
}

impl MaskBBox {
    /// Creates a box from `(ymin, xmin, ymax, xmax)`.
    #[inline]
    pub fn new(ymin: f32, xmin: f32, ymax: f32, xmax: f32) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Number of pixels inside the box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// The `[ymin, xmin, ymax, xmax]` row used in box arrays.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.ymin, self.xmin, self.ymax, self.xmax]
    }
}

impl fmt::Debug for MaskBBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskBBox")
            .field("ymin", &self.ymin)
            .field("xmin", &self.xmin)
            .field("ymax", &self.ymax)
            .field("xmax", &self.xmax)
            .finish()
    }
}

/// Element type of a dynamically typed array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    U8,
    I8,
    I32,
    I64,
    F32,
    F64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Bool => "bool",
            DType::U8 => "uint8",
            DType::I8 => "int8",
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// An array of any dimensionality and element type, checked at run time.
///
/// Mask stacks arriving from untyped sources (decoded files, bindings) are
/// wrapped in this so that shape and element type can be reported as
/// errors rather than enforced by the compiler.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskStack {
    Bool(ArrayD<bool>),
    U8(ArrayD<u8>),
    I8(ArrayD<i8>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

impl MaskStack {
    pub fn dtype(&self) -> DType {
        match self {
            MaskStack::Bool(_) => DType::Bool,
            MaskStack::U8(_) => DType::U8,
            MaskStack::I8(_) => DType::I8,
            MaskStack::I32(_) => DType::I32,
            MaskStack::I64(_) => DType::I64,
            MaskStack::F32(_) => DType::F32,
            MaskStack::F64(_) => DType::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            MaskStack::Bool(a) => a.shape(),
            MaskStack::U8(a) => a.shape(),
            MaskStack::I8(a) => a.shape(),
            MaskStack::I32(a) => a.shape(),
            MaskStack::I64(a) => a.shape(),
            MaskStack::F32(a) => a.shape(),
            MaskStack::F64(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }
}

macro_rules! impl_mask_stack_from {
    ($($variant:ident => $elem:ty),* $(,)?) => {
        $(
            impl<D: ndarray::Dimension> From<ndarray::Array<$elem, D>> for MaskStack {
                fn from(array: ndarray::Array<$elem, D>) -> Self {
                    MaskStack::$variant(array.into_dyn())
                }
            }
        )*
    };
}

impl_mask_stack_from!(
    Bool => bool,
    U8 => u8,
    I8 => i8,
    I32 => i32,
    I64 => i64,
    F32 => f32,
    F64 => f64,
);

/// Bounding box of one mask, or `None` if it covers no pixel.
pub fn mask_bbox(mask: ArrayView2<'_, bool>) -> Option<MaskBBox> {
    let mut extent: Option<(usize, usize, usize, usize)> = None;
    for ((row, col), _) in mask.indexed_iter().filter(|(_, &v)| v) {
        extent = Some(match extent {
            None => (row, col, row, col),
            Some((r0, c0, r1, c1)) => (r0.min(row), c0.min(col), r1.max(row), c1.max(col)),
        });
    }
    extent.map(|(r0, c0, r1, c1)| {
        MaskBBox::new(r0 as f32, c0 as f32, (r1 + 1) as f32, (c1 + 1) as f32)
    })
}

/// Bounding boxes of a typed `(N, H, W)` mask stack, in stack order.
///
/// # Errors
/// [`LabelmaskError::EmptyMask`] naming the first mask with no covered pixel.
pub fn masks_to_bboxes(masks: ArrayView3<'_, bool>) -> Result<Vec<MaskBBox>, LabelmaskError> {
    masks
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(index, mask)| mask_bbox(mask).ok_or(LabelmaskError::EmptyMask { index }))
        .collect()
}

/// Packs boxes into an `(N, 4)` array of `[ymin, xmin, ymax, xmax]` rows.
pub fn bboxes_to_array(bboxes: &[MaskBBox]) -> Array2<f32> {
    Array2::from_shape_fn((bboxes.len(), 4), |(i, j)| bboxes[i].to_array()[j])
}

/// Bounding boxes of a dynamically typed mask stack as an `(N, 4)` array.
///
/// # Errors
/// - [`LabelmaskError::ShapeMismatch`] if the stack is not 3-dimensional.
/// - [`LabelmaskError::TypeMismatch`] if its elements are not `bool`.
/// - [`LabelmaskError::EmptyMask`] if any mask covers no pixel.
pub fn bboxes_from_masks(masks: &MaskStack) -> Result<Array2<f32>, LabelmaskError> {
    let ndim = masks.ndim();
    if ndim != 3 {
        return Err(LabelmaskError::ShapeMismatch { ndim });
    }
    let MaskStack::Bool(array) = masks else {
        return Err(LabelmaskError::TypeMismatch {
            dtype: masks.dtype(),
        });
    };
    let view = array
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| LabelmaskError::ShapeMismatch { ndim })?;
    let bboxes = masks_to_bboxes(view)?;
    Ok(bboxes_to_array(&bboxes))
}

/// Convenience for a typed stack owned by the caller.
pub fn bboxes_from_array(masks: &Array3<bool>) -> Result<Array2<f32>, LabelmaskError> {
    Ok(bboxes_to_array(&masks_to_bboxes(masks.view())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array2, Array3};

    fn block_mask() -> Array3<bool> {
        let mut masks = Array3::from_elem((1, 7, 6), false);
        masks.slice_mut(s![0, 2..=4, 1..=3]).fill(true);
        masks
    }

    #[test]
    fn test_bbox_is_half_open() {
        let boxes = bboxes_from_masks(&block_mask().into()).unwrap();
        assert_eq!(boxes.dim(), (1, 4));
        assert_eq!(boxes.row(0).to_vec(), vec![2.0, 1.0, 5.0, 4.0]);
    }

    #[test]
    fn test_single_pixel_mask() {
        let mut mask = Array2::from_elem((4, 4), false);
        mask[[3, 0]] = true;
        let bbox = mask_bbox(mask.view()).unwrap();
        assert_eq!(bbox, MaskBBox::new(3.0, 0.0, 4.0, 1.0));
        assert_eq!(bbox.area(), 1.0);
    }

    #[test]
    fn test_order_preserved() {
        let mut masks = Array3::from_elem((2, 5, 5), false);
        masks[[0, 4, 4]] = true;
        masks[[1, 0, 0]] = true;
        masks[[1, 1, 2]] = true;
        let boxes = masks_to_bboxes(masks.view()).unwrap();
        assert_eq!(boxes[0], MaskBBox::new(4.0, 4.0, 5.0, 5.0));
        assert_eq!(boxes[1], MaskBBox::new(0.0, 0.0, 2.0, 3.0));
    }

    #[test]
    fn test_rejects_two_dimensional_input() {
        let flat = Array2::from_elem((4, 4), true);
        let err = bboxes_from_masks(&flat.into()).unwrap_err();
        assert!(matches!(err, LabelmaskError::ShapeMismatch { ndim: 2 }));
    }

    #[test]
    fn test_rejects_integer_input() {
        let ints = Array3::<i32>::ones((1, 4, 4));
        let err = bboxes_from_masks(&ints.into()).unwrap_err();
        assert!(matches!(err, LabelmaskError::TypeMismatch { dtype: DType::I32 }));
        assert!(err.to_string().contains("int32"));
    }

    #[test]
    fn test_shape_checked_before_type() {
        let ints = Array2::<u8>::ones((4, 4));
        let err = bboxes_from_masks(&ints.into()).unwrap_err();
        assert!(matches!(err, LabelmaskError::ShapeMismatch { ndim: 2 }));
    }

    #[test]
    fn test_empty_mask_is_an_error() {
        let mut masks = Array3::from_elem((3, 4, 4), false);
        masks[[0, 1, 1]] = true;
        let err = masks_to_bboxes(masks.view()).unwrap_err();
        assert!(matches!(err, LabelmaskError::EmptyMask { index: 1 }));
    }

    #[test]
    fn test_empty_stack_gives_no_boxes() {
        let masks = Array3::from_elem((0, 4, 4), false);
        let boxes = bboxes_from_array(&masks).unwrap();
        assert_eq!(boxes.dim(), (0, 4));
    }
}
