use std::path::PathBuf;
use thiserror::Error;

use crate::shape::ShapeType;

/// The main error type for labelmask operations.
///
/// Apart from the I/O variants, every variant is a rejected input.
/// Operations fail as a whole; no partial output is returned.
#[derive(Debug, Error)]
pub enum LabelmaskError {
    #[error("Shape of shape_type={shape_type} must have {expected} point(s), got {actual}")]
    InvalidShape {
        shape_type: ShapeType,
        expected: PointCount,
        actual: usize,
    },

    #[error("Need to have '__ignore__' class in label_name_to_value")]
    MissingIgnoreLabel,

    #[error("Minimum value in label_name_to_value must be 0, currently it's {min}")]
    MinValueNotZero { min: u32 },

    #[error("masks.ndim must be 3, but it is {ndim}")]
    ShapeMismatch { ndim: usize },

    #[error("masks.dtype must be bool type, but it is {dtype}")]
    TypeMismatch { dtype: crate::bbox::DType },

    #[error("mask {index} has no foreground pixels, its bounding box is undefined")]
    EmptyMask { index: usize },

    #[error("Class id {value} of label '{label}' does not fit a 32-bit class map")]
    ClassIdOverflow { label: String, value: u32 },

    #[error("Image of {height}x{width} pixels is too large to rasterize")]
    ImageTooLarge { height: usize, width: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse shape JSON from {path}: {source}")]
    ShapeJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LabelmaskError {
    /// Returns true for errors caused by an unusable label-value table.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LabelmaskError::MissingIgnoreLabel
                | LabelmaskError::MinValueNotZero { .. }
                | LabelmaskError::ClassIdOverflow { .. }
        )
    }
}

/// The number of points a shape type accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointCount {
    /// Exactly this many points.
    Exactly(usize),
    /// Strictly more than this many points.
    MoreThan(usize),
    /// Any number of points.
    Any,
}

impl PointCount {
    /// Returns true if `n` points satisfy this requirement.
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            PointCount::Exactly(k) => n == k,
            PointCount::MoreThan(k) => n > k,
            PointCount::Any => true,
        }
    }
}

impl std::fmt::Display for PointCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointCount::Exactly(k) => write!(f, "{}", k),
            PointCount::MoreThan(k) => write!(f, "more than {}", k),
            PointCount::Any => write!(f, "any number of"),
        }
    }
}
