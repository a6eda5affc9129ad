//! Parallel map building over many images.
//!
//! Every image is independent, so work is spread over the rayon pool with
//! no shared state. Each image gets its own sequential group id source.
//! Results come back in input order; if any image fails, the batch fails.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LabelmaskError;
use crate::label_map::{build_label_maps_with, LabelMaps};
use crate::label_table::LabelTable;
use crate::raster::RasterizeOptions;
use crate::segmap::{build_segmap_with, SegMap};
use crate::shape::io_json::AnnotationFile;
use crate::shape::{ImageSize, SequentialGroupIds, Shape};

/// The shapes of one image together with its size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageShapes {
    pub size: ImageSize,
    pub shapes: Vec<Shape>,
}

impl ImageShapes {
    pub fn new(size: ImageSize, shapes: Vec<Shape>) -> Self {
        Self { size, shapes }
    }

    /// Takes the shapes and recorded size of an annotation document.
    ///
    /// Returns `None` if the document does not record its image size.
    pub fn from_annotation(file: AnnotationFile) -> Option<Self> {
        let size = file.image_size()?;
        Some(Self::new(size, file.shapes))
    }
}

/// Builds class and instance maps for every image in parallel.
pub fn build_label_maps_batch(
    images: &[ImageShapes],
    table: &LabelTable,
    opts: &RasterizeOptions,
) -> Result<Vec<LabelMaps>, LabelmaskError> {
    log::debug!("building label maps for {} image(s)", images.len());
    images
        .par_iter()
        .map(|image| {
            build_label_maps_with(
                image.size,
                &image.shapes,
                table,
                opts,
                &mut SequentialGroupIds::new(),
            )
        })
        .collect()
}

/// Builds segmentation maps for every image in parallel.
pub fn build_segmaps_batch(
    images: &[ImageShapes],
    table: &LabelTable,
    opts: &RasterizeOptions,
) -> Result<Vec<SegMap>, LabelmaskError> {
    log::debug!("building segmaps for {} image(s)", images.len());
    images
        .par_iter()
        .map(|image| {
            build_segmap_with(
                image.size,
                &image.shapes,
                table,
                opts,
                &mut SequentialGroupIds::new(),
            )
        })
        .collect()
}
