//! Reading shapes from labelme-style JSON.
//!
//! Only the fields the rasterizer needs are read: the `shapes` list and,
//! when present, `imageHeight`/`imageWidth`. Everything else in the
//! document (image data, flags, version) is ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{ImageSize, Shape};
use crate::error::LabelmaskError;

/// The parts of an annotation document used for rasterization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFile {
    pub shapes: Vec<Shape>,

    #[serde(
        rename = "imageHeight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_height: Option<usize>,

    #[serde(rename = "imageWidth", default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<usize>,
}

impl AnnotationFile {
    /// The image size recorded in the document, if both dimensions are present.
    pub fn image_size(&self) -> Option<ImageSize> {
        Some(ImageSize::new(self.image_height?, self.image_width?))
    }
}

/// Reads an annotation document from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_annotation_json(path: &Path) -> Result<AnnotationFile, LabelmaskError> {
    let file = File::open(path).map_err(LabelmaskError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelmaskError::ShapeJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an annotation document from a JSON string.
pub fn annotation_from_json_str(json: &str) -> Result<AnnotationFile, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a bare JSON array of shape records.
pub fn shapes_from_json_str(json: &str) -> Result<Vec<Shape>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes shape records as a JSON array.
pub fn shapes_to_json_string(shapes: &[Shape]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(shapes)
}
