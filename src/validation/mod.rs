//! Shape-set validation.
//!
//! Checks shapes and a label table ahead of rasterization and reports every
//! problem found instead of failing on the first one:
//! - Table usability (`__ignore__` present, minimum class id 0)
//! - Point counts and finite coordinates
//! - Labels missing from the table, shapes that draw nothing

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::label_table::{LabelTable, IGNORE_LABEL};
use crate::raster::{self, RasterizeOptions};
use crate::shape::{ImageSize, Shape};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Warnings fail [`ValidationReport::is_ok_with`] too.
    pub strict: bool,

    /// Drawing options used for the empty-raster check.
    pub raster: RasterizeOptions,
}

/// Validates shapes against an image size and label table.
pub fn validate_shapes(
    size: ImageSize,
    shapes: &[Shape],
    table: &LabelTable,
    opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_table(table, &mut report);

    for (index, shape) in shapes.iter().enumerate() {
        validate_shape(size, index, shape, table, opts, &mut report);
    }

    log::debug!(
        "validated {} shape(s): {} error(s), {} warning(s)",
        shapes.len(),
        report.error_count(),
        report.warning_count()
    );
    report
}

fn validate_table(table: &LabelTable, report: &mut ValidationReport) {
    if !table.contains(IGNORE_LABEL) {
        report.add(ValidationIssue::error(
            IssueCode::MissingIgnoreLabel,
            format!("Table has no '{}' entry", IGNORE_LABEL),
            IssueContext::Table,
        ));
    }

    if let Some(min) = table.min_value().filter(|&m| m != 0) {
        report.add(ValidationIssue::warning(
            IssueCode::MinValueNotZero,
            format!(
                "Smallest class id is {} (segmentation maps require 0)",
                min
            ),
            IssueContext::Table,
        ));
    }
}

fn validate_shape(
    size: ImageSize,
    index: usize,
    shape: &Shape,
    table: &LabelTable,
    opts: &ValidateOptions,
    report: &mut ValidationReport,
) {
    let context = || IssueContext::Shape { index };

    if let Err(err) = shape.check_point_count() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidPointCount,
            err.to_string(),
            context(),
        ));
        return;
    }

    if !shape.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::NonFiniteCoordinate,
            format!("Shape '{}' has non-finite coordinates", shape.label),
            context(),
        ));
        return;
    }

    if !table.contains(&shape.label) {
        report.add(ValidationIssue::warning(
            IssueCode::UnknownLabel,
            format!(
                "Label '{}' is not in the table, drawn as '{}'",
                shape.label, IGNORE_LABEL
            ),
            context(),
        ));
    }

    if let Some((xmin, ymin, xmax, ymax)) = shape.extent() {
        let (w, h) = (size.width as f64, size.height as f64);
        let points_outside = xmax < 0.0 || ymax < 0.0 || xmin >= w || ymin >= h;
        if points_outside {
            report.add(ValidationIssue::warning(
                IssueCode::ShapeOutsideImage,
                format!(
                    "Points span ({:.1}, {:.1}, {:.1}, {:.1}), outside image bounds (0, 0, {}, {})",
                    xmin, ymin, xmax, ymax, size.width, size.height
                ),
                context(),
            ));
        }
    }

    // Point count was checked above, so drawing cannot fail here.
    if let Ok(mask) = raster::rasterize_with(size, shape, &opts.raster) {
        if raster::mask_area(&mask) == 0 {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyRaster,
                format!("Shape '{}' covers no pixel", shape.label),
                context(),
            ));
        }
    }
}
