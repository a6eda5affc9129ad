//! Issues found while checking shapes and label tables.

use std::fmt;

use super::ValidateOptions;

/// Every issue found for one image, in discovery order: table first, then
/// shapes by index.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Issues that make rasterization fail.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// No shape or table problem would stop rasterization.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Like [`is_ok`](Self::is_ok), but warnings fail too when
    /// `opts.strict` is set.
    pub fn is_ok_with(&self, opts: &ValidateOptions) -> bool {
        if opts.strict {
            self.is_clean()
        } else {
            self.is_ok()
        }
    }

    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Issues attached to the shape at `index`.
    pub fn for_shape(&self, index: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |i| matches!(i.context, IssueContext::Shape { index: at } if at == index))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "shapes ok");
        }
        writeln!(
            f,
            "{} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub context: IssueContext,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            context,
        }
    }

    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message, context)
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warn",
        };
        write!(f, "{tag}: {:?} in {}: {}", self.code, self.context, self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Rasterization succeeds but likely not as intended.
    Warning,
    /// Rasterization fails.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// The table has no `__ignore__` entry.
    MissingIgnoreLabel,
    /// Smallest class id is not 0; segmentation maps refuse the table.
    MinValueNotZero,
    InvalidPointCount,
    /// NaN or infinite coordinate.
    NonFiniteCoordinate,
    /// Label missing from the table; drawn as `__ignore__`.
    UnknownLabel,
    /// Every point lies outside the image.
    ShapeOutsideImage,
    /// Draws no pixel.
    EmptyRaster,
}

#[derive(Clone, Debug)]
pub enum IssueContext {
    Table,
    /// Position in the input shape list.
    Shape { index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Table => write!(f, "label table"),
            IssueContext::Shape { index } => write!(f, "shape {}", index),
        }
    }
}
