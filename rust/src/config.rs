//! Configuration types for scheduling and document generation.

use pyo3::prelude::*;

/// Configuration for the presentation scheduler.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Minutes allotted to each presentation (talk plus questions)
    #[pyo3(get, set)]
    pub presentation_minutes: f64,
    /// Verbosity level: 0=silent, 1=placements, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            presentation_minutes: 15.0,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl SchedulerConfig {
    #[new]
    #[pyo3(signature = (presentation_minutes=None, verbosity=None))]
    fn new(presentation_minutes: Option<f64>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            presentation_minutes: presentation_minutes.unwrap_or(defaults.presentation_minutes),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerConfig(presentation_minutes={}, verbosity={})",
            self.presentation_minutes, self.verbosity
        )
    }
}

/// Page geometry and typography for generated PDFs.
///
/// All lengths are PDF user-space units (1/72 inch). The defaults describe an
/// A4 page with Helvetica text starting one inch from the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct PdfLayout {
    pub title_font_size: u32,
    pub body_font_size: u32,
    /// Text origin (x, y) of the first line
    pub origin: (i32, i32),
    /// Vertical distance between consecutive lines
    pub line_spacing: u32,
    pub media_box: (u32, u32),
    /// Maximum characters per wrapped body line
    pub wrap_width: usize,
    /// Maximum lines per page when a long text is split across pages
    pub lines_per_page: usize,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            title_font_size: 20,
            body_font_size: 14,
            origin: (72, 760),
            line_spacing: 24,
            media_box: (595, 842),
            wrap_width: 72,
            lines_per_page: 30,
        }
    }
}

/// How user-supplied strings are escaped before going into a LaTeX template.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatexEscapeMode {
    /// The historical chained substitution, double-escaping included.
    #[default]
    Observed,
    /// Each special character escaped exactly once.
    SinglePass,
}
