//! Rust implementation of the gradshow program generator.
//!
//! This module provides the presentation scheduler, the minimal PDF assembler and
//! LaTeX program rendering used by the graduation-research portal.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

pub mod booklet;
mod config;
pub mod contact_time;
pub mod interner;
pub mod latex;
pub mod logging;
mod models;
pub mod pdf;
pub mod program;
pub mod roster;
pub mod scheduler;

pub use booklet::{build_booklet, generate_abstract_pdf, merge_abstract_pdfs, AbstractEntry};
pub use config::{LatexEscapeMode, PdfLayout, SchedulerConfig};
pub use contact_time::{contact_time_to_latex, ContactTimeEntry, ContactTimeSheet};
pub use latex::{escape_latex, escape_latex_single_pass, program_to_latex};
pub use models::{
    parse_clock, Assignment, ScheduledPresentation, SessionAssignment, SessionKind, SessionSlot,
    Submission,
};
pub use pdf::{PdfDocument, PdfError};
pub use program::{build_program, EventDetails, Program, ProgramError};
pub use roster::{parse_agenda, parse_roster, RosterError};
pub use scheduler::{schedule, schedule_with_config, SchedulingError};

/// Distribute submissions over the presentation sessions of an agenda.
///
/// Each laboratory's students are spread across sessions in round-robin
/// order, then leftover capacity is filled in student-number order.
///
/// # Arguments
/// * `submissions` - Presentations to place
/// * `sessions` - Agenda slots; breaks are skipped
/// * `presentation_minutes` - Minutes per presentation
/// * `verbosity` - Logging level (0=silent, 1=placements, 2=checks, 3=debug)
///
/// # Raises
/// * ValueError if the duration is not positive, capacity is insufficient, or
///   there are more sessions than members in the smallest laboratory
#[pyfunction]
#[pyo3(signature = (submissions, sessions, presentation_minutes=15.0, verbosity=0))]
fn schedule_presentations(
    submissions: Vec<Submission>,
    sessions: Vec<SessionSlot>,
    presentation_minutes: f64,
    verbosity: u8,
) -> PyResult<Assignment> {
    let config = SchedulerConfig {
        presentation_minutes,
        verbosity,
    };

    match schedule_with_config(&submissions, &sessions, &config) {
        Ok(assignment) => Ok(assignment),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// Render pages of text lines as a PDF. The first line of each page is its title.
#[pyfunction]
fn render_pdf_pages(py: Python<'_>, pages: Vec<Vec<String>>) -> PyResult<Bound<'_, PyBytes>> {
    let pages: Vec<pdf::Page> = pages.into_iter().map(pdf::Page::new).collect();
    match pdf::render_pages(&pages) {
        Ok(doc) => Ok(PyBytes::new_bound(py, doc.as_bytes())),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// Return the first content stream of a PDF produced by this module.
#[pyfunction]
fn extract_pdf_content_stream(data: Vec<u8>) -> PyResult<String> {
    let doc = PdfDocument::from_bytes(data);
    pdf::extract_content_stream(&doc).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Merge PDFs produced by this module into one document, one page per input.
#[pyfunction]
fn merge_pdf_documents(py: Python<'_>, documents: Vec<Vec<u8>>) -> PyResult<Bound<'_, PyBytes>> {
    let documents: Vec<PdfDocument> = documents.into_iter().map(PdfDocument::from_bytes).collect();
    match pdf::merge_documents(&documents) {
        Ok(doc) => Ok(PyBytes::new_bound(py, doc.as_bytes())),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// Escape text for LaTeX.
#[pyfunction]
#[pyo3(name = "escape_latex", signature = (text, mode=LatexEscapeMode::Observed))]
fn py_escape_latex(text: &str, mode: LatexEscapeMode) -> String {
    latex::escape_with(text, mode)
}

/// Build the program for an agenda and schedule.
#[pyfunction]
fn build_event_program(
    details: EventDetails,
    sessions: Vec<SessionSlot>,
    assignment: Assignment,
) -> Program {
    build_program(&details, &sessions, &assignment)
}

/// Render the program as a jsarticle LaTeX document.
#[pyfunction]
#[pyo3(signature = (details, sessions, assignment, mode=LatexEscapeMode::Observed))]
fn render_program_latex(
    details: EventDetails,
    sessions: Vec<SessionSlot>,
    assignment: Assignment,
    mode: LatexEscapeMode,
) -> String {
    program_to_latex(&build_program(&details, &sessions, &assignment), mode)
}

/// Render a student's contact-time record sheet as a jarticle LaTeX document.
#[pyfunction]
fn render_contact_time_latex(sheet: &ContactTimeSheet, entries: Vec<ContactTimeEntry>) -> String {
    contact_time_to_latex(sheet, &entries)
}

/// Render the program as a PDF.
#[pyfunction]
fn render_program_pdf<'py>(py: Python<'py>, program: &Program) -> PyResult<Bound<'py, PyBytes>> {
    let layout = PdfLayout::default();
    match pdf::render_pages_with_layout(&program.to_pages(&layout), &layout) {
        Ok(doc) => Ok(PyBytes::new_bound(py, doc.as_bytes())),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// Render one abstract as a single-page PDF.
#[pyfunction]
fn render_abstract_pdf<'py>(
    py: Python<'py>,
    entry: &AbstractEntry,
) -> PyResult<Bound<'py, PyBytes>> {
    match generate_abstract_pdf(entry) {
        Ok(doc) => Ok(PyBytes::new_bound(py, doc.as_bytes())),
        Err(e) => Err(PyValueError::new_err(e.to_string())),
    }
}

/// Parse backend roster JSON into submissions.
#[pyfunction]
fn load_roster(json: &str) -> PyResult<Vec<Submission>> {
    parse_roster(json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Parse agenda form JSON into session slots.
#[pyfunction]
fn load_agenda(json: &str) -> PyResult<Vec<SessionSlot>> {
    parse_agenda(json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The gradshow.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Submission>()?;
    m.add_class::<SessionKind>()?;
    m.add_class::<SessionSlot>()?;
    m.add_class::<ScheduledPresentation>()?;
    m.add_class::<SessionAssignment>()?;
    m.add_class::<Assignment>()?;
    m.add_class::<EventDetails>()?;
    m.add_class::<Program>()?;
    m.add_class::<AbstractEntry>()?;
    m.add_class::<ContactTimeEntry>()?;
    m.add_class::<ContactTimeSheet>()?;

    // Config types
    m.add_class::<SchedulerConfig>()?;
    m.add_class::<LatexEscapeMode>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(schedule_presentations, m)?)?;
    m.add_function(wrap_pyfunction!(build_event_program, m)?)?;

    // Documents
    m.add_function(wrap_pyfunction!(render_pdf_pages, m)?)?;
    m.add_function(wrap_pyfunction!(extract_pdf_content_stream, m)?)?;
    m.add_function(wrap_pyfunction!(merge_pdf_documents, m)?)?;
    m.add_function(wrap_pyfunction!(render_program_pdf, m)?)?;
    m.add_function(wrap_pyfunction!(render_abstract_pdf, m)?)?;
    m.add_function(wrap_pyfunction!(py_escape_latex, m)?)?;
    m.add_function(wrap_pyfunction!(render_program_latex, m)?)?;
    m.add_function(wrap_pyfunction!(render_contact_time_latex, m)?)?;

    // Input parsing
    m.add_function(wrap_pyfunction!(load_roster, m)?)?;
    m.add_function(wrap_pyfunction!(load_agenda, m)?)?;

    Ok(())
}
