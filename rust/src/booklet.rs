//! Abstract pages and the merged abstract booklet.

use pyo3::prelude::*;
use serde::Deserialize;

use crate::config::PdfLayout;
use crate::pdf::{merge_documents, render_pages_with_layout, Page, PdfDocument, PdfError};

/// One abstract as it appears in the booklet.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AbstractEntry {
    /// Presentation number in the program
    #[pyo3(get, set)]
    pub order: usize,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub presenter: String,
    #[pyo3(get, set)]
    pub summary: String,
}

#[pymethods]
impl AbstractEntry {
    #[new]
    fn new(order: usize, title: String, presenter: String, summary: String) -> Self {
        Self {
            order,
            title,
            presenter,
            summary,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AbstractEntry(order={}, presenter={:?})",
            self.order, self.presenter
        )
    }
}

/// Lay out one abstract: numbered title, presenter, blank line, wrapped summary.
pub fn abstract_page(entry: &AbstractEntry, wrap_width: usize) -> Page {
    let mut page = Page::from_lines([
        format!("{}. {}", entry.order, entry.title),
        format!("Presenter: {}", entry.presenter),
        String::new(),
    ]);
    page.push_wrapped(&entry.summary, wrap_width);
    page
}

/// Render a single-page abstract PDF.
pub fn generate_abstract_pdf(entry: &AbstractEntry) -> Result<PdfDocument, PdfError> {
    let layout = PdfLayout::default();
    render_pages_with_layout(&[abstract_page(entry, layout.wrap_width)], &layout)
}

/// Merge single-page abstract PDFs, in the given order, into one booklet.
pub fn merge_abstract_pdfs(docs: &[PdfDocument]) -> Result<PdfDocument, PdfError> {
    merge_documents(docs)
}

/// Render every abstract and the merged booklet in one go.
///
/// Entries are taken in the order given; callers sort by program order.
pub fn build_booklet(
    entries: &[AbstractEntry],
) -> Result<(Vec<PdfDocument>, PdfDocument), PdfError> {
    let singles = entries
        .iter()
        .map(generate_abstract_pdf)
        .collect::<Result<Vec<_>, _>>()?;
    let booklet = merge_abstract_pdfs(&singles)?;
    Ok((singles, booklet))
}

/// Download name for one abstract, e.g. `abstract-03-taro-yamada.pdf`.
pub fn abstract_file_name(order: usize, presenter: &str) -> String {
    let mut slug = String::with_capacity(presenter.len());
    let mut in_gap = false;
    for c in presenter.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    format!("abstract-{:02}-{}.pdf", order, slug)
}

/// Download name for the merged booklet of a program.
///
/// Whitespace runs in the name become `-`; a missing name falls back to
/// `program`.
pub fn booklet_file_name(program_name: Option<&str>) -> String {
    let Some(program_name) = program_name else {
        return "program-abstract-booklet.pdf".to_string();
    };
    let mut name = String::with_capacity(program_name.len());
    let mut in_space = false;
    for c in program_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('-');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("{}-abstract-booklet.pdf", name)
}
