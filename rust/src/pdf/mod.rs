//! Minimal PDF assembler.
//!
//! Writes text-only PDF 1.4 documents with one Helvetica font resource and
//! one content stream per page, and reads those streams back out so that
//! single-page documents can be merged into a booklet. No external renderer
//! is involved; every byte of the output is produced here.

mod document;
mod extract;
mod text;
mod writer;

use thiserror::Error;

pub use document::PdfDocument;
pub use extract::{extract_content_stream, merge_documents};
pub use text::{content_stream, escape_pdf_text, wrap_text, Page};
pub use writer::{assemble_streams, render_pages, render_pages_with_layout};

/// MIME type of generated documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Errors that can occur while assembling or reading documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdfError {
    #[error("No pages to include in PDF")]
    EmptyDocument,
    #[error("Malformed PDF: {0}")]
    MalformedDocument(String),
}
