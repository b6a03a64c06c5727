//! Content stream extraction and document merging.

use crate::config::PdfLayout;

use super::document::PdfDocument;
use super::writer::assemble_streams;
use super::PdfError;

const STREAM: &[u8] = b"stream";
const ENDSTREAM: &[u8] = b"endstream";

/// Position of `needle` in `haystack` at or after `from`.
pub(crate) fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

/// Raw bytes between each `stream` keyword and the next `endstream`.
pub(crate) fn stream_bodies(bytes: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        let start = find(bytes, STREAM, cursor)? + STREAM.len();
        let end = find(bytes, ENDSTREAM, start)?;
        cursor = end + ENDSTREAM.len();
        Some(&bytes[start..end])
    })
}

/// Return the first content stream of a document, trimmed of surrounding
/// whitespace.
pub fn extract_content_stream(doc: &PdfDocument) -> Result<String, PdfError> {
    let body = stream_bodies(doc.as_bytes())
        .next()
        .ok_or_else(|| PdfError::MalformedDocument("no content stream found".to_string()))?;
    let text = std::str::from_utf8(body).map_err(|e| {
        PdfError::MalformedDocument(format!("content stream is not valid UTF-8: {}", e))
    })?;
    Ok(text.trim().to_string())
}

/// Merge single-page documents into one document, one page per source in
/// the given order.
pub fn merge_documents(docs: &[PdfDocument]) -> Result<PdfDocument, PdfError> {
    if docs.is_empty() {
        return Err(PdfError::EmptyDocument);
    }
    let streams = docs
        .iter()
        .map(extract_content_stream)
        .collect::<Result<Vec<_>, _>>()?;
    assemble_streams(&streams, &PdfLayout::default())
}
