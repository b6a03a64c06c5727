//! Generated PDF bytes.

use super::extract::{find, stream_bodies};

/// An immutable PDF file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Vec<u8>,
}

impl PdfDocument {
    /// Wrap existing bytes. Nothing is validated until the content is read.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Page count declared by the `/Count` entry of the page tree.
    pub fn page_count(&self) -> Option<usize> {
        let key = b"/Count ";
        let start = find(&self.bytes, key, 0)? + key.len();
        let digits: String = self.bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .map(|&b| b as char)
            .collect();
        digits.parse().ok()
    }

    /// Every content stream in file order, trimmed.
    ///
    /// Streams that are not valid UTF-8 are skipped.
    pub fn content_streams(&self) -> Vec<String> {
        stream_bodies(&self.bytes)
            .filter_map(|body| std::str::from_utf8(body).ok())
            .map(|body| body.trim().to_string())
            .collect()
    }
}

impl AsRef<[u8]> for PdfDocument {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<PdfDocument> for Vec<u8> {
    fn from(doc: PdfDocument) -> Self {
        doc.bytes
    }
}
