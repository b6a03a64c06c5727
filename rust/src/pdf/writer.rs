//! Object table and cross-reference serialization.

use crate::config::PdfLayout;

use super::document::PdfDocument;
use super::text::{content_stream, Page};
use super::PdfError;

const PDF_HEADER: &str = "%PDF-1.4\n";
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;

/// Indirect objects in id order. Object `n` lives at index `n - 1`.
#[derive(Debug, Default)]
struct ObjectTable {
    bodies: Vec<String>,
}

impl ObjectTable {
    fn add(&mut self, body: String) -> usize {
        self.bodies.push(body);
        self.bodies.len()
    }

    fn set(&mut self, id: usize, body: String) {
        self.bodies[id - 1] = body;
    }

    /// Serialize the file in two passes: object text first, then offsets
    /// accumulated from the serialized lengths, then header, objects, xref
    /// and trailer.
    fn serialize(self) -> Vec<u8> {
        let objects: Vec<String> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| format!("{} 0 obj\n{}\nendobj\n", i + 1, body))
            .collect();

        let mut offsets = Vec::with_capacity(objects.len());
        let mut offset = PDF_HEADER.len();
        for object in &objects {
            offsets.push(offset);
            offset += object.len();
        }
        let xref_offset = offset;
        let size = objects.len() + 1;

        let mut out = String::with_capacity(xref_offset + 64 + 20 * size);
        out.push_str(PDF_HEADER);
        for object in &objects {
            out.push_str(object);
        }
        out.push_str(&format!("xref\n0 {}\n", size));
        out.push_str("0000000000 65535 f \n");
        for object_offset in offsets {
            out.push_str(&format!("{:010} 00000 n \n", object_offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF",
            size, CATALOG_ID, xref_offset
        ));
        out.into_bytes()
    }
}

/// Assemble a document with one page per content stream.
///
/// Objects are numbered Catalog, Pages, Font, then a (Content, Page) pair per
/// stream in input order.
pub fn assemble_streams(streams: &[String], layout: &PdfLayout) -> Result<PdfDocument, PdfError> {
    if streams.is_empty() {
        return Err(PdfError::EmptyDocument);
    }

    let mut table = ObjectTable::default();
    table.add(format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID));
    // Pages body is filled in once the kids are known
    table.add(String::new());
    table.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut page_ids = Vec::with_capacity(streams.len());
    for stream in streams {
        let content_id = table.add(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
        let page_id = table.add(format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >>",
            PAGES_ID, layout.media_box.0, layout.media_box.1, content_id, FONT_ID
        ));
        page_ids.push(page_id);
    }

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    table.set(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        ),
    );

    Ok(PdfDocument::from_bytes(table.serialize()))
}

/// Render text pages with the default layout.
pub fn render_pages(pages: &[Page]) -> Result<PdfDocument, PdfError> {
    render_pages_with_layout(pages, &PdfLayout::default())
}

pub fn render_pages_with_layout(pages: &[Page], layout: &PdfLayout) -> Result<PdfDocument, PdfError> {
    let streams: Vec<String> = pages.iter().map(|p| content_stream(p, layout)).collect();
    assemble_streams(&streams, layout)
}
