//! Page text and content-stream operators.

use crate::config::PdfLayout;

/// One page of text. The first line is drawn as the page title.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

impl Page {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Append `text` wrapped to `max_chars` characters per line.
    pub fn push_wrapped(&mut self, text: &str, max_chars: usize) {
        self.lines.extend(wrap_text(text, max_chars));
    }
}

/// Escape a string for use inside a PDF literal string `( ... )`.
///
/// Backslashes are escaped before parentheses so the inserted escapes are
/// not escaped again.
pub fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word wrap measured in characters, not glyph widths.
///
/// A word longer than `max_chars` is kept whole on its own line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Build the drawing operators for one page.
pub fn content_stream(page: &Page, layout: &PdfLayout) -> String {
    let mut ops: Vec<String> = vec![
        "BT".to_string(),
        format!("/F1 {} Tf", layout.title_font_size),
        format!("{} {} Td", layout.origin.0, layout.origin.1),
    ];

    let Some((title, body)) = page.lines.split_first() else {
        ops.push("(Empty) Tj".to_string());
        ops.push("ET".to_string());
        return ops.join("\n");
    };

    ops.push(format!("({}) Tj", escape_pdf_text(title)));
    ops.push(format!("/F1 {} Tf", layout.body_font_size));
    for line in body {
        ops.push(format!("0 -{} Td", layout.line_spacing));
        ops.push(format!("({}) Tj", escape_pdf_text(line)));
    }
    ops.push("ET".to_string());
    ops.join("\n")
}
