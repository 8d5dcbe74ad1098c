//! Document-text extraction: filename + bytes → plain text.
//!
//! Never fails. Malformed input is logged and yields an empty string; callers
//! treat empty text as "could not parse".

pub mod docx;

use std::fmt;

use tracing::warn;

use crate::extraction::docx::extract_docx_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
    Unknown,
}

impl DocumentKind {
    /// Chosen by (case-insensitive) file extension.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else if lower.ends_with(".txt") || lower.ends_with(".md") {
            DocumentKind::Text
        } else {
            DocumentKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Text => "txt",
            DocumentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts text from an uploaded document. Blocking: run on a blocking thread.
pub fn read_text(filename: &str, data: &[u8]) -> (DocumentKind, String) {
    let kind = DocumentKind::from_filename(filename);
    let text = match kind {
        DocumentKind::Pdf => pdf_text(filename, data),
        DocumentKind::Docx => match extract_docx_text(data) {
            Ok(text) => text,
            Err(e) => {
                warn!("DOCX extraction failed for '{filename}': {e}");
                String::new()
            }
        },
        DocumentKind::Text | DocumentKind::Unknown => decode_text(data),
    };
    (kind, text)
}

fn pdf_text(filename: &str, data: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed for '{filename}': {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF extraction panicked for '{filename}'");
            String::new()
        }
    }
}

/// UTF-8, falling back to Latin-1 (every byte maps to one char).
pub fn decode_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => data.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("CV.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("cv.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("jd.md"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename("jd.txt"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename("jd.rtf"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_filename(""), DocumentKind::Unknown);
    }

    #[test]
    fn test_text_and_unknown_decode_utf8() {
        let (kind, text) = read_text("jd.txt", "Café — Rust".as_bytes());
        assert_eq!(kind, DocumentKind::Text);
        assert_eq!(text, "Café — Rust");
        let (kind, text) = read_text("jd", b"plain");
        assert_eq!(kind, DocumentKind::Unknown);
        assert_eq!(text, "plain");
    }

    #[test]
    fn test_latin1_fallback() {
        assert_eq!(decode_text(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }

    #[test]
    fn test_malformed_documents_yield_empty_text() {
        assert_eq!(read_text("cv.pdf", b"not a pdf at all"), (DocumentKind::Pdf, String::new()));
        assert_eq!(read_text("cv.docx", b"not a zip"), (DocumentKind::Docx, String::new()));
    }
}
