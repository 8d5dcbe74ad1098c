//! DOCX text extraction. A DOCX file is a ZIP archive; the body text lives in
//! `word/document.xml` as `<w:t>` runs inside `<w:p>` paragraphs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to read word/document.xml: {0}")]
    Read(#[from] std::io::Error),

    #[error("XML parsing error at position {position}: {message}")]
    Xml { position: u64, message: String },
}

/// Paragraph texts of the document joined with newlines.
pub fn extract_docx_text(data: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    let paragraphs = parse_document_xml(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => current.clear(),
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"w:tab" {
                    current.push('\t');
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                // empty paragraphs are kept so blank lines survive
                b"w:p" => paragraphs.push(current.trim_end().to_string()),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| DocxError::Xml {
                    position: reader.buffer_position() as u64,
                    message: err.to_string(),
                })?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(DocxError::Xml {
                    position: reader.buffer_position() as u64,
                    message: err.to_string(),
                })
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
