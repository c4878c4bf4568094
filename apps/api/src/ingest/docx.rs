//! DOCX text reader.
//!
//! A DOCX file is a ZIP container; the body lives in `word/document.xml`.
//! Each `<w:p>` paragraph becomes one line made of its `<w:t>` runs.

use std::fmt::Display;
use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::ingest::extract::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a valid DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    document_xml_to_text(&xml)
}

/// Flattens `word/document.xml` into text, one newline per paragraph.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(reader.buffer_position(), e))?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            // Self-closing elements; an empty <w:t/> contributes nothing.
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run => {
                let run = t
                    .unescape()
                    .map_err(|e| malformed(reader.buffer_position(), e))?;
                text.push_str(&run);
            }
            Event::CData(c) if in_run => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn malformed(position: impl Display, err: impl Display) -> ExtractionError {
    ExtractionError::Docx(format!(
        "malformed {DOCUMENT_PART} near byte {position}: {err}"
    ))
}
