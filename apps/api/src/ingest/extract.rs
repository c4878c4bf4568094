//! Text extraction: turns an uploaded PDF or DOCX into plain resume text.
//!
//! Parsing is delegated to `pdf-extract`, `zip` and `quick-xml`; this module only picks the
//! backend, normalises failures into `ExtractionError`, and rejects documents
//! that contain no text at all.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::ingest::docx::extract_docx_text;
use crate::models::resume::DocumentFormat;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("The document does not contain any extractable text")]
    Empty,
}

/// Extracts plain text from a document of the given format.
///
/// Fails with `ExtractionError::Empty` when the document parses but yields
/// nothing but whitespace.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf_text(bytes)?,
        DocumentFormat::Docx => extract_docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf(
            "the PDF parser aborted on malformed input".to_string(),
        )),
    }
}
