use std::path::Path;

use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the resume ingestion stage can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from the declared MIME type, falling back to the
    /// file extension when the browser sent no usable type.
    /// Parameters such as `; charset=binary` are ignored.
    pub fn detect(mime: Option<&str>, filename: &str) -> Option<Self> {
        match mime.map(essence).as_deref() {
            Some(PDF_MIME) => Some(DocumentFormat::Pdf),
            Some(DOCX_MIME) => Some(DocumentFormat::Docx),
            None | Some("") | Some("application/octet-stream") => Self::from_extension(filename),
            Some(_) => None,
        }
    }

    fn from_extension(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Some(DocumentFormat::Pdf),
            Some("docx") => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    /// Canonical MIME type for the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => PDF_MIME,
            DocumentFormat::Docx => DOCX_MIME,
        }
    }
}

/// Metadata about the uploaded file, echoed back to the client after upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    pub filename: String,
    pub size_label: String,
    pub mime_type: String,
    pub format: DocumentFormat,
}

impl FileDetails {
    /// `mime_type` echoes the type the client declared; the format's canonical
    /// type is used only when none was sent.
    pub fn new(
        filename: &str,
        byte_len: usize,
        format: DocumentFormat,
        declared_mime: Option<&str>,
    ) -> Self {
        let mime_type = declared_mime
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(format.mime_type());

        Self {
            filename: filename.to_string(),
            size_label: format_size_label(byte_len),
            mime_type: mime_type.to_string(),
            format,
        }
    }
}

/// Extracted resume text plus the file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeArtifact {
    pub text: String,
    pub file: FileDetails,
}

/// `type/subtype` without parameters, lowercased.
fn essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Kilobytes with two decimals, e.g. `"12.34 KB"`.
pub fn format_size_label(byte_len: usize) -> String {
    format!("{:.2} KB", byte_len as f64 / 1024.0)
}
