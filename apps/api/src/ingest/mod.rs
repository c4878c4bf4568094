// Resume ingestion: format detection and text extraction for uploaded resumes.

pub mod docx;
pub mod extract;
pub mod handlers;
