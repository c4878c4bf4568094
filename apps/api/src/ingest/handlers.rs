use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::workflow::stages::{ingest_resume, ResumeReceipt, ResumeUpload};

const RESUME_FIELD: &str = "resume";

/// POST /api/v1/sessions/:id/resume
///
/// Multipart upload with the document in the `resume` field (PDF or DOCX).
/// Other fields are ignored.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeReceipt>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume").to_string();
        let declared_mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let upload = ResumeUpload {
            filename,
            declared_mime,
            bytes,
        };
        let receipt = ingest_resume(&state.sessions, session_id, upload).await?;
        return Ok(Json(receipt));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{RESUME_FIELD}'"
    )))
}
