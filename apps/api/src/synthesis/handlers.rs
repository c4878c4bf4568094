use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::synthesis::synthesizer::{OUTPUT_FILENAME, OUTPUT_MIME};
use crate::workflow::stages::{customized_resume, synthesize_resume, SynthesisResult};

/// POST /api/v1/sessions/:id/synthesize
pub async fn handle_synthesize(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SynthesisResult>, AppError> {
    let result = synthesize_resume(&state.sessions, state.synthesizer.as_ref(), session_id).await?;
    Ok(Json(result))
}

/// GET /api/v1/sessions/:id/download
///
/// Serves the last synthesized resume as a `customized_resume.txt` attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let body = customized_resume(&state.sessions, session_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, OUTPUT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{OUTPUT_FILENAME}\""),
            ),
        ],
        body,
    ))
}
