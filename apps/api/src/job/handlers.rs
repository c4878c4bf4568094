use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::workflow::stages::{capture_job, check_job_url, JobCapture, JobUrlCheck};

#[derive(Debug, Deserialize)]
pub struct JobUrlRequest {
    pub job_url: String,
}

/// POST /api/v1/sessions/:id/job
pub async fn handle_submit_job(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<JobUrlRequest>,
) -> Result<Json<JobCapture>, AppError> {
    if request.job_url.trim().is_empty() {
        return Err(AppError::Validation("job_url cannot be empty".to_string()));
    }

    let capture = capture_job(
        &state.sessions,
        &state.job_url_policy,
        state.job_extractor.as_ref(),
        session_id,
        &request.job_url,
    )
    .await?;

    Ok(Json(capture))
}

/// POST /api/v1/job-url/validate
///
/// Checks a URL against the allow-list without touching any session.
pub async fn handle_validate_job_url(
    State(state): State<AppState>,
    Json(request): Json<JobUrlRequest>,
) -> Json<JobUrlCheck> {
    Json(check_job_url(&state.job_url_policy, &request.job_url))
}
