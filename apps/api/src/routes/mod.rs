pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest;
use crate::job::handlers as job;
use crate::state::AppState;
use crate::synthesis::handlers as synthesis;
use crate::workflow::handlers as workflow;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(workflow::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(workflow::handle_get_session).delete(workflow::handle_end_session),
        )
        // Stage 1: resume upload
        .route(
            "/api/v1/sessions/:id/resume",
            post(ingest::handle_upload_resume).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Stage 2: job link
        .route("/api/v1/sessions/:id/job", post(job::handle_submit_job))
        .route("/api/v1/job-url/validate", post(job::handle_validate_job_url))
        // Stage 3: customize + download
        .route(
            "/api/v1/sessions/:id/synthesize",
            post(synthesis::handle_synthesize),
        )
        .route("/api/v1/sessions/:id/download", get(synthesis::handle_download))
        .with_state(state)
}
