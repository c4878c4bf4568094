//! Stage runners: the three pipeline stages plus download, each applied to one session.
//!
//! Flow per stage: check the session exists → do the slow work (extraction,
//! job lookup) without holding the store lock → commit the artifact through the
//! state machine. A failure at any point leaves the session untouched.

use anyhow::anyhow;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::extract::{extract_text, ExtractionError};
use crate::job::extractor::JobExtractor;
use crate::job::url_validator::{extract_job_id, JobUrlPolicy, EXAMPLE_JOB_URL};
use crate::models::job::JobRecord;
use crate::models::resume::{DocumentFormat, FileDetails, ResumeArtifact};
use crate::synthesis::synthesizer::ResumeSynthesizer;
use crate::workflow::session::{WorkflowError, WorkflowStep};
use crate::workflow::store::SessionStore;

// ────────────────────────────────────────────────────────────────────────────
// Inputs / outputs
// ────────────────────────────────────────────────────────────────────────────

/// A resume file as received from the client.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub declared_mime: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeReceipt {
    pub file_details: FileDetails,
    pub characters: usize,
    pub step: WorkflowStep,
    pub step_number: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobCapture {
    pub job: JobRecord,
    pub step: WorkflowStep,
    pub step_number: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisResult {
    pub customized_resume: String,
    pub step: WorkflowStep,
    pub step_number: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 1: resume ingestion
// ────────────────────────────────────────────────────────────────────────────

pub async fn ingest_resume(
    store: &SessionStore,
    session_id: Uuid,
    upload: ResumeUpload,
) -> Result<ResumeReceipt, AppError> {
    store.snapshot(session_id).await?;

    let format = DocumentFormat::detect(upload.declared_mime.as_deref(), &upload.filename)
        .ok_or_else(|| {
            ExtractionError::UnsupportedFormat(
                upload
                    .declared_mime
                    .clone()
                    .unwrap_or_else(|| upload.filename.clone()),
            )
        })?;
    let file_details = FileDetails::new(
        &upload.filename,
        upload.bytes.len(),
        format,
        upload.declared_mime.as_deref(),
    );

    // CPU-bound parse runs on the blocking pool.
    let bytes = upload.bytes;
    let extracted = tokio::task::spawn_blocking(move || extract_text(format, &bytes))
        .await
        .map_err(|e| anyhow!("extraction task failed: {e}"))?;

    let text = match extracted {
        Ok(text) => text,
        Err(e) => {
            warn!(session_id = %session_id, file = %file_details.filename, "Resume extraction failed: {e}");
            return Err(e.into());
        }
    };

    let characters = text.chars().count();
    let artifact = ResumeArtifact {
        text,
        file: file_details.clone(),
    };
    let step = store
        .with_session(session_id, |s| Ok(s.record_resume(artifact)?))
        .await?;

    info!(
        session_id = %session_id,
        format = ?format,
        size = %file_details.size_label,
        characters,
        "Resume uploaded, step={step:?}"
    );

    Ok(ResumeReceipt {
        file_details,
        characters,
        step,
        step_number: step.number(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 2: job reference capture
// ────────────────────────────────────────────────────────────────────────────

/// Result of checking a job URL without touching any session.
#[derive(Debug, Clone, Serialize)]
pub struct JobUrlCheck {
    pub valid: bool,
    pub job_id: Option<String>,
}

pub fn check_job_url(policy: &JobUrlPolicy, raw_url: &str) -> JobUrlCheck {
    match policy.parse(raw_url) {
        Some(url) => JobUrlCheck {
            valid: true,
            job_id: extract_job_id(&url),
        },
        None => JobUrlCheck {
            valid: false,
            job_id: None,
        },
    }
}

pub async fn capture_job(
    store: &SessionStore,
    policy: &JobUrlPolicy,
    extractor: &dyn JobExtractor,
    session_id: Uuid,
    raw_url: &str,
) -> Result<JobCapture, AppError> {
    let session = store.snapshot(session_id).await?;
    if session.resume().is_none() {
        return Err(WorkflowError::MissingPrerequisite(
            "upload a resume before adding a job link".to_string(),
        )
        .into());
    }

    let url = policy.parse(raw_url).ok_or_else(|| {
        warn!(session_id = %session_id, "Rejected job URL: {raw_url}");
        AppError::InvalidJobUrl(format!(
            "Please enter a valid job posting URL on {}. Example URL format: {EXAMPLE_JOB_URL}",
            policy.allowed_hosts().join(" or ")
        ))
    })?;

    let job_id = extract_job_id(&url).ok_or_else(|| {
        AppError::InvalidJobUrl(format!(
            "Could not extract job ID from URL. Example URL format: {EXAMPLE_JOB_URL}"
        ))
    })?;

    let record = extractor.extract(&url, &job_id).await?;
    let step = store
        .with_session(session_id, |s| Ok(s.record_job(record.clone())?))
        .await?;

    info!(
        session_id = %session_id,
        job_id = %job_id,
        backend = extractor.backend(),
        "Job details captured, step={step:?}"
    );

    Ok(JobCapture {
        job: record,
        step,
        step_number: step.number(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Stage 3: synthesis + download
// ────────────────────────────────────────────────────────────────────────────

pub async fn synthesize_resume(
    store: &SessionStore,
    synthesizer: &dyn ResumeSynthesizer,
    session_id: Uuid,
) -> Result<SynthesisResult, AppError> {
    let result = store
        .with_session(session_id, |s| {
            let customized_resume = s.synthesize(synthesizer)?.to_string();
            let step = s.step();
            Ok(SynthesisResult {
                customized_resume,
                step,
                step_number: step.number(),
            })
        })
        .await?;

    info!(
        session_id = %session_id,
        bytes = result.customized_resume.len(),
        "Resume customized"
    );
    Ok(result)
}

/// Returns the last synthesized output for download.
pub async fn customized_resume(store: &SessionStore, session_id: Uuid) -> Result<String, AppError> {
    let session = store.snapshot(session_id).await?;
    session.output().map(str::to_string).ok_or_else(|| {
        WorkflowError::MissingPrerequisite(
            "generate the customized resume before downloading".to_string(),
        )
        .into()
    })
}
