//! Workflow state machine: one user's Upload → Job Link → Customize run.
//!
//! Steps only move forward: `AwaitingResume → AwaitingJob → ReadyToSynthesize → Complete`.
//! Resubmitting an earlier stage replaces that stage's artifact in place and
//! leaves the step where it is. Any synthesized output is dropped at that point
//! because it no longer matches the stored inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::JobRecord;
use crate::models::resume::{FileDetails, ResumeArtifact};
use crate::synthesis::synthesizer::ResumeSynthesizer;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please complete the previous steps first: {0}")]
    MissingPrerequisite(String),

    #[error("Resume text is empty")]
    EmptyResume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStep {
    AwaitingResume,
    AwaitingJob,
    ReadyToSynthesize,
    Complete,
}

impl WorkflowStep {
    /// 1-based position in the pipeline, as shown to users.
    pub fn number(&self) -> u8 {
        match self {
            WorkflowStep::AwaitingResume => 1,
            WorkflowStep::AwaitingJob => 2,
            WorkflowStep::ReadyToSynthesize => 3,
            WorkflowStep::Complete => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    step: WorkflowStep,
    resume: Option<ResumeArtifact>,
    job: Option<JobRecord>,
    output: Option<String>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: WorkflowStep::AwaitingResume,
            resume: None,
            job: None,
            output: None,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn resume(&self) -> Option<&ResumeArtifact> {
        self.resume.as_ref()
    }

    pub fn job(&self) -> Option<&JobRecord> {
        self.job.as_ref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Stores extracted resume text. Advances `AwaitingResume → AwaitingJob`.
    pub fn record_resume(&mut self, resume: ResumeArtifact) -> Result<WorkflowStep, WorkflowError> {
        if resume.text.trim().is_empty() {
            return Err(WorkflowError::EmptyResume);
        }

        self.resume = Some(resume);
        self.output = None;
        self.advance_from(WorkflowStep::AwaitingResume, WorkflowStep::AwaitingJob);
        Ok(self.step)
    }

    /// Stores a captured job record. Advances `AwaitingJob → ReadyToSynthesize`.
    pub fn record_job(&mut self, job: JobRecord) -> Result<WorkflowStep, WorkflowError> {
        if self.resume.is_none() {
            return Err(WorkflowError::MissingPrerequisite(
                "upload a resume before adding a job link".to_string(),
            ));
        }

        self.job = Some(job);
        self.output = None;
        self.advance_from(WorkflowStep::AwaitingJob, WorkflowStep::ReadyToSynthesize);
        Ok(self.step)
    }

    /// Runs synthesis over the stored artifacts and keeps the result.
    /// Advances `ReadyToSynthesize → Complete`; re-running in `Complete` stays there.
    pub fn synthesize(&mut self, synthesizer: &dyn ResumeSynthesizer) -> Result<&str, WorkflowError> {
        let (resume, job) = match (&self.resume, &self.job) {
            (Some(resume), Some(job)) => (resume, job),
            (None, _) => {
                return Err(WorkflowError::MissingPrerequisite(
                    "upload a resume and add a job link before customizing".to_string(),
                ))
            }
            (Some(_), None) => {
                return Err(WorkflowError::MissingPrerequisite(
                    "add a job link before customizing".to_string(),
                ))
            }
        };

        let output = synthesizer.synthesize(&resume.text, job);
        self.advance_from(WorkflowStep::ReadyToSynthesize, WorkflowStep::Complete);
        Ok(self.output.insert(output).as_str())
    }

    fn advance_from(&mut self, from: WorkflowStep, to: WorkflowStep) {
        if self.step == from {
            self.step = to;
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            step: self.step,
            step_number: self.step.number(),
            file_details: self.resume.as_ref().map(|r| r.file.clone()),
            job: self.job.clone(),
            has_output: self.output.is_some(),
            created_at: self.created_at,
            last_activity: self.last_activity,
        }
    }
}

/// Client-facing snapshot of a session. The resume text itself is not echoed.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub step: WorkflowStep,
    pub step_number: u8,
    pub file_details: Option<FileDetails>,
    pub job: Option<JobRecord>,
    pub has_output: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::synthesis::synthesizer::TemplateSynthesizer;

    fn new_session() -> Session {
        Session::new(Utc::now())
    }

    #[test]
    fn test_new_session_awaits_resume() {
        let session = new_session();
        assert_eq!(session.step(), WorkflowStep::AwaitingResume);
        assert!(session.resume().is_none());
        assert!(session.job().is_none());
        assert!(session.output().is_none());
    }

    #[test]
    fn test_full_forward_run() {
        let mut session = new_session();
        assert_eq!(
            session.record_resume(resume("Jane Doe")).unwrap(),
            WorkflowStep::AwaitingJob
        );
        assert_eq!(
            session.record_job(job("Senior Software Engineer")).unwrap(),
            WorkflowStep::ReadyToSynthesize
        );
        let output = session.synthesize(&TemplateSynthesizer).unwrap().to_string();
        assert!(output.contains("Senior Software Engineer"));
        assert_eq!(session.step(), WorkflowStep::Complete);
        assert_eq!(session.output(), Some(output.as_str()));
    }

    #[test]
    fn test_empty_resume_does_not_advance() {
        let mut session = new_session();
        let err = session.record_resume(resume("  \n ")).unwrap_err();
        assert!(matches!(err, WorkflowError::EmptyResume));
        assert_eq!(session.step(), WorkflowStep::AwaitingResume);
        assert!(session.resume().is_none());
    }

    #[test]
    fn test_job_before_resume_is_rejected() {
        let mut session = new_session();
        let err = session.record_job(job("Engineer")).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingPrerequisite(_)));
        assert_eq!(session.step(), WorkflowStep::AwaitingResume);
        assert!(session.job().is_none());
    }

    #[test]
    fn test_synthesis_without_job_produces_nothing() {
        let mut session = new_session();
        session.record_resume(resume("Jane Doe")).unwrap();
        let err = session.synthesize(&TemplateSynthesizer).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingPrerequisite(_)));
        assert_eq!(session.step(), WorkflowStep::AwaitingJob);
        assert!(session.output().is_none());
    }

    #[test]
    fn test_synthesis_on_fresh_session_is_rejected() {
        let mut session = new_session();
        assert!(session.synthesize(&TemplateSynthesizer).is_err());
        assert_eq!(session.step(), WorkflowStep::AwaitingResume);
    }

    #[test]
    fn test_reupload_replaces_resume_without_moving_step() {
        let mut session = new_session();
        session.record_resume(resume("first")).unwrap();
        session.record_job(job("Engineer")).unwrap();

        let step = session.record_resume(resume("second")).unwrap();
        assert_eq!(step, WorkflowStep::ReadyToSynthesize);
        assert_eq!(session.resume().unwrap().text, "second");
        assert!(session.job().is_some());
    }

    #[test]
    fn test_reupload_after_complete_clears_output() {
        let mut session = new_session();
        session.record_resume(resume("first")).unwrap();
        session.record_job(job("Engineer")).unwrap();
        session.synthesize(&TemplateSynthesizer).unwrap();

        session.record_resume(resume("second")).unwrap();
        assert_eq!(session.step(), WorkflowStep::Complete);
        assert!(session.output().is_none());

        let output = session.synthesize(&TemplateSynthesizer).unwrap();
        assert!(output.contains("second"));
        assert_eq!(session.step(), WorkflowStep::Complete);
    }

    #[test]
    fn test_resubmitting_job_replaces_record() {
        let mut session = new_session();
        session.record_resume(resume("Jane")).unwrap();
        session.record_job(job("Engineer")).unwrap();
        session.record_job(job("Staff Engineer")).unwrap();
        assert_eq!(session.job().unwrap().title, "Staff Engineer");
        assert_eq!(session.step(), WorkflowStep::ReadyToSynthesize);
    }

    #[test]
    fn test_step_numbers_and_order() {
        assert_eq!(WorkflowStep::AwaitingResume.number(), 1);
        assert_eq!(WorkflowStep::Complete.number(), 4);
        assert!(WorkflowStep::AwaitingJob < WorkflowStep::ReadyToSynthesize);
    }

    #[test]
    fn test_step_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&WorkflowStep::ReadyToSynthesize).unwrap();
        assert_eq!(json, r#""READY_TO_SYNTHESIZE""#);
    }

    #[test]
    fn test_view_hides_resume_text() {
        let mut session = new_session();
        session.record_resume(resume("secret text")).unwrap();
        let json = serde_json::to_string(&session.view()).unwrap();
        assert!(!json.contains("secret text"));
        assert!(json.contains("resume.pdf"));
    }
}
