//! Job extraction: pluggable, trait-based source of `JobRecord`s.
//!
//! Default: `MockJobExtractor` (canned posting, no network).
//! `AppState` holds an `Arc<dyn JobExtractor>`, so a real posting API client can
//! replace it at startup without touching handlers or the workflow state machine.

use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::errors::AppError;
use crate::models::job::JobRecord;

/// Implement this to swap job sources. Callers have already validated `url`
/// against the host allow-list and extracted `job_id` from it.
#[async_trait]
pub trait JobExtractor: Send + Sync {
    async fn extract(&self, url: &Url, job_id: &str) -> Result<JobRecord, AppError>;

    /// Short backend name, surfaced in logs.
    fn backend(&self) -> &'static str;
}

const MOCK_DESCRIPTION: &str = "\
We are looking for a Senior Software Engineer with expertise in:
- Python development
- Machine Learning
- Cloud Infrastructure
- API Development
- Database Management

Key Responsibilities:
- Design and implement scalable solutions
- Lead technical projects
- Mentor junior developers
- Collaborate with cross-functional teams";

const MOCK_REQUIREMENTS: &[&str] = &[
    "Python",
    "Machine Learning",
    "Cloud Infrastructure",
    "API Development",
    "Database Management",
];

const MOCK_KEYWORDS: &[&str] = &[
    "Python",
    "Machine Learning",
    "AWS",
    "REST APIs",
    "PostgreSQL",
    "Team Leadership",
];

/// Returns the same sample posting for every job id. `posted_date` is the capture date.
pub struct MockJobExtractor;

#[async_trait]
impl JobExtractor for MockJobExtractor {
    async fn extract(&self, _url: &Url, job_id: &str) -> Result<JobRecord, AppError> {
        Ok(JobRecord {
            job_id: job_id.to_string(),
            title: "Senior Software Engineer".to_string(),
            company: "Tech Solutions Inc.".to_string(),
            location: "San Francisco, CA (Remote)".to_string(),
            posted_date: Utc::now().date_naive(),
            description: MOCK_DESCRIPTION.to_string(),
            requirements: MOCK_REQUIREMENTS.iter().map(|s| s.to_string()).collect(),
            keywords: MOCK_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
