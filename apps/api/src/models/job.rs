use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Structured job posting produced by the job reference capture stage.
///
/// Stored wholesale in the session and never edited in place: resubmitting a
/// job link replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_date: NaiveDate,
    pub description: String,
    /// Ordered; synthesis joins these verbatim.
    pub requirements: Vec<String>,
    pub keywords: Vec<String>,
}
