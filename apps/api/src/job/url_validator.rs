//! Job URL checks. Pure string/URL inspection; no request is ever made to the host.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

pub const EXAMPLE_JOB_URL: &str = "https://www.linkedin.com/jobs/view/123456789";

const REQUIRED_PATH_SEGMENT: &str = "jobs";

/// Path shapes that carry a numeric job id, tried in order.
fn job_id_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [r"jobs/view/(\d+)", r"jobs/(\d+)", r"viewJob/(\d+)"]
            .iter()
            .map(|p| Regex::new(p).expect("static regex is valid"))
            .collect()
    })
}

/// Host allow-list plus the path rule a job posting URL must satisfy.
#[derive(Debug, Clone)]
pub struct JobUrlPolicy {
    allowed_hosts: Vec<String>,
}

impl JobUrlPolicy {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    /// Parses `raw` and returns it only if it passes the allow-list.
    pub fn parse(&self, raw: &str) -> Option<Url> {
        let url = Url::parse(raw.trim()).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }

        let host = url.host_str()?.to_ascii_lowercase();
        if !self.allowed_hosts.iter().any(|h| *h == host) {
            return None;
        }

        let has_jobs_segment = url
            .path_segments()
            .map(|mut segments| segments.any(|s| s.eq_ignore_ascii_case(REQUIRED_PATH_SEGMENT)))
            .unwrap_or(false);
        has_jobs_segment.then_some(url)
    }

    /// True only for URLs on an allow-listed host whose path has a `jobs` segment.
    pub fn is_valid(&self, raw: &str) -> bool {
        self.parse(raw).is_some()
    }
}

impl Default for JobUrlPolicy {
    fn default() -> Self {
        Self::new(["www.linkedin.com", "linkedin.com"])
    }
}

/// Pulls the numeric job id out of a posting URL.
///
/// Path patterns win; otherwise a numeric `currentJobId` query parameter is used.
pub fn extract_job_id(url: &Url) -> Option<String> {
    let path = url.path();
    for pattern in job_id_patterns() {
        if let Some(caps) = pattern.captures(path) {
            return Some(caps[1].to_string());
        }
    }

    url.query_pairs()
        .find(|(key, _)| key == "currentJobId")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_posting_url_is_valid() {
        let policy = JobUrlPolicy::default();
        assert!(policy.is_valid(EXAMPLE_JOB_URL));
        assert!(policy.is_valid("https://linkedin.com/jobs/view/42"));
        assert!(policy.is_valid("http://www.linkedin.com/Jobs/view/42"));
    }

    #[test]
    fn test_other_hosts_are_rejected() {
        let policy = JobUrlPolicy::default();
        assert!(!policy.is_valid("https://example.com/jobs/1"));
        assert!(!policy.is_valid("https://evil-linkedin.com/jobs/view/1"));
        assert!(!policy.is_valid("https://www.linkedin.com.evil.io/jobs/view/1"));
        assert!(!policy.is_valid("https://uk.linkedin.com/jobs/view/1"));
    }

    #[test]
    fn test_path_without_jobs_segment_is_rejected() {
        let policy = JobUrlPolicy::default();
        assert!(!policy.is_valid("https://www.linkedin.com/in/jane-doe"));
        assert!(!policy.is_valid("https://www.linkedin.com/"));
        assert!(!policy.is_valid("https://www.linkedin.com/myjobsfeed/1"));
    }

    #[test]
    fn test_garbage_and_other_schemes_are_rejected() {
        let policy = JobUrlPolicy::default();
        assert!(!policy.is_valid(""));
        assert!(!policy.is_valid("not a url"));
        assert!(!policy.is_valid("www.linkedin.com/jobs/view/1"));
        assert!(!policy.is_valid("ftp://www.linkedin.com/jobs/view/1"));
    }

    #[test]
    fn test_custom_allow_list() {
        let policy = JobUrlPolicy::new([" Jobs.Example.com ", ""]);
        assert_eq!(policy.allowed_hosts(), ["jobs.example.com".to_string()]);
        assert!(policy.is_valid("https://jobs.example.com/jobs/7"));
        assert!(!policy.is_valid(EXAMPLE_JOB_URL));
    }

    #[test]
    fn test_extract_job_id_from_path_formats() {
        let id = |raw: &str| extract_job_id(&Url::parse(raw).unwrap());
        assert_eq!(id(EXAMPLE_JOB_URL).as_deref(), Some("123456789"));
        assert_eq!(id("https://www.linkedin.com/jobs/987").as_deref(), Some("987"));
        assert_eq!(
            id("https://www.linkedin.com/jobs/viewJob/555").as_deref(),
            Some("555")
        );
        assert_eq!(
            id("https://www.linkedin.com/jobs/view/123/?trk=abc").as_deref(),
            Some("123")
        );
    }

    #[test]
    fn test_extract_job_id_from_query() {
        let url = Url::parse("https://www.linkedin.com/jobs/search/?currentJobId=3141&keywords=rust")
            .unwrap();
        assert_eq!(extract_job_id(&url).as_deref(), Some("3141"));

        let bad = Url::parse("https://www.linkedin.com/jobs/search/?currentJobId=abc").unwrap();
        assert_eq!(extract_job_id(&bad), None);
    }

    #[test]
    fn test_extract_job_id_missing() {
        let url = Url::parse("https://www.linkedin.com/jobs/collections/recommended").unwrap();
        assert_eq!(extract_job_id(&url), None);
    }
}
