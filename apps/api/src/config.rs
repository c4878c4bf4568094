use anyhow::{Context, Result};
use chrono::Duration;

const DEFAULT_JOB_URL_HOSTS: &str = "www.linkedin.com,linkedin.com";

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body cap for resume uploads.
    pub max_upload_bytes: usize,
    /// Idle time after which a session is discarded.
    pub session_ttl: Duration,
    pub job_url_hosts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ttl_minutes = parse_or(&lookup, "SESSION_TTL_MINUTES", 60_i64)?;
        if ttl_minutes <= 0 {
            anyhow::bail!("SESSION_TTL_MINUTES must be positive, got {ttl_minutes}");
        }
        let session_ttl = Duration::try_minutes(ttl_minutes)
            .with_context(|| format!("SESSION_TTL_MINUTES is out of range: {ttl_minutes}"))?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_ttl,
            job_url_hosts: lookup("JOB_URL_HOSTS")
                .unwrap_or_else(|| DEFAULT_JOB_URL_HOSTS.to_string())
                .split(',')
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
