use std::sync::Arc;

use crate::config::Config;
use crate::job::extractor::JobExtractor;
use crate::job::url_validator::JobUrlPolicy;
use crate::synthesis::synthesizer::ResumeSynthesizer;
use crate::workflow::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Per-user workflow sessions. In memory only.
    pub sessions: SessionStore,
    pub job_url_policy: JobUrlPolicy,
    /// Pluggable job source. Default: MockJobExtractor.
    pub job_extractor: Arc<dyn JobExtractor>,
    /// Pluggable resume synthesizer. Default: TemplateSynthesizer.
    pub synthesizer: Arc<dyn ResumeSynthesizer>,
}
