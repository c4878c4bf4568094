mod config;
mod errors;
mod ingest;
mod job;
mod models;
mod routes;
mod state;
mod synthesis;
mod workflow;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::job::extractor::{JobExtractor, MockJobExtractor};
use crate::job::url_validator::JobUrlPolicy;
use crate::routes::build_router;
use crate::state::AppState;
use crate::synthesis::synthesizer::TemplateSynthesizer;
use crate::workflow::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeAI API v{}", env!("CARGO_PKG_VERSION"));

    let sessions = SessionStore::new(config.session_ttl);
    info!(
        "Session store initialized (idle TTL: {} min)",
        config.session_ttl.num_minutes()
    );

    let job_url_policy = JobUrlPolicy::new(&config.job_url_hosts);
    info!("Job URL allow-list: {:?}", job_url_policy.allowed_hosts());

    // Job source (MockJobExtractor until a real posting API is wired in)
    let job_extractor: Arc<dyn JobExtractor> = Arc::new(MockJobExtractor);
    info!("Job extractor backend: {}", job_extractor.backend());

    let state = AppState {
        config: config.clone(),
        sessions,
        job_url_policy,
        job_extractor,
        synthesizer: Arc::new(TemplateSynthesizer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the deployed frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
