mod catalog;
mod config;
mod errors;
mod llm_client;
mod models;
mod processing;
mod routes;
mod sessions;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::processing::{LlmReasonGenerator, ReasonGenerator, StaticReasonGenerator};
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Malformed env vars fail startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Load the listing dataset; a failed load still serves, with an empty catalog
    let catalog = Arc::new(Catalog::load(&config.dataset_path));

    // Reason generator (static by default, LLM via ENABLE_LLM_REASONS)
    let reason_generator: Arc<dyn ReasonGenerator> = if config.enable_llm_reasons {
        let llm = LlmClient::new()?;
        info!("LLM client initialized (model: {})", llm_client::MODEL);
        Arc::new(LlmReasonGenerator(llm))
    } else {
        Arc::new(StaticReasonGenerator)
    };
    info!("Reason generator: {}", reason_generator.backend());

    let state = AppState {
        catalog,
        sessions: SessionStore::new(),
        config: config.clone(),
        reason_generator,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
