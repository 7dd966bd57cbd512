use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::processing::ReasonGenerator;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only listing dataset, loaded once at startup.
    pub catalog: Arc<Catalog>,
    pub sessions: SessionStore,
    pub config: Config,
    /// Pluggable reason generator. Default: StaticReasonGenerator. Swap via ENABLE_LLM_REASONS.
    pub reason_generator: Arc<dyn ReasonGenerator>,
}
