use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus dataset and session counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "listings": state.catalog.len(),
        "dataset_error": state.catalog.load_error(),
        "active_sessions": state.sessions.len().await,
    }))
}
