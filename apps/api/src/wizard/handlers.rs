//! Axum route handlers for the session API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::processing::{run_processing, ProcessingRequest};
use crate::state::AppState;
use crate::wizard::{render, Action, Effect, PageView, SessionState, Signal, Transition};

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: PageView,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub session_id: Uuid,
    pub view: PageView,
    pub signal: Option<Signal>,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, session) = state.sessions.create().await;
    info!("Session {session_id} created");
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            view: render(&session, &state.catalog),
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(SessionResponse {
        session_id,
        view: render(&session, &state.catalog),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id).await {
        info!("Session {session_id} closed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(session_id))
    }
}

/// POST /api/v1/sessions/:id/actions
///
/// Applies one action. When the transition asks for processing, the stages
/// run here (without holding the session lock) and their completion is
/// applied before responding.
pub async fn handle_action(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    payload: Result<Json<Action>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(action) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let action_name = action.name();
    let t = state
        .sessions
        .apply(session_id, action, &state.catalog)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    info!(
        "Session {session_id}: {action_name} -> {:?}{}",
        t.state.page,
        if t.signal.as_ref().is_some_and(Signal::is_blocked) {
            " (blocked)"
        } else {
            ""
        }
    );

    let mut session = t.state;
    let mut signal = t.signal;

    if let Some(Effect::RunProcessing { run }) = t.effect {
        let done = process(&state, session_id, run, &session).await?;
        session = done.state;
        // A session restarted mid-processing rejects the stale completion
        // and keeps its new page.
        signal = done.signal.filter(|s| !s.is_blocked()).or(signal);
    }

    Ok(Json(ActionResponse {
        session_id,
        view: render(&session, &state.catalog),
        signal,
    }))
}

/// Runs the processing stages for a session snapshot and feeds the result back,
/// tagged with `run`. Runs on a spawned task so a dropped request still
/// completes the session.
async fn process(
    state: &AppState,
    session_id: Uuid,
    run: Uuid,
    session: &SessionState,
) -> Result<Transition, AppError> {
    let credential = session.credential.clone().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("processing started without credential"))
    })?;

    let request = ProcessingRequest {
        profile: session.profile.clone(),
        credential,
        listings: state.catalog.all().to_vec(),
    };

    let generator = state.reason_generator.clone();
    let delay = state.config.processing_stage_delay;
    let sessions = state.sessions.clone();
    let catalog = state.catalog.clone();

    let task = tokio::spawn(async move {
        let report = run_processing(request, generator, delay).await;
        let action = Action::ProcessingComplete {
            run,
            reasons: report.reasons,
        };
        sessions.apply(session_id, action, &catalog).await
    });

    task.await
        .map_err(|e| AppError::Internal(e.into()))?
        .ok_or_else(|| session_not_found(session_id))
}
