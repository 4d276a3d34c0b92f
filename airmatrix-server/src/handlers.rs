//! Control API handlers.
//!
//! Every plugin endpoint answers 200 with a fully-formed body; daemon
//! failures travel inside `message`/`ok` fields. The exceptions are config
//! writes (backing storage may genuinely be unwritable) and the overlay
//! model relay (the host API may be down), which answer error statuses
//! with plain diagnostic text.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::spawn_blocking;

use airmatrix_core::types::ConfigPatch;
use airmatrix_core::{ActionResult, Config, LifecycleAction, Status};

use crate::models::fetch_models;
use crate::state::AppState;

static INDEX_HTML: &str = include_str!("../web/index.html");
static APP_JS: &str = include_str!("../web/app.js");

// ---------------------------------------------------------------------------
// Panel assets
// ---------------------------------------------------------------------------

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub async fn status(State(state): State<AppState>) -> Json<Status> {
    let supervisor = state.supervisor.clone();
    let status = match spawn_blocking(move || supervisor.status()).await {
        Ok(status) => status,
        Err(err) => {
            let mut fallback = Status::seeded(&Config::default());
            fallback.message = format!("status worker failed: {err}");
            fallback
        }
    };
    Json(status)
}

// ---------------------------------------------------------------------------
// Lifecycle actions
// ---------------------------------------------------------------------------

pub async fn start(State(state): State<AppState>) -> Json<ActionResult> {
    run_action(state, LifecycleAction::Start).await
}

pub async fn stop(State(state): State<AppState>) -> Json<ActionResult> {
    run_action(state, LifecycleAction::Stop).await
}

pub async fn restart(State(state): State<AppState>) -> Json<ActionResult> {
    run_action(state, LifecycleAction::Restart).await
}

async fn run_action(state: AppState, action: LifecycleAction) -> Json<ActionResult> {
    // Held across the whole dispatch: one in-flight action at a time.
    let _serialized = state.action_lock.lock().await;

    let supervisor = state.supervisor.clone();
    let result = match spawn_blocking(move || supervisor.dispatch(action)).await {
        Ok(result) => result,
        Err(err) => ActionResult {
            ok: false,
            action: action.verb().to_string(),
            message: format!("action worker failed: {err}"),
            rc: -1,
        },
    };
    Json(result)
}

// ---------------------------------------------------------------------------
// Config storage endpoint
// ---------------------------------------------------------------------------

pub async fn config_read(State(state): State<AppState>) -> Json<Config> {
    let supervisor = state.supervisor.clone();
    let config = match spawn_blocking(move || supervisor.config()).await {
        Ok(config) => config,
        Err(_) => Config::default(),
    };
    Json(config)
}

pub async fn config_write(
    State(state): State<AppState>,
    Json(patch): Json<ConfigPatch>,
) -> Response {
    let supervisor = state.supervisor.clone();
    let saved = spawn_blocking(move || supervisor.save_config(&Config::merged(patch))).await;
    match saved {
        Ok(Ok(config)) => Json(config).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "config save failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("config worker failed: {err}"),
        )
            .into_response(),
    }
}

// ---------------------------------------------------------------------------
// Overlay-model registry relay
// ---------------------------------------------------------------------------

pub async fn overlay_models(State(state): State<AppState>) -> Response {
    let base = state.host_api_base.clone();
    match spawn_blocking(move || fetch_models(&base)).await {
        Ok(Ok(models)) => Json(models).into_response(),
        Ok(Err(err)) => (StatusCode::BAD_GATEWAY, err.to_string()).into_response(),
        Err(err) => (
            StatusCode::BAD_GATEWAY,
            format!("model fetch worker failed: {err}"),
        )
            .into_response(),
    }
}
