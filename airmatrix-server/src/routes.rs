//! Control API route definitions.

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Assemble the full panel router: API routes, health, embedded UI assets.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/plugin/fpp-AirPlayMatrix/status", get(handlers::status))
        .route("/plugin/fpp-AirPlayMatrix/start", post(handlers::start))
        .route("/plugin/fpp-AirPlayMatrix/stop", post(handlers::stop))
        .route(
            "/plugin/fpp-AirPlayMatrix/restart",
            post(handlers::restart),
        )
        .route(
            "/configfile/plugin.fpp-AirPlayMatrix.json",
            get(handlers::config_read).post(handlers::config_write),
        )
        .route("/overlays/models", get(handlers::overlay_models));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/app.js", get(handlers::app_js))
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
