//! Control API tests over the assembled router, no listener bound.

use std::sync::Arc;

use airmatrix_core::{ConfigStore, PlatformPaths};
use airmatrix_server::{router, AppState};
use airmatrix_supervisor::{CommandRunner, Supervisor};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn app_for(media_dir: &std::path::Path) -> Router {
    let paths = PlatformPaths::from_media_dir(media_dir);
    let supervisor = Supervisor::from_parts(
        ConfigStore::new(&paths),
        CommandRunner::new(paths.clone()).sudo_candidates(Vec::new()),
    );
    router(AppState::new(
        Arc::new(supervisor),
        "http://127.0.0.1:1/api".to_string(),
    ))
}

#[cfg(unix)]
fn install_script(media_dir: &std::path::Path, body: &str) {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    let script_dir = media_dir
        .join("plugins")
        .join("fpp-AirPlayMatrix")
        .join("scripts");
    fs::create_dir_all(&script_dir).expect("mkdir");
    let script = script_dir.join("airplay_matrix_manager.sh");
    fs::write(&script, format!("#!/bin/sh\n{body}\n")).expect("write script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_always_answers_ok() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(dir.path());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["healthy"], serde_json::json!(true));
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn panel_assets_are_served() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(dir.path());

    let index = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(index.status(), StatusCode::OK);

    let js = app
        .oneshot(Request::get("/app.js").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(js.status(), StatusCode::OK);
    let content_type = js
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("content-type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/javascript"));
}

#[tokio::test]
async fn config_read_answers_defaults_when_nothing_persisted() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::get("/api/configfile/plugin.fpp-AirPlayMatrix.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["airplay_name"], "FPP AirPlay Matrix");
    assert_eq!(json["fps"], 20);
    assert_eq!(json["enabled"], serde_json::json!(true));
}

#[tokio::test]
async fn config_write_normalizes_and_persists() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(dir.path());

    let body = serde_json::json!({
        "enabled": false,
        "airplay_name": "  Garden Wall  ",
        "model_name": "   ",
        "fps": 24,
        "unexpected": "dropped",
    });
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/configfile/plugin.fpp-AirPlayMatrix.json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert_eq!(saved["airplay_name"], "Garden Wall");
    assert_eq!(saved["model_name"], "Matrix");
    assert_eq!(saved["enabled"], serde_json::json!(false));
    assert!(saved.get("unexpected").is_none());

    let reread = app
        .oneshot(
            Request::get("/api/configfile/plugin.fpp-AirPlayMatrix.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");
    let json = body_json(reread).await;
    assert_eq!(json["fps"], 24);
    assert_eq!(json["airplay_name"], "Garden Wall");
}

#[cfg(unix)]
#[tokio::test]
async fn status_endpoint_reflects_manager_reply() {
    let dir = TempDir::new().expect("tempdir");
    install_script(
        dir.path(),
        r#"printf '%s' '{"running": true, "pid": 777}'"#,
    );
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::get("/api/plugin/fpp-AirPlayMatrix/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["running"], serde_json::json!(true));
    assert_eq!(json["pid"], serde_json::json!(777));
    assert_eq!(json["airplay_name"], "FPP AirPlay Matrix");
    assert_eq!(json["message"], "");
}

#[cfg(unix)]
#[tokio::test]
async fn status_endpoint_stays_well_formed_when_script_is_missing() {
    let dir = TempDir::new().expect("tempdir");
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::get("/api/plugin/fpp-AirPlayMatrix/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    // Still 200: a missing manager is a daemon-state fact, not an API error.
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["running"], serde_json::json!(false));
    assert!(json["pid"].is_null());
    assert_ne!(json["message"], "");
}

#[cfg(unix)]
#[tokio::test]
async fn start_endpoint_synthesizes_message_for_silent_success() {
    let dir = TempDir::new().expect("tempdir");
    install_script(dir.path(), "exit 0");
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::post("/api/plugin/fpp-AirPlayMatrix/start")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], serde_json::json!(true));
    assert_eq!(json["action"], "Start");
    assert_eq!(json["message"], "Start complete");
    assert_eq!(json["rc"], 0);
}

#[cfg(unix)]
#[tokio::test]
async fn stop_endpoint_reports_failure_in_body_not_status() {
    let dir = TempDir::new().expect("tempdir");
    install_script(dir.path(), "exit 2");
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::post("/api/plugin/fpp-AirPlayMatrix/stop")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ok"], serde_json::json!(false));
    assert_eq!(json["message"], "Stop failed");
    assert_eq!(json["rc"], 2);
}

#[tokio::test]
async fn overlay_model_relay_degrades_to_bad_gateway() {
    let dir = TempDir::new().expect("tempdir");
    // host_api_base points at a closed port
    let app = app_for(dir.path());

    let response = app
        .oneshot(
            Request::get("/api/overlays/models")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
