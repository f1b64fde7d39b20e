//! HTTP answer service.
//!
//! Exposes the retrieval engine as a small JSON API so that web or chat
//! front-ends can call it once per user message.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check with catalog size and fingerprint |
//! | `POST` | `/respond` | Answer one message |
//! | `POST` | `/reload` | Re-read the catalog and rebuild the engine |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "threshold must be in [0.0, 1.0]" } }
//! ```
//!
//! Error codes: `bad_request` (400), `empty_corpus` (400), `not_ready` (503),
//! `internal` (500).
//!
//! # Concurrency
//!
//! Every request clones the current `Arc<RetrievalEngine>` out of a
//! `RwLock` and queries it without holding the lock. `/reload` builds the
//! replacement engine first and only then swaps the pointer, so in-flight
//! requests finish on the engine they started with.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use support_bot_core::engine::{QueryOptions, RetrievalEngine};
use support_bot_core::error::EngineError;
use support_bot_core::models;

use crate::bot::build_engine;
use crate::config::Config;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    engine: Arc<RwLock<Arc<RetrievalEngine>>>,
}

impl AppState {
    pub fn new(config: Config, engine: RetrievalEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// The engine serving new requests.
    fn current(&self) -> Result<Arc<RetrievalEngine>, AppError> {
        self.engine
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| internal("engine lock poisoned"))
    }

    fn replace(&self, engine: RetrievalEngine) -> Result<(), AppError> {
        let mut guard = self
            .engine
            .write()
            .map_err(|_| internal("engine lock poisoned"))?;
        *guard = Arc::new(engine);
        Ok(())
    }
}

/// Build the engine, then serve until the process is terminated.
///
/// The engine is built before the listener binds, so a broken catalog
/// never accepts a request.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let engine = build_engine(config)?;
    let bind_addr = config.server.bind.clone();
    let app = router(AppState::new(config.clone(), engine));

    info!(bind = %bind_addr, "support bot listening");
    println!("Support bot listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/respond", post(handle_respond))
        .route("/reload", post(handle_reload))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let (status, code) = match err {
            EngineError::EmptyCorpus => (StatusCode::BAD_REQUEST, "empty_corpus"),
            EngineError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
            EngineError::InvalidConfig(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };
        AppError {
            status,
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

/// Maps a failed reload to a response, preferring the engine's own error kind.
fn classify_reload_error(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<EngineError>() {
        Some(engine_err) => AppError {
            message: format!("{:#}", err),
            ..AppError::from(engine_err.clone())
        },
        None => bad_request(format!("{:#}", err)),
    }
}

// ============ GET /health ============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
    pub fingerprint: Option<String>,
}

pub async fn handle_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let engine = state.current()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: engine.corpus().map(|c| c.len()).unwrap_or(0),
        fingerprint: engine.fingerprint().map(str::to_string),
    }))
}

// ============ POST /respond ============

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub text: String,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub explain: bool,
}

pub async fn handle_respond(
    State(state): State<AppState>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<models::Response>, AppError> {
    if let Some(t) = req.threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(bad_request("threshold must be in [0.0, 1.0]"));
        }
    }

    let engine = state.current()?;
    let response = engine.query_with(
        &req.text,
        &QueryOptions {
            threshold: req.threshold,
            explain: req.explain,
        },
    )?;
    Ok(Json(response))
}

// ============ POST /reload ============

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub entries: usize,
    pub fingerprint: String,
    pub changed: bool,
}

pub async fn handle_reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let previous = state.current()?.fingerprint().map(str::to_string);

    let config = Arc::clone(&state.config);
    let engine = tokio::task::spawn_blocking(move || build_engine(&config))
        .await
        .map_err(|e| internal(format!("reload task failed: {}", e)))?
        .map_err(|e| {
            warn!(error = %format!("{:#}", e), "catalog reload failed; keeping current engine");
            classify_reload_error(e)
        })?;

    let fingerprint = engine.fingerprint().unwrap_or_default().to_string();
    let entries = engine.corpus().map(|c| c.len()).unwrap_or(0);
    let changed = previous.as_deref() != Some(fingerprint.as_str());

    state.replace(engine)?;
    info!(entries, fingerprint = %fingerprint, changed, "catalog reloaded");

    Ok(Json(ReloadResponse {
        entries,
        fingerprint,
        changed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use support_bot_core::engine::Responder;
    use tempfile::TempDir;

    fn state_with_catalog(tmp: &TempDir, json: &str) -> AppState {
        let path = tmp.path().join("faq.json");
        fs::write(&path, json).unwrap();
        let mut config = Config::default();
        config.catalog.path = Some(path);
        let engine = build_engine(&config).unwrap();
        AppState::new(config, engine)
    }

    #[tokio::test]
    async fn test_health_reports_catalog() {
        let state = AppState::new(Config::default(), build_engine(&Config::default()).unwrap());
        let Json(health) = handle_health(State(state)).await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.entries, 37);
        assert_eq!(health.fingerprint.map(|f| f.len()), Some(64));
    }

    #[tokio::test]
    async fn test_respond_match_and_fallback() {
        let tmp = TempDir::new().unwrap();
        let state = state_with_catalog(&tmp, r#"[{"question": "Coupon codes", "answer": "WELCOME10"}]"#);

        let Json(hit) = handle_respond(
            State(state.clone()),
            Json(RespondRequest {
                text: "coupon codes".to_string(),
                threshold: None,
                explain: false,
            }),
        )
        .await
        .unwrap();
        assert_eq!(hit.answer, "WELCOME10");
        assert_eq!(hit.matched, Some(0));

        let Json(miss) = handle_respond(
            State(state),
            Json(RespondRequest {
                text: "zzz".to_string(),
                threshold: None,
                explain: true,
            }),
        )
        .await
        .unwrap();
        assert!(miss.is_fallback());
        assert!(miss.explain.is_some());
    }

    #[tokio::test]
    async fn test_respond_rejects_bad_threshold() {
        let state = AppState::new(Config::default(), build_engine(&Config::default()).unwrap());
        let err = handle_respond(
            State(state),
            Json(RespondRequest {
                text: "hi".to_string(),
                threshold: Some(2.0),
                explain: false,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_catalog() {
        let tmp = TempDir::new().unwrap();
        let state = state_with_catalog(&tmp, r#"[{"question": "Hello", "answer": "Hi!"}]"#);
        fs::write(
            tmp.path().join("faq.json"),
            r#"[{"question": "Current sales", "answer": "See Deals."}]"#,
        )
        .unwrap();

        let Json(reload) = handle_reload(State(state.clone())).await.unwrap();
        assert!(reload.changed);
        assert_eq!(reload.entries, 1);

        let engine = state.current().unwrap();
        assert_eq!(engine.respond("current sales").unwrap().answer, "See Deals.");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_engine() {
        let tmp = TempDir::new().unwrap();
        let state = state_with_catalog(&tmp, r#"[{"question": "Hello", "answer": "Hi!"}]"#);
        fs::write(tmp.path().join("faq.json"), "[]").unwrap();

        let err = handle_reload(State(state.clone())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "empty_corpus");

        let engine = state.current().unwrap();
        assert_eq!(engine.respond("hello").unwrap().answer, "Hi!");
    }

    #[test]
    fn test_engine_error_mapping() {
        assert_eq!(AppError::from(EngineError::NotReady).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::from(EngineError::EmptyCorpus).code(), "empty_corpus");
    }
}
