//! HTTP routes
//!
//! Status page, static assets, health, and the diagnostic endpoints that log
//! an event at a fixed severity and forward it to the collector.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        StatusCode,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use collector_client::{EventDispatcher, Severity};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::platform::StatusIndex;
use crate::status_page;

/// Status returned by `/warn`. Non-standard, kept for existing clients.
///
/// hyper's HTTP/1 encoder refuses 1xx final responses and replaces them with
/// an empty `500`, so clients on a real socket never see this code or a body.
pub const WARN_STATUS: u16 = 199;

/// Ends the process for `/kill`
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Exits the real process
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

#[derive(Clone)]
pub struct AppState {
    dispatcher: EventDispatcher,
    index: Arc<StatusIndex>,
    static_dir: PathBuf,
    terminator: Arc<dyn Terminator>,
}

impl AppState {
    pub fn new(
        dispatcher: EventDispatcher,
        index: StatusIndex,
        static_dir: impl Into<PathBuf>,
        terminator: Arc<dyn Terminator>,
    ) -> Self {
        Self {
            dispatcher,
            index: Arc::new(index),
            static_dir: static_dir.into(),
            terminator,
        }
    }
}

/// Body of every diagnostic response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResponse {
    #[serde(rename = "Response")]
    pub response: String,
}

/// The three diagnostic endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    Ping,
    Warn,
    Error,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Ping => Severity::Info,
            Diagnostic::Warn => Severity::Warn,
            Diagnostic::Error => Severity::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Diagnostic::Ping => "OK application successfully pinged",
            Diagnostic::Warn => "OK Warn generated",
            Diagnostic::Error => "OK Error generated",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Diagnostic::Ping => StatusCode::OK,
            // 199 is inside the range StatusCode accepts, so this never falls back
            Diagnostic::Warn => StatusCode::from_u16(WARN_STATUS).unwrap_or(StatusCode::OK),
            Diagnostic::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Diagnostic::Ping => "OK",
            Diagnostic::Warn => "WARNING",
            Diagnostic::Error => "ERROR",
        }
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(status_index))
        .route("/health", get(health_check))
        .route("/ping", get(diag_ping))
        .route("/warn", get(diag_warn))
        .route("/error", get(diag_error))
        .route("/kill", get(kill))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "status-app",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn status_index(State(state): State<AppState>) -> impl IntoResponse {
    (
        [
            (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (PRAGMA, "no-cache"),
            (EXPIRES, "0"),
        ],
        Html(status_page::render(&state.index)),
    )
}

async fn diag_ping(State(state): State<AppState>) -> Response {
    report(&state, Diagnostic::Ping)
}

async fn diag_warn(State(state): State<AppState>) -> Response {
    report(&state, Diagnostic::Warn)
}

async fn diag_error(State(state): State<AppState>) -> Response {
    report(&state, Diagnostic::Error)
}

/// Log and forward the event, then answer without waiting on the collector.
/// The status code never depends on the forwarding outcome.
fn report(state: &AppState, diagnostic: Diagnostic) -> Response {
    let _ = state
        .dispatcher
        .report(diagnostic.severity(), diagnostic.message());

    let status = diagnostic.status();
    if status.is_informational() {
        warn!(
            status = status.as_u16(),
            "1xx final status cannot be sent over HTTP/1, clients will receive an empty 500"
        );
    }

    let body = DiagnosticResponse {
        response: format!(
            "{}:{} event dispatched to collector",
            diagnostic.prefix(),
            state.dispatcher.sources().app_name
        ),
    };

    (status, Json(body)).into_response()
}

async fn kill(State(state): State<AppState>) -> StatusCode {
    error!("force kill");
    state.terminator.terminate(1);
    StatusCode::OK
}
