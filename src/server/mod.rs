//! HTTP API for `helpdesk`.
//!
//! Routes:
//! - `GET /` - liveness message
//! - `GET /tickets?method=...` - reads
//! - `POST /tickets?method=...` - writes
//!
//! Request logging, CORS and the body size limit are tower layers around the
//! router.

pub mod error;
pub mod tickets;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::config::Config;
use crate::{JsonFileStore, TicketService, TicketStore};

pub use error::ApiError;

/// Service type the handlers share; the store is chosen at startup.
pub type BoxedTicketService = TicketService<Box<dyn TicketStore>>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BoxedTicketService>,
}

impl AppState {
    pub fn new<S: TicketStore + 'static>(store: S) -> Self {
        let store: Box<dyn TicketStore> = Box::new(store);
        Self {
            service: Arc::new(TicketService::new(store)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "HelpDesk API is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Build the router with all layers applied.
///
/// # Errors
///
/// Returns an error if the configured CORS origin is not a valid header value.
pub fn build_router(state: AppState, config: &Config) -> Result<Router> {
    let origin: HeaderValue = config
        .cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin '{}'", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .route("/", get(health))
        .route("/tickets", get(tickets::read).post(tickets::write))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(trace)
        .layer(cors)
        .with_state(state))
}

/// Validate the store, bind, and serve until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the store cannot be initialized, the address cannot
/// be bound, or the server fails.
pub async fn serve(config: Config) -> Result<()> {
    let data_file = config.resolved_data_file();
    let mut store = JsonFileStore::new(&data_file);
    store
        .ensure_initialized()
        .with_context(|| format!("failed to initialize {}", data_file.display()))?;

    let app = build_router(AppState::new(store), &config)?;

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        data_file = %data_file.display(),
        "Server running on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutting down server...");
}
