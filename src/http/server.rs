//! Local invocation server.
//!
//! # Responsibilities
//! - Accept invocation events over HTTP at the runtime-interface-emulator path
//! - Assign a request ID when the event carries none
//! - Hand each event to the shared `Adapter` and return its reply as JSON
//! - Stop accepting on the shutdown signal
//!
//! Event bodies are not size-limited here; the front door already bounds them.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::adapter::Adapter;
use crate::event::{AdaptedResponse, InboundEvent};

/// Path the runtime interface emulator exposes for invocations.
pub const INVOKE_PATH: &str = "/2015-03-31/functions/function/invocations";

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<Adapter>,
}

/// HTTP front door for local runs.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(adapter: Arc<Adapter>) -> Self {
        let state = AppState { adapter };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(INVOKE_PATH, post(invoke_handler))
            .route("/healthz", get(|| async { "ok" }))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, path = INVOKE_PATH, "Invocation server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Invocation server stopped");
        Ok(())
    }
}

async fn invoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<InboundEvent>,
) -> Json<AdaptedResponse> {
    let event = match headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok()) {
        Some(id) => event.with_default_request_id(id),
        None => event,
    };
    Json(state.adapter.handle(event).await)
}
