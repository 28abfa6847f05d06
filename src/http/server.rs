//! HTTP server wiring the dispatcher to the network.
//!
//! # Responsibilities
//! - Create the Axum router with a wildcard route into the dispatcher
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HubConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::RequestIdLayer;

/// Application state injected into the connector handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP front end; the external connector boundary.
pub struct HttpServer {
    router: Router,
    config: HubConfig,
}

impl HttpServer {
    pub fn new(config: HubConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState { dispatcher };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &HubConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(connector_handler))
            .route("/", any(connector_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until the shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }
}

/// Every request funnels into the dispatcher; 404/403 are produced there.
async fn connector_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    state.dispatcher.dispatch(request).await
}
