//! Demo host for the registration and dispatch hub.
//!
//! In a real deployment the host component system creates one
//! [`ServiceHandle`] per activated client module and calls its `shutdown`
//! when that module deactivates. This binary stands in for the host: it
//! wires one demo client with a status servlet at `/status` and a static
//! resource tree at `/static`, then serves until ctrl-c.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_hub::client::{Client, ClientId, DirContentSource};
use http_hub::config::loader::load_config;
use http_hub::dispatch::{Dispatcher, RouteInfo, Servlet};
use http_hub::lifecycle::Shutdown;
use http_hub::registry::{InitParams, Registry};
use http_hub::service::ServiceHandle;
use http_hub::{HttpServer, HubConfig};

#[derive(Parser, Debug)]
#[command(name = "http-hub", about = "Per-client HTTP registration and dispatch hub")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory served as the demo client's bundled content.
    #[arg(long, default_value = "static")]
    content_dir: PathBuf,
}

struct StatusServlet;

#[async_trait]
impl Servlet for StatusServlet {
    async fn handle(&self, _request: Request<Body>, route: &RouteInfo) -> Response {
        let body = serde_json::json!({
            "status": "ok",
            "alias": route.alias,
            "path_info": route.path_info,
        });
        (StatusCode::OK, body.to_string()).into_response()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_hub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => HubConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => http_hub::observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let registry = Arc::new(Registry::new());
    let dispatcher = Arc::new(Dispatcher::new(registry.clone()));

    // Demo client registrations, standing in for host-driven activation.
    let client = Client::new(
        ClientId::new("demo"),
        Arc::new(DirContentSource::new(&args.content_dir)),
    );
    let handle = ServiceHandle::new(client, registry.clone());
    handle.register_servlet("/status", Arc::new(StatusServlet), InitParams::new(), None)?;
    handle.register_resources("/static", "", None)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    let server_rx = shutdown.subscribe();
    let server_task = tokio::spawn(async move { server.run(listener, server_rx).await });

    tokio::signal::ctrl_c().await?;
    shutdown.trigger();
    handle.shutdown();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
