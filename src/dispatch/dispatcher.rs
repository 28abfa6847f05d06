//! Per-request dispatch against the shared namespace.
//!
//! # Responsibilities
//! - Namespace lookup (longest-prefix) for every inbound request
//! - Drive the filter chain in registration order
//! - Run the matched context's authorization gate before the target
//! - Invoke servlets or resolve and serve static resources
//!
//! # Design Decisions
//! - Reads the namespace snapshot once per request; concurrent registry
//!   mutations never tear an in-flight lookup
//! - First-use target initialization is cached per registration; a failure
//!   keeps the entry registered and yields 500 on every engagement

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::InitError;
use crate::observability::metrics;
use crate::registry::{FilterRegistration, Match, Registration, Registry, Target};

use super::chain::FilterChain;
use super::mime::mime_for_path;
use super::targets::RouteInfo;

/// Consumes requests from the external connector and serves them from the
/// registered namespace.
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Dispatch one request: lookup, filter chain, authorization gate,
    /// target invocation. Always produces a response.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let path = request.uri().path().to_string();
        let method = request.method().to_string();

        let Some(matched) = self.registry.match_path(&path) else {
            tracing::debug!(path = %path, "No alias matched");
            metrics::record_dispatch(&method, 404, "none", start);
            return (StatusCode::NOT_FOUND, "No alias registered for path").into_response();
        };

        let Match {
            filters,
            target,
            path_info,
        } = matched;

        let route = RouteInfo {
            alias: target.alias.clone(),
            path_info,
        };

        tracing::debug!(
            path = %path,
            alias = %route.alias,
            path_info = %route.path_info,
            filters = filters.len(),
            "Dispatching request"
        );

        let chain = FilterChain {
            filters: &filters,
            dispatcher: self,
            target: &target,
            route: &route,
        };
        let response = chain.proceed(request).await;

        metrics::record_dispatch(&method, response.status().as_u16(), &route.alias, start);
        response
    }

    /// Authorization gate plus terminal target invocation.
    pub(super) async fn invoke_target(
        &self,
        request: Request<Body>,
        target: &Arc<Registration>,
        route: &RouteInfo,
    ) -> Response {
        if !target.context.authorize(&request) {
            tracing::debug!(alias = %target.alias, "Request denied by context");
            return (StatusCode::FORBIDDEN, "Access denied").into_response();
        }

        match &target.target {
            Target::Servlet(servlet) => {
                let init = target
                    .init
                    .get_or_init(|| async { servlet.init(&target.params).await })
                    .await;
                if let Err(err) = init {
                    return init_failure(&target.alias, err);
                }
                servlet.handle(request, route).await
            }
            Target::Resources { base } => self.serve_resource(target, base, route),
        }
    }

    /// Run a filter's one-time init; `Some` is the failure response.
    pub(super) async fn ensure_filter_init(
        &self,
        entry: &FilterRegistration,
    ) -> Option<Response> {
        let init = entry
            .init
            .get_or_init(|| async { entry.filter.init(&entry.params).await })
            .await;
        match init {
            Ok(()) => None,
            Err(err) => Some(init_failure(&entry.alias, err)),
        }
    }

    /// Resolve `base` + path info through the entry's context and serve the
    /// located bytes.
    fn serve_resource(
        &self,
        entry: &Registration,
        base: &str,
        route: &RouteInfo,
    ) -> Response {
        let name = format!("{base}{}", route.path_info);
        let Some(resource) = entry.context.resolve_resource(&name) else {
            tracing::debug!(alias = %entry.alias, name = %name, "Resource not resolved");
            return (StatusCode::NOT_FOUND, "Resource not found").into_response();
        };

        let mime = entry
            .context
            .mime_type(&name)
            .unwrap_or_else(|| mime_for_path(&name).to_string());

        match Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime)
            .body(Body::from(resource.into_bytes()))
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(alias = %entry.alias, error = %err, "Failed to build resource response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn init_failure(alias: &str, err: &InitError) -> Response {
    tracing::error!(alias = %alias, error = %err, "Target initialization failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Target initialization failed",
    )
        .into_response()
}
