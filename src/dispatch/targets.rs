//! Servable target traits: servlets and filters.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::error::InitError;
use crate::registry::InitParams;

use super::chain::FilterChain;

/// Alias match details handed to a servlet with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// The registered alias that matched.
    pub alias: String,
    /// Remainder of the request path after the alias; empty for an exact
    /// match, otherwise begins with `/`.
    pub path_info: String,
}

/// A registered request handler.
#[async_trait]
pub trait Servlet: Send + Sync {
    /// One-time setup, run by the dispatcher on first engagement. The
    /// registration parameters are forwarded verbatim.
    async fn init(&self, _params: &InitParams) -> Result<(), InitError> {
        Ok(())
    }

    /// Handle a matched request.
    async fn handle(&self, request: Request<Body>, route: &RouteInfo) -> Response;
}

/// A registered request/response interceptor.
///
/// Filters stack: every filter whose alias prefix-matches a request runs,
/// in registration order, before the terminal target.
#[async_trait]
pub trait Filter: Send + Sync {
    /// One-time setup, run by the dispatcher on first engagement.
    async fn init(&self, _params: &InitParams) -> Result<(), InitError> {
        Ok(())
    }

    /// Intercept a matched request. Call `chain.proceed(request)` to pass
    /// control onward, or return a response directly to short-circuit the
    /// rest of the chain and the target.
    async fn handle(&self, request: Request<Body>, chain: FilterChain<'_>) -> Response;
}
