//! Ordered filter chain execution.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::registry::{FilterRegistration, Registration};

use super::dispatcher::Dispatcher;
use super::targets::RouteInfo;

/// Boxed future returned by chain traversal.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The remainder of a filter chain for one dispatched request.
///
/// Each filter receives the chain tail; calling [`proceed`](Self::proceed)
/// runs the next filter, or the terminal target once the chain is
/// exhausted. Dropping the chain without calling `proceed` short-circuits.
pub struct FilterChain<'a> {
    pub(super) filters: &'a [Arc<FilterRegistration>],
    pub(super) dispatcher: &'a Dispatcher,
    pub(super) target: &'a Arc<Registration>,
    pub(super) route: &'a RouteInfo,
}

impl<'a> FilterChain<'a> {
    /// Pass control to the next chain member, or invoke the terminal target
    /// (authorization gate included) when no filters remain.
    pub fn proceed(self, request: Request<Body>) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            match self.filters.split_first() {
                Some((head, rest)) => {
                    if let Some(response) = self.dispatcher.ensure_filter_init(head).await {
                        return response;
                    }
                    let tail = FilterChain {
                        filters: rest,
                        dispatcher: self.dispatcher,
                        target: self.target,
                        route: self.route,
                    };
                    head.filter.handle(request, tail).await
                }
                None => {
                    self.dispatcher
                        .invoke_target(request, self.target, self.route)
                        .await
                }
            }
        })
    }
}
