//! Per-registration security and resource-resolution capability.
//!
//! # Responsibilities
//! - Gate every matched request before the terminal target is invoked
//! - Resolve static content names for resource-root registrations
//! - Supply an optional MIME type for resolved resources
//!
//! # Design Decisions
//! - A context is bound per registration, not per client; two aliases of the
//!   same client may carry different contexts
//! - `DefaultContext` is substituted whenever a registration supplies none:
//!   always authorizes, resolves against the owning client's content source
//! - MIME inference is deferred to the dispatcher's extension table when a
//!   context returns `None`

use axum::body::Body;
use axum::http::Request;
use bytes::Bytes;

use crate::client::Client;

/// Located static content returned by `resolve_resource`.
#[derive(Debug, Clone)]
pub struct Resource {
    bytes: Bytes,
    name: String,
}

impl Resource {
    pub fn new(bytes: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            name: name.into(),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Source name the resource was resolved under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Capability bound to every registration.
///
/// Implemented by clients for custom security or content layouts; the core
/// provides [`DefaultContext`].
pub trait Context: Send + Sync {
    /// Authorization gate run before the terminal target is invoked.
    /// Returning `false` yields an access-denied response and the target is
    /// never called.
    fn authorize(&self, request: &Request<Body>) -> bool;

    /// Resolve a named resource. A leading `/` in `name` is optional;
    /// implementations must strip it before lookup.
    fn resolve_resource(&self, name: &str) -> Option<Resource>;

    /// MIME type for a resource name, or `None` to defer to the
    /// dispatcher's extension table.
    fn mime_type(&self, name: &str) -> Option<String>;
}

/// Strip at most one leading path separator.
pub(crate) fn strip_leading_slash(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}

/// Built-in context: always authorizes, resolves relative to the owning
/// client's bundled content, defers MIME inference to the dispatcher.
pub struct DefaultContext {
    client: Client,
}

impl DefaultContext {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Context for DefaultContext {
    fn authorize(&self, _request: &Request<Body>) -> bool {
        true
    }

    fn resolve_resource(&self, name: &str) -> Option<Resource> {
        self.client.content().get_entry(strip_leading_slash(name))
    }

    fn mime_type(&self, _name: &str) -> Option<String> {
        None
    }
}
