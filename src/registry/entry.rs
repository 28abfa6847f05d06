//! Registration entries binding one alias to one servable target.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::client::ClientId;
use crate::context::Context;
use crate::dispatch::{Filter, Servlet};
use crate::error::InitError;

/// Opaque string-keyed parameters forwarded to a target's own
/// initialization. The core never inspects the contents.
pub type InitParams = HashMap<String, String>;

/// What an exclusive alias serves.
pub enum Target {
    Servlet(Arc<dyn Servlet>),
    /// Static resource root. `base` plus the remaining path info is resolved
    /// through the entry's context.
    Resources { base: String },
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Servlet(_) => f.write_str("Servlet"),
            Target::Resources { base } => write!(f, "Resources({base:?})"),
        }
    }
}

/// One alias → servlet/resource-root binding, immutable once inserted.
///
/// Destroyed by explicit unregistration or by bulk revocation when the
/// owning client's handle shuts down; never replaced in place.
pub struct Registration {
    pub alias: String,
    pub target: Target,
    pub context: Arc<dyn Context>,
    pub owner: ClientId,
    pub params: InitParams,
    /// First-use initialization state, driven once by the dispatcher.
    pub init: OnceCell<Result<(), InitError>>,
}

impl Registration {
    pub fn new(
        alias: impl Into<String>,
        target: Target,
        context: Arc<dyn Context>,
        owner: ClientId,
        params: InitParams,
    ) -> Self {
        Self {
            alias: alias.into(),
            target,
            context,
            owner,
            params,
            init: OnceCell::new(),
        }
    }
}

/// One filter chain member. Filters are never exclusive: every filter whose
/// alias prefix-matches a request participates, in registration order.
pub struct FilterRegistration {
    pub alias: String,
    pub filter: Arc<dyn Filter>,
    pub context: Arc<dyn Context>,
    pub owner: ClientId,
    pub params: InitParams,
    /// Global registration sequence number, assigned by the registry.
    pub seq: u64,
    pub init: OnceCell<Result<(), InitError>>,
}

impl FilterRegistration {
    pub fn new(
        alias: impl Into<String>,
        filter: Arc<dyn Filter>,
        context: Arc<dyn Context>,
        owner: ClientId,
        params: InitParams,
    ) -> Self {
        Self {
            alias: alias.into(),
            filter,
            context,
            owner,
            params,
            seq: 0,
            init: OnceCell::new(),
        }
    }
}
