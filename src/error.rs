//! Error types for the registration API.
//!
//! Registration-time failures are returned synchronously to the registering
//! client and never logged-and-swallowed. Dispatch-time outcomes (not found,
//! access denied) are ordinary HTTP responses produced by the dispatcher and
//! never surface through these types.

use thiserror::Error;

/// Errors returned by service-handle and registry operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The service handle was used after `shutdown()` completed.
    #[error("service handle is already shut down")]
    IllegalState,

    /// A servlet or resource root already claims the alias. The existing
    /// entry is left intact; it is never replaced.
    #[error("alias {alias:?} is already registered")]
    AlreadyRegistered { alias: String },

    /// The alias or resource base name is structurally invalid. Rejected
    /// before any namespace mutation.
    #[error("illegal alias {alias:?}: {reason}")]
    IllegalAlias { alias: String, reason: &'static str },

    /// An invalid argument was supplied to a registration call.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    /// Unregistration of an alias this client does not own.
    #[error("alias {alias:?} is not owned by the calling client")]
    NotOwned { alias: String },
}

/// Failure reported by a servlet or filter during first-use initialization.
///
/// The triggering request gets a 500 response; the entry stays registered.
#[derive(Debug, Clone, Error)]
#[error("initialization failed: {0}")]
pub struct InitError(pub String);

impl InitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
