//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (from the HTTP connector)
//!     → dispatcher.rs (namespace lookup via the registry)
//!     → chain.rs (filters in registration order, each may short-circuit)
//!     → context authorize gate
//!     → targets.rs (servlet invocation) or resource resolution
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Not-found and access-denied are response outcomes (404/403), never
//!   errors bubbling to the connector
//! - Targets initialize lazily on first engagement; a failed init yields a
//!   500 for the triggering request and the entry stays registered
//! - MIME type comes from the entry's context, falling back to a built-in
//!   extension table

pub mod chain;
pub mod dispatcher;
pub mod mime;
pub mod targets;

pub use chain::FilterChain;
pub use dispatcher::Dispatcher;
pub use targets::{Filter, RouteInfo, Servlet};
