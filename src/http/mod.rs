//! HTTP connector boundary.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, wildcard route)
//!     → request.rs (request ID stamping)
//!     → Dispatcher (namespace lookup, filters, target)
//!     → Response to client
//! ```
//!
//! The connector owns raw HTTP parsing, request timeouts, and graceful
//! shutdown; the dispatch core consumes already-parsed request objects.

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
