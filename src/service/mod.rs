//! Per-client service handles.
//!
//! # Data Flow
//! ```text
//! Host component system
//!     → constructs one ServiceHandle per activated client
//!     → handle.register_* (validates, tags with client identity)
//!     → Registry (shared namespace mutation)
//!     → handle.shutdown() on client deactivation (bulk revocation)
//! ```
//!
//! # Design Decisions
//! - The handle never self-registers with any host lifecycle mechanism;
//!   construction and shutdown are plain operations driven by the host
//! - A coarse per-handle lock serializes operations; registration is not a
//!   hot path

pub mod handle;

pub use handle::ServiceHandle;
