//! Lifecycle coordination.
//!
//! # Data Flow
//! ```text
//! Host (signal handler, component system)
//!     → Shutdown::trigger()
//!     → subscribed tasks (HTTP server) drain and stop
//!     → host drives ServiceHandle::shutdown() per client
//! ```
//!
//! The core never self-registers with any host lifecycle mechanism; the
//! host constructs handles and invokes their shutdown exactly once.

pub mod shutdown;

pub use shutdown::Shutdown;
