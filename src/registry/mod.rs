//! Shared alias namespace: registration entries and the runtime registry.
//!
//! # Data Flow
//! ```text
//! ServiceHandle (per client)
//!     → registry.rs (add / remove / revoke_all, serialized writers)
//!     → namespace.rs (immutable snapshot, longest-prefix match)
//!     → entry.rs (alias → target bindings)
//!
//! Dispatcher (per request)
//!     → registry.rs match_path (lock-free snapshot load)
//! ```
//!
//! # Design Decisions
//! - Snapshot-swap concurrency: writers clone-modify-store under a mutex,
//!   readers atomically load the current snapshot; a lookup always observes
//!   a namespace state that existed at some instant
//! - Servlets and resource roots are exclusive per alias; filters stack in
//!   registration order
//! - Ownership is enforced on every mutation, never on lookup

pub mod entry;
pub mod namespace;
pub mod registry;

pub use entry::{FilterRegistration, InitParams, Registration, Target};
pub use namespace::{validate_alias, validate_resource_base, Match, Namespace};
pub use registry::Registry;
