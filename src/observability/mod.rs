//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing (structured log events with request IDs)
//!     → metrics.rs (dispatch counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not formatted strings, on every log line
//! - Metric updates are cheap atomic operations; recording happens once
//!   per dispatched request

pub mod metrics;
