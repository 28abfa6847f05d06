//! Per-client HTTP registration and dispatch layer.
//!
//! Independent client modules register URL-path aliases mapping to servable
//! units — request handlers ("servlets"), request/response interceptors
//! ("filters"), and static resource trees — against a shared HTTP front
//! end. Each client's registrations are isolated, securable through a
//! per-registration [`Context`], and revoked as a unit when the owning
//! client's [`ServiceHandle`] shuts down.
//!
//! ```text
//! client module ──▶ ServiceHandle ──▶ Registry (shared alias namespace)
//!                                          ▲ lock-free snapshot reads
//! HTTP request ──▶ HttpServer ──▶ Dispatcher ──▶ filters ──▶ Context gate
//!                                                              └─▶ target
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod service;

pub use client::{Client, ClientId, ContentSource};
pub use config::HubConfig;
pub use context::{Context, DefaultContext, Resource};
pub use dispatch::{Dispatcher, Filter, FilterChain, RouteInfo, Servlet};
pub use error::{InitError, RegistrationError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::{InitParams, Registry};
pub use service::ServiceHandle;
