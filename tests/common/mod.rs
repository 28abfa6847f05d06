//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use http_hub::client::{Client, ClientId, MapContentSource};
use http_hub::context::{Context, Resource};
use http_hub::dispatch::{Filter, FilterChain, RouteInfo, Servlet};
use http_hub::error::InitError;
use http_hub::registry::InitParams;

/// Client backed by an in-memory content source.
pub fn test_client(id: &str, entries: &[(&str, &str)]) -> Client {
    let mut source = MapContentSource::new();
    for (path, content) in entries {
        source.insert(*path, content.to_string());
    }
    Client::new(ClientId::new(id), Arc::new(source))
}

/// Build a GET request for the given path.
pub fn request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

/// Collect a response body into a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Servlet that echoes its route info and counts invocations.
pub struct EchoServlet {
    pub calls: AtomicU32,
}

impl EchoServlet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
        })
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Servlet for EchoServlet {
    async fn handle(&self, _request: Request<Body>, route: &RouteInfo) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (
            StatusCode::OK,
            format!("alias={};path_info={}", route.alias, route.path_info),
        )
            .into_response()
    }
}

/// Servlet whose one-time init always fails.
pub struct FailingInitServlet;

#[async_trait]
impl Servlet for FailingInitServlet {
    async fn init(&self, _params: &InitParams) -> Result<(), InitError> {
        Err(InitError::new("broken setup"))
    }

    async fn handle(&self, _request: Request<Body>, _route: &RouteInfo) -> Response {
        (StatusCode::OK, "should never run").into_response()
    }
}

/// Filter that records its name in a shared log, then passes control on.
pub struct RecordingFilter {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingFilter {
    pub fn new(name: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self { name, log })
    }
}

#[async_trait]
impl Filter for RecordingFilter {
    async fn handle(&self, request: Request<Body>, chain: FilterChain<'_>) -> Response {
        self.log.lock().unwrap().push(self.name);
        chain.proceed(request).await
    }
}

/// Filter that answers immediately without proceeding.
pub struct ShortCircuitFilter;

#[async_trait]
impl Filter for ShortCircuitFilter {
    async fn handle(&self, _request: Request<Body>, _chain: FilterChain<'_>) -> Response {
        (StatusCode::IM_A_TEAPOT, "short-circuited").into_response()
    }
}

/// Context that denies every request.
pub struct DenyContext;

impl Context for DenyContext {
    fn authorize(&self, _request: &Request<Body>) -> bool {
        false
    }

    fn resolve_resource(&self, _name: &str) -> Option<Resource> {
        None
    }

    fn mime_type(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Context serving a fixed body with an optional fixed MIME type.
pub struct FixedContext {
    pub body: &'static str,
    pub mime: Option<&'static str>,
}

impl Context for FixedContext {
    fn authorize(&self, _request: &Request<Body>) -> bool {
        true
    }

    fn resolve_resource(&self, name: &str) -> Option<Resource> {
        Some(Resource::new(self.body.to_string(), name))
    }

    fn mime_type(&self, _name: &str) -> Option<String> {
        self.mime.map(str::to_string)
    }
}
