//! Client identity and bundled-content lookup.
//!
//! # Responsibilities
//! - Opaque client identity used as the ownership key for registrations
//! - Content-lookup capability backing default-context resource resolution
//!
//! # Design Decisions
//! - Clients are created and destroyed by the host component system; the
//!   core only holds references and later receives a revoke-all signal
//!   through handle shutdown
//! - `ContentSource` is a trait so hosts can back client content with a
//!   directory, an in-memory map, or anything else

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use crate::context::Resource;

/// Opaque identity of a registering client module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Arc<str>);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-lookup capability supplied by the host with every client.
pub trait ContentSource: Send + Sync {
    /// Look up a bundled entry. `path` never carries a leading separator;
    /// callers strip it before lookup.
    fn get_entry(&self, path: &str) -> Option<Resource>;
}

/// A client module as seen by the core: identity plus content lookup.
#[derive(Clone)]
pub struct Client {
    id: ClientId,
    content: Arc<dyn ContentSource>,
}

impl Client {
    pub fn new(id: ClientId, content: Arc<dyn ContentSource>) -> Self {
        Self { id, content }
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn content(&self) -> &Arc<dyn ContentSource> {
        &self.content
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("id", &self.id).finish()
    }
}

/// Content source backed by a directory on disk.
pub struct DirContentSource {
    root: PathBuf,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for DirContentSource {
    fn get_entry(&self, path: &str) -> Option<Resource> {
        let rel = Path::new(path);
        // Entries must stay inside the root.
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return None;
        }
        let full = self.root.join(rel);
        let bytes = std::fs::read(&full).ok()?;
        Some(Resource::new(Bytes::from(bytes), path))
    }
}

/// In-memory content source for embedded content and tests.
#[derive(Default)]
pub struct MapContentSource {
    entries: HashMap<String, Bytes>,
}

impl MapContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, path: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        self.entries.insert(path.into(), bytes.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Bytes>) {
        self.entries.insert(path.into(), bytes.into());
    }
}

impl ContentSource for MapContentSource {
    fn get_entry(&self, path: &str) -> Option<Resource> {
        self.entries
            .get(path)
            .map(|bytes| Resource::new(bytes.clone(), path))
    }
}
