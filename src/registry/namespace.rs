//! Alias grammar and the immutable namespace snapshot.
//!
//! # Responsibilities
//! - Validate alias and resource-base grammar before any mutation
//! - Longest-prefix match with prefix-boundary semantics
//! - Collect the ordered filter chain for a request path
//!
//! # Design Decisions
//! - An alias is a prefix boundary: `/a` covers `/a` and `/a/...`, never
//!   `/ab`; `/` covers everything
//! - Path info is the remainder after the matched alias: empty on an exact
//!   match, otherwise starting with `/`
//! - The snapshot is immutable; the registry clones it on every mutation

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistrationError;

use super::entry::{FilterRegistration, Registration};

/// Validate alias grammar: must start with `/` and must not end with `/`
/// (`"/"` alone is the root alias).
pub fn validate_alias(alias: &str) -> Result<(), RegistrationError> {
    if !alias.starts_with('/') {
        return Err(RegistrationError::IllegalAlias {
            alias: alias.to_string(),
            reason: "alias must start with '/'",
        });
    }
    if alias.len() > 1 && alias.ends_with('/') {
        return Err(RegistrationError::IllegalAlias {
            alias: alias.to_string(),
            reason: "alias must not end with '/'",
        });
    }
    Ok(())
}

/// Validate a resource base name: must not end with `/`. An empty base is
/// legal and resolves names purely from path info.
pub fn validate_resource_base(name: &str) -> Result<(), RegistrationError> {
    if name.ends_with('/') {
        return Err(RegistrationError::IllegalAlias {
            alias: name.to_string(),
            reason: "resource base must not end with '/'",
        });
    }
    Ok(())
}

/// Does `alias` cover `path` at a prefix boundary?
fn covers(alias: &str, path: &str) -> bool {
    if alias == "/" {
        return true;
    }
    match path.strip_prefix(alias) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Result of a namespace lookup.
pub struct Match {
    /// Filters whose alias prefix-matches the path, in registration order.
    pub filters: Vec<Arc<FilterRegistration>>,
    /// The longest-prefix exclusive entry.
    pub target: Arc<Registration>,
    /// Remainder after the matched alias; empty for an exact match,
    /// otherwise begins with `/`.
    pub path_info: String,
}

/// Immutable snapshot of all live registrations.
#[derive(Default, Clone)]
pub struct Namespace {
    /// Exclusive entries (servlets, resource roots) by alias.
    pub(super) exclusive: HashMap<String, Arc<Registration>>,
    /// All filter registrations in registration order.
    pub(super) filters: Vec<Arc<FilterRegistration>>,
}

impl Namespace {
    /// Longest-prefix match for a request path. `None` when no exclusive
    /// entry covers the path, regardless of matching filters.
    pub fn match_path(&self, path: &str) -> Option<Match> {
        let (alias, target) = self
            .exclusive
            .iter()
            .filter(|(alias, _)| covers(alias, path))
            .max_by_key(|(alias, _)| alias.len())?;

        let path_info = if alias == "/" {
            if path == "/" {
                String::new()
            } else {
                path.to_string()
            }
        } else {
            path[alias.len()..].to_string()
        };

        let filters = self
            .filters
            .iter()
            .filter(|f| covers(&f.alias, path))
            .cloned()
            .collect();

        Some(Match {
            filters,
            target: Arc::clone(target),
            path_info,
        })
    }
}
