//! Runtime registry: the alias namespace authority.
//!
//! # Responsibilities
//! - Atomic availability check + insert for exclusive entries
//! - Ordered append for filter registrations
//! - Owner-scoped removal and bulk revocation
//! - Lock-free longest-prefix lookup for the dispatcher
//!
//! # Design Decisions
//! - One registry instance per process, passed by reference to every
//!   handle; no ambient or static state
//! - Mutations serialize on a mutex, clone the current snapshot, apply the
//!   change, and swap it in atomically; registration is a cold path, so the
//!   clone cost is irrelevant next to lock-free dispatch reads

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use crate::client::ClientId;
use crate::dispatch::Filter;
use crate::error::RegistrationError;

use super::entry::{FilterRegistration, Registration};
use super::namespace::{Match, Namespace};

/// Process-wide alias namespace authority, shared by every service handle
/// and the dispatcher.
pub struct Registry {
    snapshot: ArcSwap<Namespace>,
    write: Mutex<()>,
    next_seq: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Namespace::default()),
            write: Mutex::new(()),
            next_seq: AtomicU64::new(0),
        }
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.write.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an exclusive entry after an atomic availability check. The
    /// existing entry survives a conflicting attempt untouched.
    pub fn add(&self, entry: Registration) -> Result<(), RegistrationError> {
        let _guard = self.write_lock();
        let current = self.snapshot.load();
        if current.exclusive.contains_key(&entry.alias) {
            return Err(RegistrationError::AlreadyRegistered { alias: entry.alias });
        }
        tracing::debug!(
            alias = %entry.alias,
            owner = %entry.owner,
            target = ?entry.target,
            "Registered alias"
        );
        let mut next = Namespace::clone(&current);
        next.exclusive.insert(entry.alias.clone(), Arc::new(entry));
        self.snapshot.store(Arc::new(next));
        Ok(())
    }

    /// Append a filter to the global chain. Filters are never exclusive.
    pub fn add_filter(&self, mut entry: FilterRegistration) {
        let _guard = self.write_lock();
        entry.seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            alias = %entry.alias,
            owner = %entry.owner,
            seq = entry.seq,
            "Registered filter"
        );
        let mut next = Namespace::clone(&self.snapshot.load());
        next.filters.push(Arc::new(entry));
        self.snapshot.store(Arc::new(next));
    }

    /// Remove the exclusive entry at exactly `alias` when owned by `owner`.
    /// A foreign or absent alias is rejected.
    pub fn remove(&self, alias: &str, owner: &ClientId) -> Result<(), RegistrationError> {
        let _guard = self.write_lock();
        let current = self.snapshot.load();
        match current.exclusive.get(alias) {
            Some(entry) if entry.owner == *owner => {
                tracing::debug!(alias = %alias, owner = %owner, "Unregistered alias");
                let mut next = Namespace::clone(&current);
                next.exclusive.remove(alias);
                self.snapshot.store(Arc::new(next));
                Ok(())
            }
            _ => Err(RegistrationError::NotOwned {
                alias: alias.to_string(),
            }),
        }
    }

    /// Remove every chain position held by this exact filter instance,
    /// scoped to `owner`.
    pub fn remove_filter(&self, filter: &Arc<dyn Filter>, owner: &ClientId) {
        let _guard = self.write_lock();
        let mut next = Namespace::clone(&self.snapshot.load());
        next.filters
            .retain(|f| !(f.owner == *owner && Arc::ptr_eq(&f.filter, filter)));
        self.snapshot.store(Arc::new(next));
    }

    /// Remove every entry owned by `owner`; driven by handle shutdown.
    /// Safe to run concurrently with in-flight lookups for other aliases.
    pub fn revoke_all(&self, owner: &ClientId) {
        let _guard = self.write_lock();
        let mut next = Namespace::clone(&self.snapshot.load());
        let before = next.exclusive.len() + next.filters.len();
        next.exclusive.retain(|_, entry| entry.owner != *owner);
        next.filters.retain(|f| f.owner != *owner);
        let revoked = before - next.exclusive.len() - next.filters.len();
        tracing::info!(owner = %owner, revoked, "Revoked client registrations");
        self.snapshot.store(Arc::new(next));
    }

    /// Longest-prefix lookup against the current snapshot. Lock-free.
    pub fn match_path(&self, path: &str) -> Option<Match> {
        self.snapshot.load().match_path(path)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::{Client, ClientId, MapContentSource};
    use crate::context::DefaultContext;
    use crate::registry::entry::{InitParams, Target};

    fn client(id: &str) -> Client {
        Client::new(ClientId::new(id), Arc::new(MapContentSource::new()))
    }

    fn entry(alias: &str, owner: &Client) -> Registration {
        Registration::new(
            alias,
            Target::Resources { base: String::new() },
            Arc::new(DefaultContext::new(owner.clone())),
            owner.id().clone(),
            InitParams::new(),
        )
    }

    #[test]
    fn test_exclusive_alias_conflict() {
        let registry = Registry::new();
        let a = client("a");
        let b = client("b");

        registry.add(entry("/shared", &a)).unwrap();
        let err = registry.add(entry("/shared", &b)).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::AlreadyRegistered { alias } if alias == "/shared"
        ));

        // First entry is intact and still owned by `a`.
        let matched = registry.match_path("/shared").unwrap();
        assert_eq!(matched.target.owner, *a.id());
    }

    #[test]
    fn test_remove_enforces_ownership() {
        let registry = Registry::new();
        let a = client("a");
        let b = client("b");

        registry.add(entry("/app", &a)).unwrap();
        assert!(registry.remove("/app", b.id()).is_err());
        assert!(registry.match_path("/app").is_some());

        registry.remove("/app", a.id()).unwrap();
        assert!(registry.match_path("/app").is_none());
        assert!(registry.remove("/app", a.id()).is_err());
    }

    #[test]
    fn test_revoke_all_scoped_to_owner() {
        let registry = Registry::new();
        let a = client("a");
        let b = client("b");

        registry.add(entry("/a1", &a)).unwrap();
        registry.add(entry("/a2", &a)).unwrap();
        registry.add(entry("/b1", &b)).unwrap();

        registry.revoke_all(a.id());
        assert!(registry.match_path("/a1").is_none());
        assert!(registry.match_path("/a2").is_none());
        assert!(registry.match_path("/b1").is_some());
    }

    #[test]
    fn test_alias_free_after_revocation() {
        let registry = Registry::new();
        let a = client("a");
        let b = client("b");

        registry.add(entry("/shared", &a)).unwrap();
        registry.revoke_all(a.id());
        registry.add(entry("/shared", &b)).unwrap();
        assert_eq!(registry.match_path("/shared").unwrap().target.owner, *b.id());
    }
}
