//! Per-client front door to the shared registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::Client;
use crate::context::{Context, DefaultContext};
use crate::dispatch::{Filter, Servlet};
use crate::error::RegistrationError;
use crate::registry::{
    validate_alias, validate_resource_base, FilterRegistration, InitParams, Registration,
    Registry, Target,
};

/// One service handle per client module.
///
/// Validates call legality, substitutes a default context when none is
/// given, and forwards to the shared registry tagged with the owning
/// client's identity so the registry can later revoke the whole set.
///
/// Operations on one handle are mutually exclusive: the shutdown check and
/// the registry delegation run under the same per-handle lock, so
/// `shutdown` cannot interleave with an in-flight registration call on the
/// same handle.
pub struct ServiceHandle {
    client: Client,
    registry: Arc<Registry>,
    state: Mutex<HandleState>,
}

struct HandleState {
    shutdown: bool,
}

impl HandleState {
    fn check_shutdown(&self) -> Result<(), RegistrationError> {
        if self.shutdown {
            Err(RegistrationError::IllegalState)
        } else {
            Ok(())
        }
    }
}

impl ServiceHandle {
    /// Constructed by the host when a client activates.
    pub fn new(client: Client, registry: Arc<Registry>) -> Self {
        Self {
            client,
            registry,
            state: Mutex::new(HandleState { shutdown: false }),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn lock(&self) -> MutexGuard<'_, HandleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn make_default_context(&self) -> Arc<dyn Context> {
        Arc::new(DefaultContext::new(self.client.clone()))
    }

    /// The context substituted when a registration supplies none: always
    /// authorizes and resolves resources from this client's content.
    pub fn default_context(&self) -> Result<Arc<dyn Context>, RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        Ok(self.make_default_context())
    }

    /// Register a servlet at `alias`. Fails when the alias is malformed or
    /// already exclusively claimed; the existing entry is never replaced.
    pub fn register_servlet(
        &self,
        alias: &str,
        servlet: Arc<dyn Servlet>,
        params: InitParams,
        context: Option<Arc<dyn Context>>,
    ) -> Result<(), RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        validate_alias(alias)?;
        let context = context.unwrap_or_else(|| self.make_default_context());
        self.registry.add(Registration::new(
            alias,
            Target::Servlet(servlet),
            context,
            self.client.id().clone(),
            params,
        ))
    }

    /// Register a filter at `alias`. Filters stack: overlapping aliases are
    /// legal and chain in registration order for matching requests.
    pub fn register_filter(
        &self,
        alias: &str,
        filter: Arc<dyn Filter>,
        params: InitParams,
        context: Option<Arc<dyn Context>>,
    ) -> Result<(), RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        validate_alias(alias)
            .map_err(|_| RegistrationError::IllegalArgument("malformed filter alias"))?;
        let context = context.unwrap_or_else(|| self.make_default_context());
        self.registry.add_filter(FilterRegistration::new(
            alias,
            filter,
            context,
            self.client.id().clone(),
            params,
        ));
        Ok(())
    }

    /// Register a static resource root at `alias`. `base` plus the
    /// remaining path info is resolved through the (possibly default)
    /// context at dispatch time.
    pub fn register_resources(
        &self,
        alias: &str,
        base: &str,
        context: Option<Arc<dyn Context>>,
    ) -> Result<(), RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        validate_alias(alias)?;
        validate_resource_base(base)?;
        let context = context.unwrap_or_else(|| self.make_default_context());
        self.registry.add(Registration::new(
            alias,
            Target::Resources {
                base: base.to_string(),
            },
            context,
            self.client.id().clone(),
            InitParams::new(),
        ))
    }

    /// Remove the servlet or resource root at exactly `alias`. Only entries
    /// owned by this handle's client are removable; filters are untouched.
    pub fn unregister(&self, alias: &str) -> Result<(), RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        self.registry.remove(alias, self.client.id())
    }

    /// Remove every chain position referencing this exact filter instance
    /// across all aliases owned by this handle's client.
    pub fn unregister_filter(&self, filter: &Arc<dyn Filter>) -> Result<(), RegistrationError> {
        let state = self.lock();
        state.check_shutdown()?;
        self.registry.remove_filter(filter, self.client.id());
        Ok(())
    }

    /// One-time teardown driven by the host when the client deactivates:
    /// revokes every entry owned by this client, then flips the handle
    /// irreversibly to shutdown. A second call is a programming error but
    /// harmless; it revokes an already-empty ownership set.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        self.registry.revoke_all(self.client.id());
        state.shutdown = true;
        tracing::info!(client = %self.client.id(), "Service handle shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientId, MapContentSource};

    fn handle() -> ServiceHandle {
        let client = Client::new(ClientId::new("test"), Arc::new(MapContentSource::new()));
        ServiceHandle::new(client, Arc::new(Registry::new()))
    }

    #[test]
    fn test_operations_fail_after_shutdown() {
        let handle = handle();
        handle.shutdown();

        assert!(matches!(
            handle.default_context(),
            Err(RegistrationError::IllegalState)
        ));
        assert!(matches!(
            handle.register_resources("/static", "www", None),
            Err(RegistrationError::IllegalState)
        ));
        assert!(matches!(
            handle.unregister("/static"),
            Err(RegistrationError::IllegalState)
        ));
    }

    #[test]
    fn test_double_shutdown_is_harmless() {
        let handle = handle();
        handle.register_resources("/static", "www", None).unwrap();
        handle.shutdown();
        handle.shutdown();
        assert!(handle.registry.match_path("/static").is_none());
    }

    #[test]
    fn test_malformed_alias_rejected_before_mutation() {
        let handle = handle();
        assert!(matches!(
            handle.register_resources("static", "www", None),
            Err(RegistrationError::IllegalAlias { .. })
        ));
        assert!(matches!(
            handle.register_resources("/static/", "www", None),
            Err(RegistrationError::IllegalAlias { .. })
        ));
        assert!(matches!(
            handle.register_resources("/static", "www/", None),
            Err(RegistrationError::IllegalAlias { .. })
        ));
        assert!(handle.registry.match_path("/static").is_none());
    }
}
