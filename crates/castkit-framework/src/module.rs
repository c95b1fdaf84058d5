//! Module registries consumed by the module lookup casters.
//!
//! Commands, inhibitors and listeners live in registries owned by the host
//! framework. The resolver only needs exact-id lookup ([`ModuleHandler`]) and,
//! for commands, alias lookup ([`CommandHandler`]). [`ModuleStore`] is an
//! in-memory implementation of both.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

/// A loadable module: a command, an inhibitor or a listener.
pub trait Module: fmt::Debug + Send + Sync + 'static {
    /// Unique module ID.
    fn id(&self) -> &str;

    /// Alternative names. Only meaningful for commands.
    fn aliases(&self) -> &[String] {
        &[]
    }
}

/// Exact-id module lookup.
pub trait ModuleHandler: Send + Sync + 'static {
    /// Returns the module registered under `id`.
    fn module(&self, id: &str) -> Option<Arc<dyn Module>>;
}

/// A module handler that also resolves command aliases.
pub trait CommandHandler: ModuleHandler {
    /// Returns the command owning `alias`.
    fn find_command(&self, alias: &str) -> Option<Arc<dyn Module>>;
}

/// A module with a fixed id and alias list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedModule {
    id: String,
    aliases: Vec<String>,
}

impl NamedModule {
    /// Creates a module without aliases.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            aliases: Vec::new(),
        }
    }

    /// Adds aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }
}

impl Module for NamedModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Errors from [`ModuleStore::register`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModuleError {
    /// Another module already owns the alias.
    #[error("alias '{alias}' is already used by module '{owner}'")]
    AliasConflict {
        /// The contested alias, lowercased.
        alias: String,
        /// ID of the module holding it.
        owner: String,
    },
}

#[derive(Default)]
struct StoreInner {
    modules: HashMap<String, Arc<dyn Module>>,
    aliases: HashMap<String, String>,
}

/// In-memory module registry.
///
/// Aliases are case-insensitive. A module's own ID is always one of its
/// aliases. Re-registering an ID replaces the module and its aliases.
#[derive(Default)]
pub struct ModuleStore {
    inner: RwLock<StoreInner>,
}

impl ModuleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module.
    pub fn register(&self, module: Arc<dyn Module>) -> Result<(), ModuleError> {
        let id = module.id().to_owned();
        let mut aliases: Vec<String> =
            module.aliases().iter().map(|a| a.to_lowercase()).collect();
        aliases.push(id.to_lowercase());

        let mut inner = self.inner.write();
        for alias in &aliases {
            if let Some(owner) = inner.aliases.get(alias).filter(|owner| **owner != id) {
                return Err(ModuleError::AliasConflict {
                    alias: alias.clone(),
                    owner: owner.clone(),
                });
            }
        }

        inner.aliases.retain(|_, owner| *owner != id);
        for alias in aliases {
            inner.aliases.insert(alias, id.clone());
        }
        debug!(module = %id, "Registered module");
        inner.modules.insert(id, module);
        Ok(())
    }

    /// Removes a module and its aliases.
    pub fn remove(&self, id: &str) -> Option<Arc<dyn Module>> {
        let mut inner = self.inner.write();
        inner.aliases.retain(|_, owner| *owner != id);
        inner.modules.remove(id)
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.inner.read().modules.len()
    }

    /// Returns `true` if no module is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().modules.is_empty()
    }
}

impl ModuleHandler for ModuleStore {
    fn module(&self, id: &str) -> Option<Arc<dyn Module>> {
        self.inner.read().modules.get(id).cloned()
    }
}

impl CommandHandler for ModuleStore {
    fn find_command(&self, alias: &str) -> Option<Arc<dyn Module>> {
        let inner = self.inner.read();
        let id = inner.aliases.get(&alias.to_lowercase())?;
        inner.modules.get(id).cloned()
    }
}

impl fmt::Debug for ModuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ModuleStore")
            .field("modules", &inner.modules.len())
            .field("aliases", &inner.aliases.len())
            .finish()
    }
}

/// The module registries a resolver reads from.
///
/// The command handler is required up front; inhibitor and listener handlers
/// are attached later and are `None` until then.
pub struct ModuleHandlers {
    commands: Arc<dyn CommandHandler>,
    inhibitors: RwLock<Option<Arc<dyn ModuleHandler>>>,
    listeners: RwLock<Option<Arc<dyn ModuleHandler>>>,
}

impl ModuleHandlers {
    /// Creates the set with only the command handler bound.
    pub fn new(commands: Arc<dyn CommandHandler>) -> Self {
        Self {
            commands,
            inhibitors: RwLock::new(None),
            listeners: RwLock::new(None),
        }
    }

    /// Returns the command handler.
    pub fn commands(&self) -> &Arc<dyn CommandHandler> {
        &self.commands
    }

    /// Returns the inhibitor handler, if attached.
    pub fn inhibitors(&self) -> Option<Arc<dyn ModuleHandler>> {
        self.inhibitors.read().clone()
    }

    /// Returns the listener handler, if attached.
    pub fn listeners(&self) -> Option<Arc<dyn ModuleHandler>> {
        self.listeners.read().clone()
    }

    /// Binds (or rebinds) the inhibitor handler.
    pub fn attach_inhibitors(&self, handler: Arc<dyn ModuleHandler>) {
        *self.inhibitors.write() = Some(handler);
    }

    /// Binds (or rebinds) the listener handler.
    pub fn attach_listeners(&self, handler: Arc<dyn ModuleHandler>) {
        *self.listeners.write() = Some(handler);
    }
}

impl fmt::Debug for ModuleHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandlers")
            .field("inhibitors", &self.inhibitors.read().is_some())
            .field("listeners", &self.listeners.read().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let store = ModuleStore::new();
        store
            .register(Arc::new(NamedModule::new("ping").with_aliases(["p", "Pong"])))
            .unwrap();

        assert_eq!(store.find_command("PONG").map(|m| m.id().to_owned()), Some("ping".into()));
        assert_eq!(store.find_command("Ping").map(|m| m.id().to_owned()), Some("ping".into()));
        assert!(store.find_command("pin").is_none());
    }

    #[test]
    fn test_exact_lookup_uses_id_only() {
        let store = ModuleStore::new();
        store
            .register(Arc::new(NamedModule::new("ping").with_aliases(["p"])))
            .unwrap();
        assert!(store.module("ping").is_some());
        assert!(store.module("p").is_none());
        assert!(store.module("PING").is_none());
    }

    #[test]
    fn test_alias_conflict() {
        let store = ModuleStore::new();
        store
            .register(Arc::new(NamedModule::new("ping").with_aliases(["p"])))
            .unwrap();
        let err = store
            .register(Arc::new(NamedModule::new("purge").with_aliases(["P"])))
            .unwrap_err();
        assert_eq!(
            err,
            ModuleError::AliasConflict {
                alias: "p".into(),
                owner: "ping".into()
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reregister_replaces_aliases() {
        let store = ModuleStore::new();
        store
            .register(Arc::new(NamedModule::new("ping").with_aliases(["p"])))
            .unwrap();
        store
            .register(Arc::new(NamedModule::new("ping").with_aliases(["latency"])))
            .unwrap();
        assert!(store.find_command("p").is_none());
        assert!(store.find_command("latency").is_some());

        store.remove("ping");
        assert!(store.is_empty());
        assert!(store.find_command("latency").is_none());
    }

    #[test]
    fn test_late_attach() {
        let handlers = ModuleHandlers::new(Arc::new(ModuleStore::new()));
        assert!(handlers.inhibitors().is_none());
        handlers.attach_inhibitors(Arc::new(ModuleStore::new()));
        assert!(handlers.inhibitors().is_some());
        assert!(handlers.listeners().is_none());
    }
}
