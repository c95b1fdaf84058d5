//! Assembles a [`TypeResolver`] from configuration.

use std::sync::Arc;

use castkit_framework::{
    BoxedCaster, CommandHandler, ModuleHandler, ModuleStore, ResolverOptions, TypeResolver,
};
use tracing::debug;

use crate::config::{CastkitConfig, ConfigLoader, ResolverConfig, validate_config};
use crate::error::RuntimeResult;

/// Builder for a configured [`TypeResolver`].
///
/// ```rust,ignore
/// let resolver = ResolverBuilder::load(ConfigLoader::new())?
///     .command_handler(commands)
///     .inhibitor_handler(inhibitors)
///     .caster("duration", duration_caster)
///     .build();
/// ```
#[derive(Default)]
pub struct ResolverBuilder {
    options: ResolverOptions,
    commands: Option<Arc<dyn CommandHandler>>,
    inhibitors: Option<Arc<dyn ModuleHandler>>,
    listeners: Option<Arc<dyn ModuleHandler>>,
    casters: Vec<(String, BoxedCaster)>,
}

impl ResolverBuilder {
    /// Starts from default options and an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the `[resolver]` section of a loaded configuration.
    pub fn from_config(config: &CastkitConfig) -> Self {
        Self::from_resolver_config(&config.resolver)
    }

    /// Starts from a `[resolver]` section alone.
    pub fn from_resolver_config(config: &ResolverConfig) -> Self {
        Self {
            options: config.to_options(),
            ..Self::default()
        }
    }

    /// Loads and validates configuration, then starts from it.
    pub fn load(loader: ConfigLoader) -> RuntimeResult<Self> {
        let config = loader.load()?;
        validate_config(&config)?;
        Ok(Self::from_config(&config))
    }

    /// Sets the command registry. An empty [`ModuleStore`] is used otherwise.
    pub fn command_handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.commands = Some(handler);
        self
    }

    /// Attaches the inhibitor registry read by the `inhibitor` type.
    pub fn inhibitor_handler(mut self, handler: Arc<dyn ModuleHandler>) -> Self {
        self.inhibitors = Some(handler);
        self
    }

    /// Attaches the listener registry read by the `listener` type.
    pub fn listener_handler(mut self, handler: Arc<dyn ModuleHandler>) -> Self {
        self.listeners = Some(handler);
        self
    }

    /// Enables or disables substring matches in entity casters.
    pub fn partial_matching(mut self, enabled: bool) -> Self {
        self.options.partial_matching = enabled;
        self
    }

    /// Skips a built-in type.
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.options.disabled_types.push(name.into());
        self
    }

    /// Registers a caster after the built-ins, replacing any of the same name.
    pub fn caster(mut self, name: impl Into<String>, caster: BoxedCaster) -> Self {
        self.casters.push((name.into(), caster));
        self
    }

    /// The options the built-in catalog will be installed with.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Creates the resolver, attaching handlers and registering extra casters.
    pub fn build(self) -> TypeResolver {
        let commands = self
            .commands
            .unwrap_or_else(|| Arc::new(ModuleStore::new()));
        let mut resolver = TypeResolver::with_options(commands, self.options);

        if let Some(inhibitors) = self.inhibitors {
            resolver.attach_inhibitor_handler(inhibitors);
        }
        if let Some(listeners) = self.listeners {
            resolver.attach_listener_handler(listeners);
        }
        resolver.register_all(self.casters);

        debug!(types = resolver.len(), "Type resolver built");
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castkit_framework::{NamedModule, Value, sync_caster};

    #[test]
    fn test_build_from_config() {
        let mut config = CastkitConfig::default();
        config.resolver.partial_matching = false;
        config.resolver.disabled_types = vec!["invite".to_string()];

        let builder = ResolverBuilder::from_config(&config).disable("guildMessage");
        assert!(!builder.options().partial_matching);

        let resolver = builder.build();
        assert!(!resolver.has_type("invite"));
        assert!(!resolver.has_type("guildMessage"));
        assert!(resolver.has_type("relevantMessage"));
    }

    #[test]
    fn test_build_attaches_handlers_and_casters() {
        let inhibitors = ModuleStore::new();
        inhibitors
            .register(Arc::new(NamedModule::new("blacklist")))
            .unwrap();

        let resolver = ResolverBuilder::new()
            .inhibitor_handler(Arc::new(inhibitors))
            .caster(
                "yesno",
                sync_caster(|_, phrase| {
                    Ok((phrase == "yes").then(|| Value::String(phrase.to_owned())))
                }),
            )
            .build();

        assert!(resolver.has_type("yesno"));
        assert!(resolver.modules().inhibitors().is_some());
        assert!(resolver.modules().listeners().is_none());
        assert!(resolver.modules().commands().module("ping").is_none());
    }

    #[test]
    fn test_custom_caster_replaces_builtin() {
        let builtin = ResolverBuilder::new().build();
        let count = builtin.len();

        let resolver = ResolverBuilder::new()
            .caster("color", sync_caster(|_, _| Ok(None)))
            .build();
        assert_eq!(resolver.len(), count);
    }
}
