//! Module lookup casters: `commandAlias`, `command`, `inhibitor`, `listener`.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use castkit_core::CastContext;

use crate::caster::Caster;
use crate::error::{CastError, CastResult};
use crate::module::ModuleHandlers;
use crate::value::Value;

/// Which registry a [`ModuleCaster`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleKind {
    CommandAlias,
    Command,
    Inhibitor,
    Listener,
}

pub(crate) struct ModuleCaster {
    kind: ModuleKind,
    handlers: Arc<ModuleHandlers>,
}

impl ModuleCaster {
    pub(crate) fn new(kind: ModuleKind, handlers: Arc<ModuleHandlers>) -> Self {
        Self { kind, handlers }
    }

    fn resolve(&self, phrase: &str) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }
        let value = match self.kind {
            ModuleKind::CommandAlias => {
                self.handlers.commands().find_command(phrase).map(Value::Command)
            }
            ModuleKind::Command => self.handlers.commands().module(phrase).map(Value::Command),
            ModuleKind::Inhibitor => self
                .handlers
                .inhibitors()
                .ok_or(CastError::HandlerNotAttached { handler: "inhibitor" })?
                .module(phrase)
                .map(Value::Inhibitor),
            ModuleKind::Listener => self
                .handlers
                .listeners()
                .ok_or(CastError::HandlerNotAttached { handler: "listener" })?
                .module(phrase)
                .map(Value::Listener),
        };
        Ok(value)
    }
}

impl Caster for ModuleCaster {
    fn cast(&self, _ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready(self.resolve(&phrase)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{ModuleStore, NamedModule};

    fn handlers() -> Arc<ModuleHandlers> {
        let commands = ModuleStore::new();
        commands
            .register(Arc::new(NamedModule::new("ping").with_aliases(["p"])))
            .unwrap();
        Arc::new(ModuleHandlers::new(Arc::new(commands)))
    }

    #[test]
    fn test_command_lookups() {
        let handlers = handlers();
        let alias = ModuleCaster::new(ModuleKind::CommandAlias, Arc::clone(&handlers));
        let exact = ModuleCaster::new(ModuleKind::Command, Arc::clone(&handlers));

        let found = alias.resolve("P").unwrap().unwrap();
        assert_eq!(found.as_module().map(|m| m.id().to_owned()), Some("ping".to_owned()));
        assert!(exact.resolve("p").unwrap().is_none());
        assert!(exact.resolve("ping").unwrap().is_some());
        assert!(alias.resolve("").unwrap().is_none());
    }

    #[test]
    fn test_use_before_attach_is_an_error() {
        let handlers = handlers();
        let inhibitor = ModuleCaster::new(ModuleKind::Inhibitor, Arc::clone(&handlers));
        let listener = ModuleCaster::new(ModuleKind::Listener, Arc::clone(&handlers));

        assert!(matches!(
            inhibitor.resolve("blacklist"),
            Err(CastError::HandlerNotAttached { handler: "inhibitor" })
        ));
        assert!(matches!(
            listener.resolve("ready"),
            Err(CastError::HandlerNotAttached { handler: "listener" })
        ));

        let inhibitors = ModuleStore::new();
        inhibitors.register(Arc::new(NamedModule::new("blacklist"))).unwrap();
        handlers.attach_inhibitors(Arc::new(inhibitors));

        let found = inhibitor.resolve("blacklist").unwrap().unwrap();
        assert!(matches!(found, Value::Inhibitor(_)));
        assert!(inhibitor.resolve("missing").unwrap().is_none());
        assert!(listener.resolve("ready").is_err());
    }
}
