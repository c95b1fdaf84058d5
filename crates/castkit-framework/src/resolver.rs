//! The type resolver: a registry of casters keyed by type name.
//!
//! A [`TypeResolver`] starts out with the whole built-in catalog
//! ([`BuiltinType`]) and accepts further registrations at any time.
//! Registering a name that already exists replaces the previous caster.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use castkit_framework::{ModuleStore, TypeResolver, Value, sync_caster};
//!
//! let mut resolver = TypeResolver::new(Arc::new(ModuleStore::new()));
//! resolver.register("even", sync_caster(|_ctx, phrase| {
//!     Ok(phrase.parse::<i64>().ok().filter(|n| n % 2 == 0).map(Value::Integer))
//! }));
//!
//! let value = resolver.cast("even", ctx, "42").await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use castkit_core::{CastContext, DEFAULT_MALFORMED_REQUEST_PREFIX};

use crate::caster::BoxedCaster;
use crate::error::{CastError, CastResult};
use crate::matcher::FuzzyMatcher;
use crate::module::{CommandHandler, ModuleHandler, ModuleHandlers};
use crate::types::{BuiltinEnv, BuiltinType};

/// Options for the built-in casters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Whether entity casters accept substring matches.
    pub partial_matching: bool,
    /// Error message prefix that marks a fetch as malformed.
    pub malformed_request_prefix: String,
    /// Built-in types that are not registered.
    pub disabled_types: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            partial_matching: true,
            malformed_request_prefix: DEFAULT_MALFORMED_REQUEST_PREFIX.to_owned(),
            disabled_types: Vec::new(),
        }
    }
}

/// Registry of argument casters.
///
/// Registration takes `&mut self` and is meant for the setup phase; lookups
/// and casts take `&self`. Inhibitor and listener handlers can be attached
/// through a shared reference at any time, and casters created earlier see
/// them.
pub struct TypeResolver {
    types: HashMap<String, BoxedCaster>,
    modules: Arc<ModuleHandlers>,
}

impl TypeResolver {
    /// Creates a resolver with every built-in type and default options.
    pub fn new(command_handler: Arc<dyn CommandHandler>) -> Self {
        Self::with_options(command_handler, ResolverOptions::default())
    }

    /// Creates a resolver with every built-in type not disabled in `options`.
    pub fn with_options(
        command_handler: Arc<dyn CommandHandler>,
        options: ResolverOptions,
    ) -> Self {
        let modules = Arc::new(ModuleHandlers::new(command_handler));
        let env = BuiltinEnv {
            matcher: FuzzyMatcher::new(options.partial_matching),
            malformed_prefix: Arc::from(options.malformed_request_prefix.as_str()),
            modules: Arc::clone(&modules),
        };

        for name in &options.disabled_types {
            if name.parse::<BuiltinType>().is_err() {
                warn!(type_name = %name, "Disabled type is not a built-in type, ignoring");
            }
        }

        let types = BuiltinType::ALL
            .iter()
            .filter(|ty| !options.disabled_types.iter().any(|d| d == ty.as_str()))
            .map(|ty| (ty.as_str().to_owned(), ty.caster(&env)))
            .collect::<HashMap<_, _>>();

        debug!(
            types = types.len(),
            partial_matching = options.partial_matching,
            "Created type resolver"
        );
        Self { types, modules }
    }

    /// Returns the caster registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<BoxedCaster> {
        self.types.get(name).cloned()
    }

    /// Registers `caster` under `name`, replacing any previous caster.
    pub fn register(&mut self, name: impl Into<String>, caster: BoxedCaster) -> &mut Self {
        let name = name.into();
        let replaced = self.types.insert(name.clone(), caster).is_some();
        debug!(type_name = %name, replaced, "Registered type caster");
        self
    }

    /// Registers every `(name, caster)` pair, in iteration order.
    pub fn register_all<I, S>(&mut self, casters: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, BoxedCaster)>,
        S: Into<String>,
    {
        for (name, caster) in casters {
            self.register(name, caster);
        }
        self
    }

    /// Returns `true` if a caster is registered under `name`.
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Binds the inhibitor registry used by the `inhibitor` type.
    pub fn attach_inhibitor_handler(&self, handler: Arc<dyn ModuleHandler>) {
        debug!("Attached inhibitor handler");
        self.modules.attach_inhibitors(handler);
    }

    /// Binds the listener registry used by the `listener` type.
    pub fn attach_listener_handler(&self, handler: Arc<dyn ModuleHandler>) {
        debug!("Attached listener handler");
        self.modules.attach_listeners(handler);
    }

    /// Returns the module registries the built-in casters read.
    pub fn modules(&self) -> &Arc<ModuleHandlers> {
        &self.modules
    }

    /// Looks up `name` and casts `phrase` with it.
    pub async fn cast(
        &self,
        name: &str,
        ctx: Arc<CastContext>,
        phrase: impl Into<String>,
    ) -> CastResult {
        let caster = self
            .lookup(name)
            .ok_or_else(|| CastError::UnknownType(name.to_owned()))?;
        caster.cast(ctx, phrase.into()).await
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeResolver")
            .field("types", &self.types.len())
            .field("modules", &self.modules)
            .finish()
    }
}
