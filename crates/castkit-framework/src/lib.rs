//! # castkit Framework
//!
//! The argument type resolver and its built-in casters.
//!
//! This layer provides:
//! - [`TypeResolver`], the registry mapping type names to casters
//! - The [`Caster`] trait and closure adapters ([`caster_fn`], [`sync_caster`])
//! - The built-in catalog ([`BuiltinType`]): scalars, entities, channel
//!   subtypes, "relevant" users, message and invite lookups, mentions, and
//!   module lookups
//! - [`FuzzyMatcher`], the default ranking oracle for entity casters
//! - Module registry traits and an in-memory [`ModuleStore`]
//!
//! Every caster answers with a [`CastResult`]: `Ok(Some(value))` on a match,
//! `Ok(None)` when the phrase does not resolve, and `Err` only for the few
//! conditions a caller must not mistake for "no match".

pub mod caster;
pub mod error;
pub mod matcher;
pub mod mention;
pub mod module;
pub mod resolver;
pub mod types;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use caster::{BoxedCaster, Caster, CasterFn, SyncCaster, caster_fn, into_caster, sync_caster};
pub use error::{CastError, CastResult};
pub use matcher::{FuzzyMatcher, MatchTier, Matchable};
pub use module::{
    CommandHandler, Module, ModuleError, ModuleHandler, ModuleHandlers, ModuleStore, NamedModule,
};
pub use resolver::{ResolverOptions, TypeResolver};
pub use types::entity::Arity;
pub use types::{BuiltinType, UnknownBuiltin};
pub use value::Value;
