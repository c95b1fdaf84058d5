//! # castkit
//!
//! Typed argument resolution for chat-bot commands.
//!
//! ## Overview
//!
//! A command parser splits user input into phrases; castkit turns each phrase
//! into a typed value by name. `"integer"` parses a number, `"member"` finds a
//! guild member by ID, mention, or name, and `"guildMessage"` searches every
//! text channel of the guild for a message ID.
//!
//! ```text
//! ┌──────────┐  phrase  ┌──────────────┐  name  ┌────────┐     ┌────────────┐
//! │ Command  │─────────▶│ TypeResolver │───────▶│ Caster │────▶│ Client     │
//! │ parser   │◀─────────│              │        │        │     │ (cache,    │
//! └──────────┘  value   └──────────────┘        └────────┘     │  fetches)  │
//!                                                              └────────────┘
//! ```
//!
//! - **core**: platform models, the [`Client`](core::Client) seam and the cast context
//! - **framework**: the resolver, the caster trait and the built-in catalog
//! - **runtime**: configuration, logging and `ResolverBuilder`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use castkit::prelude::*;
//!
//! let config = ConfigLoader::new().load_validated()?;
//! castkit::runtime::logging::init_from_config(&config.logging);
//!
//! let resolver = ResolverBuilder::from_config(&config)
//!     .command_handler(commands)
//!     .build();
//!
//! match resolver.cast("member", ctx, "ally").await? {
//!     Some(Value::Member(member)) => { /* ... */ }
//!     _ => { /* no match */ }
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use castkit_core as core;
pub use castkit_framework as framework;
pub use castkit_runtime as runtime;

/// Prelude module for convenient imports.
pub mod prelude {
    // Assembly
    pub use castkit_runtime::{CastkitConfig, ConfigLoader, ResolverBuilder};

    // Resolver and casters
    pub use castkit_framework::{
        BoxedCaster, BuiltinType, CastError, CastResult, Caster, TypeResolver, Value, caster_fn,
        sync_caster,
    };

    // Module registries
    pub use castkit_framework::{CommandHandler, Module, ModuleHandler, ModuleStore, NamedModule};

    // Platform seam
    pub use castkit_core::{
        ApiError, ApiResult, BoxedClient, CastContext, Channel, ChannelKind, Client, Collection,
        Guild, Member, Message, Snowflake, User,
    };
}
