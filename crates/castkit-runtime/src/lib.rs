//! castkit Runtime - configuration and assembly for the castkit type resolver.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`) with validation
//! - Logging setup from configuration (`logging`)
//! - `ResolverBuilder`, which turns a loaded configuration into a
//!   ready-to-use `TypeResolver`
//!
//! ```ignore
//! use castkit_runtime::{ConfigLoader, ResolverBuilder, logging};
//!
//! let config = ConfigLoader::new().load_validated()?;
//! logging::init_from_config(&config.logging);
//!
//! let resolver = ResolverBuilder::from_config(&config)
//!     .command_handler(commands)
//!     .build();
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;

pub use builder::ResolverBuilder;
pub use config::{
    CastkitConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig, ResolverConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{init_from_config, try_init_from_config};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
