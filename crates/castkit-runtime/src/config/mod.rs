//! Configuration for castkit.
//!
//! Settings are read from TOML/YAML files and `CASTKIT_*` environment
//! variables, then validated before a resolver is built from them.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    CastkitConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, ResolverConfig,
    SpanEventConfig,
};
pub use validation::validate_config;
