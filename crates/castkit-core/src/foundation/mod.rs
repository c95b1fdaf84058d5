//! Foundation layer - Core abstractions and type system.
//!
//! This module contains the fundamental building blocks of castkit:
//! - Snowflake identifiers and the insertion-ordered [`Collection`]
//! - The [`CastContext`] handed to every caster
//! - The error taxonomy of remote fetches

pub mod collection;
pub mod context;
pub mod error;
pub mod snowflake;

pub use collection::{Collection, Keyed};
pub use context::CastContext;
pub use error::{ApiError, ApiResult, DEFAULT_MALFORMED_REQUEST_PREFIX};
pub use snowflake::{ParseSnowflakeError, Snowflake};
