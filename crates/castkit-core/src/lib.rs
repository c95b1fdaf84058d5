//! # castkit Core
//!
//! The domain model and client seam of the castkit argument resolver.
//!
//! This crate provides the data a caster reads and the interface it calls:
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! - **Identifiers**: [`Snowflake`]
//! - **Collections**: insertion-ordered, keyed [`Collection`]s used for caches
//!   and plural results
//! - **Context**: the per-message [`CastContext`]
//! - **Errors**: [`ApiError`] for remote fetches
//!
//! ### Model Layer
//!
//! Plain data snapshots: [`User`], [`Member`], [`Channel`], [`Role`],
//! [`Emoji`], [`Guild`], [`Message`], [`Invite`].
//!
//! ### Integration Layer
//!
//! - **Client**: cache access and fetch primitives ([`Client`])
//!
//! ```text
//! ┌──────────────┐  phrase   ┌──────────────┐  read / fetch  ┌──────────┐
//! │   Argument   │──────────▶│    Caster    │───────────────▶│  Client  │
//! │   pipeline   │◀──────────│ (framework)  │◀───────────────│ (caches) │
//! └──────────────┘   value   └──────────────┘                └──────────┘
//! ```

pub mod foundation;
pub mod integration;
pub mod model;

pub use foundation::{
    ApiError, ApiResult, CastContext, Collection, DEFAULT_MALFORMED_REQUEST_PREFIX, Keyed,
    ParseSnowflakeError, Snowflake,
};
pub use integration::{BoxedClient, Client, downcast_client};
pub use model::{Channel, ChannelKind, Emoji, Guild, Invite, Member, Message, Role, User};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::*;
    pub use super::model::*;
}
