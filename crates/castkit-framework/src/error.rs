//! Error types for castkit casters.
//!
//! Most invalid input is *not* an error: a caster that cannot make sense of
//! its phrase returns `Ok(None)`. The variants below are the cases the
//! resolver deliberately does not fold into "no match".

use thiserror::Error;

use crate::value::Value;

/// Errors a caster (or the resolver) can surface to its caller.
#[derive(Debug, Clone, Error)]
pub enum CastError {
    /// No caster is registered under this type name.
    #[error("unknown type '{0}'")]
    UnknownType(String),

    /// The phrase looks numeric but is not an integer literal.
    ///
    /// Raised by the `bigint` caster only.
    #[error("cannot convert '{phrase}' to a big integer: {reason}")]
    InvalidBigInt {
        /// The offending phrase.
        phrase: String,
        /// Parser message.
        reason: String,
    },

    /// A guild-scoped type was cast outside of a guild.
    #[error("type '{type_name}' can only be resolved inside a guild")]
    GuildRequired {
        /// The type that was cast.
        type_name: &'static str,
    },

    /// A module type was cast before its handler was attached.
    #[error("{handler} handler has not been attached to the type resolver")]
    HandlerNotAttached {
        /// `"inhibitor"` or `"listener"`.
        handler: &'static str,
    },

    /// Custom caster error.
    #[error("{0}")]
    Custom(String),
}

impl CastError {
    /// Creates a custom cast error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Result type of every caster.
///
/// `Ok(None)` is the "no match / invalid input" sentinel.
pub type CastResult = Result<Option<Value>, CastError>;
