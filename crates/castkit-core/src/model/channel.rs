//! Channels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::User;
use crate::foundation::{Keyed, Snowflake};

/// The kind of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Private conversation between the client and one user.
    Dm,
    /// Guild text channel.
    Text,
    /// Guild voice channel.
    Voice,
    /// Guild category.
    Category,
    /// Guild announcement channel.
    News,
    /// Guild store channel.
    Store,
}

impl ChannelKind {
    /// Returns the lowercase kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dm => "dm",
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::News => "news",
            Self::Store => "store",
        }
    }

    /// Returns `true` for kinds that carry messages.
    pub fn is_text_based(&self) -> bool {
        matches!(self, Self::Dm | Self::Text | Self::News)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A channel, either guild-scoped or private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID.
    pub id: Snowflake,
    /// Channel name. Empty for private channels.
    #[serde(default)]
    pub name: String,
    /// Channel kind.
    pub kind: ChannelKind,
    /// Owning guild, absent for private channels.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// The other participant of a private channel.
    #[serde(default)]
    pub recipient: Option<User>,
}

impl Channel {
    /// Creates a guild channel.
    pub fn guild(
        id: impl Into<Snowflake>,
        name: impl Into<String>,
        kind: ChannelKind,
        guild_id: impl Into<Snowflake>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            guild_id: Some(guild_id.into()),
            recipient: None,
        }
    }

    /// Creates a private channel with `recipient`.
    pub fn dm(id: impl Into<Snowflake>, recipient: User) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: ChannelKind::Dm,
            guild_id: None,
            recipient: Some(recipient),
        }
    }

    /// Returns `true` for private conversations.
    pub fn is_private(&self) -> bool {
        self.kind == ChannelKind::Dm
    }
}

impl Keyed for Channel {
    fn key(&self) -> Snowflake {
        self.id
    }
}
