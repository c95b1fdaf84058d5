//! Guilds and the objects they own.

use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::user::Member;
use crate::foundation::{Collection, Keyed, Snowflake};

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID.
    pub id: Snowflake,
    /// Role name.
    pub name: String,
    /// Owning guild.
    pub guild_id: Snowflake,
}

impl Role {
    /// Creates a role.
    pub fn new(
        id: impl Into<Snowflake>,
        name: impl Into<String>,
        guild_id: impl Into<Snowflake>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            guild_id: guild_id.into(),
        }
    }
}

impl Keyed for Role {
    fn key(&self) -> Snowflake {
        self.id
    }
}

/// A custom guild emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Emoji ID.
    pub id: Snowflake,
    /// Emoji name, without colons.
    pub name: String,
    /// Whether the emoji is animated.
    #[serde(default)]
    pub animated: bool,
    /// Owning guild.
    pub guild_id: Snowflake,
}

impl Emoji {
    /// Creates a static emoji.
    pub fn new(
        id: impl Into<Snowflake>,
        name: impl Into<String>,
        guild_id: impl Into<Snowflake>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            animated: false,
            guild_id: guild_id.into(),
        }
    }

    /// Returns the mention form, `<:name:id>` or `<a:name:id>`.
    pub fn mention(&self) -> String {
        let prefix = if self.animated { "a" } else { "" };
        format!("<{prefix}:{}:{}>", self.name, self.id)
    }
}

impl Keyed for Emoji {
    fn key(&self) -> Snowflake {
        self.id
    }
}

/// A guild together with its cached members, channels, roles and emojis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    /// Guild ID.
    pub id: Snowflake,
    /// Guild name.
    pub name: String,
    /// Cached members.
    #[serde(default)]
    pub members: Collection<Member>,
    /// Cached channels.
    #[serde(default)]
    pub channels: Collection<Channel>,
    /// Cached roles.
    #[serde(default)]
    pub roles: Collection<Role>,
    /// Cached emojis.
    #[serde(default)]
    pub emojis: Collection<Emoji>,
}

impl Guild {
    /// Creates a guild with empty caches.
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Keyed for Guild {
    fn key(&self) -> Snowflake {
        self.id
    }
}
