//! Messages and invites.

use serde::{Deserialize, Serialize};

use super::user::User;
use crate::foundation::{Keyed, Snowflake};

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID.
    pub id: Snowflake,
    /// Channel the message was posted in.
    pub channel_id: Snowflake,
    /// Guild of the channel, absent in private conversations.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Author of the message.
    pub author: User,
    /// Text content.
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Creates a message.
    pub fn new(
        id: impl Into<Snowflake>,
        channel_id: impl Into<Snowflake>,
        author: User,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            guild_id: None,
            author,
            content: content.into(),
        }
    }

    /// Sets the guild.
    pub fn in_guild(mut self, guild_id: impl Into<Snowflake>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }
}

impl Keyed for Message {
    fn key(&self) -> Snowflake {
        self.id
    }
}

/// A guild invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    /// Invite code, e.g. `"abc123"`.
    pub code: String,
    /// Guild the invite leads to.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Channel the invite leads to.
    pub channel_id: Snowflake,
    /// User who created the invite.
    #[serde(default)]
    pub inviter: Option<User>,
}
