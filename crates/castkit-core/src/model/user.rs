//! Users and guild members.

use serde::{Deserialize, Serialize};

use crate::foundation::{Keyed, Snowflake};

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Snowflake,
    /// Account name.
    pub username: String,
    /// Four-digit discriminator.
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Whether the account is a bot.
    #[serde(default)]
    pub bot: bool,
}

fn default_discriminator() -> String {
    "0000".to_string()
}

impl User {
    /// Creates a user with the default discriminator.
    pub fn new(id: impl Into<Snowflake>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: default_discriminator(),
            bot: false,
        }
    }

    /// Sets the discriminator.
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    /// Returns `username#discriminator`.
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

impl Keyed for User {
    fn key(&self) -> Snowflake {
        self.id
    }
}

/// A user's membership in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The underlying user.
    pub user: User,
    /// Guild-specific nickname.
    #[serde(default)]
    pub nickname: Option<String>,
    /// Owning guild.
    pub guild_id: Snowflake,
}

impl Member {
    /// Creates a member without a nickname.
    pub fn new(user: User, guild_id: impl Into<Snowflake>) -> Self {
        Self {
            user,
            nickname: None,
            guild_id: guild_id.into(),
        }
    }

    /// Sets the nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Returns the member's user ID.
    pub fn id(&self) -> Snowflake {
        self.user.id
    }

    /// Returns the nickname, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.username)
    }
}

impl Keyed for Member {
    fn key(&self) -> Snowflake {
        self.user.id
    }
}
