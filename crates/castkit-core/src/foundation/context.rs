//! Invocation context for casters.
//!
//! This module provides [`CastContext`], the bundle a caster receives next to
//! the phrase: the message being parsed, the channel it came from, the owning
//! guild (if any) and the platform client.

use std::sync::Arc;

use crate::integration::client::BoxedClient;
use crate::model::{Channel, Guild, Message, User};

/// The context object passed to casters.
///
/// `CastContext` is read-only. It is created once per parsed message and
/// shared (behind an `Arc`) by every caster invocation for that message.
///
/// # Example
///
/// ```rust,ignore
/// use castkit_core::CastContext;
///
/// let ctx = CastContext::new(client, message, channel);
/// if let Some(guild) = ctx.guild() {
///     println!("{} members cached", guild.members.len());
/// }
/// ```
pub struct CastContext {
    /// The platform client.
    client: BoxedClient,
    /// The message whose content is being parsed.
    message: Message,
    /// The channel the message was sent in.
    channel: Channel,
    /// The guild owning `channel`, if any.
    guild: Option<Arc<Guild>>,
}

impl CastContext {
    /// Creates a context for `message` sent in `channel`.
    ///
    /// The guild is looked up in the client's guild cache by the channel's
    /// guild ID. Private channels have no guild.
    pub fn new(client: BoxedClient, message: Message, channel: Channel) -> Self {
        let guild = channel
            .guild_id
            .and_then(|id| client.guilds().get(&id).cloned())
            .map(Arc::new);
        Self {
            client,
            message,
            channel,
            guild,
        }
    }

    /// Overrides the guild, e.g. with a snapshot the caller already holds.
    pub fn with_guild(mut self, guild: Arc<Guild>) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Returns the platform client.
    pub fn client(&self) -> &BoxedClient {
        &self.client
    }

    /// Returns the message being parsed.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the author of the message.
    pub fn author(&self) -> &User {
        &self.message.author
    }

    /// Returns the originating channel.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the owning guild, if the conversation is guild-scoped.
    pub fn guild(&self) -> Option<&Guild> {
        self.guild.as_deref()
    }

    /// Returns `true` for private conversations.
    pub fn is_private(&self) -> bool {
        self.channel.is_private()
    }
}

impl std::fmt::Debug for CastContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastContext")
            .field("message", &self.message.id)
            .field("channel", &self.channel.id)
            .field("guild", &self.guild.as_ref().map(|g| g.id))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ApiError, ApiResult, Collection};
    use crate::integration::client::{Client, downcast_client};
    use crate::model::{ChannelKind, Invite};
    use async_trait::async_trait;
    use std::any::Any;

    struct MockClient {
        guilds: Arc<Collection<Guild>>,
    }

    #[async_trait]
    impl Client for MockClient {
        fn user(&self) -> User {
            User::new(1, "castkit")
        }

        fn users(&self) -> Arc<Collection<User>> {
            Arc::new(Collection::new())
        }

        fn guilds(&self) -> Arc<Collection<Guild>> {
            Arc::clone(&self.guilds)
        }

        async fn fetch_message(&self, _channel: &Channel, _id: &str) -> ApiResult<Message> {
            Err(ApiError::NotConnected)
        }

        async fn fetch_invite(&self, _code: &str) -> ApiResult<Invite> {
            Err(ApiError::NotConnected)
        }

        fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    fn mock_client() -> BoxedClient {
        let guilds = [Guild::new(10, "castle")].into_iter().collect();
        Arc::new(MockClient {
            guilds: Arc::new(guilds),
        })
    }

    #[test]
    fn test_guild_resolved_from_cache() {
        let author = User::new(2, "alice");
        let channel = Channel::guild(20, "general", ChannelKind::Text, 10);
        let message = Message::new(30, 20, author, "!ping").in_guild(10);

        let ctx = CastContext::new(mock_client(), message, channel);
        assert!(!ctx.is_private());
        assert_eq!(ctx.guild().map(|g| g.name.as_str()), Some("castle"));
        assert_eq!(ctx.author().username, "alice");
    }

    #[test]
    fn test_private_channel_has_no_guild() {
        let author = User::new(2, "alice");
        let channel = Channel::dm(21, author.clone());
        let message = Message::new(31, 21, author, "!ping");

        let ctx = CastContext::new(mock_client(), message, channel);
        assert!(ctx.is_private());
        assert!(ctx.guild().is_none());
    }

    #[test]
    fn test_downcast_client() {
        let client = mock_client();
        assert!(downcast_client::<MockClient>(client).is_some());
    }
}
