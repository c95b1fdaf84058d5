//! Remote lookups: `message`, `guildMessage`, `relevantMessage`, `invite`.
//!
//! `guildMessage` walks the guild's text-based channels one at a time and
//! fetches the ID from each. A fetch that fails because the request itself
//! was rejected aborts the walk: the same ID would be rejected by every other
//! channel too.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, trace};

use castkit_core::{ApiResult, CastContext, Guild, Message};

use super::entity::require_guild;
use crate::caster::Caster;
use crate::error::CastResult;
use crate::value::Value;

/// Outcome of one step of the guild-wide search.
#[derive(Debug)]
pub(crate) enum Step {
    /// The message was found; stop.
    Found(Message),
    /// Not in this channel; try the next one.
    Continue,
    /// The request can never succeed; stop without a result.
    Abort,
}

impl Step {
    pub(crate) fn classify(result: ApiResult<Message>, malformed_prefix: &str) -> Self {
        match result {
            Ok(message) => Self::Found(message),
            Err(err) if err.is_malformed_request(malformed_prefix) => Self::Abort,
            Err(_) => Self::Continue,
        }
    }
}

/// Fetches `id` from the originating channel.
async fn fetch_direct(ctx: &CastContext, id: &str) -> Option<Message> {
    match ctx.client().fetch_message(ctx.channel(), id).await {
        Ok(message) => Some(message),
        Err(err) => {
            trace!(
                message_id = id,
                channel = %ctx.channel().id,
                error = %err,
                "Direct message fetch failed"
            );
            None
        }
    }
}

/// Searches every text-based channel of `guild` for `id`, in order.
pub(crate) async fn search_guild(
    ctx: &CastContext,
    guild: &Guild,
    id: &str,
    malformed_prefix: &str,
) -> Option<Message> {
    for channel in guild.channels.iter().filter(|c| c.kind.is_text_based()) {
        trace!(message_id = id, channel = %channel.id, "Searching channel for message");
        let result = ctx.client().fetch_message(channel, id).await;
        match Step::classify(result, malformed_prefix) {
            Step::Found(message) => return Some(message),
            Step::Continue => continue,
            Step::Abort => {
                debug!(
                    message_id = id,
                    channel = %channel.id,
                    "Malformed message ID, aborting guild search"
                );
                return None;
            }
        }
    }
    None
}

/// Which lookup strategy a [`MessageCaster`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageScope {
    /// Originating channel only.
    Channel,
    /// Every text-based channel of the guild.
    Guild,
    /// Originating channel, then the guild if there is one.
    Relevant,
}

pub(crate) struct MessageCaster {
    type_name: &'static str,
    scope: MessageScope,
    malformed_prefix: Arc<str>,
}

impl MessageCaster {
    pub(crate) fn new(
        type_name: &'static str,
        scope: MessageScope,
        malformed_prefix: Arc<str>,
    ) -> Self {
        Self {
            type_name,
            scope,
            malformed_prefix,
        }
    }

    async fn lookup(
        ctx: Arc<CastContext>,
        phrase: String,
        type_name: &'static str,
        scope: MessageScope,
        prefix: Arc<str>,
    ) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }
        let found = match scope {
            MessageScope::Channel => fetch_direct(&ctx, &phrase).await,
            MessageScope::Guild => {
                let guild = require_guild(&ctx, type_name)?;
                search_guild(&ctx, guild, &phrase, &prefix).await
            }
            MessageScope::Relevant => match fetch_direct(&ctx, &phrase).await {
                Some(message) => Some(message),
                None => match ctx.guild() {
                    Some(guild) => search_guild(&ctx, guild, &phrase, &prefix).await,
                    None => None,
                },
            },
        };
        Ok(found.map(Value::Message))
    }
}

impl Caster for MessageCaster {
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        let prefix = Arc::clone(&self.malformed_prefix);
        Self::lookup(ctx, phrase, self.type_name, self.scope, prefix).boxed()
    }
}

/// Fetches an invite by code.
pub(crate) async fn invite(ctx: Arc<CastContext>, phrase: String) -> CastResult {
    if phrase.is_empty() {
        return Ok(None);
    }
    match ctx.client().fetch_invite(&phrase).await {
        Ok(invite) => Ok(Some(Value::Invite(invite))),
        Err(err) => {
            trace!(code = %phrase, error = %err, "Invite fetch failed");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CastError;
    use crate::test_support::{MockClient, context_in, dm_context, dm_context_with, ids, message_in};
    use castkit_core::{ApiError, Channel, ChannelKind, DEFAULT_MALFORMED_REQUEST_PREFIX, Snowflake};

    const FOUND: Snowflake = Snowflake(700000000000000001);

    fn caster(scope: MessageScope) -> MessageCaster {
        MessageCaster::new("guildMessage", scope, Arc::from(DEFAULT_MALFORMED_REQUEST_PREFIX))
    }

    fn malformed() -> ApiError {
        ApiError::http(400, "Invalid Form Body\nmessage_id: Value \"x\" is not snowflake.")
    }

    #[test]
    fn test_classify() {
        let prefix = DEFAULT_MALFORMED_REQUEST_PREFIX;
        let ok = Step::classify(Ok(message_in(FOUND, ids::GENERAL, "hi")), prefix);
        assert!(matches!(ok, Step::Found(_)));
        let missing = Step::classify(Err(ApiError::not_found("Message")), prefix);
        assert!(matches!(missing, Step::Continue));
        assert!(matches!(Step::classify(Err(ApiError::Timeout), prefix), Step::Continue));
        assert!(matches!(Step::classify(Err(malformed()), prefix), Step::Abort));
    }

    #[tokio::test]
    async fn test_guild_search_aborts_on_malformed_request() {
        // A voice, B text (not found), C text (malformed), D text (would succeed).
        let mut guild = crate::test_support::guild();
        guild.channels = [
            Channel::guild(ids::GENERAL_VOICE, "a", ChannelKind::Voice, ids::GUILD),
            Channel::guild(ids::GENERAL, "b", ChannelKind::Text, ids::GUILD),
            Channel::guild(ids::NEWS, "c", ChannelKind::Text, ids::GUILD),
            Channel::guild(ids::SHOP, "d", ChannelKind::Text, ids::GUILD),
        ]
        .into_iter()
        .collect();

        let client = Arc::new(
            MockClient::with_guild(guild)
                .on_fetch(ids::GENERAL, Err(ApiError::not_found("Message")))
                .on_fetch(ids::NEWS, Err(malformed()))
                .on_fetch(ids::SHOP, Ok(message_in(FOUND, ids::SHOP, "found"))),
        );
        let ctx = context_in(Arc::clone(&client), ids::GENERAL);

        let result = caster(MessageScope::Guild).cast(ctx, "x".into()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(client.calls(), [ids::GENERAL, ids::NEWS]);
    }

    #[tokio::test]
    async fn test_guild_search_first_success_wins() {
        let client = Arc::new(
            MockClient::new()
                .on_fetch(ids::NEWS, Ok(message_in(FOUND, ids::NEWS, "found"))),
        );
        let ctx = context_in(Arc::clone(&client), ids::GENERAL);

        let result = caster(MessageScope::Guild).cast(ctx, FOUND.to_string()).await.unwrap();
        assert_eq!(result.unwrap().as_message().map(|m| m.channel_id), Some(ids::NEWS));
        // Voice, category and store channels are never fetched from.
        assert_eq!(client.calls(), [ids::GENERAL, ids::NEWS]);
    }

    #[tokio::test]
    async fn test_direct_lookup_only_tries_origin() {
        let client = Arc::new(
            MockClient::new()
                .on_fetch(ids::NEWS, Ok(message_in(FOUND, ids::NEWS, "found"))),
        );
        let ctx = context_in(Arc::clone(&client), ids::GENERAL);
        let result = caster(MessageScope::Channel).cast(ctx, FOUND.to_string()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(client.calls(), [ids::GENERAL]);
    }

    #[tokio::test]
    async fn test_relevant_falls_back_to_guild() {
        let client = Arc::new(
            MockClient::new()
                .on_fetch(ids::NEWS, Ok(message_in(FOUND, ids::NEWS, "found"))),
        );
        let ctx = context_in(Arc::clone(&client), ids::GENERAL);
        let result = caster(MessageScope::Relevant).cast(ctx, FOUND.to_string()).await.unwrap();
        assert!(result.is_some());
        assert_eq!(client.calls(), [ids::GENERAL, ids::GENERAL, ids::NEWS]);
    }

    #[tokio::test]
    async fn test_relevant_in_dm_skips_guild_search() {
        let client = Arc::new(MockClient::new());
        let ctx = dm_context_with(Arc::clone(&client));
        let result = caster(MessageScope::Relevant).cast(ctx, FOUND.to_string()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(client.calls(), [ids::DM]);
    }

    #[tokio::test]
    async fn test_guild_message_requires_guild() {
        let err = caster(MessageScope::Guild)
            .cast(dm_context(), FOUND.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CastError::GuildRequired { .. }));
    }

    #[tokio::test]
    async fn test_invite() {
        let found = invite(dm_context(), "castkit".into()).await.unwrap();
        assert_eq!(found.unwrap().as_invite().map(|i| i.channel_id), Some(ids::GENERAL));
        assert!(invite(dm_context(), "missing".into()).await.unwrap().is_none());
        assert!(invite(dm_context(), String::new()).await.unwrap().is_none());
    }
}
