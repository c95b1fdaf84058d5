//! Mention casters: exact grammar, exact key.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use castkit_core::{CastContext, Snowflake};

use super::entity::require_guild;
use crate::caster::Caster;
use crate::error::CastResult;
use crate::mention::{
    parse_channel_mention, parse_emoji_mention, parse_role_mention, parse_user_mention,
};
use crate::value::Value;

/// What a mention points at and where it is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MentionTarget {
    /// Client user cache.
    User,
    /// Guild members.
    Member,
    /// Guild channels.
    Channel,
    /// Guild roles.
    Role,
    /// Guild emojis.
    Emoji,
}

impl MentionTarget {
    fn parse(self, phrase: &str) -> Option<Snowflake> {
        match self {
            Self::User | Self::Member => parse_user_mention(phrase),
            Self::Channel => parse_channel_mention(phrase),
            Self::Role => parse_role_mention(phrase),
            Self::Emoji => parse_emoji_mention(phrase),
        }
    }
}

pub(crate) struct MentionCaster {
    type_name: &'static str,
    target: MentionTarget,
}

impl MentionCaster {
    pub(crate) fn new(type_name: &'static str, target: MentionTarget) -> Self {
        Self { type_name, target }
    }

    fn resolve(&self, ctx: &CastContext, phrase: &str) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }
        let Some(id) = self.target.parse(phrase) else {
            return Ok(None);
        };

        let guild = || require_guild(ctx, self.type_name);
        let value = match self.target {
            MentionTarget::User => ctx.client().users().get(&id).cloned().map(Value::User),
            MentionTarget::Member => guild()?.members.get(&id).cloned().map(Value::Member),
            MentionTarget::Channel => guild()?.channels.get(&id).cloned().map(Value::Channel),
            MentionTarget::Role => guild()?.roles.get(&id).cloned().map(Value::Role),
            MentionTarget::Emoji => guild()?.emojis.get(&id).cloned().map(Value::Emoji),
        };
        Ok(value)
    }
}

impl Caster for MentionCaster {
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready(self.resolve(&ctx, &phrase)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CastError;
    use crate::test_support::{dm_context, guild_context, ids};

    async fn cast(target: MentionTarget, ctx: Arc<CastContext>, phrase: &str) -> CastResult {
        MentionCaster::new("mention", target).cast(ctx, phrase.to_owned()).await
    }

    #[tokio::test]
    async fn test_exact_key_lookup() {
        let member = cast(MentionTarget::Member, guild_context(), &format!("<@!{}>", ids::ALICE))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.as_member().map(|m| m.id()), Some(ids::ALICE));

        let channel = cast(MentionTarget::Channel, guild_context(), &format!("<#{}>", ids::NEWS))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(channel.as_channel().map(|c| c.id), Some(ids::NEWS));

        let phrase = format!("<@&{}>", ids::MODS);
        let role = cast(MentionTarget::Role, guild_context(), &phrase).await.unwrap();
        assert!(role.is_some());

        let phrase = format!("<:blob:{}>", ids::BLOB);
        let emoji = cast(MentionTarget::Emoji, guild_context(), &phrase).await.unwrap();
        assert!(emoji.is_some());
    }

    #[tokio::test]
    async fn test_user_mention_works_outside_guilds() {
        let phrase = format!("<@{}>", ids::BOB);
        let user = cast(MentionTarget::User, dm_context(), &phrase).await.unwrap();
        assert_eq!(user.unwrap().as_user().map(|u| u.id), Some(ids::BOB));
    }

    #[tokio::test]
    async fn test_rejects_embedded_or_bare_ids() {
        let phrase = format!("hey <@{}>", ids::ALICE);
        assert!(cast(MentionTarget::User, guild_context(), &phrase).await.unwrap().is_none());
        assert!(
            cast(MentionTarget::User, guild_context(), &ids::ALICE.to_string())
                .await
                .unwrap()
                .is_none()
        );
        // Channel grammar does not accept a user mention.
        let phrase = format!("<@{}>", ids::GENERAL);
        assert!(cast(MentionTarget::Channel, guild_context(), &phrase).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_is_null() {
        let phrase = "<@&999999999999999999>";
        assert!(cast(MentionTarget::Role, guild_context(), phrase).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_grammar_checked_before_guild() {
        // No grammar match: null, even without a guild.
        assert!(cast(MentionTarget::Role, dm_context(), "mods").await.unwrap().is_none());

        let phrase = format!("<@&{}>", ids::MODS);
        let err = cast(MentionTarget::Role, dm_context(), &phrase).await.unwrap_err();
        assert!(matches!(err, CastError::GuildRequired { .. }));
    }
}
