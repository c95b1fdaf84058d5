//! `relevant` / `relevants`: the "who do you mean here" casters.
//!
//! The search space depends on where the command was sent:
//!
//! - in a DM, only the two participants (the other party and the bot);
//! - in a guild text or news channel, the guild members, unwrapped to users;
//! - anywhere else, the whole user cache.
//!
//! The result is always user-kind.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use castkit_core::{CastContext, ChannelKind, Collection, User};

use super::entity::{Arity, require_guild, resolve_in};
use crate::caster::Caster;
use crate::error::CastResult;
use crate::matcher::FuzzyMatcher;
use crate::value::Value;

pub(crate) struct RelevantCaster {
    type_name: &'static str,
    arity: Arity,
    matcher: FuzzyMatcher,
}

impl RelevantCaster {
    pub(crate) fn new(type_name: &'static str, arity: Arity, matcher: FuzzyMatcher) -> Self {
        Self {
            type_name,
            arity,
            matcher,
        }
    }

    fn resolve(&self, ctx: &CastContext, phrase: &str) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }

        let channel = ctx.channel();
        if channel.is_private() {
            let mut participants = Collection::new();
            if let Some(recipient) = &channel.recipient {
                participants.insert(recipient.clone());
            }
            participants.insert(ctx.client().user());
            return Ok(resolve_in(&self.matcher, phrase, &participants, self.arity));
        }

        if matches!(channel.kind, ChannelKind::Text | ChannelKind::News) {
            let members = &require_guild(ctx, self.type_name)?.members;
            let value = match self.arity {
                Arity::One => self
                    .matcher
                    .resolve_one(phrase, members)
                    .map(|member| Value::User(member.user.clone())),
                Arity::Many => {
                    let found = self.matcher.resolve_many(phrase, members);
                    (!found.is_empty()).then(|| {
                        Value::Users(found.map_values(|member| member.user))
                    })
                }
            };
            return Ok(value);
        }

        let users: Arc<Collection<User>> = ctx.client().users();
        Ok(resolve_in(&self.matcher, phrase, &users, self.arity))
    }
}

impl Caster for RelevantCaster {
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready(self.resolve(&ctx, &phrase)).boxed()
    }
}
