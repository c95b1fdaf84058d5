//! Entity resolvers.
//!
//! Every singular/plural entity pair is one [`EntityCaster`] configured with
//! a collection source and an [`Arity`]. Channel subtypes compose a kind
//! filter in front of the same resolution step.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use castkit_core::{
    CastContext, Channel, ChannelKind, Client, Collection, Emoji, Guild, Member, Role, User,
};

use crate::caster::Caster;
use crate::error::{CastError, CastResult};
use crate::matcher::{FuzzyMatcher, Matchable};
use crate::value::Value;

/// Whether a caster asks the oracle for one match or for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Best match only.
    One,
    /// Every match, as a non-empty collection.
    Many,
}

/// An entity that can be wrapped into a [`Value`].
pub(crate) trait Resolvable: Matchable + Send + Sync + 'static {
    fn one(self) -> Value;
    fn many(found: Collection<Self>) -> Value;
}

macro_rules! resolvable {
    ($($ty:ty => $one:ident, $many:ident;)*) => {
        $(
            impl Resolvable for $ty {
                fn one(self) -> Value {
                    Value::$one(self)
                }

                fn many(found: Collection<Self>) -> Value {
                    Value::$many(found)
                }
            }
        )*
    };
}

resolvable! {
    User => User, Users;
    Member => Member, Members;
    Channel => Channel, Channels;
    Role => Role, Roles;
    Emoji => Emoji, Emojis;
    Guild => Guild, Guilds;
}

/// Runs the oracle over `collection` and wraps the result.
///
/// An empty multi-match is `None`.
pub(crate) fn resolve_in<T: Resolvable>(
    matcher: &FuzzyMatcher,
    phrase: &str,
    collection: &Collection<T>,
    arity: Arity,
) -> Option<Value> {
    match arity {
        Arity::One => matcher.resolve_one(phrase, collection).cloned().map(T::one),
        Arity::Many => {
            let found = matcher.resolve_many(phrase, collection);
            (!found.is_empty()).then(|| T::many(found))
        }
    }
}

/// Where an entity caster reads its candidates from.
pub(crate) enum Source<T: 'static> {
    /// A client-wide cache.
    Client(fn(&dyn Client) -> Arc<Collection<T>>),
    /// A collection owned by the context's guild.
    Guild(fn(&Guild) -> &Collection<T>),
}

pub(crate) fn client_users(client: &dyn Client) -> Arc<Collection<User>> {
    client.users()
}

pub(crate) fn client_guilds(client: &dyn Client) -> Arc<Collection<Guild>> {
    client.guilds()
}

pub(crate) fn guild_members(guild: &Guild) -> &Collection<Member> {
    &guild.members
}

pub(crate) fn guild_channels(guild: &Guild) -> &Collection<Channel> {
    &guild.channels
}

pub(crate) fn guild_roles(guild: &Guild) -> &Collection<Role> {
    &guild.roles
}

pub(crate) fn guild_emojis(guild: &Guild) -> &Collection<Emoji> {
    &guild.emojis
}

/// Returns the context's guild or the access error for `type_name`.
pub(crate) fn require_guild<'a>(
    ctx: &'a CastContext,
    type_name: &'static str,
) -> Result<&'a Guild, CastError> {
    ctx.guild().ok_or(CastError::GuildRequired { type_name })
}

/// Generic singular/plural entity caster.
pub(crate) struct EntityCaster<T: 'static> {
    type_name: &'static str,
    source: Source<T>,
    arity: Arity,
    matcher: FuzzyMatcher,
}

impl<T: Resolvable> EntityCaster<T> {
    pub(crate) fn new(
        type_name: &'static str,
        source: Source<T>,
        arity: Arity,
        matcher: FuzzyMatcher,
    ) -> Self {
        Self {
            type_name,
            source,
            arity,
            matcher,
        }
    }

    fn resolve(&self, ctx: &CastContext, phrase: &str) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }
        let value = match self.source {
            Source::Client(get) => {
                let collection = get(&**ctx.client());
                resolve_in(&self.matcher, phrase, &collection, self.arity)
            }
            Source::Guild(get) => {
                let guild = require_guild(ctx, self.type_name)?;
                resolve_in(&self.matcher, phrase, get(guild), self.arity)
            }
        };
        Ok(value)
    }
}

impl<T: Resolvable> Caster for EntityCaster<T> {
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready(self.resolve(&ctx, &phrase)).boxed()
    }
}

/// Channel caster restricted to one [`ChannelKind`].
pub(crate) struct ChannelSubtypeCaster {
    type_name: &'static str,
    kind: ChannelKind,
    arity: Arity,
    matcher: FuzzyMatcher,
}

impl ChannelSubtypeCaster {
    pub(crate) fn new(
        type_name: &'static str,
        kind: ChannelKind,
        arity: Arity,
        matcher: FuzzyMatcher,
    ) -> Self {
        Self {
            type_name,
            kind,
            arity,
            matcher,
        }
    }

    fn resolve(&self, ctx: &CastContext, phrase: &str) -> CastResult {
        if phrase.is_empty() {
            return Ok(None);
        }
        let guild = require_guild(ctx, self.type_name)?;
        let channels = guild.channels.filter(|channel| channel.kind == self.kind);
        Ok(resolve_in(&self.matcher, phrase, &channels, self.arity))
    }
}

impl Caster for ChannelSubtypeCaster {
    fn cast(&self, ctx: Arc<CastContext>, phrase: String) -> BoxFuture<'static, CastResult> {
        future::ready(self.resolve(&ctx, &phrase)).boxed()
    }
}
