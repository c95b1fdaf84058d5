//! The built-in caster catalog.
//!
//! [`BuiltinType`] names every caster a fresh [`TypeResolver`] knows about.
//! The casters themselves are grouped by what they need:
//!
//! - [`scalar`], [`numeric`] – context-free parsing
//! - [`entity`] – fuzzy resolution over cached collections
//! - [`relevant`] – context-dependent user resolution
//! - [`message`] – remote fetches
//! - [`mention`] – exact mention grammars
//! - [`module`] – command, inhibitor and listener registries
//!
//! [`TypeResolver`]: crate::TypeResolver

pub mod entity;
pub mod mention;
pub mod message;
pub mod module;
pub mod numeric;
pub mod relevant;
pub mod scalar;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use castkit_core::ChannelKind;

use crate::caster::{BoxedCaster, caster_fn, into_caster, sync_caster};
use crate::matcher::FuzzyMatcher;
use crate::module::ModuleHandlers;

use entity::{Arity, ChannelSubtypeCaster, EntityCaster, Resolvable, Source};
use mention::{MentionCaster, MentionTarget};
use message::{MessageCaster, MessageScope};
use module::{ModuleCaster, ModuleKind};
use relevant::RelevantCaster;

macro_rules! builtin_types {
    ($($variant:ident => $name:literal,)*) => {
        /// Names of the built-in casters.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BuiltinType {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        impl BuiltinType {
            /// Every built-in type, in catalog order.
            pub const ALL: &'static [BuiltinType] = &[$(BuiltinType::$variant,)*];

            /// The registry key of this type.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(BuiltinType::$variant => $name,)*
                }
            }
        }

        impl FromStr for BuiltinType {
            type Err = UnknownBuiltin;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(BuiltinType::$variant),)*
                    _ => Err(UnknownBuiltin(s.to_owned())),
                }
            }
        }
    };
}

builtin_types! {
    String => "string",
    Lowercase => "lowercase",
    Uppercase => "uppercase",
    CharCodes => "charCodes",
    Number => "number",
    Integer => "integer",
    BigInt => "bigint",
    Emojint => "emojint",
    Url => "url",
    Date => "date",
    Color => "color",
    User => "user",
    Users => "users",
    Member => "member",
    Members => "members",
    Relevant => "relevant",
    Relevants => "relevants",
    Channel => "channel",
    Channels => "channels",
    TextChannel => "textChannel",
    TextChannels => "textChannels",
    VoiceChannel => "voiceChannel",
    VoiceChannels => "voiceChannels",
    CategoryChannel => "categoryChannel",
    CategoryChannels => "categoryChannels",
    NewsChannel => "newsChannel",
    NewsChannels => "newsChannels",
    StoreChannel => "storeChannel",
    StoreChannels => "storeChannels",
    Role => "role",
    Roles => "roles",
    Emoji => "emoji",
    Emojis => "emojis",
    Guild => "guild",
    Guilds => "guilds",
    Message => "message",
    GuildMessage => "guildMessage",
    RelevantMessage => "relevantMessage",
    Invite => "invite",
    UserMention => "userMention",
    MemberMention => "memberMention",
    ChannelMention => "channelMention",
    RoleMention => "roleMention",
    EmojiMention => "emojiMention",
    CommandAlias => "commandAlias",
    Command => "command",
    Inhibitor => "inhibitor",
    Listener => "listener",
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a name that is not a built-in type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a built-in type")]
pub struct UnknownBuiltin(pub String);

/// What the built-in casters are parameterized with.
#[derive(Debug, Clone)]
pub(crate) struct BuiltinEnv {
    pub(crate) matcher: FuzzyMatcher,
    pub(crate) malformed_prefix: Arc<str>,
    pub(crate) modules: Arc<ModuleHandlers>,
}

fn entity_caster<T: Resolvable>(
    name: &'static str,
    source: Source<T>,
    arity: Arity,
    matcher: FuzzyMatcher,
) -> BoxedCaster {
    into_caster(EntityCaster::new(name, source, arity, matcher))
}

impl BuiltinType {
    /// Builds the caster for this type.
    pub(crate) fn caster(self, env: &BuiltinEnv) -> BoxedCaster {
        use BuiltinType as B;

        let name = self.as_str();
        let m = env.matcher;
        let subtype_caster =
            |kind, arity| into_caster(ChannelSubtypeCaster::new(name, kind, arity, m));
        let message_caster = |scope| {
            into_caster(MessageCaster::new(name, scope, Arc::clone(&env.malformed_prefix)))
        };
        let mention_caster = |target| into_caster(MentionCaster::new(name, target));
        let module_caster = |kind| into_caster(ModuleCaster::new(kind, Arc::clone(&env.modules)));

        match self {
            B::String => sync_caster(scalar::string),
            B::Lowercase => sync_caster(scalar::lowercase),
            B::Uppercase => sync_caster(scalar::uppercase),
            B::CharCodes => sync_caster(scalar::char_codes),
            B::Number => sync_caster(numeric::number),
            B::Integer => sync_caster(numeric::integer),
            B::BigInt => sync_caster(numeric::bigint),
            B::Emojint => sync_caster(numeric::emojint),
            B::Url => sync_caster(scalar::url),
            B::Date => sync_caster(scalar::date),
            B::Color => sync_caster(scalar::color),

            B::User => entity_caster(name, Source::Client(entity::client_users), Arity::One, m),
            B::Users => entity_caster(name, Source::Client(entity::client_users), Arity::Many, m),
            B::Member => entity_caster(name, Source::Guild(entity::guild_members), Arity::One, m),
            B::Members => entity_caster(name, Source::Guild(entity::guild_members), Arity::Many, m),
            B::Relevant => into_caster(RelevantCaster::new(name, Arity::One, m)),
            B::Relevants => into_caster(RelevantCaster::new(name, Arity::Many, m)),
            B::Channel => entity_caster(name, Source::Guild(entity::guild_channels), Arity::One, m),
            B::Channels => {
                entity_caster(name, Source::Guild(entity::guild_channels), Arity::Many, m)
            }
            B::TextChannel => subtype_caster(ChannelKind::Text, Arity::One),
            B::TextChannels => subtype_caster(ChannelKind::Text, Arity::Many),
            B::VoiceChannel => subtype_caster(ChannelKind::Voice, Arity::One),
            B::VoiceChannels => subtype_caster(ChannelKind::Voice, Arity::Many),
            B::CategoryChannel => subtype_caster(ChannelKind::Category, Arity::One),
            B::CategoryChannels => subtype_caster(ChannelKind::Category, Arity::Many),
            B::NewsChannel => subtype_caster(ChannelKind::News, Arity::One),
            B::NewsChannels => subtype_caster(ChannelKind::News, Arity::Many),
            B::StoreChannel => subtype_caster(ChannelKind::Store, Arity::One),
            B::StoreChannels => subtype_caster(ChannelKind::Store, Arity::Many),
            B::Role => entity_caster(name, Source::Guild(entity::guild_roles), Arity::One, m),
            B::Roles => entity_caster(name, Source::Guild(entity::guild_roles), Arity::Many, m),
            B::Emoji => entity_caster(name, Source::Guild(entity::guild_emojis), Arity::One, m),
            B::Emojis => entity_caster(name, Source::Guild(entity::guild_emojis), Arity::Many, m),
            B::Guild => entity_caster(name, Source::Client(entity::client_guilds), Arity::One, m),
            B::Guilds => entity_caster(name, Source::Client(entity::client_guilds), Arity::Many, m),

            B::Message => message_caster(MessageScope::Channel),
            B::GuildMessage => message_caster(MessageScope::Guild),
            B::RelevantMessage => message_caster(MessageScope::Relevant),
            B::Invite => caster_fn(message::invite),

            B::UserMention => mention_caster(MentionTarget::User),
            B::MemberMention => mention_caster(MentionTarget::Member),
            B::ChannelMention => mention_caster(MentionTarget::Channel),
            B::RoleMention => mention_caster(MentionTarget::Role),
            B::EmojiMention => mention_caster(MentionTarget::Emoji),

            B::CommandAlias => module_caster(ModuleKind::CommandAlias),
            B::Command => module_caster(ModuleKind::Command),
            B::Inhibitor => module_caster(ModuleKind::Inhibitor),
            B::Listener => module_caster(ModuleKind::Listener),
        }
    }
}
