//! Values produced by casters.

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use url::Url;

use castkit_core::{
    Channel, Collection, Emoji, Guild, Invite, Member, Message, Role, User,
};

use crate::module::Module;

/// A successfully cast argument.
///
/// Plural variants always hold a non-empty collection: casters return `None`
/// instead of an empty one.
#[derive(Debug, Clone)]
pub enum Value {
    /// Text (`string`, `lowercase`, `uppercase`).
    String(String),
    /// Unicode code points (`charCodes`).
    CharCodes(Vec<u32>),
    /// Floating point number (`number`).
    Number(f64),
    /// Integer (`integer`, `emojint`).
    Integer(i64),
    /// Arbitrary precision integer (`bigint`).
    BigInt(BigInt),
    /// Absolute URL (`url`).
    Url(Url),
    /// Point in time (`date`).
    Date(DateTime<Utc>),
    /// 24-bit RGB color (`color`).
    Color(u32),
    /// A user.
    User(User),
    /// Several users.
    Users(Collection<User>),
    /// A guild member.
    Member(Member),
    /// Several guild members.
    Members(Collection<Member>),
    /// A channel.
    Channel(Channel),
    /// Several channels.
    Channels(Collection<Channel>),
    /// A role.
    Role(Role),
    /// Several roles.
    Roles(Collection<Role>),
    /// An emoji.
    Emoji(Emoji),
    /// Several emojis.
    Emojis(Collection<Emoji>),
    /// A guild.
    Guild(Guild),
    /// Several guilds.
    Guilds(Collection<Guild>),
    /// A message.
    Message(Message),
    /// An invite.
    Invite(Invite),
    /// A command module.
    Command(Arc<dyn Module>),
    /// An inhibitor module.
    Inhibitor(Arc<dyn Module>),
    /// A listener module.
    Listener(Arc<dyn Module>),
    /// Output of a user-registered caster.
    Custom(Arc<dyn Any + Send + Sync>),
}

macro_rules! accessors {
    ($($variant:ident => $name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!(
                "Returns the inner value if this is `Value::",
                stringify!($variant),
                "`."
            )]
            pub fn $name(&self) -> Option<&$ty> {
                match self {
                    Self::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        )*
    };
}

impl Value {
    accessors! {
        String => as_string: String,
        CharCodes => as_char_codes: Vec<u32>,
        Number => as_number: f64,
        Integer => as_integer: i64,
        BigInt => as_bigint: BigInt,
        Url => as_url: Url,
        Date => as_date: DateTime<Utc>,
        Color => as_color: u32,
        User => as_user: User,
        Users => as_users: Collection<User>,
        Member => as_member: Member,
        Members => as_members: Collection<Member>,
        Channel => as_channel: Channel,
        Channels => as_channels: Collection<Channel>,
        Role => as_role: Role,
        Roles => as_roles: Collection<Role>,
        Emoji => as_emoji: Emoji,
        Emojis => as_emojis: Collection<Emoji>,
        Guild => as_guild: Guild,
        Guilds => as_guilds: Collection<Guild>,
        Message => as_message: Message,
        Invite => as_invite: Invite,
    }

    /// Returns the module if this is a command, inhibitor or listener.
    pub fn as_module(&self) -> Option<&Arc<dyn Module>> {
        match self {
            Self::Command(m) | Self::Inhibitor(m) | Self::Listener(m) => Some(m),
            _ => None,
        }
    }

    /// Downcasts the output of a custom caster.
    pub fn downcast_custom<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Self::Custom(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns a short name for the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::CharCodes(_) => "char_codes",
            Self::Number(_) => "number",
            Self::Integer(_) => "integer",
            Self::BigInt(_) => "bigint",
            Self::Url(_) => "url",
            Self::Date(_) => "date",
            Self::Color(_) => "color",
            Self::User(_) => "user",
            Self::Users(_) => "users",
            Self::Member(_) => "member",
            Self::Members(_) => "members",
            Self::Channel(_) => "channel",
            Self::Channels(_) => "channels",
            Self::Role(_) => "role",
            Self::Roles(_) => "roles",
            Self::Emoji(_) => "emoji",
            Self::Emojis(_) => "emojis",
            Self::Guild(_) => "guild",
            Self::Guilds(_) => "guilds",
            Self::Message(_) => "message",
            Self::Invite(_) => "invite",
            Self::Command(_) => "command",
            Self::Inhibitor(_) => "inhibitor",
            Self::Listener(_) => "listener",
            Self::Custom(_) => "custom",
        }
    }
}
