//! Shared fixtures for caster tests.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use castkit_core::{
    ApiError, ApiResult, BoxedClient, CastContext, Channel, ChannelKind, Client, Collection,
    Emoji, Guild, Invite, Member, Message, Role, Snowflake, User,
};

pub mod ids {
    use castkit_core::Snowflake;

    pub const BOT: Snowflake = Snowflake(100000000000000001);
    pub const ALICE: Snowflake = Snowflake(100000000000000002);
    pub const ALAN: Snowflake = Snowflake(100000000000000003);
    pub const BOB: Snowflake = Snowflake(100000000000000004);

    pub const GUILD: Snowflake = Snowflake(200000000000000001);

    pub const GENERAL: Snowflake = Snowflake(300000000000000001);
    pub const GENERAL_VOICE: Snowflake = Snowflake(300000000000000002);
    pub const LOUNGE: Snowflake = Snowflake(300000000000000003);
    pub const NEWS: Snowflake = Snowflake(300000000000000004);
    pub const SHOP: Snowflake = Snowflake(300000000000000005);
    pub const DM: Snowflake = Snowflake(300000000000000006);

    pub const MODS: Snowflake = Snowflake(400000000000000001);
    pub const BLOB: Snowflake = Snowflake(500000000000000001);

    pub const INVOKING_MESSAGE: Snowflake = Snowflake(600000000000000001);
}

pub fn user(id: Snowflake, name: &str) -> User {
    User::new(id, name)
}

pub fn guild() -> Guild {
    let mut guild = Guild::new(ids::GUILD, "castle");
    guild.members = [
        Member::new(user(ids::ALICE, "alice"), ids::GUILD).with_nickname("Ally"),
        Member::new(user(ids::ALAN, "alan"), ids::GUILD),
        Member::new(user(ids::BOT, "castkit"), ids::GUILD),
    ]
    .into_iter()
    .collect();
    guild.channels = [
        Channel::guild(ids::GENERAL, "general", ChannelKind::Text, ids::GUILD),
        Channel::guild(ids::GENERAL_VOICE, "general-voice", ChannelKind::Voice, ids::GUILD),
        Channel::guild(ids::LOUNGE, "lounge", ChannelKind::Category, ids::GUILD),
        Channel::guild(ids::NEWS, "announcements", ChannelKind::News, ids::GUILD),
        Channel::guild(ids::SHOP, "shop", ChannelKind::Store, ids::GUILD),
    ]
    .into_iter()
    .collect();
    guild.roles = [Role::new(ids::MODS, "mods", ids::GUILD)].into_iter().collect();
    guild.emojis = [Emoji::new(ids::BLOB, "blob", ids::GUILD)].into_iter().collect();
    guild
}

/// A client whose message fetches are scripted per channel.
pub struct MockClient {
    users: Arc<Collection<User>>,
    guilds: Arc<Collection<Guild>>,
    fetches: HashMap<Snowflake, ApiResult<Message>>,
    calls: Mutex<Vec<Snowflake>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::with_guild(guild())
    }

    pub fn with_guild(guild: Guild) -> Self {
        let users = [
            user(ids::BOT, "castkit"),
            user(ids::ALICE, "alice"),
            user(ids::ALAN, "alan"),
            user(ids::BOB, "bob"),
        ]
        .into_iter()
        .collect();
        Self {
            users: Arc::new(users),
            guilds: Arc::new([guild].into_iter().collect()),
            fetches: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts the result of fetching any message from `channel`.
    pub fn on_fetch(mut self, channel: Snowflake, result: ApiResult<Message>) -> Self {
        self.fetches.insert(channel, result);
        self
    }

    /// Channels fetched from, in call order.
    pub fn calls(&self) -> Vec<Snowflake> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Client for MockClient {
    fn user(&self) -> User {
        user(ids::BOT, "castkit")
    }

    fn users(&self) -> Arc<Collection<User>> {
        Arc::clone(&self.users)
    }

    fn guilds(&self) -> Arc<Collection<Guild>> {
        Arc::clone(&self.guilds)
    }

    async fn fetch_message(&self, channel: &Channel, _message_id: &str) -> ApiResult<Message> {
        self.calls.lock().push(channel.id);
        self.fetches
            .get(&channel.id)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::not_found("Message")))
    }

    async fn fetch_invite(&self, code: &str) -> ApiResult<Invite> {
        if code != "castkit" {
            return Err(ApiError::not_found("Invite"));
        }
        Ok(Invite {
            code: code.to_owned(),
            guild_id: Some(ids::GUILD),
            channel_id: ids::GENERAL,
            inviter: None,
        })
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

pub fn message_in(id: Snowflake, channel: Snowflake, content: &str) -> Message {
    Message::new(id, channel, user(ids::ALICE, "alice"), content)
}

/// A context in guild channel `channel_id` of the client's only guild.
pub fn context_in(client: Arc<MockClient>, channel_id: Snowflake) -> Arc<CastContext> {
    let channel = guild()
        .channels
        .get(&channel_id)
        .cloned()
        .unwrap_or_else(|| Channel::guild(channel_id, "unknown", ChannelKind::Text, ids::GUILD));
    let message = message_in(ids::INVOKING_MESSAGE, channel_id, "!cmd").in_guild(ids::GUILD);
    let client: BoxedClient = client;
    Arc::new(CastContext::new(client, message, channel))
}

/// A context in `#general`.
pub fn guild_context() -> Arc<CastContext> {
    context_in(Arc::new(MockClient::new()), ids::GENERAL)
}

/// A DM between bob and the bot.
pub fn dm_context_with(client: Arc<MockClient>) -> Arc<CastContext> {
    let bob = user(ids::BOB, "bob");
    let channel = Channel::dm(ids::DM, bob.clone());
    let message = Message::new(ids::INVOKING_MESSAGE, ids::DM, bob, "!cmd");
    let client: BoxedClient = client;
    Arc::new(CastContext::new(client, message, channel))
}

pub fn dm_context() -> Arc<CastContext> {
    dm_context_with(Arc::new(MockClient::new()))
}
