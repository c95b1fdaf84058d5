//! Client trait and related types.
//!
//! This module defines the [`Client`] trait, the seam between the resolver
//! and a live chat-platform connection. The resolver only ever reads cache
//! snapshots and issues the two fetches declared here.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::foundation::{ApiResult, Collection};
use crate::model::{Channel, Guild, Invite, Message, User};

/// The platform client as seen by casters.
///
/// Cache accessors return shared snapshots. Implementations backed by a
/// mutable cache should hand out a fresh `Arc` when the cache changes rather
/// than mutating a snapshot that was already given out.
///
/// # API Design
///
/// - `user`, `users`, `guilds`: read-only cache access
/// - `fetch_message`, `fetch_invite`: remote fetches; failures are typed
///   [`ApiError`](crate::ApiError)s so callers can tell a missing object
///   from a malformed request
#[async_trait]
pub trait Client: Send + Sync {
    /// Returns the client's own user identity.
    fn user(&self) -> User;

    /// Returns the cached users.
    fn users(&self) -> Arc<Collection<User>>;

    /// Returns the cached guilds, with their members, channels, roles and
    /// emojis.
    fn guilds(&self) -> Arc<Collection<Guild>>;

    /// Fetches a message by ID from one channel.
    ///
    /// # Arguments
    ///
    /// * `channel` - The channel to look in
    /// * `message_id` - The raw message identifier as typed by the user; it
    ///   is passed through unvalidated
    async fn fetch_message(&self, channel: &Channel, message_id: &str) -> ApiResult<Message>;

    /// Fetches an invite by its code.
    async fn fetch_invite(&self, code: &str) -> ApiResult<Invite>;

    /// Returns self as an `Arc<dyn Any>` for safe downcasting.
    ///
    /// Implementors should simply return `self`.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// A boxed Client trait object.
pub type BoxedClient = Arc<dyn Client>;

/// Attempts to downcast a [`BoxedClient`] to a specific concrete type.
///
/// Custom casters use this to reach platform-specific APIs that are not part
/// of the [`Client`] trait.
pub fn downcast_client<T: Client + 'static>(client: BoxedClient) -> Option<Arc<T>> {
    let any_arc = client.as_any();
    Arc::downcast::<T>(any_arc).ok()
}
