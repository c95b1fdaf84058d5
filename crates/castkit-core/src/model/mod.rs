//! Platform domain objects.
//!
//! These are plain data snapshots: the client owns the live caches and hands
//! out clones, so nothing here is mutated by the resolver.

pub mod channel;
pub mod guild;
pub mod message;
pub mod user;

pub use channel::{Channel, ChannelKind};
pub use guild::{Emoji, Guild, Role};
pub use message::{Invite, Message};
pub use user::{Member, User};
