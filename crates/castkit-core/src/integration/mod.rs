//! Integration layer - External system interfaces.
//!
//! This module contains the interface castkit consumes from a chat-platform
//! connection: cache snapshots and remote fetch primitives.

pub mod client;

pub use client::{BoxedClient, Client, downcast_client};
