//! Mention grammars.
//!
//! Each grammar is anchored on both ends: a phrase that merely *contains* a
//! mention does not match. Identifiers are 17 to 20 decimal digits.

use std::sync::LazyLock;

use regex::Regex;

use castkit_core::Snowflake;

static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d{17,20})>$").unwrap());

static CHANNEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<#(\d{17,20})>$").unwrap());

static ROLE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@&(\d{17,20})>$").unwrap());

static EMOJI_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<a?:[A-Za-z0-9_]+:(\d{17,20})>$").unwrap());

fn capture_id(re: &Regex, phrase: &str) -> Option<Snowflake> {
    re.captures(phrase)?.get(1)?.as_str().parse().ok()
}

/// Parses `<@ID>` or `<@!ID>`.
pub fn parse_user_mention(phrase: &str) -> Option<Snowflake> {
    capture_id(&USER_MENTION, phrase)
}

/// Parses `<#ID>`.
pub fn parse_channel_mention(phrase: &str) -> Option<Snowflake> {
    capture_id(&CHANNEL_MENTION, phrase)
}

/// Parses `<@&ID>`.
pub fn parse_role_mention(phrase: &str) -> Option<Snowflake> {
    capture_id(&ROLE_MENTION, phrase)
}

/// Parses `<:name:ID>` or `<a:name:ID>`.
pub fn parse_emoji_mention(phrase: &str) -> Option<Snowflake> {
    capture_id(&EMOJI_MENTION, phrase)
}
