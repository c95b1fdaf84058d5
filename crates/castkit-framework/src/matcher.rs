//! The default fuzzy-match oracle.
//!
//! [`FuzzyMatcher`] ranks the entries of a [`Collection`] against a phrase.
//! Each entry is classified into a [`MatchTier`]; the best tier wins and ties
//! go to the entry that comes first in collection order.
//!
//! | Tier              | Condition                                         |
//! |-------------------|---------------------------------------------------|
//! | `Id`              | phrase is the entry's snowflake                   |
//! | `Mention`         | phrase is a mention of the entry                  |
//! | `NameExact`       | a name equals the phrase (sigil stripped)         |
//! | `NameInsensitive` | same, ignoring case                               |
//! | `Partial`         | a name contains the phrase, ignoring case         |

use std::borrow::Cow;

use castkit_core::{Channel, Collection, Emoji, Guild, Keyed, Member, Role, Snowflake, User};

use crate::mention;

/// An entity the oracle can rank.
pub trait Matchable: Keyed + Clone {
    /// Candidate names, most specific first.
    fn names(&self) -> Vec<Cow<'_, str>>;

    /// Extracts the ID from a mention of this kind of entity.
    fn mentioned_id(_phrase: &str) -> Option<Snowflake> {
        None
    }

    /// Removes the sigil users commonly type in front of a name.
    fn strip_sigil(phrase: &str) -> &str {
        phrase
    }
}

impl Matchable for User {
    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.username), Cow::Owned(self.tag())]
    }

    fn mentioned_id(phrase: &str) -> Option<Snowflake> {
        mention::parse_user_mention(phrase)
    }
}

impl Matchable for Member {
    fn names(&self) -> Vec<Cow<'_, str>> {
        let mut names = Vec::with_capacity(3);
        if let Some(nick) = &self.nickname {
            names.push(Cow::Borrowed(nick.as_str()));
        }
        names.push(Cow::Borrowed(self.user.username.as_str()));
        names.push(Cow::Owned(self.user.tag()));
        names
    }

    fn mentioned_id(phrase: &str) -> Option<Snowflake> {
        mention::parse_user_mention(phrase)
    }
}

impl Matchable for Channel {
    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }

    fn mentioned_id(phrase: &str) -> Option<Snowflake> {
        mention::parse_channel_mention(phrase)
    }

    fn strip_sigil(phrase: &str) -> &str {
        phrase.strip_prefix('#').unwrap_or(phrase)
    }
}

impl Matchable for Role {
    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }

    fn mentioned_id(phrase: &str) -> Option<Snowflake> {
        mention::parse_role_mention(phrase)
    }

    fn strip_sigil(phrase: &str) -> &str {
        phrase.strip_prefix('@').unwrap_or(phrase)
    }
}

impl Matchable for Emoji {
    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }

    fn mentioned_id(phrase: &str) -> Option<Snowflake> {
        mention::parse_emoji_mention(phrase)
    }

    fn strip_sigil(phrase: &str) -> &str {
        phrase
            .strip_prefix(':')
            .and_then(|p| p.strip_suffix(':'))
            .unwrap_or(phrase)
    }
}

impl Matchable for Guild {
    fn names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.name)]
    }
}

/// How well an entry matched. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Exact snowflake.
    Id,
    /// Exact mention.
    Mention,
    /// Case-sensitive name equality.
    NameExact,
    /// Case-insensitive name equality.
    NameInsensitive,
    /// Case-insensitive substring.
    Partial,
}

/// Precedence-ordered matcher over keyed collections.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    /// Whether the `Partial` tier is considered.
    pub partial: bool,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self { partial: true }
    }
}

impl FuzzyMatcher {
    /// Creates a matcher.
    pub fn new(partial: bool) -> Self {
        Self { partial }
    }

    /// Classifies one entry, or `None` if it does not match at all.
    pub fn tier<T: Matchable>(&self, phrase: &str, entry: &T) -> Option<MatchTier> {
        let key = entry.key();
        if phrase.parse::<Snowflake>().is_ok_and(|id| id == key) {
            return Some(MatchTier::Id);
        }
        if T::mentioned_id(phrase) == Some(key) {
            return Some(MatchTier::Mention);
        }

        let bare = T::strip_sigil(phrase);
        let names = entry.names();
        if names.iter().any(|n| n == phrase || n == bare) {
            return Some(MatchTier::NameExact);
        }

        let lower = bare.to_lowercase();
        if names.iter().any(|n| n.to_lowercase() == lower) {
            return Some(MatchTier::NameInsensitive);
        }
        if self.partial
            && !lower.is_empty()
            && names.iter().any(|n| n.to_lowercase().contains(&lower))
        {
            return Some(MatchTier::Partial);
        }
        None
    }

    /// Returns the single best match.
    pub fn resolve_one<'a, T: Matchable>(
        &self,
        phrase: &str,
        collection: &'a Collection<T>,
    ) -> Option<&'a T> {
        let mut best: Option<(MatchTier, &T)> = None;
        for entry in collection {
            let Some(tier) = self.tier(phrase, entry) else {
                continue;
            };
            if best.is_none_or(|(current, _)| tier < current) {
                best = Some((tier, entry));
                if tier == MatchTier::Id {
                    break;
                }
            }
        }
        best.map(|(_, entry)| entry)
    }

    /// Returns every match, in collection order. May be empty.
    pub fn resolve_many<T: Matchable>(
        &self,
        phrase: &str,
        collection: &Collection<T>,
    ) -> Collection<T> {
        collection.filter(|entry| self.tier(phrase, entry).is_some())
    }
}
