//! Insertion-ordered keyed collection.
//!
//! [`Collection`] is the container every cache and every plural cast result
//! uses. It behaves like an ordered map from [`Snowflake`] to entity:
//!
//! - iteration follows insertion order (the "natural order" of a cache),
//! - inserting an existing key replaces the value in place,
//! - lookups by key are O(1).
//!
//! The key is derived from the value through [`Keyed`], so a collection can
//! never hold an entry under the wrong id.

use indexmap::IndexMap;
use indexmap::map::{IntoValues, Values};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::snowflake::Snowflake;

/// Types that carry their own collection key.
pub trait Keyed {
    /// Returns the identity used as the collection key.
    fn key(&self) -> Snowflake;
}

/// An insertion-ordered collection of keyed entities.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    entries: IndexMap<Snowflake, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under its own key.
    ///
    /// If the key is already present the value is replaced in place (the
    /// original position is kept) and the previous value is returned.
    pub fn insert(&mut self, value: T) -> Option<T> {
        self.entries.insert(value.key(), value)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &Snowflake) -> Option<&T> {
        self.entries.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key(&self, key: &Snowflake) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry in insertion order.
    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, value)| value)
    }

    /// Iterates values in insertion order.
    pub fn iter(&self) -> Values<'_, Snowflake, T> {
        self.entries.values()
    }

    /// Alias of [`iter`](Self::iter).
    pub fn values(&self) -> Values<'_, Snowflake, T> {
        self.entries.values()
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Snowflake> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the first value matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.entries.values().find(|value| predicate(value))
    }

    /// Returns a new collection with the values matching `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
        T: Clone,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(_, value)| predicate(value))
            .map(|(key, value)| (*key, value.clone()))
            .collect();
        Self { entries }
    }

    /// Transforms every value, re-keying the result by the new values' keys.
    ///
    /// When two transformed values share a key the later one replaces the
    /// earlier one, keeping the earlier position.
    pub fn map_values<U, F>(self, f: F) -> Collection<U>
    where
        U: Keyed,
        F: FnMut(T) -> U,
    {
        self.entries.into_values().map(f).collect()
    }
}

impl<T: Keyed> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<T: Keyed> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|value| (value.key(), value)));
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = IntoValues<Snowflake, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, Snowflake, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

// Order-sensitive, unlike `IndexMap`'s own equality.
impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Collection::from_iter)
    }
}
