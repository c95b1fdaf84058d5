//! Platform object identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Returned when a string is not a decimal snowflake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid snowflake: {0:?}")]
pub struct ParseSnowflakeError(pub String);

/// A platform object identifier.
///
/// Snowflakes are unsigned 64-bit integers. On the wire (and in mention
/// syntax) they travel as decimal strings, so serde and [`FromStr`] both use
/// the string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(pub u64);

impl Snowflake {
    /// Creates a snowflake from its raw integer value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = ParseSnowflakeError;

    /// Parses a decimal snowflake. Signs and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSnowflakeError(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ParseSnowflakeError(s.to_string()))
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(Self(id)),
            Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: Snowflake = "175928847299117063".parse().unwrap();
        assert_eq!(id.get(), 175928847299117063);
        assert_eq!(id.to_string(), "175928847299117063");
    }

    #[test]
    fn test_parse_rejects_sign_and_text() {
        assert!("+123".parse::<Snowflake>().is_err());
        assert!("-123".parse::<Snowflake>().is_err());
        assert!("12a".parse::<Snowflake>().is_err());
    }

    #[test]
    fn test_serde_accepts_string_and_integer() {
        let a: Snowflake = serde_json::from_str("\"42\"").unwrap();
        let b: Snowflake = serde_json::from_str("42").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"42\"");
    }
}
