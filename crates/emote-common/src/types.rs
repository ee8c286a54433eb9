//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake_id!(
    /// A Discord user ID.
    UserId
);
snowflake_id!(
    /// A Discord channel ID.
    ChannelId
);
snowflake_id!(
    /// A Discord guild (server) ID.
    GuildId
);
snowflake_id!(
    /// A Discord message ID.
    MessageId
);
snowflake_id!(
    /// A custom emote ID.
    EmoteId
);

/// One occurrence of a tracked custom emote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmoteRecord {
    /// Emote name as written in the markup (`<:name:id>`).
    pub name: String,
    /// Emote snowflake.
    pub id: EmoteId,
}

impl EmoteRecord {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, id: EmoteId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    /// Renders the record back into chat markup.
    #[must_use]
    pub fn markup(&self) -> String {
        format!("<:{}:{}>", self.name, self.id)
    }
}

/// The server an event originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Guild snowflake.
    pub id: GuildId,
    /// Guild display name.
    pub name: String,
}

impl ServerInfo {
    /// Creates a new server descriptor.
    pub fn new(id: GuildId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(EmoteId(123).to_string(), "123");
        assert_eq!(UserId::from(42).get(), 42);
    }

    #[test]
    fn test_record_markup() {
        let record = EmoteRecord::new("pog", EmoteId(987_654_321));
        assert_eq!(record.markup(), "<:pog:987654321>");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&GuildId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
