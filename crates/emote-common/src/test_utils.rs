//! Test utilities and shared test helpers.
//!
//! Enabled for this crate's own tests and for other crates through the
//! `testing` feature.

use crate::types::{ChannelId, EmoteId, GuildId, MessageId, ServerInfo, UserId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Builds a calendar date, panicking on invalid input.
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Discord-shaped fixtures.
pub mod discord_fixtures {
    use super::*;

    /// A user that issues commands in tests.
    pub const fn test_user_id() -> UserId {
        UserId(145_196_308_985_020_416)
    }

    /// A second, unprivileged user.
    pub const fn other_user_id() -> UserId {
        UserId(200_000_000_000_000_001)
    }

    /// The bot's own user id.
    pub const fn bot_user_id() -> UserId {
        UserId(999_999_999_999_999_999)
    }

    /// Test channel.
    pub const fn test_channel_id() -> ChannelId {
        ChannelId(640_135_183_382_872_075)
    }

    /// Test message.
    pub const fn test_message_id() -> MessageId {
        MessageId(1_100_000_000_000_000_000)
    }

    /// Test guild.
    pub fn test_server() -> ServerInfo {
        ServerInfo::new(GuildId(300_000_000_000_000_003), "Test Server")
    }

    /// Emotes that exist on the test guild.
    pub fn guild_emotes() -> HashSet<EmoteId> {
        [EmoteId(111), EmoteId(222), EmoteId(333)].into_iter().collect()
    }
}
