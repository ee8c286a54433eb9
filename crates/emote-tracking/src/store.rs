//! Storage collaborator used by the tracker and the statistics command.

use async_trait::async_trait;
use emote_common::{EmoteId, EmoteRecord, GuildId, Result, ServerInfo};

/// Parameters of a statistics lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsQuery {
    /// Server whose emotes are listed.
    pub server: GuildId,
    /// Maximum number of rows.
    pub limit: u32,
    /// Trailing window, in days, for the window count.
    pub day_window: u32,
    /// Restrict the result to one emote.
    pub emote: Option<EmoteId>,
    /// Least used first instead of most used first.
    pub ascending: bool,
}

/// One row of the statistics result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteStatistics {
    /// Last known emote name.
    pub name: String,
    /// Emote snowflake.
    pub id: EmoteId,
    /// Uses since the emote was first seen.
    pub total_count: i64,
    /// Uses inside the trailing window.
    pub window_count: i64,
}

impl EmoteStatistics {
    /// Renders the emote back into chat markup.
    pub fn markup(&self) -> String {
        format!("<:{}:{}>", self.name, self.id)
    }
}

/// Persistent emote usage counters.
#[async_trait]
pub trait EmoteStore: Send + Sync {
    /// Counts every record once for `server`: creates the server and emote
    /// rows as needed, increments the emote's total, and increments today's
    /// bucket.
    async fn insert_emote_log(&self, records: &[EmoteRecord], server: &ServerInfo) -> Result<()>;

    /// Aggregates the daily buckets inside the query window, ordered by the
    /// window count.
    async fn query_statistics(&self, query: &StatisticsQuery) -> Result<Vec<EmoteStatistics>>;

    /// Removes daily buckets that are `days_old` days old or older and
    /// returns how many were removed.
    async fn purge_older_than(&self, days_old: u32) -> Result<u64>;
}
