//! # Emote Tracking
//!
//! Everything between an inbound chat event and the usage database:
//! extraction of emote markup from messages, suppression of repeated
//! reactions, the storage trait with its SQLite implementation, and the
//! nightly purge of stale daily buckets.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod extractor;
pub mod maintenance;
pub mod reaction_cache;
pub mod sqlite;
pub mod store;
pub mod tracker;

pub use extractor::{extract_emotes, parse_emote_reference};
pub use maintenance::{delay_until_next_run, spawn_daily_purge};
pub use reaction_cache::{ReactionHistoryCache, DEFAULT_HISTORY_CAPACITY};
pub use sqlite::SqliteEmoteStore;
pub use store::{EmoteStatistics, EmoteStore, StatisticsQuery};
pub use tracker::{EmoteTracker, MessageEvent, ReactionEvent, TrackedEvent};
