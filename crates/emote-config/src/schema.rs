//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure for the emote tracker bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Emote tracking configuration.
    pub tracking: TrackingConfig,
    /// Command configuration.
    pub commands: CommandsConfig,
    /// Logging configuration.
    pub logging: LoggingSection,
    /// Locale used for replies (e.g. "en-US", "sl-SI").
    pub locale: String,
    /// Program and arguments executed after a `reboot` command shut the bot
    /// down. Empty disables the system reboot and only stops the bot.
    pub reboot_command: Vec<String>,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix that marks a message as a command.
    pub prefix: String,
    /// Users allowed to run owner-only commands.
    pub owner_ids: Vec<u64>,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    pub url: String,
    /// Maximum pool size.
    pub max_connections: u32,
}

/// Emote tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Trailing window, in days, used by the statistics command.
    pub statistics_days: u32,
    /// Daily buckets older than this many days are purged every midnight.
    pub retention_days: u32,
    /// Reactions remembered per user for duplicate suppression.
    pub reaction_history: usize,
    /// Count an emote every time it appears in a message instead of once.
    pub allow_duplicates: bool,
}

/// Command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Cooldown applied to commands without an explicit entry.
    pub default_cooldown_seconds: u64,
    /// Per-command cooldown overrides, keyed by command name.
    pub cooldowns: HashMap<String, u64>,
    /// Reply to users whose command was rejected by a cooldown.
    pub notify_on_cooldown: bool,
    /// Hard upper bound for `usage --limit`.
    pub usage_limit: u32,
    /// Hard upper bound for `clean <limit>`.
    pub clean_limit: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level filter.
    pub level: String,
    /// Emit JSON lines.
    pub json: bool,
}

impl CommandsConfig {
    /// Cooldown for the named command.
    pub fn cooldown_for(&self, command: &str) -> u64 {
        self.cooldowns
            .get(command)
            .copied()
            .unwrap_or(self.default_cooldown_seconds)
    }
}
