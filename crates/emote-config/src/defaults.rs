//! Default values for every configuration section.

use crate::schema::*;
use std::collections::HashMap;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "@@";

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            database: DatabaseConfig::default(),
            tracking: TrackingConfig::default(),
            commands: CommandsConfig::default(),
            logging: LoggingSection::default(),
            locale: DEFAULT_LOCALE.to_string(),
            reboot_command: vec!["reboot".to_string()],
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            owner_ids: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:emotes.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            statistics_days: 30,
            retention_days: 30,
            reaction_history: 100,
            allow_duplicates: false,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            default_cooldown_seconds: 10,
            cooldowns: HashMap::new(),
            notify_on_cooldown: false,
            usage_limit: 40,
            clean_limit: 100,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
