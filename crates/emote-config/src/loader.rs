//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ValidationErrors;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "EMOTE_BOT_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<ConfigError> for emote_common::EmoteBotError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration.
    ///
    /// The file is taken from `explicit`, then `EMOTE_BOT_CONFIG`, then
    /// `config.yaml`/`config.yml` in the working directory. Without a file
    /// the defaults are used. Environment overrides are applied last and the
    /// result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                ["config.yaml", "config.yml"]
                    .into_iter()
                    .map(PathBuf::from)
                    .find(|p| p.exists())
            });

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::read_file(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML file without overrides or validation.
    pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses YAML text. Missing sections and fields take their defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies overrides read through `lookup` (the process environment in
    /// production).
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            debug!("Discord token taken from environment");
            config.discord.token = token;
        }

        if let Some(prefix) = lookup("EMOTE_BOT_PREFIX") {
            config.discord.prefix = prefix;
        }

        if let Some(url) = lookup("EMOTE_BOT_DATABASE_URL") {
            config.database.url = url;
        }

        if let Some(locale) = lookup("EMOTE_BOT_LOCALE") {
            config.locale = locale;
        }

        if let Some(owners) = lookup("EMOTE_BOT_OWNER_IDS") {
            config.discord.owner_ids = owners
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u64>().map_err(|e| ConfigError::EnvParse {
                        var: "EMOTE_BOT_OWNER_IDS".to_string(),
                        message: format!("'{s}': {e}"),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(())
    }
}
