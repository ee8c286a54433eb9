//! Command line arguments

use clap::Parser;
use emote_common::LoggingConfig;
use emote_config::LoggingSection;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "EMOTE_BOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Logging settings from the configuration file, with command line
    /// flags taking precedence.
    pub fn logging_config(&self, section: &LoggingSection) -> LoggingConfig {
        LoggingConfig {
            level: self
                .log_level
                .clone()
                .unwrap_or_else(|| section.level.clone()),
            json_format: self.json_logs || section.json,
            ..LoggingConfig::default()
        }
    }
}
