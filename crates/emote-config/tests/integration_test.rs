//! Integration tests for emote-config crate.

use emote_common::test_utils::create_temp_dir;
use emote_config::{Config, ConfigError, ConfigLoader};
use std::fs;

#[test]
fn test_load_from_explicit_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("bot.yaml");
    fs::write(
        &path,
        r#"
discord:
  token: "file-token"
  prefix: "!!"
  owner_ids: [145196308985020416]
commands:
  cooldowns:
    usage: 30
locale: "sl-SI"
reboot_command: []
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();

    assert_eq!(config.discord.prefix, "!!");
    assert_eq!(config.discord.owner_ids, vec![145_196_308_985_020_416]);
    assert_eq!(config.commands.cooldown_for("usage"), 30);
    assert_eq!(config.commands.cooldown_for("help"), 10);
    assert_eq!(config.locale, "sl-SI");
    assert!(config.reboot_command.is_empty());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("absent.yaml");

    let err = ConfigLoader::read_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let err = ConfigLoader::parse("discord: [not, a, map").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.discord.prefix, "@@");
    assert_eq!(config.database.url, "sqlite:emotes.db");
    assert_eq!(config.tracking.statistics_days, 30);
    assert_eq!(config.tracking.retention_days, 30);
    assert!(!config.tracking.allow_duplicates);
    assert!(!config.commands.notify_on_cooldown);
    assert_eq!(config.commands.clean_limit, 100);
}
