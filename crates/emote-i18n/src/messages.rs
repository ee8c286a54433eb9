//! Message identifiers used by the bot.

/// Keys of the messages defined in every `bot.ftl`.
pub mod keys {
    /// `$name`
    pub const UNKNOWN_COMMAND: &str = "unknown-command";
    /// `$error`
    pub const MALFORMED_COMMAND: &str = "malformed-command";
    /// `$seconds`, `$name`
    pub const COOLDOWN_ACTIVE: &str = "cooldown-active";
    /// No arguments.
    pub const NOT_AUTHORIZED: &str = "not-authorized";
    /// No arguments.
    pub const NO_DATA: &str = "no-data";
    /// `$days`
    pub const USAGE_HEADER: &str = "usage-header";
    /// `$limit`
    pub const CLEAN_LIMIT: &str = "clean-limit";
    /// `$prefix`
    pub const HELP_HEADER: &str = "help-header";
    /// `$name`, `$cooldown`
    pub const HELP_ENTRY: &str = "help-entry";

    /// Every key, for completeness checks.
    pub const ALL: &[&str] = &[
        UNKNOWN_COMMAND,
        MALFORMED_COMMAND,
        COOLDOWN_ACTIVE,
        NOT_AUTHORIZED,
        NO_DATA,
        USAGE_HEADER,
        CLEAN_LIMIT,
        HELP_HEADER,
        HELP_ENTRY,
    ];
}
