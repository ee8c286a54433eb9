//! Built-in commands.

mod clean;
mod help;
mod mono;
mod reboot;
mod usage;

pub use clean::CleanCommand;
pub use help::HelpCommand;
pub use mono::MonoCommand;
pub use reboot::{RebootCommand, DENIAL_VISIBLE_FOR};
pub use usage::UsageCommand;

use crate::registry::CommandRegistry;
use emote_config::CommandsConfig;
use std::sync::Arc;

/// Registers `help`, `usage`, `reboot`, `clean` and `mono` with their
/// configured cooldowns.
pub fn register_builtin_commands(registry: &mut CommandRegistry, config: &CommandsConfig) {
    registry.register("help", config.cooldown_for("help"), Arc::new(HelpCommand));
    registry.register("usage", config.cooldown_for("usage"), Arc::new(UsageCommand));
    registry.register("reboot", config.cooldown_for("reboot"), Arc::new(RebootCommand));
    registry.register("clean", config.cooldown_for("clean"), Arc::new(CleanCommand));
    registry.register("mono", config.cooldown_for("mono"), Arc::new(MonoCommand));
}
