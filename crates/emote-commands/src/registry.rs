//! Command registry for managing bot commands

use crate::arguments::{Arguments, Signature};
use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::platform::InboundMessage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A text command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Help text shown by the `help` command.
    fn help(&self) -> &'static str;

    /// Parameters the command accepts.
    fn signature(&self) -> Signature;

    /// Runs the command for `message`.
    async fn call(
        &self,
        ctx: &CommandContext,
        message: &InboundMessage,
        args: Arguments,
    ) -> CommandResult<()>;
}

/// A handler with its registry metadata.
#[derive(Clone)]
pub struct RegisteredCommand {
    /// Lowercase command name.
    pub name: String,
    /// Seconds a user must wait between successful uses.
    pub cooldown_seconds: u64,
    /// The command implementation.
    pub handler: Arc<dyn CommandHandler>,
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("name", &self.name)
            .field("cooldown_seconds", &self.cooldown_seconds)
            .finish_non_exhaustive()
    }
}

/// Registry for managing bot commands
///
/// Filled once at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    order: Vec<String>,
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Create a new command registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`. An existing command of the same
    /// name is replaced and keeps its place in the listing order.
    pub fn register(
        &mut self,
        name: &str,
        cooldown_seconds: u64,
        handler: Arc<dyn CommandHandler>,
    ) {
        let name = name.to_lowercase();
        if self.commands.contains_key(&name) {
            debug!("Replacing command '{}'", name);
        } else {
            self.order.push(name.clone());
        }

        self.commands.insert(
            name.clone(),
            RegisteredCommand {
                name,
                cooldown_seconds,
                handler,
            },
        );
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
