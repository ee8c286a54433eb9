//! Routing of inbound messages to commands or to emote tracking.

use crate::arguments::Arguments;
use crate::context::CommandContext;
use crate::cooldown::{CooldownError, CooldownTracker};
use crate::parser::parse_command;
use crate::platform::InboundMessage;
use chrono::{DateTime, Utc};
use emote_common::truncate_string;
use emote_i18n::keys;
use emote_tracking::EmoteTracker;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Room left for the failure text inside the malformed command reply.
const MAX_ERROR_LENGTH: usize = 1800;

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Posted by the bot itself.
    OwnMessage,
    /// Routed to emote tracking; carries the number of records written.
    Tracked(usize),
    /// No command of that name is registered.
    UnknownCommand(String),
    /// The user is still on cooldown for the command.
    OnCooldown(String),
    /// The command ran successfully.
    Completed(String),
    /// The command failed; its cooldown was rolled back.
    Failed(String),
}

/// Entry point for every message the bot can read.
#[derive(Debug)]
pub struct Dispatcher {
    context: CommandContext,
    tracker: Arc<EmoteTracker>,
    cooldowns: CooldownTracker,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(context: CommandContext, tracker: Arc<EmoteTracker>) -> Self {
        Self {
            context,
            tracker,
            cooldowns: CooldownTracker::new(),
        }
    }

    /// Shared command context.
    pub const fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Per-user cooldown state.
    pub const fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    /// Handles `message` at the current time.
    pub async fn handle_message(&self, message: &InboundMessage) -> DispatchOutcome {
        self.handle_message_at(message, Utc::now()).await
    }

    /// Handles `message` as if received at `now`.
    ///
    /// Nothing escapes this method: handler failures are reported to the
    /// user and tracking failures are logged.
    #[instrument(skip_all, fields(message = %message.id, author = %message.author_id))]
    pub async fn handle_message_at(
        &self,
        message: &InboundMessage,
        now: DateTime<Utc>,
    ) -> DispatchOutcome {
        if message.author_id == self.context.platform.bot_user_id() {
            return DispatchOutcome::OwnMessage;
        }

        let Some(invocation) = parse_command(self.context.prefix(), &message.content) else {
            return self.track(message).await;
        };

        let Some(command) = self.context.registry.get(&invocation.name) else {
            debug!("Unknown command '{}'", invocation.name);
            let reply = self.context.text_with(
                keys::UNKNOWN_COMMAND,
                &[("name", invocation.name.as_str().into())],
            );
            self.context.reply_or_log(message, &reply).await;
            return DispatchOutcome::UnknownCommand(invocation.name);
        };

        let name = command.name.clone();
        let ticket = match self.cooldowns.try_acquire(
            message.author_id,
            &name,
            command.cooldown_seconds,
            now,
        ) {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!("{}", e);
                if self.context.config.commands.notify_on_cooldown {
                    let CooldownError::UserOnCooldown {
                        remaining_seconds, ..
                    } = e;
                    let reply = self.context.text_with(
                        keys::COOLDOWN_ACTIVE,
                        &[
                            ("seconds", remaining_seconds.into()),
                            ("name", name.as_str().into()),
                        ],
                    );
                    self.context.reply_or_log(message, &reply).await;
                }
                return DispatchOutcome::OnCooldown(name);
            }
        };

        let handler = Arc::clone(&command.handler);
        let result = match Arguments::bind(invocation, handler.signature()) {
            Ok(args) => handler.call(&self.context, message, args).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                info!("Command '{}' completed", name);
                DispatchOutcome::Completed(name)
            }
            Err(e) => {
                warn!("Command '{}' failed: {}", name, e);
                self.cooldowns.rollback(message.author_id, &name, ticket);
                let reply = self.context.text_with(
                    keys::MALFORMED_COMMAND,
                    &[("error", truncate_string(&e.to_string(), MAX_ERROR_LENGTH).into())],
                );
                self.context.reply_or_log(message, &reply).await;
                DispatchOutcome::Failed(name)
            }
        }
    }

    async fn track(&self, message: &InboundMessage) -> DispatchOutcome {
        let Some(server) = &message.server else {
            return DispatchOutcome::Tracked(0);
        };

        match self
            .tracker
            .track_message(server, &message.content, &message.server_emotes)
            .await
        {
            Ok(written) => DispatchOutcome::Tracked(written),
            Err(e) => {
                error!("Failed to track emotes of message {}: {}", message.id, e);
                DispatchOutcome::Tracked(0)
            }
        }
    }
}
