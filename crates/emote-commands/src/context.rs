//! Shared state handed to the dispatcher and every command

use crate::permissions::{Permission, Permissions};
use crate::platform::{ChatPlatform, InboundMessage};
use crate::registry::CommandRegistry;
use crate::shutdown::ShutdownController;
use emote_common::{truncate_string, MessageId, Result, MAX_MESSAGE_LENGTH};
use emote_config::Config;
use emote_i18n::{FluentValue, Translator};
use emote_tracking::EmoteStore;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Collaborators of the command layer, wired once at startup.
#[derive(Clone)]
pub struct CommandContext {
    /// Application configuration
    pub config: Arc<Config>,
    /// Chat platform used for replies and moderation
    pub platform: Arc<dyn ChatPlatform>,
    /// Emote usage storage
    pub store: Arc<dyn EmoteStore>,
    /// Registered commands
    pub registry: Arc<CommandRegistry>,
    /// Permission manager
    pub permissions: Arc<Permissions>,
    /// Localized messages
    pub i18n: Arc<Translator>,
    /// Shutdown requests
    pub shutdown: ShutdownController,
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("registry", &self.registry)
            .field("permissions", &self.permissions)
            .field("locale", &self.i18n.locale())
            .finish_non_exhaustive()
    }
}

impl CommandContext {
    /// Create a new command context; permissions come from `config`.
    pub fn new(
        config: Arc<Config>,
        platform: Arc<dyn ChatPlatform>,
        store: Arc<dyn EmoteStore>,
        registry: Arc<CommandRegistry>,
        i18n: Arc<Translator>,
        shutdown: ShutdownController,
    ) -> Self {
        let permissions = Arc::new(Permissions::new(&config));
        Self {
            config,
            platform,
            store,
            registry,
            permissions,
            i18n,
            shutdown,
        }
    }

    /// The configured command prefix.
    pub fn prefix(&self) -> &str {
        &self.config.discord.prefix
    }

    /// Whether the author of `message` holds `required`.
    pub fn is_allowed(&self, message: &InboundMessage, required: Permission) -> bool {
        self.permissions
            .check(message.author_id, message.author_is_admin, required)
    }

    /// Localized message without arguments.
    pub fn text(&self, key: &str) -> String {
        self.i18n.get(key)
    }

    /// Localized message with arguments.
    pub fn text_with(&self, key: &str, args: &[(&str, FluentValue<'_>)]) -> String {
        self.i18n.get_with_args(key, args)
    }

    /// Replies to `message`, shortening the text to the platform limit.
    pub async fn reply(&self, message: &InboundMessage, content: &str) -> Result<MessageId> {
        let content = truncate_string(content, MAX_MESSAGE_LENGTH);
        self.platform
            .reply(message.channel_id, message.id, &content)
            .await
    }

    /// Replies to `message` and logs instead of failing.
    pub async fn reply_or_log(&self, message: &InboundMessage, content: &str) -> Option<MessageId> {
        match self.reply(message, content).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to reply in channel {}: {}", message.channel_id, e);
                None
            }
        }
    }
}
