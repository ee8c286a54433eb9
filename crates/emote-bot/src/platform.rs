//! `ChatPlatform` implementation over the Discord HTTP client.

use async_trait::async_trait;
use emote_commands::{ChatPlatform, MessageSummary};
use emote_common::{ChannelId, EmoteBotError, MessageId, Result, UserId};
use poise::serenity_prelude as serenity;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Performs the bot's replies and moderation through Discord's REST API.
pub struct SerenityPlatform {
    http: Arc<serenity::Http>,
    bot_user_id: UserId,
}

impl fmt::Debug for SerenityPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerenityPlatform")
            .field("bot_user_id", &self.bot_user_id)
            .finish_non_exhaustive()
    }
}

impl SerenityPlatform {
    /// Creates the platform for the bot user `bot_user_id`.
    pub const fn new(http: Arc<serenity::Http>, bot_user_id: UserId) -> Self {
        Self { http, bot_user_id }
    }
}

fn channel(id: ChannelId) -> serenity::ChannelId {
    serenity::ChannelId::new(id.get())
}

fn message(id: MessageId) -> serenity::MessageId {
    serenity::MessageId::new(id.get())
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    fn bot_user_id(&self) -> UserId {
        self.bot_user_id
    }

    async fn reply(&self, channel_id: ChannelId, message_id: MessageId, content: &str) -> Result<MessageId> {
        let builder = serenity::CreateMessage::new()
            .content(content)
            .reference_message((channel(channel_id), message(message_id)));

        let sent = channel(channel_id)
            .send_message(&self.http, builder)
            .await
            .map_err(|e| EmoteBotError::platform_with_source("Failed to send reply", e))?;
        Ok(MessageId(sent.id.get()))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        channel(channel_id)
            .delete_message(&self.http, message(message_id))
            .await
            .map_err(|e| EmoteBotError::platform_with_source("Failed to delete message", e))
    }

    async fn recent_messages(&self, channel_id: ChannelId, limit: u8) -> Result<Vec<MessageSummary>> {
        let messages = channel(channel_id)
            .messages(&self.http, serenity::GetMessages::new().limit(limit))
            .await
            .map_err(|e| EmoteBotError::platform_with_source("Failed to read channel history", e))?;

        Ok(messages
            .iter()
            .map(|m| MessageSummary {
                id: MessageId(m.id.get()),
                author_id: UserId(m.author.id.get()),
            })
            .collect())
    }

    async fn fetch_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<Option<String>> {
        match channel(channel_id).message(&self.http, message(message_id)).await {
            Ok(found) => Ok(Some(found.content)),
            Err(e) => {
                debug!("Message {} not available: {}", message_id, e);
                Ok(None)
            }
        }
    }
}
