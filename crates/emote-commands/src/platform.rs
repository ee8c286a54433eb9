//! Chat platform seam used by the dispatcher and the built-in commands.

use async_trait::async_trait;
use emote_common::{ChannelId, EmoteId, MessageId, Result, ServerInfo, UserId};
use std::collections::HashSet;

/// A message as the dispatcher sees it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Message id.
    pub id: MessageId,
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// Server of the channel; `None` for direct messages.
    pub server: Option<ServerInfo>,
    /// Author of the message.
    pub author_id: UserId,
    /// Whether the author has the administrator permission in the server.
    pub author_is_admin: bool,
    /// Raw text.
    pub content: String,
    /// Custom emotes of the server.
    pub server_emotes: HashSet<EmoteId>,
}

/// Author and id of a message from a channel's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSummary {
    /// Message id.
    pub id: MessageId,
    /// Author of the message.
    pub author_id: UserId,
}

/// Side effects the bot performs on the chat platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// The bot's own user id.
    fn bot_user_id(&self) -> UserId;

    /// Replies to `message` in `channel`, returning the id of the reply.
    async fn reply(&self, channel: ChannelId, message: MessageId, content: &str) -> Result<MessageId>;

    /// Deletes a message.
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()>;

    /// Up to `limit` most recent messages of `channel`, newest first.
    async fn recent_messages(&self, channel: ChannelId, limit: u8) -> Result<Vec<MessageSummary>>;

    /// Text of a message in `channel`, or `None` if it cannot be found.
    async fn fetch_message(&self, channel: ChannelId, message: MessageId) -> Result<Option<String>>;
}
