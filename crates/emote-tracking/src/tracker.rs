//! Turns chat events into emote usage records.

use crate::extractor::extract_emotes;
use crate::reaction_cache::ReactionHistoryCache;
use crate::store::EmoteStore;
use emote_common::{EmoteId, EmoteRecord, MessageId, Result, ServerInfo, UserId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A message posted in a guild channel.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Guild the message was posted in.
    pub server: ServerInfo,
    /// Raw message text.
    pub content: String,
    /// Custom emotes that belong to the guild.
    pub known_emotes: HashSet<EmoteId>,
}

/// A custom emote reaction added to a message.
#[derive(Debug, Clone)]
pub struct ReactionEvent {
    /// Guild of the reacted message.
    pub server: ServerInfo,
    /// Reacting user.
    pub user: UserId,
    /// Reacted message.
    pub message: MessageId,
    /// The reaction emote.
    pub emote: EmoteRecord,
    /// Custom emotes that belong to the guild.
    pub known_emotes: HashSet<EmoteId>,
}

/// Inbound event relevant to usage tracking.
#[derive(Debug, Clone)]
pub enum TrackedEvent {
    /// A non-command message.
    Message(MessageEvent),
    /// A reaction added by a user.
    Reaction(ReactionEvent),
}

/// Records emote usage from messages and reactions.
pub struct EmoteTracker {
    store: Arc<dyn EmoteStore>,
    history: ReactionHistoryCache,
    allow_duplicates: bool,
}

impl std::fmt::Debug for EmoteTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmoteTracker")
            .field("history", &self.history)
            .field("allow_duplicates", &self.allow_duplicates)
            .finish_non_exhaustive()
    }
}

impl EmoteTracker {
    /// Creates a tracker writing to `store`.
    pub fn new(store: Arc<dyn EmoteStore>, reaction_history: usize, allow_duplicates: bool) -> Self {
        Self {
            store,
            history: ReactionHistoryCache::new(reaction_history),
            allow_duplicates,
        }
    }

    /// Reaction history shared by all users.
    pub const fn history(&self) -> &ReactionHistoryCache {
        &self.history
    }

    /// Logs every known emote found in `content`. Returns the number of
    /// records written.
    #[instrument(skip(self, content, known), fields(server = %server.id))]
    pub async fn track_message(
        &self,
        server: &ServerInfo,
        content: &str,
        known: &HashSet<EmoteId>,
    ) -> Result<usize> {
        let emotes = extract_emotes(content, known, self.allow_duplicates);
        if emotes.is_empty() {
            return Ok(0);
        }

        self.store.insert_emote_log(&emotes, server).await?;
        debug!("Tracked {} emotes from message", emotes.len());
        Ok(emotes.len())
    }

    /// Logs a reaction unless it is foreign to the guild or was already
    /// counted for this user and message. Returns the number of records
    /// written.
    #[instrument(skip(self, emote, known), fields(server = %server.id, user = %user))]
    pub async fn track_reaction(
        &self,
        server: &ServerInfo,
        user: UserId,
        message: MessageId,
        emote: &EmoteRecord,
        known: &HashSet<EmoteId>,
    ) -> Result<usize> {
        if !self.history.observe(user, message, emote.id, known) {
            return Ok(0);
        }

        self.store
            .insert_emote_log(std::slice::from_ref(emote), server)
            .await?;
        debug!("Tracked reaction {}", emote.markup());
        Ok(1)
    }

    /// Routes an event to the matching tracking operation.
    pub async fn process(&self, event: &TrackedEvent) -> Result<usize> {
        match event {
            TrackedEvent::Message(message) => {
                self.track_message(&message.server, &message.content, &message.known_emotes)
                    .await
            }
            TrackedEvent::Reaction(reaction) => {
                self.track_reaction(
                    &reaction.server,
                    reaction.user,
                    reaction.message,
                    &reaction.emote,
                    &reaction.known_emotes,
                )
                .await
            }
        }
    }
}
