//! Hand-written fakes of the chat platform and the store.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use emote_commands::{
    register_builtin_commands, ChatPlatform, CommandContext, CommandHandler, CommandRegistry,
    Dispatcher, InboundMessage, MessageSummary, ShutdownController,
};
use emote_common::test_utils::{discord_fixtures, init_test_logging};
use emote_common::{
    ChannelId, EmoteBotError, EmoteRecord, MessageId, Result, ServerInfo, UserId,
};
use emote_config::Config;
use emote_i18n::{Locale, Translator};
use emote_tracking::{EmoteStatistics, EmoteStore, EmoteTracker, StatisticsQuery};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const OWNER: UserId = UserId(145_196_308_985_020_416);

/// Records every side effect instead of talking to Discord.
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub replies: Mutex<Vec<(MessageId, String)>>,
    pub deleted: Mutex<Vec<MessageId>>,
    pub history: Mutex<Vec<MessageSummary>>,
    pub messages: Mutex<HashMap<MessageId, String>>,
    next_id: AtomicU64,
}

impl FakePlatform {
    pub fn reply_texts(&self) -> Vec<String> {
        self.replies.lock().iter().map(|(_, text)| text.clone()).collect()
    }

    pub fn last_reply(&self) -> Option<String> {
        self.replies.lock().last().map(|(_, text)| text.clone())
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    fn bot_user_id(&self) -> UserId {
        discord_fixtures::bot_user_id()
    }

    async fn reply(&self, _channel: ChannelId, _message: MessageId, content: &str) -> Result<MessageId> {
        let id = MessageId(9_000 + self.next_id.fetch_add(1, Ordering::SeqCst));
        self.replies.lock().push((id, content.to_string()));
        Ok(id)
    }

    async fn delete_message(&self, _channel: ChannelId, message: MessageId) -> Result<()> {
        self.deleted.lock().push(message);
        Ok(())
    }

    async fn recent_messages(&self, _channel: ChannelId, limit: u8) -> Result<Vec<MessageSummary>> {
        Ok(self
            .history
            .lock()
            .iter()
            .take(usize::from(limit))
            .copied()
            .collect())
    }

    async fn fetch_message(&self, _channel: ChannelId, message: MessageId) -> Result<Option<String>> {
        Ok(self.messages.lock().get(&message).cloned())
    }
}

/// Serves canned statistics and records what was asked and written.
#[derive(Debug, Default)]
pub struct FakeStore {
    pub rows: Mutex<Vec<EmoteStatistics>>,
    pub queries: Mutex<Vec<StatisticsQuery>>,
    pub inserts: Mutex<Vec<(Vec<EmoteRecord>, ServerInfo)>>,
    pub fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl EmoteStore for FakeStore {
    async fn insert_emote_log(&self, records: &[EmoteRecord], server: &ServerInfo) -> Result<()> {
        if self.fail {
            return Err(EmoteBotError::database("store offline"));
        }
        self.inserts.lock().push((records.to_vec(), server.clone()));
        Ok(())
    }

    async fn query_statistics(&self, query: &StatisticsQuery) -> Result<Vec<EmoteStatistics>> {
        if self.fail {
            return Err(EmoteBotError::database("store offline"));
        }
        self.queries.lock().push(query.clone());
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(self.rows.lock().iter().take(limit).cloned().collect())
    }

    async fn purge_older_than(&self, _days_old: u32) -> Result<u64> {
        Ok(0)
    }
}

pub struct Harness {
    pub platform: Arc<FakePlatform>,
    pub store: Arc<FakeStore>,
    pub shutdown: ShutdownController,
    pub dispatcher: Dispatcher,
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.discord.token = "test-token".to_string();
    config.discord.owner_ids = vec![OWNER.get()];
    config
}

pub fn harness() -> Harness {
    build(config(), FakeStore::default(), Vec::new())
}

pub fn build(
    config: Config,
    store: FakeStore,
    extra: Vec<(&str, u64, Arc<dyn CommandHandler>)>,
) -> Harness {
    init_test_logging();

    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry, &config.commands);
    for (name, cooldown, handler) in extra {
        registry.register(name, cooldown, handler);
    }

    let platform = Arc::new(FakePlatform::default());
    let store = Arc::new(store);
    let shutdown = ShutdownController::new();
    let tracker = Arc::new(EmoteTracker::new(
        store.clone(),
        config.tracking.reaction_history,
        config.tracking.allow_duplicates,
    ));

    let context = CommandContext::new(
        Arc::new(config),
        platform.clone(),
        store.clone(),
        Arc::new(registry),
        Arc::new(Translator::new(Locale::EnUs).unwrap()),
        shutdown.clone(),
    );

    Harness {
        platform,
        store,
        shutdown,
        dispatcher: Dispatcher::new(context, tracker),
    }
}

pub fn message_from(author: UserId, content: &str) -> InboundMessage {
    InboundMessage {
        id: discord_fixtures::test_message_id(),
        channel_id: discord_fixtures::test_channel_id(),
        server: Some(discord_fixtures::test_server()),
        author_id: author,
        author_is_admin: false,
        content: content.to_string(),
        server_emotes: discord_fixtures::guild_emotes(),
    }
}

pub fn message(content: &str) -> InboundMessage {
    message_from(discord_fixtures::test_user_id(), content)
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn stats(name: &str, id: u64, total: i64, window: i64) -> EmoteStatistics {
    EmoteStatistics {
        name: name.to_string(),
        id: emote_common::EmoteId(id),
        total_count: total,
        window_count: window,
    }
}
