//! Dispatch routing, cooldowns, and failure recovery.

mod common;

use async_trait::async_trait;
use common::{at, build, config, harness, message, message_from, FakeStore};
use emote_commands::{
    Arguments, CommandContext, CommandError, CommandHandler, CommandResult, DispatchOutcome,
    InboundMessage, Signature,
};
use emote_common::test_utils::discord_fixtures;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Fails while `failing` is set; counts calls.
#[derive(Default)]
struct Flaky {
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl CommandHandler for Flaky {
    fn help(&self) -> &'static str {
        "Fails on demand."
    }

    fn signature(&self) -> Signature {
        Signature::Named(&["value"])
    }

    async fn call(
        &self,
        _ctx: &CommandContext,
        _message: &InboundMessage,
        _args: Arguments,
    ) -> CommandResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(CommandError::validation("flaky failure"))
        } else {
            Ok(())
        }
    }
}

fn with_flaky(failing: bool) -> (common::Harness, Arc<Flaky>) {
    let flaky = Arc::new(Flaky::default());
    flaky.failing.store(failing, Ordering::SeqCst);
    let harness = build(
        config(),
        FakeStore::default(),
        vec![("flaky", 10, flaky.clone() as Arc<dyn CommandHandler>)],
    );
    (harness, flaky)
}

#[tokio::test]
async fn test_own_messages_are_ignored() {
    let h = harness();
    let own = message_from(discord_fixtures::bot_user_id(), "@@help <:pog:111>");

    assert_eq!(h.dispatcher.handle_message(&own).await, DispatchOutcome::OwnMessage);
    assert!(h.platform.replies.lock().is_empty());
    assert!(h.store.inserts.lock().is_empty());
}

#[tokio::test]
async fn test_plain_message_is_tracked() {
    let h = harness();
    let outcome = h
        .dispatcher
        .handle_message(&message("nice <:pog:111> <:pog:111> <:nope:5>"))
        .await;

    assert_eq!(outcome, DispatchOutcome::Tracked(1));
    let inserts = h.store.inserts.lock();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].0[0].name, "pog");
    assert_eq!(inserts[0].1, discord_fixtures::test_server());
}

#[tokio::test]
async fn test_message_without_emotes_skips_store() {
    let h = harness();
    let outcome = h.dispatcher.handle_message(&message("hello there")).await;
    assert_eq!(outcome, DispatchOutcome::Tracked(0));
    assert!(h.store.inserts.lock().is_empty());
}

#[tokio::test]
async fn test_prefix_without_command_is_tracked() {
    let h = harness();
    let outcome = h.dispatcher.handle_message(&message("@@ <:pog:111>")).await;
    assert_eq!(outcome, DispatchOutcome::Tracked(1));
    assert!(h.platform.replies.lock().is_empty());
}

#[tokio::test]
async fn test_direct_messages_are_not_tracked() {
    let h = harness();
    let mut dm = message("<:pog:111>");
    dm.server = None;

    assert_eq!(h.dispatcher.handle_message(&dm).await, DispatchOutcome::Tracked(0));
    assert!(h.store.inserts.lock().is_empty());
}

#[tokio::test]
async fn test_tracking_failure_is_contained() {
    let h = build(config(), FakeStore::failing(), Vec::new());
    let outcome = h.dispatcher.handle_message(&message("<:pog:111>")).await;
    assert_eq!(outcome, DispatchOutcome::Tracked(0));
}

#[tokio::test]
async fn test_unknown_command_replies() {
    let h = harness();
    let outcome = h.dispatcher.handle_message(&message("@@Nope 1 2")).await;

    assert_eq!(outcome, DispatchOutcome::UnknownCommand("nope".to_string()));
    assert_eq!(h.platform.last_reply().unwrap(), "Unknown command ``nope``");
}

#[tokio::test]
async fn test_cooldown_ignores_then_resets() {
    let (h, flaky) = with_flaky(false);
    let msg = message("@@flaky");

    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(0)).await,
        DispatchOutcome::Completed("flaky".to_string())
    );
    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(5)).await,
        DispatchOutcome::OnCooldown("flaky".to_string())
    );
    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(10)).await,
        DispatchOutcome::OnCooldown("flaky".to_string())
    );
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    // Silent by default.
    assert!(h.platform.replies.lock().is_empty());

    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(11)).await,
        DispatchOutcome::Completed("flaky".to_string())
    );
    // The timer restarted at 11.
    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(20)).await,
        DispatchOutcome::OnCooldown("flaky".to_string())
    );
}

#[tokio::test]
async fn test_cooldown_is_per_user() {
    let (h, _flaky) = with_flaky(false);

    assert!(matches!(
        h.dispatcher.handle_message_at(&message("@@flaky"), at(0)).await,
        DispatchOutcome::Completed(_)
    ));
    let other = message_from(discord_fixtures::other_user_id(), "@@flaky");
    assert!(matches!(
        h.dispatcher.handle_message_at(&other, at(1)).await,
        DispatchOutcome::Completed(_)
    ));
}

#[tokio::test]
async fn test_failure_rolls_back_cooldown() {
    let (h, flaky) = with_flaky(false);
    let msg = message("@@flaky");

    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(0)).await,
        DispatchOutcome::Completed(_)
    ));

    flaky.failing.store(true, Ordering::SeqCst);
    assert_eq!(
        h.dispatcher.handle_message_at(&msg, at(20)).await,
        DispatchOutcome::Failed("flaky".to_string())
    );
    let reply = h.platform.last_reply().unwrap();
    assert!(reply.starts_with("Malformed command!"));
    assert!(reply.contains("flaky failure"));

    // Rolled back to 0, so a retry right away is allowed.
    flaky.failing.store(false, Ordering::SeqCst);
    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(21)).await,
        DispatchOutcome::Completed(_)
    ));
    assert_eq!(
        h.dispatcher
            .cooldowns()
            .last_used(discord_fixtures::test_user_id(), "flaky"),
        Some(at(21))
    );
}

#[tokio::test]
async fn test_binding_errors_are_handler_failures() {
    let (h, flaky) = with_flaky(false);

    let outcome = h
        .dispatcher
        .handle_message_at(&message("@@flaky 1 2"), at(0))
        .await;
    assert_eq!(outcome, DispatchOutcome::Failed("flaky".to_string()));
    assert!(h
        .platform
        .last_reply()
        .unwrap()
        .contains("flaky() takes 1 positional arguments but 2 were given"));
    assert_eq!(flaky.calls.load(Ordering::SeqCst), 0);

    let outcome = h
        .dispatcher
        .handle_message_at(&message("@@flaky --other 1"), at(1))
        .await;
    assert_eq!(outcome, DispatchOutcome::Failed("flaky".to_string()));
}

#[tokio::test]
async fn test_cooldown_feedback_when_enabled() {
    let mut config = config();
    config.commands.notify_on_cooldown = true;
    let h = build(config, FakeStore::default(), Vec::new());
    let msg = message("@@mono --content hi");

    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(0)).await,
        DispatchOutcome::Completed(_)
    ));
    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(4)).await,
        DispatchOutcome::OnCooldown(_)
    ));
    let reply = h.platform.last_reply().unwrap();
    assert_eq!(reply, "Please wait 6 more seconds before using ``mono`` again.");
}

#[tokio::test]
async fn test_configured_cooldown_is_used() {
    let mut config = config();
    config.commands.cooldowns.insert("mono".to_string(), 0);
    let h = build(config, FakeStore::default(), Vec::new());
    let msg = message("@@mono --content hi");

    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(0)).await,
        DispatchOutcome::Completed(_)
    ));
    assert!(matches!(
        h.dispatcher.handle_message_at(&msg, at(1)).await,
        DispatchOutcome::Completed(_)
    ));
}
