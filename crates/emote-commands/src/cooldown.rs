//! Per-user command cooldowns

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use emote_common::UserId;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during cooldown operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CooldownError {
    /// The previous use is still inside the cooldown window.
    #[error("User {user_id} is on cooldown for command '{command}' (remaining: {remaining_seconds}s)")]
    UserOnCooldown {
        /// User who tried the command.
        user_id: UserId,
        /// Command name.
        command: String,
        /// Whole seconds until the command is accepted again.
        remaining_seconds: u64,
    },
}

/// Proof of an accepted attempt, used to roll it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct CooldownTicket {
    previous: Option<DateTime<Utc>>,
    acquired_at: DateTime<Utc>,
}

impl CooldownTicket {
    /// Last use before this attempt; `None` if the command was never used.
    pub const fn previous(&self) -> Option<DateTime<Utc>> {
        self.previous
    }
}

/// Last invocation time per (user, command).
///
/// An absent entry means the user never ran the command.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    last_used: DashMap<(UserId, String), DateTime<Utc>>,
}

impl CooldownTracker {
    /// Create a new, empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the attempt at `now` unless the previous use is at most
    /// `cooldown_seconds` old. An accepted attempt is recorded immediately.
    pub fn try_acquire(
        &self,
        user_id: UserId,
        command: &str,
        cooldown_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<CooldownTicket, CooldownError> {
        let cooldown = i64::try_from(cooldown_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        match self.last_used.entry((user_id, command.to_string())) {
            Entry::Vacant(entry) => {
                entry.insert(now);
                Ok(CooldownTicket {
                    previous: None,
                    acquired_at: now,
                })
            }
            Entry::Occupied(mut entry) => {
                let previous = *entry.get();
                let elapsed = now.signed_duration_since(previous);
                if elapsed <= cooldown {
                    let remaining = cooldown
                        .checked_sub(&elapsed)
                        .map_or(i64::MAX, |left| left.num_seconds())
                        .max(0);
                    return Err(CooldownError::UserOnCooldown {
                        user_id,
                        command: command.to_string(),
                        remaining_seconds: u64::try_from(remaining).unwrap_or(0),
                    });
                }
                entry.insert(now);
                Ok(CooldownTicket {
                    previous: Some(previous),
                    acquired_at: now,
                })
            }
        }
    }

    /// Restores the state from before `ticket` was acquired, unless a later
    /// attempt has already replaced it.
    pub fn rollback(&self, user_id: UserId, command: &str, ticket: CooldownTicket) {
        let key = (user_id, command.to_string());
        match ticket.previous {
            Some(previous) => {
                if let Some(mut entry) = self.last_used.get_mut(&key) {
                    if *entry == ticket.acquired_at {
                        *entry = previous;
                    }
                }
            }
            None => {
                self.last_used
                    .remove_if(&key, |_, last| *last == ticket.acquired_at);
            }
        }
        debug!("Rolled back cooldown for command '{}' (user: {})", command, user_id);
    }

    /// Last accepted use of `command` by `user_id`.
    pub fn last_used(&self, user_id: UserId, command: &str) -> Option<DateTime<Utc>> {
        self.last_used
            .get(&(user_id, command.to_string()))
            .map(|entry| *entry)
    }
}
