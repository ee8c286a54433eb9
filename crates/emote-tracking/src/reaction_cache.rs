//! Bounded per-user memory of reactions that were already counted.

use dashmap::DashMap;
use emote_common::{EmoteId, MessageId, UserId};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Reactions remembered per user when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Remembers the last `capacity` (message, emote) pairs each user reacted
/// with, so that removing and re-adding a reaction is counted only once.
///
/// Old entries are evicted first-in first-out. A reaction whose entry was
/// evicted is counted again; that imprecision is what keeps memory bounded
/// for very active users.
#[derive(Debug)]
pub struct ReactionHistoryCache {
    capacity: usize,
    history: DashMap<UserId, VecDeque<(MessageId, EmoteId)>>,
}

impl ReactionHistoryCache {
    /// Creates a cache remembering up to `capacity` reactions per user.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            history: DashMap::new(),
        }
    }

    /// Records a reaction and reports whether it should be counted.
    ///
    /// Emotes outside `known` are never counted and leave the cache
    /// untouched. A pair already in the user's history is suppressed.
    pub fn observe(
        &self,
        user: UserId,
        message: MessageId,
        emote: EmoteId,
        known: &HashSet<EmoteId>,
    ) -> bool {
        if !known.contains(&emote) {
            return false;
        }

        let mut entries = self.history.entry(user).or_default();
        let pair = (message, emote);
        if entries.contains(&pair) {
            trace!("Suppressed repeated reaction {} on {} by {}", emote, message, user);
            return false;
        }

        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(pair);
        true
    }

    /// Number of reactions remembered for `user`.
    pub fn history_len(&self, user: UserId) -> usize {
        self.history.get(&user).map_or(0, |entries| entries.len())
    }

    /// Number of users with a history.
    pub fn tracked_users(&self) -> usize {
        self.history.len()
    }
}

impl Default for ReactionHistoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> HashSet<EmoteId> {
        [EmoteId(1), EmoteId(2)].into_iter().collect()
    }

    #[test]
    fn test_unknown_emote_not_counted_and_not_cached() {
        let cache = ReactionHistoryCache::default();
        assert!(!cache.observe(UserId(5), MessageId(10), EmoteId(99), &known()));
        assert_eq!(cache.tracked_users(), 0);
    }

    #[test]
    fn test_repeated_pair_suppressed() {
        let cache = ReactionHistoryCache::default();
        assert!(cache.observe(UserId(5), MessageId(10), EmoteId(1), &known()));
        assert!(!cache.observe(UserId(5), MessageId(10), EmoteId(1), &known()));
        // Same emote on another message, or another emote on the same message.
        assert!(cache.observe(UserId(5), MessageId(11), EmoteId(1), &known()));
        assert!(cache.observe(UserId(5), MessageId(10), EmoteId(2), &known()));
        assert_eq!(cache.history_len(UserId(5)), 3);
    }

    #[test]
    fn test_histories_are_per_user() {
        let cache = ReactionHistoryCache::default();
        assert!(cache.observe(UserId(5), MessageId(10), EmoteId(1), &known()));
        assert!(cache.observe(UserId(6), MessageId(10), EmoteId(1), &known()));
        assert_eq!(cache.tracked_users(), 2);
    }

    #[test]
    fn test_eviction_recounts_oldest() {
        let cache = ReactionHistoryCache::new(100);
        let user = UserId(5);

        for message in 0..100 {
            assert!(cache.observe(user, MessageId(message), EmoteId(1), &known()));
        }
        assert_eq!(cache.history_len(user), 100);

        // The 101st distinct pair evicts message 0 and is still counted.
        assert!(cache.observe(user, MessageId(100), EmoteId(1), &known()));
        assert_eq!(cache.history_len(user), 100);

        // Message 0 was forgotten, so it counts again.
        assert!(cache.observe(user, MessageId(0), EmoteId(1), &known()));
        // Message 50 is still remembered.
        assert!(!cache.observe(user, MessageId(50), EmoteId(1), &known()));
    }
}
