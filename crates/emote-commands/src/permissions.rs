//! Permission checks for privileged commands

use emote_common::UserId;
use emote_config::Config;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Permission levels for bot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Permission {
    /// Any user can execute this command
    User = 0,
    /// Server administrators and bot owners can execute this command
    Administrator = 1,
    /// Only bot owners can execute this command
    Owner = 2,
}

impl Permission {
    /// Get the permission level name as a string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Administrator => "Administrator",
            Self::Owner => "Owner",
        }
    }
}

/// Permission manager for checking user permissions
#[derive(Debug, Clone, Default)]
pub struct Permissions {
    /// Bot owner user IDs
    owners: HashSet<UserId>,
}

impl Permissions {
    /// Create a new permissions manager from configuration
    pub fn new(config: &Config) -> Self {
        Self::from_owners(config.discord.owner_ids.iter().copied().map(UserId))
    }

    /// Create a permissions manager with an explicit owner list
    pub fn from_owners(owners: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            owners: owners.into_iter().collect(),
        }
    }

    /// Check if a user has the required permission level.
    ///
    /// `is_server_admin` is the administrator flag the platform reported
    /// for the user in the server the command was issued in.
    pub fn check(&self, user_id: UserId, is_server_admin: bool, required: Permission) -> bool {
        debug!("Checking permission for user {} (required: {})", user_id, required.as_str());

        if self.is_owner(user_id) {
            return true;
        }

        if required == Permission::Owner {
            warn!("User {} attempted to use owner-only command", user_id);
            return false;
        }

        if is_server_admin {
            return true;
        }

        required <= Permission::User
    }

    /// Check if a user is a bot owner
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owners.contains(&user_id)
    }
}
