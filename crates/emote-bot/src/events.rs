//! Conversion of Discord gateway events into the core's event types.
//!
//! Everything read from the serenity cache is copied into a
//! [`GuildSnapshot`] first, so no cache guard is held across an `.await`.

use emote_commands::InboundMessage;
use emote_common::{ChannelId, EmoteId, EmoteRecord, GuildId, MessageId, ServerInfo, UserId};
use emote_tracking::{ReactionEvent, TrackedEvent};
use poise::serenity_prelude as serenity;
use std::collections::HashSet;

/// Guild state read from the cache for a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    /// Id and name of the guild.
    pub server: ServerInfo,
    /// Custom emotes uploaded to the guild.
    pub emotes: HashSet<EmoteId>,
    /// Whether the event's author may administer the guild.
    pub author_is_admin: bool,
}

impl GuildSnapshot {
    /// Reads `guild_id` from the cache. `None` if the guild is not cached.
    pub fn from_cache(
        cache: &serenity::Cache,
        guild_id: serenity::GuildId,
        author: serenity::UserId,
        author_roles: &[serenity::RoleId],
    ) -> Option<Self> {
        let guild = cache.guild(guild_id)?;
        Some(Self::from_guild(&guild, author, author_roles))
    }

    /// Copies the fields the core needs out of a guild.
    pub fn from_guild(
        guild: &serenity::Guild,
        author: serenity::UserId,
        author_roles: &[serenity::RoleId],
    ) -> Self {
        Self {
            server: ServerInfo::new(GuildId(guild.id.get()), guild.name.clone()),
            emotes: guild.emojis.keys().map(|id| EmoteId(id.get())).collect(),
            author_is_admin: is_administrator(guild, author, author_roles),
        }
    }
}

/// The guild owner, or a member holding a role with the administrator
/// permission. The `@everyone` role shares the guild's id.
fn is_administrator(
    guild: &serenity::Guild,
    author: serenity::UserId,
    author_roles: &[serenity::RoleId],
) -> bool {
    if guild.owner_id == author {
        return true;
    }

    let everyone = serenity::RoleId::new(guild.id.get());
    author_roles
        .iter()
        .chain(std::iter::once(&everyone))
        .filter_map(|role| guild.roles.get(role))
        .any(|role| role.permissions.administrator())
}

/// Roles of a message author, empty outside guilds.
pub fn author_roles(message: &serenity::Message) -> &[serenity::RoleId] {
    message
        .member
        .as_ref()
        .map(|member| member.roles.as_slice())
        .unwrap_or_default()
}

/// Builds the dispatcher's view of a message.
pub fn inbound_message(
    id: MessageId,
    channel_id: ChannelId,
    author_id: UserId,
    content: &str,
    guild: Option<GuildSnapshot>,
) -> InboundMessage {
    let (server, server_emotes, author_is_admin) = match guild {
        Some(snapshot) => (Some(snapshot.server), snapshot.emotes, snapshot.author_is_admin),
        None => (None, HashSet::new(), false),
    };

    InboundMessage {
        id,
        channel_id,
        server,
        author_id,
        author_is_admin,
        content: content.to_string(),
        server_emotes,
    }
}

/// Converts a gateway message.
pub fn from_message(message: &serenity::Message, guild: Option<GuildSnapshot>) -> InboundMessage {
    inbound_message(
        MessageId(message.id.get()),
        ChannelId(message.channel_id.get()),
        UserId(message.author.id.get()),
        &message.content,
        guild,
    )
}

/// Builds a tracking event for a custom emote reaction. Unicode reactions
/// are not tracked.
pub fn reaction_event(
    guild: GuildSnapshot,
    user: UserId,
    message: MessageId,
    emoji: &serenity::ReactionType,
) -> Option<TrackedEvent> {
    let serenity::ReactionType::Custom { id, name, .. } = emoji else {
        return None;
    };

    Some(TrackedEvent::Reaction(ReactionEvent {
        server: guild.server,
        user,
        message,
        emote: EmoteRecord::new(name.clone().unwrap_or_default(), EmoteId(id.get())),
        known_emotes: guild.emotes,
    }))
}
