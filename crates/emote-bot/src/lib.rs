//! # Emote Bot
//!
//! Discord bot that tracks custom emote usage and answers statistics
//! commands.
//!
//! This is the binary crate: it parses the command line, wires the
//! tracking and command crates together, and connects them to Discord
//! through the Poise framework.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod cli;
pub mod error;
pub mod events;
pub mod platform;

pub use bot::{run_reboot_command, Data, EmoteBot, Services};
pub use cli::Cli;
pub use error::{BotError, BotResult};
pub use events::GuildSnapshot;
pub use platform::SerenityPlatform;
