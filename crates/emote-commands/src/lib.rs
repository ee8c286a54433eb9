//! # Emote Commands
//!
//! The text command interpreter of the emote tracker bot: literal and
//! command parsing, argument binding, per-user cooldowns, the command
//! registry, the message dispatcher, and the built-in commands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod arguments;
pub mod commands;
pub mod context;
pub mod cooldown;
pub mod dispatcher;
pub mod error;
pub mod parser;
pub mod permissions;
pub mod platform;
pub mod registry;
pub mod shutdown;
pub mod value;

pub use arguments::{Arguments, Signature};
pub use commands::register_builtin_commands;
pub use context::CommandContext;
pub use cooldown::{CooldownError, CooldownTicket, CooldownTracker};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{ArgumentError, CommandError, CommandResult};
pub use parser::{parse_command, CommandInvocation};
pub use permissions::{Permission, Permissions};
pub use platform::{ChatPlatform, InboundMessage, MessageSummary};
pub use registry::{CommandHandler, CommandRegistry, RegisteredCommand};
pub use shutdown::{ShutdownController, ShutdownReason};
pub use value::{parse_value, TypedValue};
