//! # Emote Common
//!
//! Shared types, utilities, and common functionality for the emote tracker bot.
//!
//! This crate provides the platform ids, the emote record passed between
//! the tracker and the store, the crate-wide error type, and logging setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{EmoteBotError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
