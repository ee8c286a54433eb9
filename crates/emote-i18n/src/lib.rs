//! # Emote I18n
//!
//! Localized reply messages for the emote tracker bot, built on Fluent.
//!
//! Translations are embedded at compile time; lookups fall back to the
//! default locale and finally to the message key itself.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loader;
pub mod locale;
pub mod messages;

pub use error::{I18nError, I18nResult};
pub use fluent_bundle::FluentValue;
pub use loader::Translator;
pub use locale::Locale;
pub use messages::keys;
