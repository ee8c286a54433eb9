//! Error types for internationalization operations

use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// The locale has no embedded translations
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParse {
        /// Locale code of the resource.
        locale: String,
        /// Parser or bundle errors, rendered.
        errors: Vec<String>,
    },

    /// Resource could not be added to the bundle
    #[error("Failed to create bundle for locale {locale}: {errors:?}")]
    BundleCreation {
        /// Locale code of the resource.
        locale: String,
        /// Parser or bundle errors, rendered.
        errors: Vec<String>,
    },

    /// Message not found in any bundle
    #[error("Message not found: {key}")]
    MessageNotFound {
        /// Message key that was looked up.
        key: String,
    },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
