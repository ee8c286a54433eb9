//! Errors raised while binding arguments and running command handlers.

use emote_common::EmoteBotError;
use thiserror::Error;

/// Result type for command handlers.
pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Failure to bind an invocation onto a handler's parameter list, or to
/// read a bound argument with the expected type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// More positional arguments than the handler declares.
    #[error("{command}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        /// Command name.
        command: String,
        /// Declared parameter count.
        expected: usize,
        /// Positional arguments supplied.
        given: usize,
    },

    /// A keyword that matches no declared parameter.
    #[error("{command}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword {
        /// Command name.
        command: String,
        /// Keyword as written.
        name: String,
    },

    /// A parameter bound both positionally and by keyword.
    #[error("{command}() got multiple values for argument '{name}'")]
    MultipleValues {
        /// Command name.
        command: String,
        /// Parameter bound twice.
        name: String,
    },

    /// A required parameter was not supplied.
    #[error("missing required argument '{name}'")]
    Missing {
        /// Parameter name.
        name: String,
    },

    /// A bound value has the wrong type.
    #[error("argument '{name}' must be {expected}, got {found}")]
    TypeMismatch {
        /// Parameter name.
        name: String,
        /// Type the handler asked for.
        expected: &'static str,
        /// Type that was parsed.
        found: &'static str,
    },
}

/// Failure of a command handler. The display text is what the user sees in
/// the malformed command reply.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The invocation did not fit the handler's parameters.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// An argument value was rejected by the handler.
    #[error("{0}")]
    Validation(String),

    /// The emote store failed.
    #[error("{0}")]
    Storage(#[source] EmoteBotError),

    /// The chat platform failed.
    #[error("{0}")]
    Platform(#[source] EmoteBotError),
}

impl CommandError {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<EmoteBotError> for CommandError {
    fn from(error: EmoteBotError) -> Self {
        match error {
            EmoteBotError::Database { .. } => Self::Storage(error),
            EmoteBotError::Validation { message, .. } => Self::Validation(message),
            other => Self::Platform(other),
        }
    }
}
