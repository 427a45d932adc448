//! Command parse errors

use thiserror::Error;

/// Textual sync command could not be parsed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not a number")]
    InvalidNumber { value: String },

    #[error("unexpected input after command: '{0}'")]
    Trailing(String),
}
