//! Top-level error classification
//!
//! Every failure aborts the invocation. [`Error`] groups them by kind so
//! `main` can pick the exit code in one place.

use thiserror::Error;

use crate::cli::ComposeError;
use crate::domain::{ResolveError, TokenError};
use crate::slack::SlackError;
use crate::storage::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    /// Conflicting or missing command-line arguments
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] TokenError),

    #[error(transparent)]
    Api(SlackError),

    #[error(transparent)]
    Resolution(#[from] ResolveError),

    /// Local environment failures while composing: missing or malformed
    /// `$EDITOR`, temp file problems
    #[error(transparent)]
    Environment(#[from] ComposeError),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<SlackError> for Error {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::BotIdentity => Error::Credential(TokenError::BotIdentity),
            other => Error::Api(other),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
