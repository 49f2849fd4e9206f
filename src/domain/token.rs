//! Slack user tokens
//!
//! Only user tokens (`xoxp-`, `xoxc-`) are accepted; bot tokens (`xoxb-`) are
//! rejected before any request is made.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::env::Environment;

/// Environment variable holding the token
pub const TOKEN_ENV: &str = "SLACK_TOKEN";

pub const USER_TOKEN_PREFIXES: [&str; 2] = ["xoxp-", "xoxc-"];
pub const BOT_TOKEN_PREFIX: &str = "xoxb-";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing SLACK_TOKEN env var.")]
    Missing,

    #[error("Bot tokens are not supported. Use a user token.")]
    BotToken,

    #[error("SLACK_TOKEN must be a user token (xoxp- or xoxc-).")]
    NotUserToken,

    #[error("Token belongs to a bot. Use a user token.")]
    BotIdentity,
}

/// A validated Slack user token
#[derive(Clone)]
pub struct UserToken(SecretString);

impl UserToken {
    /// Validates a raw token string
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        if raw.is_empty() {
            return Err(TokenError::Missing);
        }
        if raw.starts_with(BOT_TOKEN_PREFIX) {
            return Err(TokenError::BotToken);
        }
        if !USER_TOKEN_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
            return Err(TokenError::NotUserToken);
        }
        Ok(Self(SecretString::from(raw.to_string())))
    }

    /// Reads and validates the token from `SLACK_TOKEN`
    pub fn from_env(env: &dyn Environment) -> Result<Self, TokenError> {
        let raw = env.var(TOKEN_ENV).ok_or(TokenError::Missing)?;
        Self::parse(&raw)
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.expose().get(..5).unwrap_or("");
        write!(f, "UserToken({}…)", prefix)
    }
}
