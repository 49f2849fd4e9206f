//! Slack DM - send Slack direct messages as yourself
//!
//! Resolves a recipient (user ID, email, or saved label) to a Slack user,
//! opens a direct-message channel with them, and posts a message using a
//! user token. Labels are kept in a small JSON config file.

pub mod cli;
pub mod domain;
pub mod env;
pub mod error;
pub mod logging;
pub mod slack;
pub mod storage;
pub mod update;

pub use error::{Error, Result};

/// Version of the running build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
