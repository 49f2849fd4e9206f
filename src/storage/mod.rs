//! # Storage Layer
//!
//! Local persistence for the label directory.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Labels | JSON object (`user_labels`) | `$XDG_CONFIG_HOME/slack/config.json` |
//!
//! Writes overwrite the file in place and take no lock; two invocations
//! adding labels at the same moment can lose one of the writes.

mod config;

pub use config::{normalize_labels, ConfigError, ConfigFile, ConfigStore};
