//! Environment access
//!
//! Anything that depends on process environment variables reads them through
//! [`Environment`], so the real process and a fixed map are interchangeable.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::BaseDirs;

/// Source of environment variables
pub trait Environment {
    /// Returns the variable's value, treating empty values as unset
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the user's home directory
    fn home_dir(&self) -> Option<PathBuf> {
        self.var("HOME")
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
    }
}

/// The environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty()).cloned()
    }
}

/// Expands a leading `~` to the home directory
pub fn expand_home(path: &str, env: &dyn Environment) -> PathBuf {
    if path == "~" {
        if let Some(home) = env.home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = env.home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
