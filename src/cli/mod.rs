//! # Command-Line Interface
//!
//! One invocation performs exactly one action:
//!
//! | Action | Invocation |
//! |--------|------------|
//! | Version | `slack -v` |
//! | Upgrade | `slack -u` |
//! | Save a label | `slack -au alice alice@example.com` |
//! | Send | `slack alice hello there`, `slack U0123ABC -e` |
//!
//! Flags belonging to different actions cannot be combined; doing so is a
//! usage error.
//!
//! ## Environment
//!
//! - `SLACK_TOKEN` - user token (`xoxp-` or `xoxc-`), needed to call Slack
//! - `EDITOR` - editor for `-e` (default `vim`)
//! - `XDG_CONFIG_HOME` - base for `slack/config.json`
//! - `SLACK_LOG` - diagnostic log filter (default `warn`)
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the selected action.

mod app;
mod compose;
mod label;
mod output;
mod send;
mod upgrade;

pub use app::{dispatch, normalize_args, run, Cli};
pub use compose::{join_words, ComposeError, Composer, DEFAULT_EDITOR};
pub use label::{AddLabel, SavedLabel};
pub use output::Output;
pub use send::{compose_message, connect, send_message};
