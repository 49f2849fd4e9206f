//! Domain rules for recipients, tokens and versions
//!
//! Pure logic with no I/O; the network and filesystem live elsewhere.

mod recipient;
mod token;
mod version;

pub use recipient::{is_email, is_user_id, Recipient, ResolveError, UserLabels};
pub use token::{TokenError, UserToken, BOT_TOKEN_PREFIX, TOKEN_ENV, USER_TOKEN_PREFIXES};
pub use version::{is_newer, Version};
