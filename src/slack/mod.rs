//! # Slack Web API
//!
//! A thin blocking client for the four methods needed to send a DM as the
//! token's user:
//!
//! | Method | Used for |
//! |--------|----------|
//! | `auth.test` | Verify the token and reject bot identities |
//! | `users.lookupByEmail` | Resolve an email recipient |
//! | `conversations.open` | Open the DM channel |
//! | `chat.postMessage` | Post the message |
//!
//! There is no retry or rate-limit handling; the first failure is returned.

mod client;
mod dm;

pub use client::{
    AuthIdentity, SlackApi, SlackClient, SlackError, AUTH_TEST, CHAT_POST_MESSAGE,
    CONVERSATIONS_OPEN, DEFAULT_API_URL, USERS_LOOKUP_BY_EMAIL,
};
pub use dm::{resolve_email, resolve_user_id, send_direct_message, Delivery};

#[cfg(test)]
pub(crate) use dm::fake;
