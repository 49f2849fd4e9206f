//! Recipient resolution and direct-message delivery on top of [`SlackApi`]

use tracing::debug;

use super::SlackApi;
use crate::domain::{Recipient, ResolveError, UserLabels};
use crate::error::Result;

/// Outcome of a delivered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub user_id: String,
    pub channel_id: String,
    pub ts: Option<String>,
}

impl Delivery {
    /// One-line confirmation printed after sending
    pub fn summary(&self) -> String {
        match &self.ts {
            Some(ts) => format!(
                "DM sent. user={} channel={} ts={}",
                self.user_id, self.channel_id, ts
            ),
            None => format!("DM sent. user={} channel={}", self.user_id, self.channel_id),
        }
    }
}

/// Looks up the user ID for an email address
pub fn resolve_email(email: &str, api: &dyn SlackApi) -> Result<String> {
    debug!("looking up user by email");
    match api.lookup_user_by_email(email)? {
        Some(user_id) => Ok(user_id),
        None => Err(ResolveError::NoUserForEmail(email.to_string()).into()),
    }
}

/// Resolves a recipient argument to a Slack user ID
///
/// Labels are checked first, then the user-ID pattern (returned as-is, with
/// no existence check), then email lookup.
pub fn resolve_user_id(recipient: &str, labels: &UserLabels, api: &dyn SlackApi) -> Result<String> {
    match Recipient::classify(recipient, labels)? {
        Recipient::Label { label, user_id } => {
            debug!(label, user_id, "recipient resolved from label");
            Ok(user_id.to_string())
        }
        Recipient::UserId(user_id) => Ok(user_id.to_string()),
        Recipient::Email(email) => resolve_email(email, api),
    }
}

/// Opens the DM channel with `user_id` and posts `text`
pub fn send_direct_message(api: &dyn SlackApi, user_id: &str, text: &str) -> Result<Delivery> {
    let channel_id = api.open_dm(user_id)?;
    let ts = api.post_message(&channel_id, text)?;

    Ok(Delivery {
        user_id: user_id.to_string(),
        channel_id,
        ts,
    })
}
