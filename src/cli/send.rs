//! Default action: send a direct message

use tracing::debug;

use super::compose::{join_words, Composer};
use crate::domain::{UserLabels, UserToken};
use crate::env::Environment;
use crate::error::Result;
use crate::slack::{resolve_user_id, send_direct_message, Delivery, SlackApi, SlackClient};

/// Builds the message text from the editor or the positional words
pub fn compose_message(edit: bool, words: &[String], env: &dyn Environment) -> Result<String> {
    if edit {
        Ok(Composer::from_env(env)?.compose()?)
    } else {
        Ok(join_words(words))
    }
}

/// Validates `SLACK_TOKEN` and builds a client for `api_url`
pub fn connect(env: &dyn Environment, api_url: &str) -> Result<SlackClient> {
    let token = UserToken::from_env(env)?;
    debug!(?token, api_url, "token accepted");
    Ok(SlackClient::with_base_url(token, api_url)?)
}

/// Verifies the token, resolves the recipient, and delivers `text`
pub fn send_message(
    api: &dyn SlackApi,
    recipient: &str,
    labels: &UserLabels,
    text: &str,
) -> Result<Delivery> {
    api.auth_test()?;
    let user_id = resolve_user_id(recipient, labels, api)?;
    send_direct_message(api, &user_id, text)
}
