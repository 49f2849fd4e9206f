//! Slack Web API client
//!
//! Every call is a `POST https://slack.com/api/<method>` with bearer auth.
//! `users.lookupByEmail` takes a form body; the other methods take JSON.
//! Responses must be HTTP 200 with `"ok": true`, anything else is an error.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::UserToken;

pub const DEFAULT_API_URL: &str = "https://slack.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const AUTH_TEST: &str = "auth.test";
pub const USERS_LOOKUP_BY_EMAIL: &str = "users.lookupByEmail";
pub const CONVERSATIONS_OPEN: &str = "conversations.open";
pub const CHAT_POST_MESSAGE: &str = "chat.postMessage";

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Slack API request failed ({method}): {source}")]
    Transport {
        method: String,
        source: reqwest::Error,
    },

    #[error("Slack API HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Slack API returned invalid JSON.")]
    InvalidJson { method: String },

    #[error("Slack API error ({method}): {error}{}", detail_suffix(.details))]
    Api {
        method: String,
        error: String,
        details: Vec<String>,
    },

    #[error("Token belongs to a bot. Use a user token.")]
    BotIdentity,

    #[error("Unable to open DM channel.")]
    NoChannel,
}

fn detail_suffix(details: &[String]) -> String {
    if details.is_empty() {
        String::new()
    } else {
        format!(" ({})", details.join("; "))
    }
}

/// Identity reported by `auth.test`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: Option<String>,
    pub user: Option<String>,
    pub team: Option<String>,
    pub bot_id: Option<String>,
}

/// The Web API operations used to deliver a direct message
pub trait SlackApi {
    /// Checks the token; fails if it belongs to a bot
    fn auth_test(&self) -> Result<AuthIdentity, SlackError>;

    /// Looks up a user ID by email; `None` when the response carries no user
    fn lookup_user_by_email(&self, email: &str) -> Result<Option<String>, SlackError>;

    /// Opens (or reuses) the DM channel with a user and returns its ID
    fn open_dm(&self, user_id: &str) -> Result<String, SlackError>;

    /// Posts a message and returns its timestamp when Slack reports one
    fn post_message(&self, channel_id: &str, text: &str) -> Result<Option<String>, SlackError>;
}

impl<T: SlackApi + ?Sized> SlackApi for &T {
    fn auth_test(&self) -> Result<AuthIdentity, SlackError> {
        (**self).auth_test()
    }

    fn lookup_user_by_email(&self, email: &str) -> Result<Option<String>, SlackError> {
        (**self).lookup_user_by_email(email)
    }

    fn open_dm(&self, user_id: &str) -> Result<String, SlackError> {
        (**self).open_dm(user_id)
    }

    fn post_message(&self, channel_id: &str, text: &str) -> Result<Option<String>, SlackError> {
        (**self).post_message(channel_id, text)
    }
}

#[derive(Deserialize)]
struct IdObject {
    id: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    user: Option<IdObject>,
}

#[derive(Deserialize)]
struct OpenResponse {
    channel: Option<IdObject>,
}

#[derive(Deserialize)]
struct TsObject {
    ts: Option<String>,
}

#[derive(Deserialize)]
struct PostResponse {
    message: Option<TsObject>,
    ts: Option<String>,
}

/// Blocking HTTP client bound to one user token
pub struct SlackClient {
    http: Client,
    base_url: String,
    token: UserToken,
}

impl SlackClient {
    pub fn new(token: UserToken) -> Result<Self, SlackError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Creates a client against a different API root (used by tests)
    pub fn with_base_url(token: UserToken, base_url: impl Into<String>) -> Result<Self, SlackError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SlackError::Transport {
                method: "client".to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Issues one API call and returns the parsed body of a successful response
    pub fn call(&self, method: &str, payload: &Value) -> Result<Value, SlackError> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(method, "calling Slack API");

        let request = self.http.post(&url).bearer_auth(self.token.expose());
        let request = if method == USERS_LOOKUP_BY_EMAIL {
            request.form(payload)
        } else {
            request
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .body(payload.to_string())
        };

        let transport = |source: reqwest::Error| SlackError::Transport {
            method: method.to_string(),
            source,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;

        if status != StatusCode::OK {
            return Err(SlackError::Http {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|_| SlackError::InvalidJson {
            method: method.to_string(),
        })?;
        check_ok(method, data)
    }

    fn call_as<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T, SlackError> {
        let data = self.call(method, payload)?;
        serde_json::from_value(data).map_err(|_| SlackError::InvalidJson {
            method: method.to_string(),
        })
    }
}

/// Turns an `"ok": false` body into [`SlackError::Api`]
fn check_ok(method: &str, data: Value) -> Result<Value, SlackError> {
    if matches!(data.get("ok"), Some(Value::Bool(true))) {
        return Ok(data);
    }

    let error = data
        .get("error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .unwrap_or("unknown_error")
        .to_string();
    let details = data
        .pointer("/response_metadata/messages")
        .and_then(Value::as_array)
        .map(|messages| {
            messages
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Err(SlackError::Api {
        method: method.to_string(),
        error,
        details,
    })
}

impl SlackApi for SlackClient {
    fn auth_test(&self) -> Result<AuthIdentity, SlackError> {
        let identity: AuthIdentity = self.call_as(AUTH_TEST, &json!({}))?;
        if identity.bot_id.as_deref().is_some_and(|id| !id.is_empty()) {
            return Err(SlackError::BotIdentity);
        }
        debug!(user = ?identity.user_id, team = ?identity.team, "token verified");
        Ok(identity)
    }

    fn lookup_user_by_email(&self, email: &str) -> Result<Option<String>, SlackError> {
        let response: LookupResponse = self.call_as(USERS_LOOKUP_BY_EMAIL, &json!({ "email": email }))?;
        Ok(response
            .user
            .and_then(|user| user.id)
            .filter(|id| !id.is_empty()))
    }

    fn open_dm(&self, user_id: &str) -> Result<String, SlackError> {
        let response: OpenResponse = self.call_as(CONVERSATIONS_OPEN, &json!({ "users": user_id }))?;
        response
            .channel
            .and_then(|channel| channel.id)
            .filter(|id| !id.is_empty())
            .ok_or(SlackError::NoChannel)
    }

    fn post_message(&self, channel_id: &str, text: &str) -> Result<Option<String>, SlackError> {
        let response: PostResponse = self.call_as(
            CHAT_POST_MESSAGE,
            &json!({ "channel": channel_id, "text": text }),
        )?;
        Ok(response.message.and_then(|message| message.ts).or(response.ts))
    }
}
