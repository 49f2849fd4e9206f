//! Latest-release discovery
//!
//! Any failure here (network, timeout, bad status, bad JSON) yields `None`;
//! the upgrade then goes ahead without a version check.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use tracing::debug;

use crate::domain::is_newer;

pub const LATEST_RELEASE_API: &str =
    "https://api.github.com/repos/ryangerardwilson/slack/releases/latest";

const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);
const UPDATER_AGENT: &str = "slack-updater";

/// Version reported by a build that was not stamped with a release
const UNKNOWN_VERSION: &str = "0.0.0";

/// Fetches the latest release tag from `url`
pub fn latest_version(url: &str) -> Option<String> {
    let client = match Client::builder().timeout(DISCOVERY_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            debug!(error = %e, "could not build release client");
            return None;
        }
    };

    let response = match client.get(url).header(USER_AGENT, UPDATER_AGENT).send() {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            debug!(status = %response.status(), "release lookup returned an error status");
            return None;
        }
        Err(e) => {
            debug!(error = %e, "release lookup failed");
            return None;
        }
    };

    let payload: Value = response.json().ok()?;
    release_tag(&payload)
}

/// Picks `tag_name`, falling back to `name`; blank values count as missing
pub fn release_tag(payload: &Value) -> Option<String> {
    ["tag_name", "name"]
        .iter()
        .filter_map(|key| payload.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|tag| !tag.is_empty())
        .map(str::to_string)
}

/// What `--upgrade` should do given the installed and discovered versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradePlan {
    /// Discovery failed; run the installer anyway
    Blind,
    /// The installed version is not older than the latest release
    AlreadyLatest { installed: String },
    /// Run the installer; `from` is absent when the installed version is unknown
    Upgrade { from: Option<String>, to: String },
}

impl UpgradePlan {
    pub fn new(installed: &str, latest: Option<&str>) -> Self {
        let Some(latest) = latest else {
            return UpgradePlan::Blind;
        };

        let installed = installed.trim();
        let known = !installed.is_empty() && installed != UNKNOWN_VERSION;

        if known && !is_newer(latest, installed) {
            return UpgradePlan::AlreadyLatest {
                installed: installed.to_string(),
            };
        }

        UpgradePlan::Upgrade {
            from: known.then(|| installed.to_string()),
            to: latest.to_string(),
        }
    }
}
