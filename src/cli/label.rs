//! `--add-user LABEL VALUE`: save a label for a user ID or email

use crate::domain::{Recipient, UserLabels};
use crate::error::{Error, Result};
use crate::slack::{resolve_email, SlackApi};
use crate::storage::ConfigFile;

/// A validated add-label request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabel {
    label: String,
    value: String,
}

/// The label as written to the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedLabel {
    pub label: String,
    pub user_id: String,
}

impl AddLabel {
    pub fn new(label: &str, value: &str) -> Result<Self> {
        let label = label.trim();
        let value = value.trim();
        if label.is_empty() {
            return Err(Error::usage("Label cannot be empty."));
        }
        if value.is_empty() {
            return Err(Error::usage("User ID or email cannot be empty."));
        }
        Ok(Self {
            label: label.to_string(),
            value: value.to_string(),
        })
    }

    /// Resolves the value and merges the label into `config`
    ///
    /// `connect` is only called for email values, which need the Web API.
    pub fn apply<A, F>(self, mut labels: UserLabels, config: &mut ConfigFile, connect: F) -> Result<SavedLabel>
    where
        A: SlackApi,
        F: FnOnce() -> Result<A>,
    {
        let user_id = match Recipient::classify_label_target(&self.value)? {
            Recipient::Email(email) => {
                let api = connect()?;
                api.auth_test()?;
                resolve_email(email, &api)?
            }
            target => target
                .known_user_id()
                .map(str::to_string)
                .unwrap_or_else(|| self.value.clone()),
        };

        labels.insert(self.label.clone(), user_id.clone());
        config.set_user_labels(&labels);

        Ok(SavedLabel {
            label: self.label,
            user_id,
        })
    }
}
