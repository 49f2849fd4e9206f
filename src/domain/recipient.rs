//! Recipient references
//!
//! A recipient on the command line is one of:
//! - a saved label (`alice`), looked up in the config's `user_labels`
//! - a Slack user ID (`U0123ABC` or `W0123ABC`)
//! - an email address (`alice@example.com`), resolved through the Web API
//!
//! Labels win over everything else, so a label spelled like a user ID still
//! resolves through the label mapping.

use std::collections::BTreeMap;

use thiserror::Error;

/// Mapping from label to Slack user ID
pub type UserLabels = BTreeMap<String, String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Recipient must be a user ID, email, or saved label.")]
    Unrecognized(String),

    #[error("No user found for that email.")]
    NoUserForEmail(String),

    #[error("Value must be a user ID or email.")]
    InvalidLabelTarget(String),
}

/// Returns true if `value` looks like a Slack user ID (`^[UW][A-Z0-9]+$`)
pub fn is_user_id(value: &str) -> bool {
    match value.as_bytes().split_first() {
        Some((b'U' | b'W', rest)) => {
            !rest.is_empty()
                && rest
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        _ => false,
    }
}

/// Returns true if `value` should be treated as an email address
pub fn is_email(value: &str) -> bool {
    value.contains('@')
}

/// A recipient reference after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient<'a> {
    /// Resolved from a saved label
    Label { label: &'a str, user_id: &'a str },
    /// Literal user ID, used without any lookup
    UserId(&'a str),
    /// Email address that still needs a lookup
    Email(&'a str),
}

impl<'a> Recipient<'a> {
    /// Classifies a recipient argument against the saved labels
    pub fn classify(recipient: &'a str, labels: &'a UserLabels) -> Result<Self, ResolveError> {
        if let Some((label, user_id)) = labels.get_key_value(recipient) {
            return Ok(Recipient::Label { label, user_id });
        }
        if is_user_id(recipient) {
            return Ok(Recipient::UserId(recipient));
        }
        if is_email(recipient) {
            return Ok(Recipient::Email(recipient));
        }
        Err(ResolveError::Unrecognized(recipient.to_string()))
    }

    /// Classifies the value of `--add-user`, which never consults labels
    pub fn classify_label_target(value: &'a str) -> Result<Self, ResolveError> {
        if is_user_id(value) {
            Ok(Recipient::UserId(value))
        } else if is_email(value) {
            Ok(Recipient::Email(value))
        } else {
            Err(ResolveError::InvalidLabelTarget(value.to_string()))
        }
    }

    /// Returns the user ID when no network lookup is needed
    pub fn known_user_id(&self) -> Option<&'a str> {
        match self {
            Recipient::Label { user_id, .. } => Some(user_id),
            Recipient::UserId(id) => Some(id),
            Recipient::Email(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> UserLabels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn user_id_pattern() {
        assert!(is_user_id("U1234567ABC"));
        assert!(is_user_id("W0"));
        assert!(!is_user_id("U"));
        assert!(!is_user_id("u123"));
        assert!(!is_user_id("U12a"));
        assert!(!is_user_id("C123456"));
        assert!(!is_user_id("U123 "));
        assert!(!is_user_id(""));
    }

    #[test]
    fn label_takes_precedence_over_user_id() {
        let labels = labels(&[("U999", "U111")]);

        let recipient = Recipient::classify("U999", &labels).unwrap();
        assert_eq!(
            recipient,
            Recipient::Label {
                label: "U999",
                user_id: "U111"
            }
        );
        assert_eq!(recipient.known_user_id(), Some("U111"));
    }

    #[test]
    fn label_takes_precedence_over_email() {
        let labels = labels(&[("me@work", "U42")]);
        let recipient = Recipient::classify("me@work", &labels).unwrap();
        assert_eq!(recipient.known_user_id(), Some("U42"));
    }

    #[test]
    fn classifies_id_and_email() {
        let labels = UserLabels::new();

        assert_eq!(
            Recipient::classify("U1234567ABC", &labels).unwrap(),
            Recipient::UserId("U1234567ABC")
        );
        assert_eq!(
            Recipient::classify("a@example.com", &labels).unwrap(),
            Recipient::Email("a@example.com")
        );
    }

    #[test]
    fn rejects_unknown_forms() {
        let labels = labels(&[("alice", "U1")]);
        let err = Recipient::classify("bob", &labels).unwrap_err();

        assert_eq!(err, ResolveError::Unrecognized("bob".to_string()));
        assert!(err.to_string().contains("user ID, email, or saved label"));
    }

    #[test]
    fn label_target_ignores_labels() {
        assert_eq!(
            Recipient::classify_label_target("W77").unwrap(),
            Recipient::UserId("W77")
        );
        assert!(matches!(
            Recipient::classify_label_target("alice"),
            Err(ResolveError::InvalidLabelTarget(_))
        ));
    }
}
