//! Label configuration file
//!
//! Labels live in `<config-dir>/slack/config.json`:
//!
//! ```json
//! {
//!   "user_labels": {
//!     "alice": "U0123ABC"
//!   }
//! }
//! ```
//!
//! The file is round-tripped as a raw JSON object so fields this tool does
//! not know about survive a save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::UserLabels;
use crate::env::{expand_home, Environment};

const LABELS_KEY: &str = "user_labels";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Unable to read config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file must contain a JSON object.")]
    NotAnObject,

    #[error("user_labels must be a JSON object.")]
    LabelsNotAnObject,

    #[error("Unable to write config at {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Could not determine config directory; pass --config or set XDG_CONFIG_HOME")]
    NoConfigDir,
}

/// In-memory copy of the config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    payload: Map<String, Value>,
}

impl ConfigFile {
    pub fn from_payload(payload: Map<String, Value>) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Returns the cleaned label mapping
    pub fn user_labels(&self) -> Result<UserLabels, ConfigError> {
        normalize_labels(&self.payload)
    }

    /// Replaces the label mapping, leaving other fields untouched
    pub fn set_user_labels(&mut self, labels: &UserLabels) {
        let object = labels
            .iter()
            .map(|(label, user_id)| (label.clone(), Value::String(user_id.clone())))
            .collect();
        self.payload
            .insert(LABELS_KEY.to_string(), Value::Object(object));
    }
}

/// Extracts `user_labels`, keeping only entries with a non-empty label and a
/// non-blank string value (trimmed)
pub fn normalize_labels(payload: &Map<String, Value>) -> Result<UserLabels, ConfigError> {
    let labels = match payload.get(LABELS_KEY) {
        None | Some(Value::Null) => return Ok(UserLabels::new()),
        Some(Value::Object(labels)) => labels,
        Some(_) => return Err(ConfigError::LabelsNotAnObject),
    };

    Ok(labels
        .iter()
        .filter(|(label, _)| !label.is_empty())
        .filter_map(|(label, value)| {
            let user_id = value.as_str()?.trim();
            (!user_id.is_empty()).then(|| (label.clone(), user_id.to_string()))
        })
        .collect())
}

/// Rebuilds objects with their keys in sorted order, at every depth
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Reads and writes the config file at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the config path: explicit override, then `$XDG_CONFIG_HOME`,
    /// then `~/.config`
    pub fn locate(config_override: Option<&str>, env: &dyn Environment) -> Result<Self, ConfigError> {
        if let Some(path) = config_override {
            return Ok(Self::new(expand_home(path, env)));
        }

        let base = match env.var("XDG_CONFIG_HOME") {
            Some(base) => expand_home(&base, env),
            None => env
                .home_dir()
                .map(|home| home.join(".config"))
                .ok_or(ConfigError::NoConfigDir)?,
        };

        Ok(Self::new(base.join("slack").join("config.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config; a missing file or a `null` payload is empty
    pub fn load(&self) -> Result<ConfigFile, ConfigError> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Null => Ok(ConfigFile::default()),
            Value::Object(payload) => Ok(ConfigFile::from_payload(payload)),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    /// Writes pretty-printed JSON with sorted keys and a trailing newline
    pub fn save(&self, config: &ConfigFile) -> Result<(), ConfigError> {
        let write_err = |source: io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let mut content = serde_json::to_string_pretty(&sort_keys(&Value::Object(config.payload.clone())))
            .map_err(|e| write_err(io::Error::other(e)))?;
        content.push('\n');

        fs::write(&self.path, content).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z ]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(2, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|fields| Value::Object(fields.into_iter().collect())),
            ]
        })
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalize_drops_malformed_entries() {
        let payload = object(json!({
            "user_labels": {"a": "  ", "b": 3, "c": "U123", "": "U9", "d": " W55 "}
        }));

        let labels = normalize_labels(&payload).unwrap();
        let expected: UserLabels = [("c", "U123"), ("d", "W55")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn normalize_missing_or_null_labels() {
        assert!(normalize_labels(&Map::new()).unwrap().is_empty());
        assert!(normalize_labels(&object(json!({"user_labels": null})))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn normalize_rejects_non_object_labels() {
        let err = normalize_labels(&object(json!({"user_labels": ["U1"]}))).unwrap_err();
        assert!(matches!(err, ConfigError::LabelsNotAnObject));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nope.json"));

        assert_eq!(store.load().unwrap(), ConfigFile::default());
    }

    #[test]
    fn load_null_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "null").unwrap();

        assert!(ConfigStore::new(&path).load().unwrap().payload().is_empty());
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Unable to read config at"));
    }

    #[test]
    fn load_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject));
    }

    #[test]
    fn save_round_trips_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"theme": {"z": 1, "a": [true, null]}, "user_labels": {"bob": "U2"}}"#,
        )
        .unwrap();

        let store = ConfigStore::new(&path);
        let mut config = store.load().unwrap();
        let mut labels = config.user_labels().unwrap();
        labels.insert("alice".to_string(), "U1".to_string());
        config.set_user_labels(&labels);
        store.save(&config).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.payload()["theme"], json!({"z": 1, "a": [true, null]}));
        assert_eq!(
            reloaded.payload()["user_labels"],
            json!({"alice": "U1", "bob": "U2"})
        );
    }

    #[test]
    fn save_creates_directories_and_sorts_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep").join("slack").join("config.json");
        let store = ConfigStore::new(&path);

        let config = ConfigFile::from_payload(object(json!({"zeta": 1, "alpha": 2})));
        store.save(&config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"alpha\": 2,\n  \"zeta\": 1\n}\n");
    }

    #[test]
    fn locate_prefers_override() {
        let env = env(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")]);

        let store = ConfigStore::locate(Some("~/custom.json"), &env).unwrap();
        assert_eq!(store.path(), Path::new("/home/u/custom.json"));
    }

    #[test]
    fn locate_uses_xdg_then_home() {
        let xdg = env(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")]);
        assert_eq!(
            ConfigStore::locate(None, &xdg).unwrap().path(),
            Path::new("/xdg/slack/config.json")
        );

        let home = env(&[("HOME", "/home/u")]);
        assert_eq!(
            ConfigStore::locate(None, &home).unwrap().path(),
            Path::new("/home/u/.config/slack/config.json")
        );
    }

    proptest! {
        #[test]
        fn save_then_load_keeps_every_field(
            extra in prop::collection::btree_map("[a-z_]{1,10}", json_value(), 0..6),
            labels in prop::collection::btree_map("[a-z]{1,8}", "[UW][A-Z0-9]{2,8}", 0..4),
        ) {
            let payload: Map<String, Value> = extra
                .into_iter()
                .filter(|(key, _)| key.as_str() != LABELS_KEY)
                .collect();
            let mut config = ConfigFile::from_payload(payload);
            config.set_user_labels(&labels);

            let dir = TempDir::new().unwrap();
            let store = ConfigStore::new(dir.path().join("config.json"));
            store.save(&config).unwrap();
            let reloaded = store.load().unwrap();

            prop_assert_eq!(&reloaded, &config);
            prop_assert_eq!(reloaded.user_labels().unwrap(), labels);
        }
    }
}
