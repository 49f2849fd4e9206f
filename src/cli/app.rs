//! Main CLI application structure

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;

use super::output::Output;
use super::{label, send, upgrade};
use crate::env::{Environment, ProcessEnv};
use crate::error::{Error, Result};
use crate::slack::DEFAULT_API_URL;
use crate::storage::ConfigStore;
use crate::VERSION;

#[derive(Parser, Debug)]
#[command(name = "slack")]
#[command(about = "Send a Slack direct message as yourself.")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// User ID (U...), email, or label.
    pub recipient: Option<String>,

    /// Message text to send.
    pub text: Vec<String>,

    /// Path to config.json for labels.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Open $EDITOR to compose the message.
    #[arg(short = 'e', long)]
    pub edit: bool,

    /// Save a label pointing to a Slack user ID or email (also -au).
    #[arg(long = "add-user", num_args = 2, value_names = ["LABEL", "USER_ID_OR_EMAIL"])]
    pub add_user: Option<Vec<String>>,

    /// Show version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Upgrade to the latest version.
    #[arg(short = 'u', long)]
    pub upgrade: bool,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,
}

impl Cli {
    /// Recipient argument, with an empty string treated as absent
    fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref().filter(|r| !r.is_empty())
    }

    fn has_message_args(&self) -> bool {
        self.recipient().is_some() || !self.text.is_empty() || self.edit
    }
}

/// Rewrites the two-letter `-au` flag to `--add-user`
///
/// Clap short flags are single characters, so `-au` would otherwise parse as
/// `-a -u`. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            if arg == "--" {
                after_separator = true;
                arg
            } else if arg == "-au" {
                OsString::from("--add-user")
            } else {
                arg
            }
        })
        .collect()
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let output = Output::new();

    dispatch(cli, &ProcessEnv, &output)
}

/// Routes parsed arguments to exactly one action
pub fn dispatch(cli: Cli, env: &dyn Environment, output: &Output) -> Result<ExitCode> {
    if cli.version {
        output.success(VERSION);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.upgrade {
        if cli.has_message_args() || cli.add_user.is_some() {
            return Err(Error::usage("Use -u by itself to upgrade."));
        }
        return Ok(upgrade::run(output));
    }

    let store = ConfigStore::locate(cli.config.as_deref(), env)?;
    debug!(path = %store.path().display(), "using config");
    let mut config = store.load()?;
    let labels = config.user_labels()?;

    if let Some(add_user) = &cli.add_user {
        if cli.has_message_args() {
            return Err(Error::usage("Use --add-user by itself."));
        }
        let [label, value] = add_user.as_slice() else {
            return Err(Error::usage("--add-user takes a LABEL and a USER_ID_OR_EMAIL."));
        };

        let request = label::AddLabel::new(label, value)?;
        let saved = request.apply(labels, &mut config, || {
            send::connect(env, &cli.api_url)
        })?;
        store.save(&config)?;
        debug!(label = %saved.label, user_id = %saved.user_id, "label saved");

        output.success(&format!(
            "Saved label '{}' in {}",
            saved.label,
            store.path().display()
        ));
        return Ok(ExitCode::SUCCESS);
    }

    if cli.edit && !cli.text.is_empty() {
        return Err(Error::usage("Use either -e or provide text, not both."));
    }

    let text = send::compose_message(cli.edit, &cli.text, env)?;

    let Some(recipient) = cli.recipient() else {
        output.help(Cli::command().render_help());
        return Ok(ExitCode::SUCCESS);
    };
    if text.is_empty() {
        output.help(Cli::command().render_help());
        return Ok(ExitCode::SUCCESS);
    }

    let client = send::connect(env, &cli.api_url)?;
    let delivery = send::send_message(&client, recipient, &labels, &text)?;
    output.success(&delivery.summary());

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["slack"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_args(argv)).unwrap()
    }

    fn env_for(dir: &TempDir) -> HashMap<String, String> {
        [(
            "XDG_CONFIG_HOME".to_string(),
            dir.path().display().to_string(),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_recipient_and_text() {
        let cli = parse(&["alice", "hello", "there"]);
        assert_eq!(cli.recipient.as_deref(), Some("alice"));
        assert_eq!(cli.text, vec!["hello", "there"]);
        assert!(!cli.edit);
        assert_eq!(cli.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn short_add_user_alias() {
        let cli = parse(&["-au", "alice", "U123"]);
        assert_eq!(
            cli.add_user,
            Some(vec!["alice".to_string(), "U123".to_string()])
        );
        assert!(!cli.upgrade);
    }

    #[test]
    fn alias_not_rewritten_after_separator() {
        let args = normalize_args(["slack", "U1", "--", "-au"]);
        assert_eq!(args[3], OsString::from("-au"));
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-v"]);
        assert!(cli.version);

        let cli = parse(&["-u"]);
        assert!(cli.upgrade);

        let cli = parse(&["-e", "U1"]);
        assert!(cli.edit);
    }

    #[test]
    fn upgrade_rejects_other_arguments() {
        let dir = TempDir::new().unwrap();
        let err = dispatch(parse(&["-u", "U1"]), &env_for(&dir), &Output::new()).unwrap_err();

        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.to_string(), "Use -u by itself to upgrade.");
    }

    #[test]
    fn add_user_rejects_message_arguments() {
        let dir = TempDir::new().unwrap();
        let err = dispatch(
            parse(&["--add-user", "alice", "U1", "-e"]),
            &env_for(&dir),
            &Output::new(),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Use --add-user by itself.");
    }

    #[test]
    fn edit_and_text_conflict() {
        let dir = TempDir::new().unwrap();
        let err = dispatch(parse(&["-e", "U1", "hi"]), &env_for(&dir), &Output::new()).unwrap_err();

        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.to_string(), "Use either -e or provide text, not both.");
    }

    #[test]
    fn add_user_with_id_persists_label() {
        let dir = TempDir::new().unwrap();
        let env = env_for(&dir);

        dispatch(parse(&["-au", " alice ", "U0ALICE"]), &env, &Output::new()).unwrap();

        let store = ConfigStore::locate(None, &env).unwrap();
        let labels = store.load().unwrap().user_labels().unwrap();
        assert_eq!(labels.get("alice").map(String::as_str), Some("U0ALICE"));
    }

    #[test]
    fn missing_recipient_prints_help() {
        let dir = TempDir::new().unwrap();
        assert!(dispatch(parse(&[]), &env_for(&dir), &Output::new()).is_ok());
    }

    #[test]
    fn missing_text_prints_help_without_token() {
        let dir = TempDir::new().unwrap();
        assert!(dispatch(parse(&["U123"]), &env_for(&dir), &Output::new()).is_ok());
    }

    #[test]
    fn empty_recipient_prints_help_without_token() {
        let dir = TempDir::new().unwrap();
        assert!(dispatch(parse(&["", "hello"]), &env_for(&dir), &Output::new()).is_ok());
    }

    #[test]
    fn bot_token_rejected_before_network() {
        let dir = TempDir::new().unwrap();
        let mut env = env_for(&dir);
        env.insert("SLACK_TOKEN".to_string(), "xoxb-123".to_string());

        let mut cli = parse(&["U123", "hello"]);
        cli.api_url = "http://127.0.0.1:9".to_string();
        let err = dispatch(cli, &env, &Output::new()).unwrap_err();

        assert!(matches!(err, Error::Credential(_)));
        assert_eq!(err.to_string(), "Bot tokens are not supported. Use a user token.");
    }

    #[test]
    fn corrupt_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slack").join("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[]").unwrap();

        let err = dispatch(parse(&["U1", "hi"]), &env_for(&dir), &Output::new()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
