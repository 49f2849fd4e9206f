//! Runs the remote install script
//!
//! Equivalent to `curl -fsSL <url> | bash`: the downloader's stdout is wired
//! to the shell's stdin. The shell's exit code is the result unless the
//! downloader failed, in which case its code wins and its stderr is forwarded.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::cli::Output;

pub const INSTALL_URL: &str =
    "https://raw.githubusercontent.com/ryangerardwilson/slack/main/install.sh";

/// Downloader and shell command lines for the upgrade pipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    downloader: Vec<String>,
    shell: Vec<String>,
}

impl Default for Installer {
    fn default() -> Self {
        Self::new(
            ["curl", "-fsSL", INSTALL_URL],
            ["bash"],
        )
    }
}

impl Installer {
    pub fn new<D, S>(downloader: D, shell: S) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            downloader: downloader.into_iter().map(Into::into).collect(),
            shell: shell.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the pipe and returns the exit code to propagate
    pub fn run(&self, output: &Output) -> i32 {
        let (Some((curl, curl_args)), Some((sh, sh_args))) =
            (self.downloader.split_first(), self.shell.split_first())
        else {
            output.error("Upgrade command is not configured");
            return 1;
        };

        debug!(downloader = %curl, shell = %sh, "starting installer");

        let mut downloader = match Command::new(curl)
            .args(curl_args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                report_spawn_error(output, curl, &e);
                return 1;
            }
        };

        let shell_stdin = match downloader.stdout.take() {
            Some(stdout) => Stdio::from(stdout),
            None => Stdio::null(),
        };

        let mut shell = match Command::new(sh).args(sh_args).stdin(shell_stdin).spawn() {
            Ok(child) => child,
            Err(e) => {
                report_spawn_error(output, sh, &e);
                let _ = downloader.kill();
                let _ = downloader.wait();
                return 1;
            }
        };

        let shell_status = shell.wait();

        let mut downloader_stderr = String::new();
        if let Some(mut stderr) = downloader.stderr.take() {
            let _ = stderr.read_to_string(&mut downloader_stderr);
        }
        let downloader_status = downloader.wait();

        let downloader_code = exit_code(downloader_status);
        if downloader_code != 0 {
            if !downloader_stderr.is_empty() {
                output.raw_err(&downloader_stderr);
            }
            return downloader_code;
        }

        exit_code(shell_status)
    }
}

fn report_spawn_error(output: &Output, program: &str, err: &io::Error) {
    if err.kind() == io::ErrorKind::NotFound {
        output.error(&format!("Upgrade requires {}", program));
    } else {
        output.error(&format!("Failed to start {}: {}", program, err));
    }
}

/// Signals and wait failures count as exit code 1
fn exit_code(status: io::Result<ExitStatus>) -> i32 {
    status.ok().and_then(|s| s.code()).unwrap_or(1)
}
