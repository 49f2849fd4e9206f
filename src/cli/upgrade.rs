//! `--upgrade`: reinstall from the latest release

use std::process::ExitCode;

use tracing::debug;

use super::output::Output;
use crate::update::{latest_version, Installer, UpgradePlan, LATEST_RELEASE_API};
use crate::VERSION;

/// Runs the upgrade flow and returns the exit code to propagate
pub fn run(output: &Output) -> ExitCode {
    let latest = latest_version(LATEST_RELEASE_API);
    debug!(installed = VERSION, latest = ?latest, "checked latest release");

    match execute(UpgradePlan::new(VERSION, latest.as_deref()), &Installer::default(), output) {
        Some(code) => to_exit_code(code),
        None => ExitCode::SUCCESS,
    }
}

/// Reports the plan and runs the installer when needed
///
/// Returns `None` when nothing had to be installed.
pub fn execute(plan: UpgradePlan, installer: &Installer, output: &Output) -> Option<i32> {
    match plan {
        UpgradePlan::AlreadyLatest { installed } => {
            output.success(&format!("Already running the latest version ({}).", installed));
            return None;
        }
        UpgradePlan::Blind => {
            output.warn("Unable to determine latest version; attempting upgrade…");
        }
        UpgradePlan::Upgrade {
            from: Some(from),
            to,
        } => output.success(&format!("Upgrading from {} to {}…", from, to)),
        UpgradePlan::Upgrade { from: None, to } => {
            output.success(&format!("Upgrading to {}…", to));
        }
    }

    Some(installer.run(output))
}

fn to_exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
