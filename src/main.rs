//! Slack DM - send Slack direct messages from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    slack_dm::logging::init();

    match slack_dm::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
