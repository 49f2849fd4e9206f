//! # Self-update
//!
//! `slack --upgrade` asks GitHub for the latest release tag, compares it with
//! the running version, and re-runs the install script when newer (or when
//! the lookup fails).

mod installer;
mod release;

pub use installer::{Installer, INSTALL_URL};
pub use release::{latest_version, release_tag, UpgradePlan, LATEST_RELEASE_API};
