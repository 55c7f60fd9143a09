//! XDG-style path utilities.
//!
//! Configuration follows the XDG Base Directory convention on every
//! platform rather than OS-specific locations. Generated audio lives in a
//! scratch directory under the system temp dir.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "langmon";

/// Name of the scratch directory for temporary audio under the system temp dir.
pub const SCRATCH_DIR_NAME: &str = "language_monitor";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/langmon` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/langmon` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}

/// Returns the scratch directory for temporary audio files.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(SCRATCH_DIR_NAME)
}
