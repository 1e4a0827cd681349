//! Unified path management for nextjob configuration files.
//!
//! ```text
//! ~/.config/nextjob/      # Config directory (platform config dir + "nextjob")
//! └── config.toml         # Application configuration
//! ```

use std::path::PathBuf;

use nextjob_core::{NextJobError, Result};

const APP_DIR: &str = "nextjob";
const CONFIG_FILE: &str = "config.toml";

pub struct NextJobPaths;

impl NextJobPaths {
    /// Returns the nextjob configuration directory (e.g. `~/.config/nextjob/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| NextJobError::config("Cannot find the user configuration directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
