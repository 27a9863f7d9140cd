//! Shell configuration.
//!
//! Configuration is a small TOML file naming the user, the log file, the VFS
//! archive, and an optional start script. The core receives these as plain
//! values; parsing failures are fatal at startup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::vfs::VfsMode;

/// Shell session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name shown in the prompt and in audit log lines.
    #[serde(default = "default_username")]
    pub username: String,

    /// Command log file, truncated at session start.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Path to the VFS archive (zip, tar, or tar.gz).
    pub vfs: PathBuf,

    /// Script whose lines run through the normal command cycle before
    /// interactive input.
    #[serde(default)]
    pub start_script: Option<PathBuf>,

    /// Which VFS backing to build from the archive.
    #[serde(default)]
    pub mode: VfsMode,
}

fn default_username() -> String {
    "user".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("arcsh.log")
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("cannot parse config from {}", path.display()))
    }
}
