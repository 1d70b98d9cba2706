//! Config directory resolution.
//!
//! Swipa keeps everything it persists (settings, window state, bookmarks,
//! optional log) in one directory. An explicit override wins, a local
//! `swipa.json` next to the binary enables portable mode, otherwise the
//! platform config directory is used.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "swipa";
const SETTINGS_FILE: &str = "swipa.json";

/// Resolved location for persisted app files.
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    override_dir: Option<PathBuf>,
}

impl PathConfig {
    /// `--config-dir` beats `SWIPA_CONFIG_DIR`; with neither set, the
    /// directory is resolved lazily by [`PathConfig::dir`].
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        Self {
            override_dir: cli_dir
                .or_else(|| std::env::var("SWIPA_CONFIG_DIR").ok().map(PathBuf::from)),
        }
    }

    /// The directory all persisted files live in.
    pub fn dir(&self) -> PathBuf {
        if let Some(dir) = &self.override_dir {
            return dir.clone();
        }
        // Portable mode: a settings file in the working directory keeps
        // everything local.
        if let Ok(cwd) = std::env::current_dir()
            && cwd.join(SETTINGS_FILE).exists()
        {
            return cwd;
        }
        dirs_next::config_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path for a persisted file (`swipa.json`, `swipa.log`).
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir().join(name)
    }

    pub fn ensure_dir(&self) -> Result<()> {
        let dir = self.dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))
    }
}
