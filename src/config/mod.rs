//! Configuration management for tmux-switcher

mod hotkeys;

pub use hotkeys::{HotkeyGroup, HotkeyId, Hotkeys, default_switcher_key};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tmux::SystemRunner;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Tmux program plus leading arguments (e.g. "tmux -L work")
    #[serde(default = "default_tmux_command")]
    pub tmux_command: String,

    /// Time a single tmux invocation may take, in milliseconds
    #[serde(default = "default_command_timeout")]
    pub command_timeout_ms: u64,

    /// Wait for a split container to become ready before focusing its
    /// child anyway, in milliseconds
    #[serde(default = "default_focus_fallback")]
    pub focus_fallback_ms: u64,

    /// Hotkey bindings
    #[serde(default)]
    pub hotkeys: Hotkeys,
}

fn default_tmux_command() -> String {
    "tmux".to_string()
}

const fn default_command_timeout() -> u64 {
    5000
}

const fn default_focus_fallback() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux_command: default_tmux_command(),
            command_timeout_ms: default_command_timeout(),
            focus_fallback_ms: default_focus_fallback(),
            hotkeys: Hotkeys::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        // Ensure hotkeys added since the file was written are present
        config.hotkeys.merge_defaults();
        Ok(config)
    }

    /// Reject settings that would make every tmux call fail
    ///
    /// # Errors
    ///
    /// Returns an error if `command_timeout_ms` is zero
    pub fn validate(&self) -> Result<()> {
        if self.command_timeout_ms == 0 {
            bail!("command_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::paths::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tmux-switcher")
            .join("config.json")
    }

    /// Per-invocation tmux timeout
    #[must_use]
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Fallback delay of the tab focus sequence
    #[must_use]
    pub const fn focus_fallback(&self) -> Duration {
        Duration::from_millis(self.focus_fallback_ms)
    }

    /// Build the tmux runner described by this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or `tmux_command` is empty or
    /// cannot be split
    pub fn runner(&self) -> Result<SystemRunner> {
        self.validate()?;
        SystemRunner::from_command_line(&self.tmux_command, self.command_timeout())
            .with_context(|| format!("Invalid tmux_command {:?}", self.tmux_command))
    }
}
