//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Start location of the left pane (working directory when unset)
    pub left_path: Option<PathBuf>,
    /// Start location of the right pane (working directory when unset)
    pub right_path: Option<PathBuf>,
    /// Number of status messages kept
    pub status_history: usize,
    /// How long the loop waits for a key before checking for shutdown
    pub poll_interval_ms: u64,
    /// Editor command; empty means $VISUAL, then $EDITOR, then vi
    pub editor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            left_path: None,
            right_path: None,
            status_history: 100,
            poll_interval_ms: 250,
            editor: String::new(),
        }
    }
}

impl GeneralConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    /// Editor to launch: configured, then $VISUAL, then $EDITOR, then vi
    pub fn editor_command(&self) -> String {
        if !self.editor.trim().is_empty() {
            return self.editor.clone();
        }
        ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "vi".to_string()
                }
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by APCMD_LOG
    pub level: String,
    /// Log file name
    pub file: String,
    /// Directory for the log file (config directory when unset)
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "apcmd.log".to_string(),
            directory: None,
        }
    }
}

/// Get the config directory path for the current platform
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // Linux: $XDG_CONFIG_HOME/apcmd or ~/.config/apcmd
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config")))
            .map(|p| p.join("apcmd"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("apcmd"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        // macOS and others: ~/.config/apcmd
        std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config/apcmd"))
    }
}

/// Get the config file path
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

fn default_config() -> &'static str {
    r##"# apcmd configuration
# This file is auto-generated. Edit as needed.

[general]
# Start directories of the panes (default: current directory)
# left_path = "/home/user"
# right_path = "/tmp"

# Number of status messages kept in memory
status_history = 100

# Milliseconds to wait for a key before checking for shutdown signals
poll_interval_ms = 250

# Editor for F4; empty uses $VISUAL, then $EDITOR, then vi
editor = ""

[logging]
# Log filter (error, warn, info, debug, trace or per-module directives).
# The APCMD_LOG environment variable takes precedence.
level = "info"

# Log file name
file = "apcmd.log"

# Directory for the log file (default: the config directory)
# directory = "/tmp"
"##
}

impl Config {
    /// Parse configuration text
    pub fn parse(content: &str) -> AppResult<Self> {
        toml_edit::de::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Self {
        let Some(config_path) = config_file() else {
            eprintln!("Warning: Could not determine config directory");
            return Config::default();
        };
        Self::load_from(&config_path)
    }

    /// Load from a specific path; problems fall back to defaults with a warning
    pub fn load_from(config_path: &Path) -> Self {
        if let Some(config_dir) = config_path.parent()
            && !config_dir.exists()
            && let Err(e) = fs::create_dir_all(config_dir)
        {
            eprintln!("Warning: Could not create config directory: {}", e);
            return Config::default();
        }

        if !config_path.exists()
            && let Err(e) = fs::write(config_path, default_config())
        {
            eprintln!("Warning: Could not create config file: {}", e);
            return Config::default();
        }

        match fs::read_to_string(config_path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Could not read config file: {}", e);
                Config::default()
            }
        }
    }

    /// Directory the log file goes to
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.logging.directory.clone().or_else(config_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_matches_defaults() {
        let config = Config::parse(default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
[general]
left_path = "/srv"
poll_interval_ms = 100
"#,
        )
        .unwrap();
        assert_eq!(config.general.left_path, Some(PathBuf::from("/srv")));
        assert_eq!(config.general.right_path, None);
        assert_eq!(config.general.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.general.status_history, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = Config::parse("[general]\nstatus_history = \"many\"\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_from_creates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let config = Config::load_from(&path);
        assert_eq!(config, Config::default());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[logging]"));
    }

    #[test]
    fn test_load_from_bad_file_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_configured_editor_wins() {
        let general = GeneralConfig {
            editor: "nano -w".to_string(),
            ..GeneralConfig::default()
        };
        assert_eq!(general.editor_command(), "nano -w");
    }
}
