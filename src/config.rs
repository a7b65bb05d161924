//! Configuration data model.
//!
//! Loaded from `<config_dir>/folio/config.yaml`. Every field has a default so
//! the application works without a config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_NOTIFICATION_SECS, DEFAULT_SEQUENCE_TIMEOUT_MS, DEFAULT_SUBMIT_DELAY_MS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Preferred color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Follow the terminal's reported background
    #[default]
    System,
    Dark,
    Light,
}

impl ColorScheme {
    /// Resolve to a dark-mode preference, `None` when nothing is known
    pub fn prefers_dark(&self) -> Option<bool> {
        match self {
            ColorScheme::Dark => Some(true),
            ColorScheme::Light => Some(false),
            ColorScheme::System => {
                terminal_prefers_dark(std::env::var("COLORFGBG").ok().as_deref())
            }
        }
    }
}

/// Interpret a `COLORFGBG` value (`"fg;bg"` or `"fg;default;bg"`).
///
/// Background indices 0-6 and 8 are the dark half of the 16-color palette.
pub fn terminal_prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let bg = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default = "default_sequence_timeout_ms")]
    pub sequence_timeout_ms: u64,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default)]
    pub submit: SubmitConfig,
    /// Route path shown at startup, e.g. `/about`
    #[serde(default)]
    pub start_route: Option<String>,
    /// YAML file replacing the built-in portfolio content
    #[serde(default)]
    pub content_file: Option<PathBuf>,
    /// Overrides where `storage.json` lives
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            sequence_timeout_ms: default_sequence_timeout_ms(),
            notification_secs: default_notification_secs(),
            submit: SubmitConfig::default(),
            start_route: None,
            content_file: None,
            storage_dir: None,
        }
    }
}

impl AppConfig {
    pub fn sequence_timeout(&self) -> Duration {
        Duration::from_millis(self.sequence_timeout_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Contact form submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    #[serde(default = "default_submit_delay_ms")]
    pub delay_ms: u64,
    /// Make every submission fail, for exercising the error path
    #[serde(default)]
    pub simulate_failure: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_submit_delay_ms(),
            simulate_failure: false,
        }
    }
}

impl SubmitConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn default_sequence_timeout_ms() -> u64 {
    DEFAULT_SEQUENCE_TIMEOUT_MS
}
fn default_notification_secs() -> u64 {
    DEFAULT_NOTIFICATION_SECS
}
fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY_MS
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
        .join("config.yaml")
}

/// Load the config from the default location
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config at `path`; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.color_scheme, ColorScheme::System);
        assert_eq!(config.sequence_timeout(), Duration::from_millis(1000));
        assert_eq!(config.notification_duration(), Duration::from_secs(5));
        assert_eq!(config.submit.delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "color_scheme: dark\nsubmit:\n  simulate_failure: true\nstart_route: /projects\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.color_scheme, ColorScheme::Dark);
        assert!(config.submit.simulate_failure);
        assert_eq!(config.submit.delay_ms, 1000);
        assert_eq!(config.start_route.as_deref(), Some("/projects"));
        assert_eq!(config.sequence_timeout_ms, 1000);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "color_scheme: [purple").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(terminal_prefers_dark(Some("15;0")), Some(true));
        assert_eq!(terminal_prefers_dark(Some("0;15")), Some(false));
        assert_eq!(terminal_prefers_dark(Some("15;default;8")), Some(true));
        assert_eq!(terminal_prefers_dark(Some("garbage")), None);
        assert_eq!(terminal_prefers_dark(None), None);
    }

    #[test]
    fn test_explicit_scheme_overrides_terminal() {
        assert_eq!(ColorScheme::Dark.prefers_dark(), Some(true));
        assert_eq!(ColorScheme::Light.prefers_dark(), Some(false));
    }
}
