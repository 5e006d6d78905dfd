//! Lunchpoll configuration.
//!
//! Loaded from `~/.lunchpoll/config.toml` unless a path is given. Every key is
//! optional; a missing default file means all defaults.
//!
//! ```toml
//! log = "info"
//! seed-demo-votes = true
//!
//! [window]
//! open = "08:30"
//! close = "10:30"
//!
//! [identity]
//! id = "u42"
//! name = "Dana"
//!
//! [summary]
//! model = "gemini-2.5-flash"
//! api-key-env = "API_KEY"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::civil::Time;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::window::{PollWindowConfig, WindowError};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Errors from locating, reading, or validating the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config file found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid poll window: {0}")]
    Window(#[from] WindowError),
}

/// Lunchpoll configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Log filter directive. `RUST_LOG` takes precedence.
    pub log: String,

    /// Start each session with the demo votes already cast.
    pub seed_demo_votes: bool,

    pub window: WindowSection,

    pub identity: IdentitySection,

    pub summary: SummarySection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: "info".to_string(),
            seed_demo_votes: true,
            window: WindowSection::default(),
            identity: IdentitySection::default(),
            summary: SummarySection::default(),
        }
    }
}

/// Poll window bounds as wall-clock times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub open: Time,
    pub close: Time,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            open: Time::constant(8, 30, 0, 0),
            close: Time::constant(10, 30, 0, 0),
        }
    }
}

/// Default voter, used when neither the command line nor the environment
/// name one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentitySection {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Settings for the AI turnout summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SummarySection {
    pub model: String,
    pub endpoint: String,

    /// Name of the environment variable holding the API key.
    /// The key itself never lives in the config file.
    pub api_key_env: String,
}

impl Default for SummarySection {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from `~/.lunchpoll/config.toml` when `None`.
    ///
    /// An explicit path must exist. The default path may be absent, in which
    /// case defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when an explicit path does not exist.
    /// Any other read, parse, or window failure maps to its own variant.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        // Validate eagerly so a bad window fails at startup, not on first vote.
        config.poll_window()?;
        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The config file path: `~/.lunchpoll/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".lunchpoll").join("config.toml"))
    }

    /// The configured poll window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Inverted`] when `open` is after `close`.
    pub fn poll_window(&self) -> Result<PollWindowConfig, WindowError> {
        PollWindowConfig::from_times(self.window.open, self.window.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.poll_window().unwrap(), PollWindowConfig::default());
        assert!(config.seed_demo_votes);
        assert_eq!(config.summary.model, "gemini-2.5-flash");
        assert_eq!(config.summary.api_key_env, "API_KEY");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let (_dir, path) = write_config("");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log, "info");
        assert!(config.identity.id.is_none());
    }

    #[test]
    fn loads_every_section() {
        let (_dir, path) = write_config(
            r#"
log = "lunchpoll=debug"
seed-demo-votes = false

[window]
open = "11:45"
close = "12:15"

[identity]
id = "u42"
name = "Dana"

[summary]
model = "gemini-pro"
api-key-env = "LUNCH_KEY"
"#,
        );
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.log, "lunchpoll=debug");
        assert!(!config.seed_demo_votes);
        let window = config.poll_window().unwrap();
        assert_eq!(window.open_at(), 705);
        assert_eq!(window.close_at(), 735);
        assert_eq!(config.identity.id.as_deref(), Some("u42"));
        assert_eq!(config.identity.name.as_deref(), Some("Dana"));
        assert_eq!(config.summary.model, "gemini-pro");
        assert_eq!(config.summary.api_key_env, "LUNCH_KEY");
        assert_eq!(config.summary.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn invalid_toml_fails() {
        let (_dir, path) = write_config("seed-demo-votes = \"maybe\"");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn inverted_window_fails() {
        let (_dir, path) = write_config("[window]\nopen = \"12:00\"\nclose = \"11:00\"\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Window(WindowError::Inverted { .. })
        ));
    }
}
