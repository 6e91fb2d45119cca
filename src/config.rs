//! Configuration: built-in defaults, an optional config file, and CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::scrapers::{Throttle, DEFAULT_ENCYCLOPEDIA_SEARCH_URL, DEFAULT_SOCIAL_BASE_URL};
use crate::services::DEFAULT_BATCH_SIZE;

/// Default roster filename.
pub const DEFAULT_ROSTER_FILENAME: &str = "univ_data.csv";

/// Default vendor list filename.
pub const DEFAULT_VENDORS_FILENAME: &str = "vendors.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        format: &'static str,
        path: String,
        message: String,
    },
}

/// Effective settings for a run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Roster CSV, read at start and overwritten after each unit of work.
    pub roster_path: PathBuf,
    /// Vendor list CSV.
    pub vendors_path: PathBuf,
    /// Rows enriched per run.
    pub batch_size: usize,
    /// User agent: None for the default browser string, "impersonate", or custom.
    pub user_agent: Option<String>,
    /// Timeout for page fetches, in seconds.
    pub request_timeout: u64,
    /// Timeout for vendor probes, in seconds.
    pub probe_timeout: u64,
    /// Lower bound of the delay after each social fetch, in milliseconds.
    pub social_delay_min_ms: u64,
    /// Upper bound of the delay after each social fetch, in milliseconds.
    pub social_delay_max_ms: u64,
    /// Base URL social handles are appended to.
    pub social_base_url: String,
    /// Encyclopedia search endpoint.
    pub encyclopedia_search_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_FILENAME),
            vendors_path: PathBuf::from(DEFAULT_VENDORS_FILENAME),
            batch_size: DEFAULT_BATCH_SIZE,
            user_agent: None,
            request_timeout: 30,
            probe_timeout: 3,
            social_delay_min_ms: 2000,
            social_delay_max_ms: 4000,
            social_base_url: DEFAULT_SOCIAL_BASE_URL.to_string(),
            encyclopedia_search_url: DEFAULT_ENCYCLOPEDIA_SEARCH_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout)
    }

    /// Delay applied after every social fetch.
    pub fn social_throttle(&self) -> Throttle {
        Throttle::new(
            Duration::from_millis(self.social_delay_min_ms),
            Duration::from_millis(self.social_delay_max_ms),
        )
    }
}

/// Configuration file structure. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_delay_min_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_delay_max_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encyclopedia_search_url: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise prefer discovers a `univscrape`
    /// config file in the standard locations; with none found the defaults
    /// are used.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        // Use prefer for file discovery, then parse with serde
        match prefer::load("univscrape").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path),
                None => Ok(Self::default()),
            },
            Err(_) => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file path.
    /// TOML, YAML and JSON are supported, chosen by file extension.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            format,
            path: path_str.clone(),
            message,
        };

        let mut config: Config = match ext {
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_err("YAML", e.to_string()))?
            }
            "json" => {
                serde_json::from_str(&contents).map_err(|e| parse_err("JSON", e.to_string()))?
            }
            _ => toml::from_str(&contents).map_err(|e| parse_err("TOML", e.to_string()))?,
        };

        debug!("Loaded config from {}", path_str);
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are joined onto `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        let base_dir = self.base_dir().unwrap_or_default();

        if let Some(ref roster) = self.roster {
            settings.roster_path = self.resolve_path(roster, &base_dir);
        }
        if let Some(ref vendors) = self.vendors {
            settings.vendors_path = self.resolve_path(vendors, &base_dir);
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(timeout) = self.probe_timeout {
            settings.probe_timeout = timeout;
        }
        if let Some(ms) = self.social_delay_min_ms {
            settings.social_delay_min_ms = ms;
        }
        if let Some(ms) = self.social_delay_max_ms {
            settings.social_delay_max_ms = ms;
        }
        if let Some(ref url) = self.social_base_url {
            settings.social_base_url = url.clone();
        }
        if let Some(ref url) = self.encyclopedia_search_url {
            settings.encyclopedia_search_url = url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_job_constants() {
        let settings = Settings::default();
        assert_eq!(settings.roster_path, PathBuf::from("univ_data.csv"));
        assert_eq!(settings.vendors_path, PathBuf::from("vendors.csv"));
        assert_eq!(settings.batch_size, 50);
        assert_eq!(settings.probe_timeout(), Duration::from_secs(3));
        assert_eq!(
            settings.social_throttle(),
            Throttle::new(Duration::from_secs(2), Duration::from_secs(4))
        );
    }

    #[tokio::test]
    async fn test_load_toml_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("univscrape.toml");
        std::fs::write(
            &path,
            "roster = \"data/univ.csv\"\nbatch_size = 10\nuser_agent = \"impersonate\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).await.unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);

        assert_eq!(settings.roster_path, dir.path().join("data/univ.csv"));
        assert_eq!(settings.vendors_path, PathBuf::from("vendors.csv"));
        assert_eq!(settings.batch_size, 10);
        assert_eq!(settings.user_agent.as_deref(), Some("impersonate"));
    }

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"probe_timeout": 5, "vendors": "/srv/vendors.csv"}"#).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.probe_timeout, 5);
        assert_eq!(settings.vendors_path, PathBuf::from("/srv/vendors.csv"));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "batch_size: [not, a, number]").unwrap();
        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "YAML", .. }));
    }

    #[tokio::test]
    async fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/univscrape.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
