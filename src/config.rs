use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not deserialize config: {0}")]
    Deserialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sqlite,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default = "default_source")]
    pub source: SourceKind,

    /// Read directly when `source` is `csv`, and the default input of `import`.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Rebuild the collection from the source this often. No refresh when unset.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,

    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

pub fn default_bind_address() -> String {
    "127.0.0.1:7878".to_string()
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("restaurants.db")
}

pub fn default_source() -> SourceKind {
    SourceKind::Sqlite
}

pub fn default_csv_path() -> PathBuf {
    PathBuf::from("data/restaurants.csv")
}

pub fn default_allow_origin() -> String {
    "*".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_path: default_database_path(),
            source: default_source(),
            csv_path: default_csv_path(),
            refresh_interval_secs: None,
            allow_origin: default_allow_origin(),
        }
    }
}

impl Config {
    pub fn from_config(config: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(config)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_config(&text)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_config("{}").unwrap(), Config::default());
    }

    #[test]
    fn overrides() {
        let config = Config::from_config(
            r#"{"bind_address": "0.0.0.0:8000", "source": "csv", "csv_path": "hours.csv", "refresh_interval_secs": 600}"#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.source, SourceKind::Csv);
        assert_eq!(config.csv_path, PathBuf::from("hours.csv"));
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(600)));
        assert_eq!(config.database_path, default_database_path());
    }

    #[test]
    fn zero_interval_disables_refresh() {
        let config = Config::from_config(r#"{"refresh_interval_secs": 0}"#).unwrap();
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn rejects_unknown_source() {
        assert!(Config::from_config(r#"{"source": "postgres"}"#).is_err());
    }

    #[test]
    fn missing_file() {
        let result = Config::from_file(Path::new("no/such/config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
