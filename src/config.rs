//! Trainer configuration: where the database lives, how many words a
//! practice batch holds and which interval schedule is used.
//!
//! Every field has a default, so a config file only needs the values it changes:
//! ```json
//! { "batch_size": 20, "schedule": { "steps_days": [1, 2, 4, 8], "retry_days": 1 } }
//! ```

use crate::models::practice::DEFAULT_BATCH_SIZE;
use crate::models::IntervalSchedule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "vocab.sqlite3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub batch_size: usize,
    pub schedule: IntervalSchedule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            schedule: IntervalSchedule::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.db_path, PathBuf::from("vocab.sqlite3"));
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.schedule.max_level(), 5);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"batch_size": 3, "schedule": {"steps_days": [1, 2, 4]}}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.schedule.interval_for(2), Duration::days(4));
    }

    #[test]
    fn test_load_rejects_invalid_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"schedule": {"steps_days": [1, 0]}}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_load_rejects_zero_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"batch_size": 0}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::InvalidBatchSize)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("does-not-exist.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
