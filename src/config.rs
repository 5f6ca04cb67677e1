//! Dashboard configuration.
//!
//! Read from an optional `housing-explorer.json` in the working directory.
//! Every field has a default, so the file may list only what it changes.
//! `HOUSING_DATA` overrides `data_path`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::synthetic::{DEFAULT_SAMPLES, DEFAULT_SEED};

pub const CONFIG_FILE: &str = "housing-explorer.json";
pub const DATA_PATH_ENV: &str = "HOUSING_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset read at startup.
    pub data_path: PathBuf,
    /// Seed of the fallback sample.
    pub seed: u64,
    /// Row count of the fallback sample.
    pub sample_size: usize,
    /// Price slider step, USD.
    pub price_step: f64,
    pub histogram_bins: usize,
    pub sample_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("housing.csv"),
            seed: DEFAULT_SEED,
            sample_size: DEFAULT_SAMPLES,
            price_step: 10_000.0,
            histogram_bins: 30,
            sample_rows: 10,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        let config: Self =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the working directory and apply the environment override.
    /// Errors are logged and replaced by the defaults.
    pub fn load() -> Self {
        let mut config = Self::from_file(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
            log::warn!("Ignoring {CONFIG_FILE}: {e:#}");
            Self::default()
        });
        config.apply_env(std::env::var_os(DATA_PATH_ENV).map(PathBuf::from));
        log::debug!("config: {config:?}");
        config
    }

    fn apply_env(&mut self, data_path: Option<PathBuf>) {
        if let Some(path) = data_path {
            self.data_path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.price_step.is_finite() && self.price_step > 0.0,
            "price_step must be positive, got {}",
            self.price_step
        );
        anyhow::ensure!(self.histogram_bins > 0, "histogram_bins must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("housing.csv"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.sample_size, 1000);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_path": "data/ca.csv", "sample_rows": 25 }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/ca.csv"));
        assert_eq!(config.sample_rows, 25);
        assert_eq!(config.histogram_bins, 30);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "price_step": 0 }"#).unwrap();
        assert!(DashboardConfig::from_file(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        let err = DashboardConfig::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }

    #[test]
    fn test_env_override() {
        let mut config = DashboardConfig::default();
        config.apply_env(None);
        assert_eq!(config.data_path, PathBuf::from("housing.csv"));
        config.apply_env(Some(PathBuf::from("/tmp/other.parquet")));
        assert_eq!(config.data_path, PathBuf::from("/tmp/other.parquet"));
    }
}
