//! Configuration: dataset location, remote source, cache policy, parser options.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TracklensError};
use crate::input::{ParserConfig, DEFAULT_REMOTE_ID};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TracklensConfig {
    pub dataset: DatasetConfig,
    pub cache: CacheConfig,
    pub parser: ParserConfig,
}

impl TracklensConfig {
    /// Read a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TracklensError::io(path, e))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: TracklensConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the cache or loader unusable.
    pub fn validate(&self) -> Result<()> {
        if self.cache.ttl_secs == 0 {
            return Err(TracklensError::Config("cache.ttl_secs must be positive".to_string()));
        }
        if self.cache.backend == CacheBackendKind::Lru && self.cache.capacity == 0 {
            return Err(TracklensError::Config(
                "cache.capacity must be positive for the lru backend".to_string(),
            ));
        }
        if self.dataset.fetch_timeout_secs == 0 {
            return Err(TracklensError::Config(
                "dataset.fetch_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Override the dataset path.
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset.path = path.into();
        self
    }
}

/// Where the dataset lives and where to fetch it from when it does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Local CSV path.
    pub path: PathBuf,
    /// Remote catalog identifier.
    pub remote_id: String,
    /// File inside the remote catalog.
    pub remote_file: String,
    /// Remote revision (branch or tag).
    pub revision: String,
    /// Download timeout.
    pub fetch_timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/spotify_tracks_dataset.csv"),
            remote_id: DEFAULT_REMOTE_ID.to_string(),
            remote_file: "dataset.csv".to_string(),
            revision: "main".to_string(),
            fetch_timeout_secs: 120,
        }
    }
}

/// Storage used by the memoization cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackendKind {
    /// Unbounded map.
    #[default]
    Memory,
    /// Bounded, least-recently-used eviction.
    Lru,
}

/// Memoization cache policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry time-to-live.
    pub ttl_secs: u64,
    pub backend: CacheBackendKind,
    /// Maximum entries for the LRU backend.
    pub capacity: usize,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            backend: CacheBackendKind::Memory,
            capacity: 64,
        }
    }
}
