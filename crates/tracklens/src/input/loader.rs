//! Dataset acquisition: local file first, remote catalog as fallback.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::config::DatasetConfig;
use crate::error::{Result, TracklensError};

use super::parser::{Parser, ParserConfig};
use super::remote::{HuggingFaceSource, RemoteSource};
use super::source::{Dataset, SourceMetadata};

/// Resolves the catalog dataset from disk or, when absent, from a remote source.
///
/// The loader is the only component that writes to the filesystem: a remotely
/// fetched dataset is persisted to the configured path so later processes load
/// it locally.
pub struct DatasetLoader {
    path: PathBuf,
    parser: Parser,
    remote: Option<Box<dyn RemoteSource>>,
}

impl DatasetLoader {
    /// Loader for a local path with no remote fallback.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            parser: Parser::new(),
            remote: None,
        }
    }

    /// Loader configured with the Hugging Face source named in `config`.
    pub fn from_config(config: &DatasetConfig, parser: ParserConfig) -> Result<Self> {
        let remote = HuggingFaceSource::new(
            config.remote_id.clone(),
            config.remote_file.clone(),
            config.revision.clone(),
            Duration::from_secs(config.fetch_timeout_secs),
        )?;

        Ok(Self::new(config.path.clone())
            .with_parser(parser)
            .with_remote(remote))
    }

    pub fn with_parser(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    pub fn with_remote(mut self, source: impl RemoteSource + 'static) -> Self {
        self.remote = Some(Box::new(source));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, propagating the first failure.
    pub fn try_load(&self) -> Result<Dataset> {
        if self.path.exists() {
            tracing::info!("Loading dataset from {}", self.path.display());
            return self.parser.parse_file(&self.path);
        }

        let remote = self.remote.as_ref().ok_or_else(|| {
            TracklensError::DatasetUnavailable(format!(
                "'{}' does not exist and no remote source is configured",
                self.path.display()
            ))
        })?;

        tracing::info!(
            "Dataset not found at {}, fetching from '{}'",
            self.path.display(),
            remote.name()
        );
        let bytes = remote.fetch()?;
        let dataset = self.parser.parse_bytes(&bytes)?;

        let persisted = match persist(&self.path, &bytes) {
            Ok(()) => {
                tracing::info!("Dataset saved to {}", self.path.display());
                Some(self.path.clone())
            }
            Err(e) => {
                tracing::warn!("Could not persist dataset: {}", e);
                None
            }
        };

        let source = SourceMetadata::new(
            persisted,
            remote.name(),
            dataset.fingerprint().to_string(),
            bytes.len() as u64,
            dataset.len(),
            dataset.features().count(),
        );
        Ok(dataset.with_source(source))
    }

    /// Load the dataset, returning `None` (and logging why) on any failure.
    pub fn load(&self) -> Option<Dataset> {
        match self.try_load() {
            Ok(dataset) => {
                tracing::info!(
                    "Loaded {} tracks ({} columns, {})",
                    dataset.len(),
                    dataset.features().count(),
                    dataset.fingerprint()
                );
                Some(dataset)
            }
            Err(e) => {
                tracing::error!("Dataset unavailable: {}", e);
                None
            }
        }
    }
}

/// Write `bytes` to `path` through a sibling temp file, so `path` holds either
/// the previous content or the complete new content.
fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                TracklensError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let tmp = temp_path(path);
    let written = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(TracklensError::Persistence(format!(
            "Failed to write '{}': {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("dataset"));
    name.push(".partial");
    path.with_file_name(name)
}

/// Load-once handle to the shared dataset.
///
/// The first caller runs the loader; concurrent callers block until it
/// finishes and then share the outcome, including a failed load.
#[derive(Default)]
pub struct DatasetHandle {
    cell: OnceCell<Option<Arc<Dataset>>>,
}

impl DatasetHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that already holds `dataset`.
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            cell: OnceCell::with_value(Some(Arc::new(dataset))),
        }
    }

    /// Return the dataset, running `loader` if this is the first access.
    pub fn get_or_load(&self, loader: &DatasetLoader) -> Option<Arc<Dataset>> {
        self.cell.get_or_init(|| loader.load().map(Arc::new)).clone()
    }

    /// The dataset if a load has already happened and succeeded.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned().flatten()
    }

    /// Whether a load has been attempted.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
