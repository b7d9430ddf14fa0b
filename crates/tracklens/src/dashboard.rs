//! Dashboard orchestration: load-once dataset, memoized analyses, parallel render.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{dashboard_sections, Analysis, AnalysisOutput};
use crate::cache::{CacheStats, Clock, MemoizationCache};
use crate::catalog::SchemaReport;
use crate::config::TracklensConfig;
use crate::error::Result;
use crate::input::{Dataset, DatasetHandle, DatasetLoader};

/// One rendered dashboard panel.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Section name the presenter binds to.
    pub name: &'static str,
    pub analysis: Analysis,
    pub output: Arc<AnalysisOutput>,
}

/// What the presenter receives for a full render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Ready { sections: Vec<Section> },
    Unavailable { reason: String },
}

impl DashboardView {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardView::Ready { .. })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        match self {
            DashboardView::Ready { sections } => sections.iter().find(|s| s.name == name),
            DashboardView::Unavailable { .. } => None,
        }
    }
}

/// Owns the configuration, the dataset handle, its loader and the analysis cache.
///
/// # Example
///
/// ```no_run
/// use tracklens::{Dashboard, TracklensConfig};
///
/// let dashboard = Dashboard::new(TracklensConfig::default()).unwrap();
/// let view = dashboard.render();
/// println!("ready: {}", view.is_ready());
/// ```
pub struct Dashboard {
    config: TracklensConfig,
    loader: DatasetLoader,
    handle: DatasetHandle,
    cache: MemoizationCache<AnalysisOutput>,
    schema: OnceCell<SchemaReport>,
}

impl Dashboard {
    /// Build the loader and cache described by `config`. Nothing is loaded yet.
    pub fn new(config: TracklensConfig) -> Result<Self> {
        config.validate()?;
        let loader = DatasetLoader::from_config(&config.dataset, config.parser.clone())?;
        let cache = MemoizationCache::from_config(&config.cache)?;

        Ok(Self {
            config,
            loader,
            handle: DatasetHandle::new(),
            cache,
            schema: OnceCell::new(),
        })
    }

    /// Replace the loader (e.g. to use a different remote source).
    pub fn with_loader(mut self, loader: DatasetLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Use an already-loaded dataset instead of running the loader.
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.handle = DatasetHandle::preloaded(dataset);
        self
    }

    /// Replace the cache's time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.cache = self.cache.with_clock(clock);
        self
    }

    pub fn config(&self) -> &TracklensConfig {
        &self.config
    }

    /// The dataset, loading it on first access. `None` means unavailable.
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        let dataset = self.handle.get_or_load(&self.loader)?;
        self.report_for(&dataset);
        Some(dataset)
    }

    /// Catalog validation of the loaded dataset.
    pub fn schema_report(&self) -> Option<SchemaReport> {
        let dataset = self.dataset()?;
        Some(self.report_for(&dataset).clone())
    }

    fn report_for(&self, dataset: &Dataset) -> &SchemaReport {
        self.schema.get_or_init(|| {
            let report = SchemaReport::validate(dataset);
            if report.is_complete() {
                info!("Dataset carries every required column");
            } else {
                let missing: Vec<&str> = report
                    .missing_required
                    .iter()
                    .map(|f| f.column_name())
                    .collect();
                warn!(
                    "Dataset is missing required columns: {}; affected analyses will show placeholders",
                    missing.join(", ")
                );
            }
            report
        })
    }

    /// One memoized analysis. `None` when no dataset is available.
    pub fn run(&self, analysis: &Analysis) -> Option<Arc<AnalysisOutput>> {
        let dataset = self.dataset()?;
        let key = analysis.cache_key(&dataset);
        Some(self.cache.get_or_compute(&key, || analysis.run(&dataset)))
    }

    /// Every dashboard section, computed in parallel.
    pub fn render(&self) -> DashboardView {
        if self.dataset().is_none() {
            return DashboardView::Unavailable {
                reason: format!(
                    "dataset could not be loaded from '{}'",
                    self.loader.path().display()
                ),
            };
        }

        let sections: Option<Vec<Section>> = dashboard_sections()
            .into_par_iter()
            .map(|(name, analysis)| {
                self.run(&analysis).map(|output| Section {
                    name,
                    analysis,
                    output,
                })
            })
            .collect();

        match sections {
            Some(sections) => DashboardView::Ready { sections },
            None => DashboardView::Unavailable {
                reason: "dataset became unavailable during render".to_string(),
            },
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop expired cache entries now.
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }
}
