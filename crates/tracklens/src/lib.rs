//! Tracklens: memoized descriptive analytics for music-catalog datasets.
//!
//! Tracklens loads a table of tracks once, runs a fixed battery of analyses
//! over it, and produces renderer-independent chart descriptions with a short
//! interpretation for each. Results are memoized with a time-to-live.
//!
//! # Core Principles
//!
//! - **Load once**: the dataset is resolved at most once per process, from disk or a remote catalog
//! - **Pure analyses**: every analysis is a function of the dataset and its parameters
//! - **Never fail the dashboard**: missing columns degrade to placeholder charts
//!
//! # Example
//!
//! ```no_run
//! use tracklens::{Analysis, Dashboard, Feature, TracklensConfig};
//!
//! let dashboard = Dashboard::new(TracklensConfig::default()).unwrap();
//! let tempo = Analysis::FeatureByGenre { feature: Feature::Tempo };
//!
//! if let Some(output) = dashboard.run(&tempo) {
//!     println!("{}", output.interpretation);
//! }
//! ```

pub mod analysis;
pub mod cache;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod stats;

mod dashboard;

pub use crate::dashboard::{Dashboard, DashboardView, Section};
pub use analysis::{Analysis, AnalysisOutput};
pub use cache::{CacheKey, CacheStats, MemoizationCache};
pub use catalog::{Feature, FeatureKind, SchemaReport};
pub use chart::{ChartDescription, ChartKind};
pub use config::TracklensConfig;
pub use error::{Result, TracklensError};
pub use input::{Dataset, DatasetLoader, SourceMetadata, Track};
