//! CLI command implementations.

pub mod dashboard;
pub mod fetch;
pub mod run;
pub mod schema;

use std::path::Path;

use tracklens::{Dashboard, TracklensConfig};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read the configuration file if given, then apply the dataset path override.
pub fn load_config(
    config: Option<&Path>,
    data: Option<&Path>,
) -> Result<TracklensConfig, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => TracklensConfig::from_file(path)?,
        None => TracklensConfig::default(),
    };
    if let Some(data) = data {
        config = config.with_dataset_path(data);
    }
    Ok(config)
}

/// Build the dashboard, failing with a readable message when no dataset can be loaded.
pub(crate) fn open(config: TracklensConfig) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let path = config.dataset.path.clone();
    let dashboard = Dashboard::new(config)?;
    if dashboard.dataset().is_none() {
        return Err(format!(
            "Dataset unavailable at {} (run with -v for details)",
            path.display()
        )
        .into());
    }
    Ok(dashboard)
}
