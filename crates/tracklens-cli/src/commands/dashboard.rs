//! Dashboard command - render every section as JSON.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use tracklens::{DashboardView, TracklensConfig};

use super::CommandResult;

pub fn run(config: TracklensConfig, output: Option<PathBuf>, verbose: bool) -> CommandResult {
    let dashboard = super::open(config)?;
    let view = dashboard.render();

    let DashboardView::Ready { sections } = &view else {
        return Err("Dataset became unavailable".into());
    };
    let degraded: Vec<&str> = sections
        .iter()
        .filter(|s| s.output.degraded)
        .map(|s| s.name)
        .collect();

    let json = serde_json::to_string_pretty(&view)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!(
                "{} {} sections to {}",
                "Wrote".green().bold(),
                sections.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    if !degraded.is_empty() {
        eprintln!(
            "{} placeholders for: {}",
            "Warning:".yellow().bold(),
            degraded.join(", ")
        );
    }
    if verbose {
        let stats = dashboard.cache_stats();
        eprintln!(
            "cache: {} hit(s), {} miss(es)",
            stats.hits, stats.misses
        );
    }

    Ok(())
}
