//! Fetch command - make sure the dataset is available locally.

use colored::Colorize;
use tracklens::TracklensConfig;

use super::CommandResult;

pub fn run(config: TracklensConfig, verbose: bool) -> CommandResult {
    let dashboard = super::open(config)?;
    let dataset = dashboard
        .dataset()
        .ok_or("Dataset became unavailable")?;
    let source = dataset.source();

    println!("{} {}", "Dataset ready:".green().bold(), source.file.white());
    println!("  Tracks:      {}", dataset.len().to_string().white().bold());
    println!("  Columns:     {}", source.column_count);
    println!("  Origin:      {}", source.origin);
    println!("  Fingerprint: {}", dataset.fingerprint().dimmed());
    match &source.path {
        Some(path) => println!("  Path:        {}", path.display()),
        None => println!("  Path:        {}", "not persisted".yellow()),
    }

    if verbose {
        println!("  Size:        {} bytes", source.size_bytes);
        println!("  Loaded at:   {}", source.loaded_at.to_rfc3339());
    }

    Ok(())
}
