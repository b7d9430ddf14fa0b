//! Schema command - compare the dataset's columns with the feature catalog.

use colored::Colorize;
use tracklens::{Feature, TracklensConfig};

use super::CommandResult;

fn names(features: &[Feature]) -> String {
    features
        .iter()
        .map(|f| f.column_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(config: TracklensConfig, json_output: bool, verbose: bool) -> CommandResult {
    let dashboard = super::open(config)?;
    let report = dashboard
        .schema_report()
        .ok_or("Dataset became unavailable")?;

    if json_output {
        let status = serde_json::json!({
            "complete": report.is_complete(),
            "present": report.present,
            "missing_required": report.missing_required,
            "missing_optional": report.missing_optional,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if report.is_complete() {
        println!("{}", "All required columns present".green().bold());
    } else {
        println!("{}", "Missing required columns".red().bold());
        println!("  {}", names(&report.missing_required).red());
        println!(
            "  {}",
            "Analyses that need these columns will show placeholders.".dimmed()
        );
    }
    println!();

    println!("{} ({})", "Present:".yellow().bold(), report.present.len());
    if verbose {
        for feature in &report.present {
            println!(
                "  {:<18} {:?}",
                feature.column_name().white(),
                feature.kind()
            );
        }
    } else {
        println!("  {}", names(&report.present));
    }

    if !report.missing_optional.is_empty() {
        println!();
        println!("{}", "Optional, not present:".yellow().bold());
        println!("  {}", names(&report.missing_optional).dimmed());
    }

    Ok(())
}
