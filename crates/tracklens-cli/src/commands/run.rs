//! Run command - compute one analysis and print it as JSON.

use colored::Colorize;
use tracklens::{Analysis, Feature, TracklensConfig};

use super::CommandResult;

pub fn run(
    config: TracklensConfig,
    name: &str,
    feature: Option<&str>,
    pretty: bool,
    verbose: bool,
) -> CommandResult {
    let feature = feature.map(str::parse::<Feature>).transpose()?;
    let analysis = Analysis::from_name(name, feature)?;

    let dashboard = super::open(config)?;
    let output = dashboard
        .run(&analysis)
        .ok_or("Dataset became unavailable")?;

    if output.degraded {
        eprintln!(
            "{} {} produced a placeholder",
            "Warning:".yellow().bold(),
            analysis
        );
    }

    let json = if pretty {
        serde_json::to_string_pretty(&*output)?
    } else {
        serde_json::to_string(&*output)?
    };
    println!("{}", json);

    if verbose {
        let stats = dashboard.cache_stats();
        eprintln!(
            "cache: {} hit(s), {} miss(es)",
            stats.hits, stats.misses
        );
    }

    Ok(())
}

/// Print every analysis name, marking the parameterized one.
pub fn list() -> CommandResult {
    for analysis in Analysis::ALL {
        match analysis {
            Analysis::FeatureByGenre { feature } => println!(
                "{}  {}",
                analysis.name().cyan(),
                format!("--feature <numeric column> (default {})", feature).dimmed()
            ),
            _ => println!("{}", analysis.name().cyan()),
        }
    }
    Ok(())
}
