//! Tracklens CLI - memoized analytics for music-catalog datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: bool) {
    let default = if verbose { "tracklens=debug" } else { "tracklens=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = commands::load_config(cli.config.as_deref(), cli.data.as_deref()).and_then(
        |config| match cli.command {
            Commands::Fetch => commands::fetch::run(config, cli.verbose),
            Commands::Schema { json } => commands::schema::run(config, json, cli.verbose),
            Commands::Run {
                analysis,
                feature,
                pretty,
            } => commands::run::run(config, &analysis, feature.as_deref(), pretty, cli.verbose),
            Commands::Dashboard { output } => {
                commands::dashboard::run(config, output, cli.verbose)
            }
            Commands::List => commands::run::list(),
        },
    );

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
