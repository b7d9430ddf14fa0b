//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tracklens: memoized analytics for music-catalog datasets
#[derive(Parser)]
#[command(name = "tracklens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Dataset path, overriding the configuration
    #[arg(short, long, global = true, env = "TRACKLENS_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Make sure the dataset is present locally, downloading it if needed
    Fetch,

    /// Check the dataset's columns against the feature catalog
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one analysis and print its chart and interpretation as JSON
    Run {
        /// Analysis name (e.g. genre_popularity, genre_features, top_artists)
        #[arg(value_name = "ANALYSIS")]
        analysis: String,

        /// Feature for genre_features (e.g. tempo, energy)
        #[arg(short, long)]
        feature: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render every dashboard section as JSON
    Dashboard {
        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available analyses
    List,
}
