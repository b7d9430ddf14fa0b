//! The analysis battery.
//!
//! Every analysis is a pure reduction of a [`Dataset`] into a
//! [`ChartDescription`] plus a short interpretation. [`Analysis`] names one
//! analysis together with its parameters, which is what the cache keys on.
//!
//! [`Analysis::compute`] propagates errors; [`Analysis::run`] is the boundary
//! used by the dashboard and never fails: errors and panics become a
//! placeholder chart with an explanatory interpretation.

mod correlation;
mod distribution;
mod grouping;
mod proportion;
mod ranking;
mod relationship;
mod trend;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::CacheKey;
use crate::catalog::Feature;
use crate::chart::ChartDescription;
use crate::error::{Result, TracklensError};
use crate::input::Dataset;

pub use distribution::HISTOGRAM_BINS;
pub use ranking::{TOP_ARTISTS, TOP_TRACKS};
pub use trend::release_year;

/// Default feature for [`Analysis::FeatureByGenre`].
pub const DEFAULT_GENRE_FEATURE: Feature = Feature::Danceability;

/// A chart and its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub chart: ChartDescription,
    pub interpretation: String,
    /// True when the chart stands in for data the dataset could not provide.
    #[serde(default)]
    pub degraded: bool,
}

impl AnalysisOutput {
    pub fn new(chart: ChartDescription, interpretation: impl Into<String>) -> Self {
        Self {
            chart,
            interpretation: interpretation.into(),
            degraded: false,
        }
    }

    /// Output for an analysis that ran but had to fall back to a placeholder.
    pub fn degraded(chart: ChartDescription, interpretation: impl Into<String>) -> Self {
        Self {
            degraded: true,
            ..Self::new(chart, interpretation)
        }
    }

    /// Placeholder explaining why `analysis` produced no chart.
    pub fn placeholder(analysis: &Analysis, reason: &str) -> Self {
        let title = format!("{} (unavailable)", analysis.title());
        let chart = ChartDescription::placeholder(title, analysis.height(), reason);
        Self::degraded(
            chart,
            format!(
                "This analysis could not be computed for the current dataset: {}.",
                reason
            ),
        )
    }

    /// The chart in its JSON transport format.
    pub fn chart_json(&self) -> Result<String> {
        self.chart.to_json()
    }
}

/// One analysis of the battery, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum Analysis {
    GenrePopularity,
    #[serde(rename = "genre_features")]
    FeatureByGenre {
        feature: Feature,
    },
    SalesCorrelations,
    #[serde(rename = "correlation_heatmap")]
    FeatureCorrelationHeatmap,
    DurationByGenre,
    TempoByGenre,
    EnergyByGenre,
    AcousticnessDistribution,
    ExplicitContent,
    EnergyVsDanceability,
    LoudnessVsEnergy,
    ValenceVsPopularity,
    PopularityOverTime,
    TopArtists,
    TopPopularTracks,
}

impl Analysis {
    /// Every analysis, with default parameters.
    pub const ALL: [Analysis; 15] = [
        Analysis::GenrePopularity,
        Analysis::FeatureByGenre {
            feature: DEFAULT_GENRE_FEATURE,
        },
        Analysis::SalesCorrelations,
        Analysis::FeatureCorrelationHeatmap,
        Analysis::DurationByGenre,
        Analysis::TempoByGenre,
        Analysis::EnergyByGenre,
        Analysis::AcousticnessDistribution,
        Analysis::ExplicitContent,
        Analysis::EnergyVsDanceability,
        Analysis::LoudnessVsEnergy,
        Analysis::ValenceVsPopularity,
        Analysis::PopularityOverTime,
        Analysis::TopArtists,
        Analysis::TopPopularTracks,
    ];

    /// Stable identifier, used in cache keys and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Analysis::GenrePopularity => "genre_popularity",
            Analysis::FeatureByGenre { .. } => "genre_features",
            Analysis::SalesCorrelations => "sales_correlations",
            Analysis::FeatureCorrelationHeatmap => "correlation_heatmap",
            Analysis::DurationByGenre => "duration_by_genre",
            Analysis::TempoByGenre => "tempo_by_genre",
            Analysis::EnergyByGenre => "energy_by_genre",
            Analysis::AcousticnessDistribution => "acousticness_distribution",
            Analysis::ExplicitContent => "explicit_content",
            Analysis::EnergyVsDanceability => "energy_vs_danceability",
            Analysis::LoudnessVsEnergy => "loudness_vs_energy",
            Analysis::ValenceVsPopularity => "valence_vs_popularity",
            Analysis::PopularityOverTime => "popularity_over_time",
            Analysis::TopArtists => "top_artists",
            Analysis::TopPopularTracks => "top_popular_tracks",
        }
    }

    /// Resolve a name, applying `feature` to the parameterized analysis.
    ///
    /// `feature` given to an analysis without parameters is an error rather
    /// than silently ignored.
    pub fn from_name(name: &str, feature: Option<Feature>) -> Result<Self> {
        let base = Analysis::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| {
                TracklensError::InvalidParameter(format!("unknown analysis '{}'", name))
            })?;

        match (base, feature) {
            (Analysis::FeatureByGenre { .. }, Some(feature)) => {
                if !feature.is_numeric() {
                    return Err(TracklensError::InvalidParameter(format!(
                        "'{}' is not a numeric feature",
                        feature
                    )));
                }
                Ok(Analysis::FeatureByGenre { feature })
            }
            (analysis, None) => Ok(analysis),
            (analysis, Some(_)) => Err(TracklensError::InvalidParameter(format!(
                "analysis '{}' takes no feature",
                analysis.name()
            ))),
        }
    }

    /// Parameters as `(name, canonical value)` pairs.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Analysis::FeatureByGenre { feature } => vec![("feature", feature.to_string())],
            _ => Vec::new(),
        }
    }

    /// Cache key for this analysis over `dataset`.
    pub fn cache_key(&self, dataset: &Dataset) -> CacheKey {
        CacheKey::new(self.name(), &self.params(), dataset.fingerprint())
    }

    /// Title used when the analysis has to fall back to a placeholder.
    fn title(&self) -> String {
        match self {
            Analysis::GenrePopularity => "Average popularity by genre".to_string(),
            Analysis::FeatureByGenre { feature } => format!("Average {} by genre", feature.label()),
            Analysis::SalesCorrelations => {
                "Correlation between musical features and popularity".to_string()
            }
            Analysis::FeatureCorrelationHeatmap => "Correlation between musical features".to_string(),
            Analysis::DurationByGenre => "Track duration distribution by genre".to_string(),
            Analysis::TempoByGenre => "Tempo distribution by genre".to_string(),
            Analysis::EnergyByGenre => "Energy distribution by genre".to_string(),
            Analysis::AcousticnessDistribution => "Acousticness distribution".to_string(),
            Analysis::ExplicitContent => "Share of explicit tracks by genre".to_string(),
            Analysis::EnergyVsDanceability => "Energy vs danceability by genre".to_string(),
            Analysis::LoudnessVsEnergy => "Loudness vs energy".to_string(),
            Analysis::ValenceVsPopularity => "Valence vs popularity".to_string(),
            Analysis::PopularityOverTime => "Popularity over time".to_string(),
            Analysis::TopArtists => format!("Top {} artists by average popularity", TOP_ARTISTS),
            Analysis::TopPopularTracks => format!("Top {} most popular tracks", TOP_TRACKS),
        }
    }

    /// Fixed chart height.
    fn height(&self) -> u32 {
        match self {
            Analysis::FeatureCorrelationHeatmap => 350,
            Analysis::EnergyByGenre
            | Analysis::AcousticnessDistribution
            | Analysis::EnergyVsDanceability
            | Analysis::LoudnessVsEnergy
            | Analysis::ValenceVsPopularity
            | Analysis::TopArtists
            | Analysis::TopPopularTracks => 400,
            _ => 300,
        }
    }

    /// Compute the analysis, propagating any error.
    pub fn compute(&self, dataset: &Dataset) -> Result<AnalysisOutput> {
        match *self {
            Analysis::GenrePopularity => ranking::genre_popularity(dataset),
            Analysis::FeatureByGenre { feature } => ranking::feature_by_genre(dataset, feature),
            Analysis::SalesCorrelations => correlation::sales_correlations(dataset),
            Analysis::FeatureCorrelationHeatmap => correlation::feature_correlation_heatmap(dataset),
            Analysis::DurationByGenre => distribution::duration_by_genre(dataset),
            Analysis::TempoByGenre => distribution::tempo_by_genre(dataset),
            Analysis::EnergyByGenre => distribution::energy_by_genre(dataset),
            Analysis::AcousticnessDistribution => distribution::acousticness_distribution(dataset),
            Analysis::ExplicitContent => proportion::explicit_content(dataset),
            Analysis::EnergyVsDanceability => relationship::energy_vs_danceability(dataset),
            Analysis::LoudnessVsEnergy => relationship::loudness_vs_energy(dataset),
            Analysis::ValenceVsPopularity => relationship::valence_vs_popularity(dataset),
            Analysis::PopularityOverTime => trend::popularity_over_time(dataset),
            Analysis::TopArtists => ranking::top_artists(dataset),
            Analysis::TopPopularTracks => ranking::top_popular_tracks(dataset),
        }
    }

    /// Compute the analysis; failures become a placeholder output.
    pub fn run(&self, dataset: &Dataset) -> AnalysisOutput {
        match panic::catch_unwind(AssertUnwindSafe(|| self.compute(dataset))) {
            Ok(Ok(output)) => {
                if output.degraded {
                    warn!(analysis = self.name(), "analysis degraded");
                }
                output
            }
            Ok(Err(err)) => {
                warn!(analysis = self.name(), error = %err, "analysis failed, using placeholder");
                AnalysisOutput::placeholder(self, &err.to_string())
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(analysis = self.name(), reason = %reason, "analysis panicked, using placeholder");
                AnalysisOutput::placeholder(self, &format!("internal error: {}", reason))
            }
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for (name, value) in self.params() {
            write!(f, " {}={}", name, value)?;
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Dashboard sections in display order, keyed by section name.
pub fn dashboard_sections() -> Vec<(&'static str, Analysis)> {
    vec![
        ("genre_popularity", Analysis::GenrePopularity),
        (
            "danceability",
            Analysis::FeatureByGenre {
                feature: DEFAULT_GENRE_FEATURE,
            },
        ),
        ("sales_correlations", Analysis::SalesCorrelations),
        ("explicit", Analysis::ExplicitContent),
        ("duration", Analysis::DurationByGenre),
        ("heatmap", Analysis::FeatureCorrelationHeatmap),
        ("tempo", Analysis::TempoByGenre),
        ("energy_danceability", Analysis::EnergyVsDanceability),
        ("popularity_time", Analysis::PopularityOverTime),
        ("top_artists", Analysis::TopArtists),
        ("valence_popularity", Analysis::ValenceVsPopularity),
        ("top_popular_tracks", Analysis::TopPopularTracks),
        ("energy_by_genre", Analysis::EnergyByGenre),
        ("loudness_vs_energy", Analysis::LoudnessVsEnergy),
        ("acousticness_distribution", Analysis::AcousticnessDistribution),
    ]
}
