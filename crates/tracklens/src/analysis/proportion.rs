//! Explicit-content share per genre.

use indexmap::IndexMap;

use crate::catalog::Feature;
use crate::chart::{Axis, BarMode, ChartDescription, ChartKind, Series, SeriesStyle, Values};
use crate::error::Result;
use crate::input::Dataset;

use super::AnalysisOutput;

/// Explicit/clean counts for one genre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FlagCounts {
    pub explicit: usize,
    pub clean: usize,
}

impl FlagCounts {
    /// `(explicit, clean)` shares of the row; both zero when the row is empty.
    pub fn proportions(&self) -> (f64, f64) {
        let total = self.explicit + self.clean;
        if total == 0 {
            return (0.0, 0.0);
        }
        (
            self.explicit as f64 / total as f64,
            self.clean as f64 / total as f64,
        )
    }
}

/// Genre × explicit cross-tabulation, genres in first-seen order.
///
/// A genre whose rows all lack the flag still gets a (zero) row.
pub(crate) fn cross_tabulate(dataset: &Dataset) -> IndexMap<&str, FlagCounts> {
    let mut table: IndexMap<&str, FlagCounts> = IndexMap::new();
    for track in dataset.tracks() {
        let Some(genre) = track.genre.as_deref() else {
            continue;
        };
        let counts = table.entry(genre).or_default();
        match track.explicit {
            Some(true) => counts.explicit += 1,
            Some(false) => counts.clean += 1,
            None => {}
        }
    }
    table
}

pub(crate) fn explicit_content(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Genre, Feature::Explicit])?;

    let table = cross_tabulate(dataset);
    let genres: Vec<String> = table.keys().map(|g| g.to_string()).collect();
    let (explicit, clean): (Vec<f64>, Vec<f64>) =
        table.values().map(FlagCounts::proportions).unzip();

    let chart = ChartDescription::new(ChartKind::Bar, "Share of explicit tracks by genre", 300)
        .with_series(
            Series::new(Values::Labels(genres.clone()), Values::Numbers(explicit))
                .named("Explicit")
                .with_style(SeriesStyle {
                    color: Some("#FF6347".to_string()),
                    ..SeriesStyle::default()
                }),
        )
        .with_series(
            Series::new(Values::Labels(genres), Values::Numbers(clean))
                .named("Clean")
                .with_style(SeriesStyle {
                    color: Some("#B0BEC5".to_string()),
                    ..SeriesStyle::default()
                }),
        )
        .with_bar_mode(BarMode::Stack)
        .with_x_axis(Axis::untitled())
        .with_y_axis(Axis::titled("Proportion").with_tick_format(".2%"))
        .with_legend_title("Explicit");

    Ok(AnalysisOutput::new(
        chart,
        "This chart shows the share of tracks with explicit content in each genre. It helps \
         understand the target audience and content norms of each genre; genres with a high \
         share of explicit tracks may suit family-oriented campaigns less well.",
    ))
}
