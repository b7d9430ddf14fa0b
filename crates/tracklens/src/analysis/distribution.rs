//! Distribution analyses: per-genre box plots and a whole-dataset histogram.

use crate::catalog::Feature;
use crate::chart::{Axis, ChartDescription, ChartKind, Series, Values};
use crate::error::{Result, TracklensError};
use crate::input::Dataset;
use crate::stats::{histogram, median, BoxSummary};

use super::grouping::{group_values, rank_groups};
use super::AnalysisOutput;

pub const HISTOGRAM_BINS: usize = 20;

/// Order of the genre boxes along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenreOrder {
    MedianDescending,
    FirstSeen,
}

/// One box per genre for `feature`.
fn genre_boxes(
    dataset: &Dataset,
    feature: Feature,
    order: GenreOrder,
    title: &str,
    height: u32,
) -> Result<ChartDescription> {
    dataset.require(&[Feature::Genre, feature])?;

    let groups = group_values(dataset, Feature::Genre, feature);
    let genres: Vec<String> = match order {
        GenreOrder::MedianDescending => rank_groups(&groups, median)
            .into_iter()
            .map(|(genre, _)| genre)
            .collect(),
        GenreOrder::FirstSeen => groups.keys().map(|g| g.to_string()).collect(),
    };

    let mut chart = ChartDescription::new(ChartKind::Box, title, height)
        .with_x_axis(Axis::untitled())
        .with_y_axis(Axis::titled(feature.label()))
        .with_legend(false);

    for genre in &genres {
        let summary = groups
            .get(genre.as_str())
            .and_then(|values| BoxSummary::from_values(values));
        if let Some(summary) = summary {
            chart = chart.with_series(
                Series::new(Values::labels([genre.as_str()]), Values::default())
                    .named(genre.as_str())
                    .with_summary(summary),
            );
        }
    }

    Ok(chart.with_category_order(genres))
}

pub(crate) fn duration_by_genre(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = genre_boxes(
        dataset,
        Feature::DurationMs,
        GenreOrder::MedianDescending,
        "Track duration distribution by genre",
        300,
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This box plot shows the distribution of track durations for each genre. It helps \
         identify genres with longer or shorter tracks, which matters for playlist building, \
         radio programming, and understanding listener preferences.",
    ))
}

pub(crate) fn tempo_by_genre(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = genre_boxes(
        dataset,
        Feature::Tempo,
        GenreOrder::MedianDescending,
        "Tempo distribution by genre",
        300,
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This box plot shows the distribution of tempo (BPM) for each genre. It helps \
         identify genres with faster or slower tempos, which is useful for playlist building \
         and understanding listener preferences.",
    ))
}

pub(crate) fn energy_by_genre(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = genre_boxes(
        dataset,
        Feature::Energy,
        GenreOrder::FirstSeen,
        "Energy distribution by genre",
        400,
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This box plot shows the distribution of track energy by genre. It helps understand \
         which genres tend to have more energetic tracks.",
    ))
}

pub(crate) fn acousticness_distribution(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Acousticness])?;

    let values: Vec<f64> = dataset
        .tracks()
        .iter()
        .filter_map(|t| t.acousticness)
        .collect();
    if values.is_empty() {
        return Err(TracklensError::Computation(
            "no acousticness values to bucket".to_string(),
        ));
    }

    let bins = histogram(&values, HISTOGRAM_BINS);
    let chart = ChartDescription::new(ChartKind::Histogram, "Acousticness distribution", 400)
        .with_series(
            Series::new(
                Values::numbers(bins.iter().map(|b| b.start)),
                Values::numbers(bins.iter().map(|b| b.count as f64)),
            )
            .with_bins(bins),
        )
        .with_x_axis(Axis::titled("Acousticness"))
        .with_y_axis(Axis::titled("Number of tracks"));

    Ok(AnalysisOutput::new(
        chart,
        "This chart shows the distribution of track acousticness. It helps understand how \
         many tracks have a given level of acousticness.",
    ))
}
