//! Relationship analyses: scatter plots of two numeric columns.

use indexmap::IndexMap;

use crate::catalog::Feature;
use crate::chart::{Axis, ChartDescription, ChartKind, Series, SeriesStyle, Values};
use crate::error::Result;
use crate::input::Dataset;

use super::AnalysisOutput;

/// Scatter of `x` against `y`; with `color_by`, one series per category in first-seen order.
fn scatter(
    dataset: &Dataset,
    x: Feature,
    y: Feature,
    color_by: Option<Feature>,
    title: &str,
) -> Result<ChartDescription> {
    dataset.require(&[x, y])?;
    if let Some(category) = color_by {
        dataset.require(&[category])?;
    }

    let mut groups: IndexMap<Option<&str>, (Vec<f64>, Vec<f64>)> = IndexMap::new();
    for track in dataset.tracks() {
        let (Some(xv), Some(yv)) = (track.numeric(x), track.numeric(y)) else {
            continue;
        };
        let key = match color_by {
            Some(category) => match track.text(category) {
                Some(label) => Some(label),
                None => continue,
            },
            None => None,
        };
        let points = groups.entry(key).or_default();
        points.0.push(xv);
        points.1.push(yv);
    }

    let mut chart = ChartDescription::new(ChartKind::Scatter, title, 400)
        .with_x_axis(Axis::titled(x.label()))
        .with_y_axis(Axis::titled(y.label()));

    for (key, (xs, ys)) in groups {
        let mut series = Series::new(Values::Numbers(xs), Values::Numbers(ys));
        if let Some(label) = key {
            series = series.named(label).with_style(SeriesStyle {
                opacity: Some(0.6),
                ..SeriesStyle::default()
            });
        }
        chart = chart.with_series(series);
    }

    if let Some(category) = color_by {
        chart = chart.with_legend_title(category.label());
    }
    Ok(chart)
}

pub(crate) fn energy_vs_danceability(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = scatter(
        dataset,
        Feature::Energy,
        Feature::Danceability,
        Some(Feature::Genre),
        "Energy vs danceability by genre",
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This scatter plot shows the relationship between track energy and danceability, \
         colored by genre. It helps identify genres whose tracks are both energetic and \
         danceable, which is useful for playlists and audience targeting.",
    ))
}

pub(crate) fn loudness_vs_energy(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = scatter(
        dataset,
        Feature::Loudness,
        Feature::Energy,
        None,
        "Loudness vs energy",
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This scatter plot shows the relationship between track loudness and energy. A \
         positive trend would indicate that louder tracks tend to be more energetic.",
    ))
}

pub(crate) fn valence_vs_popularity(dataset: &Dataset) -> Result<AnalysisOutput> {
    let chart = scatter(
        dataset,
        Feature::Valence,
        Feature::Popularity,
        None,
        "Valence vs popularity",
    )?;

    Ok(AnalysisOutput::new(
        chart,
        "This scatter plot shows the relationship between track valence (positivity) and \
         popularity. An upward trend would suggest that more positive tracks are more \
         popular; a downward trend would suggest the opposite.",
    ))
}
