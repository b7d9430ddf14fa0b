//! Popularity over release years.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::Feature;
use crate::chart::{Axis, ChartDescription, ChartKind, Series, Values};
use crate::error::Result;
use crate::input::Dataset;
use crate::stats::mean;

use super::AnalysisOutput;

// Year-first dates (YYYY, YYYY-MM, YYYY-MM-DD, RFC 3339) and day-first dates ending in a year.
static LEADING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:[-/]\d{1,2}){0,2}(?:[T ].*)?$").unwrap());
static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/](\d{4})$").unwrap());

const TITLE: &str = "Popularity over time";
const UNAVAILABLE_TITLE: &str = "Popularity over time (data unavailable)";

/// Release year of a date cell, if it has a recognizable shape.
pub fn release_year(value: &str) -> Option<i32> {
    let value = value.trim();
    let captures = LEADING_YEAR
        .captures(value)
        .or_else(|| TRAILING_YEAR.captures(value))?;
    captures.get(1)?.as_str().parse().ok()
}

/// Mean popularity per release year, ascending by year.
pub(crate) fn popularity_by_year(dataset: &Dataset) -> BTreeMap<i32, f64> {
    let mut years: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for track in dataset.tracks() {
        let Some(popularity) = track.popularity else {
            continue;
        };
        let Some(year) = track.release_date.as_deref().and_then(release_year) else {
            continue;
        };
        years.entry(year).or_default().push(popularity);
    }
    years
        .into_iter()
        .filter_map(|(year, values)| mean(&values).map(|m| (year, m)))
        .collect()
}

fn unavailable(notice: &str) -> AnalysisOutput {
    let chart = ChartDescription::placeholder(UNAVAILABLE_TITLE, 300, notice)
        .with_x_axis(Axis::titled("Release year"))
        .with_y_axis(Axis::titled("Average popularity"));
    AnalysisOutput::degraded(
        chart,
        "This chart would show how track popularity changes over the years. The dataset \
         has no usable release dates, so the trend cannot be drawn. Adding a release_date \
         column would enable this analysis.",
    )
}

pub(crate) fn popularity_over_time(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Popularity])?;
    if !dataset.has(Feature::ReleaseDate) {
        return Ok(unavailable("The dataset has no release_date column"));
    }

    let by_year = popularity_by_year(dataset);
    if by_year.is_empty() {
        return Ok(unavailable("No parseable release dates"));
    }

    let chart = ChartDescription::new(ChartKind::Line, TITLE, 300)
        .with_series(Series::new(
            Values::numbers(by_year.keys().map(|y| *y as f64)),
            Values::numbers(by_year.values().copied()),
        ))
        .with_x_axis(Axis::titled("Release year"))
        .with_y_axis(Axis::titled("Average popularity"))
        .with_legend(false);

    Ok(AnalysisOutput::new(
        chart,
        "This chart shows how average track popularity changes with release year. It helps \
         spot trends, such as whether newer releases are more popular than older ones.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    #[test]
    fn test_release_year_shapes() {
        assert_eq!(release_year("2019-06-21"), Some(2019));
        assert_eq!(release_year("2019-06"), Some(2019));
        assert_eq!(release_year("1987"), Some(1987));
        assert_eq!(release_year("2021-03-04T10:00:00Z"), Some(2021));
        assert_eq!(release_year("21/06/2019"), Some(2019));
        assert_eq!(release_year("unknown"), None);
        assert_eq!(release_year("19"), None);
    }

    #[test]
    fn test_mean_per_year_ascending() {
        let data = b"popularity,release_date\n80,2020-01-01\n40,2018\n60,2020-05\n10,\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        let output = popularity_over_time(&dataset).unwrap();

        assert!(!output.degraded);
        let series = &output.chart.series[0];
        assert_eq!(series.x, Values::Numbers(vec![2018.0, 2020.0]));
        assert_eq!(series.y, Values::Numbers(vec![40.0, 70.0]));
        assert_eq!(output.chart.kind, ChartKind::Line);
    }

    #[test]
    fn test_missing_release_date_degrades() {
        let data = b"track_genre,popularity\npop,50\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        let output = popularity_over_time(&dataset).unwrap();

        assert!(output.degraded);
        assert!(output.chart.is_placeholder());
        assert_eq!(output.chart.layout.title.text, UNAVAILABLE_TITLE);
        assert_eq!(output.chart.layout.height, 300);
        assert_eq!(output.chart.layout.y_axis.title, "Average popularity");
        assert!(!output.interpretation.is_empty());
    }

    #[test]
    fn test_unparseable_dates_degrade() {
        let data = b"popularity,release_date\n50,someday\n";
        let dataset = Parser::new().parse_bytes(data).unwrap();
        let output = popularity_over_time(&dataset).unwrap();
        assert!(output.degraded);
    }
}
