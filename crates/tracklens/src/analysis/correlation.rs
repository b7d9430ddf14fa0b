//! Correlation analyses over the numeric columns.

use std::cmp::Ordering;

use crate::catalog::Feature;
use crate::chart::{Axis, ChartDescription, ChartKind, ColorScale, Series, SeriesStyle, Values};
use crate::error::{Result, TracklensError};
use crate::input::Dataset;
use crate::stats::CorrelationMatrix;

use super::AnalysisOutput;

fn numeric_matrix(dataset: &Dataset) -> Result<CorrelationMatrix> {
    let matrix = CorrelationMatrix::for_dataset(dataset);
    if matrix.features.is_empty() {
        return Err(TracklensError::Computation(
            "dataset has no numeric columns to correlate".to_string(),
        ));
    }
    Ok(matrix)
}

pub(crate) fn sales_correlations(dataset: &Dataset) -> Result<AnalysisOutput> {
    dataset.require(&[Feature::Popularity])?;
    let matrix = numeric_matrix(dataset)?;

    let mut column = matrix.column(Feature::Popularity).ok_or_else(|| {
        TracklensError::MissingColumn {
            column: Feature::Popularity.column_name().to_string(),
        }
    })?;
    // Descending, undefined correlations last, ties in column order.
    column.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let labels: Vec<String> = column.iter().map(|(f, _)| f.column_name().to_string()).collect();
    let values: Vec<Option<f64>> = column.iter().map(|(_, r)| *r).collect();

    let chart = ChartDescription::new(
        ChartKind::Bar,
        "Correlation between musical features and popularity",
        300,
    )
    .with_series(Series::new(Values::Labels(labels), Values::Sparse(values)).with_style(
        SeriesStyle {
            color_scale: Some(ColorScale {
                name: "Viridis".to_string(),
                min: -1.0,
                max: 1.0,
            }),
            ..SeriesStyle::default()
        },
    ))
    .with_x_axis(Axis::untitled())
    .with_y_axis(Axis::titled("Correlation"))
    .with_legend(false);

    Ok(AnalysisOutput::new(
        chart,
        "This chart shows the correlation between each musical feature and track popularity. \
         Positive values mean higher values of the feature go with higher popularity; negative \
         values suggest the opposite. This helps understand which characteristics may \
         contribute to a track's success.",
    ))
}

pub(crate) fn feature_correlation_heatmap(dataset: &Dataset) -> Result<AnalysisOutput> {
    let matrix = numeric_matrix(dataset)?;
    let labels: Vec<String> = matrix
        .features
        .iter()
        .map(|f| f.column_name().to_string())
        .collect();

    let chart = ChartDescription::new(ChartKind::Heatmap, "Correlation between musical features", 350)
        .with_series(
            Series::new(Values::Labels(labels.clone()), Values::Labels(labels))
                .with_matrix(matrix.values)
                .with_style(SeriesStyle {
                    color_scale: Some(ColorScale::diverging_unit()),
                    ..SeriesStyle::default()
                }),
        )
        .with_x_axis(Axis::untitled())
        .with_y_axis(Axis::untitled().reversed());

    Ok(AnalysisOutput::new(
        chart,
        "This heatmap shows the correlations between musical features. Values close to 1 mean \
         two features tend to rise together; values close to -1 mean one falls as the other \
         rises. These relationships help when selecting features for predictive modelling or \
         when producing music with specific characteristics.",
    ))
}
