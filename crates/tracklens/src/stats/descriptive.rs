//! Means, quantiles and box-plot summaries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(values);
    if sorted.is_empty() {
        None
    } else {
        Some(quantile_sorted(&sorted, 0.5))
    }
}

/// Quantile `p` in [0, 1] of an ascending slice, linearly interpolated between ranks.
///
/// Panics on an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * weight
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Five-number summary plus Tukey fences, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_fence: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_fence: f64,
    /// Values beyond the fences, ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    const WHISKER: f64 = 1.5;

    /// Summarize `values`; `None` when there is nothing to summarize.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_limit = q1 - Self::WHISKER * iqr;
        let high_limit = q3 + Self::WHISKER * iqr;

        let lower_fence = sorted.iter().copied().find(|v| *v >= low_limit).unwrap_or(min);
        let upper_fence = sorted.iter().rev().copied().find(|v| *v <= high_limit).unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_limit || *v > high_limit)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            lower_fence,
            upper_fence,
            outliers,
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[80.0, 60.0]), Some(70.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(quantile_sorted(&sorted, 0.25), 2.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 5.0);
        assert_eq!(quantile_sorted(&[1.0, 2.0], 0.5), 1.5);
    }

    #[test]
    fn test_box_summary_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = BoxSummary::from_values(&values).unwrap();

        assert_eq!(summary.count, 6);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.upper_fence, 5.0);
        assert_eq!(summary.lower_fence, 1.0);
    }

    #[test]
    fn test_box_summary_single_value() {
        let summary = BoxSummary::from_values(&[7.0]).unwrap();
        assert_eq!(summary.q1, 7.0);
        assert_eq!(summary.q3, 7.0);
        assert_eq!(summary.iqr(), 0.0);
        assert!(summary.outliers.is_empty());
        assert!(BoxSummary::from_values(&[]).is_none());
    }
}
