//! Equal-width bucketed counts.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One histogram bucket, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split the observed range of `values` into `bins` equal-width buckets.
///
/// Returns an empty vector for empty input. When every value is equal a single
/// bucket of zero width holds them all.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let min = finite.iter().copied().min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let max = finite.iter().copied().max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let (Some(min), Some(max)) = (min, max) else {
        return Vec::new();
    };

    if bins == 0 || min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &finite {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}
