//! Pearson correlation over pairwise-complete observations.

use serde::{Deserialize, Serialize};

use crate::catalog::Feature;
use crate::input::Dataset;

/// Pearson correlation of two aligned columns.
///
/// Rows where either side is missing are skipped. Returns `None` with fewer
/// than two complete pairs or when either column has zero variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise correlations between numeric features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub features: Vec<Feature>,
    /// Row-major; `None` where the correlation is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every numeric feature the dataset carries, in header order.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let features: Vec<Feature> = dataset.features().filter(|f| f.is_numeric()).collect();
        Self::compute(dataset, features)
    }

    pub fn compute(dataset: &Dataset, features: Vec<Feature>) -> Self {
        let columns: Vec<Vec<Option<f64>>> = features
            .iter()
            .map(|f| dataset.tracks().iter().map(|t| t.numeric(*f)).collect())
            .collect();

        let n = features.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self { features, values }
    }

    /// Correlations of every feature with `target`, in matrix order.
    pub fn column(&self, target: Feature) -> Option<Vec<(Feature, Option<f64>)>> {
        let index = self.features.iter().position(|f| *f == target)?;
        Some(
            self.features
                .iter()
                .zip(&self.values)
                .map(|(f, row)| (*f, row[index]))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_positive() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0, 8.0]);
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative() {
        let x = some(&[1.0, 2.0, 3.0]);
        let y = some(&[3.0, 2.0, 1.0]);
        assert!((pearson(&x, &y).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_skips_incomplete_pairs() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let y = vec![Some(1.0), Some(50.0), Some(2.0), Some(3.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_cases() {
        assert_eq!(pearson(&some(&[1.0]), &some(&[2.0])), None);
        assert_eq!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])), None);
    }
}
