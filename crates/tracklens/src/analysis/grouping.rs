//! Group-by and ranking helpers.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::catalog::Feature;
use crate::input::Dataset;

/// Values of `value` grouped by the `key` column, groups in first-seen order.
///
/// Rows missing either the key or the value are left out.
pub(crate) fn group_values<'a>(
    dataset: &'a Dataset,
    key: Feature,
    value: Feature,
) -> IndexMap<&'a str, Vec<f64>> {
    let mut groups: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for track in dataset.tracks() {
        if let (Some(k), Some(v)) = (track.text(key), track.numeric(value)) {
            groups.entry(k).or_default().push(v);
        }
    }
    groups
}

/// Reduce every group and sort descending; ties keep first-seen order.
///
/// Groups whose reduction is undefined are dropped.
pub(crate) fn rank_groups(
    groups: &IndexMap<&str, Vec<f64>>,
    reduce: impl Fn(&[f64]) -> Option<f64>,
) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = groups
        .iter()
        .filter_map(|(k, values)| reduce(values).map(|r| (k.to_string(), r)))
        .collect();
    sort_descending(&mut ranked);
    ranked
}

/// Stable descending sort on the second element.
pub(crate) fn sort_descending<K>(items: &mut [(K, f64)]) {
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}

/// Split `(label, value)` pairs into parallel vectors.
pub(crate) fn unzip_ranked(ranked: Vec<(String, f64)>) -> (Vec<String>, Vec<f64>) {
    ranked.into_iter().unzip()
}
