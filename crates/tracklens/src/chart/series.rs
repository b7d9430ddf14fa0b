//! Data series and their styling.

use serde::{Deserialize, Serialize};

use crate::stats::{BoxSummary, HistogramBin};

/// A data array bound to an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<f64>),
    /// Numbers with gaps; gaps serialize as `null`.
    Sparse(Vec<Option<f64>>),
    Labels(Vec<String>),
}

impl Values {
    pub fn numbers(values: impl IntoIterator<Item = f64>) -> Self {
        Values::Numbers(values.into_iter().collect())
    }

    pub fn labels<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Values::Labels(values.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            Values::Numbers(v) => v.len(),
            Values::Sparse(v) => v.len(),
            Values::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Values {
    fn default() -> Self {
        Values::Numbers(Vec::new())
    }
}

/// Bar orientation; bars are vertical when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
}

/// Continuous color scale for heatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Diverging red–blue scale fixed to the correlation range.
    pub fn diverging_unit() -> Self {
        Self {
            name: "RdBu".to_string(),
            min: -1.0,
            max: 1.0,
        }
    }
}

/// Per-series styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<ColorScale>,
}

/// One trace of a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Values::is_empty")]
    pub x: Values,
    #[serde(default, skip_serializing_if = "Values::is_empty")]
    pub y: Values,
    /// Matrix for heatmaps, row-major, rows follow `y`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<Vec<Option<f64>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Precomputed quartiles for box plots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BoxSummary>,
    /// Precomputed buckets for histograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<Vec<HistogramBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<SeriesStyle>,
}

impl Series {
    pub fn new(x: Values, y: Values) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Some(Orientation::Horizontal);
        self
    }

    pub fn with_matrix(mut self, z: Vec<Vec<Option<f64>>>) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_summary(mut self, summary: BoxSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_bins(mut self, bins: Vec<HistogramBin>) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = Some(style);
        self
    }
}
