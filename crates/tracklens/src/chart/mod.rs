//! Declarative, renderer-independent chart descriptions.
//!
//! A [`ChartDescription`] carries everything a frontend needs to draw one
//! dashboard panel: the chart kind, its data series, and layout hints. The
//! layout follows one house style across the dashboard:
//!
//! - a fixed height per chart
//! - a centered title (`x = 0.5`) at font size 14
//! - axis titles at font size 12, tick labels at font size 10

mod layout;
mod series;

pub use layout::{Axis, BarMode, Layout, Title};
pub use series::{ColorScale, Orientation, Series, SeriesStyle, Values};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Box,
    Scatter,
    Line,
    Histogram,
    Heatmap,
    /// No data; only the layout (title, axes, notice) is meaningful.
    Empty,
}

/// A complete chart: kind, data series and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub series: Vec<Series>,
    pub layout: Layout,
}

impl ChartDescription {
    /// A chart with the house layout and no series yet.
    pub fn new(kind: ChartKind, title: impl Into<String>, height: u32) -> Self {
        Self {
            kind,
            series: Vec::new(),
            layout: Layout::new(title, height),
        }
    }

    /// An empty chart carrying a visible notice instead of data.
    pub fn placeholder(title: impl Into<String>, height: u32, notice: impl Into<String>) -> Self {
        let mut chart = Self::new(ChartKind::Empty, title, height);
        chart.layout.notice = Some(notice.into());
        chart
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_x_axis(mut self, axis: Axis) -> Self {
        self.layout.x_axis = axis;
        self
    }

    pub fn with_y_axis(mut self, axis: Axis) -> Self {
        self.layout.y_axis = axis;
        self
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.layout.show_legend = show;
        self
    }

    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.layout.legend_title = Some(title.into());
        self
    }

    pub fn with_bar_mode(mut self, mode: BarMode) -> Self {
        self.layout.bar_mode = Some(mode);
        self
    }

    pub fn with_category_order(mut self, order: Vec<String>) -> Self {
        self.layout.category_order = Some(order);
        self
    }

    /// Whether this chart stands in for missing data.
    pub fn is_placeholder(&self) -> bool {
        self.kind == ChartKind::Empty
    }

    /// Serialize to the JSON transport format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
