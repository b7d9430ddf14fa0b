//! Layout hints: title, axes, legend.

use serde::{Deserialize, Serialize};

const TITLE_FONT_SIZE: u32 = 14;
const AXIS_TITLE_FONT_SIZE: u32 = 12;
const TICK_FONT_SIZE: u32 = 10;

/// Chart title, horizontally positioned in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
    pub font_size: u32,
}

/// One axis binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title; empty hides it.
    pub title: String,
    pub title_font_size: u32,
    pub tick_font_size: u32,
    /// d3-style tick format, e.g. `.2%`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<String>,
    /// Draw the axis from high to low.
    #[serde(default)]
    pub reversed: bool,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Axis without a title.
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn with_tick_format(mut self, format: impl Into<String>) -> Self {
        self.tick_format = Some(format.into());
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_font_size: AXIS_TITLE_FONT_SIZE,
            tick_font_size: TICK_FONT_SIZE,
            tick_format: None,
            reversed: false,
        }
    }
}

/// How multiple bar series share a category; grouped when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Stack,
}

/// Full layout of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    /// Fixed pixel height.
    pub height: u32,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    /// Explicit category order for the categorical axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_order: Option<Vec<String>>,
    /// Text shown in place of data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Layout {
    pub fn new(title: impl Into<String>, height: u32) -> Self {
        Self {
            title: Title {
                text: title.into(),
                x: 0.5,
                font_size: TITLE_FONT_SIZE,
            },
            height,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            show_legend: true,
            legend_title: None,
            bar_mode: None,
            category_order: None,
            notice: None,
        }
    }
}
