// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plot traces and layout.

use crate::sampler::{Series, DEFAULT_SAMPLES};

/// Visible window and sampling density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWindow {
    /// Sampled and visible x range.
    pub x_range: [f64; 2],
    /// Visible y range.
    pub y_range: [f64; 2],
    /// Sampling intervals across `x_range`.
    pub samples: usize,
}

impl Default for PlotWindow {
    fn default() -> Self {
        Self {
            x_range: [-10.0, 10.0],
            y_range: [-10.0, 10.0],
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// Stroke of a line trace.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// CSS colour.
    pub color: String,
    /// Width in pixels.
    pub width: f64,
}

/// One curve to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Points; absent ones break the line.
    pub series: Series,
    /// Stroke.
    pub line: LineStyle,
}

impl Trace {
    /// Blue 2px line, as drawn by the plotter.
    pub fn line(series: Series) -> Self {
        Self {
            series,
            line: LineStyle {
                color: "#0088FF".to_string(),
                width: 2.0,
            },
        }
    }
}

/// One axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Label.
    pub title: String,
    /// Fixed range.
    pub range: [f64; 2],
    /// Draw the line through zero.
    pub zeroline: bool,
    /// Colour of the zero line.
    pub zeroline_color: String,
    /// Colour of grid lines.
    pub grid_color: String,
}

impl Axis {
    fn fixed(title: &str, range: [f64; 2]) -> Self {
        Self {
            title: title.to_string(),
            range,
            zeroline: true,
            zeroline_color: "#000000".to_string(),
            grid_color: "#EEEEEE".to_string(),
        }
    }
}

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
    /// Bottom.
    pub b: u32,
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    /// Figure title.
    pub title: String,
    /// Horizontal axis.
    pub x_axis: Axis,
    /// Vertical axis.
    pub y_axis: Axis,
    /// Plot-area background.
    pub plot_bg: String,
    /// Figure background.
    pub paper_bg: String,
    /// Margins around the plot area.
    pub margin: Margin,
}

impl PlotLayout {
    /// Layout for `y = <source>` over `window`.
    pub fn for_function(source: &str, window: &PlotWindow) -> Self {
        Self {
            title: format!("y = {source}"),
            x_axis: Axis::fixed("x", window.x_range),
            y_axis: Axis::fixed("y", window.y_range),
            plot_bg: "white".to_string(),
            paper_bg: "white".to_string(),
            margin: Margin {
                l: 50,
                r: 20,
                t: 50,
                b: 50,
            },
        }
    }
}
