// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! SVG implementation of [`PlotPort`].

use std::fmt::{self, Write as _};

use tracing::debug;

use crate::error::PlotError;
use crate::layout::{PlotLayout, Trace};
use crate::port::PlotPort;

/// Pixel coordinates are clamped to this magnitude before writing.
const COORD_LIMIT: f64 = 1e6;

/// Renders one figure at a time into an SVG document.
///
/// `new_plot` refuses to draw over an existing figure; callers must
/// [`purge`](PlotPort::purge) first.
#[derive(Debug, Clone)]
pub struct SvgPlotter {
    width: u32,
    height: u32,
    figure: Option<String>,
    plots: u64,
    purges: u64,
}

impl Default for SvgPlotter {
    fn default() -> Self {
        Self::new(720, 400)
    }
}

impl SvgPlotter {
    /// Plotter for a `width x height` container.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            figure: None,
            plots: 0,
            purges: 0,
        }
    }

    /// Current figure.
    pub fn figure(&self) -> Option<&str> {
        self.figure.as_deref()
    }

    /// Figures drawn so far.
    pub fn plot_count(&self) -> u64 {
        self.plots
    }

    /// Purges that disposed a figure.
    pub fn purge_count(&self) -> u64 {
        self.purges
    }
}

impl PlotPort for SvgPlotter {
    fn new_plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> Result<(), PlotError> {
        if self.figure.is_some() {
            return Err(PlotError::Port("container already holds a figure".into()));
        }
        let svg = render(self.width, self.height, traces, layout)?;
        self.figure = Some(svg);
        self.plots += 1;
        debug!(title = %layout.title, traces = traces.len(), "figure drawn");
        Ok(())
    }

    fn purge(&mut self) {
        if self.figure.take().is_some() {
            self.purges += 1;
        }
    }
}

struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x: [f64; 2],
    y: [f64; 2],
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        let t = (x - self.x[0]) / (self.x[1] - self.x[0]);
        (self.left + t * (self.right - self.left)).clamp(-COORD_LIMIT, COORD_LIMIT)
    }

    fn py(&self, y: f64) -> f64 {
        let t = (y - self.y[0]) / (self.y[1] - self.y[0]);
        (self.bottom - t * (self.bottom - self.top)).clamp(-COORD_LIMIT, COORD_LIMIT)
    }
}

fn render(
    width: u32,
    height: u32,
    traces: &[Trace],
    layout: &PlotLayout,
) -> Result<String, PlotError> {
    let m = layout.margin;
    let frame = Frame {
        left: f64::from(m.l),
        right: f64::from(width) - f64::from(m.r),
        top: f64::from(m.t),
        bottom: f64::from(height) - f64::from(m.b),
        x: layout.x_axis.range,
        y: layout.y_axis.range,
    };
    if frame.right <= frame.left || frame.bottom <= frame.top {
        return Err(PlotError::Port(format!(
            "container {width}x{height} leaves no room for the plot area"
        )));
    }
    if !(frame.x[0] < frame.x[1] && frame.y[0] < frame.y[1]) {
        return Err(PlotError::Port("axis ranges must be increasing".into()));
    }
    write_figure(width, height, traces, layout, &frame)
        .map_err(|err| PlotError::Port(err.to_string()))
}

fn write_figure(
    width: u32,
    height: u32,
    traces: &[Trace],
    layout: &PlotLayout,
    f: &Frame,
) -> Result<String, fmt::Error> {
    let mut svg = String::with_capacity(16 * 1024);
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        layout.paper_bg
    )?;
    let (pw, ph) = (f.right - f.left, f.bottom - f.top);
    writeln!(
        svg,
        r#"<defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{pw}" height="{ph}"/></clipPath></defs>"#,
        f.left, f.top
    )?;
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{pw}" height="{ph}" fill="{}"/>"#,
        f.left, f.top, layout.plot_bg
    )?;

    for t in nice_ticks(f.x) {
        let x = f.px(t);
        writeln!(
            svg,
            r#"<line class="grid" x1="{x:.2}" y1="{}" x2="{x:.2}" y2="{}" stroke="{}"/>"#,
            f.top, f.bottom, layout.x_axis.grid_color
        )?;
        writeln!(
            svg,
            r#"<text x="{x:.2}" y="{}" text-anchor="middle" font-size="11">{}</text>"#,
            f.bottom + 16.0,
            tick_label(t)
        )?;
    }
    for t in nice_ticks(f.y) {
        let y = f.py(t);
        writeln!(
            svg,
            r#"<line class="grid" x1="{}" y1="{y:.2}" x2="{}" y2="{y:.2}" stroke="{}"/>"#,
            f.left, f.right, layout.y_axis.grid_color
        )?;
        writeln!(
            svg,
            r#"<text x="{}" y="{:.2}" text-anchor="end" font-size="11">{}</text>"#,
            f.left - 6.0,
            y + 4.0,
            tick_label(t)
        )?;
    }
    if layout.x_axis.zeroline && f.x[0] <= 0.0 && 0.0 <= f.x[1] {
        let x = f.px(0.0);
        writeln!(
            svg,
            r#"<line class="zero" x1="{x:.2}" y1="{}" x2="{x:.2}" y2="{}" stroke="{}"/>"#,
            f.top, f.bottom, layout.x_axis.zeroline_color
        )?;
    }
    if layout.y_axis.zeroline && f.y[0] <= 0.0 && 0.0 <= f.y[1] {
        let y = f.py(0.0);
        writeln!(
            svg,
            r#"<line class="zero" x1="{}" y1="{y:.2}" x2="{}" y2="{y:.2}" stroke="{}"/>"#,
            f.left, f.right, layout.y_axis.zeroline_color
        )?;
    }

    writeln!(svg, r#"<g clip-path="url(#plot-area)">"#)?;
    for trace in traces {
        for segment in trace.series.segments() {
            if segment.len() < 2 {
                continue;
            }
            write!(
                svg,
                r#"<polyline fill="none" stroke="{}" stroke-width="{}" points=""#,
                trace.line.color, trace.line.width
            )?;
            for (i, (x, y)) in segment.iter().enumerate() {
                if i > 0 {
                    svg.push(' ');
                }
                write!(svg, "{:.2},{:.2}", f.px(*x), f.py(*y))?;
            }
            writeln!(svg, r#""/>"#)?;
        }
    }
    writeln!(svg, "</g>")?;

    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16">{}</text>"#,
        f64::from(width) / 2.0,
        f.top / 2.0 + 6.0,
        escape(&layout.title)
    )?;
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13">{}</text>"#,
        f.left + pw / 2.0,
        f64::from(height) - 8.0,
        escape(&layout.x_axis.title)
    )?;
    writeln!(
        svg,
        r#"<text x="14" y="{:.1}" text-anchor="middle" font-size="13" transform="rotate(-90 14 {:.1})">{}</text>"#,
        f.top + ph / 2.0,
        f.top + ph / 2.0,
        escape(&layout.y_axis.title)
    )?;
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Round tick positions (steps of 1, 2 or 5 times a power of ten), about
/// ten per axis.
pub(crate) fn nice_ticks([lo, hi]: [f64; 2]) -> Vec<f64> {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }
    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_label(t: f64) -> String {
    let rounded = (t * 1e9).round() / 1e9;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_round_numbers() {
        assert_eq!(
            nice_ticks([-10.0, 10.0]),
            vec![-10.0, -8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
        let unit = nice_ticks([0.0, 1.0]);
        assert!((5..=11).contains(&unit.len()), "{unit:?}");
        assert!(nice_ticks([1.0, 1.0]).is_empty());
    }

    #[test]
    fn titles_are_escaped() {
        assert_eq!(escape("x < 1 & y"), "x &lt; 1 &amp; y");
        assert_eq!(tick_label(-0.0), "0");
        assert_eq!(tick_label(0.30000000000000004), "0.3");
    }
}
