// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! Plotter panel: sampling, error messages and purge-before-plot.

use mathbench_expr::MathEngine;
use mathbench_panels::{EvaluationResult, PlotSummary, PlotterPanel, DEFAULT_FUNCTION};
use mathbench_plot::{
    sample_expression, PlotError, PlotLayout, PlotPort, PlotWindow, SvgPlotter, Trace,
    DEFAULT_SAMPLES,
};

/// Records port calls in order.
#[derive(Default)]
struct Recording {
    calls: Vec<String>,
}

impl PlotPort for Recording {
    fn new_plot(&mut self, traces: &[Trace], layout: &PlotLayout) -> Result<(), PlotError> {
        self.calls
            .push(format!("new_plot {} {}", traces.len(), layout.title));
        Ok(())
    }

    fn purge(&mut self) {
        self.calls.push("purge".into());
    }
}

fn message<T>(result: &EvaluationResult<T>) -> String {
    result.error().map(ToString::to_string).unwrap_or_default()
}

#[test]
fn nothing_is_sampled_without_a_container() {
    let mut plotter: PlotterPanel<_, SvgPlotter> = PlotterPanel::new(MathEngine::new());
    assert_eq!(plotter.function(), DEFAULT_FUNCTION);
    assert_eq!(plotter.set_function("sin(x)"), &EvaluationResult::Empty);
    assert!(plotter.port().is_none());
}

#[test]
fn attach_plots_the_default_function() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    let result = plotter.attach(SvgPlotter::default()).clone();
    assert_eq!(
        result,
        EvaluationResult::Ready(PlotSummary {
            points: 1001,
            absent: 0
        })
    );
    let svg = plotter.port().unwrap().figure().unwrap();
    assert!(svg.contains("y = x^2"));
}

#[test]
fn every_replot_purges_first() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(Recording::default());
    plotter.set_function("sin(x)");
    plotter.set_window(PlotWindow {
        x_range: [0.0, 1.0],
        ..PlotWindow::default()
    });
    assert_eq!(
        plotter.port().unwrap().calls,
        vec![
            "purge",
            "new_plot 1 y = x^2",
            "purge",
            "new_plot 1 y = sin(x)",
            "purge",
            "new_plot 1 y = sin(x)",
        ]
    );
}

#[test]
fn svg_container_never_holds_two_figures() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::default());
    for example in ["Cubic", "Sine", "Exponential", "Complex"] {
        assert!(plotter.load_example(example).unwrap().is_ready(), "{example}");
    }
    let port = plotter.port().unwrap();
    assert_eq!((port.plot_count(), port.purge_count()), (5, 4));
}

#[test]
fn logarithm_is_absent_exactly_where_x_is_not_positive() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::default());
    let summary = *plotter.load_example("Logarithm").unwrap().ready().unwrap();
    assert_eq!(
        summary,
        PlotSummary {
            points: 1001,
            absent: 501
        }
    );

    let series = sample_expression(
        &MathEngine::new(),
        "log(x)",
        PlotWindow::default().x_range,
        DEFAULT_SAMPLES,
    )
    .unwrap();
    for (x, y) in series.x.iter().zip(&series.y) {
        assert_eq!(y.is_none(), *x <= 0.0, "x = {x}, y = {y:?}");
    }
}

#[test]
fn figure_is_identical_after_a_purge_cycle() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::default());
    let first = plotter.port().unwrap().figure().unwrap().to_string();

    plotter.set_function("sin(x)");
    assert_ne!(plotter.port().unwrap().figure().unwrap(), first);
    plotter.set_function(DEFAULT_FUNCTION);
    assert_eq!(plotter.port().unwrap().figure().unwrap(), first);

    let port = plotter.detach().unwrap();
    assert!(port.figure().is_none());
    let result = plotter.attach(port).clone();
    assert!(result.is_ready());
    let port = plotter.port().unwrap();
    assert_eq!(port.figure().unwrap(), first);
    assert_eq!((port.plot_count(), port.purge_count()), (4, 3));
}

#[test]
fn failures_show_fixed_messages() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::default());

    plotter.set_function("2 * (x +");
    assert_eq!(message(plotter.result()), "Invalid function expression");
    assert!(plotter.port().unwrap().figure().is_none());

    plotter.set_function("sqrt(-1 - x^2)");
    assert_eq!(message(plotter.result()), "Unable to plot function");

    plotter.set_function("x");
    assert!(plotter.result().is_ready());
}

#[test]
fn port_failure_is_reported() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::new(40, 40));
    assert_eq!(message(plotter.result()), "Error creating plot");
}

#[test]
fn detach_purges_the_figure() {
    let mut plotter = PlotterPanel::new(MathEngine::new());
    plotter.attach(SvgPlotter::default());
    let port = plotter.detach().unwrap();
    assert!(port.figure().is_none());
    assert_eq!(port.purge_count(), 1);
    assert_eq!(plotter.result(), &EvaluationResult::Empty);
}
