// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]

use mathbench_expr::MathEngine;
use mathbench_plot::{
    sample_expression, sample_fn, PlotError, PlotLayout, PlotPort, PlotWindow, SvgPlotter, Trace,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sampling_is_uniform_and_inclusive(
        lo in -1e3f64..1e3,
        width in 1e-3f64..1e3,
        intervals in 1usize..2000,
    ) {
        let hi = lo + width;
        let s = sample_fn(Some, [lo, hi], intervals).unwrap();
        prop_assert_eq!(s.len(), intervals + 1);
        prop_assert_eq!(s.x[0], lo);
        prop_assert!((s.x[intervals] - hi).abs() <= 1e-9 * hi.abs().max(1.0));
        prop_assert!(s.x.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn absent_points_are_exactly_the_undefined_ones(
        lo in -50.0f64..0.0,
        hi in 0.1f64..50.0,
    ) {
        let s = sample_expression(&MathEngine::new(), "sqrt(x)", [lo, hi], 200).unwrap();
        for (x, y) in s.x.iter().zip(&s.y) {
            prop_assert_eq!(y.is_some(), *x >= 0.0);
        }
    }
}

#[test]
fn figure_has_title_axes_and_broken_line() {
    let window = PlotWindow::default();
    let series = sample_expression(&MathEngine::new(), "1/x", window.x_range, 10).unwrap();
    let layout = PlotLayout::for_function("1/x", &window);
    assert_eq!(layout.title, "y = 1/x");

    let mut plotter = SvgPlotter::default();
    plotter.new_plot(&[Trace::line(series)], &layout).unwrap();
    let svg = plotter.figure().unwrap();
    assert!(svg.contains("y = 1/x"));
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert!(svg.contains(r##"stroke="#0088FF""##));
    assert_eq!(svg.matches(r#"class="zero""#).count(), 2);
}

#[test]
fn drawing_over_a_figure_requires_a_purge() {
    let window = PlotWindow::default();
    let layout = PlotLayout::for_function("x", &window);
    let series = sample_fn(Some, window.x_range, 10).unwrap();
    let traces = [Trace::line(series)];

    let mut plotter = SvgPlotter::default();
    plotter.new_plot(&traces, &layout).unwrap();
    let err = plotter.new_plot(&traces, &layout).unwrap_err();
    assert_eq!(err.to_string(), "Error creating plot");

    plotter.purge();
    plotter.new_plot(&traces, &layout).unwrap();
    assert_eq!((plotter.plot_count(), plotter.purge_count()), (2, 1));
}

#[test]
fn tiny_container_is_a_port_error() {
    let window = PlotWindow::default();
    let layout = PlotLayout::for_function("x", &window);
    let mut plotter = SvgPlotter::new(40, 40);
    assert!(matches!(
        plotter.new_plot(&[], &layout),
        Err(PlotError::Port(_))
    ));
}
