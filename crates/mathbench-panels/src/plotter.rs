// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Function plotter panel.

use mathbench_expr::Evaluator;
use mathbench_plot::{sample_expression, PlotError, PlotLayout, PlotPort, PlotWindow, Trace};
use tracing::{debug, warn};

use crate::error::PanelError;
use crate::examples::{find_example, FUNCTION_EXAMPLES};
use crate::input::ExpressionInput;
use crate::result::{EvaluationResult, ResultSlot};

/// Function the plotter opens with.
pub const DEFAULT_FUNCTION: &str = "x^2";

/// What the installed figure shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSummary {
    /// Sampled points.
    pub points: usize,
    /// Points with no real, finite value.
    pub absent: usize,
}

/// Plots `y = f(x)` into a [`PlotPort`] whenever the function, the window or
/// the container changes.
///
/// Without a port (no container yet) nothing is sampled. Every attempt purges
/// the port first, so a container never holds more than one figure.
#[derive(Debug)]
pub struct PlotterPanel<E, P> {
    engine: E,
    port: Option<P>,
    input: ExpressionInput,
    window: PlotWindow,
    result: ResultSlot<PlotSummary>,
}

impl<E: Evaluator, P: PlotPort> PlotterPanel<E, P> {
    /// Panel with the default function and window, no container.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            port: None,
            input: ExpressionInput::new(DEFAULT_FUNCTION),
            window: PlotWindow::default(),
            result: ResultSlot::new(),
        }
    }

    /// Start with `window`.
    pub fn with_window(mut self, window: PlotWindow) -> Self {
        self.window = window;
        self
    }

    /// Current function text.
    pub fn function(&self) -> &str {
        self.input.text()
    }

    /// Current window.
    pub fn window(&self) -> &PlotWindow {
        &self.window
    }

    /// Bound plot port.
    pub fn port(&self) -> Option<&P> {
        self.port.as_ref()
    }

    /// Last result.
    pub fn result(&self) -> &EvaluationResult<PlotSummary> {
        self.result.current()
    }

    /// Bind a container and plot into it.
    pub fn attach(&mut self, port: P) -> &EvaluationResult<PlotSummary> {
        if let Some(mut old) = self.port.replace(port) {
            old.purge();
        }
        self.replot()
    }

    /// Purge and unbind the container.
    pub fn detach(&mut self) -> Option<P> {
        let mut port = self.port.take()?;
        port.purge();
        self.result.dispose();
        Some(port)
    }

    /// Replace the function and replot immediately.
    pub fn set_function(&mut self, text: impl Into<String>) -> &EvaluationResult<PlotSummary> {
        self.input.set_text(text);
        self.replot()
    }

    /// Load a [`FUNCTION_EXAMPLES`] entry by label.
    pub fn load_example(&mut self, label: &str) -> Option<&EvaluationResult<PlotSummary>> {
        let example = find_example(&FUNCTION_EXAMPLES, label)?;
        Some(self.set_function(example.input))
    }

    /// Replace the window and replot.
    pub fn set_window(&mut self, window: PlotWindow) -> &EvaluationResult<PlotSummary> {
        self.window = window;
        self.replot()
    }

    /// Sample and draw the current function. A no-op without a container.
    pub fn replot(&mut self) -> &EvaluationResult<PlotSummary> {
        let Some(port) = self.port.as_mut() else {
            debug!("no plot container, deferring");
            return self.result.current();
        };
        port.purge();
        let outcome = match draw(&self.engine, port, self.input.text(), &self.window) {
            Ok(summary) => EvaluationResult::Ready(summary),
            Err(err) => {
                warn!(%err, function = self.input.text(), "plot failed");
                EvaluationResult::Failed(PanelError::Evaluation(err.to_string()))
            }
        };
        self.result.install(outcome);
        self.result.current()
    }
}

fn draw<E: Evaluator, P: PlotPort>(
    engine: &E,
    port: &mut P,
    source: &str,
    window: &PlotWindow,
) -> Result<PlotSummary, PlotError> {
    let series = sample_expression(engine, source, window.x_range, window.samples)?;
    if series.is_blank() {
        return Err(PlotError::NothingToPlot);
    }
    let summary = PlotSummary {
        points: series.len(),
        absent: series.absent(),
    };
    let layout = PlotLayout::for_function(source, window);
    port.new_plot(&[Trace::line(series)], &layout)
        .map_err(|err| match err {
            PlotError::Port(_) => err,
            other => PlotError::Port(other.to_string()),
        })?;
    Ok(summary)
}
