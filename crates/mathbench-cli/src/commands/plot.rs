// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mathbench plot`

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use mathbench_expr::MathEngine;
use mathbench_panels::{EvaluationResult, PlotterPanel};
use mathbench_plot::{PlotWindow, SvgPlotter};
use tracing::info;

use super::{report, write_output, Context};
use crate::cli::PlotArgs;

pub fn run(ctx: &Context, args: PlotArgs) -> Result<ExitCode> {
    let prefs = &ctx.prefs.plot;
    let window = PlotWindow {
        x_range: [
            args.x_min.unwrap_or(prefs.x_range[0]),
            args.x_max.unwrap_or(prefs.x_range[1]),
        ],
        y_range: [
            args.y_min.unwrap_or(prefs.y_range[0]),
            args.y_max.unwrap_or(prefs.y_range[1]),
        ],
        samples: args.samples.unwrap_or(prefs.samples),
    };

    let mut plotter = PlotterPanel::new(MathEngine::new()).with_window(window);
    plotter.set_function(args.expr);
    let summary = match plotter.attach(SvgPlotter::default()) {
        EvaluationResult::Ready(summary) => *summary,
        EvaluationResult::Failed(err) => return Ok(report(err)),
        EvaluationResult::Empty => return Ok(ExitCode::FAILURE),
    };
    info!(points = summary.points, absent = summary.absent, "plotted");

    let figure = plotter
        .port()
        .and_then(SvgPlotter::figure)
        .context("the plotter kept no figure")?;
    write_output(args.out.as_deref(), figure)?;
    Ok(ExitCode::SUCCESS)
}
