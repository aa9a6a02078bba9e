// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mathbench calc`

use std::process::ExitCode;

use mathbench_expr::MathEngine;
use mathbench_panels::{CalcMode, CalculatorPanel, EvaluationResult};
use tracing::warn;

use super::{report, Context};
use crate::cli::CalcArgs;

pub fn run(ctx: &Context, args: CalcArgs) -> ExitCode {
    let mode = args.mode.unwrap_or_else(|| default_mode(ctx));
    let mut calc = CalculatorPanel::new(MathEngine::new()).with_mode(mode);
    calc.set_text(args.expr.join(" "));
    match calc.calculate() {
        EvaluationResult::Ready(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        EvaluationResult::Failed(err) => report(err),
        EvaluationResult::Empty => ExitCode::FAILURE,
    }
}

fn default_mode(ctx: &Context) -> CalcMode {
    let name = &ctx.prefs.calculator.default_mode;
    name.parse().unwrap_or_else(|err: String| {
        warn!(%err, "ignoring saved calculator mode");
        CalcMode::default()
    })
}
