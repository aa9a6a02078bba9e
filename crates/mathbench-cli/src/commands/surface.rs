// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mathbench surface`

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use mathbench_panels::SurfacePanel;
use mathbench_surface::DEFAULT_PARAM_RANGE;
use mathbench_viewport::{ContainerId, SvgBackend};
use tracing::debug;

use super::{report, write_output, Context};
use crate::cli::SurfaceArgs;

pub fn run(ctx: &Context, args: SurfaceArgs) -> Result<ExitCode> {
    let mut prefs = ctx.prefs.viewport.clone();
    prefs.width = args.width.unwrap_or(prefs.width);
    prefs.height = args.height.unwrap_or(prefs.height);
    prefs.slices = args.slices.unwrap_or(prefs.slices);
    prefs.stacks = args.stacks.unwrap_or(prefs.stacks);

    let mut panel = SurfacePanel::from_prefs(SvgBackend::new(), &prefs);
    if let Some(err) = panel.status().error() {
        return Ok(report(err));
    }

    let [u_lo, u_hi] = DEFAULT_PARAM_RANGE;
    let [v_lo, v_hi] = DEFAULT_PARAM_RANGE;
    let status = match (&args.x, &args.y, &args.z) {
        (Some(x), Some(y), Some(z)) => panel.set_expressions(
            [x.as_str(), y.as_str(), z.as_str()],
            args.u_min.unwrap_or(u_lo)..=args.u_max.unwrap_or(u_hi),
            args.v_min.unwrap_or(v_lo)..=args.v_max.unwrap_or(v_hi),
        ),
        _ => panel.select_preset(args.preset.unwrap_or_default()),
    };
    if let Some(err) = status.error() {
        return Ok(report(err));
    }
    if let Some(err) = panel.mount(ContainerId::new("mathbench")).error() {
        return Ok(report(err));
    }

    for _ in 0..args.frames.max(1) {
        if args.orbit != 0.0 {
            panel.orbit(args.orbit, 0.0);
        }
        panel.viewport().render_frame();
    }
    let svg = panel.snapshot().context("the viewport drew no frame")?;
    debug!(frames = panel.viewport().frames_drawn(), "surface rendered");
    panel.unmount();

    write_output(args.out.as_deref(), &svg)?;
    Ok(ExitCode::SUCCESS)
}
