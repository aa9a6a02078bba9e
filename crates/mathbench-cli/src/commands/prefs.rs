// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `mathbench prefs`

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use mathbench_app_core::config_port::PREFS_KEY;
use mathbench_app_core::prefs::WorkbenchPrefs;

use super::Context;
use crate::cli::PrefsAction;

pub fn run(ctx: &Context, action: PrefsAction) -> Result<ExitCode> {
    match action {
        PrefsAction::Show => {
            let json =
                serde_json::to_string_pretty(&ctx.prefs).context("failed to encode prefs")?;
            println!("{json}");
        }
        PrefsAction::Reset => {
            ctx.config
                .save(PREFS_KEY, &WorkbenchPrefs::default())
                .context("failed to reset prefs")?;
            println!("{}", ctx.config.store().path_for(PREFS_KEY).display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
