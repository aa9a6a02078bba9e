// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

pub mod calc;
pub mod plot;
pub mod prefs;
pub mod surface;
pub mod typeset;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use mathbench_app_core::config::ConfigService;
use mathbench_app_core::config_port::ConfigPort;
use mathbench_app_core::prefs::WorkbenchPrefs;
use mathbench_config_fs::FsConfigStore;
use mathbench_panels::PanelError;
use tracing::debug;

/// Config store plus the prefs loaded from it.
pub struct Context {
    pub config: ConfigService<FsConfigStore>,
    pub prefs: WorkbenchPrefs,
}

impl Context {
    /// Open the store under `dir` (or the platform config dir) and load prefs,
    /// falling back to defaults.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        let store = match dir {
            Some(dir) => FsConfigStore::with_base(dir)
                .with_context(|| format!("cannot use config dir {}", dir.display()))?,
            None => FsConfigStore::new().context("cannot open the config dir")?,
        };
        let config = ConfigService::new(store);
        let prefs = config.load_prefs().unwrap_or_default();
        debug!(base = %config.store().base().display(), "prefs loaded");
        Ok(Self { config, prefs })
    }
}

/// Print a panel error the way the panel would show it.
pub fn report(err: &PanelError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::FAILURE
}

/// Write `text` to `out`, or to stdout when there is none.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = text.len(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}
