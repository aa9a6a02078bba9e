// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mathbench CLI entrypoint.
//!
//! Drives the workbench panels headless: `calc`, `plot`, `surface`,
//! `typeset` and `prefs`. Results go to stdout (or `--out`); logs and panel
//! errors go to stderr.
//!
//! # Usage
//! ```text
//! mathbench [-v] [--config-dir DIR] <command> [options]
//! ```
//!
//! Exits `0` on success and `1` when a panel reports an error or I/O fails.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::Level;

use crate::cli::{Cli, Command};
use crate::commands::Context;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // The viewport's frame loop spawns onto the ambient runtime.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start the tokio runtime")?;
    let _guard = runtime.enter();

    let dir = cli.config_dir.as_deref();
    match cli.command {
        Command::Calc(args) => Ok(commands::calc::run(&Context::open(dir)?, args)),
        Command::Plot(args) => commands::plot::run(&Context::open(dir)?, args),
        Command::Surface(args) => commands::surface::run(&Context::open(dir)?, args),
        Command::Typeset(args) => commands::typeset::run(args),
        Command::Prefs { action } => commands::prefs::run(&Context::open(dir)?, action),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
