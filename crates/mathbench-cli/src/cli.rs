// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use mathbench_panels::CalcMode;
use mathbench_surface::SurfacePreset;
use mathbench_typeset::SourceKind;

/// Math workbench: calculator, plotter, surface viewer and typesetter.
#[derive(Parser, Debug)]
#[command(name = "mathbench", version, about, long_about = None)]
pub struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding prefs and saved documents.
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate, simplify or expand an expression.
    Calc(CalcArgs),
    /// Plot y = f(x) as SVG.
    Plot(PlotArgs),
    /// Render a parametric surface as SVG.
    Surface(SurfaceArgs),
    /// Typeset TeX or Markdown with math into HTML + MathML.
    Typeset(TypesetArgs),
    /// Show or reset saved preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// evaluate, simplify, expand, factor or solve [default: from prefs]
    #[arg(short, long)]
    pub mode: Option<CalcMode>,

    /// Expression; separate words are joined with spaces.
    #[arg(value_name = "EXPR", required = true, allow_hyphen_values = true)]
    pub expr: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Function of x.
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    pub expr: String,

    #[arg(long, allow_negative_numbers = true)]
    pub x_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub x_max: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub y_max: Option<f64>,

    /// Sampling intervals.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Write the SVG here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// sphere, torus, mobius, helicoid or klein.
    #[arg(long, conflicts_with_all = ["x", "y", "z"])]
    pub preset: Option<SurfacePreset>,

    /// x(u,v).
    #[arg(long, requires_all = ["y", "z"], allow_hyphen_values = true)]
    pub x: Option<String>,
    /// y(u,v).
    #[arg(long, requires_all = ["x", "z"], allow_hyphen_values = true)]
    pub y: Option<String>,
    /// z(u,v).
    #[arg(long, requires_all = ["x", "y"], allow_hyphen_values = true)]
    pub z: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub u_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub u_max: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub v_min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub v_max: Option<f64>,

    #[arg(long)]
    pub slices: Option<u32>,
    #[arg(long)]
    pub stacks: Option<u32>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames to draw before the snapshot.
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Horizontal orbit applied before each frame, in radians.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub orbit: f32,

    /// Write the SVG here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TypesetArgs {
    /// markdown (with $..$ math) or equation (TeX).
    #[arg(short, long, default_value = "markdown")]
    pub kind: SourceKind,

    /// Source file; `-` or nothing reads stdin.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Wrap the fragment in a standalone HTML page.
    #[arg(long)]
    pub page: bool,

    /// Page title [default: file name].
    #[arg(long, requires = "page")]
    pub title: Option<String>,

    /// Write the HTML here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum PrefsAction {
    /// Print the effective preferences as JSON.
    Show,
    /// Overwrite saved preferences with the defaults.
    Reset,
}
