// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mathbench panels.
//!
//! Each panel owns explicit state (the input, the selected mode, the last
//! result) and reaches the outside world only through ports: an
//! [`Evaluator`](mathbench_expr::Evaluator), a
//! [`PlotPort`](mathbench_plot::PlotPort), a
//! [`Typesetter`](mathbench_typeset::Typesetter) or a
//! [`RenderBackend`](mathbench_viewport::RenderBackend). Failures become a
//! short message in the panel's [`EvaluationResult`]; none escape.

mod calculator;
mod editor;
mod error;
pub mod examples;
mod input;
mod plotter;
mod result;
mod surface;

pub use calculator::{CalcMode, CalculatorPanel, DEFAULT_CALC_INPUT};
pub use editor::{DocumentEditor, EquationEditor, ViewMode};
pub use error::{
    PanelError, FACTOR_UNAVAILABLE, NO_RESULT, RENDER_FAILED, SOLVE_FORMAT, SOLVE_UNAVAILABLE,
    SOLVE_UNPARSEABLE,
};
pub use input::ExpressionInput;
pub use plotter::{PlotSummary, PlotterPanel, DEFAULT_FUNCTION};
pub use result::{EvaluationResult, ResultSlot};
pub use surface::SurfacePanel;
