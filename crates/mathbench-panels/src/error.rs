// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Panel-level errors: short messages shown next to the input.

use thiserror::Error;

/// Shown when a calculation yields nothing.
pub const NO_RESULT: &str = "Could not calculate result";
/// Shown for the factor mode.
pub const FACTOR_UNAVAILABLE: &str = "Factoring is not available in this version";
/// Shown when solve input has no `=`.
pub const SOLVE_FORMAT: &str = "For equation solving, use format: expr1 = expr2";
/// Shown when solve input is an equation whose sides do not parse.
pub const SOLVE_UNPARSEABLE: &str = "Could not solve equation. Try a simpler form.";
/// Shown for a well-formed equation.
pub const SOLVE_UNAVAILABLE: &str = "Equation solving is not available in this version";
/// Shown when the typesetter rejects the input.
pub const RENDER_FAILED: &str = "Error rendering LaTeX";

/// A failure a panel reports instead of a result. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// The capability was called and failed.
    #[error("{0}")]
    Evaluation(String),
    /// The capability is not offered; nothing was called.
    #[error("{0}")]
    Unsupported(&'static str),
}

impl PanelError {
    /// The message as shown.
    pub fn message(&self) -> &str {
        match self {
            Self::Evaluation(msg) => msg,
            Self::Unsupported(msg) => msg,
        }
    }
}
