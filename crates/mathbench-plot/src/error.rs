// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plotting errors. Display strings are what the plotter panel shows.

use mathbench_expr::ExprError;
use thiserror::Error;

/// Why a function could not be plotted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    /// The expression did not parse.
    #[error("Invalid function expression")]
    InvalidExpression(#[source] ExprError),
    /// Every sample was absent.
    #[error("Unable to plot function")]
    NothingToPlot,
    /// The x range is empty or not finite.
    #[error("Invalid x range [{lo}, {hi}]")]
    InvalidRange {
        /// Lower bound as given.
        lo: String,
        /// Upper bound as given.
        hi: String,
    },
    /// The plotting backend failed.
    #[error("Error creating plot")]
    Port(String),
}
