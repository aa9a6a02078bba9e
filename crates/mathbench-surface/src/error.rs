// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Surface construction errors.

use mathbench_expr::ExprError;
use thiserror::Error;

/// Errors raised while building or tessellating a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Zero segments along either parameter, or more than
    /// [`crate::MAX_RESOLUTION`].
    #[error(
        "resolution must be between 1 x 1 and {max} x {max} (got {slices} x {stacks})",
        max = crate::MAX_RESOLUTION
    )]
    InvalidResolution {
        /// Segments along u.
        slices: u32,
        /// Segments along v.
        stacks: u32,
    },
    /// The function produced NaN or infinity.
    #[error("surface is not finite at (u, v) = ({u}, {v})")]
    NonFinite {
        /// Normalized u.
        u: String,
        /// Normalized v.
        v: String,
    },
    /// A coordinate expression failed to parse or evaluate.
    #[error("{axis}(u,v): {source}")]
    Expression {
        /// Which coordinate (`x`, `y` or `z`).
        axis: char,
        /// Underlying failure.
        source: ExprError,
    },
    /// A parameter range is empty or not finite.
    #[error("invalid {param} range [{lo}, {hi}]")]
    InvalidRange {
        /// `u` or `v`.
        param: char,
        /// Lower bound as given.
        lo: String,
        /// Upper bound as given.
        hi: String,
    },
}

impl SurfaceError {
    pub(crate) fn non_finite(u: f64, v: f64) -> Self {
        Self::NonFinite {
            u: format!("{u:.5}"),
            v: format!("{v:.5}"),
        }
    }
}
