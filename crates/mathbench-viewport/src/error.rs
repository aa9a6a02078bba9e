// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewport errors.

use mathbench_surface::SurfaceError;
use thiserror::Error;

/// Failure to (re)build a viewport session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewportError {
    /// The generating function could not be tessellated.
    #[error("cannot build surface: {0}")]
    Surface(#[from] SurfaceError),
}
