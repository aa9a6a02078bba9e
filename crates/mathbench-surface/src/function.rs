// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The generating-function port.

use glam::DVec3;

use crate::error::SurfaceError;

/// A surface `(u, v) -> point` over the unit square.
///
/// `u` and `v` are normalized to `[0, 1]`; implementations map them onto
/// their own parameter domain.
pub trait ParametricFn: Send + Sync {
    /// Point on the surface at `(u, v)`.
    fn point(&self, u: f64, v: f64) -> Result<DVec3, SurfaceError>;
}

impl<F> ParametricFn for F
where
    F: Fn(f64, f64) -> DVec3 + Send + Sync,
{
    fn point(&self, u: f64, v: f64) -> Result<DVec3, SurfaceError> {
        Ok(self(u, v))
    }
}
