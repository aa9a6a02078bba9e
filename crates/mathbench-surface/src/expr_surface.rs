// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Surfaces typed in as `x(u,v)`, `y(u,v)`, `z(u,v)`.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use glam::DVec3;
use mathbench_expr::{Evaluator, Expr, MathEngine, Scope};

use crate::error::SurfaceError;
use crate::function::ParametricFn;

/// Default `u` and `v` domain.
pub const DEFAULT_PARAM_RANGE: [f64; 2] = [0.0, TAU];

/// A surface whose coordinates are expressions in `u` and `v`.
///
/// Compares by source text and ranges, so two panels typing the same
/// formulas describe the same surface.
#[derive(Debug, Clone)]
pub struct ExprSurface {
    sources: [String; 3],
    compiled: [Expr; 3],
    u_range: [f64; 2],
    v_range: [f64; 2],
}

impl ExprSurface {
    /// Compile the three coordinate expressions over the default domain.
    pub fn new(x: &str, y: &str, z: &str) -> Result<Self, SurfaceError> {
        let engine = MathEngine::new();
        let compile = |axis: char, src: &str| {
            engine
                .compile(src)
                .map_err(|source| SurfaceError::Expression { axis, source })
        };
        Ok(Self {
            compiled: [compile('x', x)?, compile('y', y)?, compile('z', z)?],
            sources: [x.to_string(), y.to_string(), z.to_string()],
            u_range: DEFAULT_PARAM_RANGE,
            v_range: DEFAULT_PARAM_RANGE,
        })
    }

    /// Replace the `u` domain.
    pub fn with_u_range(mut self, range: RangeInclusive<f64>) -> Result<Self, SurfaceError> {
        self.u_range = checked_range('u', range)?;
        Ok(self)
    }

    /// Replace the `v` domain.
    pub fn with_v_range(mut self, range: RangeInclusive<f64>) -> Result<Self, SurfaceError> {
        self.v_range = checked_range('v', range)?;
        Ok(self)
    }

    /// Source text of `x`, `y` and `z`.
    pub fn sources(&self) -> &[String; 3] {
        &self.sources
    }

    /// `u` domain.
    pub fn u_range(&self) -> [f64; 2] {
        self.u_range
    }

    /// `v` domain.
    pub fn v_range(&self) -> [f64; 2] {
        self.v_range
    }

    /// Identity used when comparing viewport parameters.
    pub fn key(&self) -> String {
        format!(
            "expr:{};{};{};u=[{},{}];v=[{},{}]",
            self.sources[0],
            self.sources[1],
            self.sources[2],
            self.u_range[0],
            self.u_range[1],
            self.v_range[0],
            self.v_range[1],
        )
    }
}

impl PartialEq for ExprSurface {
    fn eq(&self, other: &Self) -> bool {
        self.sources == other.sources
            && self.u_range == other.u_range
            && self.v_range == other.v_range
    }
}

impl ParametricFn for ExprSurface {
    fn point(&self, u: f64, v: f64) -> Result<DVec3, SurfaceError> {
        let pu = lerp(self.u_range, u);
        let pv = lerp(self.v_range, v);
        let scope = Scope::new().with("u", pu).with("v", pv);
        let engine = MathEngine::new();
        let mut out = [0.0; 3];
        for ((slot, expr), axis) in out.iter_mut().zip(&self.compiled).zip(['x', 'y', 'z']) {
            let value = engine
                .evaluate_at(expr, &scope)
                .map_err(|source| SurfaceError::Expression { axis, source })?;
            *slot = value
                .as_finite()
                .ok_or_else(|| SurfaceError::non_finite(u, v))?;
        }
        Ok(DVec3::from_array(out))
    }
}

fn lerp([lo, hi]: [f64; 2], t: f64) -> f64 {
    lo + (hi - lo) * t
}

fn checked_range(param: char, range: RangeInclusive<f64>) -> Result<[f64; 2], SurfaceError> {
    let (lo, hi) = range.into_inner();
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok([lo, hi])
    } else {
        Err(SurfaceError::InvalidRange {
            param,
            lo: lo.to_string(),
            hi: hi.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mathbench_expr::ExprError;

    #[test]
    fn bad_axis_is_reported() {
        let err = ExprSurface::new("u", "v", "sin(").unwrap_err();
        assert_eq!(
            err,
            SurfaceError::Expression {
                axis: 'z',
                source: ExprError::UnexpectedEnd
            }
        );
    }

    #[test]
    fn ranges_must_be_ordered() {
        let surface = ExprSurface::new("u", "v", "0").unwrap();
        assert!(surface.clone().with_u_range(1.0..=1.0).is_err());
        let s = surface.with_v_range(-1.0..=1.0).unwrap();
        assert_eq!(s.v_range(), [-1.0, 1.0]);
    }

    #[test]
    fn maps_unit_square_onto_domain() {
        let plane = ExprSurface::new("u", "v", "u * v")
            .unwrap()
            .with_u_range(-2.0..=2.0)
            .unwrap();
        let p = plane.point(0.5, 1.0).unwrap();
        assert_eq!(p, DVec3::new(0.0, TAU, 0.0));
    }

    #[test]
    fn undefined_symbol_and_non_finite_points_fail() {
        let s = ExprSurface::new("u", "w", "0").unwrap();
        assert!(matches!(
            s.point(0.0, 0.0),
            Err(SurfaceError::Expression { axis: 'y', .. })
        ));
        let s = ExprSurface::new("u", "v", "1 / u").unwrap();
        assert!(matches!(
            s.point(0.0, 0.5),
            Err(SurfaceError::NonFinite { .. })
        ));
    }

    #[test]
    fn equality_ignores_compiled_form() {
        let a = ExprSurface::new("u", "v", "u+v").unwrap();
        let b = ExprSurface::new("u", "v", "u+v").unwrap();
        let c = ExprSurface::new("u", "v", "u + v").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.key(), b.key());
    }
}
