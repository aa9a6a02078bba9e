// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The generating function tracked by the viewport.

use std::fmt;
use std::sync::Arc;

use crate::error::SurfaceError;
use crate::expr_surface::ExprSurface;
use crate::function::ParametricFn;
use crate::mesh::{tessellate, SurfaceMesh};
use crate::preset::SurfacePreset;

/// Where a surface comes from.
///
/// Sources compare by value; custom functions compare by their key since
/// closures have no structural equality.
#[derive(Clone)]
pub enum SurfaceSource {
    /// A built-in surface.
    Preset(SurfacePreset),
    /// Coordinates typed as expressions.
    Expr(ExprSurface),
    /// Caller-supplied function identified by `key`.
    Custom {
        /// Identity used for change detection.
        key: String,
        /// The function.
        func: Arc<dyn ParametricFn>,
    },
}

impl SurfaceSource {
    /// Wrap a closure or other function under `key`.
    pub fn custom(key: impl Into<String>, func: impl ParametricFn + 'static) -> Self {
        Self::Custom {
            key: key.into(),
            func: Arc::new(func),
        }
    }

    /// Identity string used for logging and change detection.
    pub fn key(&self) -> String {
        match self {
            Self::Preset(p) => format!("preset:{}", p.name()),
            Self::Expr(e) => e.key(),
            Self::Custom { key, .. } => format!("custom:{key}"),
        }
    }

    /// Build the mesh at the given resolution.
    pub fn tessellate(&self, slices: u32, stacks: u32) -> Result<SurfaceMesh, SurfaceError> {
        match self {
            Self::Preset(p) => tessellate(p, slices, stacks),
            Self::Expr(e) => tessellate(e, slices, stacks),
            Self::Custom { func, .. } => tessellate(func.as_ref(), slices, stacks),
        }
    }
}

impl Default for SurfaceSource {
    fn default() -> Self {
        Self::Preset(SurfacePreset::default())
    }
}

impl From<SurfacePreset> for SurfaceSource {
    fn from(p: SurfacePreset) -> Self {
        Self::Preset(p)
    }
}

impl From<ExprSurface> for SurfaceSource {
    fn from(e: ExprSurface) -> Self {
        Self::Expr(e)
    }
}

impl PartialEq for SurfaceSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Preset(a), Self::Preset(b)) => a == b,
            (Self::Expr(a), Self::Expr(b)) => a == b,
            (Self::Custom { key: a, .. }, Self::Custom { key: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for SurfaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SurfaceSource").field(&self.key()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn custom_sources_compare_by_key() {
        let a = SurfaceSource::custom("wave", |u: f64, v: f64| DVec3::new(u, v, u.sin()));
        let b = SurfaceSource::custom("wave", |u: f64, v: f64| DVec3::new(u, v, 0.0));
        let c = SurfaceSource::custom("flat", |u: f64, v: f64| DVec3::new(u, v, 0.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, SurfaceSource::default());
    }

    #[test]
    fn default_is_the_sphere() {
        assert_eq!(SurfaceSource::default().key(), "preset:sphere");
    }
}
