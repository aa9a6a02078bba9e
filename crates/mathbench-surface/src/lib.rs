// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parametric surfaces for the Mathbench 3D viewer.
//!
//! A [`SurfaceSource`] names the generating function (a preset, three
//! coordinate expressions, or a keyed closure); [`tessellate`] samples it on
//! a grid into a [`SurfaceMesh`].

mod error;
mod expr_surface;
mod function;
mod mesh;
mod preset;
mod source;

pub use error::SurfaceError;
pub use expr_surface::{ExprSurface, DEFAULT_PARAM_RANGE};
pub use function::ParametricFn;
pub use mesh::{tessellate, SurfaceMesh};
pub use preset::SurfacePreset;
pub use source::SurfaceSource;

/// Default segments along each parameter.
pub const DEFAULT_RESOLUTION: u32 = 50;

/// Most segments accepted along either parameter.
pub const MAX_RESOLUTION: u32 = 2048;
