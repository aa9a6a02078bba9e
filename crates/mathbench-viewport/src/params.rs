// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tracked viewport parameters.

use mathbench_surface::{SurfaceSource, DEFAULT_RESOLUTION};

use crate::backend::Size;

/// Tessellation grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Segments along u.
    pub slices: u32,
    /// Segments along v.
    pub stacks: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            slices: DEFAULT_RESOLUTION,
            stacks: DEFAULT_RESOLUTION,
        }
    }
}

/// Parameters whose change rebuilds the session.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ViewportParams {
    /// Render surface size.
    pub size: Size,
    /// Generating function.
    pub source: SurfaceSource,
    /// Tessellation grid.
    pub resolution: Resolution,
}

impl ViewportParams {
    /// Params for `source` with default size and resolution.
    pub fn new(source: impl Into<SurfaceSource>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Replace the size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Replace the resolution.
    pub fn with_resolution(mut self, slices: u32, stacks: u32) -> Self {
        self.resolution = Resolution { slices, stacks };
        self
    }
}
