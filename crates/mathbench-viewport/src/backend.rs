// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render backend port.

use std::fmt;

use mathbench_surface::SurfaceMesh;

use crate::camera::CameraState;
use crate::scene::{MaterialDesc, Scene};

macro_rules! handle {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// A render surface (canvas) owned by the backend.
    SurfaceId,
    "surface"
);
handle!(
    /// Uploaded mesh data.
    GeometryId,
    "geometry"
);
handle!(
    /// Uploaded material.
    MaterialId,
    "material"
);

/// The place a surface's output is shown.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    /// Container named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The container's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel dimensions of a render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// `width x height`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height (1 for a zero height).
    pub fn aspect(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(500, 500)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rendering capability used by the viewport.
///
/// Every `create_*` has a matching release; the viewport calls each release
/// exactly once per handle. Backends do not own time: frames are rendered
/// only when [`render`](Self::render) is called.
pub trait RenderBackend {
    /// Acquire a render surface of the given size.
    fn create_surface(&mut self, size: Size) -> SurfaceId;
    /// Show the surface output in `container`.
    fn attach(&mut self, surface: SurfaceId, container: &ContainerId);
    /// Remove the surface output from `container`.
    fn detach(&mut self, surface: SurfaceId, container: &ContainerId);
    /// Release the render surface.
    fn release_surface(&mut self, surface: SurfaceId);
    /// Upload a mesh.
    fn create_geometry(&mut self, mesh: SurfaceMesh) -> GeometryId;
    /// Free a mesh.
    fn dispose_geometry(&mut self, geometry: GeometryId);
    /// Upload a material.
    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialId;
    /// Free a material.
    fn dispose_material(&mut self, material: MaterialId);
    /// Draw `scene` from `camera` into `surface`.
    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &CameraState);
}
