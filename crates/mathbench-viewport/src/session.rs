// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One live binding between a container and a render context.

use mathbench_surface::SurfaceMesh;
use tracing::debug;

use crate::backend::{ContainerId, GeometryId, MaterialId, RenderBackend, Size, SurfaceId};
use crate::camera::CameraState;
use crate::controls::OrbitControls;
use crate::scene::{MaterialDesc, Scene};

/// Resources held for one container between acquire and teardown.
#[derive(Debug)]
pub struct ViewportSession {
    generation: u64,
    container: ContainerId,
    size: Size,
    surface: SurfaceId,
    geometry: GeometryId,
    material: MaterialId,
    scene: Scene,
    camera: CameraState,
    controls: OrbitControls,
    frames: u64,
}

impl ViewportSession {
    /// Acquire every resource and attach the surface to `container`.
    ///
    /// Order: surface, geometry, material, scene and camera, controls, then
    /// attach. The mesh is built by the caller so a bad surface never leaves
    /// half-acquired resources behind.
    pub fn acquire<B: RenderBackend + ?Sized>(
        backend: &mut B,
        container: ContainerId,
        size: Size,
        mesh: SurfaceMesh,
        damping: f32,
        generation: u64,
    ) -> Self {
        let surface = backend.create_surface(size);
        let geometry = backend.create_geometry(mesh);
        let material = backend.create_material(&MaterialDesc::default());
        let scene = Scene::standard(geometry, material);
        let camera = CameraState::default();
        let controls = OrbitControls::new(damping);
        backend.attach(surface, &container);
        debug!(generation, %container, %size, %surface, "viewport session acquired");
        Self {
            generation,
            container,
            size,
            surface,
            geometry,
            material,
            scene,
            camera,
            controls,
            frames: 0,
        }
    }

    /// Advance inertia and draw one frame.
    pub fn frame<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        self.controls.update(&mut self.camera);
        backend.render(self.surface, &self.scene, &self.camera);
        self.frames += 1;
    }

    /// Detach, release the surface, then the geometry, then the material.
    pub fn teardown<B: RenderBackend + ?Sized>(self, backend: &mut B) {
        backend.detach(self.surface, &self.container);
        backend.release_surface(self.surface);
        backend.dispose_geometry(self.geometry);
        backend.dispose_material(self.material);
        debug!(
            generation = self.generation,
            container = %self.container,
            frames = self.frames,
            "viewport session torn down"
        );
    }

    /// Generation this session was acquired for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Container the surface is attached to.
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Render surface handle.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current camera.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Orbit controls for queuing user input.
    pub fn controls_mut(&mut self) -> (&mut OrbitControls, &CameraState) {
        (&mut self.controls, &self.camera)
    }
}
