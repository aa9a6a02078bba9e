// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Software render backend producing SVG frames.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use glam::{Mat4, Vec2, Vec3};
use mathbench_surface::SurfaceMesh;
use tracing::{trace, warn};

use crate::backend::{ContainerId, GeometryId, MaterialId, RenderBackend, Size, SurfaceId};
use crate::camera::CameraState;
use crate::ledger::{LedgerEvent, Resource, ResourceLedger};
use crate::scene::{MaterialDesc, Rgb, Scene};

const AXIS_COLORS: [Rgb; 3] = [Rgb(255, 0, 0), Rgb(0, 255, 0), Rgb(0, 0, 255)];

#[derive(Debug)]
struct Canvas {
    size: Size,
    container: Option<ContainerId>,
    frame: Option<String>,
    frames: u64,
}

/// Renders meshes with flat Lambert shading and the painter's algorithm.
///
/// Each surface keeps only its latest frame. Every acquire, release, attach
/// and detach is written to a [`ResourceLedger`].
#[derive(Debug, Default)]
pub struct SvgBackend {
    next_id: u64,
    surfaces: BTreeMap<SurfaceId, Canvas>,
    geometries: BTreeMap<GeometryId, SurfaceMesh>,
    materials: BTreeMap<MaterialId, MaterialDesc>,
    ledger: ResourceLedger,
}

impl SvgBackend {
    /// Backend with a fresh ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend writing into an existing ledger.
    pub fn with_ledger(ledger: ResourceLedger) -> Self {
        Self {
            ledger,
            ..Self::default()
        }
    }

    /// Handle to the shared ledger.
    pub fn ledger(&self) -> ResourceLedger {
        self.ledger.clone()
    }

    /// Latest frame rendered into `surface`.
    pub fn frame(&self, surface: SurfaceId) -> Option<&str> {
        self.surfaces.get(&surface)?.frame.as_deref()
    }

    /// Frames rendered into `surface` so far.
    pub fn frames_rendered(&self, surface: SurfaceId) -> u64 {
        self.surfaces.get(&surface).map_or(0, |c| c.frames)
    }

    /// Container `surface` is attached to.
    pub fn container_of(&self, surface: SurfaceId) -> Option<&ContainerId> {
        self.surfaces.get(&surface)?.container.as_ref()
    }

    /// Number of live surfaces, geometries and materials.
    pub fn live_counts(&self) -> (usize, usize, usize) {
        (
            self.surfaces.len(),
            self.geometries.len(),
            self.materials.len(),
        )
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn released(&self, resource: Resource, found: bool) {
        if found {
            self.ledger.record(LedgerEvent::Released(resource));
        } else {
            warn!(?resource, "release of unknown resource");
            self.ledger.record(LedgerEvent::UnknownRelease(resource));
        }
    }
}

impl RenderBackend for SvgBackend {
    fn create_surface(&mut self, size: Size) -> SurfaceId {
        let id = SurfaceId(self.next_id());
        self.surfaces.insert(
            id,
            Canvas {
                size,
                container: None,
                frame: None,
                frames: 0,
            },
        );
        self.ledger.record(LedgerEvent::Acquired(Resource::Surface(id)));
        id
    }

    fn attach(&mut self, surface: SurfaceId, container: &ContainerId) {
        if let Some(canvas) = self.surfaces.get_mut(&surface) {
            canvas.container = Some(container.clone());
            self.ledger
                .record(LedgerEvent::Attached(surface, container.clone()));
        } else {
            warn!(%surface, %container, "attach of unknown surface");
        }
    }

    fn detach(&mut self, surface: SurfaceId, container: &ContainerId) {
        match self.surfaces.get_mut(&surface) {
            Some(canvas) if canvas.container.as_ref() == Some(container) => {
                canvas.container = None;
                self.ledger
                    .record(LedgerEvent::Detached(surface, container.clone()));
            }
            _ => warn!(%surface, %container, "detach of surface not attached there"),
        }
    }

    fn release_surface(&mut self, surface: SurfaceId) {
        let found = self.surfaces.remove(&surface).is_some();
        self.released(Resource::Surface(surface), found);
    }

    fn create_geometry(&mut self, mesh: SurfaceMesh) -> GeometryId {
        let id = GeometryId(self.next_id());
        self.geometries.insert(id, mesh);
        self.ledger.record(LedgerEvent::Acquired(Resource::Geometry(id)));
        id
    }

    fn dispose_geometry(&mut self, geometry: GeometryId) {
        let found = self.geometries.remove(&geometry).is_some();
        self.released(Resource::Geometry(geometry), found);
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialId {
        let id = MaterialId(self.next_id());
        self.materials.insert(id, *desc);
        self.ledger.record(LedgerEvent::Acquired(Resource::Material(id)));
        id
    }

    fn dispose_material(&mut self, material: MaterialId) {
        let found = self.materials.remove(&material).is_some();
        self.released(Resource::Material(material), found);
    }

    fn render(&mut self, surface: SurfaceId, scene: &Scene, camera: &CameraState) {
        let Some(canvas) = self.surfaces.get(&surface) else {
            warn!(%surface, "render into unknown surface");
            return;
        };
        let mesh = scene.geometry.and_then(|id| self.geometries.get(&id));
        let material = scene.material.and_then(|id| self.materials.get(&id));
        let drawable = mesh.zip(material);
        let result = draw(canvas.size, scene, camera, drawable);
        let Some(canvas) = self.surfaces.get_mut(&surface) else {
            return;
        };
        match result {
            Ok(svg) => {
                canvas.frame = Some(svg);
                canvas.frames += 1;
                trace!(%surface, frame = canvas.frames, "frame rendered");
            }
            Err(err) => warn!(%surface, %err, "failed to write frame"),
        }
    }
}

struct Face {
    points: [Vec2; 3],
    depth: f32,
    fill: Rgb,
}

fn draw(
    size: Size,
    scene: &Scene,
    camera: &CameraState,
    drawable: Option<(&SurfaceMesh, &MaterialDesc)>,
) -> Result<String, fmt::Error> {
    let view = camera.view();
    let view_proj = camera.view_proj(size.aspect());
    let screen = Vec2::new(size.width as f32, size.height as f32);

    let mut faces = Vec::new();
    if let Some((mesh, material)) = drawable {
        for tri in mesh.triangles() {
            let Some(fill) = shade(tri, material, scene, camera.position) else {
                continue;
            };
            let projected = [
                project(&view_proj, tri[0], camera.near, screen),
                project(&view_proj, tri[1], camera.near, screen),
                project(&view_proj, tri[2], camera.near, screen),
            ];
            let [Some(a), Some(b), Some(c)] = projected else {
                continue;
            };
            let depth = tri.iter().map(|p| view.transform_point3(*p).z).sum::<f32>() / 3.0;
            faces.push(Face {
                points: [a, b, c],
                depth,
                fill,
            });
        }
    }
    // View space looks down -z: most negative is farthest, drawn first.
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let (w, h) = (size.width, size.height);
    let mut svg = String::with_capacity(faces.len() * 96 + 512);
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(svg, r#"<rect width="{w}" height="{h}" fill="{}"/>"#, scene.background)?;

    let wireframe = drawable.is_some_and(|(_, m)| m.wireframe);
    for face in &faces {
        let [a, b, c] = face.points;
        let paint = if wireframe {
            format!(r#"fill="none" stroke="{}""#, face.fill)
        } else {
            format!(r#"fill="{}""#, face.fill)
        };
        writeln!(
            svg,
            r#"<polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" {paint}/>"#,
            a.x, a.y, b.x, b.y, c.x, c.y
        )?;
    }

    if let Some(len) = scene.axes {
        let origin = project(&view_proj, Vec3::ZERO, camera.near, screen);
        for (axis, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(AXIS_COLORS) {
            let tip = project(&view_proj, axis * len, camera.near, screen);
            if let (Some(o), Some(t)) = (origin, tip) {
                writeln!(
                    svg,
                    r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}"/>"#,
                    o.x, o.y, t.x, t.y
                )?;
            }
        }
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// World point to pixel coordinates; `None` when at or behind the near plane.
fn project(view_proj: &Mat4, p: Vec3, near: f32, screen: Vec2) -> Option<Vec2> {
    let clip = *view_proj * p.extend(1.0);
    if clip.w < near {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * screen.x,
        (1.0 - ndc.y) * 0.5 * screen.y,
    ))
}

/// Ambient plus directional Lambert term. `None` for degenerate or culled faces.
fn shade(tri: [Vec3; 3], material: &MaterialDesc, scene: &Scene, eye: Vec3) -> Option<Rgb> {
    let mut normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).try_normalize()?;
    let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
    if normal.dot(eye - centroid) < 0.0 {
        if !material.double_sided {
            return None;
        }
        normal = -normal;
    }
    let mut light = scene.ambient.to_unit();
    for dir in &scene.lights {
        let l = dir.position.normalize_or_zero();
        light += dir.color.to_unit() * dir.intensity * normal.dot(l).max(0.0);
    }
    Some(Rgb::from_unit(material.color.to_unit() * light))
}
