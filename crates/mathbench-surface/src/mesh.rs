// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grid tessellation of a parametric function.

use glam::{DVec3, Vec2, Vec3};
use tracing::debug;

use crate::error::SurfaceError;
use crate::function::ParametricFn;
use crate::MAX_RESOLUTION;

/// Parameter step for finite-difference tangents.
const EPS: f64 = 1e-5;

/// Indexed triangle mesh ready for a render backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Unit vertex normals (zero where the surface is degenerate).
    pub normals: Vec<Vec3>,
    /// Normalized `(u, v)` per vertex.
    pub uvs: Vec<Vec2>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangle corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Distance from the origin to the farthest vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}

/// Sample `func` on a `(slices + 1) x (stacks + 1)` grid and stitch two
/// triangles per cell.
///
/// Rows run along `v` and columns along `u`. Normals come from forward (or,
/// on the far edge, backward) differences of the function itself.
///
/// Both counts must lie in `1..=MAX_RESOLUTION`, and every vertex index must
/// fit in a `u32`.
pub fn tessellate<F>(func: &F, slices: u32, stacks: u32) -> Result<SurfaceMesh, SurfaceError>
where
    F: ParametricFn + ?Sized,
{
    let invalid = SurfaceError::InvalidResolution { slices, stacks };
    if !(1..=MAX_RESOLUTION).contains(&slices) || !(1..=MAX_RESOLUTION).contains(&stacks) {
        return Err(invalid);
    }
    let vertices = (slices + 1).checked_mul(stacks + 1).ok_or(invalid)? as usize;
    let mut mesh = SurfaceMesh {
        positions: Vec::with_capacity(vertices),
        normals: Vec::with_capacity(vertices),
        uvs: Vec::with_capacity(vertices),
        indices: Vec::with_capacity(6 * slices as usize * stacks as usize),
    };

    for i in 0..=stacks {
        let v = f64::from(i) / f64::from(stacks);
        for j in 0..=slices {
            let u = f64::from(j) / f64::from(slices);
            let p0 = sample(func, u, v)?;
            let pu = if u - EPS >= 0.0 {
                p0 - sample(func, u - EPS, v)?
            } else {
                sample(func, u + EPS, v)? - p0
            };
            let pv = if v - EPS >= 0.0 {
                p0 - sample(func, u, v - EPS)?
            } else {
                sample(func, u, v + EPS)? - p0
            };
            mesh.positions.push(p0.as_vec3());
            mesh.normals.push(pu.cross(pv).normalize_or_zero().as_vec3());
            mesh.uvs.push(Vec2::new(u as f32, v as f32));
        }
    }

    let stride = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * stride + j;
            let b = i * stride + j + 1;
            let c = (i + 1) * stride + j + 1;
            let d = (i + 1) * stride + j;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    debug!(
        slices,
        stacks,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "tessellated surface"
    );
    Ok(mesh)
}

fn sample<F>(func: &F, u: f64, v: f64) -> Result<DVec3, SurfaceError>
where
    F: ParametricFn + ?Sized,
{
    let p = func.point(u, v)?;
    if p.is_finite() {
        Ok(p)
    } else {
        Err(SurfaceError::non_finite(u, v))
    }
}
