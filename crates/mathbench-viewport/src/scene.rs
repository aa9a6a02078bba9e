// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene description handed to the render backend.

use std::fmt;

use glam::Vec3;

use crate::backend::{GeometryId, MaterialId};

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Channels scaled to `[0, 1]`.
    pub fn to_unit(self) -> Vec3 {
        Vec3::new(
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }

    /// Quantize a `[0, 1]` colour, clamping out-of-range channels.
    pub fn from_unit(c: Vec3) -> Self {
        let q = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self(q(c.x), q(c.y), q(c.z))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Surface appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDesc {
    /// Diffuse colour.
    pub color: Rgb,
    /// Shade back faces as if they faced the camera.
    pub double_sided: bool,
    /// Draw triangle edges only.
    pub wireframe: bool,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            color: Rgb::from_hex(0x0088ff),
            double_sided: true,
            wireframe: false,
        }
    }
}

/// Light shining from `position` towards the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Where the light sits; only its direction matters.
    pub position: Vec3,
    /// Light colour.
    pub color: Rgb,
    /// Scale applied to the diffuse term.
    pub intensity: f32,
}

/// Everything drawn in one frame besides the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Clear colour.
    pub background: Rgb,
    /// Ambient light colour.
    pub ambient: Rgb,
    /// Directional lights.
    pub lights: Vec<DirectionalLight>,
    /// Length of the XYZ axes helper, if shown.
    pub axes: Option<f32>,
    /// Mesh to draw.
    pub geometry: Option<GeometryId>,
    /// Appearance of the mesh.
    pub material: Option<MaterialId>,
}

impl Scene {
    /// The viewer's standard lighting rig around a mesh.
    pub fn standard(geometry: GeometryId, material: MaterialId) -> Self {
        Self {
            background: Rgb::from_hex(0xf0f0f0),
            ambient: Rgb::from_hex(0x404040),
            lights: vec![
                DirectionalLight {
                    position: Vec3::ONE,
                    color: Rgb::from_hex(0xffffff),
                    intensity: 1.0,
                },
                DirectionalLight {
                    position: -Vec3::ONE,
                    color: Rgb::from_hex(0xffffff),
                    intensity: 0.5,
                },
            ],
            axes: Some(1.0),
            geometry: Some(geometry),
            material: Some(material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_display() {
        assert_eq!(Rgb::from_hex(0x0088ff).to_string(), "#0088ff");
        assert_eq!(Rgb::from_unit(Vec3::new(2.0, -1.0, 0.5)), Rgb(255, 0, 128));
    }
}
