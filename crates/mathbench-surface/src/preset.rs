// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in surfaces offered by the surface panel.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::error::SurfaceError;
use crate::function::ParametricFn;

/// Named parametric surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfacePreset {
    /// Unit sphere, `u` and `v` both scaled to a full turn.
    #[default]
    Sphere,
    /// Ring torus with major radius 1 and minor radius 0.4.
    Torus,
    /// Möbius strip of width 1.
    Mobius,
    /// One turn of a helicoid.
    Helicoid,
    /// Klein bottle immersion, scaled to fit the default camera.
    KleinBottle,
}

impl SurfacePreset {
    /// Every preset in menu order.
    pub const ALL: [Self; 5] = [
        Self::Sphere,
        Self::Torus,
        Self::Mobius,
        Self::Helicoid,
        Self::KleinBottle,
    ];

    /// Stable identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Torus => "torus",
            Self::Mobius => "mobius",
            Self::Helicoid => "helicoid",
            Self::KleinBottle => "klein",
        }
    }

    /// Human label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "Sphere",
            Self::Torus => "Torus",
            Self::Mobius => "Möbius Strip",
            Self::Helicoid => "Helicoid",
            Self::KleinBottle => "Klein Bottle",
        }
    }

    /// Coordinate formulas shown next to the viewer.
    pub fn formulas(self) -> [&'static str; 3] {
        match self {
            Self::Sphere => ["sin(u)cos(v)", "sin(u)sin(v)", "cos(u)"],
            Self::Torus => [
                "(1 + 0.4cos(v))cos(u)",
                "(1 + 0.4cos(v))sin(u)",
                "0.4sin(v)",
            ],
            Self::Mobius => [
                "(1 + w/2 cos(u/2))cos(u)",
                "(1 + w/2 cos(u/2))sin(u)",
                "w/2 sin(u/2)",
            ],
            Self::Helicoid => ["r cos(t)", "r sin(t)", "0.2t"],
            Self::KleinBottle => ["piecewise", "piecewise", "piecewise"],
        }
    }
}

impl fmt::Display for SurfacePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SurfacePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "torus" => Ok(Self::Torus),
            "mobius" | "möbius" => Ok(Self::Mobius),
            "helicoid" => Ok(Self::Helicoid),
            "klein" | "klein-bottle" => Ok(Self::KleinBottle),
            other => Err(format!("unknown surface preset {other:?}")),
        }
    }
}

impl ParametricFn for SurfacePreset {
    fn point(&self, u: f64, v: f64) -> Result<DVec3, SurfaceError> {
        Ok(match self {
            Self::Sphere => {
                let (u, v) = (u * TAU, v * TAU);
                DVec3::new(u.sin() * v.cos(), u.sin() * v.sin(), u.cos())
            }
            Self::Torus => {
                let (u, v) = (u * TAU, v * TAU);
                let ring = 1.0 + 0.4 * v.cos();
                DVec3::new(ring * u.cos(), ring * u.sin(), 0.4 * v.sin())
            }
            Self::Mobius => {
                let u = u * TAU;
                let w = v - 0.5;
                let ring = 1.0 + 0.5 * w * (u / 2.0).cos();
                DVec3::new(ring * u.cos(), ring * u.sin(), 0.5 * w * (u / 2.0).sin())
            }
            Self::Helicoid => {
                let r = 2.0 * u - 1.0;
                let t = (2.0 * v - 1.0) * PI;
                DVec3::new(r * t.cos(), r * t.sin(), 0.2 * t)
            }
            Self::KleinBottle => klein(u, v) * 0.1,
        })
    }
}

fn klein(u: f64, v: f64) -> DVec3 {
    let u = u * TAU;
    let v = v * TAU;
    let tube = 2.0 * (1.0 - u.cos() / 2.0);
    let (x, z) = if u < PI {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + tube * u.cos() * v.cos(),
            -8.0 * u.sin() - tube * u.sin() * v.cos(),
        )
    } else {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + tube * (v + PI).cos(),
            -8.0 * u.sin(),
        )
    };
    DVec3::new(x, -tube * v.sin(), z)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for preset in SurfacePreset::ALL {
            assert_eq!(preset.name().parse::<SurfacePreset>().unwrap(), preset);
        }
        assert!("cube".parse::<SurfacePreset>().is_err());
    }

    #[test]
    fn sphere_matches_the_default_parameterization() {
        let p = SurfacePreset::Sphere.point(0.125, 0.0).unwrap();
        let s = (TAU * 0.125).sin();
        assert!((p - DVec3::new(s, 0.0, (TAU * 0.125).cos())).length() < 1e-12);
    }

    #[test]
    fn mobius_seam_is_twisted() {
        let start = SurfacePreset::Mobius.point(0.0, 0.0).unwrap();
        let end = SurfacePreset::Mobius.point(1.0, 1.0).unwrap();
        assert!((start - end).length() < 1e-9);
    }
}
