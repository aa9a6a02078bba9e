// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Orbit controls with inertia.

use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::CameraState;

/// Keeps the polar angle away from the poles.
const POLAR_EPS: f32 = 1e-6;
/// Motion below this is considered settled.
const SETTLE_EPS: f32 = 1e-6;

/// Damping factor used by the surface viewer.
pub const DEFAULT_DAMPING: f32 = 0.05;

/// Orbits a camera around its target.
///
/// Input methods accumulate a pending delta; [`update`](Self::update) applies
/// it once per frame. With damping enabled only a `damping_factor` share of
/// the delta is applied each frame and the remainder decays by
/// `1 - damping_factor`, so motion eases out over subsequent frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitControls {
    /// Apply inertia.
    pub enable_damping: bool,
    /// Share of the pending delta applied per frame.
    pub damping_factor: f32,
    /// Closest allowed camera distance.
    pub min_distance: f32,
    /// Farthest allowed camera distance.
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING)
    }
}

impl OrbitControls {
    /// Controls with the given damping factor; `0` disables inertia.
    pub fn new(damping_factor: f32) -> Self {
        Self {
            enable_damping: damping_factor > 0.0,
            damping_factor: damping_factor.clamp(0.0, 1.0),
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan: Vec3::ZERO,
        }
    }

    /// Queue a rotation: `d_theta` around the up axis, `d_phi` towards the pole.
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.delta_theta -= d_theta;
        self.delta_phi -= d_phi;
    }

    /// Queue a dolly; `scale > 1` moves away from the target.
    pub fn zoom(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale *= scale;
        }
    }

    /// Queue a pan in camera-space units along right (`dx`) and up (`dy`).
    pub fn pan(&mut self, camera: &CameraState, dx: f32, dy: f32) {
        let forward = (camera.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        self.pan += right * dx + up * dy;
    }

    /// Whether any motion is still pending.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > SETTLE_EPS
            || self.delta_phi.abs() > SETTLE_EPS
            || (self.scale - 1.0).abs() > SETTLE_EPS
            || self.pan.length_squared() > SETTLE_EPS * SETTLE_EPS
    }

    /// Advance one frame. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut CameraState) -> bool {
        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.delta_theta * share;
        phi = (phi + self.delta_phi * share).clamp(POLAR_EPS, PI - POLAR_EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        let target = camera.target + self.pan * share;

        let sin_phi = phi.sin();
        let position = target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = position.distance_squared(camera.position) > SETTLE_EPS * SETTLE_EPS
            || target.distance_squared(camera.target) > SETTLE_EPS * SETTLE_EPS;
        camera.position = position;
        camera.target = target;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn idle_controls_leave_the_camera_alone() {
        let mut cam = CameraState::default();
        let mut controls = OrbitControls::default();
        assert!(!controls.update(&mut cam));
        assert_relative_eq!(cam.position.z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut cam = CameraState::default();
        let mut controls = OrbitControls::new(0.0);
        controls.rotate(-PI / 2.0, 0.0);
        assert!(controls.update(&mut cam));
        assert_relative_eq!(cam.position.x, 3.0, epsilon = 1e-4);
        assert_relative_eq!(cam.position.z, 0.0, epsilon = 1e-4);
        assert!(!controls.is_moving());
    }

    #[test]
    fn damped_rotation_eases_out() {
        let mut cam = CameraState::default();
        let mut controls = OrbitControls::default();
        controls.rotate(-1.0, 0.0);

        let mut steps = Vec::new();
        for _ in 0..3 {
            let before = cam.position;
            controls.update(&mut cam);
            steps.push(before.distance(cam.position));
        }
        assert!(steps[0] > steps[1] && steps[1] > steps[2]);
        assert!(controls.is_moving());

        for _ in 0..600 {
            controls.update(&mut cam);
        }
        assert!(!controls.is_moving());
        assert_relative_eq!(cam.distance(), 3.0, epsilon = 1e-3);
    }

    #[test]
    fn polar_angle_and_distance_are_clamped() {
        let mut cam = CameraState::default();
        let mut controls = OrbitControls::new(0.0);
        controls.min_distance = 1.0;
        controls.max_distance = 4.0;

        controls.rotate(0.0, 10.0);
        controls.zoom(100.0);
        controls.update(&mut cam);
        assert!(cam.position.y > 0.0);
        assert!(cam.position.y <= 4.0 + 1e-4);
        assert_relative_eq!(cam.distance(), 4.0, epsilon = 1e-4);

        controls.zoom(0.01);
        controls.update(&mut cam);
        assert_relative_eq!(cam.distance(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = CameraState::default();
        let mut controls = OrbitControls::new(0.0);
        controls.pan(&cam, 1.0, 0.0);
        controls.update(&mut cam);
        assert_relative_eq!(cam.target.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(cam.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(cam.distance(), 3.0, epsilon = 1e-5);
    }
}
