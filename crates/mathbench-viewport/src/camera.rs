// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Perspective camera state.

use glam::{Mat4, Vec3};

/// Perspective camera looking at a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Camera position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y_radians: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_radians: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraState {
    /// World-to-view transform.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// View-to-clip transform for the given aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, aspect.max(0.1), self.near, self.far)
    }

    /// Combined world-to-clip transform.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Distance from the camera to its target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn target_projects_to_screen_centre() {
        let cam = CameraState::default();
        let clip = cam.view_proj(1.0) * cam.target.extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        assert!(clip.w > 0.0);
    }

    #[test]
    fn points_above_target_project_upwards() {
        let cam = CameraState::default();
        let clip = cam.view_proj(1.0) * Vec3::new(0.0, 0.5, 0.0).extend(1.0);
        assert!(clip.y / clip.w > 0.0);
    }
}
