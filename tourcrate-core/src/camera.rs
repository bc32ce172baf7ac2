//! Camera pose and projection

use nalgebra::{Isometry3, Matrix4, Perspective3, Translation3, UnitQuaternion};

use crate::point::Point3f;
use crate::pose::PoseStore;

/// Rigid-body camera pose in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3f,
    pub orientation: UnitQuaternion<f32>,
}

impl CameraState {
    pub fn new(position: Point3f, orientation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Camera placed exactly on a stored pose, facing the look target
    pub fn at_pose(store: &PoseStore, index: usize) -> Option<Self> {
        let pose = store.pose(index)?;
        let orientation = store.orientation(index)?;
        Some(Self::new(pose.position, orientation))
    }

    /// Blend two poses at parameter `t` in [0, 1].
    ///
    /// Position moves along the straight line between the two camera centers.
    /// Orientation follows the shortest arc at constant angular velocity.
    pub fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        let position = Point3f::from(from.position.coords.lerp(&to.position.coords, t));

        // q and -q are the same rotation; pick the one in the same hemisphere
        let mut target = to.orientation.into_inner();
        if from.orientation.coords.dot(&target.coords) < 0.0 {
            target = -target;
        }
        let target = UnitQuaternion::new_unchecked(target);
        let orientation = from
            .orientation
            .try_slerp(&target, t, f32::EPSILON)
            .unwrap_or(target);

        Self::new(position, orientation)
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
            .inverse()
            .to_homogeneous()
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(Point3f::origin(), UnitQuaternion::identity())
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_deg: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Recompute the aspect ratio for a new surface size; zero-sized surfaces are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(
            self.aspect_ratio,
            self.fov_deg.to_radians(),
            self.near,
            self.far,
        );
        perspective.into_inner()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Vector3f;
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolate_endpoints() {
        let a = CameraState::new(
            Point3f::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_euler_angles(0.0, 0.3, 0.0),
        );
        let b = CameraState::new(
            Point3f::new(-4.0, 0.5, 9.0),
            UnitQuaternion::from_euler_angles(0.1, -1.2, 0.4),
        );

        let start = CameraState::interpolate(&a, &b, 0.0);
        assert_eq!(start.position, a.position);
        assert_relative_eq!(start.orientation, a.orientation, epsilon = 1e-6);

        let end = CameraState::interpolate(&a, &b, 1.0);
        assert_relative_eq!(end.position, b.position, epsilon = 1e-6);
        assert_relative_eq!(end.orientation.angle_to(&b.orientation), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_has_constant_angular_speed() {
        let a = CameraState::new(Point3f::origin(), UnitQuaternion::identity());
        let b = CameraState::new(
            Point3f::new(10.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), 1.5),
        );

        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let mid = CameraState::interpolate(&a, &b, t);
            assert_relative_eq!(mid.orientation.angle(), 1.5 * t, epsilon = 1e-4);
            assert_relative_eq!(mid.position.x, 10.0 * t, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_interpolate_takes_shortest_arc() {
        let a = CameraState::new(Point3f::origin(), UnitQuaternion::identity());
        let q = UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), 0.5);
        // Same rotation with the opposite sign
        let flipped = UnitQuaternion::new_unchecked(-q.into_inner());
        let b = CameraState::new(Point3f::origin(), flipped);

        let mid = CameraState::interpolate(&a, &b, 0.5);
        assert_relative_eq!(mid.orientation.angle(), 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_view_matrix_maps_camera_to_origin() {
        let camera = CameraState::new(
            Point3f::new(0.0, 1.0, 5.0),
            UnitQuaternion::from_axis_angle(&Vector3f::y_axis(), 0.7),
        );
        let eye = camera.view_matrix().transform_point(&camera.position);
        assert_relative_eq!(eye, Point3f::origin(), epsilon = 1e-5);
    }

    #[test]
    fn test_projection_viewport() {
        let mut projection = Projection::default();
        projection.set_viewport(800, 400);
        assert_relative_eq!(projection.aspect_ratio, 2.0);

        projection.set_viewport(0, 400);
        assert_relative_eq!(projection.aspect_ratio, 2.0);
    }
}
