//! Yaw/pitch camera and its scripted orbit

use crate::math::{deg_to_rad, rad_to_deg, Vec3, WORLD_UP};
use serde::{Deserialize, Serialize};

/// Pitch limit in degrees; keeps forward away from world up
pub const PITCH_LIMIT: f32 = 89.9999;

/// Orthonormal camera frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Camera for viewing the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Left/right, wrapped into [0, 360)
    #[serde(rename = "yaw", default)]
    pub yaw_degrees: f32,
    /// Up/down, clamped to (-90, 90)
    #[serde(rename = "pitch", default)]
    pub pitch_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -60.0), 0.0, 0.0)
    }
}

impl Camera {
    pub fn new(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let mut camera = Self {
            position,
            yaw_degrees,
            pitch_degrees,
        };
        camera.normalize_orientation();
        camera
    }

    /// Clamp pitch and wrap yaw. Called after every orientation change.
    pub fn normalize_orientation(&mut self) {
        self.pitch_degrees = self.pitch_degrees.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let yaw = self.yaw_degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360
        self.yaw_degrees = if yaw >= 360.0 { 0.0 } else { yaw };
    }

    pub fn basis(&self) -> Basis {
        let yaw = deg_to_rad(self.yaw_degrees);
        let pitch = deg_to_rad(self.pitch_degrees);

        let forward = Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        let right = forward.cross(&WORLD_UP).normalize();
        let up = right.cross(&forward).normalize();

        Basis { forward, right, up }
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate by the given yaw/pitch deltas in degrees
    pub fn look(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw_degrees += d_yaw;
        self.pitch_degrees += d_pitch;
        self.normalize_orientation();
    }

    /// Turn to face `target` from the current position
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        let horizontal = to_target.x.hypot(to_target.z);

        self.yaw_degrees = rad_to_deg(to_target.x.atan2(to_target.z));
        self.pitch_degrees = rad_to_deg(to_target.y.atan2(horizontal));
        self.normalize_orientation();
    }

    /// Place the camera on a circle around `focal` and face it.
    ///
    /// `direction` components are -1, 0 or 1 and pick which axes move (and
    /// which way round); x and y follow the sine term, z the cosine term.
    pub fn orbit(
        &mut self,
        frame: usize,
        focal: Vec3,
        radius: f32,
        direction: Vec3,
        degrees_per_frame: f32,
    ) {
        let angle = frame as f32 * deg_to_rad(degrees_per_frame);
        let (sin, cos) = angle.sin_cos();

        self.position = Vec3::new(
            focal.x + direction.x * radius * sin,
            focal.y + direction.y * radius * sin,
            focal.z + direction.z * radius * cos,
        );
        self.look_at(focal);
    }
}

/// A scripted orbit, replayed one frame at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPath {
    #[serde(default = "Vec3::zeros")]
    pub focal_point: Vec3,
    pub radius: f32,
    /// Per-axis mask with components in {-1, 0, 1}
    pub direction: Vec3,
    pub degrees_per_frame: f32,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self {
            focal_point: Vec3::zeros(),
            radius: 60.0,
            direction: Vec3::new(1.0, 1.0, -1.0),
            degrees_per_frame: 2.0,
        }
    }
}

impl OrbitPath {
    pub fn apply(&self, camera: &mut Camera, frame: usize) {
        camera.orbit(
            frame,
            self.focal_point,
            self.radius,
            self.direction,
            self.degrees_per_frame,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_orthonormal(b: &Basis) {
        assert!((b.forward.norm() - 1.0).abs() < EPS);
        assert!((b.right.norm() - 1.0).abs() < EPS);
        assert!((b.up.norm() - 1.0).abs() < EPS);
        assert!(b.forward.dot(&b.right).abs() < EPS);
        assert!(b.forward.dot(&b.up).abs() < EPS);
        assert!(b.right.dot(&b.up).abs() < EPS);
    }

    #[test]
    fn test_basis_straight_ahead() {
        let basis = Camera::default().basis();
        assert!((basis.forward - Vec3::new(0.0, 0.0, 1.0)).norm() < EPS);
        assert!((basis.right - Vec3::new(-1.0, 0.0, 0.0)).norm() < EPS);
        assert!((basis.up - Vec3::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_basis_orthonormal_for_many_orientations() {
        for yaw in [0.0, 45.0, 137.0, 270.0, 359.0] {
            for pitch in [-89.0, -30.0, 0.0, 60.0, 89.9] {
                assert_orthonormal(&Camera::new(Vec3::zeros(), yaw, pitch).basis());
            }
        }
    }

    #[test]
    fn test_basis_at_pitch_limit_is_finite() {
        let camera = Camera::new(Vec3::zeros(), 10.0, 1000.0);
        assert_eq!(camera.pitch_degrees, PITCH_LIMIT);
        let b = camera.basis();
        assert!(b.right.iter().all(|c| c.is_finite()));
        assert!(b.up.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_yaw_wraps() {
        let mut camera = Camera::default();
        camera.look(-10.0, 0.0);
        assert!((camera.yaw_degrees - 350.0).abs() < EPS);
        camera.look(730.0, 0.0);
        assert!((camera.yaw_degrees - 0.0).abs() < EPS);
        camera.look(-1e-9, 0.0);
        assert!(camera.yaw_degrees >= 0.0 && camera.yaw_degrees < 360.0);
    }

    #[test]
    fn test_pitch_clamps() {
        let mut camera = Camera::default();
        camera.look(0.0, 200.0);
        assert_eq!(camera.pitch_degrees, PITCH_LIMIT);
        camera.look(0.0, -500.0);
        assert_eq!(camera.pitch_degrees, -PITCH_LIMIT);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut camera = Camera::new(Vec3::new(10.0, -5.0, 3.0), 0.0, 0.0);
        let target = Vec3::new(-2.0, 4.0, 20.0);
        camera.look_at(target);
        let expected = (target - camera.position).normalize();
        assert!((camera.basis().forward - expected).norm() < EPS);
    }

    #[test]
    fn test_orbit_frame_zero() {
        let mut camera = Camera::default();
        camera.orbit(0, Vec3::zeros(), 60.0, Vec3::new(1.0, 1.0, -1.0), 2.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, -60.0)).norm() < EPS);
        assert!(camera.yaw_degrees.abs() < EPS);
        assert!(camera.pitch_degrees.abs() < EPS);
    }

    #[test]
    fn test_orbit_always_faces_focal_point() {
        let focal = Vec3::new(1.0, 2.0, 3.0);
        let orbit = OrbitPath {
            focal_point: focal,
            radius: 60.0,
            direction: Vec3::new(1.0, 1.0, -1.0),
            degrees_per_frame: 7.0,
        };
        let mut camera = Camera::default();
        for frame in 1..40 {
            orbit.apply(&mut camera, frame);
            let to_focal = (focal - camera.position).normalize();
            let forward = camera.basis().forward;
            assert!(forward.dot(&to_focal) > 0.9999, "frame {frame}");
            assert!(camera.pitch_degrees.abs() <= PITCH_LIMIT);
            assert!((0.0..360.0).contains(&camera.yaw_degrees));
        }
    }

    #[test]
    fn test_orbit_closes() {
        let orbit = OrbitPath::default();
        let mut start = Camera::default();
        let mut end = Camera::default();
        orbit.apply(&mut start, 0);
        orbit.apply(&mut end, 180);
        assert!((start.position - end.position).norm() < 1e-2);
    }

    #[test]
    fn test_orbit_stays_on_radius_in_xz() {
        let mut camera = Camera::default();
        for frame in 0..10 {
            camera.orbit(frame, Vec3::zeros(), 30.0, Vec3::new(1.0, 0.0, 1.0), 11.0);
            let horizontal = camera.position.x.hypot(camera.position.z);
            assert!((horizontal - 30.0).abs() < 1e-3);
            assert_eq!(camera.position.y, 0.0);
        }
    }
}
