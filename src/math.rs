//! Vector helpers on top of nalgebra

use nalgebra::Vector3;

/// 3-component float vector used for points, directions and accumulated color
pub type Vec3 = Vector3<f32>;

/// Fixed world up axis used to build the camera basis
pub const WORLD_UP: Vec3 = Vector3::new(0.0, 1.0, 0.0);

/// Vectors shorter than this cannot be turned into a direction
const MIN_NORM: f32 = 1e-12;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("{0} must be a non-zero, finite vector")]
    Degenerate(&'static str),
}

/// Normalize `v`, failing instead of producing NaN components.
///
/// `what` names the vector in the error (e.g. "light direction").
pub fn unit(v: Vec3, what: &'static str) -> Result<Vec3, GeometryError> {
    if !v.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::Degenerate(what));
    }
    v.try_normalize(MIN_NORM).ok_or(GeometryError::Degenerate(what))
}

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f32) -> f32 {
    radians.to_degrees()
}
