use crate::math::Vec3;

/// A half-line with a unit-length direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// `direction` must be non-zero; use [`crate::math::unit`] first when it
    /// comes from untrusted input.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
