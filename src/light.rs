use crate::color::Color;
use crate::math::{unit, GeometryError, Vec3};

/// Directional light at infinite distance
#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Unit vector pointing from the surface toward the light
    pub direction: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(direction: Vec3, color: Color) -> Result<Self, GeometryError> {
        Ok(Self {
            direction: unit(direction, "light direction")?,
            color,
        })
    }
}
