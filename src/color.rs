//! 8-bit RGB pixels

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Maximum channel value, as a float for shading math
pub const RGB_MAX: f32 = 255.0;

/// An 8-bit RGB triple. Scene files write it as `[r, g, b]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert accumulated floating point channels to a pixel.
    ///
    /// Each channel is clamped to [0, 255] and truncated.
    pub fn from_radiance(radiance: Vector3<f32>) -> Self {
        let channel = |v: f32| v.clamp(0.0, RGB_MAX) as u8;
        Self::new(channel(radiance.x), channel(radiance.y), channel(radiance.z))
    }

    /// Channels as floats in [0, 255]
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Channels scaled to [0, 1], used as a light's per-channel intensity
    pub fn intensity(self) -> Vector3<f32> {
        self.to_vector() / RGB_MAX
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}
