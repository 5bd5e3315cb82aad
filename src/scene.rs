//! Scene definitions

use crate::light::Light;
use crate::primitive::Primitive;

/// Primitives and lights, in insertion order.
///
/// Order only matters as the tie-break when two primitives report the same
/// hit distance: the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) -> &mut Self {
        self.primitives.push(primitive.into());
        self
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }
}
