//! Terminal ray tracer
//!
//! This library renders a small scene of spheres, planes and oriented boxes lit by
//! directional lights into an RGB frame buffer, viewed through a yaw/pitch camera.
//! The terminal front end turns that buffer into 24-bit colored half-block cells.

pub mod math;
pub mod color;
pub mod ray;
pub mod light;
pub mod camera;
pub mod primitive;
pub mod scene;
pub mod framebuffer;
pub mod renderer;
pub mod controls;
pub mod config;
pub mod terminal;

pub use camera::{Basis, Camera, OrbitPath};
pub use color::Color;
pub use framebuffer::FrameBuffer;
pub use light::Light;
pub use primitive::{BoxShading, OrientedBox, Plane, Primitive, Sphere, Surface};
pub use ray::Ray;
pub use renderer::{RenderConfig, Renderer};
pub use scene::Scene;

/// Default field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 90.0;

/// Default Blinn-Phong exponent (higher is a smaller, sharper highlight)
pub const DEFAULT_SHININESS: f32 = 32.0;
