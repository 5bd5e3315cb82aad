//! CPU ray tracer renderer
//!
//! One primary ray per pixel, brute-force nearest hit over every primitive, then
//! Lambertian diffuse plus Blinn-Phong specular summed over every light. No
//! ambient term, no shadows, no secondary rays.

use crate::camera::{Basis, Camera};
use crate::color::{Color, RGB_MAX};
use crate::framebuffer::FrameBuffer;
use crate::math::{deg_to_rad, Vec3};
use crate::primitive::{Primitive, Surface};
use crate::ray::Ray;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Engine-wide render settings, passed explicitly to each [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fov_degrees: f32,
    pub shininess: f32,
    /// Width/height ratio of one sample cell on the display
    pub sample_aspect: f32,
    /// Color of pixels whose ray hits nothing
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: crate::DEFAULT_FOV_DEGREES,
            shininess: crate::DEFAULT_SHININESS,
            sample_aspect: 1.0,
            background: Color::BLACK,
        }
    }
}

/// Nearest intersection along a ray
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub t: f32,
    pub point: Vec3,
    pub primitive: &'a Primitive,
}

/// Image plane for one pass, one unit in front of the camera
struct Viewport {
    origin: Vec3,
    basis: Basis,
    plane_width: f32,
    plane_height: f32,
    width: usize,
    height: usize,
}

impl Viewport {
    fn new(camera: &Camera, config: &RenderConfig, width: usize, height: usize) -> Self {
        let aspect = (width as f32 / height as f32) * config.sample_aspect;
        let plane_height = 2.0 * (deg_to_rad(config.fov_degrees) / 2.0).tan();

        Self {
            origin: camera.position,
            basis: camera.basis(),
            plane_width: plane_height * aspect,
            plane_height,
            width,
            height,
        }
    }

    fn ray(&self, row: usize, col: usize) -> Ray {
        // x is negated so the image is not mirrored left/right
        let x = -((col as f32 + 0.5) / self.width as f32 - 0.5) * self.plane_width;
        let y = ((row as f32 + 0.5) / self.height as f32 - 0.5) * self.plane_height;

        let Basis { forward, right, up } = self.basis;
        let on_plane = self.origin + forward + right * x + up * y;
        Ray::new(self.origin, on_plane - self.origin)
    }
}

/// Stateless between frames; all state lives in the caller's scene, camera and buffer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Ray through the center of sample (row, col) of a `width` x `height` grid
    pub fn primary_ray(&self, camera: &Camera, width: usize, height: usize, row: usize, col: usize) -> Ray {
        Viewport::new(camera, &self.config, width, height).ray(row, col)
    }

    /// Fully overwrite `frame` with the scene as seen from `camera`
    pub fn render(&self, camera: &Camera, scene: &Scene, frame: &mut FrameBuffer) {
        let (width, height) = (frame.width(), frame.height());
        frame.clear(self.config.background);
        if width == 0 || height == 0 {
            return;
        }

        let start = Instant::now();
        let viewport = Viewport::new(camera, &self.config, width, height);
        let mut hits = 0usize;

        for (row, pixels) in frame.rows_mut().enumerate() {
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let ray = viewport.ray(row, col);
                if let Some(hit) = self.nearest_hit(&ray, scene) {
                    *pixel = self.shade(&hit, &ray, scene);
                    hits += 1;
                }
            }
        }

        tracing::trace!(
            width,
            height,
            hits,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Rendered frame"
        );
    }

    /// Render into a freshly allocated buffer
    pub fn render_frame(&self, camera: &Camera, scene: &Scene, width: usize, height: usize) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height);
        self.render(camera, scene, &mut frame);
        frame
    }

    /// Closest primitive along `ray`; ties go to the earlier primitive
    pub fn nearest_hit<'a>(&self, ray: &Ray, scene: &'a Scene) -> Option<Hit<'a>> {
        let mut closest: Option<(f32, &Primitive)> = None;

        for primitive in &scene.primitives {
            if let Some(t) = primitive.intersect(ray) {
                if closest.map_or(true, |(best, _)| t < best) {
                    closest = Some((t, primitive));
                }
            }
        }

        closest.map(|(t, primitive)| Hit {
            t,
            point: ray.at(t),
            primitive,
        })
    }

    /// Sum diffuse and specular light from every light at `hit`
    pub fn shade(&self, hit: &Hit<'_>, ray: &Ray, scene: &Scene) -> Color {
        let normal = hit.primitive.normal_at(hit.point);
        let view = (ray.origin - hit.point).normalize();
        let surface = hit.primitive.color().to_vector();

        let mut total = Vec3::zeros();
        for light in &scene.lights {
            let intensity = light.color.intensity();

            let diffuse = normal.dot(&light.direction).max(0.0);

            // L == -V has no half vector; that direction gets no highlight
            let specular = (light.direction + view)
                .try_normalize(f32::EPSILON)
                .map_or(0.0, |half| normal.dot(&half).max(0.0).powf(self.config.shininess));

            total += surface.component_mul(&intensity) * diffuse;
            total += intensity * (RGB_MAX * specular);
        }

        Color::from_radiance(total)
    }
}
