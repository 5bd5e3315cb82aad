//! Ray-traceable surfaces: spheres, infinite planes and oriented boxes

use crate::color::Color;
use crate::math::{unit, GeometryError, Vec3};
use crate::ray::Ray;
use serde::{Deserialize, Serialize};

/// Rays closer than this to parallel with a plane count as a miss
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Largest |cos| between two box axes still treated as perpendicular
pub const ORTHOGONAL_TOLERANCE: f32 = 1e-4;

/// Capability set shared by every primitive
pub trait Surface {
    /// Distance along `ray` to the first hit in front of its origin
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Unit normal at a point on the surface, pointing away from the interior
    fn normal_at(&self, point: Vec3) -> Vec3;

    fn color(&self) -> Color;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Color) -> Self {
        Self { center, radius, color }
    }
}

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Only the near root: an origin inside the sphere gives t <= 0
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        (t > 0.0).then_some(t)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Infinite plane through `point`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    pub color: Color,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, color: Color) -> Result<Self, GeometryError> {
        Ok(Self {
            point,
            normal: unit(normal, "plane normal")?,
            color,
        })
    }
}

impl Surface for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(&self.normal) / denom;
        (t > 0.0).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// How an [`OrientedBox`] reports its surface normal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxShading {
    /// Smoothly varying normal from the hit point's scaled local coordinates
    #[default]
    Gradient,
    /// One flat normal per face
    Faceted,
}

/// Box with arbitrary orthonormal axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub axes: [Vec3; 3],
    pub half_extents: [f32; 3],
    pub color: Color,
    pub shading: BoxShading,
}

impl OrientedBox {
    /// `axes` must be mutually orthogonal unit vectors
    pub fn new(center: Vec3, axes: [Vec3; 3], half_extents: [f32; 3], color: Color) -> Self {
        Self {
            center,
            axes,
            half_extents,
            color,
            shading: BoxShading::default(),
        }
    }

    /// Build from three full-length edge vectors through the center.
    ///
    /// The edges are not checked for orthogonality; see [`OrientedBox::axis_skew`].
    pub fn from_edges(center: Vec3, edges: [Vec3; 3], color: Color) -> Result<Self, GeometryError> {
        let mut axes = [Vec3::zeros(); 3];
        let mut half_extents = [0.0; 3];
        for (i, edge) in edges.iter().enumerate() {
            axes[i] = unit(*edge, "box edge")?;
            half_extents[i] = edge.norm() / 2.0;
        }
        Ok(Self::new(center, axes, half_extents, color))
    }

    pub fn with_shading(mut self, shading: BoxShading) -> Self {
        self.shading = shading;
        self
    }

    /// Largest |dot| between any two axes; 0 for a true box
    pub fn axis_skew(&self) -> f32 {
        let [u, v, w] = self.axes;
        u.dot(&v).abs().max(u.dot(&w).abs()).max(v.dot(&w).abs())
    }

    fn local(&self, point: Vec3) -> [f32; 3] {
        let d = point - self.center;
        [d.dot(&self.axes[0]), d.dot(&self.axes[1]), d.dot(&self.axes[2])]
    }
}

/// Entry/exit distances through one slab, ordered so min <= max
fn slab(half: f32, origin: f32, direction: f32) -> (f32, f32) {
    let near = (-half - origin) / direction;
    let far = (half - origin) / direction;
    if far < near {
        (far, near)
    } else {
        (near, far)
    }
}

impl Surface for OrientedBox {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let offset = ray.origin - self.center;

        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        for (axis, half) in self.axes.iter().zip(self.half_extents) {
            let (near, far) = slab(half, offset.dot(axis), ray.direction.dot(axis));
            entry = entry.max(near);
            exit = exit.min(far);
        }

        if entry <= exit && exit > 0.0 {
            // Origin inside the box: report the exit face
            Some(if entry >= 0.0 { entry } else { exit })
        } else {
            None
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let p = self.local(point);
        let [u, v, w] = self.axes;
        let [hu, hv, hw] = self.half_extents;

        match self.shading {
            BoxShading::Gradient => (u * (p[0] * hu) + v * (p[1] * hv) + w * (p[2] * hw)).normalize(),
            BoxShading::Faceted => {
                let scaled = [(p[0] / hu).abs(), (p[1] / hv).abs(), (p[2] / hw).abs()];
                let face = if scaled[0] >= scaled[1] && scaled[0] >= scaled[2] {
                    0
                } else if scaled[1] >= scaled[2] {
                    1
                } else {
                    2
                };
                self.axes[face] * p[face].signum()
            }
        }
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// Any primitive a scene can hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Box(OrientedBox),
}

impl Surface for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Primitive::Sphere(s) => s.intersect(ray),
            Primitive::Plane(p) => p.intersect(ray),
            Primitive::Box(b) => b.intersect(ray),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Primitive::Sphere(s) => s.normal_at(point),
            Primitive::Plane(p) => p.normal_at(point),
            Primitive::Box(b) => b.normal_at(point),
        }
    }

    fn color(&self) -> Color {
        match self {
            Primitive::Sphere(s) => s.color,
            Primitive::Plane(p) => p.color,
            Primitive::Box(b) => b.color,
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

impl From<OrientedBox> for Primitive {
    fn from(b: OrientedBox) -> Self {
        Primitive::Box(b)
    }
}
