//! YAML scene files
//!
//! ```yaml
//! camera:
//!   position: [0, 0, -60]
//!   yaw: 0
//!   pitch: 0
//! orbit:
//!   focal_point: [0, 0, 0]
//!   radius: 60
//!   direction: [1, 1, -1]
//!   degrees_per_frame: 2
//! render:
//!   fov_degrees: 90
//!   shininess: 32
//! primitives:
//!   - type: sphere
//!     center: [0, 0, 0]
//!     radius: 25
//!     color: [255, 255, 255]
//!   - type: box
//!     center: [0, 10, 0]
//!     edges: [[20, 0, 0], [0, 40, 0], [0, 0, 30]]
//!     color: [255, 255, 255]
//!     shading: faceted
//! lights:
//!   - direction: [1, 4, -1]
//!     color: [100, 100, 100]
//! ```

use crate::camera::{Camera, OrbitPath};
use crate::color::Color;
use crate::light::Light;
use crate::math::{GeometryError, Vec3};
use crate::primitive::{BoxShading, OrientedBox, Plane, Primitive, Sphere, ORTHOGONAL_TOLERANCE};
use crate::renderer::RenderConfig;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Scene file not found: {0}")]
    NotFound(String),

    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Scene validation error: {0}")]
    Validation(String),
}

/// A primitive as written in a scene file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveSpec {
    Sphere {
        center: Vec3,
        radius: f32,
        color: Color,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
        color: Color,
    },
    /// Three full-length edge vectors through the center
    Box {
        center: Vec3,
        edges: [Vec3; 3],
        color: Color,
        #[serde(default)]
        shading: BoxShading,
    },
}

impl PrimitiveSpec {
    fn build(&self) -> Result<Primitive, ConfigError> {
        Ok(match self {
            PrimitiveSpec::Sphere { center, radius, color } => {
                if !(*radius > 0.0) {
                    return Err(ConfigError::Validation(format!(
                        "sphere radius must be positive, got {radius}"
                    )));
                }
                Sphere::new(*center, *radius, *color).into()
            }
            PrimitiveSpec::Plane { point, normal, color } => Plane::new(*point, *normal, *color)?.into(),
            PrimitiveSpec::Box {
                center,
                edges,
                color,
                shading,
            } => {
                let cuboid = OrientedBox::from_edges(*center, *edges, *color)?.with_shading(*shading);
                let skew = cuboid.axis_skew();
                if skew > ORTHOGONAL_TOLERANCE {
                    return Err(ConfigError::Validation(format!(
                        "box edges must be mutually perpendicular, got |cos| = {skew}"
                    )));
                }
                cuboid.into()
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LightSpec {
    /// Toward the light; normalized on load
    pub direction: Vec3,
    pub color: Color,
}

/// Everything a scene file describes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub orbit: Option<OrbitPath>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub primitives: Vec<PrimitiveSpec>,
    #[serde(default)]
    pub lights: Vec<LightSpec>,
}

/// Validated, ready-to-render contents of a scene file
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: Camera,
    pub render: RenderConfig,
    pub orbit: Option<OrbitPath>,
}

impl SceneFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_scene(path)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The built-in showcase scene, orbiting the origin
    pub fn showcase() -> Self {
        let c = |r, g, b| Color::new(r, g, b);
        Self {
            camera: Camera::default(),
            orbit: Some(OrbitPath::default()),
            render: RenderConfig::default(),
            primitives: vec![
                PrimitiveSpec::Plane {
                    point: Vec3::new(0.0, 25.0, 0.0),
                    normal: Vec3::new(0.0, 1.0, 0.0),
                    color: c(230, 230, 230),
                },
                PrimitiveSpec::Sphere {
                    center: Vec3::zeros(),
                    radius: 25.0,
                    color: Color::WHITE,
                },
                PrimitiveSpec::Sphere {
                    center: Vec3::new(30.0, 20.0, -15.0),
                    radius: 10.0,
                    color: c(255, 255, 140),
                },
                PrimitiveSpec::Box {
                    center: Vec3::new(0.0, 10.0, 0.0),
                    edges: [
                        Vec3::new(20.0, 0.0, 0.0),
                        Vec3::new(0.0, 40.0, 0.0),
                        Vec3::new(0.0, 0.0, 30.0),
                    ],
                    color: Color::WHITE,
                    shading: BoxShading::Gradient,
                },
            ],
            lights: vec![
                LightSpec {
                    direction: Vec3::new(5.0, -10.0, 1.0),
                    color: c(182, 34, 228),
                },
                LightSpec {
                    direction: Vec3::new(-10.0, 3.0, -1.0),
                    color: c(24, 236, 238),
                },
                LightSpec {
                    direction: Vec3::new(1.0, 4.0, -1.0),
                    color: c(100, 100, 100),
                },
            ],
        }
    }

    /// Validate every entry and build the scene
    pub fn build(&self) -> Result<LoadedScene, ConfigError> {
        let render = self.render;
        if !(render.fov_degrees > 0.0 && render.fov_degrees < 180.0) {
            return Err(ConfigError::Validation(format!(
                "fov_degrees must be in (0, 180), got {}",
                render.fov_degrees
            )));
        }
        if !(render.sample_aspect > 0.0) {
            return Err(ConfigError::Validation(format!(
                "sample_aspect must be positive, got {}",
                render.sample_aspect
            )));
        }
        if let Some(orbit) = &self.orbit {
            if orbit.direction.iter().any(|c| ![-1.0, 0.0, 1.0].contains(c)) {
                return Err(ConfigError::Validation(format!(
                    "orbit direction components must be -1, 0 or 1, got {:?}",
                    orbit.direction.as_slice()
                )));
            }
        }

        let mut scene = Scene::new();
        for (i, spec) in self.primitives.iter().enumerate() {
            let primitive = spec.build().map_err(|e| match e {
                ConfigError::Validation(msg) => ConfigError::Validation(format!("primitive {i}: {msg}")),
                other => other,
            })?;
            scene.add(primitive);
        }
        for light in &self.lights {
            scene.add_light(Light::new(light.direction, light.color)?);
        }

        let mut camera = self.camera;
        camera.normalize_orientation();

        tracing::debug!(
            primitives = scene.primitives.len(),
            lights = scene.lights.len(),
            orbit = self.orbit.is_some(),
            "Scene built"
        );

        Ok(LoadedScene {
            scene,
            camera,
            render,
            orbit: self.orbit,
        })
    }
}

/// Load a scene description from a YAML file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneFile, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    SceneFile::from_yaml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENE_YAML: &str = r#"
camera:
  position: [0, 0, -60]
  yaw: -90
  pitch: 120
render:
  fov_degrees: 60
primitives:
  - type: sphere
    center: [0, 0, 0]
    radius: 25
    color: [255, 255, 255]
  - type: plane
    point: [0, 25, 0]
    normal: [0, 3, 0]
    color: [230, 230, 230]
  - type: box
    center: [0, 10, 0]
    edges: [[20, 0, 0], [0, 40, 0], [0, 0, 30]]
    color: [255, 255, 255]
    shading: faceted
lights:
  - direction: [1, -1, -1]
    color: [255, 255, 255]
"#;

    #[test]
    fn test_load_missing_scene() {
        let result = load_scene("/nonexistent/scene.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "primitives: [").unwrap();
        let result = load_scene(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_valid_scene() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE_YAML.as_bytes()).unwrap();

        let loaded = load_scene(file.path()).unwrap().build().unwrap();
        assert_eq!(loaded.scene.primitives.len(), 3);
        assert_eq!(loaded.scene.lights.len(), 1);
        assert!((loaded.scene.lights[0].direction.norm() - 1.0).abs() < 1e-5);
        assert_eq!(loaded.render.fov_degrees, 60.0);
        assert_eq!(loaded.render.shininess, crate::DEFAULT_SHININESS);
        assert!(loaded.orbit.is_none());

        // Orientation is normalized on load
        assert!((loaded.camera.yaw_degrees - 270.0).abs() < 1e-4);
        assert!(loaded.camera.pitch_degrees < 90.0);

        match &loaded.scene.primitives[1] {
            Primitive::Plane(p) => assert!((p.normal.y - 1.0).abs() < 1e-6),
            other => panic!("expected plane, got {other:?}"),
        }
        match &loaded.scene.primitives[2] {
            Primitive::Box(b) => {
                assert_eq!(b.shading, BoxShading::Faceted);
                assert_eq!(b.half_extents, [10.0, 20.0, 15.0]);
            }
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = SceneFile::from_yaml("{}").unwrap();
        let loaded = file.build().unwrap();
        assert!(loaded.scene.primitives.is_empty());
        assert_eq!(loaded.camera, Camera::default());
        assert_eq!(loaded.render, RenderConfig::default());
    }

    #[test]
    fn test_zero_light_direction_rejected() {
        let yaml = "lights:\n  - direction: [0, 0, 0]\n    color: [255, 255, 255]\n";
        let err = SceneFile::from_yaml(yaml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Geometry(_)));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let yaml = "primitives:\n  - type: sphere\n    center: [0, 0, 0]\n    radius: -1\n    color: [1, 2, 3]\n";
        let err = SceneFile::from_yaml(yaml).unwrap().build().unwrap_err();
        match err {
            ConfigError::Validation(msg) => assert!(msg.starts_with("primitive 0")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_skewed_box_rejected() {
        let yaml = "primitives:\n  - type: box\n    center: [0, 0, 0]\n    edges: [[2, 0, 0], [2, 2, 0], [0, 0, 2]]\n    color: [255, 255, 255]\n";
        let err = SceneFile::from_yaml(yaml).unwrap().build().unwrap_err();
        match err {
            ConfigError::Validation(msg) => {
                assert!(msg.starts_with("primitive 0"));
                assert!(msg.contains("perpendicular"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rotated_box_accepted() {
        let yaml = "primitives:\n  - type: box\n    center: [0, 0, 0]\n    edges: [[3, 3, 0], [-1, 1, 0], [0, 0, 5]]\n    color: [255, 255, 255]\n";
        let loaded = SceneFile::from_yaml(yaml).unwrap().build().unwrap();
        assert_eq!(loaded.scene.primitives.len(), 1);
    }

    #[test]
    fn test_bad_orbit_mask_rejected() {
        let yaml = "orbit:\n  radius: 10\n  direction: [2, 0, 1]\n  degrees_per_frame: 1\n";
        let err = SceneFile::from_yaml(yaml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_bad_fov_rejected() {
        let yaml = "render:\n  fov_degrees: 180\n";
        let err = SceneFile::from_yaml(yaml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_primitive_type() {
        let yaml = "primitives:\n  - type: torus\n    center: [0, 0, 0]\n";
        assert!(matches!(SceneFile::from_yaml(yaml).unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_bundled_showcase_matches_builtin() {
        let bundled = SceneFile::from_yaml(include_str!("../scenes/showcase.yaml")).unwrap();
        assert_eq!(bundled, SceneFile::showcase());
    }

    #[test]
    fn test_showcase_round_trips_through_yaml() {
        let showcase = SceneFile::showcase();
        let yaml = serde_yaml::to_string(&showcase).unwrap();
        assert_eq!(SceneFile::from_yaml(&yaml).unwrap(), showcase);

        let loaded = showcase.build().unwrap();
        assert_eq!(loaded.scene.primitives.len(), 4);
        assert!(loaded.orbit.is_some());
    }
}
