//! Viewport configuration, loadable from YAML. Every field has a default.

use crate::error::ViewportError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub rotating_object: RotatingObjectConfig,
    #[serde(default)]
    pub axis: AxisConfig,
}

impl ViewportConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ViewportError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ViewportError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ViewportError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String, ViewportError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Initial orbit camera pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Azimuth in radians
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// Polar angle in radians
    #[serde(default = "default_beta")]
    pub beta: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            radius: default_radius(),
            target: Vec3::ZERO,
        }
    }
}

fn default_alpha() -> f32 {
    -PI / 2.0
}

fn default_beta() -> f32 {
    PI / 2.5
}

fn default_radius() -> f32 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_intensity(),
        }
    }
}

fn default_light_direction() -> Vec3 {
    Vec3::Y
}

fn default_intensity() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    #[serde(default = "default_ground_extent")]
    pub width: f32,
    #[serde(default = "default_ground_extent")]
    pub height: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            width: default_ground_extent(),
            height: default_ground_extent(),
        }
    }
}

fn default_ground_extent() -> f32 {
    10.0
}

/// The textured box that spins above the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatingObjectConfig {
    #[serde(default = "default_box_size")]
    pub size: f32,
    /// Raise along y so the base rests on the ground.
    #[serde(default = "default_height_offset")]
    pub height_offset: f32,
    /// Radians per rendered frame about the local up axis.
    #[serde(default = "default_rotation_step")]
    pub rotation_step: f32,
    #[serde(default = "default_texture")]
    pub texture: PathBuf,
}

impl Default for RotatingObjectConfig {
    fn default() -> Self {
        Self {
            size: default_box_size(),
            height_offset: default_height_offset(),
            rotation_step: default_rotation_step(),
            texture: default_texture(),
        }
    }
}

fn default_box_size() -> f32 {
    1.0
}

fn default_height_offset() -> f32 {
    0.5
}

fn default_rotation_step() -> f32 {
    0.02
}

fn default_texture() -> PathBuf {
    PathBuf::from("assets/textures/sun.png")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_axis_size")]
    pub size: f32,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            size: default_axis_size(),
        }
    }
}

fn default_axis_size() -> f32 {
    8.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_scene() {
        let config = ViewportConfig::default();
        assert_eq!(config.camera.alpha, -PI / 2.0);
        assert_eq!(config.camera.beta, PI / 2.5);
        assert_eq!(config.camera.radius, 3.0);
        assert_eq!(config.camera.target, Vec3::ZERO);
        assert_eq!(config.light.direction, Vec3::Y);
        assert_eq!((config.ground.width, config.ground.height), (10.0, 10.0));
        assert_eq!(config.rotating_object.height_offset, 0.5);
        assert_eq!(config.rotating_object.rotation_step, 0.02);
        assert_eq!(config.axis.size, 8.0);
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ViewportConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ViewportConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = ViewportConfig::from_yaml(
            "axis:\n  size: 4.0\ncamera:\n  radius: 6.0\n  target: [1.0, 2.0, 3.0]\n",
        )
        .unwrap();
        assert_eq!(config.axis.size, 4.0);
        assert_eq!(config.camera.radius, 6.0);
        assert_eq!(config.camera.target, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.alpha, -PI / 2.0);
        assert_eq!(config.rotating_object, RotatingObjectConfig::default());
    }

    #[test]
    fn yaml_round_trips() {
        let mut config = ViewportConfig::default();
        config.rotating_object.texture = PathBuf::from("textures/other.jpg");
        let text = config.to_yaml().unwrap();
        assert_eq!(ViewportConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn load_reports_missing_file_and_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            ViewportConfig::load(&missing),
            Err(ViewportError::ConfigIo { .. })
        ));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "axis: [not, a, map]").unwrap();
        assert!(matches!(
            ViewportConfig::load(&bad),
            Err(ViewportError::ConfigParse(_))
        ));

        let good = dir.path().join("good.yaml");
        std::fs::write(&good, "ground:\n  width: 20\n").unwrap();
        assert_eq!(ViewportConfig::load(&good).unwrap().ground.width, 20.0);
    }
}
