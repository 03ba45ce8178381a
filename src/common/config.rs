use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::camera::fly_camera;

#[derive(Debug, Clone)]
pub enum ConfigLoadError {
    ConfigDoesNotExist(PathBuf),
    InvalidConfig(PathBuf, String),
}

impl std::error::Error for ConfigLoadError {}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConfigDoesNotExist(path) => {
                write!(f, "The config {:?} does not exist", path)
            }
            Self::InvalidConfig(path, reason) => {
                write!(f, "The config {:?} is invalid: {}", path, reason)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub assets: AssetPaths,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub shaders: PathBuf,
    pub container_texture: PathBuf,
    pub model: Option<PathBuf>,
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        info!("Loading config {:?}...", path);

        let contents = fs::read_to_string(path)
            .map_err(|_| ConfigLoadError::ConfigDoesNotExist(path.to_path_buf()))?;

        Self::from_json(&contents)
            .map_err(|error| ConfigLoadError::InvalidConfig(path.to_path_buf(), error.to_string()))
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Lighting demo".to_owned(),
            width: 1120,
            height: 840,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 3.0),
            yaw: fly_camera::DEFAULT_YAW,
            pitch: fly_camera::DEFAULT_PITCH,
            movement_speed: fly_camera::DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: fly_camera::DEFAULT_MOUSE_SENSITIVITY,
            zoom: fly_camera::MAX_ZOOM,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            shaders: PathBuf::from("assets/shaders"),
            container_texture: PathBuf::from("assets/textures/metal_border_container.png"),
            model: Some(PathBuf::from("assets/models/backpack/backpack.gltf")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = DemoConfig::from_json("{}").unwrap();

        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config = DemoConfig::from_json(
            r#"{
                "window": { "width": 640 },
                "camera": { "position": [1.0, 2.0, 3.0], "movement_speed": 7.5 },
                "assets": { "model": null }
            }"#,
        )
        .unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, WindowSettings::default().height);
        assert_eq!(config.camera.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.movement_speed, 7.5);
        assert_eq!(config.camera.yaw, fly_camera::DEFAULT_YAW);
        assert_eq!(config.assets.model, None);
        assert_eq!(config.assets.shaders, AssetPaths::default().shaders);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(DemoConfig::from_json(r#"{ "window": { "width": "wide" } }"#).is_err());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let path = PathBuf::from("does/not/exist.json");

        match DemoConfig::load(&path) {
            Err(ConfigLoadError::ConfigDoesNotExist(missing)) => assert_eq!(missing, path),
            other => panic!("Expected missing config error, got {:?}", other),
        }
    }

    #[test]
    fn bundled_config_parses() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/demo.json");

        let config = DemoConfig::load(&path).unwrap();

        assert_eq!(config.camera.position, Point3::new(0.0, 0.0, 3.0));
    }
}
