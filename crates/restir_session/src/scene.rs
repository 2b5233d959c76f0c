// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene loading and per-scene render settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scene file extensions the host importers accept
pub const SUPPORTED_SCENE_EXTENSIONS: &[&str] = &[
    "pyscene", "fbx", "gltf", "glb", "obj", "usd", "usda", "usdc", "usdz",
];

/// Which light sources and volumes the renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneRenderSettings {
    /// Environment map lighting
    pub use_env_light: bool,
    /// Point, spot and directional lights
    pub use_analytic_lights: bool,
    /// Emissive geometry
    pub use_emissive_lights: bool,
    /// Grid volumes
    pub use_grid_volumes: bool,
    /// Scale applied to every material's diffuse albedo
    pub diffuse_albedo_multiplier: f32,
}

impl Default for SceneRenderSettings {
    fn default() -> Self {
        Self {
            use_env_light: true,
            use_analytic_lights: true,
            use_emissive_lights: true,
            use_grid_volumes: true,
            diffuse_albedo_multiplier: 1.0,
        }
    }
}

/// A loaded scene
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    path: PathBuf,
    render_settings: SceneRenderSettings,
    camera_speed: f32,
}

impl Scene {
    /// Load a scene file
    ///
    /// The file must exist, be readable, be non-empty and have one of
    /// [`SUPPORTED_SCENE_EXTENSIONS`]. Parsing is left to the host importer.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                SUPPORTED_SCENE_EXTENSIONS
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(e))
            });
        if !supported {
            return Err(SceneError::UnsupportedFormat(path.to_path_buf()));
        }

        let io_error = |source: std::io::Error| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SceneError::NotFound(path.to_path_buf())
            } else {
                SceneError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        };

        let metadata = std::fs::metadata(path).map_err(io_error)?;
        if !metadata.is_file() {
            return Err(SceneError::NotAFile(path.to_path_buf()));
        }
        // Opening proves the file is readable without pulling it into memory
        std::fs::File::open(path).map_err(io_error)?;
        let len = metadata.len();
        if len == 0 {
            return Err(SceneError::Empty(path.to_path_buf()));
        }

        tracing::debug!("Opened scene {:?} ({} bytes)", path, len);

        Ok(Self {
            path: path.to_path_buf(),
            render_settings: SceneRenderSettings::default(),
            camera_speed: 1.0,
        })
    }

    /// Path the scene was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current render settings
    pub fn render_settings(&self) -> &SceneRenderSettings {
        &self.render_settings
    }

    /// Replace the render settings
    pub fn set_render_settings(&mut self, settings: SceneRenderSettings) -> Result<(), SceneError> {
        let multiplier = settings.diffuse_albedo_multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(SceneError::InvalidAlbedoMultiplier(multiplier));
        }
        self.render_settings = settings;
        Ok(())
    }

    /// Camera navigation speed
    pub fn camera_speed(&self) -> f32 {
        self.camera_speed
    }

    /// Set the camera navigation speed
    pub fn set_camera_speed(&mut self, speed: f32) -> Result<(), SceneError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SceneError::InvalidCameraSpeed(speed));
        }
        self.camera_speed = speed;
        Ok(())
    }
}

/// Scene errors
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// File does not exist
    #[error("Scene file not found: {0:?}")]
    NotFound(PathBuf),

    /// Path names a directory or other non-file entry
    #[error("Scene path is not a file: {0:?}")]
    NotAFile(PathBuf),

    /// File could not be read
    #[error("Failed to read scene file {path:?}: {source}")]
    Io {
        /// Scene path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Extension not handled by any importer
    #[error("Unsupported scene format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// File is empty
    #[error("Scene file is empty: {0:?}")]
    Empty(PathBuf),

    /// Negative or non-finite albedo multiplier
    #[error("Invalid diffuse albedo multiplier: {0}")]
    InvalidAlbedoMultiplier(f32),

    /// Non-positive or non-finite camera speed
    #[error("Invalid camera speed: {0}")]
    InvalidCameraSpeed(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_scene(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("restir_scene_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_scene() {
        let path = temp_scene("room.pyscene", b"sceneBuilder.importScene('room.fbx')\n");
        let scene = Scene::load(&path).unwrap();
        assert_eq!(scene.path(), path.as_path());
        assert_eq!(*scene.render_settings(), SceneRenderSettings::default());
        assert_eq!(scene.camera_speed(), 1.0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_scene() {
        let path = std::env::temp_dir().join("restir_scene_does_not_exist.pyscene");
        assert!(matches!(Scene::load(&path), Err(SceneError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_unsupported_and_empty() {
        let path = temp_scene("notes.txt", b"hello");
        assert!(matches!(Scene::load(&path), Err(SceneError::UnsupportedFormat(_))));
        std::fs::remove_file(path).ok();

        let path = temp_scene("empty.GLTF", b"");
        assert!(matches!(Scene::load(&path), Err(SceneError::Empty(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_directory_scene_rejected() {
        let path = std::env::temp_dir().join(format!("restir_scene_{}_dir.pyscene", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        assert!(matches!(Scene::load(&path), Err(SceneError::NotAFile(p)) if p == path));
        std::fs::remove_dir(path).ok();
    }

    #[test]
    fn test_setting_validation() {
        let path = temp_scene("settings.obj", b"v 0 0 0\n");
        let mut scene = Scene::load(&path).unwrap();

        let settings = SceneRenderSettings {
            use_grid_volumes: false,
            diffuse_albedo_multiplier: 0.5,
            ..Default::default()
        };
        scene.set_render_settings(settings).unwrap();
        assert_eq!(*scene.render_settings(), settings);

        let bad = SceneRenderSettings {
            diffuse_albedo_multiplier: -1.0,
            ..Default::default()
        };
        assert!(scene.set_render_settings(bad).is_err());
        assert_eq!(*scene.render_settings(), settings);

        assert!(scene.set_camera_speed(0.0).is_err());
        scene.set_camera_speed(2.5).unwrap();
        assert_eq!(scene.camera_speed(), 2.5);
        std::fs::remove_file(path).ok();
    }
}
