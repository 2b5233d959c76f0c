// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pipeline configuration file.
//!
//! Everything the startup sequence applies to the session lives here so that
//! host-specific paths stay out of the code:
//! - Graph name and helper script search paths
//! - Scene file, render settings and camera speed
//! - Window size and UI
//! - Clock
//! - Frame capture destination

use restir_graph::graphs::rtxdi::RTXDI_GRAPH_NAME;
use restir_session::SceneRenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Scene to load and its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Scene file
    pub path: PathBuf,
    /// Light sources and volumes to render
    #[serde(default)]
    pub render_settings: SceneRenderSettings,
    /// Camera navigation speed
    pub camera_speed: f32,
}

/// Output window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Framebuffer width
    pub width: u32,
    /// Framebuffer height
    pub height: u32,
    /// Show the interactive UI
    pub ui: bool,
}

/// Simulation clock at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Start time in seconds
    pub time: f64,
    /// Frames per second; zero means real time
    pub framerate: u32,
    /// Start frame, only valid with a non-zero framerate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
}

/// Frame capture destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameCaptureConfig {
    /// Directory captures are written to
    pub output_dir: PathBuf,
    /// Prefix of every capture file name
    pub base_filename: String,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Format version
    pub version: u32,
    /// Name the render graph is registered under
    pub graph_name: String,
    /// Directories searched for helper scripts
    #[serde(default)]
    pub script_search_paths: Vec<PathBuf>,
    /// Scene
    pub scene: SceneConfig,
    /// Window
    pub window: WindowConfig,
    /// Clock
    pub clock: ClockConfig,
    /// Frame capture
    pub frame_capture: FrameCaptureConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            graph_name: RTXDI_GRAPH_NAME.to_string(),
            script_search_paths: vec![PathBuf::from("D:/3D_Scene/script")],
            scene: SceneConfig {
                path: PathBuf::from("D:/3D_Scene/Others/pink_room/pink_room_v1.2.pyscene"),
                render_settings: SceneRenderSettings {
                    use_env_light: true,
                    use_analytic_lights: true,
                    use_emissive_lights: true,
                    use_grid_volumes: true,
                    diffuse_albedo_multiplier: 1.0,
                },
                camera_speed: 1.0,
            },
            window: WindowConfig {
                width: 1280,
                height: 800,
                ui: true,
            },
            clock: ClockConfig {
                time: 0.0,
                framerate: 30,
                frame: None,
            },
            frame_capture: FrameCaptureConfig {
                output_dir: PathBuf::from("D:/Temp/FrameCapture"),
                base_filename: "Mogwai".to_string(),
            },
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Version check
        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }

        Ok(config)
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("Config file {path:?}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid RON for this format
    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        /// Config path
        path: PathBuf,
        /// Parser error with position
        #[source]
        source: ron::error::SpannedError,
    },

    /// Config written by a newer version
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build reads
        supported: u32,
    },

    /// Serialization error
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("restir_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.graph_name, "RTXDI");
        assert_eq!(config.window, WindowConfig { width: 1280, height: 800, ui: true });
        assert_eq!(config.clock.time, 0.0);
        assert_eq!(config.clock.framerate, 30);
        assert_eq!(config.clock.frame, None);
        assert_eq!(config.scene.camera_speed, 1.0);
        assert_eq!(config.scene.render_settings, SceneRenderSettings::default());
        assert_eq!(config.frame_capture.base_filename, "Mogwai");
        assert_eq!(config.frame_capture.output_dir, PathBuf::from("D:/Temp/FrameCapture"));
    }

    #[test]
    fn test_serialization() {
        let config = PipelineConfig::default();
        let path = temp_path("round_trip.ron");
        config.save(&path).unwrap();
        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_optional_fields() {
        let text = r#"PipelineConfig(
            version: 1,
            graph_name: "RTXDI",
            scene: SceneConfig(path: "room.pyscene", camera_speed: 2.0),
            window: WindowConfig(width: 640, height: 480, ui: false),
            clock: ClockConfig(time: 0.0, framerate: 60, frame: Some(12)),
            frame_capture: FrameCaptureConfig(output_dir: "captures", base_filename: "Shot"),
        )"#;
        let config: PipelineConfig = ron::from_str(text).unwrap();
        assert!(config.script_search_paths.is_empty());
        assert_eq!(config.scene.render_settings, SceneRenderSettings::default());
        assert_eq!(config.clock.frame, Some(12));
    }

    #[test]
    fn test_newer_version_rejected() {
        let config = PipelineConfig {
            version: CONFIG_FORMAT_VERSION + 1,
            ..Default::default()
        };
        let path = temp_path("newer.ron");
        config.save(&path).unwrap();
        assert!(matches!(
            PipelineConfig::load(&path),
            Err(ConfigError::UnsupportedVersion { .. })
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("missing.ron");
        let err = PipelineConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.ron"));
    }
}
