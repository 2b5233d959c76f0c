// SPDX-License-Identifier: MIT OR Apache-2.0
//! Startup sequence applying a [`PipelineConfig`] to a [`Session`].

use crate::config::{ConfigError, PipelineConfig};
use restir_graph::graphs::rtxdi::render_graph_rtxdi;
use restir_graph::{GraphError, RenderGraph};
use restir_session::{Session, SessionError};
use std::path::{Path, PathBuf};

/// Configure `session` for the ReSTIR DI pipeline
///
/// Steps run in a fixed order and the first failure aborts startup.
pub fn configure_session(session: &mut Session, config: &PipelineConfig) -> Result<(), StartupError> {
    if config.graph_name.trim().is_empty() {
        return Err(StartupError::InvalidGraphName(config.graph_name.clone()));
    }
    check_search_paths(&config.script_search_paths);

    // Graphs
    let mut graph = render_graph_rtxdi()?;
    graph.name.clone_from(&config.graph_name);
    session.add_graph(graph)?;

    // Scene
    let scene = session.load_scene(&config.scene.path)?;
    scene
        .set_render_settings(config.scene.render_settings)
        .map_err(SessionError::from)?;
    scene
        .set_camera_speed(config.scene.camera_speed)
        .map_err(SessionError::from)?;

    // Window configuration
    session.resize_frame_buffer(config.window.width, config.window.height)?;
    session.set_ui(config.window.ui);
    tracing::info!(
        "Framebuffer {}x{}, UI {}",
        config.window.width,
        config.window.height,
        if config.window.ui { "on" } else { "off" }
    );

    // Clock settings
    let clock = session.clock_mut();
    clock.set_time(config.clock.time).map_err(SessionError::from)?;
    clock.set_framerate(config.clock.framerate);
    if let Some(frame) = config.clock.frame {
        clock.set_frame(frame).map_err(SessionError::from)?;
    }
    tracing::info!("Clock at {}s, {} fps", clock.time(), clock.framerate());

    // Frame capture
    let capture = session.frame_capture_mut();
    capture.set_output_dir(config.frame_capture.output_dir.clone());
    capture
        .set_base_filename(&config.frame_capture.base_filename)
        .map_err(SessionError::from)?;
    tracing::info!(
        "Frame capture to {:?} as {}.*",
        capture.output_dir(),
        capture.base_filename()
    );

    Ok(())
}

/// Missing helper script directories are not fatal
fn check_search_paths(paths: &[PathBuf]) {
    for path in paths {
        if path.is_dir() {
            tracing::debug!("Script search path {:?}", path);
        } else {
            tracing::warn!("Script search path {:?} does not exist", path);
        }
    }
}

/// Write a graph as pretty-printed JSON
pub fn export_graph(graph: &RenderGraph, path: &Path) -> Result<(), StartupError> {
    let json = serde_json::to_string_pretty(graph)?;
    std::fs::write(path, json).map_err(|source| StartupError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Exported graph {} to {:?}", graph.name, path);
    Ok(())
}

/// Fatal startup errors
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Graph would be registered under a blank name
    #[error("Invalid graph name: '{0}'")]
    InvalidGraphName(String),

    /// Graph construction error
    #[error("Graph construction failed: {0}")]
    Graph(#[from] GraphError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Graph export could not be written
    #[error("Failed to write {path:?}: {source}")]
    Export {
        /// Export path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Graph could not be encoded
    #[error("Failed to encode graph: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use restir_session::{FrameBufferSize, SceneRenderSettings};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("restir_startup_{}_{}", std::process::id(), name))
    }

    fn config_with_scene(name: &str) -> (PipelineConfig, PathBuf) {
        let scene = temp_path(name);
        std::fs::write(&scene, b"# pink room\n").unwrap();
        let mut config = PipelineConfig::default();
        config.scene.path.clone_from(&scene);
        (config, scene)
    }

    #[test]
    fn test_configure_session() {
        let (config, scene) = config_with_scene("pink_room.pyscene");
        let mut session = Session::new();
        configure_session(&mut session, &config).unwrap();

        let graph = session.active_graph().unwrap();
        assert_eq!(graph.name, "RTXDI");
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let loaded = session.scene().unwrap();
        assert_eq!(loaded.path(), scene.as_path());
        assert_eq!(
            *loaded.render_settings(),
            SceneRenderSettings {
                use_env_light: true,
                use_analytic_lights: true,
                use_emissive_lights: true,
                use_grid_volumes: true,
                diffuse_albedo_multiplier: 1.0,
            }
        );
        assert_eq!(loaded.camera_speed(), 1.0);

        assert_eq!(session.frame_buffer(), FrameBufferSize { width: 1280, height: 800 });
        assert!(session.ui());
        assert_eq!(session.clock().time(), 0.0);
        assert_eq!(session.clock().framerate(), 30);
        assert_eq!(session.frame_capture().output_dir(), Path::new("D:/Temp/FrameCapture"));
        assert_eq!(session.frame_capture().base_filename(), "Mogwai");

        std::fs::remove_file(scene).ok();
    }

    #[test]
    fn test_start_frame() {
        let (mut config, scene) = config_with_scene("start_frame.pyscene");
        config.clock.frame = Some(60);
        let mut session = Session::new();
        configure_session(&mut session, &config).unwrap();
        assert_eq!(session.clock().frame(), Some(60));
        assert!((session.clock().time() - 2.0).abs() < 1e-9);
        std::fs::remove_file(scene).ok();
    }

    #[test]
    fn test_start_frame_needs_framerate() {
        let (mut config, scene) = config_with_scene("real_time.pyscene");
        config.clock.framerate = 0;
        config.clock.frame = Some(1);
        let mut session = Session::new();
        let err = configure_session(&mut session, &config).unwrap_err();
        assert!(matches!(err, StartupError::Session(SessionError::Clock(_))));
        std::fs::remove_file(scene).ok();
    }

    #[test]
    fn test_missing_scene_is_fatal() {
        let mut config = PipelineConfig::default();
        config.scene.path = temp_path("no_such_room.pyscene");
        let mut session = Session::new();
        let err = configure_session(&mut session, &config).unwrap_err();
        assert!(err.to_string().contains("no_such_room.pyscene"));
        // The graph was registered before the scene step failed
        assert!(session.graph("RTXDI").is_some());
        assert!(session.scene().is_none());
    }

    #[test]
    fn test_configure_twice_rejects_duplicate_graph() {
        let (config, scene) = config_with_scene("twice.pyscene");
        let mut session = Session::new();
        configure_session(&mut session, &config).unwrap();
        let err = configure_session(&mut session, &config).unwrap_err();
        assert!(matches!(err, StartupError::Session(SessionError::DuplicateGraph(_))));
        std::fs::remove_file(scene).ok();
    }

    #[test]
    fn test_blank_graph_name_rejected() {
        for name in ["", "   "] {
            let mut config = PipelineConfig::default();
            config.graph_name = name.to_string();
            let mut session = Session::new();
            let err = configure_session(&mut session, &config).unwrap_err();
            assert!(matches!(err, StartupError::InvalidGraphName(ref n) if n == name));
            assert_eq!(session.graphs().count(), 0);
            assert!(session.scene().is_none());
        }
    }

    #[test]
    fn test_missing_search_path_is_not_fatal() {
        let (mut config, scene) = config_with_scene("search_paths.pyscene");
        config.script_search_paths = vec![temp_path("no_such_scripts_dir")];
        let mut session = Session::new();
        configure_session(&mut session, &config).unwrap();
        assert!(session.graph("RTXDI").is_some());
        assert!(session.scene().is_some());
        std::fs::remove_file(scene).ok();
    }

    #[test]
    fn test_export_graph() {
        let graph = render_graph_rtxdi().unwrap();
        let path = temp_path("graph.json");
        export_graph(&graph, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: RenderGraph = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, graph);
        std::fs::remove_file(path).ok();
    }
}
