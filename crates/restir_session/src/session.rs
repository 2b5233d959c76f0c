// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session state configured at startup and consumed by the host.

use crate::capture::{CaptureError, FrameCapture};
use crate::clock::{Clock, ClockError};
use crate::scene::{Scene, SceneError, SceneRenderSettings};
use indexmap::IndexMap;
use restir_graph::{GraphError, RenderGraph};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest framebuffer dimension the host accepts
pub const MAX_FRAME_BUFFER_DIMENSION: u32 = 16384;

/// Framebuffer size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameBufferSize {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Default for FrameBufferSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Renderer session
#[derive(Debug, Default)]
pub struct Session {
    graphs: IndexMap<String, RenderGraph>,
    active_graph: Option<String>,
    scene: Option<Scene>,
    frame_buffer: FrameBufferSize,
    ui: bool,
    clock: Clock,
    frame_capture: FrameCapture,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a graph; the first registered graph becomes active
    pub fn add_graph(&mut self, graph: RenderGraph) -> Result<&RenderGraph, SessionError> {
        if self.graphs.contains_key(&graph.name) {
            return Err(SessionError::DuplicateGraph(graph.name));
        }
        graph.validate().map_err(|source| SessionError::InvalidGraph {
            name: graph.name.clone(),
            source,
        })?;

        let name = graph.name.clone();
        tracing::info!(
            "Added graph {} ({} passes, {} edges)",
            name,
            graph.node_count(),
            graph.edge_count()
        );
        if self.active_graph.is_none() {
            self.active_graph = Some(name.clone());
        }
        let graph = self.graphs.entry(name).or_insert(graph);
        Ok(&*graph)
    }

    /// Unregister a graph
    pub fn remove_graph(&mut self, name: &str) -> Option<RenderGraph> {
        let removed = self.graphs.shift_remove(name)?;
        if self.active_graph.as_deref() == Some(name) {
            self.active_graph = self.graphs.keys().next().cloned();
        }
        Some(removed)
    }

    /// Get a graph by name
    pub fn graph(&self, name: &str) -> Option<&RenderGraph> {
        self.graphs.get(name)
    }

    /// Get all graphs in registration order
    pub fn graphs(&self) -> impl Iterator<Item = &RenderGraph> {
        self.graphs.values()
    }

    /// Graph being rendered
    pub fn active_graph(&self) -> Option<&RenderGraph> {
        self.active_graph.as_deref().and_then(|name| self.graphs.get(name))
    }

    /// Select the graph being rendered
    pub fn set_active_graph(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.graphs.contains_key(name) {
            return Err(SessionError::GraphNotFound(name.to_string()));
        }
        self.active_graph = Some(name.to_string());
        Ok(())
    }

    /// Load a scene, replacing any previous one
    pub fn load_scene(&mut self, path: &Path) -> Result<&mut Scene, SessionError> {
        let scene = Scene::load(path)?;
        tracing::info!("Loaded scene {:?}", path);
        Ok(self.scene.insert(scene))
    }

    /// Loaded scene
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Loaded scene, for settings that require one
    pub fn scene_mut(&mut self) -> Result<&mut Scene, SessionError> {
        self.scene.as_mut().ok_or(SessionError::NoScene)
    }

    /// Resize the output framebuffer
    pub fn resize_frame_buffer(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        let valid = 1..=MAX_FRAME_BUFFER_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(SessionError::InvalidFrameBuffer { width, height });
        }
        self.frame_buffer = FrameBufferSize { width, height };
        Ok(())
    }

    /// Framebuffer size
    pub fn frame_buffer(&self) -> FrameBufferSize {
        self.frame_buffer
    }

    /// Show or hide the interactive UI
    pub fn set_ui(&mut self, enabled: bool) {
        self.ui = enabled;
    }

    /// Whether the interactive UI is shown
    pub fn ui(&self) -> bool {
        self.ui
    }

    /// Simulation clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable simulation clock
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Frame capture settings
    pub fn frame_capture(&self) -> &FrameCapture {
        &self.frame_capture
    }

    /// Mutable frame capture settings
    pub fn frame_capture_mut(&mut self) -> &mut FrameCapture {
        &mut self.frame_capture
    }

    /// Files a capture of the active graph's marked outputs at `frame` would write
    pub fn capture_paths(&self, frame: u64) -> Vec<PathBuf> {
        let Some(graph) = self.active_graph() else {
            return Vec::new();
        };
        graph
            .marked_outputs()
            .map(|output| self.frame_capture.output_path(&graph.name, output, frame))
            .collect()
    }

    /// Settings the host consumes, detached from the session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_graph: self.active_graph.clone(),
            scene_path: self.scene.as_ref().map(|s| s.path().to_path_buf()),
            render_settings: self.scene.as_ref().map(|s| *s.render_settings()),
            camera_speed: self.scene.as_ref().map(Scene::camera_speed),
            frame_buffer: self.frame_buffer,
            ui: self.ui,
            clock: self.clock,
            frame_capture: self.frame_capture.clone(),
        }
    }
}

/// Flat copy of the session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Active graph name
    pub active_graph: Option<String>,
    /// Scene file
    pub scene_path: Option<PathBuf>,
    /// Scene render settings
    pub render_settings: Option<SceneRenderSettings>,
    /// Camera navigation speed
    pub camera_speed: Option<f32>,
    /// Framebuffer size
    pub frame_buffer: FrameBufferSize,
    /// UI shown
    pub ui: bool,
    /// Clock state
    pub clock: Clock,
    /// Capture destination
    pub frame_capture: FrameCapture,
}

impl SessionSnapshot {
    /// Encode for handing to the host
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`SessionSnapshot::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A graph with this name is already registered
    #[error("Graph already registered: {0}")]
    DuplicateGraph(String),

    /// No graph with this name
    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    /// Graph failed validation
    #[error("Invalid graph {name}: {source}")]
    InvalidGraph {
        /// Graph name
        name: String,
        /// Validation error
        #[source]
        source: GraphError,
    },

    /// Scene-dependent setting applied before loading a scene
    #[error("No scene loaded")]
    NoScene,

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Zero or oversized framebuffer
    #[error("Invalid framebuffer size {width}x{height}")]
    InvalidFrameBuffer {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Clock error
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// Capture settings error
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Snapshot encoding error
    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use restir_graph::graphs::rtxdi::render_graph_rtxdi;
    use restir_graph::options::AccumulateOptions;

    fn temp_scene(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("restir_session_{}_{}", std::process::id(), name));
        std::fs::write(&path, b"# scene\n").unwrap();
        path
    }

    #[test]
    fn test_add_graph() {
        let mut session = Session::new();
        session.add_graph(render_graph_rtxdi().unwrap()).unwrap();
        assert_eq!(session.active_graph().unwrap().name, "RTXDI");

        let err = session.add_graph(render_graph_rtxdi().unwrap()).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateGraph(name) if name == "RTXDI"));
        assert_eq!(session.graphs().count(), 1);
    }

    #[test]
    fn test_invalid_graph_rejected() {
        let mut session = Session::new();
        let mut graph = RenderGraph::new("Broken");
        graph.create_pass("Acc", AccumulateOptions::default()).unwrap();
        let err = session.add_graph(graph).unwrap_err();
        assert_eq!(err.to_string(), "Invalid graph Broken: Required input not connected: Acc.input");
        assert!(session.graph("Broken").is_none());
    }

    #[test]
    fn test_renamed_node_key_rejected() {
        let mut value = serde_json::to_value(render_graph_rtxdi().unwrap()).unwrap();
        let nodes = value["nodes"].as_object_mut().unwrap();
        let node = nodes.remove("ToneMapper").unwrap();
        nodes.insert("Ghost".to_string(), node);
        let graph: RenderGraph = serde_json::from_value(value).unwrap();

        let mut session = Session::new();
        let err = session.add_graph(graph).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidGraph { ref name, source: GraphError::NodeNameMismatch { ref key, .. } }
                if name == "RTXDI" && key == "Ghost"
        ));
        assert!(session.graph("RTXDI").is_none());
        assert!(session.active_graph().is_none());
    }

    #[test]
    fn test_remove_graph() {
        let mut session = Session::new();
        session.add_graph(render_graph_rtxdi().unwrap()).unwrap();
        assert!(session.set_active_graph("Other").is_err());
        assert!(session.remove_graph("RTXDI").is_some());
        assert!(session.active_graph().is_none());
    }

    #[test]
    fn test_scene_required() {
        let mut session = Session::new();
        assert!(matches!(session.scene_mut(), Err(SessionError::NoScene)));

        let path = temp_scene("room.pyscene");
        session.load_scene(&path).unwrap();
        session.scene_mut().unwrap().set_camera_speed(1.0).unwrap();
        assert_eq!(session.scene().unwrap().path(), path.as_path());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_scene_error_names_path() {
        let mut session = Session::new();
        let path = std::env::temp_dir().join("restir_missing_room.pyscene");
        let err = session.load_scene(&path).unwrap_err();
        assert!(err.to_string().contains("restir_missing_room.pyscene"));
    }

    #[test]
    fn test_resize_frame_buffer() {
        let mut session = Session::new();
        session.resize_frame_buffer(1280, 800).unwrap();
        assert_eq!(session.frame_buffer(), FrameBufferSize { width: 1280, height: 800 });
        assert!(session.resize_frame_buffer(0, 800).is_err());
        assert!(session.resize_frame_buffer(1280, MAX_FRAME_BUFFER_DIMENSION + 1).is_err());
        assert_eq!(session.frame_buffer().width, 1280);
    }

    #[test]
    fn test_capture_paths() {
        let mut session = Session::new();
        assert!(session.capture_paths(0).is_empty());

        session.add_graph(render_graph_rtxdi().unwrap()).unwrap();
        session.frame_capture_mut().set_output_dir("/captures");
        session.frame_capture_mut().set_base_filename("Mogwai").unwrap();
        assert_eq!(
            session.capture_paths(3),
            vec![
                PathBuf::from("/captures/Mogwai.RTXDI.ToneMapper.dst.3.exr"),
                PathBuf::from("/captures/Mogwai.RTXDI.AccumulatePass.output.3.exr"),
            ]
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = Session::new();
        session.add_graph(render_graph_rtxdi().unwrap()).unwrap();
        session.set_ui(true);
        session.clock_mut().set_framerate(30);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.active_graph.as_deref(), Some("RTXDI"));
        assert!(snapshot.scene_path.is_none());

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(SessionSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}
