// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame capture destination.
//!
//! Only where captures go is configured here; triggering captures is left to
//! the host UI or an external driver.

use restir_graph::PortRef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default capture file extension
pub const DEFAULT_CAPTURE_EXTENSION: &str = "exr";

/// Frame capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameCapture {
    output_dir: PathBuf,
    base_filename: String,
    extension: String,
}

impl FrameCapture {
    /// Create capture settings writing to `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, base_filename: &str) -> Result<Self, CaptureError> {
        let mut capture = Self::default();
        capture.set_output_dir(output_dir);
        capture.set_base_filename(base_filename)?;
        Ok(capture)
    }

    /// Directory captures are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Set the capture directory
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Prefix of every capture file name
    pub fn base_filename(&self) -> &str {
        &self.base_filename
    }

    /// Set the file name prefix
    pub fn set_base_filename(&mut self, name: &str) -> Result<(), CaptureError> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(CaptureError::InvalidBaseFilename(name.to_string()));
        }
        self.base_filename = name.to_string();
        Ok(())
    }

    /// Capture file extension
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the capture of `output` in graph `graph` at `frame`
    ///
    /// Files are named `<base>.<graph>.<node>.<port>.<frame>.<ext>`.
    pub fn output_path(&self, graph: &str, output: &PortRef, frame: u64) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}.{}.{}.{}",
            self.base_filename, graph, output, frame, self.extension
        ))
    }
}

impl Default for FrameCapture {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            base_filename: "Frame".to_string(),
            extension: DEFAULT_CAPTURE_EXTENSION.to_string(),
        }
    }
}

/// Capture errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// Empty name or name containing a path separator
    #[error("Invalid capture base filename: '{0}'")]
    InvalidBaseFilename(String),
}
