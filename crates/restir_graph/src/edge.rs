// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the render graph.

use crate::port::PortRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A connection from an output port to an input port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source output port
    pub src: PortRef,
    /// Destination input port
    pub dst: PortRef,
}

impl Edge {
    /// Create a new edge
    pub fn new(src: PortRef, dst: PortRef) -> Self {
        Self { src, dst }
    }

    /// Check if this edge involves a specific node
    pub fn involves_node(&self, node: &str) -> bool {
        self.src.node == node || self.dst.node == node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}
