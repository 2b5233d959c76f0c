// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for pass inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Texture format carried by a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceFormat {
    /// Accepts whatever is connected
    Any,
    /// 4 x f32
    Rgba32Float,
    /// 4 x u32 (packed hit info)
    Rgba32Uint,
    /// 4 x f16
    Rgba16Float,
    /// 2 x f32 (motion vectors)
    Rg32Float,
    /// 1 x f32
    R32Float,
    /// 1 x u32
    R32Uint,
    /// 4 x u8, sRGB encoded
    Rgba8UnormSrgb,
}

impl ResourceFormat {
    /// Check if a resource of this format can feed a port of another format
    pub fn can_connect_to(&self, other: &ResourceFormat) -> bool {
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        if self == other {
            return true;
        }

        // Float targets read lower precision float sources
        matches!(
            (self, other),
            (Self::Rgba16Float, Self::Rgba32Float) | (Self::R32Float, Self::Rg32Float)
        )
    }
}

/// A port on a pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port name, unique within its pass
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Resource format
    pub format: ResourceFormat,
    /// Whether the pass runs without this input connected; always false for outputs
    pub optional: bool,
    /// Whether multiple connections are allowed
    pub multi_connect: bool,
}

impl Port {
    /// Create a new input port
    pub fn input(name: impl Into<String>, format: ResourceFormat) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            format,
            optional: false,
            multi_connect: false,
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, format: ResourceFormat) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            format,
            optional: false,
            multi_connect: true, // Outputs fan out
        }
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Check if a connection from this port to `other` is valid
    pub fn can_connect(&self, other: &Port) -> bool {
        if self.direction != PortDirection::Output || other.direction != PortDirection::Input {
            return false;
        }

        self.format.can_connect_to(&other.format)
    }
}

/// Reference to a port as `<node>.<port>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortRef {
    /// Node name
    pub node: String,
    /// Port name on that node
    pub port: String,
}

impl PortRef {
    /// Create a port reference
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.port)
    }
}

impl FromStr for PortRef {
    type Err = PortRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Node names never contain '.', port names might
        let (node, port) = s
            .split_once('.')
            .ok_or_else(|| PortRefError(s.to_string()))?;
        if node.is_empty() || port.is_empty() {
            return Err(PortRefError(s.to_string()));
        }
        Ok(Self::new(node, port))
    }
}

impl TryFrom<String> for PortRef {
    type Error = PortRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PortRef> for String {
    fn from(value: PortRef) -> Self {
        value.to_string()
    }
}

/// Error when a port reference is not of the form `<node>.<port>`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed port reference '{0}', expected '<node>.<port>'")]
pub struct PortRefError(pub String);
