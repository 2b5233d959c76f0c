// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pass catalog and pass node definitions.
//!
//! Passes are implemented by the host engine. This module only knows their
//! names, their ports and, through [`PassOptions`], their option schemas.

use crate::options::PassOptions;
use crate::port::{Port, PortDirection, ResourceFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host-defined pass type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    /// Temporal accumulation of frames
    AccumulatePass,
    /// HDR to display tone mapping
    ToneMapper,
    /// Ray-traced visibility buffer
    #[serde(rename = "VBufferRT")]
    VBufferRt,
    /// ReSTIR direct illumination
    #[serde(rename = "RTXDIPass")]
    RtxdiPass,
}

impl PassType {
    /// Host name of the pass type
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccumulatePass => "AccumulatePass",
            Self::ToneMapper => "ToneMapper",
            Self::VBufferRt => "VBufferRT",
            Self::RtxdiPass => "RTXDIPass",
        }
    }

    /// All pass types in the catalog
    pub fn all() -> &'static [PassType] {
        &[
            Self::AccumulatePass,
            Self::ToneMapper,
            Self::VBufferRt,
            Self::RtxdiPass,
        ]
    }

    /// Port layout and description of this pass type
    pub fn descriptor(&self) -> PassDescriptor {
        use ResourceFormat::*;

        match self {
            Self::AccumulatePass => PassDescriptor {
                pass_type: *self,
                description: "Temporal accumulation of successive frames".to_string(),
                inputs: vec![Port::input("input", Any)],
                outputs: vec![Port::output("output", Rgba32Float)],
            },
            Self::ToneMapper => PassDescriptor {
                pass_type: *self,
                description: "Maps HDR radiance to a displayable image".to_string(),
                inputs: vec![Port::input("src", Rgba32Float)],
                outputs: vec![Port::output("dst", Rgba8UnormSrgb)],
            },
            Self::VBufferRt => PassDescriptor {
                pass_type: *self,
                description: "Ray-traced visibility buffer generation".to_string(),
                inputs: vec![],
                outputs: vec![
                    Port::output("vbuffer", Rgba32Uint),
                    Port::output("depth", R32Float),
                    Port::output("mvec", Rg32Float),
                    Port::output("viewW", Rgba32Float),
                    Port::output("time", R32Uint),
                    Port::output("mask", R32Float),
                ],
            },
            Self::RtxdiPass => PassDescriptor {
                pass_type: *self,
                description: "ReSTIR direct illumination resampling".to_string(),
                inputs: vec![
                    Port::input("vbuffer", Rgba32Uint),
                    Port::input("mvec", Rg32Float),
                    Port::input("texGrads", Rgba16Float).optional(),
                ],
                outputs: vec![
                    Port::output("color", Rgba32Float),
                    Port::output("emission", Rgba32Float),
                    Port::output("diffuseIllumination", Rgba32Float),
                    Port::output("diffuseReflectance", Rgba32Float),
                    Port::output("specularIllumination", Rgba32Float),
                    Port::output("specularReflectance", Rgba32Float),
                    Port::output("debug", Rgba32Float),
                ],
            },
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PassType {
    type Err = UnknownPassType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownPassType(s.to_string()))
    }
}

/// Error when a pass type name is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pass type: {0}")]
pub struct UnknownPassType(pub String);

/// Pass type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassDescriptor {
    /// Pass type
    pub pass_type: PassType,
    /// Description
    pub description: String,
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
}

impl PassDescriptor {
    /// Get a port by name and direction
    pub fn port(&self, name: &str, direction: PortDirection) -> Option<&Port> {
        let ports = match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.iter().find(|p| p.name == name)
    }

    /// Get a port by name in either direction
    pub fn any_port(&self, name: &str) -> Option<&Port> {
        self.ports().find(|p| p.name == name)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Inputs the pass cannot run without
    pub fn required_inputs(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().filter(|p| !p.optional)
    }
}

/// A pass instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassNode {
    /// Unique node name
    pub name: String,
    /// Typed options; the variant determines the pass type
    pub options: PassOptions,
}

impl PassNode {
    /// Create a node
    pub fn new(name: impl Into<String>, options: impl Into<PassOptions>) -> Self {
        Self {
            name: name.into(),
            options: options.into(),
        }
    }

    /// Pass type of this node
    pub fn pass_type(&self) -> PassType {
        self.options.pass_type()
    }

    /// Port layout of this node
    pub fn descriptor(&self) -> PassDescriptor {
        self.pass_type().descriptor()
    }
}
