// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render graph model for the ReSTIR DI pipeline.
//!
//! The passes themselves live in the host renderer. This crate describes
//! which passes a pipeline instantiates, how their ports are wired and which
//! outputs are exposed:
//! - Pass catalog with per-pass port layouts
//! - Strongly typed pass options, convertible to the host dictionary form
//! - Edge and marked output validation
//! - Execution ordering
//! - Serialization support
//!
//! ## Usage
//!
//! ```
//! use restir_graph::graphs::rtxdi::render_graph_rtxdi;
//!
//! let graph = render_graph_rtxdi().unwrap();
//! assert_eq!(graph.name, "RTXDI");
//! assert_eq!(graph.node_count(), 4);
//! ```

pub mod options;
pub mod pass;
pub mod port;
pub mod edge;
pub mod graph;
pub mod graphs;

pub use options::{OptionDict, OptionError, OptionValue, PassOptions, TypedOptions};
pub use pass::{PassDescriptor, PassNode, PassType, UnknownPassType};
pub use port::{Port, PortDirection, PortRef, PortRefError, ResourceFormat};
pub use edge::Edge;
pub use graph::{CycleError, GraphError, RenderGraph};
