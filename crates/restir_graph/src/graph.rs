// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render graph containing pass nodes, edges and marked outputs.

use crate::edge::Edge;
use crate::options::{OptionDict, OptionError, PassOptions};
use crate::pass::{PassNode, PassType, UnknownPassType};
use crate::port::{Port, PortDirection, PortRef, PortRefError};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A render graph
///
/// Equality is structural: node set with options, edge list and marked
/// output set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderGraph {
    /// Graph name
    pub name: String,
    /// Pass nodes by name
    nodes: IndexMap<String, PassNode>,
    /// Edges in creation order
    edges: Vec<Edge>,
    /// Outputs exposed outside the graph
    marked_outputs: IndexSet<PortRef>,
}

impl RenderGraph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
            marked_outputs: IndexSet::new(),
        }
    }

    /// Add a pass node with typed options
    pub fn create_pass(
        &mut self,
        name: &str,
        options: impl Into<PassOptions>,
    ) -> Result<&PassNode, GraphError> {
        if name.is_empty() || name.contains('.') {
            return Err(GraphError::InvalidPassName(name.to_string()));
        }
        if self.nodes.contains_key(name) {
            return Err(GraphError::DuplicatePass(name.to_string()));
        }

        let options = options.into();
        options.validate()?;

        tracing::debug!("{}: created pass {} ({})", self.name, name, options.pass_type());
        let node = self
            .nodes
            .entry(name.to_string())
            .or_insert(PassNode::new(name, options));
        Ok(&*node)
    }

    /// Add a pass node from a pass type name and a host option dictionary
    pub fn create_pass_from_dict(
        &mut self,
        name: &str,
        pass_type: &str,
        options: &OptionDict,
    ) -> Result<&PassNode, GraphError> {
        let pass_type: PassType = pass_type.parse()?;
        let options = PassOptions::from_dict(pass_type, options)?;
        self.create_pass(name, options)
    }

    /// Remove a pass along with its edges and marked outputs
    pub fn remove_pass(&mut self, name: &str) -> Option<PassNode> {
        self.edges.retain(|e| !e.involves_node(name));
        self.marked_outputs.retain(|p| p.node != name);
        self.nodes.shift_remove(name)
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> Option<&PassNode> {
        self.nodes.get(name)
    }

    /// Replace the options of an existing node
    ///
    /// Edges are checked against the node's ports, so the new options must
    /// belong to the same pass type.
    pub fn set_options(
        &mut self,
        name: &str,
        options: impl Into<PassOptions>,
    ) -> Result<(), GraphError> {
        let options = options.into();
        let node = self
            .nodes
            .get_mut(name)
            .ok_or_else(|| GraphError::PassNotFound(name.to_string()))?;
        if options.pass_type() != node.pass_type() {
            return Err(GraphError::PassTypeChange {
                pass: name.to_string(),
                from: node.pass_type(),
                to: options.pass_type(),
            });
        }
        options.validate()?;
        node.options = options;
        Ok(())
    }

    /// Get all node names
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connect `<node>.<port>` to `<node>.<port>`
    pub fn add_edge(&mut self, src: &str, dst: &str) -> Result<(), GraphError> {
        let src: PortRef = src.parse()?;
        let dst: PortRef = dst.parse()?;
        self.connect(src, dst)
    }

    /// Connect an output port to an input port
    pub fn connect(&mut self, src: PortRef, dst: PortRef) -> Result<(), GraphError> {
        let source_port = self.resolve_port(&src, PortDirection::Output)?;
        let target_port = self.resolve_port(&dst, PortDirection::Input)?;

        if src.node == dst.node {
            return Err(GraphError::SelfLoop(src.node));
        }

        if !source_port.can_connect(&target_port) {
            return Err(GraphError::IncompatiblePorts { src, dst });
        }

        if !target_port.multi_connect && self.edge_into(&dst).is_some() {
            return Err(GraphError::InputAlreadyConnected(dst));
        }

        tracing::debug!("{}: edge {} -> {}", self.name, src, dst);
        self.edges.push(Edge::new(src, dst));
        Ok(())
    }

    /// Remove the edge feeding an input port
    pub fn disconnect(&mut self, dst: &PortRef) -> Option<Edge> {
        let index = self.edges.iter().position(|e| &e.dst == dst)?;
        Some(self.edges.remove(index))
    }

    /// Get all edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the edge feeding an input port
    pub fn edge_into(&self, dst: &PortRef) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.dst == dst)
    }

    /// Expose an output port outside the graph
    pub fn mark_output(&mut self, port: &str) -> Result<(), GraphError> {
        let port: PortRef = port.parse()?;
        self.resolve_port(&port, PortDirection::Output)?;
        if self.marked_outputs.insert(port.clone()) {
            tracing::debug!("{}: marked output {}", self.name, port);
        }
        Ok(())
    }

    /// Stop exposing an output port
    pub fn unmark_output(&mut self, port: &PortRef) -> bool {
        self.marked_outputs.shift_remove(port)
    }

    /// Get marked outputs in marking order
    pub fn marked_outputs(&self) -> impl Iterator<Item = &PortRef> {
        self.marked_outputs.iter()
    }

    /// Required inputs that have no incoming edge
    pub fn unconnected_inputs(&self) -> Vec<PortRef> {
        let mut missing = Vec::new();
        for node in self.nodes.values() {
            for port in node.descriptor().required_inputs() {
                let port = PortRef::new(node.name.clone(), port.name.clone());
                if self.edge_into(&port).is_none() {
                    missing.push(port);
                }
            }
        }
        missing
    }

    /// Re-check every node, edge and marked output, as the host does when
    /// compiling a graph it did not build itself (e.g. one loaded from disk)
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut check = RenderGraph::new(self.name.clone());
        for (key, node) in &self.nodes {
            if *key != node.name {
                return Err(GraphError::NodeNameMismatch {
                    key: key.clone(),
                    name: node.name.clone(),
                });
            }
            check.create_pass(&node.name, node.options.clone())?;
        }
        for edge in &self.edges {
            check.connect(edge.src.clone(), edge.dst.clone())?;
        }
        for port in &self.marked_outputs {
            check.mark_output(&port.to_string())?;
        }
        if let Some(port) = check.unconnected_inputs().into_iter().next() {
            return Err(GraphError::MissingInput(port));
        }
        Ok(())
    }

    /// Get pass names in execution order (producers before consumers)
    pub fn execution_order(&self) -> Result<Vec<&str>, CycleError> {
        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::new();

        for name in self.nodes.keys() {
            if !visited.contains(name.as_str()) {
                self.visit(name, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        visited: &mut HashSet<&'a str>,
        temp_mark: &mut HashSet<&'a str>,
        order: &mut Vec<&'a str>,
    ) -> Result<(), CycleError> {
        if temp_mark.contains(name) {
            return Err(CycleError(name.to_string()));
        }
        if visited.contains(name) {
            return Ok(());
        }

        temp_mark.insert(name);

        // Producers first
        for edge in self.edges.iter().filter(|e| e.dst.node == name) {
            self.visit(&edge.src.node, visited, temp_mark, order)?;
        }

        temp_mark.remove(name);
        visited.insert(name);
        order.push(name);

        Ok(())
    }

    fn resolve_port(&self, port: &PortRef, direction: PortDirection) -> Result<Port, GraphError> {
        let node = self
            .nodes
            .get(&port.node)
            .ok_or_else(|| GraphError::PassNotFound(port.node.clone()))?;
        let descriptor = node.descriptor();

        if let Some(found) = descriptor.port(&port.port, direction) {
            return Ok(found.clone());
        }
        if descriptor.any_port(&port.port).is_some() {
            return Err(GraphError::WrongDirection {
                port: port.clone(),
                expected: direction,
            });
        }
        Err(GraphError::PortNotFound(port.clone()))
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when building a graph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Pass names must be non-empty and must not contain '.'
    #[error("Invalid pass name: '{0}'")]
    InvalidPassName(String),

    /// Pass name already used
    #[error("Duplicate pass name: {0}")]
    DuplicatePass(String),

    /// Pass not found
    #[error("Pass not found: {0}")]
    PassNotFound(String),

    /// Node stored under a different name than its own
    #[error("Pass {name} is stored under the name {key}")]
    NodeNameMismatch {
        /// Name the node is stored under
        key: String,
        /// Name recorded in the node
        name: String,
    },

    /// Options of another pass type assigned to an existing node
    #[error("Cannot change pass {pass} from {from} to {to}")]
    PassTypeChange {
        /// Pass name
        pass: String,
        /// Current pass type
        from: PassType,
        /// Pass type of the rejected options
        to: PassType,
    },

    /// Port not found on a known pass
    #[error("Port not found: {0}")]
    PortNotFound(PortRef),

    /// Port exists but has the other direction
    #[error("Port {port} is not an {expected:?} port")]
    WrongDirection {
        /// Offending port
        port: PortRef,
        /// Direction required at this position
        expected: PortDirection,
    },

    /// Incompatible port formats
    #[error("Incompatible ports: {src} -> {dst}")]
    IncompatiblePorts {
        /// Source output
        src: PortRef,
        /// Destination input
        dst: PortRef,
    },

    /// Input already has an incoming edge
    #[error("Input already connected: {0}")]
    InputAlreadyConnected(PortRef),

    /// Edge from a pass to itself
    #[error("Self-loop on pass {0}")]
    SelfLoop(String),

    /// Required input left unconnected
    #[error("Required input not connected: {0}")]
    MissingInput(PortRef),

    /// Malformed port reference
    #[error(transparent)]
    PortRef(#[from] PortRefError),

    /// Pass type not in the catalog
    #[error(transparent)]
    UnknownPassType(#[from] UnknownPassType),

    /// Invalid pass options
    #[error(transparent)]
    Options(#[from] OptionError),
}

/// Error when graph contains a cycle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Graph contains a cycle through pass {0}")]
pub struct CycleError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AccumulateOptions, OptionValue, ToneMapperOptions, VBufferRtOptions};

    fn chain() -> RenderGraph {
        let mut graph = RenderGraph::new("Test");
        graph.create_pass("Acc", AccumulateOptions::default()).unwrap();
        graph.create_pass("Tone", ToneMapperOptions::default()).unwrap();
        graph.add_edge("Acc.output", "Tone.src").unwrap();
        graph
    }

    #[test]
    fn test_duplicate_pass() {
        let mut graph = chain();
        let err = graph.create_pass("Acc", AccumulateOptions::default()).unwrap_err();
        assert_eq!(err, GraphError::DuplicatePass("Acc".to_string()));
    }

    #[test]
    fn test_invalid_pass_name() {
        let mut graph = RenderGraph::default();
        assert!(matches!(
            graph.create_pass("A.B", AccumulateOptions::default()),
            Err(GraphError::InvalidPassName(_))
        ));
    }

    #[test]
    fn test_create_pass_from_dict() {
        let mut graph = RenderGraph::default();
        let mut options = OptionDict::new();
        options.insert("sampleCount".to_string(), OptionValue::Int(4));
        let node = graph.create_pass_from_dict("VB", "VBufferRT", &options).unwrap();
        assert_eq!(node.pass_type(), PassType::VBufferRt);
        assert_eq!(node.options.to_dict()["sampleCount"], OptionValue::Int(4));

        let err = graph.create_pass_from_dict("PT", "PathTracer", &OptionDict::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown pass type: PathTracer");
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut graph = RenderGraph::default();
        let options = VBufferRtOptions {
            sample_count: 0,
            ..Default::default()
        };
        assert!(matches!(graph.create_pass("VB", options), Err(GraphError::Options(_))));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_edge_errors() {
        let mut graph = chain();
        assert_eq!(
            graph.add_edge("Missing.output", "Tone.src"),
            Err(GraphError::PassNotFound("Missing".to_string()))
        );
        assert_eq!(
            graph.add_edge("Acc.colour", "Tone.src"),
            Err(GraphError::PortNotFound(PortRef::new("Acc", "colour")))
        );
        assert!(matches!(
            graph.add_edge("Tone.src", "Acc.input"),
            Err(GraphError::WrongDirection { expected: PortDirection::Output, .. })
        ));
        assert_eq!(
            graph.add_edge("Acc.output", "Tone.src"),
            Err(GraphError::InputAlreadyConnected(PortRef::new("Tone", "src")))
        );
        assert_eq!(
            graph.add_edge("Acc.output", "Acc.input"),
            Err(GraphError::SelfLoop("Acc".to_string()))
        );
        assert!(matches!(graph.add_edge("Acc", "Tone.src"), Err(GraphError::PortRef(_))));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_incompatible_formats() {
        let mut graph = chain();
        graph.create_pass("Tone2", ToneMapperOptions::default()).unwrap();
        assert!(matches!(
            graph.add_edge("Tone.dst", "Tone2.src"),
            Err(GraphError::IncompatiblePorts { .. })
        ));
    }

    #[test]
    fn test_mark_output() {
        let mut graph = chain();
        graph.mark_output("Tone.dst").unwrap();
        graph.mark_output("Tone.dst").unwrap();
        assert_eq!(graph.marked_outputs().count(), 1);
        assert!(matches!(
            graph.mark_output("Tone.src"),
            Err(GraphError::WrongDirection { .. })
        ));
        assert!(graph.unmark_output(&PortRef::new("Tone", "dst")));
        assert_eq!(graph.marked_outputs().count(), 0);
    }

    #[test]
    fn test_remove_pass() {
        let mut graph = chain();
        graph.mark_output("Tone.dst").unwrap();
        let removed = graph.remove_pass("Tone").unwrap();
        assert_eq!(removed.pass_type(), PassType::ToneMapper);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.marked_outputs().count(), 0);
        assert!(graph.remove_pass("Tone").is_none());
    }

    #[test]
    fn test_disconnect() {
        let mut graph = chain();
        let dst = PortRef::new("Tone", "src");
        assert!(graph.disconnect(&dst).is_some());
        assert!(graph.edge_into(&dst).is_none());
        assert_eq!(graph.unconnected_inputs().len(), 2);
    }

    #[test]
    fn test_validate_requires_inputs() {
        let graph = chain();
        assert_eq!(
            graph.validate(),
            Err(GraphError::MissingInput(PortRef::new("Acc", "input")))
        );
    }

    #[test]
    fn test_set_options() {
        let mut graph = chain();
        let options = ToneMapperOptions {
            film_speed: 400.0,
            ..Default::default()
        };
        graph.set_options("Tone", options.clone()).unwrap();
        assert_eq!(graph.node("Tone").unwrap().options, PassOptions::ToneMapper(options));

        let bad = ToneMapperOptions {
            film_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(graph.set_options("Tone", bad), Err(GraphError::Options(_))));

        assert_eq!(
            graph.set_options("Tone", AccumulateOptions::default()),
            Err(GraphError::PassTypeChange {
                pass: "Tone".to_string(),
                from: PassType::ToneMapper,
                to: PassType::AccumulatePass,
            })
        );
        assert_eq!(
            graph.set_options("Missing", AccumulateOptions::default()),
            Err(GraphError::PassNotFound("Missing".to_string()))
        );
        assert_eq!(
            graph.node("Tone").unwrap().options,
            PassOptions::ToneMapper(ToneMapperOptions {
                film_speed: 400.0,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_execution_order() {
        let graph = chain();
        assert_eq!(graph.execution_order().unwrap(), vec!["Acc", "Tone"]);
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = chain();
        graph.create_pass("Acc2", AccumulateOptions::default()).unwrap();
        graph.add_edge("Acc2.output", "Acc.input").unwrap();
        // Close the loop through a second accumulator fed by the first
        graph.create_pass("Acc3", AccumulateOptions::default()).unwrap();
        graph.add_edge("Acc.output", "Acc3.input").unwrap();
        graph.add_edge("Acc3.output", "Acc2.input").unwrap();
        assert!(graph.execution_order().is_err());
    }
}
