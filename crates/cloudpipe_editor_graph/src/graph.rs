// SPDX-License-Identifier: MIT OR Apache-2.0
//! The pipeline graph: the sole mutable aggregate of the editor core.
//!
//! Every mutation goes through the operations on [`Graph`] and is
//! all-or-nothing: a failed operation returns an error and leaves the graph
//! exactly as it was.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::stage::{
    Capability, Multiplicity, ParamMismatch, ParamValue, PortDirection, StageRegistry, StageType,
    UnknownStageType, PROCESSING_OPTIONS,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Identity token of a graph, carried into its exported documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(pub Uuid);

impl GraphId {
    /// Create a new random graph ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A pipeline graph of stage nodes and connections
#[derive(Debug, Clone)]
pub struct Graph {
    id: GraphId,
    nodes: IndexMap<NodeId, Node>,
    connections: IndexMap<ConnectionId, Connection>,
    /// Outgoing connections per node, so reachability walks touch only the
    /// edges they actually follow instead of scanning the whole edge set.
    outgoing: HashMap<NodeId, Vec<ConnectionId>>,
}

impl Graph {
    /// Create a new empty graph with a fresh identity
    pub fn new() -> Self {
        Self::with_id(GraphId::new())
    }

    /// Create a new empty graph with a known identity
    pub fn with_id(id: GraphId) -> Self {
        Self {
            id,
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            outgoing: HashMap::new(),
        }
    }

    /// The graph's identity token
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node IDs, in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// All connections, in insertion order
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections involving a node, either as source or target
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .values()
            .filter(move |connection| connection.involves_node(node_id))
    }

    /// Place a new node of the given stage type
    ///
    /// `initial` entries are validated against the stage's parameter schema;
    /// parameters not supplied keep their schema defaults.
    pub fn add_node(
        &mut self,
        stage: &StageType,
        initial: IndexMap<String, ParamValue>,
        position: [f64; 2],
    ) -> Result<NodeId, GraphError> {
        let mut node = Node::new(stage).with_position(position[0], position[1]);
        for (key, value) in initial {
            stage
                .check_parameter(&key, &value)
                .map_err(|source| GraphError::InvalidParameter {
                    stage: stage.type_name.clone(),
                    key: key.clone(),
                    source,
                })?;
            node.parameters.insert(key, value);
        }
        self.insert_node(node)
    }

    /// Insert a fully built node, keeping its ID
    ///
    /// Used when reconstructing a graph from a document; fails if the ID is
    /// already taken.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        let id = node.id;
        debug!(node = %id, stage = %node.stage_type, "node added");
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node, cascading removal of all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<Node, GraphError> {
        if !self.nodes.contains_key(&node_id) {
            return Err(GraphError::NodeNotFound(node_id));
        }
        let cascaded: Vec<ConnectionId> = self
            .connections_for_node(node_id)
            .map(|connection| connection.id)
            .collect();
        for connection_id in &cascaded {
            if let Some(connection) = self.connections.shift_remove(connection_id) {
                self.unindex(&connection);
            }
        }
        self.outgoing.remove(&node_id);
        let node = self
            .nodes
            .shift_remove(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        debug!(node = %node_id, cascaded = cascaded.len(), "node removed");
        Ok(node)
    }

    /// Connect an output port to an input port
    ///
    /// Enforces port resolution, capability equality, input multiplicity and
    /// acyclicity before inserting anything.
    pub fn connect(
        &mut self,
        registry: &StageRegistry,
        from_node: NodeId,
        from_port: &str,
        to_node: NodeId,
        to_port: &str,
    ) -> Result<ConnectionId, GraphError> {
        let source = self
            .nodes
            .get(&from_node)
            .ok_or(GraphError::NodeNotFound(from_node))?;
        let target = self
            .nodes
            .get(&to_node)
            .ok_or(GraphError::NodeNotFound(to_node))?;
        let source_stage = registry.lookup(&source.stage_type)?;
        let target_stage = registry.lookup(&target.stage_type)?;

        // Prefer the port with the expected direction; fall back to a
        // same-name port of the other direction so that dragging a raster
        // output onto a points output says "capability mismatch" rather
        // than "no such port". The direction itself is checked after the
        // capability.
        let source_spec = source_stage
            .output(from_port)
            .or_else(|| source_stage.ports.iter().find(|port| port.name == from_port))
            .ok_or_else(|| GraphError::PortNotFound {
                stage: source_stage.type_name.clone(),
                port: from_port.to_string(),
                direction: PortDirection::Output,
            })?;
        let target_spec = target_stage
            .input(to_port)
            .or_else(|| target_stage.ports.iter().find(|port| port.name == to_port))
            .ok_or_else(|| GraphError::PortNotFound {
                stage: target_stage.type_name.clone(),
                port: to_port.to_string(),
                direction: PortDirection::Input,
            })?;

        if source_spec.capability != target_spec.capability {
            return Err(GraphError::CapabilityMismatch {
                from_port: from_port.to_string(),
                from: source_spec.capability,
                to_port: to_port.to_string(),
                to: target_spec.capability,
            });
        }
        if source_spec.direction != PortDirection::Output {
            return Err(GraphError::PortNotFound {
                stage: source_stage.type_name.clone(),
                port: from_port.to_string(),
                direction: PortDirection::Output,
            });
        }
        if target_spec.direction != PortDirection::Input {
            return Err(GraphError::PortNotFound {
                stage: target_stage.type_name.clone(),
                port: to_port.to_string(),
                direction: PortDirection::Input,
            });
        }

        if target_spec.multiplicity == Multiplicity::Single
            && self
                .connections
                .values()
                .any(|connection| connection.to_node == to_node && connection.to_port == to_port)
        {
            return Err(GraphError::PortOccupied {
                node: to_node,
                port: to_port.to_string(),
            });
        }

        if from_node == to_node || self.reaches(to_node, from_node) {
            return Err(GraphError::WouldCreateCycle { from_node, to_node });
        }

        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id;
        self.outgoing.entry(from_node).or_default().push(id);
        self.connections.insert(id, connection);
        debug!(connection = %id, from = %from_node, to = %to_node, "connection added");
        Ok(id)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Result<Connection, GraphError> {
        let connection = self
            .connections
            .shift_remove(&connection_id)
            .ok_or(GraphError::ConnectionNotFound(connection_id))?;
        self.unindex(&connection);
        debug!(connection = %connection_id, "connection removed");
        Ok(connection)
    }

    /// Replace a parameter value, last write wins
    pub fn set_parameter(
        &mut self,
        registry: &StageRegistry,
        node_id: NodeId,
        key: &str,
        value: ParamValue,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let stage = registry.lookup(&node.stage_type)?;
        stage
            .check_parameter(key, &value)
            .map_err(|source| GraphError::InvalidParameter {
                stage: stage.type_name.clone(),
                key: key.to_string(),
                source,
            })?;
        node.parameters.insert(key.to_string(), value);
        Ok(())
    }

    /// Replace a node's display label
    pub fn set_label(
        &mut self,
        node_id: NodeId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        node.label = label.into();
        Ok(())
    }

    /// Scan the whole graph for problems that keep it from being executable
    ///
    /// Non-mutating. The pipeline is ready to hand to the execution engine
    /// iff the returned list is empty.
    pub fn validate(&self, registry: &StageRegistry) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for node in self.nodes.values() {
            let Ok(stage) = registry.lookup(&node.stage_type) else {
                continue;
            };
            for port in stage.inputs().filter(|port| port.required) {
                let connected = self
                    .connections
                    .values()
                    .any(|c| c.to_node == node.id && c.to_port == port.name);
                if !connected {
                    diagnostics.push(Diagnostic::UnconnectedInput {
                        node: node.id,
                        label: node.label.clone(),
                        port: port.name.clone(),
                    });
                }
            }
        }

        let options_count = self
            .nodes
            .values()
            .filter(|node| node.stage_type == PROCESSING_OPTIONS)
            .count();
        if options_count > 1 {
            diagnostics.push(Diagnostic::MultipleProcessingOptions {
                count: options_count,
            });
        }

        let mut reached: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<NodeId> = Vec::new();
        for node in self.nodes.values() {
            if registry
                .lookup(&node.stage_type)
                .is_ok_and(StageType::is_reader)
            {
                stack.push(node.id);
            }
        }
        while let Some(current) = stack.pop() {
            if !reached.insert(current) {
                continue;
            }
            for next in self.successors(current) {
                stack.push(next);
            }
        }
        for node in self.nodes.values() {
            let Ok(stage) = registry.lookup(&node.stage_type) else {
                continue;
            };
            // Stages with no ports carry settings, not data flow.
            if stage.ports.is_empty() || reached.contains(&node.id) {
                continue;
            }
            diagnostics.push(Diagnostic::OrphanNode {
                node: node.id,
                label: node.label.clone(),
            });
        }

        diagnostics
    }

    /// Whether `needle` can be reached from `start` along existing edges
    fn reaches(&self, start: NodeId, needle: NodeId) -> bool {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == needle {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            for next in self.successors(current) {
                stack.push(next);
            }
        }
        false
    }

    fn successors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing
            .get(&node_id)
            .into_iter()
            .flatten()
            .filter_map(|connection_id| self.connections.get(connection_id))
            .map(|connection| connection.to_node)
    }

    fn unindex(&mut self, connection: &Connection) {
        if let Some(out) = self.outgoing.get_mut(&connection.from_node) {
            out.retain(|id| *id != connection.id);
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Error from a graph operation
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node's stage type is missing from the registry
    #[error(transparent)]
    UnknownStageType(#[from] UnknownStageType),

    /// Node not found
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Connection not found
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    /// No port with the requested name and direction
    #[error("stage {stage} has no {direction} port named {port:?}")]
    PortNotFound {
        /// Stage type that was searched
        stage: String,
        /// Requested port name
        port: String,
        /// Direction the port was expected to have
        direction: PortDirection,
    },

    /// The two ports carry different kinds of data
    #[error("capability mismatch: {from_port:?} carries {from} but {to_port:?} carries {to}")]
    CapabilityMismatch {
        /// Source port name
        from_port: String,
        /// Source capability
        from: Capability,
        /// Target port name
        to_port: String,
        /// Target capability
        to: Capability,
    },

    /// A single-connection input already has an incoming edge
    #[error("input port {port:?} of node {node} already has a connection")]
    PortOccupied {
        /// Target node
        node: NodeId,
        /// Occupied input port name
        port: String,
    },

    /// The edge would close a directed cycle
    #[error("connecting {from_node} to {to_node} would create a cycle")]
    WouldCreateCycle {
        /// Source node of the rejected edge
        from_node: NodeId,
        /// Target node of the rejected edge
        to_node: NodeId,
    },

    /// A node with this ID already exists
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// A parameter assignment does not fit the stage schema
    #[error("parameter {key:?} of stage {stage}: {source}")]
    InvalidParameter {
        /// Stage type whose schema rejected the value
        stage: String,
        /// Parameter key
        key: String,
        /// Why the value was rejected
        source: ParamMismatch,
    },
}

/// A problem reported by [`Graph::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A required input port has no incoming connection
    UnconnectedInput {
        /// Node with the open input
        node: NodeId,
        /// Display label of the node
        label: String,
        /// Name of the unconnected port
        port: String,
    },
    /// More than one pipeline-settings node is present
    MultipleProcessingOptions {
        /// How many were found
        count: usize,
    },
    /// A node no reader stage feeds into
    OrphanNode {
        /// The unreachable node
        node: NodeId,
        /// Display label of the node
        label: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnconnectedInput { label, port, .. } => {
                write!(f, "required input {port:?} of {label:?} is not connected")
            }
            Self::MultipleProcessingOptions { count } => {
                write!(f, "{count} processing option nodes; at most one is allowed")
            }
            Self::OrphanNode { label, .. } => {
                write!(f, "{label:?} is not reachable from any reader stage")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::create_stage_registry;
    use crate::stage::PortSpec;

    fn graph_with(registry: &StageRegistry, types: &[&str]) -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let ids = types
            .iter()
            .map(|name| {
                graph
                    .add_node(registry.lookup(name).unwrap(), IndexMap::new(), [0.0, 0.0])
                    .unwrap()
            })
            .collect();
        (graph, ids)
    }

    #[test]
    fn add_node_rejects_unknown_parameter_and_leaves_graph_unchanged() {
        let registry = create_stage_registry();
        let mut graph = Graph::new();
        let initial = IndexMap::from([("rez".to_string(), ParamValue::Number(5.0))]);
        let err = graph
            .add_node(registry.lookup("rasterize").unwrap(), initial, [0.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn add_node_overlays_initial_parameters_over_defaults() {
        let registry = create_stage_registry();
        let mut graph = Graph::new();
        let initial = IndexMap::from([("res".to_string(), ParamValue::Number(1.0))]);
        let id = graph
            .add_node(registry.lookup("rasterize").unwrap(), initial, [10.0, 20.0])
            .unwrap();
        let node = graph.node(id).unwrap();
        assert_eq!(node.parameter("res"), Some(&ParamValue::Number(1.0)));
        assert_eq!(node.parameter("method"), Some(&"z_mean".into()));
        assert_eq!(node.position, [10.0, 20.0]);
    }

    #[test]
    fn connect_reader_to_rasterize_succeeds() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        let id = graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        assert!(graph.connection(id).is_some());
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn second_connection_to_single_input_is_rejected() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "reader_las", "rasterize"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[2], "cloud")
            .unwrap();
        let err = graph
            .connect(&registry, ids[1], "cloud", ids[2], "cloud")
            .unwrap_err();
        assert!(matches!(err, GraphError::PortOccupied { .. }));
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn backwards_connection_reports_capability_mismatch() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        let err = graph
            .connect(&registry, ids[1], "raster", ids[0], "cloud")
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::CapabilityMismatch {
                from: Capability::Raster,
                to: Capability::Points,
                ..
            }
        ));
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn capability_mismatch_between_tin_and_points_is_rejected() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["triangulate", "write_las"]);
        let err = graph
            .connect(&registry, ids[0], "tin", ids[1], "cloud")
            .unwrap_err();
        assert!(matches!(err, GraphError::CapabilityMismatch { .. }));
    }

    #[test]
    fn cycle_through_transform_chain_is_rejected() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["transform_with", "rasterize"]);
        // transform -> rasterize (cloud), rasterize -> transform (raster):
        // the second edge closes a two-node loop.
        graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        let err = graph
            .connect(&registry, ids[1], "raster", ids[0], "raster")
            .unwrap_err();
        assert!(matches!(err, GraphError::WouldCreateCycle { .. }));
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn self_loop_is_rejected() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["transform_with"]);
        let err = graph
            .connect(&registry, ids[0], "cloud", ids[0], "cloud")
            .unwrap_err();
        assert!(matches!(err, GraphError::WouldCreateCycle { .. }));
    }

    #[test]
    fn unknown_port_name_is_reported() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        let err = graph
            .connect(&registry, ids[0], "clouds", ids[1], "cloud")
            .unwrap_err();
        assert!(matches!(err, GraphError::PortNotFound { .. }));
    }

    #[test]
    fn multiple_multiplicity_input_accepts_fan_in() {
        let mut registry = create_stage_registry();
        registry.register(StageType {
            type_name: "merge".to_string(),
            ports: vec![
                PortSpec::input("cloud", Capability::Points).multiple().required(),
                PortSpec::output("cloud", Capability::Points),
            ],
            params: IndexMap::new(),
        });
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "reader_las", "merge"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[2], "cloud")
            .unwrap();
        graph
            .connect(&registry, ids[1], "cloud", ids[2], "cloud")
            .unwrap();
        assert_eq!(graph.connection_count(), 2);
    }

    #[test]
    fn remove_node_cascades_connections() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        graph.remove_node(ids[0]).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.connection_count(), 0);
        let diagnostics = graph.validate(&registry);
        assert!(diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::UnconnectedInput { node, port, .. }
                if *node == ids[1] && port == "cloud"
        )));
    }

    #[test]
    fn remove_missing_node_fails() {
        let registry = create_stage_registry();
        let (mut graph, _) = graph_with(&registry, &["reader_las"]);
        let err = graph.remove_node(NodeId::new()).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }

    #[test]
    fn disconnect_removes_only_the_edge() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        let connection = graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        graph.disconnect(connection).unwrap();
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.node_count(), 2);
        let err = graph.disconnect(connection).unwrap_err();
        assert!(matches!(err, GraphError::ConnectionNotFound(_)));
    }

    #[test]
    fn disconnect_frees_the_input_port() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize"]);
        let connection = graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        graph.disconnect(connection).unwrap();
        assert!(graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .is_ok());
    }

    #[test]
    fn set_parameter_validates_against_schema() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["triangulate"]);
        graph
            .set_parameter(&registry, ids[0], "use_attribute", "Intensity".into())
            .unwrap();
        let err = graph
            .set_parameter(&registry, ids[0], "use_attribute", "Red".into())
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));
        assert_eq!(
            graph.node(ids[0]).unwrap().parameter("use_attribute"),
            Some(&"Intensity".into())
        );
    }

    #[test]
    fn validate_reports_multiple_processing_options() {
        let registry = create_stage_registry();
        let (graph, _) = graph_with(
            &registry,
            &["processing_options", "processing_options", "reader_las"],
        );
        let diagnostics = graph.validate(&registry);
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::MultipleProcessingOptions { count: 2 })));
    }

    #[test]
    fn validate_reports_orphan_nodes() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "rasterize", "write_las"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        let diagnostics = graph.validate(&registry);
        // write_las is unreached; reader_las and the connected rasterize are not.
        assert!(diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::OrphanNode { node, .. } if *node == ids[2])));
        assert!(!diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::OrphanNode { node, .. } if *node == ids[1])));
    }

    #[test]
    fn validate_is_empty_for_an_executable_pipeline() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["processing_options", "reader_las", "write_las"]);
        graph
            .connect(&registry, ids[1], "cloud", ids[2], "cloud")
            .unwrap();
        assert!(graph.validate(&registry).is_empty());
    }

    #[test]
    fn optional_operand_inputs_do_not_show_up_in_diagnostics() {
        let registry = create_stage_registry();
        let (mut graph, ids) = graph_with(&registry, &["reader_las", "transform_with"]);
        graph
            .connect(&registry, ids[0], "cloud", ids[1], "cloud")
            .unwrap();
        let diagnostics = graph.validate(&registry);
        assert!(!diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnconnectedInput { node, .. } if *node == ids[1])));
    }
}
