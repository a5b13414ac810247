// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interchange document codec.
//!
//! The document is the contract between the editor and the execution
//! engine: a top-level identity token plus one record per node carrying its
//! parameters and port links. Presentation-only fields never appear in a
//! freshly built document; foreign documents that still carry them are
//! scrubbed on ingest.

use crate::graph::{Graph, GraphError, GraphId};
use crate::node::{Node, NodeId};
use crate::stage::{ParamValue, StageRegistry, UnknownStageType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// One peer endpoint of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerLink {
    /// Peer node id
    pub node: String,
    /// Port name on the peer node
    pub port: String,
}

/// All links attached to one port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortLinks {
    /// Peer endpoints, in connection order
    pub connections: Vec<PeerLink>,
}

/// Serialized form of one node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node id, equal to the record's key in the document
    pub id: String,
    /// Stage type name
    pub name: String,
    /// Parameter values
    #[serde(default)]
    pub data: IndexMap<String, ParamValue>,
    /// Display label; falls back to the stage type name when empty
    #[serde(default)]
    pub class: String,
    /// Incoming links keyed by input port name
    #[serde(default)]
    pub inputs: IndexMap<String, PortLinks>,
    /// Outgoing links keyed by output port name
    #[serde(default)]
    pub outputs: IndexMap<String, PortLinks>,
    /// Canvas x position
    #[serde(default)]
    pub pos_x: f64,
    /// Canvas y position
    #[serde(default)]
    pub pos_y: f64,
}

/// The interchange document handed to the execution engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDocument {
    /// Top-level identity token
    pub id: GraphId,
    /// Node records keyed by node id
    pub nodes: IndexMap<String, NodeRecord>,
}

impl PipelineDocument {
    /// Parse a document from a JSON tree of unknown origin
    ///
    /// Presentation fields are stripped first, so documents exported by the
    /// rendering layer (which embeds node markup) parse the same as clean
    /// ones.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let value = strip_presentation(value);
        serde_json::from_value(value).map_err(|err| DocumentError::Malformed(err.to_string()))
    }
}

/// Error from document parsing or graph reconstruction
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Required structure or fields are missing or mistyped
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A record names a stage type missing from the registry
    #[error(transparent)]
    UnknownStageType(#[from] UnknownStageType),

    /// A `data` entry does not fit the stage's parameter schema
    #[error("node {node}: {source}")]
    InvalidParameter {
        /// Record id of the offending node
        node: String,
        /// The schema rejection
        source: GraphError,
    },

    /// Reconstructing the graph would violate one of its invariants
    #[error("invalid graph ({invariant}): {source}")]
    InvalidGraph {
        /// Which invariant the document breaks
        invariant: &'static str,
        /// The underlying rejection
        source: GraphError,
    },
}

/// Remove every object key named `html`, at any depth
///
/// Arrays keep their order, sibling keys are untouched, scalars pass
/// through. Idempotent.
pub fn strip_presentation(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| key != "html")
                .map(|(key, nested)| (key, strip_presentation(nested)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_presentation).collect()),
        other => other,
    }
}

/// Export a graph as the canonical document for the execution engine
pub fn export_graph(graph: &Graph) -> PipelineDocument {
    let mut records: IndexMap<String, NodeRecord> = graph
        .nodes()
        .map(|node| {
            (
                node.id.to_string(),
                NodeRecord {
                    id: node.id.to_string(),
                    name: node.stage_type.clone(),
                    data: node.parameters.clone(),
                    class: node.label.clone(),
                    inputs: IndexMap::new(),
                    outputs: IndexMap::new(),
                    pos_x: node.position[0],
                    pos_y: node.position[1],
                },
            )
        })
        .collect();

    for connection in graph.connections() {
        let from_key = connection.from_node.to_string();
        let to_key = connection.to_node.to_string();
        if let Some(record) = records.get_mut(&to_key) {
            record
                .inputs
                .entry(connection.to_port.clone())
                .or_default()
                .connections
                .push(PeerLink {
                    node: from_key.clone(),
                    port: connection.from_port.clone(),
                });
        }
        if let Some(record) = records.get_mut(&from_key) {
            record
                .outputs
                .entry(connection.from_port.clone())
                .or_default()
                .connections
                .push(PeerLink {
                    node: to_key,
                    port: connection.to_port.clone(),
                });
        }
    }

    debug!(nodes = records.len(), connections = graph.connection_count(), "graph exported");
    PipelineDocument {
        id: graph.id(),
        nodes: records,
    }
}

/// Export a copy for user-facing inspection
///
/// Identical to [`export_graph`] except for a freshly generated identity
/// token, so duplicated exports are distinguishable. Never the canonical
/// handoff to the engine.
pub fn export_for_display(graph: &Graph) -> PipelineDocument {
    let mut document = export_graph(graph);
    document.id = GraphId::new();
    document
}

/// Reconstruct a graph from a document
///
/// Node ids, stage types, parameters, labels, positions and the connection
/// set are restored exactly; connection ids are freshly assigned. The
/// reconstructed graph is re-checked against every structural invariant,
/// and inconsistent input is reported rather than dropped.
pub fn import_graph(
    document: &PipelineDocument,
    registry: &StageRegistry,
) -> Result<Graph, DocumentError> {
    let mut graph = Graph::with_id(document.id);

    for (key, record) in &document.nodes {
        if *key != record.id {
            return Err(DocumentError::Malformed(format!(
                "node key {key:?} does not match record id {:?}",
                record.id
            )));
        }
        let id = parse_node_id(&record.id)?;
        let stage = registry.lookup(&record.name)?;

        let label = if record.class.is_empty() {
            record.name.clone()
        } else {
            record.class.clone()
        };
        let mut node = Node::new(stage)
            .with_label(label)
            .with_position(record.pos_x, record.pos_y);
        node.id = id;
        for (param, value) in &record.data {
            stage.check_parameter(param, value).map_err(|source| {
                DocumentError::InvalidParameter {
                    node: record.id.clone(),
                    source: GraphError::InvalidParameter {
                        stage: stage.type_name.clone(),
                        key: param.clone(),
                        source,
                    },
                }
            })?;
            node.parameters.insert(param.clone(), value.clone());
        }

        graph.insert_node(node).map_err(|source| DocumentError::InvalidGraph {
            invariant: invariant_name(&source),
            source,
        })?;
    }

    let edges = collect_edges(document)?;
    for (from_node, from_port, to_node, to_port) in edges {
        graph
            .connect(registry, from_node, &from_port, to_node, &to_port)
            .map_err(|source| DocumentError::InvalidGraph {
                invariant: invariant_name(&source),
                source,
            })?;
    }

    debug!(nodes = graph.node_count(), connections = graph.connection_count(), "graph imported");
    Ok(graph)
}

type Edge = (NodeId, String, NodeId, String);

/// Derive the edge list from the `inputs` tables, cross-checking that the
/// `outputs` tables describe the same edges
fn collect_edges(document: &PipelineDocument) -> Result<Vec<Edge>, DocumentError> {
    let mut edges: Vec<Edge> = Vec::new();
    let mut from_inputs: HashMap<Edge, usize> = HashMap::new();
    let mut from_outputs: HashMap<Edge, usize> = HashMap::new();

    for record in document.nodes.values() {
        let record_id = parse_node_id(&record.id)?;
        for (port, links) in &record.inputs {
            for link in &links.connections {
                let edge = (
                    parse_node_id(&link.node)?,
                    link.port.clone(),
                    record_id,
                    port.clone(),
                );
                *from_inputs.entry(edge.clone()).or_insert(0) += 1;
                edges.push(edge);
            }
        }
        for (port, links) in &record.outputs {
            for link in &links.connections {
                let edge = (
                    record_id,
                    port.clone(),
                    parse_node_id(&link.node)?,
                    link.port.clone(),
                );
                *from_outputs.entry(edge).or_insert(0) += 1;
            }
        }
    }

    if from_inputs != from_outputs {
        return Err(DocumentError::Malformed(
            "inputs and outputs tables describe different connection sets".to_string(),
        ));
    }
    Ok(edges)
}

fn parse_node_id(text: &str) -> Result<NodeId, DocumentError> {
    Uuid::parse_str(text)
        .map(NodeId)
        .map_err(|_| DocumentError::Malformed(format!("node id {text:?} is not a valid identifier")))
}

fn invariant_name(error: &GraphError) -> &'static str {
    match error {
        GraphError::NodeNotFound(_) | GraphError::PortNotFound { .. } => "port resolution",
        GraphError::CapabilityMismatch { .. } => "capability equality",
        GraphError::PortOccupied { .. } => "input multiplicity",
        GraphError::WouldCreateCycle { .. } => "acyclicity",
        GraphError::DuplicateNodeId(_) => "id uniqueness",
        _ => "graph consistency",
    }
}
