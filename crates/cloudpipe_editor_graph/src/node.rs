// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node instances placed on the pipeline canvas.

use crate::stage::{ParamValue, StageType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stage instance in the graph
///
/// A node refers to its [`StageType`] by name; the registry stays the owner
/// of all type definitions. The parameter map is exclusively owned by the
/// node. `label` and `position` are opaque display metadata, never
/// validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Stage type name, resolved through the registry
    pub stage_type: String,
    /// Display label; defaults to the stage type name
    pub label: String,
    /// Parameter values keyed by schema name
    pub parameters: IndexMap<String, ParamValue>,
    /// Canvas position
    pub position: [f64; 2],
}

impl Node {
    /// Create a new node with every parameter at its schema default
    pub fn new(stage: &StageType) -> Self {
        Self {
            id: NodeId::new(),
            stage_type: stage.type_name.clone(),
            label: stage.type_name.clone(),
            parameters: stage
                .params
                .iter()
                .map(|(key, spec)| (key.clone(), spec.default.clone()))
                .collect(),
            position: [0.0, 0.0],
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Get a parameter value by key
    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Capability, ParamSpec, PortSpec};
    use indexmap::IndexMap;

    fn rasterize() -> StageType {
        StageType {
            type_name: "rasterize".to_string(),
            ports: vec![
                PortSpec::input("cloud", Capability::Points).required(),
                PortSpec::output("raster", Capability::Raster),
            ],
            params: IndexMap::from([
                ("res".to_string(), ParamSpec::number(20.0)),
                ("method".to_string(), ParamSpec::string("z_mean")),
            ]),
        }
    }

    #[test]
    fn new_node_fills_schema_defaults_in_order() {
        let node = Node::new(&rasterize());
        assert_eq!(node.stage_type, "rasterize");
        assert_eq!(node.label, "rasterize");
        let keys: Vec<&str> = node.parameters.keys().map(String::as_str).collect();
        assert_eq!(keys, ["res", "method"]);
        assert_eq!(node.parameter("res"), Some(&ParamValue::Number(20.0)));
        assert_eq!(node.parameter("method"), Some(&"z_mean".into()));
    }

    #[test]
    fn fresh_nodes_get_distinct_ids() {
        let stage = rasterize();
        assert_ne!(Node::new(&stage).id, Node::new(&stage).id);
    }
}
