// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stage type definitions: ports, parameter schemas, and the registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type name of the pipeline-wide settings stage.
///
/// At most one node of this type should exist per graph; it carries
/// execution options rather than data-flow work and declares no ports.
pub const PROCESSING_OPTIONS: &str = "processing_options";

/// Kind of data a port carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Point cloud
    Points,
    /// Gridded raster
    Raster,
    /// Triangulated mesh
    Tin,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => f.write_str("points"),
            Self::Raster => f.write_str("raster"),
            Self::Tin => f.write_str("tin"),
        }
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// How many connections an input port accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    /// At most one incoming connection
    Single,
    /// Any number of incoming connections
    Multiple,
}

/// A port declared by a stage type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port name, unique per direction within a stage type
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Kind of data flowing through the port
    pub capability: Capability,
    /// Incoming connection limit; outputs always fan out freely
    pub multiplicity: Multiplicity,
    /// Whether diagnostics report this input when left unconnected
    pub required: bool,
}

impl PortSpec {
    /// Create an input port (single connection, optional)
    pub fn input(name: impl Into<String>, capability: Capability) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Input,
            capability,
            multiplicity: Multiplicity::Single,
            required: false,
        }
    }

    /// Create an output port
    pub fn output(name: impl Into<String>, capability: Capability) -> Self {
        Self {
            name: name.into(),
            direction: PortDirection::Output,
            capability,
            multiplicity: Multiplicity::Multiple,
            required: false,
        }
    }

    /// Allow multiple incoming connections
    pub fn multiple(mut self) -> Self {
        self.multiplicity = Multiplicity::Multiple;
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Kind of a stage parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Free-form text, including macro tokens resolved by the engine
    String,
    /// Numeric value
    Number,
    /// One of a fixed set of string values
    Enum,
    /// Boolean flag
    Bool,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Enum => f.write_str("enum"),
            Self::Bool => f.write_str("bool"),
        }
    }
}

/// A parameter value carried by a node
///
/// Serialized untagged so the interchange document holds plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    String(String),
}

impl ParamValue {
    /// The kind this value satisfies
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Bool(_) => ParamKind::Bool,
            Self::Number(_) => ParamKind::Number,
            Self::String(_) => ParamKind::String,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Why a value does not fit a parameter schema entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamMismatch {
    /// The key is not part of the stage's schema
    #[error("no such parameter in the stage schema")]
    UnknownKey,

    /// The value has the wrong kind
    #[error("expected {expected}, got {got}")]
    Kind {
        /// Kind the schema declares
        expected: ParamKind,
        /// Kind of the rejected value
        got: ParamKind,
    },

    /// The value is not in the enum's allowed set
    #[error("{value:?} is not one of the allowed values")]
    NotAllowed {
        /// The rejected value
        value: String,
    },
}

/// Schema entry for one stage parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter kind
    pub kind: ParamKind,
    /// Value used when the parameter is not supplied
    pub default: ParamValue,
    /// Allowed values, for [`ParamKind::Enum`] only
    pub allowed_values: Option<Vec<String>>,
}

impl ParamSpec {
    /// Free-form string parameter
    pub fn string(default: impl Into<String>) -> Self {
        Self {
            kind: ParamKind::String,
            default: ParamValue::String(default.into()),
            allowed_values: None,
        }
    }

    /// Numeric parameter
    pub fn number(default: f64) -> Self {
        Self {
            kind: ParamKind::Number,
            default: ParamValue::Number(default),
            allowed_values: None,
        }
    }

    /// Boolean parameter
    pub fn boolean(default: bool) -> Self {
        Self {
            kind: ParamKind::Bool,
            default: ParamValue::Bool(default),
            allowed_values: None,
        }
    }

    /// Enumerated parameter; `default` must be one of `allowed`
    pub fn enumeration<const N: usize>(allowed: [&str; N], default: &str) -> Self {
        Self {
            kind: ParamKind::Enum,
            default: ParamValue::String(default.to_string()),
            allowed_values: Some(allowed.iter().map(ToString::to_string).collect()),
        }
    }

    /// Check a candidate value against this schema entry
    pub fn accepts(&self, value: &ParamValue) -> Result<(), ParamMismatch> {
        match self.kind {
            ParamKind::Enum => {
                let ParamValue::String(text) = value else {
                    return Err(ParamMismatch::Kind {
                        expected: ParamKind::Enum,
                        got: value.kind(),
                    });
                };
                let allowed = self.allowed_values.as_deref().unwrap_or_default();
                if allowed.iter().any(|entry| entry == text) {
                    Ok(())
                } else {
                    Err(ParamMismatch::NotAllowed {
                        value: text.clone(),
                    })
                }
            }
            expected => {
                if value.kind() == expected {
                    Ok(())
                } else {
                    Err(ParamMismatch::Kind {
                        expected,
                        got: value.kind(),
                    })
                }
            }
        }
    }
}

/// Immutable definition of a stage type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageType {
    /// Unique type name, e.g. `rasterize`
    pub type_name: String,
    /// Declared ports, in display order
    pub ports: Vec<PortSpec>,
    /// Parameter schema, in display order
    pub params: IndexMap<String, ParamSpec>,
}

impl StageType {
    /// All input ports, in declaration order
    pub fn inputs(&self) -> impl Iterator<Item = &PortSpec> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Input)
    }

    /// All output ports, in declaration order
    pub fn outputs(&self) -> impl Iterator<Item = &PortSpec> {
        self.ports
            .iter()
            .filter(|port| port.direction == PortDirection::Output)
    }

    /// Look up an input port by name
    pub fn input(&self, name: &str) -> Option<&PortSpec> {
        self.inputs().find(|port| port.name == name)
    }

    /// Look up an output port by name
    pub fn output(&self, name: &str) -> Option<&PortSpec> {
        self.outputs().find(|port| port.name == name)
    }

    /// Look up a parameter schema entry by key
    pub fn param(&self, key: &str) -> Option<&ParamSpec> {
        self.params.get(key)
    }

    /// Check one `key = value` assignment against the schema
    pub fn check_parameter(&self, key: &str, value: &ParamValue) -> Result<(), ParamMismatch> {
        let Some(spec) = self.param(key) else {
            return Err(ParamMismatch::UnknownKey);
        };
        spec.accepts(value)
    }

    /// Whether this is a data source: no inputs, at least one output
    pub fn is_reader(&self) -> bool {
        self.inputs().next().is_none() && self.outputs().next().is_some()
    }
}

/// Error from a registry lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage type: {0}")]
pub struct UnknownStageType(pub String);

/// Catalog of available stage types
///
/// Built once at startup and read-only afterwards; see
/// [`crate::catalog::create_stage_registry`].
#[derive(Debug, Clone, Default)]
pub struct StageRegistry {
    types: IndexMap<String, StageType>,
}

impl StageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage type, replacing any previous type of the same name
    pub fn register(&mut self, stage: StageType) {
        self.types.insert(stage.type_name.clone(), stage);
    }

    /// Resolve a stage type by name
    pub fn lookup(&self, type_name: &str) -> Result<&StageType, UnknownStageType> {
        self.types
            .get(type_name)
            .ok_or_else(|| UnknownStageType(type_name.to_string()))
    }

    /// All registered stage types, in registration order
    pub fn stage_types(&self) -> impl Iterator<Item = &StageType> {
        self.types.values()
    }

    /// Number of registered stage types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no stage types are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
