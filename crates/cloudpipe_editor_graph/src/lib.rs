// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pipeline graph model for CloudPipe Editor.
//!
//! This crate provides the core of the visual pipeline editor for lidar
//! point-cloud processing:
//! - Typed stage catalog with port and parameter schemas
//! - Connection validation (capability, multiplicity, acyclicity)
//! - Pipeline diagnostics
//! - Interchange document export/import for the execution engine
//!
//! ## Architecture
//!
//! The model is a plain data structure mutated through [`Graph`] operations;
//! every operation either succeeds atomically or returns an error and leaves
//! the graph untouched. Presentation (node rendering, dialogs, canvas
//! layout) is owned by the host application, which only consumes this crate.

pub mod catalog;
pub mod connection;
pub mod document;
pub mod graph;
pub mod node;
pub mod stage;

pub use catalog::{create_stage_registry, default_pipeline};
pub use connection::{Connection, ConnectionId};
pub use document::{
    export_for_display, export_graph, import_graph, strip_presentation, DocumentError,
    NodeRecord, PeerLink, PipelineDocument, PortLinks,
};
pub use graph::{Diagnostic, Graph, GraphError, GraphId};
pub use node::{Node, NodeId};
pub use stage::{
    Capability, Multiplicity, ParamKind, ParamMismatch, ParamSpec, ParamValue, PortDirection,
    PortSpec, StageRegistry, StageType, UnknownStageType, PROCESSING_OPTIONS,
};
