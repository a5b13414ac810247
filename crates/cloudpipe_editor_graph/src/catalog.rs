// SPDX-License-Identifier: MIT OR Apache-2.0
//! The built-in stage catalog of the pipeline editor.
//!
//! Port and parameter schemas mirror what the execution engine expects for
//! each stage. String parameters may carry macro tokens (`#temptif()#` and
//! friends); the engine resolves those, not the editor.

use crate::graph::{Graph, GraphError};
use crate::node::Node;
use crate::stage::{Capability, ParamSpec, PortSpec, StageRegistry, StageType, PROCESSING_OPTIONS};
use indexmap::IndexMap;

/// Create the stage registry with all available stage types
pub fn create_stage_registry() -> StageRegistry {
    let mut registry = StageRegistry::new();

    // ========================================================================
    // Readers / writers
    // ========================================================================

    registry.register(StageType {
        type_name: "reader_las".to_string(),
        ports: vec![PortSpec::output("cloud", Capability::Points)],
        params: IndexMap::from([("filter".to_string(), ParamSpec::string(""))]),
    });

    registry.register(StageType {
        type_name: "write_las".to_string(),
        ports: vec![PortSpec::input("cloud", Capability::Points).required()],
        params: IndexMap::from([
            ("output".to_string(), ParamSpec::string("")),
            ("filter".to_string(), ParamSpec::string("")),
            ("keep_buffer".to_string(), ParamSpec::boolean(false)),
        ]),
    });

    // ========================================================================
    // Transforms
    // ========================================================================

    registry.register(StageType {
        type_name: "triangulate".to_string(),
        ports: vec![
            PortSpec::input("cloud", Capability::Points).required(),
            PortSpec::output("tin", Capability::Tin),
        ],
        params: IndexMap::from([
            ("max_edge".to_string(), ParamSpec::number(0.0)),
            ("filter".to_string(), ParamSpec::string("")),
            ("output".to_string(), ParamSpec::string("")),
            (
                "use_attribute".to_string(),
                ParamSpec::enumeration(["Z", "Intensity"], "Z"),
            ),
        ]),
    });

    // The operand is either a raster or a tin; each gets its own optional
    // port so every port keeps exactly one capability.
    registry.register(StageType {
        type_name: "transform_with".to_string(),
        ports: vec![
            PortSpec::input("cloud", Capability::Points).required(),
            PortSpec::input("raster", Capability::Raster),
            PortSpec::input("tin", Capability::Tin),
            PortSpec::output("cloud", Capability::Points),
        ],
        params: IndexMap::from([
            ("operator".to_string(), ParamSpec::enumeration(["-", "+"], "-")),
            ("store_in_attribute".to_string(), ParamSpec::string("Z")),
        ]),
    });

    registry.register(StageType {
        type_name: "rasterize".to_string(),
        ports: vec![
            PortSpec::input("cloud", Capability::Points).required(),
            PortSpec::output("raster", Capability::Raster),
        ],
        params: IndexMap::from([
            ("res".to_string(), ParamSpec::number(20.0)),
            ("method".to_string(), ParamSpec::string("z_mean")),
            ("filter".to_string(), ParamSpec::string("")),
            ("output".to_string(), ParamSpec::string("")),
            ("default_value".to_string(), ParamSpec::number(0.0)),
        ]),
    });

    registry.register(StageType {
        type_name: "rasterize_tin".to_string(),
        ports: vec![
            PortSpec::input("tin", Capability::Tin).required(),
            PortSpec::output("raster", Capability::Raster),
        ],
        params: IndexMap::from([
            ("res".to_string(), ParamSpec::number(20.0)),
            ("filter".to_string(), ParamSpec::string("")),
            ("output".to_string(), ParamSpec::string("")),
        ]),
    });

    // ========================================================================
    // Pipeline-wide settings
    // ========================================================================

    registry.register(StageType {
        type_name: PROCESSING_OPTIONS.to_string(),
        ports: vec![],
        params: IndexMap::from([
            ("files".to_string(), ParamSpec::string("")),
            ("buffer".to_string(), ParamSpec::number(0.0)),
            ("chunk".to_string(), ParamSpec::number(0.0)),
            ("ncores".to_string(), ParamSpec::number(1.0)),
            (
                "strategy".to_string(),
                ParamSpec::enumeration(
                    [
                        "concurrent-points",
                        "concurrent-files",
                        "nested",
                        "sequential",
                    ],
                    "concurrent-points",
                ),
            ),
        ]),
    });

    registry
}

/// The starter graph a new editing session opens with
///
/// One settings node and one reader, unconnected, at the canvas positions
/// users expect them in.
pub fn default_pipeline(registry: &StageRegistry) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    graph.insert_node(Node::new(registry.lookup(PROCESSING_OPTIONS)?).with_position(59.0, 7.0))?;
    graph.insert_node(Node::new(registry.lookup("reader_las")?).with_position(63.0, 358.0))?;
    Ok(graph)
}
