//! JSON scenario loading.
//!
//! Hand-authored scenario files pin down an exact topology by label instead
//! of relying on the generator -- handy for regression routes and demos.
//! Structural problems (unknown labels, duplicate edges, self-loops, zero
//! weights) surface as errors rather than producing a skewed graph.

use crate::graph::{Graph, GraphBuilder, GraphError};
use crate::id::NodeId;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
    #[error("unknown node label: {0:?}")]
    UnknownLabel(String),
    #[error("duplicate node label: {0:?}")]
    DuplicateLabel(String),
}

// ---------------------------------------------------------------------------
// Scenario schema
// ---------------------------------------------------------------------------

/// One node in a scenario file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    pub label: String,
    pub x: f32,
    pub y: f32,
}

/// One undirected edge in a scenario file, endpoints by label.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EdgeSpec {
    pub a: String,
    pub b: String,
    pub weight: u32,
}

/// A complete scenario: nodes, edges, and the route endpoints.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScenarioData {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    pub source: String,
    pub target: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a scenario from a JSON string.
pub fn load_scenario_json(json: &str) -> Result<Graph, ScenarioLoadError> {
    let data: ScenarioData = serde_json::from_str(json)?;
    build_graph(&data)
}

/// Load a scenario from JSON bytes.
pub fn load_scenario_json_bytes(bytes: &[u8]) -> Result<Graph, ScenarioLoadError> {
    let data: ScenarioData = serde_json::from_slice(bytes)?;
    build_graph(&data)
}

fn build_graph(data: &ScenarioData) -> Result<Graph, ScenarioLoadError> {
    let mut builder = GraphBuilder::new();
    let mut by_label: HashMap<&str, NodeId> = HashMap::new();

    for node in &data.nodes {
        if by_label.contains_key(node.label.as_str()) {
            return Err(ScenarioLoadError::DuplicateLabel(node.label.clone()));
        }
        let id = builder.add_node(node.label.as_str(), node.x, node.y);
        by_label.insert(&node.label, id);
    }

    let lookup = |label: &str| -> Result<NodeId, ScenarioLoadError> {
        by_label
            .get(label)
            .copied()
            .ok_or_else(|| ScenarioLoadError::UnknownLabel(label.to_owned()))
    };

    for edge in &data.edges {
        let a = lookup(&edge.a)?;
        let b = lookup(&edge.b)?;
        builder.add_edge(a, b, edge.weight)?;
    }

    builder.set_source(lookup(&data.source)?)?;
    builder.set_target(lookup(&data.target)?)?;
    Ok(builder.build()?)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::event::StepEvent;
    use crate::test_utils::run_to_completion;

    const TRIANGLE: &str = r#"{
        "nodes": [
            { "label": "A", "x": 0.0, "y": 0.0 },
            { "label": "B", "x": 10.0, "y": 0.0 },
            { "label": "C", "x": 20.0, "y": 0.0 }
        ],
        "edges": [
            { "a": "A", "b": "B", "weight": 2 },
            { "a": "B", "b": "C", "weight": 3 },
            { "a": "A", "b": "C", "weight": 10 }
        ],
        "source": "A",
        "target": "C"
    }"#;

    // -----------------------------------------------------------------------
    // Test 1: A well-formed scenario loads
    // -----------------------------------------------------------------------
    #[test]
    fn loads_a_well_formed_scenario() {
        let graph = load_scenario_json(TRIANGLE).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node(graph.source()).unwrap().label, "A");
        assert_eq!(graph.node(graph.target()).unwrap().label, "C");
    }

    // -----------------------------------------------------------------------
    // Test 2: Loaded scenarios route correctly
    // -----------------------------------------------------------------------
    #[test]
    fn loaded_scenario_routes_end_to_end() {
        let graph = load_scenario_json(TRIANGLE).unwrap();
        let (source, target) = (graph.source(), graph.target());
        let mut engine = Engine::new(graph);
        engine.initialize(source, target).unwrap();

        let StepEvent::Found { distance, path } = run_to_completion(&mut engine) else {
            panic!("triangle scenario is connected");
        };
        assert_eq!(distance, 5);
        assert_eq!(path.len(), 3);
    }

    // -----------------------------------------------------------------------
    // Test 3: Bytes entry point
    // -----------------------------------------------------------------------
    #[test]
    fn loads_from_bytes() {
        let graph = load_scenario_json_bytes(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);
    }

    // -----------------------------------------------------------------------
    // Test 4: Malformed JSON is a parse error
    // -----------------------------------------------------------------------
    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = load_scenario_json("{ not json");
        assert!(matches!(result, Err(ScenarioLoadError::JsonParse(_))));
    }

    // -----------------------------------------------------------------------
    // Test 5: Unknown labels are rejected
    // -----------------------------------------------------------------------
    #[test]
    fn unknown_edge_label_is_rejected() {
        let json = r#"{
            "nodes": [{ "label": "A", "x": 0.0, "y": 0.0 }],
            "edges": [{ "a": "A", "b": "Z", "weight": 1 }],
            "source": "A",
            "target": "A"
        }"#;
        let result = load_scenario_json(json);
        assert!(
            matches!(result, Err(ScenarioLoadError::UnknownLabel(label)) if label == "Z")
        );
    }

    #[test]
    fn unknown_endpoint_label_is_rejected() {
        let json = r#"{
            "nodes": [{ "label": "A", "x": 0.0, "y": 0.0 }],
            "edges": [],
            "source": "A",
            "target": "missing"
        }"#;
        let result = load_scenario_json(json);
        assert!(matches!(result, Err(ScenarioLoadError::UnknownLabel(_))));
    }

    // -----------------------------------------------------------------------
    // Test 6: Duplicate labels are rejected
    // -----------------------------------------------------------------------
    #[test]
    fn duplicate_node_label_is_rejected() {
        let json = r#"{
            "nodes": [
                { "label": "A", "x": 0.0, "y": 0.0 },
                { "label": "A", "x": 5.0, "y": 5.0 }
            ],
            "edges": [],
            "source": "A",
            "target": "A"
        }"#;
        let result = load_scenario_json(json);
        assert!(
            matches!(result, Err(ScenarioLoadError::DuplicateLabel(label)) if label == "A")
        );
    }

    // -----------------------------------------------------------------------
    // Test 7: Structural graph errors pass through
    // -----------------------------------------------------------------------
    #[test]
    fn structural_errors_pass_through() {
        let self_loop = r#"{
            "nodes": [{ "label": "A", "x": 0.0, "y": 0.0 }],
            "edges": [{ "a": "A", "b": "A", "weight": 1 }],
            "source": "A",
            "target": "A"
        }"#;
        assert!(matches!(
            load_scenario_json(self_loop),
            Err(ScenarioLoadError::Graph(GraphError::SelfLoop(_)))
        ));

        let zero_weight = r#"{
            "nodes": [
                { "label": "A", "x": 0.0, "y": 0.0 },
                { "label": "B", "x": 1.0, "y": 0.0 }
            ],
            "edges": [{ "a": "A", "b": "B", "weight": 0 }],
            "source": "A",
            "target": "B"
        }"#;
        assert!(matches!(
            load_scenario_json(zero_weight),
            Err(ScenarioLoadError::Graph(GraphError::ZeroWeight))
        ));

        let duplicate_edge = r#"{
            "nodes": [
                { "label": "A", "x": 0.0, "y": 0.0 },
                { "label": "B", "x": 1.0, "y": 0.0 }
            ],
            "edges": [
                { "a": "A", "b": "B", "weight": 1 },
                { "a": "B", "b": "A", "weight": 2 }
            ],
            "source": "A",
            "target": "B"
        }"#;
        assert!(matches!(
            load_scenario_json(duplicate_edge),
            Err(ScenarioLoadError::Graph(GraphError::DuplicateEdge(_, _)))
        ));
    }
}
