//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::engine::Engine;
use crate::event::StepEvent;
use crate::graph::{Graph, GraphBuilder};
use crate::id::NodeId;
use slotmap::SecondaryMap;

// ===========================================================================
// Graph builders
// ===========================================================================

/// Build a graph from label/position tuples and index-addressed edges.
///
/// Node ids are returned in input order so tests can address nodes by index.
pub fn make_graph(
    nodes: &[(&str, f32, f32)],
    edges: &[(usize, usize, u32)],
    source: usize,
    target: usize,
) -> (Graph, Vec<NodeId>) {
    let mut builder = GraphBuilder::new();
    let ids: Vec<NodeId> = nodes
        .iter()
        .map(|&(label, x, y)| builder.add_node(label, x, y))
        .collect();
    for &(a, b, weight) in edges {
        builder.add_edge(ids[a], ids[b], weight).unwrap();
    }
    builder.set_source(ids[source]).unwrap();
    builder.set_target(ids[target]).unwrap();
    (builder.build().unwrap(), ids)
}

/// The canonical three-node route: A-B 2, B-C 3, and a direct A-C 10.
/// Shortest path A -> B -> C with distance 5.
pub fn triangle_graph() -> (Graph, Vec<NodeId>) {
    make_graph(
        &[("A", 0.0, 0.0), ("B", 10.0, 0.0), ("C", 20.0, 0.0)],
        &[(0, 1, 2), (1, 2, 3), (0, 2, 10)],
        0,
        2,
    )
}

/// A chain of `weights.len() + 1` nodes connected in sequence.
/// Source is the first node, target the last.
pub fn line_graph(weights: &[u32]) -> (Graph, Vec<NodeId>) {
    let mut builder = GraphBuilder::new();
    let count = weights.len() + 1;
    let ids: Vec<NodeId> = (0..count)
        .map(|i| builder.add_node(format!("N{i}"), i as f32 * 10.0, 0.0))
        .collect();
    for (i, &weight) in weights.iter().enumerate() {
        builder.add_edge(ids[i], ids[i + 1], weight).unwrap();
    }
    builder.set_source(ids[0]).unwrap();
    builder.set_target(ids[count - 1]).unwrap();
    (builder.build().unwrap(), ids)
}

// ===========================================================================
// Engine helpers
// ===========================================================================

/// Step a running engine until it emits a terminal event, returning it.
pub fn run_to_completion(engine: &mut Engine) -> StepEvent {
    for _ in 0..10_000 {
        let event = engine.step().expect("engine should be running");
        if event.is_terminal() {
            return event;
        }
    }
    panic!("engine did not terminate within 10_000 steps");
}

/// Sum of edge weights along consecutive path hops.
/// `None` if any hop has no connecting edge.
pub fn path_weight(graph: &Graph, path: &[NodeId]) -> Option<u32> {
    let mut total = 0u32;
    for hop in path.windows(2) {
        let (_, _, weight) = graph
            .neighbors(hop[0])
            .find(|&(_, neighbor, _)| neighbor == hop[1])?;
        total += weight;
    }
    Some(total)
}

// ===========================================================================
// Reference computations
// ===========================================================================

/// Shortest-path distance by exhaustive edge relaxation (Bellman-Ford
/// shape). Slow but obviously correct; `None` if `target` is unreachable.
pub fn brute_force_distance(graph: &Graph, source: NodeId, target: NodeId) -> Option<u32> {
    let mut dist: SecondaryMap<NodeId, u64> = SecondaryMap::new();
    dist.insert(source, 0);

    for _ in 0..graph.node_count() {
        let mut changed = false;
        for (_, edge) in graph.edges() {
            let weight = edge.weight as u64;
            if let Some(&da) = dist.get(edge.a) {
                if dist.get(edge.b).is_none_or(|&db| da + weight < db) {
                    dist.insert(edge.b, da + weight);
                    changed = true;
                }
            }
            if let Some(&db) = dist.get(edge.b) {
                if dist.get(edge.a).is_none_or(|&da| db + weight < da) {
                    dist.insert(edge.a, db + weight);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    dist.get(target).map(|&d| d as u32)
}
