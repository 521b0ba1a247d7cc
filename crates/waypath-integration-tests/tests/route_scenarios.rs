//! End-to-end routing over loaded and generated scenarios.
//!
//! These tests exercise the full path from scenario construction (JSON
//! loader or generator) through the engine to the reported route, and feed
//! the event stream into waypath-stats the way a frontend would.

use waypath_core::engine::{Engine, Phase};
use waypath_core::event::StepEvent;
use waypath_core::generator::{GeneratorConfig, generate};
use waypath_core::graph::Graph;
use waypath_core::id::NodeId;
use waypath_core::loader::load_scenario_json;
use waypath_core::rng::GenRng;
use waypath_core::test_utils::*;
use waypath_stats::{RunOutcome, RunStats, StatsConfig};

// ============================================================================
// Shared helpers
// ============================================================================

fn labels(graph: &Graph, path: &[NodeId]) -> Vec<String> {
    path.iter()
        .map(|&node| graph.node(node).unwrap().label.clone())
        .collect()
}

/// Run a route to completion, forwarding every event into `stats`.
fn run_with_stats(engine: &mut Engine, stats: &mut RunStats) -> StepEvent {
    loop {
        let event = engine.step().unwrap();
        stats.process_event(&event);
        if event.is_terminal() {
            return event;
        }
    }
}

// ============================================================================
// Test 1: A hand-authored scenario routes around the trap edge
// ============================================================================

/// The direct A-D edge is expensive; the cheap route goes A -> B -> D.
#[test]
fn loaded_scenario_routes_around_trap_edge() {
    let json = r#"{
        "nodes": [
            { "label": "A", "x": 0.0, "y": 0.0 },
            { "label": "B", "x": 50.0, "y": -20.0 },
            { "label": "C", "x": 50.0, "y": 20.0 },
            { "label": "D", "x": 100.0, "y": 0.0 }
        ],
        "edges": [
            { "a": "A", "b": "B", "weight": 1 },
            { "a": "B", "b": "D", "weight": 1 },
            { "a": "A", "b": "C", "weight": 1 },
            { "a": "C", "b": "D", "weight": 9 },
            { "a": "A", "b": "D", "weight": 10 }
        ],
        "source": "A",
        "target": "D"
    }"#;
    let graph = load_scenario_json(json).unwrap();
    let (source, target) = (graph.source(), graph.target());
    let mut engine = Engine::new(graph);
    engine.initialize(source, target).unwrap();

    let terminal = run_to_completion(&mut engine);
    let StepEvent::Found { path, distance } = terminal else {
        panic!("trap scenario is connected");
    };
    assert_eq!(distance, 2);
    assert_eq!(labels(engine.graph(), &path), vec!["A", "B", "D"]);
}

// ============================================================================
// Test 2: Generated scenarios route correctly across seeds
// ============================================================================

/// Every generated scenario yields a found route whose distance matches the
/// brute-force reference, with valid endpoints and edge hops.
#[test]
fn generated_scenarios_route_correctly() {
    for seed in [1u64, 7, 42, 1234, 99999] {
        let config = GeneratorConfig {
            node_count: 25,
            ..GeneratorConfig::default()
        };
        let mut rng = GenRng::new(seed);
        let graph = generate(&config, &mut rng);
        let (source, target) = (graph.source(), graph.target());

        let mut engine = Engine::new(graph);
        engine.initialize(source, target).unwrap();
        let StepEvent::Found { path, distance } = run_to_completion(&mut engine) else {
            panic!("generated graphs are connected; seed {seed}");
        };

        assert_eq!(
            Some(distance),
            brute_force_distance(engine.graph(), source, target),
            "seed {seed}"
        );
        assert_eq!(path_weight(engine.graph(), &path), Some(distance));
        assert_eq!(path.first(), Some(&source));
        assert_eq!(path.last(), Some(&target));
        // The source is the leftmost node and always labeled "A".
        assert_eq!(engine.graph().node(source).unwrap().label, "A");
    }
}

// ============================================================================
// Test 3: Dijkstra's visit order is non-decreasing in distance
// ============================================================================

/// Nodes are finalized cheapest-first; the visit order recorded by the stats
/// tracker must carry non-decreasing final distances.
#[test]
fn visit_order_is_non_decreasing_in_distance() {
    let config = GeneratorConfig {
        node_count: 30,
        ..GeneratorConfig::default()
    };
    let mut rng = GenRng::new(5);
    let graph = generate(&config, &mut rng);
    let (source, target) = (graph.source(), graph.target());

    let mut engine = Engine::new(graph);
    engine.initialize(source, target).unwrap();
    let mut stats = RunStats::new(StatsConfig::default());
    run_with_stats(&mut engine, &mut stats);

    let distances: Vec<u32> = stats
        .visit_order()
        .iter()
        .map(|&node| engine.state().distance(node).unwrap())
        .collect();
    assert!(
        distances.windows(2).all(|w| w[0] <= w[1]),
        "visit distances regressed: {distances:?}"
    );
}

// ============================================================================
// Test 4: Stats agree with the engine after a full run
// ============================================================================

/// Totals derived from the event stream match the engine's own final state.
#[test]
fn stats_agree_with_engine_state() {
    let config = GeneratorConfig {
        node_count: 20,
        ..GeneratorConfig::default()
    };
    let mut rng = GenRng::new(8);
    let graph = generate(&config, &mut rng);
    let (source, target) = (graph.source(), graph.target());

    let mut engine = Engine::new(graph);
    engine.initialize(source, target).unwrap();
    let mut stats = RunStats::new(StatsConfig::default());
    let terminal = run_with_stats(&mut engine, &mut stats);

    let StepEvent::Found { path, distance } = terminal else {
        panic!("generated graphs are connected");
    };

    // One event per step; the found step is not a visit.
    assert_eq!(stats.step_count(), stats.visit_count() + 1);
    assert_eq!(stats.visit_count(), engine.state().visited_count() - 1);
    assert_eq!(
        stats.outcome(),
        Some(RunOutcome::Found {
            distance,
            path_len: path.len()
        })
    );
    // Every visited node appears in the visit order exactly once.
    let mut seen = std::collections::HashSet::new();
    for &node in stats.visit_order() {
        assert!(engine.state().is_visited(node));
        assert!(seen.insert(node), "node visited twice: {node:?}");
    }
}

// ============================================================================
// Test 5: Unreachable targets exhaust cleanly end to end
// ============================================================================

/// An isolated target drains the frontier; the tracker records Exhausted.
#[test]
fn isolated_target_exhausts() {
    let (graph, ids) = make_graph(
        &[
            ("A", 0.0, 0.0),
            ("B", 10.0, 0.0),
            ("C", 20.0, 0.0),
            ("D", 90.0, 90.0),
        ],
        &[(0, 1, 1), (1, 2, 1)],
        0,
        3,
    );
    let mut engine = Engine::new(graph);
    engine.initialize(ids[0], ids[3]).unwrap();
    let mut stats = RunStats::new(StatsConfig::default());
    let terminal = run_with_stats(&mut engine, &mut stats);

    assert_eq!(terminal, StepEvent::Exhausted);
    assert_eq!(engine.phase(), Phase::Exhausted);
    assert_eq!(stats.outcome(), Some(RunOutcome::Exhausted));
    assert_eq!(stats.visit_count(), 3);
    assert_eq!(engine.reconstruct_path(ids[3]), None);
}

// ============================================================================
// Test 6: One engine serves consecutive routes
// ============================================================================

/// Re-initializing reuses the engine for a fresh leg with correct results,
/// and the stats tracker resets alongside it.
#[test]
fn engine_reuse_across_routes() {
    let (graph, ids) = make_graph(
        &[
            ("A", 0.0, 0.0),
            ("B", 10.0, 0.0),
            ("C", 20.0, 0.0),
            ("D", 30.0, 0.0),
        ],
        &[(0, 1, 2), (1, 2, 2), (2, 3, 2), (0, 3, 11)],
        0,
        3,
    );
    let mut engine = Engine::new(graph);
    let mut stats = RunStats::new(StatsConfig::default());

    // First leg: A to D the long way around is 6, direct is 11.
    engine.initialize(ids[0], ids[3]).unwrap();
    let first = run_with_stats(&mut engine, &mut stats);
    assert_eq!(
        first,
        StepEvent::Found {
            path: vec![ids[0], ids[1], ids[2], ids[3]],
            distance: 6
        }
    );

    // Second leg: B to C is one hop.
    engine.initialize(ids[1], ids[2]).unwrap();
    stats.reset();
    let second = run_with_stats(&mut engine, &mut stats);
    assert_eq!(
        second,
        StepEvent::Found {
            path: vec![ids[1], ids[2]],
            distance: 2
        }
    );
    assert_eq!(stats.outcome(), Some(RunOutcome::Found { distance: 2, path_len: 2 }));
    // B is visited first, then A and C sit at equal priority 2; the heap
    // surfaces A before C here, so the run visits two nodes before Found.
    assert_eq!(stats.visit_count(), 2);
}
