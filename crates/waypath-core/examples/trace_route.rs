//! Trace a shortest-path run event by event.
//!
//! Generates a random connected scenario, then steps the engine by hand,
//! printing every visit and relaxation until the route is found.
//!
//! Run with: `cargo run -p waypath-core --example trace_route`

use waypath_core::engine::Engine;
use waypath_core::event::StepEvent;
use waypath_core::generator::{GeneratorConfig, generate};
use waypath_core::graph::Graph;
use waypath_core::id::NodeId;
use waypath_core::rng::GenRng;

fn label(graph: &Graph, node: NodeId) -> String {
    graph
        .node(node)
        .map(|data| data.label.clone())
        .unwrap_or_else(|| "?".to_string())
}

fn main() {
    // --- Step 1: Generate a scenario ---

    let config = GeneratorConfig {
        node_count: 12,
        ..GeneratorConfig::default()
    };
    let mut rng = GenRng::new(42);
    let graph = generate(&config, &mut rng);
    let (source, target) = (graph.source(), graph.target());

    println!(
        "Generated {} nodes and {} edges.",
        graph.node_count(),
        graph.edge_count()
    );
    println!(
        "Routing {} -> {}.\n",
        label(&graph, source),
        label(&graph, target)
    );

    // --- Step 2: Step the engine until the route is found ---

    let mut engine = Engine::new(graph);
    engine.initialize(source, target).unwrap();

    let mut step = 0;
    loop {
        step += 1;
        match engine.step().unwrap() {
            StepEvent::Visit { node, relaxations } => {
                let dist = engine.state().distance(node).unwrap_or(0);
                println!(
                    "  Step {step}: visit {} (dist {dist})",
                    label(engine.graph(), node)
                );
                for relaxation in &relaxations {
                    println!(
                        "           relax {} -> {}",
                        label(engine.graph(), relaxation.node),
                        relaxation.distance
                    );
                }
            }
            StepEvent::Found { path, distance } => {
                let labels: Vec<String> = path
                    .iter()
                    .map(|&node| label(engine.graph(), node))
                    .collect();
                println!(
                    "\nFound after {step} steps: {} (distance {distance})",
                    labels.join(" -> ")
                );
                break;
            }
            StepEvent::Exhausted => {
                println!("\nNo route: frontier exhausted after {step} steps.");
                break;
            }
        }
    }
}
