//! Random connected graph generation.
//!
//! Places nodes on a jittered near-square grid inside a padded area, labels
//! them left-to-right from a fixed alphabet, joins them with a randomized
//! greedy spanning pass (connected by construction), then sprinkles in extra
//! edges between nearby pairs. All randomness comes from the injected
//! [`GenRng`], so a seed plus a config fully determines the output.
//!
//! The spanning pass is deliberately *not* a true minimum spanning tree: the
//! random factor in the pair score keeps generated layouts slightly
//! irregular. It is O(n^3) overall, which is fine at the tens-of-nodes scale
//! this targets; treat that as a scaling limit before reusing it elsewhere.

use crate::graph::{Graph, GraphBuilder};
use crate::id::NodeId;
use crate::rng::GenRng;
use serde::{Deserialize, Serialize};

/// Maximum jitter from the cell center, as a fraction of cell size.
const JITTER_FRACTION: f32 = 0.6;
/// One weight unit per this many distance units.
const WEIGHT_DISTANCE_DIVISOR: f32 = 50.0;
const MIN_WEIGHT: u32 = 1;
const MAX_WEIGHT: u32 = 6;
/// Extra edges added after the spanning pass, per node.
const EXTRA_EDGE_FACTOR: f64 = 0.8;
/// Extra edges longer than `(width + height) / SPAN_DIVISOR` are rejected.
const SPAN_DIVISOR: f32 = 3.0;
/// Attempt budget multiplier for the rejection-sampled extra-edge pass.
const EXTRA_EDGE_ATTEMPT_FACTOR: usize = 20;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parameters for graph generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of nodes. Treated as 1 if 0; a graph always has endpoints.
    pub node_count: usize,
    /// Total area width.
    pub width: f32,
    /// Total area height.
    pub height: f32,
    /// Margin kept clear on every side.
    pub padding: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 12,
            width: 800.0,
            height: 600.0,
            padding: 60.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a random connected graph.
///
/// Source is the leftmost node, target the rightmost. Never fails: every
/// structural invariant is guaranteed by construction.
pub fn generate(config: &GeneratorConfig, rng: &mut GenRng) -> Graph {
    let n = config.node_count.max(1);

    let mut positions = place_nodes(n, config, rng);
    // Left-to-right labeling: source/target selection depends on layout, not
    // insertion order.
    positions.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut builder = GraphBuilder::new();
    let ids: Vec<NodeId> = positions
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| builder.add_node(label_for(i), x, y))
        .collect();
    let source = ids[0];
    let target = ids[n - 1];

    if n > 1 {
        build_spanning_edges(&mut builder, &ids, &positions, rng);
        add_extra_edges(&mut builder, &ids, &positions, config, rng);
    }

    builder.into_graph(source, target)
}

/// Sequential labels from a fixed alphabet: A..Z, then AA, AB, ...
pub fn label_for(index: usize) -> String {
    let mut label = String::new();
    let mut i = index;
    loop {
        let c = (b'A' + (i % 26) as u8) as char;
        label.insert(0, c);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    label
}

/// Grid placement with per-node jitter, clamped into the padded bounds.
fn place_nodes(n: usize, config: &GeneratorConfig, rng: &mut GenRng) -> Vec<(f32, f32)> {
    let cols = ((n as f32 * 1.5).sqrt().ceil() as usize).max(1);
    let rows = n.div_ceil(cols);
    let inner_w = (config.width - 2.0 * config.padding).max(0.0);
    let inner_h = (config.height - 2.0 * config.padding).max(0.0);
    let cell_w = inner_w / cols as f32;
    let cell_h = inner_h / rows as f32;
    let max_x = (config.width - config.padding).max(config.padding);
    let max_y = (config.height - config.padding).max(config.padding);

    (0..n)
        .map(|i| {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;
            let jx = (rng.unit() as f32 - 0.5) * 2.0 * JITTER_FRACTION * cell_w;
            let jy = (rng.unit() as f32 - 0.5) * 2.0 * JITTER_FRACTION * cell_h;
            let x = config.padding + (col + 0.5) * cell_w + jx;
            let y = config.padding + (row + 0.5) * cell_h + jy;
            (x.clamp(config.padding, max_x), y.clamp(config.padding, max_y))
        })
        .collect()
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Distance-bucketed weight with a small random bump, clamped to the range.
fn weight_for(distance: f32, rng: &mut GenRng) -> u32 {
    let base = (distance / WEIGHT_DISTANCE_DIVISOR).round() as i64;
    let bump = (rng.unit() * 2.0).round() as i64;
    (base + bump).clamp(MIN_WEIGHT as i64, MAX_WEIGHT as i64) as u32
}

/// Randomized greedy spanning pass.
///
/// Scans every (connected, not-connected) pair, scores it by distance times a
/// random factor in [0.5, 1.5), and attaches the global minimum. Each
/// attachment moves exactly one node into the connected set, so the result is
/// fully connected when the loop drains.
fn build_spanning_edges(
    builder: &mut GraphBuilder,
    ids: &[NodeId],
    positions: &[(f32, f32)],
    rng: &mut GenRng,
) {
    let n = ids.len();
    let mut connected = Vec::with_capacity(n);
    connected.push(0usize);
    let mut not_connected: Vec<usize> = (1..n).collect();

    while !not_connected.is_empty() {
        let mut best: Option<(f32, usize, usize)> = None;
        for &ci in &connected {
            for (pos, &ni) in not_connected.iter().enumerate() {
                let dist = distance(positions[ci], positions[ni]);
                let score = dist * (0.5 + rng.unit() as f32);
                if best.is_none_or(|(s, _, _)| score < s) {
                    best = Some((score, ci, pos));
                }
            }
        }
        let Some((_, ci, pos)) = best else { break };
        let ni = not_connected[pos];
        let weight = weight_for(distance(positions[ci], positions[ni]), rng);
        // Spanning pairs straddle the two sets, so the builder accepts them.
        if builder.add_edge(ids[ci], ids[ni], weight).is_ok() {
            not_connected.swap_remove(pos);
            connected.push(ni);
        }
    }
}

/// Rejection-sampled extra edges between random pairs.
///
/// Geometric rejection (span limit) happens here; structural rejection
/// (self-pairs already skipped, duplicates in either direction) is the
/// builder's. Bounded attempts keep "approximately 0.8 per node" terminating
/// on layouts where most pairs are rejected.
fn add_extra_edges(
    builder: &mut GraphBuilder,
    ids: &[NodeId],
    positions: &[(f32, f32)],
    config: &GeneratorConfig,
    rng: &mut GenRng,
) {
    let n = ids.len();
    let wanted = (n as f64 * EXTRA_EDGE_FACTOR).round() as usize;
    let max_span = (config.width + config.height) / SPAN_DIVISOR;
    let budget = wanted * EXTRA_EDGE_ATTEMPT_FACTOR;

    let mut added = 0;
    let mut attempts = 0;
    while added < wanted && attempts < budget {
        attempts += 1;
        let i = rng.index(n);
        let j = rng.index(n);
        if i == j {
            continue;
        }
        let dist = distance(positions[i], positions[j]);
        if dist > max_span {
            continue;
        }
        let weight = weight_for(dist, rng);
        if builder.add_edge(ids[i], ids[j], weight).is_ok() {
            added += 1;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
