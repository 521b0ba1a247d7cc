//! Incremental shortest-path engine.
//!
//! Runs Dijkstra's algorithm one discrete step per call so an external driver
//! fully controls pacing. Each [`Engine::step`] finalizes exactly one node
//! (or exhausts the frontier) and returns one [`StepEvent`]; stale frontier
//! entries are discarded silently within the same call and never surface as
//! visible steps.
//!
//! Phases: `Idle -> Running -> { Found | Exhausted }`. Stepping outside
//! `Running` is a caller error and fails loudly; an empty frontier is *not*
//! an error, it is the `Exhausted` terminal event.

use crate::event::{Relaxation, StepEvent};
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::id::*;
use slotmap::{Key, SecondaryMap};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised at the engine's state-machine boundary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("step called in {phase:?} phase; the engine must be running")]
    InvalidState { phase: Phase },
    #[error("node not found in graph: {0:?}")]
    UnknownNode(NodeId),
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where the engine is in its run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// No run in progress. `initialize` starts one.
    Idle,
    /// A run is in progress; `step` is legal.
    Running,
    /// Terminal: the target was finalized.
    Found,
    /// Terminal: the frontier drained without reaching the target.
    Exhausted,
}

// ---------------------------------------------------------------------------
// Algorithm state
// ---------------------------------------------------------------------------

/// Per-run mutable state, owned exclusively by one engine.
///
/// Created by `initialize`, mutated only by `step`, discarded by `reset` or
/// the next `initialize`. Absent `dist` entries mean "infinity".
#[derive(Debug, Clone, Default)]
pub struct AlgorithmState {
    dist: SecondaryMap<NodeId, u32>,
    prev: SecondaryMap<NodeId, NodeId>,
    visited: SecondaryMap<NodeId, ()>,
    frontier: MinHeap<NodeId>,
}

impl AlgorithmState {
    /// Best-known distance from the source, or `None` for undiscovered nodes.
    pub fn distance(&self, node: NodeId) -> Option<u32> {
        self.dist.get(node).copied()
    }

    /// The node this one was best reached from, if any.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.prev.get(node).copied()
    }

    /// Whether the node has been finalized.
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains_key(node)
    }

    /// Number of finalized nodes.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Live frontier entries, stale duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn reset(&mut self) {
        self.dist.clear();
        self.prev.clear();
        self.visited.clear();
        self.frontier.clear();
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Steppable single-source shortest-path engine over an immutable graph.
///
/// The engine owns its graph; clone the graph to run several engines over the
/// same topology. Nodes and edges are never mutated by the engine.
#[derive(Debug, Clone)]
pub struct Engine {
    graph: Graph,
    state: AlgorithmState,
    phase: Phase,
    source: Option<NodeId>,
    target: Option<NodeId>,
}

impl Engine {
    /// Create an idle engine over `graph`.
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            state: AlgorithmState::default(),
            phase: Phase::Idle,
            source: None,
            target: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Source of the current/last run, if one was started.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Target of the current/last run, if one was started.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Read-only view of the per-run state for inspection.
    pub fn state(&self) -> &AlgorithmState {
        &self.state
    }

    /// Start a run from `source` toward `target`.
    ///
    /// Discards any previous run. Legal in every phase. On error the engine
    /// is left untouched.
    pub fn initialize(&mut self, source: NodeId, target: NodeId) -> Result<(), EngineError> {
        if !self.graph.contains_node(source) {
            return Err(EngineError::UnknownNode(source));
        }
        if !self.graph.contains_node(target) {
            return Err(EngineError::UnknownNode(target));
        }
        self.state.reset();
        self.state.dist.insert(source, 0);
        self.state.frontier.add(source, 0);
        self.source = Some(source);
        self.target = Some(target);
        self.phase = Phase::Running;
        Ok(())
    }

    /// Execute one unit of the algorithm.
    ///
    /// Finalizes exactly one node and returns the event describing it, or
    /// `Exhausted` when the frontier drains. Stale frontier entries (nodes
    /// already finalized under a smaller priority) are discarded within the
    /// same call. When the finalized node is the target, `Found` supersedes
    /// the visit event and carries the reconstructed path.
    pub fn step(&mut self) -> Result<StepEvent, EngineError> {
        if self.phase != Phase::Running {
            return Err(EngineError::InvalidState { phase: self.phase });
        }

        let node = loop {
            match self.state.frontier.pop() {
                None => {
                    self.phase = Phase::Exhausted;
                    return Ok(StepEvent::Exhausted);
                }
                Some(node) if self.state.visited.contains_key(node) => continue,
                Some(node) => break node,
            }
        };

        // Dijkstra invariant: dist[node] is final from here on.
        self.state.visited.insert(node, ());

        if Some(node) == self.target {
            self.phase = Phase::Found;
            let path = self.reconstruct_path(node).unwrap_or_default();
            let distance = self.state.dist.get(node).copied().unwrap_or(0);
            return Ok(StepEvent::Found { path, distance });
        }

        let base = self.state.dist.get(node).copied().unwrap_or(0);
        let mut relaxations = Vec::new();
        for (edge, neighbor, weight) in self.graph.neighbors(node) {
            if self.state.visited.contains_key(neighbor) {
                continue;
            }
            let candidate = base.saturating_add(weight);
            let improves = match self.state.dist.get(neighbor) {
                Some(&current) => candidate < current,
                None => true,
            };
            if improves {
                self.state.dist.insert(neighbor, candidate);
                self.state.prev.insert(neighbor, node);
                self.state.frontier.add(neighbor, candidate);
                relaxations.push(Relaxation {
                    edge,
                    node: neighbor,
                    distance: candidate,
                });
            }
        }

        Ok(StepEvent::Visit { node, relaxations })
    }

    /// Walk the best-known predecessor chain from `node` back to the source.
    ///
    /// Returns `None` if the node has not been discovered. For finalized
    /// nodes the result is the shortest path; for frontier nodes it is the
    /// current best candidate.
    pub fn reconstruct_path(&self, node: NodeId) -> Option<Vec<NodeId>> {
        if !self.state.dist.contains_key(node) {
            return None;
        }
        let mut path = vec![node];
        let mut current = node;
        while let Some(&p) = self.state.prev.get(current) {
            path.push(p);
            current = p;
        }
        path.reverse();
        Some(path)
    }

    /// Discard the run and return to `Idle`.
    pub fn reset(&mut self) {
        self.state.reset();
        self.source = None;
        self.target = None;
        self.phase = Phase::Idle;
    }

    /// Deterministic hash of phase plus per-node algorithm state.
    ///
    /// Two engines over identically-built graphs that executed the same
    /// calls hash equal. Used by replay verification.
    pub fn state_hash(&self) -> u64 {
        let mut h = StateHash::new();
        h.write_u32(self.phase as u32);
        for (id, _) in self.graph.nodes() {
            h.write_u64(id.data().as_ffi());
            match self.state.dist.get(id) {
                Some(&d) => {
                    h.write_u32(1);
                    h.write_u32(d);
                }
                None => h.write_u32(0),
            }
            h.write_u32(self.state.visited.contains_key(id) as u32);
            match self.state.prev.get(id) {
                Some(p) => h.write_u64(p.data().as_ffi()),
                None => h.write_u64(0),
            }
        }
        for (node, priority) in self.state.frontier.iter() {
            h.write_u64(node.data().as_ffi());
            h.write_u32(priority);
        }
        h.finish()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// A simple deterministic hash of engine state for replay verification.
///
/// Uses FNV-1a (64-bit) for speed and simplicity. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    /// Feed a u64 into the hash.
    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// Feed a u32 into the hash.
    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    /// Finalize and return the hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
