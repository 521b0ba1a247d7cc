//! Route graph storage: nodes with plane coordinates, undirected weighted
//! edges, and designated source/target endpoints.
//!
//! Graphs are immutable once built. [`GraphBuilder`] validates structure as
//! edges are added (no self-loops, no duplicate pairs, positive weights), so
//! a constructed [`Graph`] is simple by construction. Connectivity is a
//! property of *generated* graphs; hand-built graphs may be disconnected
//! (deliberately so, for unreachable-target scenarios) and can be checked
//! with [`Graph::is_connected`].

use crate::id::*;
use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::{HashSet, VecDeque};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised at the graph construction boundary.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("edge references unknown node: {0:?}")]
    UnknownNode(NodeId),
    #[error("self-loop on node {0:?}")]
    SelfLoop(NodeId),
    #[error("duplicate edge between {0:?} and {1:?}")]
    DuplicateEdge(NodeId, NodeId),
    #[error("edge weight must be at least 1")]
    ZeroWeight,
    #[error("source and target must be set before build")]
    MissingEndpoints,
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// Per-node data: a display label and a position in the plane.
///
/// The position is used only for Euclidean distance during generation and is
/// otherwise opaque to the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Label assigned at generation time ("A", "B", ... "AA", ...).
    /// Unique within a graph.
    pub label: String,
    pub x: f32,
    pub y: f32,
}

impl NodeData {
    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &NodeData) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-edge data: an unordered endpoint pair and a positive weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub a: NodeId,
    pub b: NodeId,
    /// Always in `1..=u32::MAX`; the generator stays within `1..=6`.
    pub weight: u32,
}

impl EdgeData {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable undirected weighted graph with designated endpoints.
///
/// Cloneable and serializable so one graph can back multiple independent
/// engine runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    nodes: SlotMap<NodeId, NodeData>,
    edges: SlotMap<EdgeId, EdgeData>,
    /// Incident edge lists, both endpoints.
    adjacency: SecondaryMap<NodeId, Vec<EdgeId>>,
    source: NodeId,
    target: NodeId,
}

impl Graph {
    /// Start building a graph by hand.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(edge)
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&EdgeData> {
        self.edges.get(edge)
    }

    /// Iterate all nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    /// Iterate all edges in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// The designated start node (leftmost, for generated graphs).
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The designated destination node (rightmost, for generated graphs).
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Incident edges of `node` with the opposite endpoint and weight.
    ///
    /// Empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId, u32)> + '_ {
        self.adjacency
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(move |&eid| {
                let edge = self.edges.get(eid)?;
                let other = edge.other(node)?;
                Some((eid, other, edge.weight))
            })
    }

    /// Whether an edge joins `a` and `b` in either direction.
    pub fn has_edge_between(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).any(|(_, other, _)| other == b)
    }

    /// Find a node by its label. O(n).
    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.label == label)
            .map(|(id, _)| id)
    }

    /// Breadth-first check that every node is reachable from every other.
    ///
    /// Generated graphs satisfy this by construction; hand-built graphs may
    /// not.
    pub fn is_connected(&self) -> bool {
        let Some((start, _)) = self.nodes.iter().next() else {
            return true;
        };
        let mut seen: SecondaryMap<NodeId, ()> = SecondaryMap::new();
        let mut queue = VecDeque::new();
        seen.insert(start, ());
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            for (_, neighbor, _) in self.neighbors(node) {
                if seen.insert(neighbor, ()).is_none() {
                    queue.push_back(neighbor);
                }
            }
        }
        seen.len() == self.nodes.len()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Validating constructor for [`Graph`].
///
/// `add_edge` is where the simple-graph invariants are enforced; an `Err`
/// leaves the builder unchanged, so callers may use it as a rejection filter.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: SlotMap<NodeId, NodeData>,
    edges: SlotMap<EdgeId, EdgeData>,
    adjacency: SecondaryMap<NodeId, Vec<EdgeId>>,
    /// Normalized (min, max) endpoint pairs for duplicate detection.
    pairs: HashSet<(NodeId, NodeId)>,
    source: Option<NodeId>,
    target: Option<NodeId>,
}

fn ordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Labels are not checked for uniqueness here; the generator
    /// and loader guarantee it at their own boundaries.
    pub fn add_node(&mut self, label: impl Into<String>, x: f32, y: f32) -> NodeId {
        let id = self.nodes.insert(NodeData {
            label: label.into(),
            x,
            y,
        });
        self.adjacency.insert(id, Vec::new());
        id
    }

    /// Add an undirected edge, enforcing the simple-graph invariants.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: u32) -> Result<EdgeId, GraphError> {
        if !self.nodes.contains_key(a) {
            return Err(GraphError::UnknownNode(a));
        }
        if !self.nodes.contains_key(b) {
            return Err(GraphError::UnknownNode(b));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if weight == 0 {
            return Err(GraphError::ZeroWeight);
        }
        let pair = ordered(a, b);
        if self.pairs.contains(&pair) {
            return Err(GraphError::DuplicateEdge(a, b));
        }
        let id = self.edges.insert(EdgeData { a, b, weight });
        self.adjacency[a].push(id);
        self.adjacency[b].push(id);
        self.pairs.insert(pair);
        Ok(id)
    }

    /// Whether an edge already joins `a` and `b` in either direction.
    pub fn has_edge_between(&self, a: NodeId, b: NodeId) -> bool {
        self.pairs.contains(&ordered(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn set_source(&mut self, node: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(node) {
            return Err(GraphError::UnknownNode(node));
        }
        self.source = Some(node);
        Ok(())
    }

    pub fn set_target(&mut self, node: NodeId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(node) {
            return Err(GraphError::UnknownNode(node));
        }
        self.target = Some(node);
        Ok(())
    }

    /// Finalize. Fails with [`GraphError::MissingEndpoints`] unless both
    /// source and target were set.
    pub fn build(self) -> Result<Graph, GraphError> {
        let (Some(source), Some(target)) = (self.source, self.target) else {
            return Err(GraphError::MissingEndpoints);
        };
        Ok(self.into_graph(source, target))
    }

    /// Finalize without endpoint validation. The caller guarantees both ids
    /// were returned by this builder's `add_node`.
    pub(crate) fn into_graph(self, source: NodeId, target: NodeId) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
            adjacency: self.adjacency,
            source,
            target,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
