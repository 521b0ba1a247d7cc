//! Step events emitted by the engine.
//!
//! Every successful [`Engine::step`](crate::engine::Engine::step) call
//! produces exactly one event; there is no buffering or reordering. The
//! presentation layer reacts to each variant (recolor a visited node, pulse a
//! relaxed edge, draw the final route) but the engine knows nothing about
//! rendering.

use crate::id::*;
use serde::{Deserialize, Serialize};

/// One edge relaxation performed during a visit.
///
/// Carried inside [`StepEvent::Visit`] so a driver can highlight the edges
/// whose best-known distances improved in that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relaxation {
    /// The edge that was relaxed.
    pub edge: EdgeId,
    /// The neighbor whose distance improved.
    pub node: NodeId,
    /// The neighbor's new best-known distance.
    pub distance: u32,
}

/// What a single `step()` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEvent {
    /// A node was finalized, with any relaxations performed from it.
    Visit {
        node: NodeId,
        relaxations: Vec<Relaxation>,
    },
    /// The target was finalized. Terminal; supersedes the visit event for
    /// that call.
    Found { path: Vec<NodeId>, distance: u32 },
    /// The frontier drained without reaching the target. Terminal.
    Exhausted,
}

/// Discriminant tag for step events, used for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepEventKind {
    Visit,
    Found,
    Exhausted,
}

impl StepEvent {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> StepEventKind {
        match self {
            StepEvent::Visit { .. } => StepEventKind::Visit,
            StepEvent::Found { .. } => StepEventKind::Found,
            StepEvent::Exhausted => StepEventKind::Exhausted,
        }
    }

    /// Whether this event ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepEvent::Found { .. } | StepEvent::Exhausted)
    }
}
