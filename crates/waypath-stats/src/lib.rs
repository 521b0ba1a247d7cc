//! Run statistics for the waypath engine.
//!
//! Listens to the [`StepEvent`] stream of a run and aggregates it into
//! counters, the visit order, a ring-buffered relaxations-per-step trace,
//! and the terminal outcome. Purely passive: the tracker never touches the
//! engine, it only sees events the driver forwards.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = RunStats::new(StatsConfig::default());
//! // Feed every event the engine emits:
//! stats.process_event(&event);
//! // Query at any point:
//! let visited = stats.visit_count();
//! let outcome = stats.outcome();
//! ```

use waypath_core::event::StepEvent;
use waypath_core::id::NodeId;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the statistics tracker.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Maximum number of per-step relaxation counts to retain.
    pub history_capacity: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            history_capacity: 256,
        }
    }
}

// ---------------------------------------------------------------------------
// RingBuffer -- fixed-capacity history of per-step counts
// ---------------------------------------------------------------------------

/// A fixed-capacity ring buffer of per-step counts for trend analysis.
///
/// When full, the oldest entry is overwritten. Iterates oldest-to-newest.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<u32>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    /// Create a new ring buffer with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            data: vec![0; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Push a value, overwriting the oldest entry if at capacity.
    pub fn push(&mut self, value: u32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity();
        if self.len < self.capacity() {
            self.len += 1;
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Get the most recently pushed value, if any.
    pub fn latest(&self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        let idx = if self.head == 0 {
            self.capacity() - 1
        } else {
            self.head - 1
        };
        Some(self.data[idx])
    }

    /// Iterate values from oldest to newest.
    pub fn iter(&self) -> RingBufferIter<'_> {
        let start = if self.len < self.capacity() {
            0
        } else {
            self.head
        };
        RingBufferIter {
            buffer: self,
            index: start,
            remaining: self.len,
        }
    }

    /// Collect all stored values into a Vec (oldest to newest).
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Clear all stored values without changing capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.data {
            *slot = 0;
        }
        self.head = 0;
        self.len = 0;
    }
}

/// Iterator over [`RingBuffer`] values, oldest to newest.
pub struct RingBufferIter<'a> {
    buffer: &'a RingBuffer,
    index: usize,
    remaining: usize,
}

impl Iterator for RingBufferIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.buffer.data[self.index];
        self.index = (self.index + 1) % self.buffer.capacity();
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RingBufferIter<'_> {}

// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The target was reached.
    Found { distance: u32, path_len: usize },
    /// The frontier drained without reaching the target.
    Exhausted,
}

// ---------------------------------------------------------------------------
// RunStats -- main tracker
// ---------------------------------------------------------------------------

/// Aggregates one run's [`StepEvent`] stream into queryable statistics.
///
/// Accepts events via [`process_event`](RunStats::process_event) and exposes
/// counters, the visit order, the relaxation trace, and the terminal outcome
/// through getter methods. [`reset`](RunStats::reset) reuses the tracker for
/// the next run.
#[derive(Debug)]
pub struct RunStats {
    config: StatsConfig,
    steps: usize,
    visits: usize,
    relaxations: u64,
    visit_order: Vec<NodeId>,
    relaxation_trace: RingBuffer,
    outcome: Option<RunOutcome>,
}

impl RunStats {
    /// Create a new tracker with the given configuration.
    pub fn new(config: StatsConfig) -> Self {
        let trace = RingBuffer::new(config.history_capacity);
        Self {
            config,
            steps: 0,
            visits: 0,
            relaxations: 0,
            visit_order: Vec::new(),
            relaxation_trace: trace,
            outcome: None,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    // -- Event processing ---------------------------------------------------

    /// Process a single event, updating counters.
    ///
    /// Call this for every event the engine emits, in order. Terminal events
    /// record the outcome; further events would describe a new run, so call
    /// [`reset`](Self::reset) first.
    pub fn process_event(&mut self, event: &StepEvent) {
        self.steps += 1;
        match event {
            StepEvent::Visit { node, relaxations } => {
                self.visits += 1;
                self.relaxations += relaxations.len() as u64;
                self.visit_order.push(*node);
                self.relaxation_trace.push(relaxations.len() as u32);
            }
            StepEvent::Found { path, distance } => {
                self.outcome = Some(RunOutcome::Found {
                    distance: *distance,
                    path_len: path.len(),
                });
            }
            StepEvent::Exhausted => {
                self.outcome = Some(RunOutcome::Exhausted);
            }
        }
    }

    /// Discard all recorded data, keeping the configuration.
    pub fn reset(&mut self) {
        self.steps = 0;
        self.visits = 0;
        self.relaxations = 0;
        self.visit_order.clear();
        self.relaxation_trace.clear();
        self.outcome = None;
    }

    // -- Queries ------------------------------------------------------------

    /// Total events processed, terminal events included.
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Number of visit events (nodes finalized short of the target).
    pub fn visit_count(&self) -> usize {
        self.visits
    }

    /// Total relaxations across all visits.
    pub fn relaxation_count(&self) -> u64 {
        self.relaxations
    }

    /// Nodes in the order they were finalized.
    pub fn visit_order(&self) -> &[NodeId] {
        &self.visit_order
    }

    /// Ring-buffered relaxations-per-visit trace, oldest to newest.
    pub fn relaxation_trace(&self) -> &RingBuffer {
        &self.relaxation_trace
    }

    /// The terminal outcome, once one was observed.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Whether a terminal event has been observed.
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Mean relaxations per visit, 0.0 before the first visit.
    pub fn mean_relaxations_per_visit(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.relaxations as f64 / self.visits as f64
    }
}

// ===========================================================================
// Tests
// ===========================================================================
