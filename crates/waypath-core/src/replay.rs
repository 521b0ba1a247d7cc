//! Command recording and playback for reproducing routing sessions.
//!
//! Records the driver-side command stream applied to a stepper, starting
//! from the graph the run was built on. Because the engine and stepper are
//! deterministic, replaying the same commands over the same graph reproduces
//! the exact same state, with optional hash verification at checkpoints.

use crate::engine::Engine;
use crate::graph::Graph;
use crate::id::NodeId;
use crate::stepper::{Stepper, StepperError};

// ---------------------------------------------------------------------------
// DriverCommand
// ---------------------------------------------------------------------------

/// A driver-side command that can be recorded and replayed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum DriverCommand {
    Initialize { source: NodeId, target: NodeId },
    Tick { dt: f64 },
    Pause,
    Resume,
    SetSpeed { multiplier: f64 },
    Reset,
}

// ---------------------------------------------------------------------------
// ReplayMismatch
// ---------------------------------------------------------------------------

/// Details about where replay verification failed.
#[derive(Debug, Clone)]
pub struct ReplayMismatch {
    /// The command index where the mismatch was detected.
    pub command_index: usize,
    /// Expected hash from the recording.
    pub expected_hash: u64,
    /// Actual hash from the replay.
    pub actual_hash: u64,
}

// ---------------------------------------------------------------------------
// CommandLog
// ---------------------------------------------------------------------------

/// A recorded command sequence starting from a graph.
///
/// Recording must begin before the first command is applied; replay rebuilds
/// a fresh stepper over the stored graph and re-drives it from the top.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandLog {
    /// The graph the recorded session ran on. Cloning preserves node ids,
    /// so recorded commands stay valid on the replayed copy.
    pub graph: Graph,
    /// Recorded commands in order.
    pub commands: Vec<DriverCommand>,
    /// Hash checkpoints: (command_index, state_hash).
    /// Used for verification during playback.
    pub hash_checkpoints: Vec<(usize, u64)>,
}

impl CommandLog {
    /// Start a log for a session over `graph`.
    pub fn new(graph: &Graph) -> Self {
        Self {
            graph: graph.clone(),
            commands: Vec::new(),
            hash_checkpoints: Vec::new(),
        }
    }

    /// Record a command.
    pub fn record(&mut self, cmd: DriverCommand) {
        self.commands.push(cmd);
    }

    /// Record a command with a hash checkpoint.
    pub fn record_with_hash(&mut self, cmd: DriverCommand, hash: u64) {
        let index = self.commands.len();
        self.commands.push(cmd);
        self.hash_checkpoints.push((index, hash));
    }

    /// Number of recorded commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Serialize the log to a JSON string.
    #[cfg(feature = "json-io")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a log from a JSON string.
    #[cfg(feature = "json-io")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// ReplayResult
// ---------------------------------------------------------------------------

/// The result of replaying a log.
#[derive(Debug)]
pub struct ReplayResult {
    /// Number of commands executed.
    pub commands_executed: usize,
    /// Whether all hash checkpoints matched.
    pub is_verified: bool,
    /// First mismatch encountered (if any).
    pub first_mismatch: Option<ReplayMismatch>,
}

// ---------------------------------------------------------------------------
// Replay execution
// ---------------------------------------------------------------------------

/// Apply a single command to a stepper.
fn apply_command(stepper: &mut Stepper, cmd: &DriverCommand) -> Result<(), StepperError> {
    match cmd {
        DriverCommand::Initialize { source, target } => {
            stepper.engine_mut().initialize(*source, *target)?;
        }
        DriverCommand::Tick { dt } => {
            stepper.tick(*dt)?;
        }
        DriverCommand::Pause => {
            stepper.pause();
        }
        DriverCommand::Resume => {
            stepper.resume();
        }
        DriverCommand::SetSpeed { multiplier } => {
            stepper.set_speed(*multiplier)?;
        }
        DriverCommand::Reset => {
            stepper.reset();
        }
    }
    Ok(())
}

/// Replay a log and verify hash checkpoints.
pub fn replay_and_verify(log: &CommandLog) -> Result<ReplayResult, StepperError> {
    let mut stepper = Stepper::new(Engine::new(log.graph.clone()));

    let mut first_mismatch: Option<ReplayMismatch> = None;
    let mut checkpoint_idx = 0;

    for (i, cmd) in log.commands.iter().enumerate() {
        apply_command(&mut stepper, cmd)?;

        // Check if this command index has a hash checkpoint.
        while checkpoint_idx < log.hash_checkpoints.len()
            && log.hash_checkpoints[checkpoint_idx].0 == i
        {
            let (_, expected_hash) = log.hash_checkpoints[checkpoint_idx];
            let actual_hash = stepper.engine().state_hash();
            if actual_hash != expected_hash && first_mismatch.is_none() {
                first_mismatch = Some(ReplayMismatch {
                    command_index: i,
                    expected_hash,
                    actual_hash,
                });
            }
            checkpoint_idx += 1;
        }
    }

    Ok(ReplayResult {
        commands_executed: log.commands.len(),
        is_verified: first_mismatch.is_none(),
        first_mismatch,
    })
}

/// Replay a log without verification, returning the final stepper state.
pub fn replay(log: &CommandLog) -> Result<Stepper, StepperError> {
    let mut stepper = Stepper::new(Engine::new(log.graph.clone()));
    for cmd in &log.commands {
        apply_command(&mut stepper, cmd)?;
    }
    Ok(stepper)
}

// ===========================================================================
// Tests
// ===========================================================================
