//! Frame-time pacing for the engine.
//!
//! Drivers hand the stepper raw frame deltas; the stepper scales them by a
//! speed multiplier, accumulates, and releases exactly one engine step each
//! time the accumulator crosses [`STEP_THRESHOLD`]. The threshold is fixed;
//! speed is the tuning knob.

use crate::engine::{Engine, EngineError};
use crate::event::StepEvent;

/// Scaled seconds of accumulated time that release one engine step.
pub const STEP_THRESHOLD: f64 = 0.35;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StepperError {
    #[error("speed multiplier must be positive and finite, got {0}")]
    InvalidSpeed(f64),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// Converts continuous frame time into discrete engine steps.
///
/// Owns its engine; drivers reach the engine through [`Stepper::engine`] and
/// [`Stepper::engine_mut`] to start runs and inspect state.
#[derive(Debug, Clone)]
pub struct Stepper {
    engine: Engine,
    accumulator: f64,
    speed: f64,
    paused: bool,
}

impl Stepper {
    /// Wrap `engine` with speed 1.0, an empty accumulator, and unpaused.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            accumulator: 0.0,
            speed: 1.0,
            paused: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Scaled time accrued toward the next step.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop accruing time. Ticks while paused are no-ops.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume accruing time from the preserved accumulator.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the speed multiplier. Accepts positive finite values only.
    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), StepperError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(StepperError::InvalidSpeed(multiplier));
        }
        self.speed = multiplier;
        Ok(())
    }

    /// Advance by `dt` seconds of frame time.
    ///
    /// Accumulates `dt * speed`; on crossing the threshold the accumulator
    /// is zeroed (remainder dropped) and exactly one engine step runs,
    /// however far past the threshold the accumulator got. Returns the
    /// step's event, or `None` when paused or still below threshold.
    /// Crossing the threshold after the run has ended surfaces the engine's
    /// state error.
    pub fn tick(&mut self, dt: f64) -> Result<Option<StepEvent>, StepperError> {
        if self.paused {
            return Ok(None);
        }
        self.accumulator += dt * self.speed;
        if self.accumulator < STEP_THRESHOLD {
            return Ok(None);
        }
        self.accumulator = 0.0;
        Ok(Some(self.engine.step()?))
    }

    /// Zero the accumulator and reset the engine to idle.
    ///
    /// The pause flag is left as-is; pausing is orthogonal to the run.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.engine.reset();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
