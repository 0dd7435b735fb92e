//! Fixed-step animation clock.
//!
//! Playback fades and ping-pong bounces depend on the step size, so hosts
//! that want frame-rate independent results advance skeletons in equal
//! steps and carry the remainder over to the next frame.
//!
//! ```rust,ignore
//! let mut clock = FixedStep::from_rate(60.0)?;
//!
//! // every frame
//! for _ in 0..clock.advance(frame_dt) {
//!     skeleton.update(clock.step());
//! }
//! ```

use crate::errors::{MarrowError, Result};

/// Steps run per [`FixedStep::advance`] before the backlog is dropped.
pub const DEFAULT_MAX_STEPS: u32 = 8;

/// Splits variable frame times into whole steps of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    step: f32,
    max_steps: u32,
    /// Time not yet consumed by a whole step
    accumulator: f32,
    /// Total number of steps handed out
    pub steps_taken: u64,
}

impl FixedStep {
    /// `step` is in seconds and must be finite and positive.
    pub fn new(step: f32) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(MarrowError::InvalidTimeStep(step));
        }
        Ok(Self {
            step,
            max_steps: DEFAULT_MAX_STEPS,
            accumulator: 0.0,
            steps_taken: 0,
        })
    }

    /// Steps per second, e.g. `60.0`.
    pub fn from_rate(hz: f32) -> Result<Self> {
        Self::new(1.0 / hz)
    }

    /// Caps how many steps one frame may run; a long stall (debugger,
    /// window drag) then skips ahead instead of replaying every step.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `frame_dt` seconds and returns how many steps are due.
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            let dropped = self.accumulator - self.accumulator % self.step;
            log::debug!("FixedStep: {steps} steps this frame, dropping {dropped:.3}s backlog");
            self.accumulator %= self.step;
        }

        self.steps_taken += u64::from(steps);
        steps
    }

    /// Fraction of a step left over, in `[0, 1)`; use it to interpolate
    /// between the last two poses when rendering.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
