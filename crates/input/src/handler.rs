//! Turn gate for terminal input.
//!
//! Each accepted move starts a transition lasting `max_travel` steps. While it
//! plays, further slides are dropped rather than queued, so a turn always
//! completes on screen before the next one is resolved. Restart is never
//! gated and cancels a running transition.

use crate::types::{GameAction, DEFAULT_STEP_MS};

#[derive(Debug, Clone)]
pub struct InputGate {
    step_ms: u32,
    /// Total length of the running transition
    transition_ms: u32,
    elapsed_ms: u32,
}

impl InputGate {
    pub fn new() -> Self {
        Self::with_step_ms(DEFAULT_STEP_MS)
    }

    pub fn with_step_ms(step_ms: u32) -> Self {
        Self {
            step_ms,
            transition_ms: 0,
            elapsed_ms: 0,
        }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// Start the transition of an accepted move of `steps` cells
    pub fn begin_turn(&mut self, steps: u32) {
        self.transition_ms = steps.saturating_mul(self.step_ms);
        self.elapsed_ms = 0;
    }

    /// Drop any running transition
    pub fn cancel(&mut self) {
        self.transition_ms = 0;
        self.elapsed_ms = 0;
    }

    /// Advance the clock
    pub fn update(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(elapsed_ms)
            .min(self.transition_ms);
    }

    pub fn busy(&self) -> bool {
        self.elapsed_ms < self.transition_ms
    }

    /// Step of the running transition to draw, `0..=steps`.
    ///
    /// Returns `None` once the transition has finished.
    pub fn current_step(&self) -> Option<u32> {
        if !self.busy() || self.step_ms == 0 {
            return None;
        }
        Some(self.elapsed_ms / self.step_ms)
    }

    /// Filter an incoming action
    pub fn accept(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::Restart => {
                self.cancel();
                Some(action)
            }
            GameAction::Slide(_) if self.busy() => None,
            GameAction::Slide(_) => Some(action),
        }
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}
