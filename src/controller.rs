//! This module defines the `Controller`, the read/write head of the machine.
//!
//! The controller owns all run-time mutable state (position, current state, step
//! counter and halt reason) and performs one atomic cycle at a time against a tape
//! and a transition table it does not own.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Direction, HaltReason, State, Step, TuringMachineError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    position: usize,
    state: State,
    halt_state: State,
    step_count: usize,
    step_limit: usize,
    halt_reason: Option<HaltReason>,
}

impl Controller {
    /// Creates a controller at a 0-based `position`.
    ///
    /// # Arguments
    ///
    /// * `position` - Starting cell, already converted to 0-based indexing.
    /// * `initial_state` - State the head starts in.
    /// * `halt_state` - Entering this state halts the machine.
    /// * `step_limit` - Maximum number of cycles before the run is stopped.
    pub fn new(
        position: usize,
        initial_state: impl Into<State>,
        halt_state: impl Into<State>,
        step_limit: usize,
    ) -> Self {
        Self {
            position,
            state: initial_state.into(),
            halt_state: halt_state.into(),
            step_count: 0,
            step_limit,
            halt_reason: None,
        }
    }

    /// Performs one cycle: read, look up, write, move, change state, count.
    ///
    /// A cycle with no matching rule leaves the tape, position and state untouched.
    /// Once a halt reason is set, further calls do nothing and report it again.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine can run another cycle.
    /// * `Ok(Step::Halt(reason))` if this or an earlier cycle halted the machine.
    /// * `Err(TuringMachineError::OutOfBounds)` if the position does not address the tape.
    pub fn cycle(
        &mut self,
        tape: &mut Tape,
        table: &TransitionTable,
    ) -> Result<Step, TuringMachineError> {
        if let Some(reason) = self.halt_reason {
            return Ok(Step::Halt(reason));
        }

        let symbol = tape.read(self.position)?;

        let transition = match table.lookup(&self.state, symbol) {
            Some(t) => t,
            None => {
                debug!(
                    state = %self.state,
                    %symbol,
                    position = self.position,
                    "no matching transition"
                );
                return Ok(self.halt(HaltReason::NoMatchingTransition));
            }
        };

        debug!(
            state = %self.state,
            %symbol,
            position = self.position,
            rule = %transition,
            "applying transition"
        );

        tape.write(self.position, transition.new_symbol)?;

        match transition.direction {
            Direction::Left => {
                if self.position == 0 {
                    self.halt_reason = Some(HaltReason::TapeUnderflow);
                } else {
                    self.position -= 1;
                }
            }
            Direction::Right => {
                if self.position + 1 >= tape.len() {
                    self.halt_reason = Some(HaltReason::TapeOverflow);
                } else {
                    self.position += 1;
                }
            }
        }

        self.state = transition.new_state.clone();
        if self.state == self.halt_state && self.halt_reason.is_none() {
            self.halt_reason = Some(HaltReason::ExplicitHalt);
        }

        // Never overwrites a reason set earlier in this cycle
        self.step_count += 1;
        if self.step_count >= self.step_limit && self.halt_reason.is_none() {
            self.halt_reason = Some(HaltReason::StepLimitExceeded);
        }

        Ok(match self.halt_reason {
            Some(reason) => Step::Halt(reason),
            None => Step::Continue,
        })
    }

    fn halt(&mut self, reason: HaltReason) -> Step {
        self.halt_reason = Some(reason);
        Step::Halt(reason)
    }

    /// Returns the 0-based head position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the current state of the head.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn halt_state(&self) -> &str {
        &self.halt_state
    }

    /// Returns the number of completed cycles that matched a rule.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt_reason
    }

    pub fn is_halted(&self) -> bool {
        self.halt_reason.is_some()
    }
}
