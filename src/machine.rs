//! This module defines the `TuringMachine` struct, the engine that drives a `Controller`
//! over a `Tape` until it halts. It also exposes the per-cycle observations consumed by
//! trace printers: a callback-based run and a lazy, replayable `Trace` iterator.

use crate::controller::Controller;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{HaltReason, Program, Step, TuringMachineError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// The machine as observed right before a cycle runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Number of cycles completed so far.
    pub step: usize,
    /// Current state of the head.
    pub state: String,
    /// Full tape contents.
    pub tape: String,
    /// 0-based head position.
    pub position: usize,
}

impl fmt::Display for Snapshot {
    /// Renders the tape on one line and a `^` under the head on the next.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tape)?;
        write!(f, "{:>width$}", "^", width = self.position + 1)
    }
}

/// The outcome of a complete run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub final_tape: Tape,
    pub step_count: usize,
    pub halt_reason: HaltReason,
    /// Replays the run from its initial configuration, one snapshot per cycle.
    pub trace: Trace,
}

/// A lazy sequence of snapshots, one per cycle, starting from the initial configuration.
///
/// The run is deterministic, so cloning a trace or asking the machine for a new one
/// replays exactly the same sequence. It is finite because every run is bounded by
/// the step limit.
#[derive(Debug, Clone)]
pub struct Trace {
    tape: Tape,
    controller: Controller,
    table: Arc<TransitionTable>,
    failed: bool,
}

impl Iterator for Trace {
    type Item = Result<Snapshot, TuringMachineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.controller.is_halted() {
            return None;
        }

        let snapshot = snapshot(&self.tape, &self.controller);
        match self.controller.cycle(&mut self.tape, &self.table) {
            Ok(_) => Some(Ok(snapshot)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Represents a single-tape Turing Machine with a fixed-length tape.
///
/// The machine owns its tape and controller exclusively; the transition table is
/// shared read-only with any traces it hands out.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    program: Program,
    table: Arc<TransitionTable>,
    tape: Tape,
    controller: Controller,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` instance from a given `Program`.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` ready to run.
    /// * `Err(TuringMachineError::OutOfBounds)` if the starting position is not on the tape.
    /// * `Err(TuringMachineError::ValidationError)` if the step limit is zero.
    pub fn new(program: Program) -> Result<Self, TuringMachineError> {
        if program.starting_position >= program.tape.len() {
            return Err(TuringMachineError::OutOfBounds {
                position: program.starting_position,
                length: program.tape.len(),
            });
        }

        if program.step_limit == 0 {
            return Err(TuringMachineError::ValidationError(
                "Step limit must be at least 1".to_string(),
            ));
        }

        let table = Arc::new(TransitionTable::new(program.transitions.clone()));
        let (tape, controller) = initial_configuration(&program);

        Ok(Self {
            program,
            table,
            tape,
            controller,
        })
    }

    /// Executes a single cycle of the machine.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the machine can keep running.
    /// * `Ok(Step::Halt(reason))` once the machine has halted.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let was_halted = self.controller.is_halted();
        let step = self.controller.cycle(&mut self.tape, &self.table)?;

        if let (Step::Halt(reason), false) = (step, was_halted) {
            info!(
                program = %self.program.name,
                %reason,
                steps = self.controller.step_count(),
                state = %self.controller.state(),
                "machine halted"
            );
        }

        Ok(step)
    }

    /// Runs the machine until it halts.
    pub fn run(&mut self) -> Result<RunResult, TuringMachineError> {
        self.run_with(|_| {})
    }

    /// Runs the machine until it halts, handing `observer` a snapshot before every cycle.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunResult, TuringMachineError>
    where
        F: FnMut(&Snapshot),
    {
        let halt_reason = loop {
            if let Some(reason) = self.controller.halt_reason() {
                break reason;
            }

            observer(&self.snapshot());
            self.step()?;
        };

        Ok(RunResult {
            final_tape: self.tape.clone(),
            step_count: self.controller.step_count(),
            halt_reason,
            trace: self.trace(),
        })
    }

    /// Returns a lazy trace of this program, replayed from the initial configuration.
    pub fn trace(&self) -> Trace {
        let (tape, controller) = initial_configuration(&self.program);
        Trace {
            tape,
            controller,
            table: Arc::clone(&self.table),
            failed: false,
        }
    }

    /// Returns the observation of the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        snapshot(&self.tape, &self.controller)
    }

    /// Resets the machine to its initial configuration.
    pub fn reset(&mut self) {
        let (tape, controller) = initial_configuration(&self.program);
        self.tape = tape;
        self.controller = controller;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn position(&self) -> usize {
        self.controller.position()
    }

    pub fn state(&self) -> &str {
        self.controller.state()
    }

    pub fn step_count(&self) -> usize {
        self.controller.step_count()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.controller.halt_reason()
    }

    pub fn is_halted(&self) -> bool {
        self.controller.is_halted()
    }
}

fn initial_configuration(program: &Program) -> (Tape, Controller) {
    (
        Tape::new(program.tape.clone()),
        Controller::new(
            program.starting_position,
            program.initial_state.clone(),
            program.halt_state.clone(),
            program.step_limit,
        ),
    )
}

fn snapshot(tape: &Tape, controller: &Controller) -> Snapshot {
    Snapshot {
        step: controller.step_count(),
        state: controller.state().to_string(),
        tape: tape.to_string(),
        position: controller.position(),
    }
}
