//! This crate provides the core logic for a fixed-tape Turing Machine simulator.
//! It includes modules for loading program descriptions, modelling the tape and the
//! transition table, driving the head one cycle at a time, and a small library of
//! bundled programs.

pub mod controller;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Controller` struct from the controller module.
pub use controller::Controller;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the engine types from the machine module.
pub use machine::{RunResult, Snapshot, Trace, TuringMachine};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the data model shared by the loader and the engine.
pub use types::{
    Direction, HaltReason, Program, State, Step, Symbol, Transition, TuringMachineError,
    DEFAULT_HALT_STATE, DEFAULT_INITIAL_STATE,
};
