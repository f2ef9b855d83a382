//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including program representation, transitions, halt outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single tape symbol.
pub type Symbol = char;
/// An opaque state label.
pub type State = String;

/// The state a program starts in when its description does not name one.
pub const DEFAULT_INITIAL_STATE: &str = "0";
/// The halting state used when a program description does not name one.
pub const DEFAULT_HALT_STATE: &str = "X";

/// A fully validated Turing Machine program, ready to be handed to the engine.
///
/// The loader is responsible for producing this value; every field has already been
/// checked, and `starting_position` is already 0-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Display name of the program.
    pub name: String,
    /// The state the head starts in.
    pub initial_state: State,
    /// Entering this state halts the machine.
    pub halt_state: State,
    /// 0-based index of the head on the initial tape.
    pub starting_position: usize,
    /// Maximum number of cycles before the run is forcibly stopped.
    pub step_limit: usize,
    /// Initial tape contents. The tape never grows or shrinks.
    pub tape: Vec<Symbol>,
    /// Transition rules in authoring order.
    pub transitions: Vec<Transition>,
}

impl Program {
    /// Returns the initial tape as a `String`.
    pub fn initial_tape(&self) -> String {
        self.tape.iter().collect()
    }
}

/// A single rule: `(state, symbol) -> (new_symbol, direction, new_state)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub symbol: Symbol,
    pub new_symbol: Symbol,
    pub direction: Direction,
    pub new_state: State,
}

impl Transition {
    pub fn new(
        state: impl Into<State>,
        symbol: Symbol,
        new_symbol: Symbol,
        direction: Direction,
        new_state: impl Into<State>,
    ) -> Self {
        Self {
            state: state.into(),
            symbol,
            new_symbol,
            direction,
            new_state: new_state.into(),
        }
    }

    /// Returns true if this rule applies to the given state and symbol.
    pub fn matches(&self, state: &str, symbol: Symbol) -> bool {
        self.state == state && self.symbol == symbol
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} {}",
            self.state, self.symbol, self.new_symbol, self.direction, self.new_state
        )
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl FromStr for Direction {
    type Err = TuringMachineError;

    /// Parses `L`/`R` (or `left`/`right`) in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LEFT" => Ok(Direction::Left),
            "R" | "RIGHT" => Ok(Direction::Right),
            _ => Err(TuringMachineError::ValidationError(format!(
                "Invalid direction '{}', expected L or R",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = TuringMachineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.to_string()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "L"),
            Direction::Right => write!(f, "R"),
        }
    }
}

/// Why a run stopped. Every variant is a normal termination outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HaltReason {
    /// The machine entered its halting state.
    ExplicitHalt,
    /// No rule matches the current state and symbol.
    NoMatchingTransition,
    /// A rule moved the head left off cell 0.
    TapeUnderflow,
    /// A rule moved the head right off the last cell.
    TapeOverflow,
    /// The step counter reached the step limit.
    StepLimitExceeded,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HaltReason::ExplicitHalt => "reached halt state",
            HaltReason::NoMatchingTransition => "no matching transition",
            HaltReason::TapeUnderflow => "moved past the left end of the tape",
            HaltReason::TapeOverflow => "moved past the right end of the tape",
            HaltReason::StepLimitExceeded => "step limit exceeded",
        };
        f.write_str(text)
    }
}

/// Represents the outcome of a single machine cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cycle completed and the machine can keep going.
    Continue,
    /// The machine has halted for the given reason.
    Halt(HaltReason),
}

/// Represents the errors that can occur while loading or running a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// A tape access outside `[0, length)`. Only raised on an internal contract violation.
    #[error("Tape position {position} is out of bounds for tape of length {length}")]
    OutOfBounds { position: usize, length: usize },
    /// Indicates an error during the parsing of a program description.
    #[error("Program parsing error: {0}")]
    ParseError(String),
    /// Indicates a structurally valid description with invalid contents.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
}

impl TuringMachineError {
    /// Returns true for errors raised while loading a program, before any engine exists.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TuringMachineError::ParseError(_)
                | TuringMachineError::ValidationError(_)
                | TuringMachineError::FileError(_)
        )
    }
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::ParseError(error.to_string())
    }
}
