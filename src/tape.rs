//! Fixed-length tape storage.

use crate::types::{Symbol, TuringMachineError};
use std::fmt;

/// A fixed-length, randomly addressable sequence of symbols.
///
/// The length is set at construction and never changes; every read and write is
/// bounds-checked against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
}

impl Tape {
    pub fn new(cells: Vec<Symbol>) -> Self {
        Self { cells }
    }

    /// Returns the symbol at `position`.
    pub fn read(&self, position: usize) -> Result<Symbol, TuringMachineError> {
        self.cells
            .get(position)
            .copied()
            .ok_or_else(|| self.out_of_bounds(position))
    }

    /// Replaces the symbol at `position`, leaving every other cell untouched.
    pub fn write(&mut self, position: usize, symbol: Symbol) -> Result<(), TuringMachineError> {
        if position >= self.cells.len() {
            return Err(self.out_of_bounds(position));
        }

        self.cells[position] = symbol;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    fn out_of_bounds(&self, position: usize) -> TuringMachineError {
        TuringMachineError::OutOfBounds {
            position,
            length: self.cells.len(),
        }
    }
}

impl From<&str> for Tape {
    fn from(content: &str) -> Self {
        Self::new(content.chars().collect())
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{}", c))
    }
}
