use crate::loader::ProgramLoader;
use crate::types::{Program, TuringMachineError};

use std::sync::RwLock;
use tracing::error;

// Default embedded programs
const PROGRAM_TEXTS: [&str; 3] = [
    include_str!("../programs/binary-increment.json"),
    include_str!("../programs/unary-append.json"),
    include_str!("../programs/endless-loop.json"),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<Program>> = RwLock::new(Vec::new());
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parse the embedded programs and store them in the registry
    pub fn load() -> Result<(), TuringMachineError> {
        let mut programs = Vec::new();

        for (index, program_text) in PROGRAM_TEXTS.iter().enumerate() {
            match ProgramLoader::load_program_from_string(program_text) {
                Ok(program) => programs.push(program),
                Err(e) => error!(index, error = %e, "failed to load embedded program"),
            }
        }

        let mut write_guard = PROGRAMS.write().map_err(|_| {
            TuringMachineError::FileError("Failed to acquire write lock".to_string())
        })?;
        *write_guard = programs;

        Ok(())
    }

    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        let _ = Self::load();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| programs.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Get a summary of a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: program.initial_state.clone(),
            initial_tape: program.initial_tape(),
            step_limit: program.step_limit,
            transition_count: program.transitions.len(),
        })
    }

    /// Get the JSON source of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAM_TEXTS.get(index).copied().ok_or_else(|| {
            TuringMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub step_limit: usize,
    pub transition_count: usize,
}
