//! This module provides the `ProgramLoader` struct, responsible for turning JSON program
//! descriptions into validated `Program` values, from files, directories, or strings.
//!
//! A description looks like:
//!
//! ```json
//! {
//!   "starting_position": 4,
//!   "step_limit": 10,
//!   "tape": "1011",
//!   "commands": [
//!     { "current_state": "0", "current_symbol": "1", "new_symbol": "0", "direction": "L", "new_state": "0" },
//!     { "current_state": "0", "current_symbol": "0", "new_symbol": "1", "direction": "l", "new_state": "X" }
//!   ]
//! }
//! ```
//!
//! `starting_position` is 1-based in the description and 0-based in the resulting
//! `Program`. `name`, `initial_state` and `halt_state` are optional.

use crate::table::TransitionTable;
use crate::types::{
    Direction, Program, Symbol, Transition, TuringMachineError, DEFAULT_HALT_STATE,
    DEFAULT_INITIAL_STATE,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_PROGRAM_NAME: &str = "untitled";

/// The on-disk shape of a program, before validation.
#[derive(Debug, Deserialize)]
struct ProgramDescription {
    #[serde(default)]
    name: Option<String>,
    starting_position: Count,
    step_limit: Count,
    tape: String,
    commands: Vec<CommandRecord>,
    #[serde(default)]
    initial_state: Option<String>,
    #[serde(default)]
    halt_state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandRecord {
    current_state: String,
    current_symbol: String,
    new_symbol: String,
    direction: String,
    new_state: String,
}

/// Numeric fields may be written either as JSON numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(i64),
    Text(String),
}

impl Count {
    fn resolve(&self, field: &str) -> Result<i64, TuringMachineError> {
        match self {
            Count::Number(n) => Ok(*n),
            Count::Text(text) => text.trim().parse().map_err(|_| {
                TuringMachineError::ValidationError(format!(
                    "Field '{}' must be an integer, got '{}'",
                    field, text
                ))
            }),
        }
    }
}

/// `ProgramLoader` is a utility struct for loading Turing Machine programs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// When the description has no `name`, the file stem is used.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ParseError)` if the file is not a valid description.
    /// * `Err(TuringMachineError::ValidationError)` if a field has an invalid value.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let mut description: ProgramDescription = serde_json::from_str(&content)?;
        if description.name.is_none() {
            description.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }

        debug!(path = %path.display(), "loaded program description");
        validate(description)
    }

    /// Loads a single program from the provided JSON content.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        let description: ProgramDescription = serde_json::from_str(content)?;
        validate(description)
    }

    /// Loads all program files (`.json` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each remaining file
    /// yields one result, so a single bad file does not hide the others.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                Some(Self::load_program(&path).map(|program| (path, program)))
            })
            .collect()
    }
}

/// Checks every field of a description and converts it into a `Program`.
fn validate(description: ProgramDescription) -> Result<Program, TuringMachineError> {
    let tape: Vec<Symbol> = description.tape.chars().collect();
    if tape.is_empty() {
        return Err(TuringMachineError::ValidationError(
            "Tape must contain at least one cell".to_string(),
        ));
    }

    let starting_position = description.starting_position.resolve("starting_position")?;
    if starting_position < 1 || starting_position as usize > tape.len() {
        return Err(TuringMachineError::ValidationError(format!(
            "Starting position {} is outside the tape (1..={})",
            starting_position,
            tape.len()
        )));
    }

    let step_limit = description.step_limit.resolve("step_limit")?;
    if step_limit < 1 {
        return Err(TuringMachineError::ValidationError(format!(
            "Step limit must be at least 1, got {}",
            step_limit
        )));
    }

    let transitions = description
        .commands
        .into_iter()
        .enumerate()
        .map(|(i, command)| parse_command(i, command))
        .collect::<Result<Vec<_>, _>>()?;

    let program = Program {
        name: description
            .name
            .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string()),
        initial_state: description
            .initial_state
            .unwrap_or_else(|| DEFAULT_INITIAL_STATE.to_string()),
        halt_state: description
            .halt_state
            .unwrap_or_else(|| DEFAULT_HALT_STATE.to_string()),
        // Descriptions count cells from 1; the engine counts from 0.
        starting_position: starting_position as usize - 1,
        step_limit: step_limit as usize,
        tape,
        transitions,
    };

    report_suspicious_rules(&program);

    Ok(program)
}

fn parse_command(index: usize, command: CommandRecord) -> Result<Transition, TuringMachineError> {
    let direction: Direction = command.direction.parse().map_err(|e| {
        TuringMachineError::ValidationError(format!("Command {}: {}", index + 1, e))
    })?;

    Ok(Transition {
        symbol: parse_symbol(index, "current_symbol", &command.current_symbol)?,
        new_symbol: parse_symbol(index, "new_symbol", &command.new_symbol)?,
        state: command.current_state,
        direction,
        new_state: command.new_state,
    })
}

fn parse_symbol(index: usize, field: &str, text: &str) -> Result<Symbol, TuringMachineError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(TuringMachineError::ValidationError(format!(
            "Command {}: '{}' must be a single character, got '{}'",
            index + 1,
            field,
            text
        ))),
    }
}

/// Logs rules that are legal but probably not what the author meant.
fn report_suspicious_rules(program: &Program) {
    let table = TransitionTable::new(program.transitions.clone());

    for (index, transition) in table.shadowed() {
        warn!(
            program = %program.name,
            command = index + 1,
            rule = %transition,
            "rule is shadowed by an earlier rule with the same state and symbol"
        );
    }

    if !table.iter().any(|t| t.state == program.initial_state) {
        warn!(
            program = %program.name,
            initial_state = %program.initial_state,
            "no rule starts from the initial state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const INCREMENT: &str = r#"{
        "starting_position": 4,
        "step_limit": 10,
        "tape": "1011",
        "commands": [
            {"current_state": "0", "current_symbol": "1", "new_symbol": "0", "direction": "L", "new_state": "0"},
            {"current_state": "0", "current_symbol": "0", "new_symbol": "1", "direction": "l", "new_state": "X"}
        ]
    }"#;

    #[test]
    fn test_load_from_string() {
        let program = ProgramLoader::load_program_from_string(INCREMENT).unwrap();

        assert_eq!(program.name, DEFAULT_PROGRAM_NAME);
        assert_eq!(program.initial_state, "0");
        assert_eq!(program.halt_state, "X");
        assert_eq!(program.starting_position, 3);
        assert_eq!(program.step_limit, 10);
        assert_eq!(program.initial_tape(), "1011");
        assert_eq!(program.transitions.len(), 2);
        assert_eq!(program.transitions[1].direction, Direction::Left);
    }

    #[test]
    fn test_optional_fields_and_string_counts() {
        let content = r#"{
            "name": "custom",
            "initial_state": "start",
            "halt_state": "done",
            "starting_position": "1",
            "step_limit": "3",
            "tape": "ab",
            "commands": []
        }"#;

        let program = ProgramLoader::load_program_from_string(content).unwrap();

        assert_eq!(program.name, "custom");
        assert_eq!(program.initial_state, "start");
        assert_eq!(program.halt_state, "done");
        assert_eq!(program.starting_position, 0);
        assert_eq!(program.step_limit, 3);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = ProgramLoader::load_program_from_string("This is not a valid program");
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));

        let missing_field = r#"{"starting_position": 1, "step_limit": 1, "tape": "a"}"#;
        let result = ProgramLoader::load_program_from_string(missing_field);
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (r#""starting_position": 0, "step_limit": 1, "tape": "a""#, "Starting position"),
            (r#""starting_position": 2, "step_limit": 1, "tape": "a""#, "Starting position"),
            (r#""starting_position": 1, "step_limit": 0, "tape": "a""#, "Step limit"),
            (r#""starting_position": 1, "step_limit": 1, "tape": """#, "Tape"),
            (r#""starting_position": "x", "step_limit": 1, "tape": "a""#, "integer"),
        ];

        for (fields, expected) in cases {
            let content = format!(r#"{{{}, "commands": []}}"#, fields);
            match ProgramLoader::load_program_from_string(&content) {
                Err(TuringMachineError::ValidationError(msg)) => {
                    assert!(msg.contains(expected), "'{}' missing '{}'", msg, expected)
                }
                other => panic!("Expected a validation error for {}, got {:?}", fields, other),
            }
        }
    }

    #[test]
    fn test_invalid_commands() {
        let command = |symbol: &str, direction: &str| {
            format!(
                r#"{{"starting_position": 1, "step_limit": 1, "tape": "a", "commands": [
                    {{"current_state": "0", "current_symbol": "{}", "new_symbol": "b", "direction": "{}", "new_state": "X"}}
                ]}}"#,
                symbol, direction
            )
        };

        let err = ProgramLoader::load_program_from_string(&command("ab", "R")).unwrap_err();
        assert!(err.to_string().contains("single character"));

        let err = ProgramLoader::load_program_from_string(&command("", "R")).unwrap_err();
        assert!(err.is_configuration());

        let err = ProgramLoader::load_program_from_string(&command("a", "S")).unwrap_err();
        assert!(err.to_string().contains("Invalid direction"));
    }

    #[test]
    fn test_duplicate_rules_are_kept() {
        let content = r#"{
            "starting_position": 1, "step_limit": 5, "tape": "a",
            "commands": [
                {"current_state": "0", "current_symbol": "a", "new_symbol": "b", "direction": "R", "new_state": "X"},
                {"current_state": "0", "current_symbol": "a", "new_symbol": "c", "direction": "R", "new_state": "X"}
            ]
        }"#;

        let program = ProgramLoader::load_program_from_string(content).unwrap();
        assert_eq!(program.transitions.len(), 2);
    }

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("increment.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(INCREMENT.as_bytes()).unwrap();

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.name, "increment");
        assert_eq!(program.initial_tape(), "1011");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_programs_from_directory() {
        let dir = tempdir().unwrap();

        let mut valid_file = File::create(dir.path().join("valid.json")).unwrap();
        valid_file.write_all(INCREMENT.as_bytes()).unwrap();

        let mut invalid_file = File::create(dir.path().join("invalid.json")).unwrap();
        invalid_file.write_all(b"{ not json").unwrap();

        let mut ignored_file = File::create(dir.path().join("ignored.txt")).unwrap();
        ignored_file.write_all(b"This file should be ignored").unwrap();

        let results = ProgramLoader::load_programs(dir.path());

        // We should have 2 results: 1 success and 1 error
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_programs_from_missing_directory() {
        let dir = tempdir().unwrap();
        let results = ProgramLoader::load_programs(&dir.path().join("nowhere"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(TuringMachineError::FileError(_))));
    }
}
