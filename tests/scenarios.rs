use tapewalk::{
    Direction, HaltReason, Program, ProgramLoader, Snapshot, Transition, TuringMachine,
};

fn program(tape: &str, position: usize, step_limit: usize, rules: Vec<Transition>) -> Program {
    Program {
        name: "scenario".to_string(),
        initial_state: "0".to_string(),
        halt_state: "X".to_string(),
        starting_position: position,
        step_limit,
        tape: tape.chars().collect(),
        transitions: rules,
    }
}

#[test]
fn binary_increment_from_description() {
    let content = r#"{
        "starting_position": 4,
        "step_limit": 10,
        "tape": "1011",
        "commands": [
            {"current_state": "0", "current_symbol": "1", "new_symbol": "0", "direction": "L", "new_state": "0"},
            {"current_state": "0", "current_symbol": "0", "new_symbol": "1", "direction": "L", "new_state": "X"}
        ]
    }"#;

    let program = ProgramLoader::load_program_from_string(content).unwrap();
    let mut machine = TuringMachine::new(program).unwrap();
    let result = machine.run().unwrap();

    assert_eq!(result.final_tape.to_string(), "1100");
    assert_eq!(result.halt_reason, HaltReason::ExplicitHalt);
    // Two carries plus the final write
    assert_eq!(result.step_count, 3);
    assert_eq!(machine.state(), "X");
}

#[test]
fn no_matching_rule_halts_without_touching_the_tape() {
    let rules = vec![Transition::new("0", '1', '1', Direction::Right, "0")];
    let mut machine = TuringMachine::new(program("19", 1, 10, rules)).unwrap();

    let result = machine.run().unwrap();

    assert_eq!(result.halt_reason, HaltReason::NoMatchingTransition);
    assert_eq!(result.final_tape.to_string(), "19");
    assert_eq!(result.step_count, 0);
    assert_eq!(machine.position(), 1);

    // The cycle that read '9' was still observed
    let trace: Vec<Snapshot> = result.trace.collect::<Result<_, _>>().unwrap();
    assert_eq!(trace.len(), 1);
}

#[test]
fn self_loop_stops_at_step_limit() {
    let rules = vec![
        Transition::new("0", 'a', 'a', Direction::Right, "0"),
        Transition::new("0", 'b', 'b', Direction::Left, "0"),
    ];
    let mut machine = TuringMachine::new(program("ab", 0, 5, rules)).unwrap();

    let result = machine.run().unwrap();

    assert_eq!(result.halt_reason, HaltReason::StepLimitExceeded);
    assert_eq!(result.step_count, 5);
}

#[test]
fn moving_left_from_first_cell_underflows() {
    let rules = vec![Transition::new("0", 'a', 'b', Direction::Left, "1")];
    let mut machine = TuringMachine::new(program("aa", 0, 10, rules)).unwrap();

    let result = machine.run().unwrap();

    assert_eq!(result.halt_reason, HaltReason::TapeUnderflow);
    assert_eq!(machine.position(), 0);
    assert_eq!(result.final_tape.to_string(), "ba");
}

#[test]
fn moving_right_from_last_cell_overflows() {
    let rules = vec![Transition::new("0", 'a', 'a', Direction::Right, "0")];
    let mut machine = TuringMachine::new(program("aaa", 0, 10, rules)).unwrap();

    let result = machine.run().unwrap();

    assert_eq!(result.halt_reason, HaltReason::TapeOverflow);
    assert_eq!(result.step_count, 3);
    assert_eq!(machine.position(), 2);
}

#[test]
fn earlier_rule_wins_over_duplicate() {
    let rules = vec![
        Transition::new("0", 'a', 'x', Direction::Right, "X"),
        Transition::new("0", 'a', 'y', Direction::Right, "X"),
    ];
    let mut machine = TuringMachine::new(program("aa", 0, 10, rules)).unwrap();

    let result = machine.run().unwrap();

    assert_eq!(result.final_tape.to_string(), "xa");
    assert_eq!(result.halt_reason, HaltReason::ExplicitHalt);
}

#[test]
fn trace_matches_observer() {
    let rules = vec![
        Transition::new("0", '1', '0', Direction::Left, "0"),
        Transition::new("0", '0', '1', Direction::Left, "X"),
    ];
    let mut machine = TuringMachine::new(program("0111", 3, 10, rules)).unwrap();

    let mut observed = Vec::new();
    let result = machine.run_with(|s| observed.push(s.clone())).unwrap();
    let replayed: Vec<Snapshot> = result.trace.collect::<Result<_, _>>().unwrap();

    assert_eq!(observed, replayed);
    assert_eq!(
        observed.iter().map(|s| s.position).collect::<Vec<_>>(),
        vec![3, 2, 1, 0]
    );
    assert_eq!(machine.tape().to_string(), "1000");
}
