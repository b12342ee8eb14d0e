//! This module provides opt-in checks for the cross references the parser leaves alone: the
//! start and final states must be declared, every transition must cover exactly one entry per
//! tape, name declared states and only use tape symbols (or the wildcard).
//!
//! The parser never calls into this module. A description that fails analysis may still run;
//! it only fails once the engine actually reaches the broken part.

use crate::types::{Program, TuringMachineError, WILDCARD_SYMBOL};

/// Represents various errors that can be found during the analysis of a Turing Machine program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The `#q0` state is not part of `#Q`.
    InvalidStartState(String),
    /// States listed in `#F` that are not part of `#Q`.
    UndeclaredFinalStates(Vec<String>),
    /// Input symbols that are missing from the tape alphabet.
    InputNotOnTape(Vec<char>),
    /// A transition whose read, write or move field length differs from `#N`.
    InvalidArity { line: usize, expected: usize },
    /// Transitions that leave from or lead to states missing from `#Q`, as `line: state`.
    UndefinedStates(Vec<String>),
    /// Transitions that read or write symbols missing from `#G`, as `line: symbol`.
    InvalidTapeSymbols(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndeclaredFinalStates(states) => TuringMachineError::ValidationError(
                format!("Final states not declared in #Q: {:?}", states),
            ),
            AnalysisError::InputNotOnTape(symbols) => TuringMachineError::ValidationError(
                format!("Input symbols missing from #G: {:?}", symbols),
            ),
            AnalysisError::InvalidArity { line, expected } => {
                TuringMachineError::ValidationError(format!(
                    "Transition on line {} does not have {} entries per field",
                    line, expected
                ))
            }
            AnalysisError::UndefinedStates(states) => TuringMachineError::ValidationError(
                format!("Transitions reference undeclared states: {:?}", states),
            ),
            AnalysisError::InvalidTapeSymbols(symbols) => TuringMachineError::ValidationError(
                format!("Transitions use symbols missing from #G: {:?}", symbols),
            ),
        }
    }
}

/// Analyzes a parsed `Program` for broken cross references.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first failed check.
pub fn analyze(program: &Program) -> Result<(), TuringMachineError> {
    [
        check_start_state,
        check_final_states,
        check_input_alphabet,
        check_arity,
        check_transition_states,
        check_tape_symbols,
    ]
    .iter()
    .find_map(|check| check(program).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

fn check_start_state(program: &Program) -> Result<(), AnalysisError> {
    if !program.states.contains(&program.initial_state) {
        return Err(AnalysisError::InvalidStartState(
            program.initial_state.clone(),
        ));
    }

    Ok(())
}

fn check_final_states(program: &Program) -> Result<(), AnalysisError> {
    let undeclared: Vec<String> = program
        .final_states
        .difference(&program.states)
        .cloned()
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredFinalStates(undeclared));
    }

    Ok(())
}

fn check_input_alphabet(program: &Program) -> Result<(), AnalysisError> {
    let missing: Vec<char> = program
        .input_symbols
        .difference(&program.tape_symbols)
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::InputNotOnTape(missing));
    }

    Ok(())
}

/// Checks that every transition has exactly one read symbol, write symbol and move per tape.
fn check_arity(program: &Program) -> Result<(), AnalysisError> {
    program
        .transitions
        .iter()
        .find(|t| !t.has_arity(program.tape_count))
        .map_or(Ok(()), |t| {
            Err(AnalysisError::InvalidArity {
                line: t.line,
                expected: program.tape_count,
            })
        })
}

fn check_transition_states(program: &Program) -> Result<(), AnalysisError> {
    let undefined: Vec<String> = program
        .transitions
        .iter()
        .flat_map(|t| [(t.line, &t.state), (t.line, &t.next_state)])
        .filter(|(_, state)| !program.states.contains(*state))
        .map(|(line, state)| format!("{}: {}", line, state))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined));
    }

    Ok(())
}

fn check_tape_symbols(program: &Program) -> Result<(), AnalysisError> {
    let invalid: Vec<String> = program
        .transitions
        .iter()
        .flat_map(|t| t.read.iter().chain(&t.write).map(move |&c| (t.line, c)))
        .filter(|&(_, c)| c != WILDCARD_SYMBOL && !program.tape_symbols.contains(&c))
        .map(|(line, c)| format!("{}: {}", line, c))
        .collect();

    if !invalid.is_empty() {
        return Err(AnalysisError::InvalidTapeSymbols(invalid));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const VALID: &str = r#"
#Q = {start,halt}
#S = {a}
#G = {a,b,_}
#q0 = start
#B = _
#F = {halt}
#N = 1
start a b r start
start _ * * halt
"#;

    fn program_with(from: &str, to: &str) -> Program {
        parse(&VALID.replacen(from, to, 1)).unwrap()
    }

    #[test]
    fn test_valid_program() {
        let program = parse(VALID).unwrap();
        assert!(analyze(&program).is_ok());
    }

    #[test]
    fn test_invalid_start_state() {
        let program = program_with("#q0 = start", "#q0 = begin");

        assert_eq!(
            check_start_state(&program),
            Err(AnalysisError::InvalidStartState("begin".to_string()))
        );
        assert_eq!(
            analyze(&program).unwrap_err().to_string(),
            "Program validation error: Invalid start state: begin"
        );
    }

    #[test]
    fn test_undeclared_final_states() {
        let program = program_with("#F = {halt}", "#F = {halt,accept}");
        assert_eq!(
            check_final_states(&program),
            Err(AnalysisError::UndeclaredFinalStates(vec!["accept".to_string()]))
        );
    }

    #[test]
    fn test_input_not_on_tape() {
        let program = program_with("#S = {a}", "#S = {a,c}");
        assert_eq!(
            check_input_alphabet(&program),
            Err(AnalysisError::InputNotOnTape(vec!['c']))
        );
    }

    #[test]
    fn test_invalid_arity() {
        let program = program_with("start a b r start", "start aa bb rr start");
        assert_eq!(
            check_arity(&program),
            Err(AnalysisError::InvalidArity {
                line: 9,
                expected: 1
            })
        );
    }

    #[test]
    fn test_undefined_states() {
        let program = program_with("start _ * * halt", "start _ * * done");
        assert_eq!(
            check_transition_states(&program),
            Err(AnalysisError::UndefinedStates(vec!["10: done".to_string()]))
        );
    }

    #[test]
    fn test_invalid_tape_symbols() {
        let program = program_with("start a b r start", "start a z r start");
        assert_eq!(
            check_tape_symbols(&program),
            Err(AnalysisError::InvalidTapeSymbols(vec!["9: z".to_string()]))
        );
    }

    #[test]
    fn test_first_failure_is_reported() {
        let program = program_with("#q0 = start", "#q0 = begin");
        let program = Program {
            final_states: ["nowhere".to_string()].into_iter().collect(),
            ..program
        };

        assert_eq!(
            analyze(&program).unwrap_err().to_string(),
            "Program validation error: Invalid start state: begin"
        );
    }
}
