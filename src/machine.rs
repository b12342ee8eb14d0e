//! This module defines the `TuringMachine` struct, which simulates the behavior of a
//! multi-tape Turing Machine. It handles the machine's state, tape operations, head movements,
//! and execution of transition rules.

use crate::tape::Tape;
use crate::types::{Halt, Program, Step, Transition, TuringMachineError, WILDCARD_SYMBOL};
use tracing::{debug, trace};

/// Represents a multi-tape Turing Machine running a parsed `Program` on one input.
///
/// The machine owns its tapes and the current state. `step` is the only operation that
/// mutates them.
pub struct TuringMachine {
    program: Program,
    state: String,
    tapes: Vec<Tape>,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` for `program`, loaded with `input`.
    ///
    /// Tape 0 holds the input at positions `0..n`, every other tape holds `n` blank cells. An empty
    /// input leaves a single blank cell on each tape.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::IllegalInputSymbol)` for the first input character that is not a
    ///   declared input symbol.
    pub fn new(program: Program, input: &str) -> Result<Self, TuringMachineError> {
        let mut machine = Self {
            state: program.initial_state.clone(),
            tapes: Vec::new(),
            program,
            step_count: 0,
        };
        machine.reset(input)?;

        Ok(machine)
    }

    /// Resets the machine to its initial configuration with a new input.
    pub fn reset(&mut self, input: &str) -> Result<(), TuringMachineError> {
        check_input(&self.program, input)?;

        let len = input.chars().count();
        let blank = self.program.blank;

        self.tapes = (0..self.program.tape_count)
            .map(|i| match i {
                0 => Tape::new(input.chars(), blank),
                _ => Tape::blank(len, blank),
            })
            .collect();
        self.state = self.program.initial_state.clone();
        self.step_count = 0;

        Ok(())
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// Finds the first transition matching the current state and symbols, then writes, moves
    /// every head and changes state. The step either happens on all tapes or not at all.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(Halt::Ok)` if no transition matches.
    /// * `Step::Halt(Halt::Err(_))` if a candidate transition has the wrong number of tapes.
    pub fn step(&mut self) -> Step {
        let transition = match self.transition() {
            Ok(Some(t)) => t.clone(),
            Ok(None) => {
                debug!(
                    state = %self.state,
                    steps = self.step_count,
                    accepting = self.is_final(),
                    "halted"
                );
                return Step::Halt(Halt::Ok);
            }
            Err(e) => return Step::Halt(Halt::Err(e)),
        };

        trace!(
            step = self.step_count,
            line = transition.line,
            from = %self.state,
            to = %transition.next_state,
            "apply"
        );

        for (i, tape) in self.tapes.iter_mut().enumerate() {
            if transition.write[i] != WILDCARD_SYMBOL {
                tape.write(transition.write[i]);
            }
            tape.shift(transition.directions[i]);
        }

        self.state = transition.next_state;
        self.step_count += 1;

        Step::Continue
    }

    /// Runs the Turing Machine until it halts.
    ///
    /// There is no step limit: a machine that never runs out of transitions never returns.
    pub fn run(&mut self) -> Step {
        self.run_with(|_| {})
    }

    /// Runs the machine to a halt, calling `inspect` before every step attempt.
    ///
    /// The last call sees the halting configuration.
    pub fn run_with<F>(&mut self, mut inspect: F) -> Step
    where
        F: FnMut(&TuringMachine),
    {
        loop {
            inspect(self);
            match self.step() {
                Step::Continue => continue,
                halt => return halt,
            }
        }
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns true if the current state is one of the declared final states.
    pub fn is_final(&self) -> bool {
        self.program.is_final(&self.state)
    }

    /// Returns the program the machine runs.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the total number of steps executed by the Turing Machine.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns a slice of the machine's tapes.
    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    /// Returns a vector of symbols currently under each tape's head.
    pub fn symbols(&self) -> Vec<char> {
        self.tapes.iter().map(Tape::read).collect()
    }

    /// The content of tape 0 without leading and trailing blanks.
    pub fn output(&self) -> String {
        self.tapes.first().map(Tape::trimmed).unwrap_or_default()
    }

    /// Finds the first transition matching the current state and the symbols under the heads.
    ///
    /// Transitions are scanned in declaration order. A transition for the current state whose
    /// fields do not cover exactly one entry per tape is reported as an error when reached.
    pub fn transition(&self) -> Result<Option<&Transition>, TuringMachineError> {
        let symbols = self.symbols();
        let tapes = self.program.tape_count;

        for t in self.program.transitions_from(&self.state) {
            if !t.has_arity(tapes) {
                let found = [t.read.len(), t.write.len(), t.directions.len()]
                    .into_iter()
                    .find(|&n| n != tapes)
                    .unwrap_or(tapes);
                return Err(TuringMachineError::ArityMismatch {
                    line: t.line,
                    expected: tapes,
                    found,
                });
            }

            if t.matches(&symbols, self.program.blank) {
                return Ok(Some(t));
            }
        }

        Ok(None)
    }
}

/// Checks that every character of `input` is a declared input symbol.
pub fn check_input(program: &Program, input: &str) -> Result<(), TuringMachineError> {
    match input
        .chars()
        .enumerate()
        .find(|(_, c)| !program.input_symbols.contains(c))
    {
        Some((position, symbol)) => Err(TuringMachineError::IllegalInputSymbol { symbol, position }),
        None => Ok(()),
    }
}

/// Runs `program` on `input` to completion and returns the trimmed content of tape 0.
pub fn simulate(program: &Program, input: &str) -> Result<String, TuringMachineError> {
    let mut machine = TuringMachine::new(program.clone(), input)?;

    match machine.run() {
        Step::Halt(Halt::Err(e)) => Err(e),
        _ => Ok(machine.output()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use std::collections::BTreeSet;

    fn transition(state: &str, read: &str, write: &str, moves: &str, next: &str) -> Transition {
        Transition {
            state: state.to_string(),
            read: read.chars().collect(),
            write: write.chars().collect(),
            directions: moves.chars().filter_map(Direction::from_char).collect(),
            next_state: next.to_string(),
            line: 0,
        }
    }

    fn create_program(tape_count: usize, transitions: Vec<Transition>) -> Program {
        Program {
            states: ["q0", "q1", "halt"].iter().map(|s| s.to_string()).collect(),
            input_symbols: BTreeSet::from(['0', '1', 'a']),
            tape_symbols: BTreeSet::from(['0', '1', 'a', 'x', '_']),
            initial_state: "q0".to_string(),
            blank: '_',
            final_states: BTreeSet::from(["halt".to_string()]),
            tape_count,
            transitions,
        }
    }

    #[test]
    fn test_machine_creation() {
        let program = create_program(2, vec![]);
        let machine = TuringMachine::new(program, "10").unwrap();

        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.tapes()[0].contents(), "10");
        assert_eq!(machine.tapes()[1].contents(), "__");
        assert_eq!(machine.symbols(), vec!['1', '_']);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        let program = create_program(2, vec![]);
        let machine = TuringMachine::new(program, "").unwrap();

        assert_eq!(machine.tapes()[0].contents(), "_");
        assert_eq!(machine.tapes()[1].contents(), "_");
        assert_eq!(machine.output(), "");
    }

    #[test]
    fn test_illegal_input_symbol() {
        let program = create_program(1, vec![]);
        let error = TuringMachine::new(program, "102").err().unwrap();

        assert_eq!(
            error,
            TuringMachineError::IllegalInputSymbol {
                symbol: '2',
                position: 2
            }
        );
    }

    #[test]
    fn test_single_step() {
        let program = create_program(2, vec![transition("q0", "a_", "xa", "rr", "halt")]);
        let mut machine = TuringMachine::new(program, "a").unwrap();

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.state(), "halt");
        assert_eq!(machine.tapes()[0].contents(), "x_");
        assert_eq!(machine.tapes()[1].contents(), "a_");
        assert_eq!(machine.step_count(), 1);
        assert!(machine.is_final());

        assert_eq!(machine.step(), Step::Halt(Halt::Ok));
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_wildcard_read_skips_blank() {
        let program = create_program(
            1,
            vec![
                transition("q0", "*", "x", "r", "q0"),
                transition("q0", "_", "_", "*", "q1"),
            ],
        );
        let mut machine = TuringMachine::new(program, "01").unwrap();
        machine.run();

        assert_eq!(machine.state(), "q1");
        assert_eq!(machine.output(), "xx");
    }

    #[test]
    fn test_wildcard_write_keeps_symbol() {
        let program = create_program(1, vec![transition("q0", "1", "*", "r", "q1")]);
        let mut machine = TuringMachine::new(program, "1").unwrap();
        machine.step();

        assert_eq!(machine.tapes()[0].contents(), "1_");
    }

    #[test]
    fn test_first_match_wins() {
        let program = create_program(
            1,
            vec![
                transition("q0", "0", "a", "*", "q1"),
                transition("q0", "0", "1", "*", "halt"),
            ],
        );
        let mut machine = TuringMachine::new(program, "0").unwrap();
        machine.step();

        assert_eq!(machine.state(), "q1");
        assert_eq!(machine.output(), "a");
    }

    #[test]
    fn test_halt_is_not_acceptance() {
        let program = create_program(1, vec![transition("q0", "0", "0", "*", "q1")]);
        let mut machine = TuringMachine::new(program, "0").unwrap();

        assert_eq!(machine.run(), Step::Halt(Halt::Ok));
        assert_eq!(machine.state(), "q1");
        assert!(!machine.is_final());
    }

    #[test]
    fn test_left_move_grows_tape() {
        let program = create_program(1, vec![transition("q0", "1", "1", "l", "q1")]);
        let mut machine = TuringMachine::new(program, "1").unwrap();
        machine.step();

        assert_eq!(machine.tapes()[0].contents(), "_1");
        assert_eq!(machine.tapes()[0].head_position(), -1);
        assert_eq!(machine.symbols(), vec!['_']);
    }

    #[test]
    fn test_arity_mismatch_fails_when_reached() {
        let program = create_program(
            1,
            vec![
                transition("q0", "0", "0", "r", "q1"),
                transition("q1", "00", "00", "rr", "q1"),
            ],
        );
        let mut machine = TuringMachine::new(program, "0").unwrap();

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(
            machine.step(),
            Step::Halt(Halt::Err(TuringMachineError::ArityMismatch {
                line: 0,
                expected: 1,
                found: 2
            }))
        );
    }

    #[test]
    fn test_arity_mismatch_ignored_for_other_states() {
        let program = create_program(
            1,
            vec![
                transition("q1", "00", "00", "rr", "q1"),
                transition("q0", "0", "1", "*", "halt"),
            ],
        );

        assert_eq!(simulate(&program, "0").unwrap(), "1");
    }

    #[test]
    fn test_run_with_sees_every_attempt() {
        let program = create_program(1, vec![transition("q0", "*", "*", "r", "q0")]);
        let mut machine = TuringMachine::new(program, "011").unwrap();

        let mut seen = Vec::new();
        machine.run_with(|m| seen.push((m.step_count(), m.state().to_string())));

        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last(), Some(&(3, "q0".to_string())));
    }

    #[test]
    fn test_reset() {
        let program = create_program(1, vec![transition("q0", "0", "1", "r", "q1")]);
        let mut machine = TuringMachine::new(program, "0").unwrap();
        machine.run();

        machine.reset("00").unwrap();
        assert_eq!(machine.state(), "q0");
        assert_eq!(machine.tapes()[0].contents(), "00");
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let program = create_program(
            2,
            vec![
                transition("q0", "1_", "01", "rr", "q0"),
                transition("q0", "0_", "10", "r*", "q0"),
            ],
        );

        let first = simulate(&program, "1101").unwrap();
        let second = simulate(&program, "1101").unwrap();
        assert_eq!(first, "0011");
        assert_eq!(first, second);
    }
}
