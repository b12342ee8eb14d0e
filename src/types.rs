//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including the parsed machine definition, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// The blank symbol. The description language hard-codes it, `#B = _` is the only accepted form.
pub const BLANK_SYMBOL: char = '_';
/// Reads as "any non-blank symbol", writes as "leave the cell unchanged".
pub const WILDCARD_SYMBOL: char = '*';

/// A fully parsed Turing Machine description.
///
/// Immutable once returned by the parser. Cross references (start state, transition
/// endpoints, field arities) are deliberately not validated here; see
/// [`analyze`](crate::analyze) for the opt-in checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// `#Q`: the set of state names.
    pub states: BTreeSet<String>,
    /// `#S`: symbols allowed in the run input.
    pub input_symbols: BTreeSet<char>,
    /// `#G`: symbols that may appear on a tape.
    pub tape_symbols: BTreeSet<char>,
    /// `#q0`: the state the machine starts in.
    pub initial_state: String,
    /// `#B`: the blank symbol.
    pub blank: char,
    /// `#F`: the accepting states. Purely informational, halting never consults them.
    pub final_states: BTreeSet<String>,
    /// `#N`: the number of tapes.
    pub tape_count: usize,
    /// Transition rules in declaration order. Lookup is first match.
    pub transitions: Vec<Transition>,
}

impl Program {
    /// Returns true if `state` was declared in `#F`.
    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    /// Iterates over the transitions leaving `state`, in declaration order.
    pub fn transitions_from<'a>(&'a self, state: &'a str) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.state == state)
    }
}

/// Represents a single transition rule for a Turing Machine.
///
/// `read`, `write` and `directions` hold one entry per tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies in.
    pub state: String,
    /// A vector of characters to be read from each tape.
    pub read: Vec<char>,
    /// A vector of characters to be written to each tape.
    pub write: Vec<char>,
    /// A vector of directions for each tape's head to move after the transition.
    pub directions: Vec<Direction>,
    /// The next state the machine transitions to.
    pub next_state: String,
    /// 1-based line of the description this rule came from.
    pub line: usize,
}

impl Transition {
    /// Returns true when every field has exactly `tapes` entries.
    pub fn has_arity(&self, tapes: usize) -> bool {
        self.read.len() == tapes && self.write.len() == tapes && self.directions.len() == tapes
    }

    /// Checks the read symbols against the symbols currently under the heads.
    ///
    /// A wildcard matches anything except the blank symbol.
    pub fn matches(&self, symbols: &[char], blank: char) -> bool {
        self.read.len() == symbols.len()
            && self
                .read
                .iter()
                .zip(symbols)
                .all(|(&read, &now)| read == now || (read == WILDCARD_SYMBOL && now != blank))
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Maps a move character of a transition line (`l`, `r`, `*`) to a direction.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            '*' => Some(Direction::Stay),
            _ => None,
        }
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine successfully performed a step and continues execution.
    Continue,
    /// No transition applies to the current configuration.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Halted normally. Says nothing about acceptance.
    Ok,

    Err(TuringMachineError),
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A `#` line that matches none of the seven declaration forms.
    #[error("line {line}: unrecognized declaration: {text}")]
    UnrecognizedDeclaration { line: usize, text: String },
    /// A declaration kind that was already seen earlier in the description.
    #[error("line {line}: duplicate {kind} definition: {text}")]
    DuplicateDefinition {
        line: usize,
        kind: &'static str,
        text: String,
    },
    /// A line that is neither a declaration nor a transition.
    #[error("line {line}: malformed line: {text}")]
    MalformedLine { line: usize, text: String },
    /// The description ended without every declaration kind, or without transitions.
    #[error("incomplete definition, missing: {}", .missing.join(", "))]
    IncompleteDefinition { missing: Vec<&'static str> },
    /// A character of the run input is not a declared input symbol.
    #[error("'{symbol}' at position {position} was not declared in the set of input symbols")]
    IllegalInputSymbol { symbol: char, position: usize },
    /// A transition that was about to be used has fields of the wrong length.
    #[error("line {line}: transition expects {found} tapes, machine has {expected}")]
    ArityMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Indicates an error during the validation of a description's cross references.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading description files.
    #[error("File error: {0}")]
    FileError(String),
}

impl TuringMachineError {
    /// The terse, one-line form of the error shown when diagnostics are not requested.
    pub fn brief(&self) -> &'static str {
        match self {
            TuringMachineError::UnrecognizedDeclaration { .. }
            | TuringMachineError::DuplicateDefinition { .. }
            | TuringMachineError::MalformedLine { .. }
            | TuringMachineError::IncompleteDefinition { .. } => "syntax error",
            TuringMachineError::IllegalInputSymbol { .. } => "illegal input",
            TuringMachineError::ArityMismatch { .. } => "tape count mismatch",
            TuringMachineError::ValidationError(_) => "invalid definition",
            TuringMachineError::FileError(_) => "cannot open file",
        }
    }

    /// Returns true for errors produced while parsing the description text.
    pub fn is_syntax_error(&self) -> bool {
        self.brief() == "syntax error"
    }
}
