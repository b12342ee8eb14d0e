//! This module provides the parser for Turing Machine descriptions, utilizing the `pest` crate.
//! Descriptions are line oriented: every line is either a declaration (`#Q`, `#S`, `#G`, `#q0`,
//! `#B`, `#F`, `#N`), a transition, a comment or blank. The grammar in `grammar.pest` describes a
//! single line; this module classifies lines, checks that each declaration kind appears exactly
//! once and assembles the resulting `Program`.

use crate::types::{Direction, Program, Transition, TuringMachineError, BLANK_SYMBOL};
use pest::{
    iterators::{Pair, Pairs},
    Parser as PestParser,
};
use pest_derive::Parser as PestParser;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Derives a `PestParser` for the line grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// The seven declaration kinds of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    States,
    InputAlphabet,
    TapeAlphabet,
    StartState,
    Blank,
    FinalStates,
    TapeCount,
}

impl Declaration {
    /// All kinds, in the order they are reported when missing.
    pub const ALL: [Declaration; 7] = [
        Declaration::States,
        Declaration::InputAlphabet,
        Declaration::TapeAlphabet,
        Declaration::StartState,
        Declaration::Blank,
        Declaration::FinalStates,
        Declaration::TapeCount,
    ];

    /// The marker the declaration starts with.
    pub fn marker(self) -> &'static str {
        match self {
            Declaration::States => "#Q",
            Declaration::InputAlphabet => "#S",
            Declaration::TapeAlphabet => "#G",
            Declaration::StartState => "#q0",
            Declaration::Blank => "#B",
            Declaration::FinalStates => "#F",
            Declaration::TapeCount => "#N",
        }
    }

    fn from_rule(rule: Rule) -> Option<Self> {
        match rule {
            Rule::states => Some(Declaration::States),
            Rule::input_alphabet => Some(Declaration::InputAlphabet),
            Rule::tape_alphabet => Some(Declaration::TapeAlphabet),
            Rule::start_state => Some(Declaration::StartState),
            Rule::blank_symbol => Some(Declaration::Blank),
            Rule::final_states => Some(Declaration::FinalStates),
            Rule::tape_count => Some(Declaration::TapeCount),
            _ => None,
        }
    }
}

/// Parses the given description into a `Program`.
///
/// This is the main entry point for parsing Turing Machine descriptions. Parsing stops at the
/// first error; nothing after the offending line is inspected.
///
/// # Arguments
///
/// * `input` - A string slice containing the Turing Machine description.
///
/// # Returns
///
/// * `Ok(Program)` if every line is well formed and all declarations are present.
/// * `Err(TuringMachineError::UnrecognizedDeclaration)` for a `#` line matching no declaration.
/// * `Err(TuringMachineError::DuplicateDefinition)` for a declaration kind seen twice.
/// * `Err(TuringMachineError::MalformedLine)` for a line that is not a transition either.
/// * `Err(TuringMachineError::IncompleteDefinition)` if a kind or the transitions are missing.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let mut sections = Sections::default();

    for (index, raw) in input.lines().enumerate() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        let number = index + 1;
        if line.starts_with('#') {
            parse_declaration(line, number, &mut sections)?;
        } else {
            let transition = parse_transition(line, number)?;
            debug!(
                line = number,
                from = %transition.state,
                to = %transition.next_state,
                "transition"
            );
            sections.transitions.push(transition);
        }
    }

    sections.finish()
}

/// Removes a comment from a raw line and trims trailing whitespace.
///
/// A line starting with `;` is a comment as a whole; elsewhere `;` only starts a comment when it
/// follows whitespace.
pub fn strip_comment(line: &str) -> &str {
    if line.starts_with(';') {
        return "";
    }

    let end = line
        .char_indices()
        .find(|&(i, c)| c == ';' && line[..i].ends_with(char::is_whitespace))
        .map_or(line.len(), |(i, _)| i);

    line[..end].trim_end()
}

/// Declarations and transitions collected so far, scoped to a single `parse` call.
#[derive(Default)]
struct Sections {
    seen: HashSet<Declaration>,
    states: Option<BTreeSet<String>>,
    input_symbols: Option<BTreeSet<char>>,
    tape_symbols: Option<BTreeSet<char>>,
    initial_state: Option<String>,
    blank: Option<char>,
    final_states: Option<BTreeSet<String>>,
    tape_count: Option<usize>,
    transitions: Vec<Transition>,
}

impl Sections {
    /// Verifies completeness and builds the program.
    fn finish(self) -> Result<Program, TuringMachineError> {
        let mut missing: Vec<&'static str> = Declaration::ALL
            .iter()
            .filter(|kind| !self.seen.contains(*kind))
            .map(|kind| kind.marker())
            .collect();
        if self.transitions.is_empty() {
            missing.push("transitions");
        }

        match self {
            Sections {
                states: Some(states),
                input_symbols: Some(input_symbols),
                tape_symbols: Some(tape_symbols),
                initial_state: Some(initial_state),
                blank: Some(blank),
                final_states: Some(final_states),
                tape_count: Some(tape_count),
                transitions,
                ..
            } if missing.is_empty() => Ok(Program {
                states,
                input_symbols,
                tape_symbols,
                initial_state,
                blank,
                final_states,
                tape_count,
                transitions,
            }),
            _ => Err(TuringMachineError::IncompleteDefinition { missing }),
        }
    }
}

/// Parses a `#` line and records it in `sections`.
fn parse_declaration(
    line: &str,
    number: usize,
    sections: &mut Sections,
) -> Result<(), TuringMachineError> {
    let unrecognized = || TuringMachineError::UnrecognizedDeclaration {
        line: number,
        text: line.to_string(),
    };

    let pair = TuringMachineParser::parse(Rule::declaration, line)
        .map_err(|_| unrecognized())?
        .next()
        .and_then(|declaration| declaration.into_inner().next())
        .ok_or_else(unrecognized)?;
    let kind = Declaration::from_rule(pair.as_rule()).ok_or_else(unrecognized)?;

    check_unique_declaration(kind, line, number, &mut sections.seen)?;

    match kind {
        Declaration::States => sections.states = Some(parse_identifiers(pair.into_inner())),
        Declaration::InputAlphabet => {
            sections.input_symbols = Some(parse_symbols(pair.into_inner()))
        }
        Declaration::TapeAlphabet => sections.tape_symbols = Some(parse_symbols(pair.into_inner())),
        Declaration::StartState => {
            sections.initial_state = parse_identifiers(pair.into_inner()).into_iter().next()
        }
        Declaration::Blank => sections.blank = Some(BLANK_SYMBOL),
        Declaration::FinalStates => {
            sections.final_states = Some(parse_identifiers(pair.into_inner()))
        }
        Declaration::TapeCount => {
            let count = parse_count(pair).ok_or_else(unrecognized)?;
            sections.tape_count = Some(count);
        }
    }

    debug!(line = number, kind = kind.marker(), "declaration");

    Ok(())
}

/// Parses a transition line: `state read write moves next`.
fn parse_transition(line: &str, number: usize) -> Result<Transition, TuringMachineError> {
    let malformed = || TuringMachineError::MalformedLine {
        line: number,
        text: line.to_string(),
    };

    let mut pairs = TuringMachineParser::parse(Rule::transition, line)
        .map_err(|_| malformed())?
        .next()
        .ok_or_else(malformed)?
        .into_inner();

    let mut next = || pairs.next().map(|p| p.as_str()).ok_or_else(malformed);
    let state = next()?.to_string();
    let read = next()?.chars().collect();
    let write = next()?.chars().collect();
    let directions = next()?
        .chars()
        .map(Direction::from_char)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(malformed)?;
    let next_state = next()?.to_string();

    Ok(Transition {
        state,
        read,
        write,
        directions,
        next_state,
        line: number,
    })
}

/// Collects the `identifier` pairs of a state list.
fn parse_identifiers(pairs: Pairs<Rule>) -> BTreeSet<String> {
    pairs
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string())
        .collect()
}

/// Collects the single-character symbol pairs of an alphabet.
fn parse_symbols(pairs: Pairs<Rule>) -> BTreeSet<char> {
    pairs
        .filter(|p| matches!(p.as_rule(), Rule::input_symbol | Rule::tape_symbol))
        .filter_map(|p| p.as_str().chars().next())
        .collect()
}

/// Parses the positive tape count of a `#N` declaration.
fn parse_count(pair: Pair<Rule>) -> Option<usize> {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::count)
        .and_then(|p| p.as_str().parse::<usize>().ok())
        .filter(|&count| count > 0)
}

/// Checks that a declaration kind has not been seen before in this description.
fn check_unique_declaration(
    kind: Declaration,
    line: &str,
    number: usize,
    seen: &mut HashSet<Declaration>,
) -> Result<(), TuringMachineError> {
    if !seen.insert(kind) {
        return Err(TuringMachineError::DuplicateDefinition {
            line: number,
            kind: kind.marker(),
            text: line.to_string(),
        });
    }

    Ok(())
}
