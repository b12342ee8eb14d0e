//! Sample machines shipped with the crate, parsed once on first use.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError};
use tracing::warn;

// Embedded descriptions, by name
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    ("increment", include_str!("../programs/increment.tm")),
    ("unary-add", include_str!("../programs/unary-add.tm")),
    ("palindrome", include_str!("../programs/palindrome.tm")),
    ("copy", include_str!("../programs/copy.tm")),
];

/// A parsed built-in machine together with its source text.
#[derive(Debug, Clone)]
pub struct BuiltinProgram {
    pub name: &'static str,
    pub source: &'static str,
    pub program: Program,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<BuiltinProgram> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, source)| match parse(source) {
            Ok(program) => Some(BuiltinProgram { name, source, program }),
            Err(e) => {
                warn!(name, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|builtin| builtin.name).collect()
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        Self::find(name).map(|builtin| builtin.program.clone())
    }

    /// Get the description text of a program by its name
    pub fn get_program_text(name: &str) -> Result<&'static str, TuringMachineError> {
        Self::find(name).map(|builtin| builtin.source)
    }

    /// Get a summary of a program by its name
    pub fn get_program_info(name: &str) -> Result<ProgramInfo, TuringMachineError> {
        let builtin = Self::find(name)?;
        let program = &builtin.program;

        Ok(ProgramInfo {
            name: builtin.name,
            initial_state: program.initial_state.clone(),
            tape_count: program.tape_count,
            state_count: program.states.len(),
            transition_count: program.transitions.len(),
        })
    }

    fn find(name: &str) -> Result<&'static BuiltinProgram, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|builtin| builtin.name == name)
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub initial_state: String,
    pub tape_count: usize,
    pub state_count: usize,
    pub transition_count: usize,
}
