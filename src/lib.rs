//! This crate provides the core logic for a multi-tape Turing Machine simulator.
//! It includes modules for parsing machine descriptions, simulating their execution,
//! rendering execution traces, analyzing descriptions for broken cross references, and
//! a small collection of built-in machines.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct and the one-shot `simulate` from the machine module.
pub use machine::{simulate, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `BuiltinProgram`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{BuiltinProgram, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Direction, Halt, Program, Step, Transition, TuringMachineError, BLANK_SYMBOL, WILDCARD_SYMBOL,
};
