//! This module provides the `ProgramLoader` struct, responsible for loading Turing Machine
//! descriptions from files and strings.

use crate::parser::parse;
use crate::types::{Program, TuringMachineError};
use std::fs;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading Turing Machine descriptions.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single Turing Machine description from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the description file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed into a `Program`.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * Any syntax error reported by [`parse`].
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single Turing Machine description from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        parse(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const PROGRAM: &str =
        "#Q = {s,t}\n#S = {a}\n#G = {a,b,_}\n#q0 = s\n#B = _\n#F = {t}\n#N = 1\ns a b r t\n";

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(PROGRAM.as_bytes()).unwrap();

        let program = ProgramLoader::load_program(&file_path).unwrap();
        assert_eq!(program.initial_state, "s");
        assert_eq!(program.transitions.len(), 1);
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a valid program").unwrap();

        let error = ProgramLoader::load_program(&file_path).unwrap_err();
        assert!(matches!(error, TuringMachineError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let error = ProgramLoader::load_program(&dir.path().join("missing.tm")).unwrap_err();

        assert!(matches!(error, TuringMachineError::FileError(_)));
        assert_eq!(error.brief(), "cannot open file");
    }

    #[test]
    fn test_load_from_string() {
        let program = ProgramLoader::load_program_from_string(PROGRAM).unwrap();
        assert!(program.is_final("t"));
    }
}
