use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while analysing a single Python file.
#[derive(Error, Debug)]
pub enum PythonFileError {
    /// The file could not be read as UTF-8 text.
    #[error("Could not read {}: {source}", path.display())]
    Read {
        /// Path of the unreadable file.
        path:   PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Syntax error in the Python file.
    #[error("Syntax error in {file_name}, line {line}, column {column}: {message}\n    {source_line}")]
    SyntaxError {
        /// Name of the file with the error.
        file_name:   String,
        /// 1-based line of the error.
        line:        usize,
        /// 1-based column of the error.
        column:      usize,
        /// What the parser choked on.
        message:     String,
        /// The offending source line.
        source_line: String,
    },

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
