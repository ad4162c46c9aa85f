//! Python source analysis: parsing, docstring detection and per-file
//! coverage.

/// Docstring detection on parse trees
pub mod docstring;
/// Errors raised while analysing a file
pub mod error;
/// Per-file declaration extraction
pub mod file;
/// Indentation checks the grammar does not enforce
mod indentation;
/// Tree-sitter parser wrapper
pub mod parser;

pub use error::PythonFileError;
pub use file::FileReport;
pub use parser::Parser;
