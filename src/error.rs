//! Error types for the circuit composer.
//!
//! This module provides a unified error type [`ComposerError`] that covers
//! all error conditions that can occur while editing a circuit, resolving
//! gate types, reading or writing circuit files, and simulating.

use std::path::Path;

use thiserror::Error;

/// Result type alias using [`ComposerError`].
pub type Result<T> = std::result::Result<T, ComposerError>;

/// Unified error type for all composer operations.
#[derive(Error, Debug)]
pub enum ComposerError {
    // ============ Editing Errors ============
    /// A numeric form field did not hold an integer
    #[error("Invalid {field}: '{value}' is not an integer")]
    InvalidNumber { field: &'static str, value: String },

    /// A boolean field held something other than 0/1
    #[error("Invalid {field}: '{value}' is not 0 or 1")]
    InvalidBool { field: &'static str, value: String },

    /// Component or circuit identifier is empty or unrepresentable in the file format
    #[error("Invalid identifier '{id}': {message}")]
    InvalidIdentifier { id: String, message: String },

    /// Gate type is neither built in nor backed by a saved circuit file
    #[error("Unknown gate or missing file: {gate_type}")]
    UnknownGate { gate_type: String },

    /// A command in an edit script failed
    #[error("Edit script line {line}: {source}")]
    ScriptError {
        line: usize,
        #[source]
        source: Box<ComposerError>,
    },

    // ============ Circuit File Errors ============
    /// Error while parsing a circuit file
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a circuit file
    #[error("Failed to write circuit file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ Simulation Errors ============
    /// Circuit has no output designation
    #[error("No output set (use 'Out put=<id> kndex=<idx>')")]
    MissingOutput,

    /// Evaluation revisited a component that is still being evaluated
    #[error("Combinational loop detected at '{id}'")]
    CombinationalLoop { id: String },

    /// Sub-circuits nest deeper than the configured limit
    #[error("Sub-circuit '{gate_type}' nested deeper than {max_depth} levels")]
    SubcircuitTooDeep { gate_type: String, max_depth: usize },
}

impl ComposerError {
    /// Create an invalid number error
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &Path, source: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a file write error
    pub fn file_write(path: &Path, source: std::io::Error) -> Self {
        Self::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Whether the error comes from user-entered form data rather than I/O.
    ///
    /// Editing surfaces show these as a modal and keep the session going.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. }
                | Self::InvalidBool { .. }
                | Self::InvalidIdentifier { .. }
                | Self::UnknownGate { .. }
        )
    }
}
