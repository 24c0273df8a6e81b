//! # Circuit Composer
//!
//! Compose digital logic circuits from primitive gates and from circuits
//! saved earlier.
//!
//! This library provides:
//! - An in-memory circuit model (components, input declarations, connections, output)
//! - A line-oriented text format for exporting and reloading circuits
//! - Gate arity resolution, where a saved circuit becomes a new gate type
//! - A gate-level simulator that evaluates nested sub-circuits
//! - Geometry for drawing circuits and for a pannable placement grid
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit model, validation and port/wire layout
//! - [`gates`] - Built-in gates and the arity resolver for saved circuits
//! - [`format`] - Reader and writer for circuit files
//! - [`editor`] - Editing session operating on raw form fields, plus edit scripts
//! - [`sim`] - Logic simulation
//! - [`canvas`] - Freeform placement grid
//!
//! ## Sub-circuits
//!
//! Exporting a circuit named `HALFADD` writes `components/HALFADD.txt`.
//! From then on `HALFADD` can be used as a gate type. Its number of input
//! ports is one more than the largest `index=` among the file's `input`
//! lines, or 2 if there are none.
//!
//! ## Usage
//!
//! ```bash
//! composer build halfadd.edit
//! composer arity HALFADD
//! composer simulate HALFADD
//! ```

pub mod canvas;
pub mod circuit;
pub mod config;
pub mod editor;
pub mod error;
pub mod format;
pub mod gates;
pub mod sim;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{ComposerError, Result};
pub use gates::ArityResolver;
pub use sim::Simulator;

/// Default directory for exported circuits
pub const DEFAULT_COMPONENTS_DIR: &str = "components";

/// Arity of a saved circuit that declares no inputs
pub const DEFAULT_ARITY: usize = 2;

/// Largest number of input ports a gate may have.
///
/// Saved circuits declaring higher input indices are capped here.
pub const MAX_ARITY: usize = 256;

/// Name a new editing session starts with
pub const DEFAULT_CIRCUIT_NAME: &str = "XOR";
