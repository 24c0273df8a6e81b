//! Circuit model, validation and layout.
//!
//! The [`Circuit`] struct holds the components, input declarations,
//! connections and output designation of one editing session.

pub mod layout;
mod model;
mod types;
mod validate;

pub use model::Circuit;
pub use types::*;
pub use validate::{validate_circuit, Diagnostic};
