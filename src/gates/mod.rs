//! Gate types.
//!
//! A gate type is either one of the built-in primitives or the name of a
//! circuit previously exported to the components directory:
//! - Built-in: AND, OR, XOR (two inputs), NOT (one input)
//! - Composite: any other name, backed by `<components dir>/<name>.txt`
//!
//! The arity of a composite gate is read from its file by [`ArityResolver`].

mod resolver;

pub use resolver::{read_input_schema, ArityResolver, InputSchema, INPUT_MARKER};

use std::fmt;

/// One of the primitive logic gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinGate {
    And,
    Or,
    Xor,
    Not,
}

impl BuiltinGate {
    /// All built-in gates, in the order an editor offers them.
    pub const ALL: [BuiltinGate; 4] = [Self::And, Self::Or, Self::Xor, Self::Not];

    /// Look up a built-in gate by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "XOR" => Some(Self::Xor),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Name as written in circuit files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
        }
    }

    /// Fixed number of input ports.
    pub fn arity(&self) -> usize {
        match self {
            Self::And | Self::Or | Self::Xor => 2,
            Self::Not => 1,
        }
    }

    /// Compute the gate output from its input port values.
    ///
    /// NOT with no inputs yields `true`, matching an unconnected port reading low.
    pub fn evaluate(&self, inputs: &[bool]) -> bool {
        match self {
            Self::And => inputs.iter().all(|&v| v),
            Self::Or => inputs.iter().any(|&v| v),
            Self::Xor => inputs.iter().filter(|&&v| v).count() % 2 == 1,
            Self::Not => !inputs.first().copied().unwrap_or(false),
        }
    }
}

impl fmt::Display for BuiltinGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gate type as referenced by a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Primitive gate
    Builtin(BuiltinGate),
    /// Reference to a saved circuit by name
    Composite(String),
}

impl GateKind {
    /// Classify a gate type name.
    pub fn parse(name: &str) -> Self {
        match BuiltinGate::from_name(name) {
            Some(gate) => Self::Builtin(gate),
            None => Self::Composite(name.to_string()),
        }
    }

    /// Name as written in circuit files.
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(gate) => gate.name(),
            Self::Composite(name) => name,
        }
    }

    /// Check if this refers to a saved circuit.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
