//! Circuit validation.

use std::collections::HashSet;
use std::fmt;

use super::Circuit;

/// A problem found in a circuit.
///
/// None of these prevent export or simulation; editors surface them as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two or more components share an id
    DuplicateComponent { id: String },
    /// A connection endpoint names no component
    DanglingConnection { connection: usize, id: String },
    /// A connection targets a port the component does not have
    PortOutOfRange { id: String, index: i64, arity: usize },
    /// The output designation names no component
    UnknownOutput { id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateComponent { id } => write!(f, "duplicate component id '{}'", id),
            Self::DanglingConnection { connection, id } => {
                write!(f, "connection #{} references unknown component '{}'", connection, id)
            }
            Self::PortOutOfRange { id, index, arity } => write!(
                f,
                "input port {} of '{}' is out of range (component has {} inputs)",
                index, id, arity
            ),
            Self::UnknownOutput { id } => write!(f, "output references unknown component '{}'", id),
        }
    }
}

/// Check a circuit against the model's documented invariants.
///
/// Checks:
/// - Component ids are unique
/// - Connection endpoints reference existing components
/// - Connection target ports are within the target's arity
/// - The output references an existing component
pub fn validate_circuit(circuit: &Circuit) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for comp in circuit.components() {
        if !seen.insert(comp.id.as_str()) && reported.insert(comp.id.as_str()) {
            diagnostics.push(Diagnostic::DuplicateComponent { id: comp.id.clone() });
        }
    }

    for (idx, conn) in circuit.connections().iter().enumerate() {
        for id in [&conn.from, &conn.to] {
            if !circuit.contains(id) {
                diagnostics.push(Diagnostic::DanglingConnection {
                    connection: idx,
                    id: id.clone(),
                });
            }
        }
        if let Some(target) = circuit.component(&conn.to) {
            let in_range = usize::try_from(conn.to_index).map_or(false, |i| i < target.arity);
            if !in_range {
                diagnostics.push(Diagnostic::PortOutOfRange {
                    id: target.id.clone(),
                    index: conn.to_index,
                    arity: target.arity,
                });
            }
        }
    }

    if let Some(output) = circuit.output() {
        if !circuit.contains(&output.id) {
            diagnostics.push(Diagnostic::UnknownOutput { id: output.id.clone() });
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Component, Connection, OutputRef, Position};
    use crate::gates::GateKind;

    fn gate(id: &str, ty: &str, arity: usize) -> Component {
        Component::new(id, GateKind::parse(ty), Position::default(), arity)
    }

    #[test]
    fn test_clean_circuit() {
        let mut circuit = Circuit::new();
        circuit.add_component(gate("a", "AND", 2));
        circuit.add_component(gate("n", "NOT", 1));
        circuit.add_connection(Connection {
            from: "a".into(),
            from_index: 0,
            to: "n".into(),
            to_index: 0,
        });
        circuit.set_output(OutputRef { id: "n".into(), index: 0 });
        assert!(validate_circuit(&circuit).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let mut circuit = Circuit::new();
        circuit.add_component(gate("a", "AND", 2));
        circuit.add_component(gate("a", "OR", 2));
        circuit.add_component(gate("a", "XOR", 2));
        circuit.add_connection(Connection {
            from: "ghost".into(),
            from_index: 0,
            to: "a".into(),
            to_index: 2,
        });
        circuit.set_output(OutputRef { id: "z".into(), index: 0 });

        let diagnostics = validate_circuit(&circuit);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::DuplicateComponent { id: "a".into() },
                Diagnostic::DanglingConnection { connection: 0, id: "ghost".into() },
                Diagnostic::PortOutOfRange { id: "a".into(), index: 2, arity: 2 },
                Diagnostic::UnknownOutput { id: "z".into() },
            ]
        );
    }
}
