//! In-memory circuit model.

use std::collections::HashMap;

use super::types::{Component, Connection, InputDecl, OutputRef, PortState, Position};
use crate::error::Result;
use crate::format::{CircuitDocument, Record};
use crate::gates::{ArityResolver, GateKind};

/// A circuit under construction.
///
/// Mutations never fail: uniqueness of ids and existence of connection
/// endpoints are reported by [`validate_circuit`](super::validate_circuit)
/// rather than enforced here.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    /// Components in insertion order
    components: Vec<Component>,

    /// Mapping from component id to its position in `components` (last added wins)
    component_map: HashMap<String, usize>,

    /// Input declarations in insertion order
    inputs: Vec<InputDecl>,

    /// Value per (name, port index); later declarations overwrite earlier ones
    input_map: HashMap<(String, i64), bool>,

    /// Connections in insertion order
    connections: Vec<Connection>,

    /// External output, if designated
    output: Option<OutputRef>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from a parsed circuit file.
    ///
    /// Files do not store positions, so every component is placed at the
    /// origin. Arity of each component is resolved through `resolver`.
    pub fn from_document(doc: CircuitDocument, resolver: &ArityResolver) -> Result<Self> {
        let mut circuit = Circuit::new();

        for record in doc.records {
            match record {
                Record::Component { id, gate_type, .. } => {
                    let kind = GateKind::parse(&gate_type);
                    let arity = resolver.resolve_kind(&kind)?;
                    circuit.add_component(Component::new(id, kind, Position::default(), arity));
                }
                Record::Input { name, index, value, .. } => {
                    circuit.add_input(InputDecl { name, index, value });
                }
                Record::Connect {
                    from,
                    from_index,
                    to,
                    to_index,
                    ..
                } => {
                    circuit.add_connection(Connection {
                        from,
                        from_index,
                        to,
                        to_index,
                    });
                }
                Record::Output { id, index, .. } => {
                    circuit.set_output(OutputRef { id, index });
                }
            }
        }

        Ok(circuit)
    }

    /// Append a component and index it by id.
    pub fn add_component(&mut self, component: Component) -> &Component {
        let idx = self.components.len();
        self.component_map.insert(component.id.clone(), idx);
        self.components.push(component);
        &self.components[idx]
    }

    /// Append an input declaration.
    pub fn add_input(&mut self, input: InputDecl) {
        self.input_map
            .insert((input.name.clone(), input.index), input.value);
        self.inputs.push(input);
    }

    /// Append a connection. Endpoints are not checked.
    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Designate the output, replacing any previous designation.
    pub fn set_output(&mut self, output: OutputRef) -> Option<OutputRef> {
        self.output.replace(output)
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// All input declarations in insertion order.
    pub fn inputs(&self) -> &[InputDecl] {
        &self.inputs
    }

    /// All connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The output designation, if any.
    pub fn output(&self) -> Option<&OutputRef> {
        self.output.as_ref()
    }

    /// Find a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.component_map.get(id).map(|&idx| &self.components[idx])
    }

    /// Check if a component with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.component_map.contains_key(id)
    }

    /// Value declared for a port, if any.
    pub fn input_value(&self, name: &str, index: i64) -> Option<bool> {
        self.input_map.get(&(name.to_string(), index)).copied()
    }

    /// Display state of a port.
    pub fn port_state(&self, id: &str, index: i64) -> PortState {
        self.input_value(id, index).into()
    }

    /// Check if the circuit holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
            && self.inputs.is_empty()
            && self.connections.is_empty()
            && self.output.is_none()
    }
}
