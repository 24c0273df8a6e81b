//! Port and wire geometry for drawing a circuit.
//!
//! Nothing here draws; these are the coordinates a canvas needs. Integer
//! coordinates saturate at the edges of `i64` instead of overflowing.

use super::types::{Component, PortState};
use super::Circuit;

/// Horizontal distance from a box edge to the centre of an input port marker.
const INPUT_PORT_INSET: f64 = 10.0;

/// Horizontal distance from a box edge to a wire endpoint or output port centre.
const WIRE_INSET: i64 = 5;

/// An input port marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortMarker {
    pub index: usize,
    pub center: (f64, f64),
    pub state: PortState,
}

/// A wire between two existing components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Position of the connection in the circuit's connection list
    pub connection: usize,
    pub start: (i64, i64),
    pub end: (i64, i64),
}

/// Centres of a component's input ports, spread evenly down its left side.
pub fn input_port_centers(component: &Component) -> Vec<(f64, f64)> {
    let size = component.size();
    let x = component.position.x as f64;
    let y = component.position.y as f64;
    let spacing = size.height as f64 / (component.arity + 1) as f64;
    (0..component.arity)
        .map(|i| (x - INPUT_PORT_INSET, y + spacing * (i + 1) as f64))
        .collect()
}

/// Centre of a component's output port, on its right side.
pub fn output_port_center(component: &Component) -> (i64, i64) {
    let size = component.size();
    (
        component.position.x.saturating_add(size.width + WIRE_INSET),
        component.position.y.saturating_add(size.height / 2),
    )
}

/// Where a wire ends on a component's left side.
fn wire_end(component: &Component) -> (i64, i64) {
    (
        component.position.x.saturating_sub(WIRE_INSET),
        component.position.y.saturating_add(component.size().height / 2),
    )
}

/// Input port markers of a component, coloured by declared input values.
pub fn port_markers(circuit: &Circuit, component: &Component) -> Vec<PortMarker> {
    input_port_centers(component)
        .into_iter()
        .enumerate()
        .map(|(index, center)| PortMarker {
            index,
            center,
            state: circuit.port_state(&component.id, index as i64),
        })
        .collect()
}

/// Wires to draw. Connections whose endpoints are not both present are skipped.
pub fn drawable_edges(circuit: &Circuit) -> Vec<Edge> {
    circuit
        .connections()
        .iter()
        .enumerate()
        .filter_map(|(idx, conn)| {
            let from = circuit.component(&conn.from)?;
            let to = circuit.component(&conn.to)?;
            Some(Edge {
                connection: idx,
                start: output_port_center(from),
                end: wire_end(to),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Connection, InputDecl, Position};
    use crate::gates::GateKind;
    use crate::MAX_ARITY;
    use approx::assert_relative_eq;

    fn place(circuit: &mut Circuit, id: &str, ty: &str, arity: usize, x: i64, y: i64) {
        circuit.add_component(Component::new(id, GateKind::parse(ty), Position::new(x, y), arity));
    }

    #[test]
    fn test_input_ports_spread_over_height() {
        let comp = Component::new("a", GateKind::parse("AND"), Position::new(100, 50), 2);
        let centers = input_port_centers(&comp);
        assert_eq!(centers.len(), 2);
        // height 40, three gaps
        assert_relative_eq!(centers[0].0, 90.0);
        assert_relative_eq!(centers[0].1, 50.0 + 40.0 / 3.0);
        assert_relative_eq!(centers[1].1, 50.0 + 80.0 / 3.0);
        assert_eq!(output_port_center(&comp), (165, 70));
    }

    #[test]
    fn test_markers_reflect_input_values() {
        let mut circuit = Circuit::new();
        place(&mut circuit, "a", "AND", 2, 0, 0);
        circuit.add_input(InputDecl { name: "a".into(), index: 1, value: true });
        let comp = circuit.component("a").unwrap().clone();
        let states: Vec<PortState> = port_markers(&circuit, &comp).iter().map(|m| m.state).collect();
        assert_eq!(states, vec![PortState::Unset, PortState::High]);
    }

    #[test]
    fn test_dangling_connections_are_not_drawn() {
        let mut circuit = Circuit::new();
        place(&mut circuit, "a", "AND", 2, 0, 0);
        place(&mut circuit, "n", "NOT", 1, 200, 100);
        circuit.add_connection(Connection { from: "a".into(), from_index: 0, to: "ghost".into(), to_index: 0 });
        circuit.add_connection(Connection { from: "a".into(), from_index: 0, to: "n".into(), to_index: 0 });

        let edges = drawable_edges(&circuit);
        assert_eq!(circuit.connections().len(), 2);
        assert_eq!(
            edges,
            vec![Edge { connection: 1, start: (65, 20), end: (195, 115) }]
        );
    }

    #[test]
    fn test_extreme_positions_saturate() {
        let mut circuit = Circuit::new();
        place(&mut circuit, "a", "AND", 2, i64::MAX, i64::MAX);
        place(&mut circuit, "b", "NOT", 1, i64::MIN, i64::MIN);
        circuit.add_connection(Connection { from: "a".into(), from_index: 0, to: "b".into(), to_index: 0 });
        circuit.add_connection(Connection { from: "b".into(), from_index: 0, to: "a".into(), to_index: 0 });

        let edges = drawable_edges(&circuit);
        assert_eq!(edges[0].start, (i64::MAX, i64::MAX));
        assert_eq!(edges[0].end, (i64::MIN, i64::MIN + 15));
        assert_eq!(edges[1].start, (i64::MIN + 65, i64::MIN + 15));
        assert_eq!(edges[1].end, (i64::MAX - 5, i64::MAX));
    }

    #[test]
    fn test_port_count_follows_capped_arity() {
        let comp = Component::new("w", GateKind::parse("WIDE"), Position::default(), usize::MAX);
        let centers = input_port_centers(&comp);
        assert_eq!(centers.len(), MAX_ARITY);
        assert!(centers.iter().all(|&(_, y)| y > 0.0 && y < comp.size().height as f64));
    }
}
