//! Core types for circuit representation.

use std::fmt;

use crate::gates::GateKind;
use crate::MAX_ARITY;

/// Fixed width of a component box.
pub const COMPONENT_WIDTH: i64 = 60;

/// Minimum height of a component box.
pub const MIN_COMPONENT_HEIGHT: i64 = 30;

/// Vertical space given to each input port.
pub const PORT_PITCH: i64 = 20;

/// Integer position of a component's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of a component box, derived from its input count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    /// Width is fixed; height grows with the number of input ports.
    pub fn for_arity(arity: usize) -> Self {
        let arity = i64::try_from(arity).unwrap_or(i64::MAX / PORT_PITCH);
        Self {
            width: COMPONENT_WIDTH,
            height: MIN_COMPONENT_HEIGHT.max(PORT_PITCH.saturating_mul(arity)),
        }
    }
}

/// A gate instance placed in the circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Identifier, unique within the circuit
    pub id: String,
    /// Gate type
    pub kind: GateKind,
    /// Top-left corner
    pub position: Position,
    /// Number of input ports, between 1 and [`MAX_ARITY`]
    pub arity: usize,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: GateKind, position: Position, arity: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            arity: arity.clamp(1, MAX_ARITY),
        }
    }

    /// Box size for this component.
    pub fn size(&self) -> Size {
        Size::for_arity(self.arity)
    }
}

/// An external value bound to one input port of a named component or circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDecl {
    pub name: String,
    pub index: i64,
    pub value: bool,
}

/// A directed wire from an output port to an input port.
///
/// Endpoints are ids and are not required to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub from_index: i64,
    pub to: String,
    pub to_index: i64,
}

/// The port designated as the circuit's external output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRef {
    pub id: String,
    pub index: i64,
}

/// Display state of an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    /// No value declared
    Unset,
    High,
    Low,
}

impl From<Option<bool>> for PortState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::High,
            Some(false) => Self::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_scales_with_arity() {
        assert_eq!(Size::for_arity(1), Size { width: 60, height: 30 });
        assert_eq!(Size::for_arity(2), Size { width: 60, height: 40 });
        assert_eq!(Size::for_arity(5), Size { width: 60, height: 100 });
    }

    #[test]
    fn test_arity_is_at_least_one() {
        let comp = Component::new("n1", GateKind::parse("NOT"), Position::default(), 0);
        assert_eq!(comp.arity, 1);
    }

    #[test]
    fn test_arity_is_capped() {
        let comp = Component::new("w", GateKind::parse("WIDE"), Position::default(), usize::MAX);
        assert_eq!(comp.arity, MAX_ARITY);
        assert_eq!(comp.size().height, PORT_PITCH * MAX_ARITY as i64);
    }
}
