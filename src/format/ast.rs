//! Record types for circuit files.

use std::fmt;

use crate::circuit::Circuit;

/// Record keyword for components.
pub const COMPONENT_KEYWORD: &str = "comp";
/// Record keyword for input declarations.
pub const INPUT_KEYWORD: &str = "input";
/// Record keyword for connections.
pub const CONNECT_KEYWORD: &str = "connect";
/// Record keyword for the output designation.
///
/// Together with the `put=` and `kndex=` keys this spelling is what existing
/// circuit files contain.
pub const OUTPUT_KEYWORD: &str = "Out";

/// One line of a circuit file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// `comp id=<id> type=<type>`
    Component {
        id: String,
        gate_type: String,
        line: usize,
    },
    /// `input name=<name> index=<idx> value=<0|1>`
    Input {
        name: String,
        index: i64,
        value: bool,
        line: usize,
    },
    /// `connect from=<id> findex=<idx> to=<id> tindex=<idx>`
    Connect {
        from: String,
        from_index: i64,
        to: String,
        to_index: i64,
        line: usize,
    },
    /// `Out put=<id> kndex=<idx>`
    Output { id: String, index: i64, line: usize },
}

impl Record {
    /// Source line number (1-indexed).
    pub fn line(&self) -> usize {
        match self {
            Self::Component { line, .. }
            | Self::Input { line, .. }
            | Self::Connect { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component { id, gate_type, .. } => {
                write!(f, "{COMPONENT_KEYWORD} id={id} type={gate_type}")
            }
            Self::Input { name, index, value, .. } => {
                write!(f, "{INPUT_KEYWORD} name={name} index={index} value={}", u8::from(*value))
            }
            Self::Connect {
                from,
                from_index,
                to,
                to_index,
                ..
            } => write!(
                f,
                "{CONNECT_KEYWORD} from={from} findex={from_index} to={to} tindex={to_index}"
            ),
            Self::Output { id, index, .. } => write!(f, "{OUTPUT_KEYWORD} put={id} kndex={index}"),
        }
    }
}

/// A parsed or to-be-written circuit file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitDocument {
    pub records: Vec<Record>,
}

impl CircuitDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a circuit as file records.
    ///
    /// Components come first, then inputs, then connections, then the output
    /// if one is set. Line numbers are the positions the records will occupy.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let components = circuit.components().iter().map(|c| Record::Component {
            id: c.id.clone(),
            gate_type: c.kind.name().to_string(),
            line: 0,
        });
        let inputs = circuit.inputs().iter().map(|i| Record::Input {
            name: i.name.clone(),
            index: i.index,
            value: i.value,
            line: 0,
        });
        let connections = circuit.connections().iter().map(|c| Record::Connect {
            from: c.from.clone(),
            from_index: c.from_index,
            to: c.to.clone(),
            to_index: c.to_index,
            line: 0,
        });
        let output = circuit.output().map(|o| Record::Output {
            id: o.id.clone(),
            index: o.index,
            line: 0,
        });

        let records = components
            .chain(inputs)
            .chain(connections)
            .chain(output)
            .enumerate()
            .map(|(i, mut record)| {
                set_line(&mut record, i + 1);
                record
            })
            .collect();

        Self { records }
    }

    /// Input declarations in file order.
    pub fn inputs(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| matches!(r, Record::Input { .. }))
    }

    /// The last output designation in the file, if any.
    pub fn output(&self) -> Option<&Record> {
        self.records
            .iter()
            .rev()
            .find(|r| matches!(r, Record::Output { .. }))
    }
}

fn set_line(record: &mut Record, n: usize) {
    match record {
        Record::Component { line, .. }
        | Record::Input { line, .. }
        | Record::Connect { line, .. }
        | Record::Output { line, .. } => *line = n,
    }
}
