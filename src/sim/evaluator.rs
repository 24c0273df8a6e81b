//! Gate-level evaluation of a circuit.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::circuit::{Circuit, Component, Connection, InputDecl};
use crate::config::EditorConfig;
use crate::error::{ComposerError, Result};
use crate::format;
use crate::gates::{ArityResolver, GateKind};

/// Output values of a node by port index. Ports without a value are absent.
pub type Signals = BTreeMap<usize, bool>;

/// Outcome of simulating a circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    /// Value at the designated output port
    pub value: bool,
    /// Outputs of every component, in insertion order
    pub components: Vec<(String, Signals)>,
}

/// Evaluates circuits, loading sub-circuits from the components directory.
#[derive(Debug)]
pub struct Simulator {
    resolver: ArityResolver,
    max_depth: usize,
    /// Sub-circuits already loaded, by gate type
    loaded: RefCell<HashMap<String, Rc<Circuit>>>,
}

impl Simulator {
    /// Create a simulator using the configured components directory.
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_resolver(ArityResolver::from_config(config), config.max_subcircuit_depth)
    }

    /// Create a simulator with an explicit resolver and nesting limit.
    pub fn with_resolver(resolver: ArityResolver, max_depth: usize) -> Self {
        Self {
            resolver,
            max_depth,
            loaded: RefCell::new(HashMap::new()),
        }
    }

    /// Load an exported circuit by name.
    pub fn load(&self, name: &str) -> Result<Circuit> {
        let doc = format::parse_file(&self.resolver.circuit_path(name))?;
        Circuit::from_document(doc, &self.resolver)
    }

    /// Evaluate the outputs of one component or input name.
    pub fn evaluate(&self, circuit: &Circuit, id: &str) -> Result<Signals> {
        Evaluation::new(self, circuit, None, 0).evaluate(id)
    }

    /// Value at the circuit's designated output.
    pub fn output(&self, circuit: &Circuit) -> Result<bool> {
        Evaluation::new(self, circuit, None, 0).output()
    }

    /// Evaluate every component and the designated output.
    pub fn simulate(&self, circuit: &Circuit) -> Result<Simulation> {
        let mut eval = Evaluation::new(self, circuit, None, 0);
        let value = eval.output()?;
        let components = circuit
            .components()
            .iter()
            .map(|c| Ok((c.id.clone(), eval.evaluate(&c.id)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Simulation { value, components })
    }

    fn subcircuit(&self, gate_type: &str) -> Result<Rc<Circuit>> {
        if let Some(circuit) = self.loaded.borrow().get(gate_type) {
            return Ok(Rc::clone(circuit));
        }
        let path = self.resolver.existing_circuit(gate_type)?;
        let doc = format::parse_file(&path)?;
        let circuit = Rc::new(Circuit::from_document(doc, &self.resolver)?);
        debug!(gate_type, components = circuit.components().len(), "loaded sub-circuit");
        self.loaded
            .borrow_mut()
            .insert(gate_type.to_string(), Rc::clone(&circuit));
        Ok(circuit)
    }
}

/// State of one evaluation pass over one circuit.
struct Evaluation<'s, 'c> {
    sim: &'s Simulator,
    circuit: &'c Circuit,
    /// Port values supplied by the enclosing component, by input index
    bindings: Option<&'c [bool]>,
    depth: usize,
    /// Connections by target id
    incoming: HashMap<&'c str, Vec<&'c Connection>>,
    /// Input declarations by name, in declaration order
    declared: HashMap<&'c str, Vec<&'c InputDecl>>,
    computed: HashMap<String, Signals>,
    in_progress: HashSet<String>,
}

impl<'s, 'c> Evaluation<'s, 'c> {
    fn new(sim: &'s Simulator, circuit: &'c Circuit, bindings: Option<&'c [bool]>, depth: usize) -> Self {
        let mut incoming: HashMap<&'c str, Vec<&'c Connection>> = HashMap::new();
        for conn in circuit.connections() {
            incoming.entry(conn.to.as_str()).or_default().push(conn);
        }
        let mut declared: HashMap<&'c str, Vec<&'c InputDecl>> = HashMap::new();
        for decl in circuit.inputs() {
            declared.entry(decl.name.as_str()).or_default().push(decl);
        }

        Self {
            sim,
            circuit,
            bindings,
            depth,
            incoming,
            declared,
            computed: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn output(&mut self) -> Result<bool> {
        let circuit = self.circuit;
        let output = circuit.output().ok_or(ComposerError::MissingOutput)?;
        let values = self.evaluate(&output.id)?;
        Ok(port(&values, output.index).unwrap_or(false))
    }

    /// Evaluate `id` after everything it depends on.
    ///
    /// Dependencies are walked with an explicit stack, so the depth of a gate
    /// chain is bounded by memory rather than by the call stack.
    fn evaluate(&mut self, id: &str) -> Result<Signals> {
        let mut stack = vec![(id.to_string(), false)];

        while let Some((node, ready)) = stack.pop() {
            if self.computed.contains_key(&node) {
                continue;
            }
            if ready {
                let values = self.compute(&node)?;
                self.in_progress.remove(&node);
                self.computed.insert(node, values);
                continue;
            }
            if !self.in_progress.insert(node.clone()) {
                return Err(ComposerError::CombinationalLoop { id: node });
            }

            let sources = self.sources(&node);
            stack.push((node, true));
            for source in sources {
                if !self.computed.contains_key(source) {
                    stack.push((source.to_string(), false));
                }
            }
        }

        Ok(self.computed.get(id).cloned().unwrap_or_default())
    }

    /// Ids whose outputs feed `node`.
    fn sources(&self, node: &str) -> Vec<&'c str> {
        if !self.circuit.contains(node) {
            return Vec::new();
        }
        self.incoming
            .get(node)
            .map(|conns| conns.iter().map(|&c| c.from.as_str()).collect())
            .unwrap_or_default()
    }

    /// Outputs of one node whose sources are already computed.
    fn compute(&self, id: &str) -> Result<Signals> {
        let circuit = self.circuit;
        match circuit.component(id) {
            Some(component) => self.evaluate_component(component),
            None => {
                let bank = self.declared_bank(id);
                if bank.is_empty() {
                    warn!(id, "reference to unknown component, reading low");
                    Ok(Signals::from([(0, false)]))
                } else {
                    Ok(bank)
                }
            }
        }
    }

    fn evaluate_component(&self, component: &Component) -> Result<Signals> {
        // Ports past the arity do not exist; writes to them are dropped
        let mut ports = vec![false; component.arity];

        for conn in self.incoming.get(component.id.as_str()).into_iter().flatten() {
            let value = self
                .computed
                .get(conn.from.as_str())
                .and_then(|source| port(source, conn.from_index));
            let slot = usize::try_from(conn.to_index)
                .ok()
                .and_then(|target| ports.get_mut(target));
            if let (Some(value), Some(slot)) = (value, slot) {
                *slot = value;
            }
        }

        // Declared values override wired ones
        for decl in self.declared.get(component.id.as_str()).into_iter().flatten() {
            if let Ok(target) = usize::try_from(decl.index) {
                let value = self.bound_value(target, decl.value);
                if let Some(slot) = ports.get_mut(target) {
                    *slot = value;
                }
            }
        }

        match &component.kind {
            GateKind::Builtin(gate) => Ok(Signals::from([(0, gate.evaluate(&ports))])),
            GateKind::Composite(gate_type) => self.evaluate_subcircuit(gate_type, &ports),
        }
    }

    fn evaluate_subcircuit(&self, gate_type: &str, ports: &[bool]) -> Result<Signals> {
        if self.depth >= self.sim.max_depth {
            return Err(ComposerError::SubcircuitTooDeep {
                gate_type: gate_type.to_string(),
                max_depth: self.sim.max_depth,
            });
        }
        let sub = self.sim.subcircuit(gate_type)?;
        let value = Evaluation::new(self.sim, &sub, Some(ports), self.depth + 1).output()?;
        Ok(Signals::from([(0, value)]))
    }

    /// Values declared for a name that is not a component.
    fn declared_bank(&self, name: &str) -> Signals {
        let mut bank = Signals::new();
        for decl in self.declared.get(name).into_iter().flatten() {
            if let Ok(index) = usize::try_from(decl.index) {
                bank.insert(index, self.bound_value(index, decl.value));
            }
        }
        bank
    }

    /// Inside a sub-circuit, input index `i` takes the enclosing component's port `i`.
    fn bound_value(&self, index: usize, declared: bool) -> bool {
        self.bindings
            .and_then(|ports| ports.get(index).copied())
            .unwrap_or(declared)
    }
}

fn port(values: &Signals, index: i64) -> Option<bool> {
    usize::try_from(index)
        .ok()
        .and_then(|i| values.get(&i).copied())
}
