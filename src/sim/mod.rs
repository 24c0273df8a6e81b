//! Logic simulation.
//!
//! Evaluation is demand-driven from the designated output:
//!
//! 1. A component's input ports start low
//! 2. Each connection into the component drives the port it targets with
//!    the source's output at `findex`
//! 3. Input declarations naming the component override those ports
//! 4. The gate function produces a single output on port 0
//!
//! Ports past a component's arity do not exist: wires and declarations that
//! target them are ignored (validation reports them as out of range).
//!
//! A name that only appears in input declarations acts as a bank of source
//! pins: its outputs are the declared values by index, stored sparsely.
//!
//! A composite gate loads its saved circuit, feeds port `i` to every input
//! declaration with index `i` inside it, and evaluates that circuit's output.
//! Results are memoised per pass, so each component is evaluated once.
//! Dependencies are resolved with an explicit work stack, so arbitrarily long
//! gate chains evaluate without deep recursion; only sub-circuit nesting
//! recurses, bounded by the configured depth limit.

mod evaluator;

pub use evaluator::{Signals, Simulation, Simulator};
