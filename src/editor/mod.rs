//! Editing session.
//!
//! An [`Editor`] owns the circuit being built and applies the operations an
//! editing surface offers: add a component, add an input, connect two
//! components, set the output, export. Operations take the raw text of form
//! fields; anything that fails to parse is rejected before the circuit is
//! touched, so a failed operation never leaves partial state behind.
//!
//! Every name that ends up in the exported file (ids, gate types, input
//! names, connection endpoints) must be a single token the reader can take
//! back: non-empty, without whitespace or `=`, and not starting with `#`.

mod script;

pub use script::{run_script, Command};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::circuit::{
    validate_circuit, Circuit, Component, Connection, Diagnostic, InputDecl, OutputRef, Position,
};
use crate::config::EditorConfig;
use crate::error::{ComposerError, Result};
use crate::format::{self, CircuitDocument};
use crate::gates::{ArityResolver, GateKind};

/// One editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    resolver: ArityResolver,
    circuit: Circuit,
    name: String,
}

impl Editor {
    /// Start an empty session.
    pub fn new(config: EditorConfig) -> Self {
        let resolver = ArityResolver::from_config(&config);
        let name = config.circuit_name.clone();
        Self {
            config,
            resolver,
            circuit: Circuit::new(),
            name,
        }
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Name the circuit will be exported under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The session configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Resolver used for gate types.
    pub fn resolver(&self) -> &ArityResolver {
        &self.resolver
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.chars().any(char::is_whitespace) {
            return Err(ComposerError::invalid_identifier(
                name,
                "circuit names must be non-empty with no spaces or path separators",
            ));
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Add a component of the given gate type at (`x`, `y`).
    ///
    /// Fails without changing the circuit if a coordinate is not an integer,
    /// the id is unusable, or the gate type is unknown.
    pub fn add_component(&mut self, id: &str, gate_type: &str, x: &str, y: &str) -> Result<&Component> {
        let id = id.trim();
        let gate_type = gate_type.trim();
        let x = parse_int("x position", x)?;
        let y = parse_int("y position", y)?;
        check_identifier("component id", id)?;
        check_identifier("gate type", gate_type)?;

        let kind = GateKind::parse(gate_type);
        let arity = self.resolver.resolve_kind(&kind)?;

        debug!(id, gate_type, x, y, arity, "adding component");
        Ok(self
            .circuit
            .add_component(Component::new(id, kind, Position::new(x, y), arity)))
    }

    /// Bind `value` to input port `index` of `name`.
    ///
    /// `name` is not required to match a component.
    pub fn add_input(&mut self, name: &str, index: &str, value: bool) -> Result<()> {
        let index = parse_int("input index", index)?;
        let name = name.trim();
        check_identifier("input name", name)?;
        debug!(name, index, value, "adding input");
        self.circuit.add_input(InputDecl {
            name: name.to_string(),
            index,
            value,
        });
        Ok(())
    }

    /// Connect output port `from_index` of `from` to input port `to_index` of `to`.
    ///
    /// The ids are not required to exist.
    pub fn add_connection(&mut self, from: &str, from_index: &str, to: &str, to_index: &str) -> Result<()> {
        let from_index = parse_int("connection index", from_index)?;
        let to_index = parse_int("connection index", to_index)?;
        let (from, to) = (from.trim(), to.trim());
        check_identifier("connection source", from)?;
        check_identifier("connection target", to)?;
        debug!(from, from_index, to, to_index, "adding connection");
        self.circuit.add_connection(Connection {
            from: from.to_string(),
            from_index,
            to: to.to_string(),
            to_index,
        });
        Ok(())
    }

    /// Designate the circuit output, returning the one it replaces.
    pub fn set_output(&mut self, id: &str, index: &str) -> Result<Option<OutputRef>> {
        let index = parse_int("output index", index)?;
        let id = id.trim();
        check_identifier("output id", id)?;
        debug!(id, index, "setting output");
        Ok(self.circuit.set_output(OutputRef {
            id: id.to_string(),
            index,
        }))
    }

    /// Problems with the circuit as it stands.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        validate_circuit(&self.circuit)
    }

    /// Write the circuit to `<components dir>/<name>.txt`.
    ///
    /// Once exported, the circuit can be used as a gate type by name.
    pub fn export(&self) -> Result<PathBuf> {
        let path = self.config.circuit_path(&self.name);
        format::write_file(&path, &CircuitDocument::from_circuit(&self.circuit))?;
        info!(path = %path.display(), "exported circuit");
        Ok(path)
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ComposerError::invalid_number(field, raw))
}

/// Names must survive a round trip through a circuit file.
fn check_identifier(what: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(ComposerError::invalid_identifier(id, format!("{what} is empty")));
    }
    if id.starts_with('#') {
        return Err(ComposerError::invalid_identifier(
            id,
            format!("{what} cannot start with '#'"),
        ));
    }
    if id.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(ComposerError::invalid_identifier(
            id,
            format!("{what} cannot contain spaces or '='"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::layout::drawable_edges;
    use crate::format::parse_file;
    use crate::gates::BuiltinGate;
    use tempfile::TempDir;

    fn editor(dir: &TempDir) -> Editor {
        Editor::new(EditorConfig::new().with_components_dir(dir.path()))
    }

    #[test]
    fn test_add_builtin_component() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        let comp = ed.add_component(" n1 ", "NOT", "10", " 20").unwrap();
        assert_eq!(comp.id, "n1");
        assert_eq!(comp.kind, GateKind::Builtin(BuiltinGate::Not));
        assert_eq!(comp.arity, 1);
        assert_eq!(comp.position, Position::new(10, 20));
        assert!(ed.circuit().contains("n1"));
    }

    #[test]
    fn test_non_integer_position_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        let err = ed.add_component("a1", "AND", "1.5", "20").unwrap_err();
        assert!(matches!(err, ComposerError::InvalidNumber { .. }));
        assert!(err.is_user_input());
        assert!(ed.add_component("a1", "AND", "10", "abc").is_err());
        assert!(ed.circuit().components().is_empty());
    }

    #[test]
    fn test_unknown_gate_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        let err = ed.add_component("g", "NAND", "0", "0").unwrap_err();
        assert!(matches!(err, ComposerError::UnknownGate { .. }));
        assert!(ed.circuit().is_empty());
    }

    #[test]
    fn test_rejects_unusable_ids() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        assert!(ed.add_component("", "AND", "0", "0").is_err());
        assert!(ed.add_component("a b", "AND", "0", "0").is_err());
        assert!(ed.add_component("a=b", "AND", "0", "0").is_err());
        assert!(ed.circuit().components().is_empty());
    }

    #[test]
    fn test_inputs_and_connections_need_only_integer_indices() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.add_input("nowhere", "4", true).unwrap();
        ed.add_connection("ghost", "0", "phantom", "1").unwrap();
        assert!(ed.add_input("a", "x", true).is_err());
        assert!(ed.add_connection("a", "0", "b", "one").is_err());
        assert_eq!(ed.circuit().inputs().len(), 1);
        assert_eq!(ed.circuit().connections().len(), 1);
        assert_eq!(ed.diagnostics().len(), 2);
    }

    #[test]
    fn test_set_output_twice_keeps_second() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.set_output("a", "0").unwrap();
        let replaced = ed.set_output("b", "1").unwrap();
        assert_eq!(replaced, Some(OutputRef { id: "a".into(), index: 0 }));
        assert_eq!(ed.circuit().output(), Some(&OutputRef { id: "b".into(), index: 1 }));
        assert!(ed.set_output("c", "z").is_err());
        assert_eq!(ed.circuit().output().unwrap().id, "b");
    }

    #[test]
    fn test_exported_circuit_becomes_gate_type() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.set_name("HALFADD").unwrap();
        ed.add_component("s", "XOR", "0", "0").unwrap();
        ed.add_component("c", "AND", "0", "80").unwrap();
        ed.add_input("s", "0", false).unwrap();
        ed.add_input("s", "1", false).unwrap();
        ed.set_output("s", "0").unwrap();
        let path = ed.export().unwrap();
        assert_eq!(path, dir.path().join("HALFADD.txt"));

        let mut next = editor(&dir);
        let comp = next.add_component("h1", "HALFADD", "100", "100").unwrap();
        assert_eq!(comp.arity, 2);
        assert_eq!(comp.size().height, 40);
    }

    #[test]
    fn test_arity_follows_highest_input_index() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.set_name("WIDE").unwrap();
        ed.add_component("o", "OR", "0", "0").unwrap();
        ed.add_input("o", "3", true).unwrap();
        ed.set_output("o", "3").unwrap();
        ed.export().unwrap();

        let mut next = editor(&dir);
        assert_eq!(next.add_component("w", "WIDE", "0", "0").unwrap().arity, 4);
    }

    #[test]
    fn test_rejects_bad_circuit_names() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        assert_eq!(ed.name(), "XOR");
        assert!(ed.set_name("  ").is_err());
        assert!(ed.set_name("../up").is_err());
        assert_eq!(ed.name(), "XOR");
    }

    #[test]
    fn test_unreadable_names_change_nothing() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.add_component("a", "AND", "0", "0").unwrap();

        for bad in ["a #1", "#a", "", "x=y"] {
            let err = ed.add_input(bad, "0", true).unwrap_err();
            assert!(matches!(err, ComposerError::InvalidIdentifier { .. }), "input {bad:?}");
            assert!(ed.add_connection(bad, "0", "a", "0").is_err());
            assert!(ed.add_connection("a", "0", bad, "0").is_err());
            assert!(ed.set_output(bad, "0").is_err());
        }
        assert!(ed.add_component("#c", "AND", "0", "0").is_err());
        assert!(ed.add_component("c", "#AND", "0", "0").is_err());

        assert_eq!(ed.circuit().components().len(), 1);
        assert!(ed.circuit().inputs().is_empty());
        assert!(ed.circuit().connections().is_empty());
        assert!(ed.circuit().output().is_none());
    }

    #[test]
    fn test_export_reads_back_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.set_name("MIXED").unwrap();
        ed.add_component("a", "AND", "0", "0").unwrap();
        ed.add_component("n#2", "NOT", "0", "60").unwrap();
        ed.add_input("a", "0", true).unwrap();
        ed.add_input("pins", "1", false).unwrap();
        ed.add_connection("pins", "1", "a", "1").unwrap();
        ed.add_connection("a", "0", "n#2", "0").unwrap();
        ed.set_output("n#2", "0").unwrap();
        let path = ed.export().unwrap();

        let reloaded = parse_file(&path).unwrap();
        assert_eq!(reloaded, CircuitDocument::from_circuit(ed.circuit()));
        let circuit = Circuit::from_document(reloaded, ed.resolver()).unwrap();
        assert_eq!(circuit.inputs(), ed.circuit().inputs());
        assert_eq!(circuit.connections(), ed.circuit().connections());
        assert_eq!(circuit.output(), ed.circuit().output());
    }

    #[test]
    fn test_extreme_position_is_drawable() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.add_component("a", "AND", "9223372036854775807", "0").unwrap();
        ed.add_component("b", "NOT", "0", "0").unwrap();
        ed.add_connection("a", "0", "b", "0").unwrap();
        let edges = drawable_edges(ed.circuit());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].start, (i64::MAX, 20));
        assert_eq!(edges[0].end, (-5, 15));
    }
}
