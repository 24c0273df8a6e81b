//! Gate arity resolution.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{BuiltinGate, GateKind};
use crate::config::{circuit_file, EditorConfig};
use crate::error::{ComposerError, Result};
use crate::MAX_ARITY;

/// Line prefix of input declarations in circuit files.
pub const INPUT_MARKER: &str = "input";

const INDEX_FIELD: &str = "index=";

/// Input ports a saved circuit exposes, as recovered from its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSchema {
    /// Number of input ports
    pub arity: usize,
    /// Whether any input declaration was present (otherwise `arity` is the fallback)
    pub found: bool,
}

/// Scan circuit file content for input declarations.
///
/// Only lines starting with [`INPUT_MARKER`] are considered, and within them
/// only fields starting with `index=`. The arity is one more than the largest
/// non-negative index seen, or `default_arity` when there is none.
///
/// Returns a parse error if an index field is not an integer.
pub fn read_input_schema(content: &str, default_arity: usize) -> Result<InputSchema> {
    let mut max_index: Option<usize> = None;

    for (line_no, line) in content.lines().enumerate() {
        if !line.starts_with(INPUT_MARKER) {
            continue;
        }
        for field in line.split_whitespace() {
            let Some(raw) = field.strip_prefix(INDEX_FIELD) else {
                continue;
            };
            let raw = raw.split('=').next().unwrap_or(raw);
            let index: i64 = raw.parse().map_err(|_| {
                ComposerError::parse(line_no + 1, format!("invalid input index: {}", raw))
            })?;
            // Negative indices never name a port
            if let Ok(index) = usize::try_from(index) {
                max_index = Some(max_index.map_or(index, |m| m.max(index)));
            }
        }
    }

    Ok(match max_index {
        Some(max) => InputSchema {
            arity: max.saturating_add(1),
            found: true,
        },
        None => InputSchema {
            arity: default_arity,
            found: false,
        },
    })
}

/// Maps gate type names to their number of input ports.
#[derive(Debug, Clone)]
pub struct ArityResolver {
    components_dir: PathBuf,
    default_arity: usize,
}

impl ArityResolver {
    /// Create a resolver reading saved circuits from `components_dir`.
    pub fn new(components_dir: impl Into<PathBuf>, default_arity: usize) -> Self {
        Self {
            components_dir: components_dir.into(),
            default_arity: default_arity.clamp(1, MAX_ARITY),
        }
    }

    /// Create a resolver from editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.components_dir.clone(), config.default_arity)
    }

    /// Directory saved circuits are read from.
    pub fn components_dir(&self) -> &Path {
        &self.components_dir
    }

    /// Path of the file backing a composite gate type.
    pub fn circuit_path(&self, gate_type: &str) -> PathBuf {
        circuit_file(&self.components_dir, gate_type)
    }

    /// Resolve a gate type name to its input count.
    ///
    /// Fails with [`ComposerError::UnknownGate`] when the name is not built in
    /// and no saved circuit file exists for it.
    pub fn resolve(&self, gate_type: &str) -> Result<usize> {
        self.resolve_kind(&GateKind::parse(gate_type))
    }

    /// Resolve an already classified gate type.
    pub fn resolve_kind(&self, kind: &GateKind) -> Result<usize> {
        match kind {
            GateKind::Builtin(gate) => Ok(gate.arity()),
            GateKind::Composite(name) => {
                let path = self.existing_circuit(name)?;
                Ok(self.read_schema(&path).arity)
            }
        }
    }

    /// Locate the saved circuit file for a composite gate type.
    pub fn existing_circuit(&self, gate_type: &str) -> Result<PathBuf> {
        let unknown = || ComposerError::UnknownGate {
            gate_type: gate_type.to_string(),
        };
        if gate_type.is_empty() || gate_type.contains(['/', '\\']) || BuiltinGate::from_name(gate_type).is_some() {
            return Err(unknown());
        }
        let path = self.circuit_path(gate_type);
        if path.exists() {
            Ok(path)
        } else {
            Err(unknown())
        }
    }

    /// Read the input schema of a saved circuit file.
    ///
    /// Read and parse failures are not fatal: they are logged and the
    /// default arity is reported with `found == false`. Arities above
    /// [`MAX_ARITY`] are capped with a warning.
    pub fn read_schema(&self, path: &Path) -> InputSchema {
        let fallback = InputSchema {
            arity: self.default_arity,
            found: false,
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read circuit file, using default arity");
                return fallback;
            }
        };

        match read_input_schema(&content, self.default_arity) {
            Ok(schema) if schema.arity > MAX_ARITY => {
                warn!(
                    path = %path.display(),
                    arity = schema.arity,
                    max = MAX_ARITY,
                    "circuit declares too many inputs, capping arity"
                );
                InputSchema {
                    arity: MAX_ARITY,
                    ..schema
                }
            }
            Ok(schema) => {
                debug!(path = %path.display(), arity = schema.arity, found = schema.found, "read input schema");
                schema
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed circuit file, using default arity");
                fallback
            }
        }
    }
}
