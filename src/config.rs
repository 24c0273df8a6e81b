//! Editor configuration.

use std::path::{Path, PathBuf};

use crate::{DEFAULT_ARITY, DEFAULT_CIRCUIT_NAME, DEFAULT_COMPONENTS_DIR, MAX_ARITY};

/// Default limit on how deeply saved circuits may nest inside each other.
pub const DEFAULT_MAX_SUBCIRCUIT_DEPTH: usize = 16;

/// Configuration shared by the editor, resolver and simulator.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Directory holding exported circuits (`<name>.txt`).
    pub components_dir: PathBuf,
    /// Arity used when a saved circuit declares no inputs or cannot be read.
    pub default_arity: usize,
    /// Circuit name a new session starts with.
    pub circuit_name: String,
    /// Maximum sub-circuit nesting during simulation.
    pub max_subcircuit_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            components_dir: PathBuf::from(DEFAULT_COMPONENTS_DIR),
            default_arity: DEFAULT_ARITY,
            circuit_name: DEFAULT_CIRCUIT_NAME.to_string(),
            max_subcircuit_depth: DEFAULT_MAX_SUBCIRCUIT_DEPTH,
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the components directory.
    pub fn with_components_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.components_dir = dir.into();
        self
    }

    /// Set the fallback arity for saved circuits.
    ///
    /// Clamped to between 1 and [`MAX_ARITY`].
    pub fn with_default_arity(mut self, arity: usize) -> Self {
        self.default_arity = arity.clamp(1, MAX_ARITY);
        self
    }

    /// Set the initial circuit name.
    pub fn with_circuit_name(mut self, name: impl Into<String>) -> Self {
        self.circuit_name = name.into();
        self
    }

    /// Set the maximum sub-circuit nesting depth.
    pub fn with_max_subcircuit_depth(mut self, depth: usize) -> Self {
        self.max_subcircuit_depth = depth;
        self
    }

    /// Path of the file a circuit with the given name is exported to.
    pub fn circuit_path(&self, name: &str) -> PathBuf {
        circuit_file(&self.components_dir, name)
    }
}

/// `<dir>/<name>.txt`
pub(crate) fn circuit_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::new();
        assert_eq!(config.components_dir, PathBuf::from("components"));
        assert_eq!(config.default_arity, 2);
        assert_eq!(config.circuit_name, "XOR");
        assert_eq!(config.circuit_path("HALFADD"), PathBuf::from("components/HALFADD.txt"));
    }

    #[test]
    fn test_default_arity_is_at_least_one() {
        let config = EditorConfig::new().with_default_arity(0);
        assert_eq!(config.default_arity, 1);
        let config = EditorConfig::new().with_default_arity(usize::MAX);
        assert_eq!(config.default_arity, MAX_ARITY);
    }
}
