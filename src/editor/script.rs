//! Edit scripts: an editing session replayed from text.
//!
//! ```text
//! name HALFADD
//! component s XOR 40 40
//! component c AND 40 120
//! input s 0 1
//! input s 1 0
//! connect s 0 c 0
//! output s 0
//! ```

use super::Editor;
use crate::error::{ComposerError, Result};

/// One editing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Component {
        id: String,
        gate_type: String,
        x: String,
        y: String,
    },
    Input {
        name: String,
        index: String,
        value: String,
    },
    Connect {
        from: String,
        from_index: String,
        to: String,
        to_index: String,
    },
    Output {
        id: String,
        index: String,
    },
}

impl Command {
    /// Parse one script line. Returns `None` for blank and comment lines.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or_default();
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(None);
        };

        let arity_error = |expected: usize| {
            ComposerError::parse(
                line_no,
                format!("'{}' takes {} arguments, got {}", verb, expected, args.len()),
            )
        };
        let owned = |i: usize| args[i].to_string();

        let command = match verb {
            "name" => {
                if args.len() != 1 {
                    return Err(arity_error(1));
                }
                Self::Name(owned(0))
            }
            "component" => {
                if args.len() != 4 {
                    return Err(arity_error(4));
                }
                Self::Component {
                    id: owned(0),
                    gate_type: owned(1),
                    x: owned(2),
                    y: owned(3),
                }
            }
            "input" => {
                if args.len() != 3 {
                    return Err(arity_error(3));
                }
                Self::Input {
                    name: owned(0),
                    index: owned(1),
                    value: owned(2),
                }
            }
            "connect" => {
                if args.len() != 4 {
                    return Err(arity_error(4));
                }
                Self::Connect {
                    from: owned(0),
                    from_index: owned(1),
                    to: owned(2),
                    to_index: owned(3),
                }
            }
            "output" => {
                if args.len() != 2 {
                    return Err(arity_error(2));
                }
                Self::Output {
                    id: owned(0),
                    index: owned(1),
                }
            }
            _ => {
                return Err(ComposerError::parse(
                    line_no,
                    format!("unknown command: {}", verb),
                ))
            }
        };

        Ok(Some(command))
    }

    /// Apply this command to an editing session.
    pub fn apply(&self, editor: &mut Editor) -> Result<()> {
        match self {
            Self::Name(name) => editor.set_name(name),
            Self::Component { id, gate_type, x, y } => editor.add_component(id, gate_type, x, y).map(|_| ()),
            Self::Input { name, index, value } => {
                let value = match value.as_str() {
                    "1" => true,
                    "0" => false,
                    other => {
                        return Err(ComposerError::InvalidBool {
                            field: "input value",
                            value: other.to_string(),
                        })
                    }
                };
                editor.add_input(name, index, value)
            }
            Self::Connect {
                from,
                from_index,
                to,
                to_index,
            } => editor.add_connection(from, from_index, to, to_index),
            Self::Output { id, index } => editor.set_output(id, index).map(|_| ()),
        }
    }
}

/// Run every command in `script` against `editor`, stopping at the first failure.
///
/// Returns the number of commands applied.
pub fn run_script(editor: &mut Editor, script: &str) -> Result<usize> {
    let mut applied = 0;
    for (idx, line) in script.lines().enumerate() {
        let line_no = idx + 1;
        let wrap = |source: ComposerError| ComposerError::ScriptError {
            line: line_no,
            source: Box::new(source),
        };
        if let Some(command) = Command::parse(line, line_no).map_err(wrap)? {
            command.apply(editor).map_err(wrap)?;
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use tempfile::TempDir;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   # nothing", 1).unwrap(), None);
        assert_eq!(
            Command::parse("component a1 AND 10 20 # first gate", 1).unwrap(),
            Some(Command::Component {
                id: "a1".into(),
                gate_type: "AND".into(),
                x: "10".into(),
                y: "20".into(),
            })
        );
        assert!(Command::parse("output a1", 3).is_err());
        assert!(Command::parse("delete a1", 3).is_err());
    }

    #[test]
    fn test_run_script_builds_circuit() {
        let dir = TempDir::new().unwrap();
        let mut editor = Editor::new(EditorConfig::new().with_components_dir(dir.path()));
        let script = "name HALFADD\n\
                      component s XOR 40 40\n\
                      component c AND 40 120\n\
                      input s 0 1\n\
                      input s 1 0\n\
                      connect s 0 c 0\n\
                      output s 0\n";
        assert_eq!(run_script(&mut editor, script).unwrap(), 7);
        assert_eq!(editor.name(), "HALFADD");
        assert_eq!(editor.circuit().components().len(), 2);
        assert_eq!(editor.circuit().input_value("s", 0), Some(true));
    }

    #[test]
    fn test_run_script_reports_failing_line() {
        let dir = TempDir::new().unwrap();
        let mut editor = Editor::new(EditorConfig::new().with_components_dir(dir.path()));
        let err = run_script(&mut editor, "component a AND 0 0\n\ncomponent b OR x 0\n").unwrap_err();
        match err {
            ComposerError::ScriptError { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, ComposerError::InvalidNumber { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(editor.circuit().components().len(), 1);

        let err = run_script(&mut editor, "input a 0 yes\n").unwrap_err();
        assert!(matches!(err, ComposerError::ScriptError { line: 1, .. }));
    }
}
