//! Reader and writer for the line-oriented circuit file format.
//!
//! Exported circuits live in the components directory as `<name>.txt`. Each
//! line is one record: a keyword followed by space-separated `key=value`
//! fields.
//!
//! # Grammar Overview
//!
//! ```text
//! file       = { line }
//! line       = comment | record | empty
//! comment    = '#' { any_char }
//! record     = component | input | connect | output
//!
//! component  = "comp" "id=" id "type=" gate_type
//! input      = "input" "name=" id "index=" int "value=" ("0" | "1")
//! connect    = "connect" "from=" id "findex=" int "to=" id "tindex=" int
//! output     = "Out" "put=" id "kndex=" int
//! ```
//!
//! The writer always emits fields in the order shown; the reader accepts them
//! in any order and ignores keys it does not know.
//!
//! # Example
//!
//! ```text
//! comp id=s type=XOR
//! comp id=c type=AND
//! input name=s index=0 value=1
//! input name=s index=1 value=0
//! connect from=s findex=0 to=c tindex=0
//! Out put=s kndex=0
//! ```
//!
//! Other circuits that use this one as a gate only look at lines starting
//! with `input` and their `index=` field; see [`crate::gates::read_input_schema`].

mod ast;
mod lexer;
mod parser;
mod writer;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use writer::{write, write_file};

use std::path::Path;

use crate::error::{ComposerError, Result};

/// Parse circuit file text.
pub fn parse(input: &str) -> Result<CircuitDocument> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a circuit file.
pub fn parse_file(path: &Path) -> Result<CircuitDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| ComposerError::file_read(path, e))?;
    parse(&content)
}
