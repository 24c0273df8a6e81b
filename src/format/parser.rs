//! Parser for circuit files.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{ComposerError, Result};

/// Parser for circuit files.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse the entire file.
    pub fn parse(&mut self) -> Result<CircuitDocument> {
        let mut doc = CircuitDocument::new();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Word => {
                    let record = self.parse_record()?;
                    doc.records.push(record);
                }
                TokenKind::Field => {
                    return Err(ComposerError::parse(
                        self.current.line,
                        format!("expected record keyword, got field '{}'", self.current.text),
                    ));
                }
                TokenKind::Eof => break,
            }
        }

        Ok(doc)
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Collect the `key=value` fields up to the end of the line.
    ///
    /// Bare words inside a record are ignored; a repeated key keeps its first value.
    fn collect_fields(&mut self) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        while self.current.kind != TokenKind::Newline && self.current.kind != TokenKind::Eof {
            if let Some((key, value)) = self.current.key_value() {
                fields
                    .entry(key.to_string())
                    .or_insert_with(|| value.to_string());
            }
            self.advance();
        }
        fields
    }

    fn parse_record(&mut self) -> Result<Record> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance();

        let mut fields = Fields {
            map: self.collect_fields(),
            keyword: &keyword,
            line,
        };

        let record = match keyword.as_str() {
            COMPONENT_KEYWORD => Record::Component {
                id: fields.text("id")?,
                gate_type: fields.text("type")?,
                line,
            },
            INPUT_KEYWORD => Record::Input {
                name: fields.text("name")?,
                index: fields.integer("index")?,
                value: fields.flag("value")?,
                line,
            },
            CONNECT_KEYWORD => Record::Connect {
                from: fields.text("from")?,
                from_index: fields.integer("findex")?,
                to: fields.text("to")?,
                to_index: fields.integer("tindex")?,
                line,
            },
            OUTPUT_KEYWORD => Record::Output {
                id: fields.text("put")?,
                index: fields.integer("kndex")?,
                line,
            },
            _ => {
                return Err(ComposerError::parse(
                    line,
                    format!("unknown record keyword: {}", keyword),
                ));
            }
        };

        Ok(record)
    }
}

/// Fields of one record, with typed accessors that report the record's line.
struct Fields<'k> {
    map: HashMap<String, String>,
    keyword: &'k str,
    line: usize,
}

impl Fields<'_> {
    fn text(&mut self, key: &str) -> Result<String> {
        self.map.remove(key).ok_or_else(|| {
            ComposerError::parse(
                self.line,
                format!("'{}' record is missing field '{}'", self.keyword, key),
            )
        })
    }

    fn integer(&mut self, key: &str) -> Result<i64> {
        let raw = self.text(key)?;
        raw.parse().map_err(|_| {
            ComposerError::parse(self.line, format!("field '{}' is not an integer: {}", key, raw))
        })
    }

    fn flag(&mut self, key: &str) -> Result<bool> {
        match self.text(key)?.as_str() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(ComposerError::parse(
                self.line,
                format!("field '{}' must be 0 or 1, got {}", key, other),
            )),
        }
    }
}
