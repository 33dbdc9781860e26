use std::path::Path;

use crate::error::{Error, Result};

/// How one column of a whitespace-delimited format is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Kept verbatim as text
    Text,
    /// Parsed as a floating point number
    Number,
    /// Present in the format but discarded
    Skip,
}

/// One column of a format schema
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Number,
        }
    }

    pub const fn skip() -> Self {
        Self {
            name: "-",
            kind: ColumnKind::Skip,
        }
    }
}

/// Column layout of one whitespace-delimited annotation format
///
/// Schemas are data: adding a format means declaring its columns, not
/// writing new parsing code.
#[derive(Debug)]
pub struct TableSchema {
    /// Format name used in diagnostics
    pub format: &'static str,
    /// Columns in file order
    pub columns: &'static [Column],
}

/// One decoded cell of a row
#[derive(Debug, Clone, PartialEq)]
enum Field {
    Text(String),
    Number(f64),
}

/// One decoded line of a table file
#[derive(Debug, Clone)]
pub struct Row {
    schema: &'static TableSchema,
    /// 1-based line number in the source file
    pub line: usize,
    fields: Vec<Option<Field>>,
}

impl Row {
    /// Text value of the named column
    ///
    /// Panics when the schema declares no text column of that name.
    pub fn text(&self, name: &str) -> &str {
        match self.field(name) {
            Some(Field::Text(s)) => s,
            _ => panic!("{} schema has no text column \"{}\"", self.schema.format, name),
        }
    }

    /// Numeric value of the named column
    ///
    /// Panics when the schema declares no numeric column of that name.
    pub fn number(&self, name: &str) -> f64 {
        match self.field(name) {
            Some(Field::Number(v)) => *v,
            _ => panic!(
                "{} schema has no numeric column \"{}\"",
                self.schema.format, name
            ),
        }
    }

    fn field(&self, name: &str) -> Option<&Field> {
        let position = self.schema.columns.iter().position(|c| c.name == name)?;
        self.fields[position].as_ref()
    }
}

/// Read a whitespace-delimited file into rows decoded against `schema`
///
/// Blank lines are skipped. Tokens beyond the schema's columns are
/// ignored, and placeholder columns trailing the last consumed one may be
/// absent. Any row missing a consumed column, or carrying an unparsable
/// number, fails the whole file: no partial results are returned.
pub fn read_rows(path: &Path, schema: &'static TableSchema) -> Result<Vec<Row>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut fields = Vec::with_capacity(schema.columns.len());
        for (position, column) in schema.columns.iter().enumerate() {
            let field = match column.kind {
                ColumnKind::Skip => None,
                ColumnKind::Text => {
                    let token = require_token(&tokens, position, path, line_no, schema, column)?;
                    Some(Field::Text(token.to_string()))
                }
                ColumnKind::Number => {
                    let token = require_token(&tokens, position, path, line_no, schema, column)?;
                    let value = token.parse::<f64>().map_err(|_| Error::Parse {
                        path: path.to_path_buf(),
                        line: line_no,
                        message: format!(
                            "{} column \"{}\" is not a number: {:?}",
                            schema.format, column.name, token
                        ),
                    })?;
                    Some(Field::Number(value))
                }
            };
            fields.push(field);
        }

        rows.push(Row {
            schema,
            line: line_no,
            fields,
        });
    }

    tracing::debug!("read {} {} rows from {:?}", rows.len(), schema.format, path);
    Ok(rows)
}

fn require_token<'a>(
    tokens: &[&'a str],
    position: usize,
    path: &Path,
    line: usize,
    schema: &TableSchema,
    column: &Column,
) -> Result<&'a str> {
    tokens.get(position).copied().ok_or_else(|| Error::Parse {
        path: path.to_path_buf(),
        line,
        message: format!(
            "{} row has {} columns, column \"{}\" (position {}) is missing",
            schema.format,
            tokens.len(),
            column.name,
            position + 1
        ),
    })
}
