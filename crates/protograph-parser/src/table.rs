//! Markdown table decoding.
//!
//! Only lines that start and end with `|` take part in a table; any other
//! line in the section is ignored. The first table line is the header, the
//! second is the separator (its content is not checked) and every further
//! line is a data row.

use protograph_core::record::Record;

use crate::{
    error::{Diagnostic, ErrorCode},
    sections::SectionKind,
    span::{Span, Spanned},
    tokens::{CELL_SEPARATOR, Token},
};

/// A decoded table: header cells and one record per data row.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    header: Spanned<Vec<String>>,
    rows: Vec<Spanned<Record>>,
}

impl Table {
    pub fn header_span(&self) -> Span {
        self.header.span()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header.inner().iter().any(|name| name == column)
    }

    /// Check that `columns` exist whenever the table has data rows.
    pub fn require(&self, section: SectionKind, columns: &[&str]) -> Result<(), Diagnostic> {
        if self.rows.is_empty() {
            return Ok(());
        }

        match columns.iter().find(|column| !self.has_column(column)) {
            Some(missing) => Err(Diagnostic::error(format!(
                "the {section} table is missing the `{missing}` column"
            ))
            .with_code(ErrorCode::E102)
            .with_label(self.header_span(), "header defined here")
            .with_help(format!("add a `{missing}` column to the {section} table"))),
            None => Ok(()),
        }
    }

    pub fn rows(&self) -> &[Spanned<Record>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Spanned<Record>> {
        self.rows
    }
}

/// Decode the table contained in a section's lines.
///
/// Returns `Ok(None)` when fewer than two table lines are present.
pub(crate) fn decode(tokens: &[Token<'_>]) -> Result<Option<Table>, Diagnostic> {
    let mut table_lines = tokens.iter().filter(|token| token.is_table_row());

    let (Some(header_line), Some(_separator)) = (table_lines.next(), table_lines.next()) else {
        return Ok(None);
    };

    let header: Vec<String> = split_cells(header_line.text)
        .into_iter()
        .map(str::to_string)
        .collect();

    let rows = table_lines
        .map(|line| {
            let cells = split_cells(line.text);
            if cells.len() != header.len() {
                return Err(Diagnostic::error(format!(
                    "table row has {} cell(s) but the header has {} column(s): `{}`",
                    cells.len(),
                    header.len(),
                    line.text.trim()
                ))
                .with_code(ErrorCode::E100)
                .with_label(line.span, "row defined here")
                .with_secondary_label(header_line.span, "header defined here")
                .with_help("add or remove cells so every row matches the header"));
            }
            Ok(Spanned::new(Record::from_cells(&header, cells), line.span))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Table {
        header: Spanned::new(header, header_line.span),
        rows,
    }))
}

/// Split a table line into trimmed cells, dropping the outer delimiters.
fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix(CELL_SEPARATOR).unwrap_or(line);
    let line = line.strip_suffix(CELL_SEPARATOR).unwrap_or(line);

    line.split(CELL_SEPARATOR).map(str::trim).collect()
}
