//! Line tokens.
//!
//! Documents are line oriented, so the token unit is a whole line tagged with
//! the role its shape suggests. Whether that role applies depends on where the
//! line sits: inside front matter a `## ...` line is just a comment.

use crate::span::Span;

/// Front matter delimiter.
pub(crate) const DELIMITER: &str = "---";

/// Prefix of a section header.
pub(crate) const HEADER_PREFIX: &str = "## ";

/// Table cell separator.
pub(crate) const CELL_SEPARATOR: char = '|';

/// Shape of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'src> {
    /// A line that is `---` once trimmed.
    Delimiter,
    /// A line starting with `## `; holds the trimmed header text.
    Header(&'src str),
    /// A trimmed line that starts and ends with `|`.
    TableRow,
    /// A line containing only whitespace.
    Blank,
    /// Anything else.
    Plain,
}

/// One line of the source with its classification and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'src> {
    pub kind: LineKind<'src>,
    /// Line content without its terminator.
    pub text: &'src str,
    /// Span of `text`.
    pub span: Span,
    /// Byte offset where the following line starts.
    pub next: usize,
}

impl Token<'_> {
    pub fn is_table_row(&self) -> bool {
        matches!(self.kind, LineKind::TableRow)
    }
}
