//! Line tokenizer.
//!
//! [`tokenize`] splits source text into [`Token`]s, one per line, with byte
//! spans that later diagnostics point at. Both `\n` and `\r\n` terminators
//! are accepted.

use crate::{
    span::Span,
    tokens::{CELL_SEPARATOR, DELIMITER, HEADER_PREFIX, LineKind, Token},
};

/// Split `source` into classified lines.
pub(crate) fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let next = offset + raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        tokens.push(Token {
            kind: classify(line),
            text: line,
            span: Span::new(offset..offset + line.len()),
            next,
        });

        offset = next;
    }

    tokens
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed == DELIMITER {
        LineKind::Delimiter
    } else if let Some(header) = line.strip_prefix(HEADER_PREFIX) {
        LineKind::Header(header.trim())
    } else if trimmed.starts_with(CELL_SEPARATOR) && trimmed.ends_with(CELL_SEPARATOR) {
        LineKind::TableRow
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Plain
    }
}
