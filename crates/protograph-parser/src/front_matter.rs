//! Front matter reader.
//!
//! A document opens with a block of `key: value` lines fenced by `---`
//! delimiters. Blank lines and `#` comments inside the block are skipped.

use log::debug;

use protograph_core::semantic::Metadata;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Spanned,
    tokens::{DELIMITER, LineKind, Token},
};

/// Read the front matter block at the start of `tokens`.
///
/// Returns the metadata, spanning the whole block, and the tokens that follow
/// the closing delimiter.
pub(crate) fn read<'a, 'src>(
    tokens: &'a [Token<'src>],
) -> Result<(Spanned<Metadata>, &'a [Token<'src>]), Diagnostic> {
    let Some((open, rest)) = tokens
        .split_first()
        .filter(|(first, _)| first.kind == LineKind::Delimiter)
    else {
        let diag = Diagnostic::error(format!(
            "document must begin with front matter delimited by `{DELIMITER}`"
        ))
        .with_code(ErrorCode::E001)
        .with_help(format!(
            "start the document with a `{DELIMITER}` line, `key: value` pairs and a closing `{DELIMITER}`"
        ));
        return Err(match tokens.first() {
            Some(first) => diag.with_label(first.span, format!("expected `{DELIMITER}`")),
            None => diag,
        });
    };

    let mut metadata = Metadata::new();

    for (idx, token) in rest.iter().enumerate() {
        if token.kind == LineKind::Delimiter {
            debug!(entries = metadata.len(); "Front matter read");
            let span = open.span.union(token.span);
            return Ok((Spanned::new(metadata, span), &rest[idx + 1..]));
        }

        let line = token.text.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(Diagnostic::error(format!(
                "front matter line `{line}` is missing a `:` separator"
            ))
            .with_code(ErrorCode::E002)
            .with_label(token.span, "expected `key: value`"));
        };

        metadata.insert(key.trim(), value.trim());
    }

    Err(Diagnostic::error("front matter is never closed")
        .with_code(ErrorCode::E003)
        .with_label(open.span, "front matter opened here")
        .with_help(format!("add a closing `{DELIMITER}` line after the metadata")))
}
