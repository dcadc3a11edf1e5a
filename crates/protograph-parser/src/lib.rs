//! # Protograph Parser
//!
//! Parser for Markdown protocol state specifications. A specification is a
//! Markdown document with a `---` fenced front matter block followed by
//! `## <name>` sections holding pipe tables of entities, states, transitions
//! and commands.
//!
//! ## Usage
//!
//! ```
//! # use protograph_parser::{parse, FormatError};
//!
//! fn main() -> Result<(), FormatError> {
//!     let source = "\
//! ---
//! diagram: demo
//! ---
//! ## States
//! | Code | Owner | Name | Role | Description |
//! |------|-------|------|------|-------------|
//! | S1   | ARM   | Idle | host | waiting     |
//! ";
//!
//!     let spec = parse(source)?;
//!     assert_eq!(spec.states().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod expand;
mod front_matter;
mod lexer;
mod sections;
mod span;
mod table;
mod tokens;
mod validate;

pub use error::FormatError;
pub use expand::{MAX_RANGE_LEN, RangeError, expand_id};
pub use sections::{Section, SectionKind, Sections};
pub use span::{Span, Spanned};
pub use validate::{SourceMap, validate};

use log::{debug, info, warn};

use protograph_core::{
    record::Record,
    semantic::{Command, DiagramSpec, Entity, Metadata, State, Transition},
};

use error::{Diagnostic, ErrorCode};
use table::Table;

/// A parsed document together with where its items came from.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    spec: DiagramSpec,
    source_map: SourceMap,
}

impl ParsedDocument {
    pub fn spec(&self) -> &DiagramSpec {
        &self.spec
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn into_spec(self) -> DiagramSpec {
        self.spec
    }
}

/// Parse and validate a specification document.
///
/// Runs the whole pipeline:
///
/// 1. **Tokenize** - Classify every line
/// 2. **Front matter** - Read the `---` fenced metadata block
/// 3. **Segment** - Group the remaining lines into `## ` sections
/// 4. **Decode** - Read each structural section's table and expand entity ranges
/// 5. **Validate** - Resolve owners, states and commands
///
/// Warnings found during validation are logged.
///
/// # Errors
///
/// Returns a [`FormatError`] for the first malformed construct met while
/// decoding, or for every unresolved reference found by validation.
pub fn parse(source: &str) -> Result<DiagramSpec, FormatError> {
    parse_document(source).map(ParsedDocument::into_spec)
}

/// Like [`parse`], but keeps the [`SourceMap`].
///
/// # Errors
///
/// See [`parse`].
pub fn parse_document(source: &str) -> Result<ParsedDocument, FormatError> {
    info!(bytes = source.len(); "Parsing specification");

    let tokens = lexer::tokenize(source);
    let (metadata, body) = front_matter::read(&tokens)?;
    let sections = sections::segment(body);
    debug!(sections = sections.len(); "Body segmented");

    let mut source_map = SourceMap {
        front_matter: Some(metadata.span()),
        ..SourceMap::default()
    };

    let entities = decode_section(&sections, SectionKind::Entities, &[Entity::ID])?;
    let entities = expand_entities(entities)?;
    let states = decode_section(&sections, SectionKind::States, &[State::CODE])?;
    let transitions = decode_section(
        &sections,
        SectionKind::Transitions,
        &[Transition::FROM, Transition::TO],
    )?;
    let commands = decode_section(&sections, SectionKind::Commands, &[Command::ID])?;

    let spec = DiagramSpec::new(
        metadata.into_inner(),
        unzip_into(entities, &mut source_map.entities, Entity::new),
        unzip_into(states, &mut source_map.states, State::new),
        unzip_into(transitions, &mut source_map.transitions, Transition::new),
        unzip_into(commands, &mut source_map.commands, Command::new),
    );

    let warnings = validate::validate_with_source(&spec, &source_map)?;
    for warning in &warnings {
        warn!("{warning}");
    }

    info!(
        diagram = spec.diagram_id(),
        entities = spec.entities().len(),
        states = spec.states().len(),
        transitions = spec.transitions().len(),
        commands = spec.commands().len();
        "Specification parsed"
    );

    Ok(ParsedDocument { spec, source_map })
}

/// Interpret raw document bytes as UTF-8 text.
///
/// The diagnostic's label points at the first invalid byte as it appears in
/// a lossy decoding of `bytes`, where it is replaced by `U+FFFD`.
///
/// # Errors
///
/// Returns a [`FormatError`] with code E004 if `bytes` is not valid UTF-8.
pub fn decode_source(bytes: &[u8]) -> Result<&str, FormatError> {
    std::str::from_utf8(bytes).map_err(|err| {
        let at = err.valid_up_to();
        let marker = Span::new(at..at + char::REPLACEMENT_CHARACTER.len_utf8());
        Diagnostic::error(format!("document is not valid UTF-8 (invalid byte at offset {at})"))
            .with_code(ErrorCode::E004)
            .with_label(marker, "invalid byte here")
            .with_help("save the document with UTF-8 encoding")
            .into()
    })
}

/// Read the front matter of `source`.
///
/// Returns the metadata and the text following the closing delimiter.
///
/// # Errors
///
/// Returns a [`FormatError`] if the document does not open with `---`, a
/// metadata line has no `:`, or the block is never closed.
pub fn read_front_matter(source: &str) -> Result<(Metadata, &str), FormatError> {
    let tokens = lexer::tokenize(source);
    let (metadata, body) = front_matter::read(&tokens)?;
    let rest = body.first().map_or("", |token| &source[token.span.start()..]);
    Ok((metadata.into_inner(), rest))
}

/// Split a document body into named sections.
pub fn segment_sections(body: &str) -> Sections<'_> {
    sections::segment(&lexer::tokenize(body))
}

/// Decode the pipe table in a section body into records.
///
/// Returns an empty list when the text holds fewer than two table lines.
///
/// # Errors
///
/// Returns a [`FormatError`] if a data row's cell count differs from the
/// header's.
///
/// # Examples
///
/// ```
/// use protograph_parser::parse_table;
///
/// let records = parse_table("| A | B |\n| - | - |\n| 1 | 2 |").unwrap();
/// assert_eq!(records[0].get("A"), Some("1"));
/// assert!(parse_table("| A | B |\n| - | - |\n| 1 |").is_err());
/// ```
pub fn parse_table(text: &str) -> Result<Vec<Record>, FormatError> {
    let rows = table::decode(&lexer::tokenize(text))?
        .map(Table::into_rows)
        .unwrap_or_default();
    Ok(rows.into_iter().map(Spanned::into_inner).collect())
}

fn decode_section(
    sections: &Sections<'_>,
    kind: SectionKind,
    required: &[&str],
) -> Result<Vec<Spanned<Record>>, Diagnostic> {
    let Some(section) = sections.section(kind) else {
        debug!(section = kind.name(); "Section absent");
        return Ok(Vec::new());
    };
    let Some(table) = table::decode(section.lines())? else {
        debug!(section = kind.name(); "Section has no table");
        return Ok(Vec::new());
    };

    table.require(kind, required)?;
    debug!(section = kind.name(), rows = table.rows().len(); "Table decoded");
    Ok(table.into_rows())
}

/// Replace each entity row by one row per id its shorthand expands to.
fn expand_entities(rows: Vec<Spanned<Record>>) -> Result<Vec<Spanned<Record>>, Diagnostic> {
    let mut expanded = Vec::with_capacity(rows.len());

    for row in rows {
        let span = row.span();
        let record = row.into_inner();
        let ids = expand_id(record.field(Entity::ID)).map_err(|err| {
            Diagnostic::error(err.to_string())
                .with_code(ErrorCode::E101)
                .with_label(span, "entity defined here")
                .with_help("write ranges as `<prefix><start>..<end>` with start <= end")
        })?;

        if ids.len() > 1 {
            debug!(id = record.field(Entity::ID), count = ids.len(); "Expanded entity range");
        }

        for id in ids {
            let mut copy = record.clone();
            copy.set(Entity::ID, id);
            expanded.push(Spanned::new(copy, span));
        }
    }

    Ok(expanded)
}

fn unzip_into<T>(rows: Vec<Spanned<Record>>, spans: &mut Vec<Span>, wrap: fn(Record) -> T) -> Vec<T> {
    rows.into_iter()
        .map(|row| {
            spans.push(row.span());
            wrap(row.into_inner())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "\
---
diagram: demo
---
## Entities
| Id | Kind |
|----|------|
| ARM1 | controller |

## States
| Code | Owner | Name | Role | Description |
|------|-------|------|------|-------------|
| S1 | ARM1 | Idle | host | waiting |
| S2 | ARM | Busy | host | working |

## Transitions
| From | To | Message | Trigger | Notes |
|------|----|---------|---------|-------|
| S1 | S2 | CMD1 payload | button | first |

## Commands
| Id | Payload |
|----|---------|
| CMD1 | {\"x\":1} |
";

    #[test]
    fn test_parse_demo() {
        let spec = parse(DEMO).unwrap();

        assert_eq!(spec.diagram_id(), "demo");
        assert_eq!(spec.entities().len(), 1);
        assert_eq!(spec.states().len(), 2);
        assert_eq!(spec.transitions()[0].message(), "CMD1 payload");
        assert_eq!(spec.commands()[0].payload(), "{\"x\":1}");
    }

    #[test]
    fn test_source_map_points_at_rows() {
        let document = parse_document(DEMO).unwrap();

        let span = document.source_map().states[1];
        assert!(DEMO[span.start()..span.end()].contains("| S2 | ARM |"));
        assert_eq!(document.source_map().transitions.len(), 1);
    }

    #[test]
    fn test_entity_ranges_expand_with_fields() {
        let source = "---\ndiagram: d\n---\n## entities\n| Id | Kind |\n|--|--|\n| NODE1..3 | esp |\n";

        let spec = parse(source).unwrap();
        let ids: Vec<_> = spec.entities().iter().map(Entity::id).collect();
        assert_eq!(ids, vec!["NODE1", "NODE2", "NODE3"]);
        assert!(spec.entities().iter().all(|e| e.record().field("Kind") == "esp"));
    }

    #[test]
    fn test_invalid_range_is_format_error() {
        let source = "---\ndiagram: d\n---\n## entities\n| Id |\n|--|\n| NODE3..1 |\n";

        let err = parse(source).unwrap_err();
        assert!(err.has_code(ErrorCode::E101));
        assert!(err.to_string().contains("NODE3..1"));
    }

    #[test]
    fn test_decode_source() {
        assert_eq!(decode_source(b"---\n").unwrap(), "---\n");

        let err = decode_source(b"---\ndiagram: d\xff\n").unwrap_err();
        assert!(err.has_code(ErrorCode::E004));
        let label = err.primary().unwrap().labels()[0].span();
        assert_eq!(label, Span::new(14..17));
    }

    #[test]
    fn test_huge_range_is_format_error() {
        let source = "---\ndiagram: d\n---\n## entities\n| Id |\n|--|\n| N0..18446744073709551615 |\n";

        let err = parse(source).unwrap_err();
        assert!(err.has_code(ErrorCode::E101));
    }

    #[test]
    fn test_missing_front_matter_fails_first() {
        let source = "## states\n| Code |\n|--|\n| S1 | extra |\n";

        let err = parse(source).unwrap_err();
        assert!(err.has_code(ErrorCode::E001));
        assert!(!err.has_code(ErrorCode::E100));
    }

    #[test]
    fn test_missing_required_column() {
        let source = "---\ndiagram: d\n---\n## transitions\n| From | Message |\n|--|--|\n| S1 | x |\n";

        let err = parse(source).unwrap_err();
        assert!(err.has_code(ErrorCode::E102));
        assert!(err.to_string().contains("`To`"));
    }

    #[test]
    fn test_document_without_tables() {
        let spec = parse("---\ndiagram: empty\n---\n## notes\nnothing to see\n").unwrap();

        assert!(spec.states().is_empty());
        assert!(spec.transitions().is_empty());
    }

    #[test]
    fn test_read_front_matter_returns_rest() {
        let (metadata, rest) = read_front_matter("---\ndiagram: d\n---\n## notes\nhi\n").unwrap();

        assert_eq!(metadata.diagram_id(), Some("d"));
        assert_eq!(rest, "## notes\nhi\n");
    }

    #[test]
    fn test_segment_sections_public() {
        let sections = segment_sections("## Timing\n100ms poll\n");
        assert_eq!(sections.body("timing").as_deref(), Some("100ms poll"));
    }

    #[test]
    fn test_parse_table_mismatch() {
        let err = parse_table("| A | B |\n| - | - |\n| 1 |").unwrap_err();
        assert!(err.has_code(ErrorCode::E100));
    }

    #[test]
    fn test_crlf_document() {
        let source = DEMO.replace('\n', "\r\n");
        let spec = parse(&source).unwrap();

        assert_eq!(spec.states()[1].description(), "working");
    }
}
