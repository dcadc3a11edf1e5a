//! Section segmenter.
//!
//! The document body is divided by `## <name>` headers. Each header opens a
//! section that runs until the next header; lines before the first header
//! belong to no section and are dropped.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::{
    span::Span,
    tokens::{LineKind, Token},
};

/// Section names with meaning to the diagram generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Entities,
    States,
    Transitions,
    Commands,
    Timing,
    Notes,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Entities,
        SectionKind::States,
        SectionKind::Transitions,
        SectionKind::Commands,
        SectionKind::Timing,
        SectionKind::Notes,
    ];

    /// The lowercase header text naming this section.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Entities => "entities",
            SectionKind::States => "states",
            SectionKind::Transitions => "transitions",
            SectionKind::Commands => "commands",
            SectionKind::Timing => "timing",
            SectionKind::Notes => "notes",
        }
    }

    /// Look up a section kind by its (already lowercased) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, header-delimited region of the document body.
#[derive(Debug, Clone)]
pub struct Section<'src> {
    name: String,
    header: Span,
    lines: Vec<Token<'src>>,
}

impl<'src> Section<'src> {
    /// Lowercased, trimmed header text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The recognized kind, if the name is one of [`SectionKind::ALL`].
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_name(&self.name)
    }

    /// Span of the header line.
    pub fn header_span(&self) -> Span {
        self.header
    }

    /// The section's lines joined by newlines, with surrounding whitespace trimmed.
    pub fn body(&self) -> String {
        self.lines
            .iter()
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    pub(crate) fn lines(&self) -> &[Token<'src>] {
        &self.lines
    }

    fn is_blank(&self) -> bool {
        self.lines
            .iter()
            .all(|token| token.kind == LineKind::Blank)
    }
}

/// Sections of a document body, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Sections<'src> {
    sections: IndexMap<String, Section<'src>>,
}

impl<'src> Sections<'src> {
    /// Look up a section by lowercase name.
    pub fn get(&self, name: &str) -> Option<&Section<'src>> {
        self.sections.get(name)
    }

    /// Look up a recognized section.
    pub fn section(&self, kind: SectionKind) -> Option<&Section<'src>> {
        self.get(kind.name())
    }

    /// The trimmed body text of the section called `name`.
    pub fn body(&self, name: &str) -> Option<String> {
        self.get(name).map(Section::body)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn push(&mut self, section: Section<'src>) {
        if section.name.is_empty() {
            debug!("Dropping section with an empty header");
            return;
        }
        if section.is_blank() {
            debug!(section = section.name; "Dropping empty section");
            return;
        }
        if section.kind().is_none() {
            debug!(section = section.name; "Capturing unrecognized section");
        }
        if let Some(previous) = self.sections.insert(section.name.clone(), section) {
            warn!(section = previous.name; "Section appears more than once; keeping the last one");
        }
    }
}

/// Group body tokens into sections.
pub(crate) fn segment<'src>(tokens: &[Token<'src>]) -> Sections<'src> {
    let mut sections = Sections::default();
    let mut current: Option<Section<'src>> = None;
    let mut preamble = 0usize;

    for token in tokens {
        match token.kind {
            LineKind::Header(name) => {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section {
                    name: name.to_lowercase(),
                    header: token.span,
                    lines: Vec::new(),
                });
            }
            _ => match current.as_mut() {
                Some(section) => section.lines.push(*token),
                None => preamble += 1,
            },
        }
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    if preamble > 0 {
        debug!(lines = preamble; "Ignoring lines before the first section header");
    }

    sections
}
