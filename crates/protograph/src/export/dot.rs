//! Graphviz DOT exporter.
//!
//! States become nodes and transitions become edges, in document order.

use log::{debug, info};

use protograph_core::semantic::{DiagramSpec, State, Transition};

use super::{
    Error, Exporter,
    tooltip::{self, StateTooltip, TransitionTooltip},
};
use crate::{config::RenderConfig, palette::Palette};

/// Renders a [`DiagramSpec`] as a DOT `digraph`.
#[derive(Debug)]
pub struct DotExporter<'a> {
    config: &'a RenderConfig,
}

impl<'a> DotExporter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    fn header(&self, spec: &DiagramSpec) -> Vec<String> {
        let font = escape(self.config.font());
        vec![
            format!("digraph {} {{", graph_name(spec.diagram_id())),
            format!("  rankdir={};", self.config.rankdir()),
            format!("  fontname=\"{font}\";"),
            format!(
                "  node [shape=\"{}\", fontname=\"{font}\", style=filled];",
                escape(self.config.node_shape())
            ),
        ]
    }

    fn node(&self, state: &State, palette: &Palette) -> Result<String, Error> {
        let color = palette.color(palette.owner(state.owner()));
        let label = format!("{}\n{}", state.code(), state.name());
        let tooltip = tooltip::to_json(&StateTooltip::new(state))?;

        Ok(format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\", tooltip=\"{}\"];",
            escape(state.code()),
            escape(&label),
            escape(color.as_str()),
            escape(&tooltip)
        ))
    }

    fn edge(&self, transition: &Transition, spec: &DiagramSpec) -> Result<String, Error> {
        let payload = transition
            .command_id()
            .and_then(|id| spec.command(id))
            .map_or("", |command| command.payload());
        let tooltip = tooltip::to_json(&TransitionTooltip::new(transition, payload))?;

        Ok(format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", tooltip=\"{}\"];",
            escape(transition.from()),
            escape(transition.to()),
            escape(&edge_label(transition)),
            escape(&tooltip)
        ))
    }
}

impl Exporter for DotExporter<'_> {
    fn export(&self, spec: &DiagramSpec) -> Result<String, Error> {
        let palette = Palette::for_entities(spec.entities(), self.config).map_err(Error::Render)?;

        let mut lines = self.header(spec);
        for state in spec.states() {
            lines.push(self.node(state, &palette)?);
        }
        for transition in spec.transitions() {
            lines.push(self.edge(transition, spec)?);
        }
        lines.push("}".to_string());

        info!(
            nodes = spec.states().len(),
            edges = spec.transitions().len();
            "Graph description rendered"
        );

        let mut graph = lines.join("\n");
        graph.push('\n');
        Ok(graph)
    }
}

/// Joins the non-empty trigger and message with a line break.
fn edge_label(transition: &Transition) -> String {
    [transition.trigger(), transition.message()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derives an unquoted graph identifier from the diagram id.
fn graph_name(diagram_id: &str) -> String {
    let mut name: String = diagram_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        name.push_str("diagram");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    debug!(diagram_id, name = name.as_str(); "Graph name derived");
    name
}

/// Escapes text for a double-quoted DOT string.
///
/// Every line break style becomes the two-character sequence `\n`.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => {
                chars.next_if_eq(&'\n');
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Every quote must follow an odd run of backslashes.
    fn quotes_are_escaped(escaped: &str) -> bool {
        let mut backslashes = 0;
        for c in escaped.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' if backslashes % 2 == 0 => return false,
                _ => backslashes = 0,
            }
        }
        backslashes % 2 == 0
    }

    proptest! {
        #[test]
        fn escaped_text_is_single_quoted_line(text in "(\\PC|[\r\n\"\\\\])*") {
            let escaped = escape(&text);

            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
            prop_assert!(quotes_are_escaped(&escaped));
        }

        #[test]
        fn graph_name_is_identifier(id in "\\PC{1,20}") {
            let name = graph_name(&id);

            prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
        }
    }
}
