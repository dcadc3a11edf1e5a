//! Cross-reference validation.
//!
//! Checks that every reference between the parsed tables resolves:
//! state owners to entities (or `ARM`), transition endpoints to state codes
//! and transition messages to command ids. All failures are collected, in
//! the order metadata, owners, endpoints, commands.

use std::collections::HashSet;

use log::debug;

use protograph_core::{
    owner::{ARM_SENTINEL, OwnerRef},
    semantic::{DIAGRAM_KEY, DiagramSpec, is_file_stem},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, FormatError},
    span::Span,
};

/// Where each item of a parsed document was read from.
///
/// Indices line up with the corresponding [`DiagramSpec`] sequences. A
/// document assembled in code has an empty map and its diagnostics carry no
/// labels.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    pub(crate) front_matter: Option<Span>,
    pub(crate) entities: Vec<Span>,
    pub(crate) states: Vec<Span>,
    pub(crate) transitions: Vec<Span>,
    pub(crate) commands: Vec<Span>,
}

impl SourceMap {
    fn entity(&self, idx: usize) -> Option<Span> {
        self.entities.get(idx).copied()
    }

    fn state(&self, idx: usize) -> Option<Span> {
        self.states.get(idx).copied()
    }

    fn transition(&self, idx: usize) -> Option<Span> {
        self.transitions.get(idx).copied()
    }
}

/// Validate a document assembled in code.
///
/// On success returns the warnings found (duplicate ids or codes).
///
/// # Errors
///
/// Returns a [`FormatError`] holding every unresolved reference.
pub fn validate(spec: &DiagramSpec) -> Result<Vec<Diagnostic>, FormatError> {
    validate_with_source(spec, &SourceMap::default())
}

pub(crate) fn validate_with_source(
    spec: &DiagramSpec,
    source_map: &SourceMap,
) -> Result<Vec<Diagnostic>, FormatError> {
    let mut collector = DiagnosticCollector::new();

    check_metadata(spec, source_map, &mut collector);

    let entity_ids = collect_unique(
        spec.entities().iter().map(|entity| entity.id()),
        |idx| source_map.entity(idx),
        "entity",
        &mut collector,
    );
    let state_codes = collect_unique(
        spec.states().iter().map(|state| state.code()),
        |idx| source_map.state(idx),
        "state",
        &mut collector,
    );
    let command_ids: HashSet<&str> = spec.commands().iter().map(|command| command.id()).collect();

    for (idx, state) in spec.states().iter().enumerate() {
        if state.owner().is_empty() {
            continue;
        }
        let owner = OwnerRef::resolve(state.owner(), |id| entity_ids.contains(id));
        if let OwnerRef::Unresolved(name) = owner {
            collector.emit(
                Diagnostic::error(format!(
                    "unknown owner `{name}` for state `{}`",
                    state.code()
                ))
                .with_code(ErrorCode::E201)
                .with_optional_label(source_map.state(idx), "state defined here")
                .with_help(format!(
                    "declare `{name}` in the entities table or use `{ARM_SENTINEL}`"
                )),
            );
        }
    }

    for (idx, transition) in spec.transitions().iter().enumerate() {
        let span = source_map.transition(idx);
        if !state_codes.contains(transition.from()) {
            collector.emit(
                Diagnostic::error(format!(
                    "transition references unknown source state `{}`",
                    transition.from()
                ))
                .with_code(ErrorCode::E202)
                .with_optional_label(span, "transition defined here"),
            );
        }
        if !state_codes.contains(transition.to()) {
            collector.emit(
                Diagnostic::error(format!(
                    "transition references unknown destination state `{}`",
                    transition.to()
                ))
                .with_code(ErrorCode::E203)
                .with_optional_label(span, "transition defined here"),
            );
        }
    }

    for (idx, transition) in spec.transitions().iter().enumerate() {
        let Some(command) = transition.command_id() else {
            continue;
        };
        if !command_ids.contains(command) {
            collector.emit(
                Diagnostic::error(format!(
                    "transition message `{}` references unknown command `{command}`",
                    transition.message()
                ))
                .with_code(ErrorCode::E204)
                .with_optional_label(source_map.transition(idx), "transition defined here")
                .with_help("the first word of a message must be an id from the commands table"),
            );
        }
    }

    let warnings = collector.finish()?;
    debug!(
        entities = entity_ids.len(),
        states = state_codes.len(),
        commands = command_ids.len(),
        warnings = warnings.len();
        "Document validated"
    );
    Ok(warnings)
}

fn check_metadata(spec: &DiagramSpec, source_map: &SourceMap, collector: &mut DiagnosticCollector) {
    let (problem, help) = match spec.metadata().diagram_id() {
        None => (
            "front matter is missing the required `diagram` identifier".to_string(),
            format!("add a `{DIAGRAM_KEY}: <name>` line to the front matter"),
        ),
        Some("") => (
            "front matter `diagram` identifier is empty".to_string(),
            format!("add a `{DIAGRAM_KEY}: <name>` line to the front matter"),
        ),
        Some(id) if !is_file_stem(id) => (
            format!("front matter `diagram` identifier `{id}` cannot name an output file"),
            "use a name without `/`, `\\` or a bare `.`/`..`".to_string(),
        ),
        Some(_) => return,
    };

    collector.emit(
        Diagnostic::error(problem)
            .with_code(ErrorCode::E200)
            .with_optional_label(source_map.front_matter, "front matter defined here")
            .with_help(help),
    );
}

/// Gather `keys` into a set, warning about repeats.
fn collect_unique<'a>(
    keys: impl Iterator<Item = &'a str>,
    span_of: impl Fn(usize) -> Option<Span>,
    what: &str,
    collector: &mut DiagnosticCollector,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for (idx, key) in keys.enumerate() {
        if !seen.insert(key) {
            collector.emit(
                Diagnostic::warning(format!("{what} `{key}` is defined more than once"))
                    .with_optional_label(span_of(idx), "repeated here"),
            );
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use protograph_core::{
        record::Record,
        semantic::{Command, Entity, Metadata, State, Transition},
    };

    use super::*;

    fn entity(id: &str) -> Entity {
        Entity::new(Record::new().with("Id", id))
    }

    fn state(code: &str, owner: &str) -> State {
        State::new(Record::new().with("Code", code).with("Owner", owner))
    }

    fn transition(from: &str, to: &str, message: &str) -> Transition {
        Transition::new(
            Record::new()
                .with("From", from)
                .with("To", to)
                .with("Message", message),
        )
    }

    fn command(id: &str) -> Command {
        Command::new(Record::new().with("Id", id))
    }

    fn spec(
        states: Vec<State>,
        transitions: Vec<Transition>,
        commands: Vec<Command>,
    ) -> DiagramSpec {
        DiagramSpec::new(
            Metadata::new().with("diagram", "demo"),
            vec![entity("ARM1")],
            states,
            transitions,
            commands,
        )
    }

    fn codes(err: &FormatError) -> Vec<ErrorCode> {
        err.diagnostics().iter().filter_map(Diagnostic::code).collect()
    }

    #[test]
    fn test_valid_document() {
        let spec = spec(
            vec![state("S1", "ARM1"), state("S2", "ARM"), state("S3", "")],
            vec![transition("S1", "S2", "CMD1 payload"), transition("S2", "S3", "")],
            vec![command("CMD1")],
        );

        assert!(validate(&spec).unwrap().is_empty());
    }

    #[test]
    fn test_missing_diagram_key() {
        let spec = DiagramSpec::new(Metadata::new(), vec![], vec![], vec![], vec![]);

        let err = validate(&spec).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E200]);
    }

    #[test]
    fn test_empty_diagram_key() {
        let spec = DiagramSpec::new(Metadata::new().with("diagram", ""), vec![], vec![], vec![], vec![]);

        let err = validate(&spec).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_diagram_key_with_path_rejected() {
        for id in ["../escaped", "/tmp/x", "a/b", ".."] {
            let spec = DiagramSpec::new(Metadata::new().with("diagram", id), vec![], vec![], vec![], vec![]);

            let err = validate(&spec).unwrap_err();
            assert_eq!(codes(&err), vec![ErrorCode::E200], "`{id}`");
            assert!(err.to_string().contains("cannot name an output file"));
        }
    }

    #[test]
    fn test_unknown_owner() {
        let spec = spec(vec![state("S1", "HOST")], vec![], vec![]);

        let err = validate(&spec).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E201]);
        assert!(err.to_string().contains("`HOST`"));
    }

    #[test]
    fn test_unknown_source_state_named() {
        let spec = spec(vec![state("S1", "ARM1")], vec![transition("S9", "S1", "")], vec![]);

        let err = validate(&spec).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E202]);
        assert!(err.to_string().contains("`S9`"));
    }

    #[test]
    fn test_unknown_destination_state() {
        let spec = spec(vec![state("S1", "ARM1")], vec![transition("S1", "S7", "")], vec![]);

        let err = validate(&spec).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E203]);
    }

    #[test]
    fn test_unknown_command() {
        let spec = spec(
            vec![state("S1", "ARM1")],
            vec![transition("S1", "S1", "PING now")],
            vec![command("PONG")],
        );

        let err = validate(&spec).unwrap_err();
        assert_eq!(codes(&err), vec![ErrorCode::E204]);
        assert!(err.to_string().contains("`PING`"));
    }

    #[test]
    fn test_failures_collected_in_order() {
        let spec = DiagramSpec::new(
            Metadata::new(),
            vec![],
            vec![state("S1", "HOST")],
            vec![transition("S0", "S9", "PING")],
            vec![],
        );

        let err = validate(&spec).unwrap_err();
        assert_eq!(
            codes(&err),
            vec![
                ErrorCode::E200,
                ErrorCode::E201,
                ErrorCode::E202,
                ErrorCode::E203,
                ErrorCode::E204,
            ]
        );
    }

    #[test]
    fn test_duplicate_state_is_warning() {
        let spec = spec(vec![state("S1", "ARM1"), state("S1", "ARM")], vec![], vec![]);

        let warnings = validate(&spec).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].severity().is_warning());
    }

    #[test]
    fn test_labels_follow_source_map() {
        let spec = spec(vec![state("S1", "HOST")], vec![], vec![]);
        let source_map = SourceMap {
            states: vec![Span::new(40..60)],
            ..SourceMap::default()
        };

        let err = validate_with_source(&spec, &source_map).unwrap_err();
        let labels = err.diagnostics()[0].labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].span(), Span::new(40..60));
    }
}
