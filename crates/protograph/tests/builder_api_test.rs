//! Integration tests for the DiagramBuilder API

use proptest::prelude::*;

use protograph::{
    DiagramBuilder, ProtographError, RenderOutcome,
    config::{AppConfig, OutputConfig, RenderConfig},
};

const DEMO: &str = "\
---
diagram: demo
---

## Entities
| Id | Name |
|----|------|
| ARM1 | Main core |

## States
| Code | Owner | Name |
|------|-------|------|
| S1 | ARM1 | Idle |
| S2 | ARM | Busy |

## Transitions
| From | To | Message |
|------|----|---------|
| S1 | S2 | CMD1 payload |

## Commands
| Id | Payload |
|----|---------|
| CMD1 | ping |
";

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_end_to_end_scenario() {
    let builder = DiagramBuilder::default();
    let spec = builder.parse(DEMO).expect("Failed to parse");
    let dot = builder.render_dot(&spec).expect("Failed to render");

    assert!(dot.contains("\"S1\" ["));
    assert!(dot.contains("\"S2\" ["));
    assert_eq!(dot.matches(" -> ").count(), 1);
    assert!(dot.contains("\"S1\" -> \"S2\""));
    assert!(dot.contains("\\\"message\\\": \\\"CMD1 payload\\\""));
    assert!(dot.contains("\\\"payload\\\": \\\"ping\\\""));
}

#[test]
fn test_write_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::new(
        RenderConfig::default(),
        OutputConfig::new("dot", "protograph-missing-renderer"),
    );
    let builder = DiagramBuilder::new(config);

    let spec = builder.parse(DEMO).unwrap();
    let dot = builder.render_dot(&spec).unwrap();
    let out_dir = dir.path().join("output");
    let report = builder.write(&spec, &dot, &out_dir, "svg").unwrap();

    assert_eq!(report.graph_path(), out_dir.join("demo.dot"));
    assert_eq!(std::fs::read_to_string(report.graph_path()).unwrap(), dot);
    assert_eq!(report.outcome(), &RenderOutcome::RendererMissing);
}

#[test]
fn test_parse_invalid_returns_format_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse("no front matter here");

    assert!(matches!(result, Err(ProtographError::Format { .. })));
}

#[test]
fn test_unknown_owner_rejected() {
    let source = DEMO.replace("| S2 | ARM | Busy |", "| S2 | GHOST | Busy |");
    let builder = DiagramBuilder::default();

    let err = builder.parse(&source).unwrap_err();
    assert!(err.to_string().contains("E201"), "{err}");
}

#[test]
fn test_validate_programmatic_spec() {
    let builder = DiagramBuilder::default();
    let spec = builder.parse(DEMO).unwrap();

    assert!(builder.validate(&spec).is_ok());
    assert!(
        builder
            .validate(&protograph::semantic::DiagramSpec::default())
            .is_err()
    );
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse(DEMO).unwrap();
    let second = builder
        .parse(&DEMO.replace("diagram: demo", "diagram: other"))
        .unwrap();

    let dot1 = builder.render_dot(&first).unwrap();
    let dot2 = builder.render_dot(&second).unwrap();
    assert!(dot1.starts_with("digraph demo {"));
    assert!(dot2.starts_with("digraph other {"));
}

/// Builds a chain document with `count` states and `count - 1` transitions.
fn chain_document(owners: &[usize]) -> String {
    let mut doc = String::from("---\ndiagram: chain\n---\n\n## Entities\n| Id |\n|----|\n");
    doc.push_str("| E0..3 |\n\n## States\n| Code | Owner | Name |\n|---|---|---|\n");
    for (i, owner) in owners.iter().enumerate() {
        let owner = match owner {
            4 => "ARM".to_string(),
            n => format!("E{n}"),
        };
        doc.push_str(&format!("| S{i} | {owner} | state {i} |\n"));
    }
    doc.push_str("\n## Transitions\n| From | To | Trigger |\n|---|---|---|\n");
    for i in 1..owners.len() {
        doc.push_str(&format!("| S{} | S{i} | step |\n", i - 1));
    }
    doc
}

fn check_render_is_deterministic(owners: &[usize]) -> Result<(), TestCaseError> {
    let doc = chain_document(owners);
    let builder = DiagramBuilder::default();

    let first = builder
        .parse(&doc)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let second = builder
        .parse(&doc)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let dot1 = builder
        .render_dot(&first)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let dot2 = builder
        .render_dot(&second)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    prop_assert_eq!(&dot1, &dot2);
    prop_assert_eq!(dot1.matches("fillcolor=").count(), owners.len());
    prop_assert_eq!(dot1.matches(" -> ").count(), owners.len() - 1);
    Ok(())
}

proptest! {
    #[test]
    fn render_is_deterministic(owners in prop::collection::vec(0usize..5, 1..12)) {
        check_render_is_deterministic(&owners)?;
    }
}
