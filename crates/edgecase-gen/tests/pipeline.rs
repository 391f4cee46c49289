//! Integration tests for edgecase-gen
//!
//! Runs the public API end to end: problem document in, curated suite out.

use edgecase_gen::{
    CaseLike, Constraints, Engine, EngineConfig, GeneratedCase, GenerationOptions, GraphConstraints,
    InputShape, Mode, ProblemDefinition, RawCase, ShapeKind, canonicalize, canonicalize_payload, dedup,
    enrich, generate, retain_unsaved, select_family,
};
use std::collections::HashSet;

fn array_problem() -> ProblemDefinition {
    ProblemDefinition::new(
        Vec::<String>::new(),
        Constraints {
            n_min: Some(3),
            n_max: Some(5),
            values_min: Some(0),
            values_max: Some(10),
            ..Constraints::default()
        },
    )
}

fn graph_problem(nodes_max: i64) -> ProblemDefinition {
    ProblemDefinition::new(
        ["graph"],
        Constraints {
            graph: Some(GraphConstraints {
                nodes_max: Some(nodes_max),
                ..GraphConstraints::default()
            }),
            ..Constraints::default()
        },
    )
}

fn named<'a>(cases: &'a [GeneratedCase], name: &str) -> &'a GeneratedCase {
    cases
        .iter()
        .find(|c| c.template_name == name)
        .unwrap_or_else(|| panic!("missing case {name}"))
}

#[test]
fn test_array_raw_scenario() {
    let options = GenerationOptions::default()
        .with_count(5)
        .with_seed(42)
        .with_mode(Mode::Raw);
    let cases = generate(&array_problem(), &options);

    assert_eq!(named(&cases, "Min size").content, "3\n0 0 0");
    // Zeros, same-min and outlier collapse onto earlier cases
    assert_eq!(cases.len(), 9);
    assert_eq!(named(&cases, "Random uniform").content, "4\n2 0 6 2");
}

#[test]
fn test_array_balanced_selection() {
    let options = GenerationOptions::default().with_count(5).with_seed(42);
    let cases = generate(&array_problem(), &options);
    let names: Vec<&str> = cases.iter().map(|c| c.template_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Min size",
            "Small size",
            "All same max",
            "Alternating min/max",
            "Near max",
        ]
    );
    let categories: Vec<&str> = cases.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(
        categories,
        vec!["boundary", "boundary", "duplicates", "ordering", "performance"]
    );
}

#[test]
fn test_graph_scenario() {
    let cases = generate(&graph_problem(4), &GenerationOptions::default());
    assert_eq!(named(&cases, "Two nodes one edge").content, "2 1\n1 2");
    let tree = named(&cases, "Tree");
    assert_eq!(tree.params["M"], tree.params["N"] - 1);
}

#[test]
fn test_graph_categories_lead_with_degenerate() {
    let cases = generate(&graph_problem(5), &GenerationOptions::default());
    assert_eq!(cases.len(), 5);
    assert_eq!(cases[0].category, "degenerate");
    assert!(cases.iter().any(|c| c.category == "connectivity"));
}

#[test]
fn test_binary_search_target_first() {
    let problem = ProblemDefinition::new(
        ["binary search"],
        Constraints {
            n_min: Some(4),
            values_min: Some(5),
            values_max: Some(50),
            ..Constraints::default()
        },
    );
    let options = GenerationOptions::default().with_mode(Mode::Raw);
    let cases = generate(&problem, &options);
    let case = named(&cases, "Target at first");
    let lines: Vec<&str> = case.content.lines().collect();
    assert_eq!(lines[1].split_whitespace().next(), Some(lines[2]));
}

#[test]
fn test_curation_determinism() {
    let problem = graph_problem(5);
    let options = GenerationOptions::default().with_count(7).with_seed(99);
    let keys = |cases: Vec<GeneratedCase>| -> Vec<String> {
        cases.into_iter().map(|c| c.canonical_key).collect()
    };
    assert_eq!(
        keys(generate(&problem, &options)),
        keys(generate(&problem, &options))
    );
}

#[test]
fn test_full_output_byte_identical() {
    let problem = ProblemDefinition::new(["events"], Constraints::default());
    let options = GenerationOptions::default();
    let a = serde_json::to_string(&generate(&problem, &options)).expect("serialize");
    let b = serde_json::to_string(&generate(&problem, &options)).expect("serialize");
    assert_eq!(a, b);
}

#[test]
fn test_event_stream_suite() {
    let problem = ProblemDefinition::new(
        ["streams"],
        Constraints {
            max_users: Some(2),
            max_bytes: Some(100),
            ..Constraints::default()
        },
    );
    let options = GenerationOptions::default().with_mode(Mode::Raw);
    let cases = generate(&problem, &options);
    assert!(cases.iter().all(|c| c.template_id.starts_with("events:")));
    let budget = named(&cases, "Byte budget overflow");
    assert_eq!(budget.params["bytes"], 101);
    assert_eq!(named(&cases, "Multi-user interleaving").params["users"], 2);
}

#[test]
fn test_stored_payload_keys_match_generated() {
    let problem = graph_problem(5);
    let cases = generate(&problem, &GenerationOptions::default());
    let kind = select_family(&problem);
    for case in &cases {
        let stored = CaseLike {
            shape_kind: kind.to_string(),
            content: case.content.clone(),
            params: case.params.clone(),
        };
        assert_eq!(
            canonicalize_payload(&stored, &problem.tags).key,
            case.canonical_key
        );
    }
}

#[test]
fn test_save_boundary_skips_known_keys() {
    let cases = generate(&array_problem(), &GenerationOptions::default());
    let stored: HashSet<String> = cases
        .iter()
        .filter(|c| c.category == "boundary")
        .map(|c| c.canonical_key.clone())
        .collect();
    let fresh = retain_unsaved(cases.clone(), &stored);
    assert!(fresh.iter().all(|c| c.category != "boundary"));
    assert_eq!(fresh.len() + stored.len(), cases.len());
}

#[test]
fn test_manual_case_flows_through() {
    let manual = RawCase::manual("Hand typed zeros", ShapeKind::Array, "3\n0   0 0", Some("Edge"));
    let generated = canonicalize(
        &RawCase::manual("other", ShapeKind::Array, "0 0 0", None),
        &[],
    );
    assert_eq!(canonicalize(&manual, &[]).key, generated.key);

    let unique = dedup(vec![manual], &[]);
    let enriched = enrich(unique.into_iter().next().expect("one case"));
    assert_eq!(enriched.category, "edge");
    assert_eq!(enriched.case.explain, "Hand typed zeros");
}

#[test]
fn test_multi_shape_from_document() {
    let json = r#"{
        "title": "Sum of array",
        "tags": ["arrays"],
        "inputShape": "multi",
        "constraints": {"n_min": 2, "values_min": 1, "values_max": 3}
    }"#;
    let problem = ProblemDefinition::from_json_str(json).expect("parse");
    assert_eq!(problem.input_shape, InputShape::Multi);

    let options = GenerationOptions::default().with_mode(Mode::Raw);
    let multi = generate(&problem, &options);
    assert_eq!(named(&multi, "Min size").content, "1\n2\n1 1");

    let single = generate(&problem.clone().with_input_shape(InputShape::Single), &options);
    let multi_keys: Vec<&str> = multi.iter().map(|c| c.canonical_key.as_str()).collect();
    let single_keys: Vec<&str> = single.iter().map(|c| c.canonical_key.as_str()).collect();
    assert_eq!(multi_keys, single_keys);
}

#[test]
fn test_engine_config_from_yaml() {
    let config = EngineConfig::from_yaml_str(
        "max_output: 3\ncategory_priority: [performance, boundary, core]\n",
    )
    .expect("parse");
    let engine = Engine::new(config);
    let cases = engine.generate(&array_problem(), &GenerationOptions::default());
    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0].category, "performance");
}

#[test]
fn test_extreme_constraints_generate() {
    let wide = ProblemDefinition::new(
        ["arrays"],
        Constraints {
            values_min: Some(-5_000_000_000_000_000_000),
            values_max: Some(5_000_000_000_000_000_000),
            ..Constraints::default()
        },
    );
    let cases = generate(&wide, &GenerationOptions::default().with_mode(Mode::Raw));
    assert!(!cases.is_empty());

    let jittery = ProblemDefinition::new(
        ["events"],
        Constraints {
            jitter_ms: Some(i64::MAX),
            ..Constraints::default()
        },
    );
    assert!(!generate(&jittery, &GenerationOptions::default()).is_empty());

    let json = r#"{"tags":["events"],"constraints":{"max_bytes":9223372036854775807}}"#;
    let problem = ProblemDefinition::from_json_str(json).expect("parse");
    let cases = generate(&problem, &GenerationOptions::default().with_mode(Mode::Raw));
    assert_eq!(named(&cases, "Byte budget overflow").params["bytes"], i64::MAX);
}
