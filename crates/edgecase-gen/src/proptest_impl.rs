//! Proptest strategies for property-based testing
//!
//! Random problem definitions and generation options, kept small enough that
//! a full pipeline run per case stays cheap.

use crate::config::{GenerationOptions, Mode};
use crate::problem::{Constraints, GraphConstraints, InputShape, ProblemDefinition};
use proptest::prelude::*;

/// Strategy for tag sets, covering every family trigger
pub fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(
        vec![
            "graph",
            "Graphs",
            "events",
            "strings",
            "binary search",
            "directed",
            "arrays",
            "dp",
        ],
        0..4,
    )
    .prop_map(|tags| tags.into_iter().map(ToString::to_string).collect())
}

/// Strategy for input shapes
pub fn input_shape_strategy() -> impl Strategy<Value = InputShape> {
    prop_oneof![Just(InputShape::Single), Just(InputShape::Multi)]
}

/// Strategy for modes
pub fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Balanced), Just(Mode::Raw)]
}

/// Strategy for graph constraints, including absent and nonsensical bounds
pub fn graph_constraints_strategy() -> impl Strategy<Value = GraphConstraints> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(-1i64..9),
        prop::option::of(-1i64..20),
    )
        .prop_map(|(directed, nodes_max, edges_max)| GraphConstraints {
            directed,
            nodes_max,
            edges_max,
            ..GraphConstraints::default()
        })
}

/// Strategy for a bound: mostly small, sometimes anywhere in `i64`
pub fn bound_strategy(small: std::ops::Range<i64>) -> impl Strategy<Value = i64> {
    prop_oneof![
        3 => small,
        1 => any::<i64>(),
        1 => prop_oneof![Just(i64::MIN), Just(i64::MAX)],
    ]
}

/// Strategy for constraint bags
///
/// Ranges include zero, negative, inverted and extreme bounds. Lengths stay
/// small so each pipeline run is cheap.
pub fn constraints_strategy() -> impl Strategy<Value = Constraints> {
    (
        (
            prop::option::of(-2i64..8),
            prop::option::of(-2i64..12),
            prop::option::of(bound_strategy(-20..20)),
            prop::option::of(bound_strategy(-20..40)),
            any::<bool>(),
        ),
        prop::option::of(graph_constraints_strategy()),
        (
            prop::option::of(-1i64..6),
            prop::option::of(bound_strategy(-1..3000)),
            prop::option::of(bound_strategy(-5..50)),
        ),
    )
        .prop_map(
            |(
                (n_min, n_max, values_min, values_max, allow_negatives),
                graph,
                (max_users, max_bytes, jitter_ms),
            )| Constraints {
                n_min,
                n_max,
                values_min,
                values_max,
                allow_negatives,
                graph,
                max_users,
                max_bytes,
                jitter_ms,
                ..Constraints::default()
            },
        )
}

/// Strategy for complete problem definitions
pub fn problem_strategy() -> impl Strategy<Value = ProblemDefinition> {
    (tags_strategy(), constraints_strategy(), input_shape_strategy()).prop_map(
        |(tags, constraints, shape)| ProblemDefinition::new(tags, constraints).with_input_shape(shape),
    )
}

/// Strategy for generation options
pub fn options_strategy() -> impl Strategy<Value = GenerationOptions> {
    (-5i64..80, any::<u32>(), any::<bool>(), mode_strategy()).prop_map(
        |(count, seed, exclude_randomness, mode)| GenerationOptions {
            count,
            seed,
            exclude_randomness,
            mode,
            include_targets: Vec::new(),
        },
    )
}
