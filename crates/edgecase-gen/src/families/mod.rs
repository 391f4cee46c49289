//! Shape template families
//!
//! Each family is a fixed catalog of named recipes over the problem's
//! constraints. Selection is a closed dispatch over [`ShapeKind`]: exactly one
//! family runs per generation.

pub mod array;
pub mod binary_search;
pub mod events;
pub mod graph;
pub mod string;

use crate::case::{RawCase, ShapeKind};
use crate::config::{EngineConfig, GenerationOptions};
use crate::problem::{InputShape, NumericBounds, ProblemDefinition};
use tracing::debug;

pub use array::ArrayFamily;
pub use binary_search::BinarySearchFamily;
pub use events::EventStreamFamily;
pub use graph::GraphFamily;
pub use string::StringFamily;

const GRAPH_TAGS: &[&str] = &["graph", "graphs"];
const EVENT_TAGS: &[&str] = &["events", "event", "streams"];
const STRING_TAGS: &[&str] = &["string", "strings"];
const BINARY_SEARCH_TAGS: &[&str] = &["binary search", "binary-search"];

/// Everything a recipe may read
#[derive(Debug, Clone, Copy)]
pub struct FamilyContext<'a> {
    /// Problem being generated for
    pub problem: &'a ProblemDefinition,
    /// Per-run options
    pub options: &'a GenerationOptions,
    /// Engine configuration
    pub config: &'a EngineConfig,
}

impl<'a> FamilyContext<'a> {
    /// Bundle the generation inputs
    #[must_use]
    pub const fn new(
        problem: &'a ProblemDefinition,
        options: &'a GenerationOptions,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            problem,
            options,
            config,
        }
    }

    /// Resolved sequence bounds
    #[must_use]
    pub fn numeric(&self) -> NumericBounds {
        self.problem
            .constraints
            .numeric_bounds(self.config.max_sequence_len)
    }

    /// Single or multi-test layout
    #[must_use]
    pub const fn input_shape(&self) -> InputShape {
        self.problem.input_shape
    }

    /// Whether PRNG-driven recipes run
    #[must_use]
    pub const fn include_random(&self) -> bool {
        !self.options.exclude_randomness
    }

    /// Base seed
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.options.seed
    }
}

/// A recipe catalog for one shape kind
pub trait Family: Send + Sync {
    /// Shape kind produced
    fn kind(&self) -> ShapeKind;

    /// Produce the raw pool in fixed catalog order
    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase>;
}

/// Strategy for a shape kind
#[must_use]
pub fn family_for(kind: ShapeKind) -> Box<dyn Family> {
    match kind {
        ShapeKind::Array => Box::new(ArrayFamily),
        ShapeKind::String => Box::new(StringFamily),
        ShapeKind::Graph => Box::new(GraphFamily),
        ShapeKind::BinarySearch => Box::new(BinarySearchFamily),
        ShapeKind::Events => Box::new(EventStreamFamily),
    }
}

/// Pick the family for a problem. First match wins:
/// graph, events, string, binary search, array.
///
/// A problem carrying tags for several shapes gets the earliest one in that
/// order; the others are ignored.
#[must_use]
pub fn select_family(problem: &ProblemDefinition) -> ShapeKind {
    let matches: Vec<ShapeKind> = [
        (
            ShapeKind::Graph,
            problem.has_any_tag(GRAPH_TAGS) || problem.constraints.has_graph(),
        ),
        (ShapeKind::Events, problem.has_any_tag(EVENT_TAGS)),
        (ShapeKind::String, problem.has_any_tag(STRING_TAGS)),
        (
            ShapeKind::BinarySearch,
            problem.has_any_tag(BINARY_SEARCH_TAGS),
        ),
    ]
    .into_iter()
    .filter_map(|(kind, hit)| hit.then_some(kind))
    .collect();

    if matches.len() > 1 {
        debug!(?matches, "multiple shape tags present, using the first");
    }
    matches.first().copied().unwrap_or(ShapeKind::Array)
}

/// Whether the problem counts as graph-tagged for quota purposes
#[must_use]
pub fn is_graph_tagged(problem: &ProblemDefinition) -> bool {
    problem.has_any_tag(GRAPH_TAGS)
}

/// `len` copies of `value`
pub(crate) fn filled(len: usize, value: i64) -> Vec<i64> {
    vec![value; len]
}

/// `len` values alternating `even`, `odd`, starting with `even`
pub(crate) fn alternating(len: usize, even: i64, odd: i64) -> Vec<i64> {
    (0..len)
        .map(|i| if i % 2 == 0 { even } else { odd })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Constraints, GraphConstraints};

    fn problem(tags: &[&str]) -> ProblemDefinition {
        ProblemDefinition::new(tags.iter().copied(), Constraints::default())
    }

    #[test]
    fn test_select_default_array() {
        assert_eq!(select_family(&problem(&[])), ShapeKind::Array);
        assert_eq!(select_family(&problem(&["arrays", "math"])), ShapeKind::Array);
    }

    #[test]
    fn test_select_each_family() {
        assert_eq!(select_family(&problem(&["Graphs"])), ShapeKind::Graph);
        assert_eq!(select_family(&problem(&["graph"])), ShapeKind::Graph);
        assert_eq!(select_family(&problem(&["streams"])), ShapeKind::Events);
        assert_eq!(select_family(&problem(&["event"])), ShapeKind::Events);
        assert_eq!(select_family(&problem(&["STRINGS"])), ShapeKind::String);
        assert_eq!(
            select_family(&problem(&["binary search"])),
            ShapeKind::BinarySearch
        );
        assert_eq!(
            select_family(&problem(&["Binary-Search"])),
            ShapeKind::BinarySearch
        );
    }

    #[test]
    fn test_select_priority_order() {
        assert_eq!(
            select_family(&problem(&["string", "graph"])),
            ShapeKind::Graph
        );
        assert_eq!(
            select_family(&problem(&["binary search", "strings"])),
            ShapeKind::String
        );
        assert_eq!(
            select_family(&problem(&["strings", "events"])),
            ShapeKind::Events
        );
    }

    #[test]
    fn test_select_graph_from_constraints() {
        let p = ProblemDefinition::new(
            ["strings"],
            Constraints {
                graph: Some(GraphConstraints {
                    nodes_max: Some(4),
                    ..GraphConstraints::default()
                }),
                ..Constraints::default()
            },
        );
        assert_eq!(select_family(&p), ShapeKind::Graph);
        assert!(!is_graph_tagged(&p));
    }

    #[test]
    fn test_family_for_kind_matches() {
        for kind in ShapeKind::all() {
            assert_eq!(family_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_every_family_produces_its_kind() {
        let p = problem(&[]);
        let opts = GenerationOptions::default();
        let config = EngineConfig::default();
        let ctx = FamilyContext::new(&p, &opts, &config);
        for kind in ShapeKind::all() {
            let pool = family_for(kind).generate(&ctx);
            assert!(!pool.is_empty(), "{kind} produced nothing");
            assert!(pool.iter().all(|c| c.shape_kind == kind));
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(filled(3, 7), vec![7, 7, 7]);
        assert_eq!(alternating(4, 0, 9), vec![0, 9, 0, 9]);
        assert!(alternating(0, 1, 2).is_empty());
    }
}
