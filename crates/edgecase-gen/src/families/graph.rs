//! Graph family
//!
//! Small graphs over nodes `1..=N` aimed at connectivity assumptions. The
//! node count is capped by `EngineConfig::graph_node_cap` and by
//! `constraints.graph.nodes_max`.

use super::{Family, FamilyContext};
use crate::case::{Payload, RawCase, ShapeKind};

/// Recipes over small graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphFamily;

impl Family for GraphFamily {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Graph
    }

    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase> {
        let b = ctx
            .problem
            .constraints
            .graph_bounds(ctx.config.graph_node_cap, ctx.problem.is_directed());
        let shape = ctx.input_shape();
        let mk = |slug: &str,
                  name: &str,
                  nodes: usize,
                  edges: Vec<(usize, usize)>,
                  targets: &[&str]| {
            let payload = Payload::Graph {
                nodes,
                edges,
                directed: b.directed,
            };
            RawCase::from_payload(slug, name, targets, payload, shape)
        };

        let mut cases = vec![mk("single-node", "Single node", 1, Vec::new(), &["degenerate"])];

        if b.nodes >= 2 {
            cases.push(mk(
                "two-nodes",
                "Two nodes one edge",
                2,
                vec![(1, 2)],
                &["connectivity"],
            ));
        }
        if b.nodes >= 4 {
            cases.push(mk(
                "disconnected",
                "Disconnected components",
                4,
                vec![(1, 2), (3, 4)],
                &["connectivity"],
            ));
        }

        let tree = (2..=b.nodes).map(|i| (i - 1, i)).collect();
        cases.push(mk("tree", "Tree", b.nodes, tree, &["tree", "n-1"]));

        let dense: Vec<(usize, usize)> = (1..=b.nodes)
            .flat_map(|i| ((i + 1)..=b.nodes).map(move |j| (i, j)))
            .take(b.edges_max)
            .collect();
        cases.push(mk("dense", "Dense graph", b.nodes, dense, &["performance"]));

        cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, GenerationOptions};
    use crate::problem::{Constraints, GraphConstraints, ProblemDefinition};

    fn run(graph: GraphConstraints, config: &EngineConfig) -> Vec<RawCase> {
        let problem = ProblemDefinition::new(
            ["graph"],
            Constraints {
                graph: Some(graph),
                ..Constraints::default()
            },
        );
        let options = GenerationOptions::default();
        GraphFamily.generate(&FamilyContext::new(&problem, &options, config))
    }

    fn nodes_max(n: i64) -> GraphConstraints {
        GraphConstraints {
            nodes_max: Some(n),
            ..GraphConstraints::default()
        }
    }

    fn find<'a>(cases: &'a [RawCase], name: &str) -> &'a RawCase {
        cases
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing case {name}"))
    }

    #[test]
    fn test_two_nodes_one_edge() {
        let cases = run(nodes_max(4), &EngineConfig::default());
        assert_eq!(find(&cases, "Two nodes one edge").content, "2 1\n1 2");
    }

    #[test]
    fn test_single_node() {
        let cases = run(nodes_max(4), &EngineConfig::default());
        assert_eq!(find(&cases, "Single node").content, "1 0");
    }

    #[test]
    fn test_tree_has_n_minus_one_edges() {
        for n in 1..=8 {
            let cases = run(nodes_max(n), &EngineConfig::default());
            let tree = find(&cases, "Tree");
            let nodes = tree.params["N"];
            assert_eq!(tree.params["M"], nodes - 1);
        }
    }

    #[test]
    fn test_tree_is_path() {
        let cases = run(nodes_max(4), &EngineConfig::default());
        assert_eq!(find(&cases, "Tree").content, "4 3\n1 2\n2 3\n3 4");
    }

    #[test]
    fn test_dense_truncated() {
        let graph = GraphConstraints {
            nodes_max: Some(4),
            edges_max: Some(4),
            ..GraphConstraints::default()
        };
        let cases = run(graph, &EngineConfig::default());
        assert_eq!(
            find(&cases, "Dense graph").content,
            "4 4\n1 2\n1 3\n1 4\n2 3"
        );
    }

    #[test]
    fn test_dense_complete_by_default() {
        let cases = run(GraphConstraints::default(), &EngineConfig::default());
        let dense = find(&cases, "Dense graph");
        assert_eq!(dense.params["N"], 5);
        assert_eq!(dense.params["M"], 10);
    }

    #[test]
    fn test_node_cap_override() {
        let config = EngineConfig {
            graph_node_cap: 7,
            ..EngineConfig::default()
        };
        let cases = run(nodes_max(20), &config);
        assert_eq!(find(&cases, "Tree").params["N"], 7);
    }

    #[test]
    fn test_small_cap_skips_larger_recipes() {
        let cases = run(nodes_max(1), &EngineConfig::default());
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Single node", "Tree", "Dense graph"]);
    }

    #[test]
    fn test_directed_flag_in_params() {
        let graph = GraphConstraints {
            directed: Some(true),
            ..GraphConstraints::default()
        };
        let cases = run(graph, &EngineConfig::default());
        assert!(cases.iter().all(|c| c.params["directed"] == 1));
    }
}
