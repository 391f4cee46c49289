//! Problem definitions
//!
//! The problem document as the storage layer hands it over. Every field is
//! optional on the wire; the `*_bounds` accessors resolve absent or
//! contradictory values into concrete bounds without ever failing.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many test cases a single input file carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputShape {
    /// One test per file
    #[default]
    Single,
    /// A leading test-count line followed by the tests
    Multi,
}

/// Graph constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConstraints {
    /// Edges are ordered pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
    /// Edges carry weights (carried, not generated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted: Option<bool>,
    /// Upper bound on node count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_max: Option<i64>,
    /// Upper bound on edge count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_max: Option<i64>,
    /// Self loops permitted (carried, not generated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_self_loops: Option<bool>,
    /// Parallel edges permitted (carried, not generated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multi_edges: Option<bool>,
}

impl GraphConstraints {
    /// True when no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.directed.is_none()
            && self.weighted.is_none()
            && self.nodes_max.is_none()
            && self.edges_max.is_none()
            && self.allow_self_loops.is_none()
            && self.allow_multi_edges.is_none()
    }
}

/// Shape-dependent constraint bag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Minimum sequence length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_min: Option<i64>,
    /// Maximum sequence length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_max: Option<i64>,
    /// Smallest element value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_min: Option<i64>,
    /// Largest element value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_max: Option<i64>,
    /// Whether negative values are legal
    pub allow_negatives: bool,
    /// Whether repeated values are legal (carried, not generated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_duplicates: Option<bool>,
    /// Whether input arrives sorted (carried, not generated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted_input: Option<bool>,
    /// Minimum number of tests in a multi-test file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_min: Option<i64>,
    /// Maximum number of tests in a multi-test file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_max: Option<i64>,
    /// Bound on the total length across tests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_n_max: Option<i64>,
    /// Graph constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphConstraints>,
    /// Distinct users in an event stream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_users: Option<i64>,
    /// Byte budget of the consumer under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<i64>,
    /// Maximum extra delay added to inter-arrival gaps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter_ms: Option<i64>,
}

/// Resolved sequence bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    /// Minimum length, at least 1
    pub n_min: usize,
    /// Maximum length, at least `n_min`
    pub n_max: usize,
    /// Smallest value
    pub values_min: i64,
    /// Largest value, at least `values_min`
    pub values_max: i64,
    /// Negatives permitted
    pub allow_negatives: bool,
}

impl NumericBounds {
    /// Length of the PRNG-driven sample: the midpoint of the length range
    #[must_use]
    pub fn sample_len(&self) -> usize {
        ((self.n_min + self.n_max) / 2).clamp(1, self.n_max.max(1))
    }
}

/// Resolved graph bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBounds {
    /// Node count used by the larger recipes
    pub nodes: usize,
    /// Edge cap for the dense recipe
    pub edges_max: usize,
    /// Edges are ordered pairs
    pub directed: bool,
}

/// Resolved event-stream bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBounds {
    /// Distinct users, at least 1
    pub max_users: i64,
    /// Byte budget, at least 1
    pub max_bytes: i64,
    /// Jitter ceiling, at least 0
    pub jitter_ms: i64,
}

const DEFAULT_MAX_USERS: i64 = 3;
const DEFAULT_MAX_BYTES: i64 = 1024;

impl Constraints {
    /// Resolve sequence bounds, capping lengths at `max_len`.
    ///
    /// Non-positive lengths fall back to the defaults and inverted ranges are
    /// collapsed upward (`n_max = n_min`, `values_max = values_min`).
    #[must_use]
    pub fn numeric_bounds(&self, max_len: usize) -> NumericBounds {
        let max_len = max_len.max(1);
        let n_min = self
            .n_min
            .filter(|n| *n > 0)
            .map_or(1, |n| to_len(n, max_len));
        let n_max = self
            .n_max
            .filter(|n| *n > 0)
            .map_or(n_min, |n| to_len(n, max_len))
            .max(n_min);
        let values_min = self.values_min.unwrap_or(0);
        let values_max = self
            .values_max
            .unwrap_or_else(|| values_min.saturating_add(10).max(10))
            .max(values_min);

        NumericBounds {
            n_min,
            n_max,
            values_min,
            values_max,
            allow_negatives: self.allow_negatives,
        }
    }

    /// Resolve graph bounds with `node_cap` as the ceiling on node count
    #[must_use]
    pub fn graph_bounds(&self, node_cap: usize, directed: bool) -> GraphBounds {
        let node_cap = node_cap.max(1);
        let graph = self.graph.clone().unwrap_or_default();
        let nodes = graph
            .nodes_max
            .filter(|n| *n > 0)
            .map_or(node_cap, |n| to_len(n, node_cap));
        let complete = nodes * (nodes - 1) / 2;
        let edges_max = graph
            .edges_max
            .filter(|m| *m >= 0)
            .map_or(complete, |m| usize::try_from(m).unwrap_or(complete));

        GraphBounds {
            nodes,
            edges_max,
            directed,
        }
    }

    /// Resolve event-stream bounds
    #[must_use]
    pub fn event_bounds(&self) -> EventBounds {
        EventBounds {
            max_users: self.max_users.filter(|u| *u > 0).unwrap_or(DEFAULT_MAX_USERS),
            max_bytes: self.max_bytes.filter(|b| *b > 0).unwrap_or(DEFAULT_MAX_BYTES),
            jitter_ms: self.jitter_ms.unwrap_or(0).max(0),
        }
    }

    /// True when a non-empty graph section is present
    #[must_use]
    pub fn has_graph(&self) -> bool {
        self.graph.as_ref().is_some_and(|g| !g.is_empty())
    }
}

fn to_len(n: i64, max_len: usize) -> usize {
    usize::try_from(n).map_or(max_len, |n| n.min(max_len))
}

/// A problem as stored by the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDefinition {
    /// Problem title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form tags; family selection compares them case-insensitively
    pub tags: Vec<String>,
    /// Single or multi-test input files
    #[serde(alias = "inputShape")]
    pub input_shape: InputShape,
    /// Difficulty label (carried)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Primary data structure label (carried)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ds: Option<String>,
    /// Constraint bag
    pub constraints: Constraints,
    /// Author notes (carried)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProblemDefinition {
    /// Create a problem from tags and constraints
    #[must_use]
    pub fn new<I, S>(tags: I, constraints: Constraints) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            constraints,
            ..Self::default()
        }
    }

    /// Set the input shape
    #[must_use]
    pub const fn with_input_shape(mut self, shape: InputShape) -> Self {
        self.input_shape = shape;
        self
    }

    /// Case-insensitive tag membership against any of `names`
    #[must_use]
    pub fn has_any_tag(&self, names: &[&str]) -> bool {
        self.tags.iter().any(|tag| {
            let tag = tag.trim().to_lowercase();
            names.iter().any(|name| tag == *name)
        })
    }

    /// Whether graph edges are ordered pairs
    #[must_use]
    pub fn is_directed(&self) -> bool {
        let from_constraints = self
            .constraints
            .graph
            .as_ref()
            .and_then(|g| g.directed)
            .unwrap_or(false);
        from_constraints || self.has_any_tag(&["directed", "digraph"])
    }

    /// Parse a problem from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a problem from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a problem from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            other => Err(Error::InvalidProblem(format!(
                "unsupported problem file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}
