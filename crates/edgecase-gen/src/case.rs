//! Raw test cases and their structured payloads
//!
//! Every recipe builds a [`Payload`] first and renders `content` from it once.
//! The payload stays attached so canonicalization never has to re-parse the
//! rendered text.

use crate::error::Error;
use crate::problem::InputShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input shape a family produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Count line plus a line of integers
    Array,
    /// A single string
    String,
    /// `N M` header plus edge lines
    Graph,
    /// Sorted array plus a query target
    BinarySearch,
    /// `timestamp user size` lines
    Events,
}

impl ShapeKind {
    /// Get all shape kinds in selector priority order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Graph,
            Self::Events,
            Self::String,
            Self::BinarySearch,
            Self::Array,
        ]
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::String => "string",
            Self::Graph => "graph",
            Self::BinarySearch => "binary_search",
            Self::Events => "events",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "graph" => Ok(Self::Graph),
            "binary_search" | "binary-search" => Ok(Self::BinarySearch),
            "events" => Ok(Self::Events),
            other => Err(Error::InvalidProblem(format!("unknown shape kind: {other}"))),
        }
    }
}

/// One event of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Event {
    /// Arrival time
    pub timestamp: i64,
    /// Producing user
    pub user: i64,
    /// Payload size in bytes
    pub bytes: i64,
}

impl Event {
    /// Create an event
    #[must_use]
    pub const fn new(timestamp: i64, user: i64, bytes: i64) -> Self {
        Self {
            timestamp,
            user,
            bytes,
        }
    }
}

/// Structured form of a case, before serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// Integer sequence
    Array {
        /// Elements
        values: Vec<i64>,
    },
    /// Character sequence
    Text {
        /// The string
        text: String,
    },
    /// Graph over nodes `1..=nodes`
    Graph {
        /// Node count
        nodes: usize,
        /// Edge list in emission order
        edges: Vec<(usize, usize)>,
        /// Edges are ordered pairs
        directed: bool,
    },
    /// Sorted array with a query
    BinarySearch {
        /// Elements, ascending
        values: Vec<i64>,
        /// Queried value
        target: i64,
    },
    /// Event stream in emission order
    Events {
        /// Events, possibly out of timestamp order
        events: Vec<Event>,
    },
}

impl Payload {
    /// Shape kind this payload belongs to
    #[must_use]
    pub const fn shape_kind(&self) -> ShapeKind {
        match self {
            Self::Array { .. } => ShapeKind::Array,
            Self::Text { .. } => ShapeKind::String,
            Self::Graph { .. } => ShapeKind::Graph,
            Self::BinarySearch { .. } => ShapeKind::BinarySearch,
            Self::Events { .. } => ShapeKind::Events,
        }
    }

    /// Numeric parameters describing the payload
    #[must_use]
    pub fn params(&self) -> BTreeMap<String, i64> {
        let mut params = BTreeMap::new();
        match self {
            Self::Array { values } => {
                params.insert("N".to_string(), len_param(values.len()));
            }
            Self::Text { text } => {
                params.insert("N".to_string(), len_param(text.chars().count()));
            }
            Self::Graph {
                nodes,
                edges,
                directed,
            } => {
                params.insert("N".to_string(), len_param(*nodes));
                params.insert("M".to_string(), len_param(edges.len()));
                params.insert("directed".to_string(), i64::from(*directed));
            }
            Self::BinarySearch { values, target } => {
                params.insert("N".to_string(), len_param(values.len()));
                params.insert("target".to_string(), *target);
            }
            Self::Events { events } => {
                params.insert("N".to_string(), len_param(events.len()));
                let users: std::collections::BTreeSet<i64> =
                    events.iter().map(|e| e.user).collect();
                params.insert("users".to_string(), len_param(users.len()));
                let bytes = events.iter().fold(0i64, |acc, e| acc.saturating_add(e.bytes));
                params.insert("bytes".to_string(), bytes);
            }
        }
        params
    }

    /// Serialize to the literal test input
    ///
    /// Multi-test problems get a leading `1` test-count line on the array
    /// layouts.
    #[must_use]
    pub fn render(&self, input_shape: InputShape) -> String {
        let body = match self {
            Self::Array { values } => format!("{}\n{}", values.len(), join_values(values)),
            Self::Text { text } => text.clone(),
            Self::Graph { nodes, edges, .. } => {
                let mut lines = vec![format!("{nodes} {}", edges.len())];
                lines.extend(edges.iter().map(|(u, v)| format!("{u} {v}")));
                lines.join("\n")
            }
            Self::BinarySearch { values, target } => {
                format!("{}\n{}\n{target}", values.len(), join_values(values))
            }
            Self::Events { events } => events
                .iter()
                .map(|e| format!("{} {} {}", e.timestamp, e.user, e.bytes))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        match (input_shape, self) {
            (InputShape::Multi, Self::Array { .. } | Self::BinarySearch { .. }) => {
                format!("1\n{body}")
            }
            _ => body,
        }
    }
}

fn len_param(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

const PREVIEW_LEN: usize = 60;

/// One-line preview of a content blob
#[must_use]
pub fn preview(content: &str) -> String {
    let flat = content.lines().collect::<Vec<_>>().join(" / ");
    if flat.chars().count() <= PREVIEW_LEN {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    }
}

/// A candidate case as produced by a family recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCase {
    /// Deterministic identifier, `<shape>:<recipe>`
    pub id: String,
    /// Display name
    pub name: String,
    /// Shape kind
    pub shape_kind: ShapeKind,
    /// Failure modes, primary first
    pub targets: Vec<String>,
    /// Numeric parameters (N, M, target, ...)
    pub params: BTreeMap<String, i64>,
    /// Literal test input
    pub content: String,
    /// Short display form of `content`
    pub preview: String,
    /// Human-readable purpose; filled by enrichment when empty
    pub explain: String,
    /// Explicit category, set only for hand-entered cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Structured form the content was rendered from
    #[serde(skip)]
    pub payload: Option<Payload>,
}

impl RawCase {
    /// Build a case from a recipe's payload
    #[must_use]
    pub fn from_payload(
        slug: &str,
        name: &str,
        targets: &[&str],
        payload: Payload,
        input_shape: InputShape,
    ) -> Self {
        let shape_kind = payload.shape_kind();
        let content = payload.render(input_shape);
        Self {
            id: format!("{shape_kind}:{slug}"),
            name: name.to_string(),
            shape_kind,
            targets: targets.iter().map(ToString::to_string).collect(),
            params: payload.params(),
            preview: preview(&content),
            content,
            explain: String::new(),
            category: None,
            payload: Some(payload),
        }
    }

    /// Build a hand-entered case with an explicit category
    #[must_use]
    pub fn manual(
        name: &str,
        shape_kind: ShapeKind,
        content: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        let content = content.into();
        let slug = name
            .to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        Self {
            id: format!("manual:{slug}"),
            name: name.to_string(),
            shape_kind,
            targets: Vec::new(),
            params: BTreeMap::new(),
            preview: preview(&content),
            content,
            explain: String::new(),
            category: category.map(ToString::to_string),
            payload: None,
        }
    }

    /// First target, if any
    #[must_use]
    pub fn primary_target(&self) -> Option<&str> {
        self.targets.first().map(String::as_str)
    }

    /// Whether `target` is among the targets
    #[must_use]
    pub fn has_target(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t == target)
    }
}
