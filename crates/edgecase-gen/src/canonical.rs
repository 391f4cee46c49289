//! Canonicalization
//!
//! Maps a case to a normalized structural record and a string key. Keys only
//! decide whether two cases are the same test; stored `content` is never
//! touched.
//!
//! Two entry points share one key builder:
//! - [`canonicalize`] for generated cases, reading the structured payload the
//!   recipe built;
//! - [`canonicalize_payload`] for stored payloads that only have text, which
//!   parses the content first.
//!
//! For every generated case both produce the same key.

use crate::case::{Event, Payload, RawCase, ShapeKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const DIRECTED_TAGS: &[&str] = &["directed", "digraph"];

/// Shape-specific normalized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalized {
    /// Integer sequence
    Array {
        /// Elements in order
        values: Vec<i64>,
    },
    /// Sorted array plus query
    BinarySearch {
        /// Elements in order
        values: Vec<i64>,
        /// Query
        target: i64,
    },
    /// Raw string
    String {
        /// Length in characters
        length: usize,
        /// The string, unmodified
        text: String,
    },
    /// Graph with sorted, deduplicated edges
    Graph {
        /// Node count from the header
        nodes: usize,
        /// Edge pairs are ordered
        directed: bool,
        /// Unique edges, undirected ones as `(min, max)`
        edges: Vec<(usize, usize)>,
    },
    /// Event stream sorted by `(timestamp, user)`
    Events {
        /// Sorted events
        events: Vec<Event>,
    },
    /// Content that could not be parsed for its shape
    Generic {
        /// Shape name as supplied
        shape_kind: String,
        /// Truncated SHA-256 of the content
        hash: String,
    },
}

impl Normalized {
    /// Structural fingerprint
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Array { values } => format!("array:{}:{}", values.len(), join(values, ",")),
            Self::BinarySearch { values, target } => format!(
                "binary_search:{}:{}:target={target}",
                values.len(),
                join(values, ",")
            ),
            Self::String { length, text } => format!("string:{length}:{text}"),
            Self::Graph {
                nodes,
                directed,
                edges,
            } => format!(
                "graph:{nodes}:{}:{}:{}",
                edges.len(),
                if *directed { "D" } else { "U" },
                edges
                    .iter()
                    .map(|(u, v)| format!("{u}-{v}"))
                    .collect::<Vec<_>>()
                    .join("|")
            ),
            Self::Events { events } => format!(
                "events:{}:{}",
                events.len(),
                events
                    .iter()
                    .map(|e| format!("{},{},{}", e.timestamp, e.user, e.bytes))
                    .collect::<Vec<_>>()
                    .join("|")
            ),
            Self::Generic { shape_kind, hash } => format!("generic:{shape_kind}:{hash}"),
        }
    }
}

fn join(values: &[i64], sep: &str) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Key plus the record it was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalForm {
    /// Structural fingerprint
    pub key: String,
    /// Normalized record
    pub normalized: Normalized,
}

impl From<Normalized> for CanonicalForm {
    fn from(normalized: Normalized) -> Self {
        Self {
            key: normalized.key(),
            normalized,
        }
    }
}

/// A stored case as the persistence layer sees it: shape name, text and params
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseLike {
    /// Shape name; unknown names canonicalize to a generic key
    #[serde(alias = "template", alias = "shape")]
    pub shape_kind: String,
    /// Literal test input
    pub content: String,
    /// Numeric parameters; only `directed` is consulted
    #[serde(default)]
    pub params: BTreeMap<String, i64>,
}

impl CaseLike {
    /// Create from parts
    #[must_use]
    pub fn new(shape_kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            shape_kind: shape_kind.into(),
            content: content.into(),
            params: BTreeMap::new(),
        }
    }

    /// Set one parameter
    #[must_use]
    pub fn with_param(mut self, name: &str, value: i64) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }
}

impl From<&RawCase> for CaseLike {
    fn from(case: &RawCase) -> Self {
        Self {
            shape_kind: case.shape_kind.to_string(),
            content: case.content.clone(),
            params: case.params.clone(),
        }
    }
}

fn tags_directed(tags: &[String]) -> bool {
    tags.iter()
        .any(|t| DIRECTED_TAGS.contains(&t.trim().to_lowercase().as_str()))
}

/// Canonicalize a generated or stored case
///
/// Uses the recipe's payload when present and falls back to parsing the
/// content otherwise.
#[must_use]
pub fn canonicalize(case: &RawCase, tags: &[String]) -> CanonicalForm {
    match &case.payload {
        Some(payload) => normalize_payload(payload, tags_directed(tags)).into(),
        None => canonicalize_payload(&CaseLike::from(case), tags),
    }
}

/// Canonicalize text-only content, e.g. a case read back from storage
#[must_use]
pub fn canonicalize_payload(case: &CaseLike, tags: &[String]) -> CanonicalForm {
    let directed = tags_directed(tags) || case.params.get("directed").is_some_and(|d| *d != 0);
    let parsed = case
        .shape_kind
        .parse::<ShapeKind>()
        .ok()
        .and_then(|kind| parse_content(kind, &case.content, directed));

    match parsed {
        Some(payload) => normalize_payload(&payload, false).into(),
        None => Normalized::Generic {
            shape_kind: case.shape_kind.clone(),
            hash: content_hash(&case.content),
        }
        .into(),
    }
}

fn normalize_payload(payload: &Payload, force_directed: bool) -> Normalized {
    match payload {
        Payload::Array { values } => Normalized::Array {
            values: values.clone(),
        },
        Payload::BinarySearch { values, target } => Normalized::BinarySearch {
            values: values.clone(),
            target: *target,
        },
        Payload::Text { text } => Normalized::String {
            length: text.chars().count(),
            text: text.clone(),
        },
        Payload::Graph {
            nodes,
            edges,
            directed,
        } => {
            let directed = *directed || force_directed;
            let mut edges: Vec<(usize, usize)> = edges
                .iter()
                .map(|&(u, v)| if directed { (u, v) } else { (u.min(v), u.max(v)) })
                .collect();
            edges.sort_unstable();
            edges.dedup();
            Normalized::Graph {
                nodes: *nodes,
                directed,
                edges,
            }
        }
        Payload::Events { events } => {
            let mut events = events.clone();
            events.sort_by_key(|e| (e.timestamp, e.user));
            Normalized::Events { events }
        }
    }
}

/// Re-derive a payload from rendered text
fn parse_content(kind: ShapeKind, content: &str, directed: bool) -> Option<Payload> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match kind {
        ShapeKind::String => Some(Payload::Text {
            text: content.to_string(),
        }),
        ShapeKind::Array => {
            let values = parse_ints(lines.last()?)?;
            Some(Payload::Array { values })
        }
        ShapeKind::BinarySearch => {
            let (target_line, rest) = lines.split_last()?;
            let target = single_int(target_line)?;
            let values = parse_ints(rest.last()?)?;
            Some(Payload::BinarySearch { values, target })
        }
        ShapeKind::Graph => {
            let (header, edge_lines) = lines.split_first()?;
            let nodes = header.split_whitespace().next()?.parse::<usize>().ok()?;
            let edges = edge_lines
                .iter()
                .map(|line| {
                    let mut parts = line.split_whitespace();
                    let u = parts.next()?.parse::<usize>().ok()?;
                    let v = parts.next()?.parse::<usize>().ok()?;
                    Some((u, v))
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Payload::Graph {
                nodes,
                edges,
                directed,
            })
        }
        ShapeKind::Events => {
            let events = lines
                .iter()
                .map(|line| match parse_ints(line)?.as_slice() {
                    [timestamp, user, bytes] => Some(Event::new(*timestamp, *user, *bytes)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Payload::Events { events })
        }
    }
}

fn parse_ints(line: &str) -> Option<Vec<i64>> {
    line.split_whitespace().map(|t| t.parse().ok()).collect()
}

fn single_int(line: &str) -> Option<i64> {
    match parse_ints(line)?.as_slice() {
        [value] => Some(*value),
        _ => None,
    }
}

/// First 8 bytes of the SHA-256 of `content`, hex encoded
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}
