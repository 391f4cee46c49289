//! Metadata enrichment
//!
//! Derives category, size bucket, difficulty and explanation for each unique
//! case. Pure per-case mapping; order is preserved.

use crate::canonical::CanonicalForm;
use crate::case::RawCase;
use crate::dedup::KeyedCase;
use serde::{Deserialize, Serialize};

/// Fallback category for cases without targets
pub const CORE_CATEGORY: &str = "core";

const PERFORMANCE: &str = "performance";
const SMALL_MAX: i64 = 3;
const MEDIUM_MAX: i64 = 50;

/// Coarse size of a case, from `params.N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    /// N <= 3
    Small,
    /// N <= 50
    Medium,
    /// Anything larger
    Large,
}

impl SizeBucket {
    /// Bucket for a size parameter
    #[must_use]
    pub const fn from_size(n: i64) -> Self {
        if n <= SMALL_MAX {
            Self::Small
        } else if n <= MEDIUM_MAX {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Difficulty score, 1 to 3
    #[must_use]
    pub const fn difficulty(self) -> u8 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }

    /// Curation score contribution; smaller cases rank higher
    #[must_use]
    pub const fn size_score(self) -> usize {
        match self {
            Self::Small => 2,
            Self::Medium => 1,
            Self::Large => 0,
        }
    }
}

impl std::fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// A unique case with derived metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedCase {
    /// The case; `explain` is filled in
    pub case: RawCase,
    /// Lower-cased category
    pub category: String,
    /// Size bucket
    pub size_bucket: SizeBucket,
    /// 1 (small) to 3 (large)
    pub difficulty_score: u8,
    /// Canonical form from deduplication
    pub canonical: CanonicalForm,
}

impl EnrichedCase {
    /// Canonical key
    #[must_use]
    pub fn canonical_key(&self) -> &str {
        &self.canonical.key
    }

    /// Whether `performance` is one of the targets
    #[must_use]
    pub fn targets_performance(&self) -> bool {
        self.case.has_target(PERFORMANCE)
    }
}

/// Category of a case: explicit, else `performance` when targeted, else the
/// primary target, else `core`
#[must_use]
pub fn category_of(case: &RawCase) -> String {
    let category = case
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| case.has_target(PERFORMANCE).then_some(PERFORMANCE))
        .or_else(|| case.primary_target())
        .unwrap_or(CORE_CATEGORY);
    category.to_lowercase()
}

/// Explanation for a case, keyed by its primary target
#[must_use]
pub fn explanation_for(case: &RawCase) -> String {
    let known = match case.primary_target() {
        Some("connectivity") => "Breaks solutions that assume the graph is connected.",
        Some("degenerate") => "Tests base case handling with minimal input.",
        Some("performance") => "Stresses worst-case time complexity with dense structure.",
        Some("duplicates") => "Targets incorrect handling of duplicate values.",
        Some("ordering") => "Targets incorrect handling of ordering or out-of-order events.",
        Some("boundary") => "Targets off-by-one at boundary conditions.",
        Some("random") => "Random deterministic case for robustness.",
        _ => return case.name.clone(),
    };
    known.to_string()
}

/// Attach metadata to a keyed case
#[must_use]
pub fn enrich(keyed: KeyedCase) -> EnrichedCase {
    let KeyedCase {
        mut case,
        canonical,
    } = keyed;
    let size_bucket = SizeBucket::from_size(case.params.get("N").copied().unwrap_or(0));
    if case.explain.is_empty() {
        case.explain = explanation_for(&case);
    }
    EnrichedCase {
        category: category_of(&case),
        size_bucket,
        difficulty_score: size_bucket.difficulty(),
        canonical,
        case,
    }
}

/// Enrich a whole pool, keeping its order
#[must_use]
pub fn enrich_all(pool: Vec<KeyedCase>) -> Vec<EnrichedCase> {
    pool.into_iter().map(enrich).collect()
}
