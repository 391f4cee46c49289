//! Generation pipeline
//!
//! Problem + options → family → raw pool → dedup → enrich → curate.
//! The whole pipeline is a pure function of its inputs and the engine config.

use crate::case::ShapeKind;
use crate::config::{EngineConfig, GenerationOptions, Mode};
use crate::curator::curate;
use crate::dedup::dedup;
use crate::enrich::{EnrichedCase, enrich_all};
use crate::families::{FamilyContext, family_for, is_graph_tagged, select_family};
use crate::problem::ProblemDefinition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A case as returned to callers and persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCase {
    /// Deterministic recipe id
    pub template_id: String,
    /// Recipe display name
    pub template_name: String,
    /// Why the case exists
    pub template_explain: String,
    /// One-line preview of `content`
    pub template_preview: String,
    /// Curation category
    pub category: String,
    /// Failure modes, primary first
    pub targets: Vec<String>,
    /// Numeric parameters
    pub params: BTreeMap<String, i64>,
    /// Literal test input
    pub content: String,
    /// Structural fingerprint
    pub canonical_key: String,
}

impl From<EnrichedCase> for GeneratedCase {
    fn from(enriched: EnrichedCase) -> Self {
        let EnrichedCase {
            case,
            category,
            canonical,
            ..
        } = enriched;
        Self {
            template_id: case.id,
            template_name: case.name,
            template_explain: case.explain,
            template_preview: case.preview,
            category,
            targets: case.targets,
            params: case.params,
            content: case.content,
            canonical_key: canonical.key,
        }
    }
}

/// Drop cases whose canonical key is already stored, keeping order
#[must_use]
pub fn retain_unsaved(cases: Vec<GeneratedCase>, stored_keys: &HashSet<String>) -> Vec<GeneratedCase> {
    cases
        .into_iter()
        .filter(|case| !stored_keys.contains(&case.canonical_key))
        .collect()
}

/// Edge-case generation engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Family that will run for `problem`
    #[must_use]
    pub fn family(&self, problem: &ProblemDefinition) -> ShapeKind {
        select_family(problem)
    }

    /// Deduplicated, enriched pool in catalog order
    #[must_use]
    pub fn pool(&self, problem: &ProblemDefinition, options: &GenerationOptions) -> Vec<EnrichedCase> {
        let kind = self.family(problem);
        let ctx = FamilyContext::new(problem, options, &self.config);
        let raw = family_for(kind).generate(&ctx);
        let raw_len = raw.len();
        let unique = dedup(raw, &problem.tags);
        debug!(family = %kind, raw = raw_len, unique = unique.len(), "pool built");
        enrich_all(unique)
    }

    /// Run the full pipeline
    #[must_use]
    pub fn generate(
        &self,
        problem: &ProblemDefinition,
        options: &GenerationOptions,
    ) -> Vec<GeneratedCase> {
        let pool = self.pool(problem, options);
        let selected = match options.mode {
            Mode::Raw => pool,
            Mode::Balanced => curate(
                pool,
                is_graph_tagged(problem),
                self.config.desired_count(options),
                &self.config,
            ),
        };
        selected.into_iter().map(GeneratedCase::from).collect()
    }
}

/// Run the pipeline with the default engine configuration
#[must_use]
pub fn generate(problem: &ProblemDefinition, options: &GenerationOptions) -> Vec<GeneratedCase> {
    Engine::default().generate(problem, options)
}
