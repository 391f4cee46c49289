//! Generation options and engine configuration
//!
//! `GenerationOptions` is what a caller passes per run. `EngineConfig` holds
//! the fixed knobs of the engine (output caps, quota table, category priority)
//! and can be loaded from YAML or JSON.

use crate::error::{Error, Result};
use crate::rng::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Output selection mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Quota- and score-based curation
    #[default]
    Balanced,
    /// Deduplicated, enriched pool without curation
    Raw,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => write!(f, "balanced"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "raw" => Ok(Self::Raw),
            other => Err(Error::InvalidConfig(format!("unknown mode: {other}"))),
        }
    }
}

/// Per-run generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Desired output size before clamping
    pub count: i64,
    /// Seed of the sequence generator
    pub seed: u32,
    /// Skip the PRNG-driven recipes
    #[serde(alias = "excludeRandomness")]
    pub exclude_randomness: bool,
    /// Curation mode
    pub mode: Mode,
    /// Targets the caller is interested in; informational only
    #[serde(alias = "includeTargets")]
    pub include_targets: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            count: 20,
            seed: DEFAULT_SEED,
            exclude_randomness: false,
            mode: Mode::Balanced,
            include_targets: Vec::new(),
        }
    }
}

impl GenerationOptions {
    /// Set the desired count
    #[must_use]
    pub const fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    /// Set the seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the mode
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Skip PRNG-driven recipes
    #[must_use]
    pub const fn without_randomness(mut self) -> Self {
        self.exclude_randomness = true;
        self
    }

    /// Parse options from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fixed engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ceiling on the curated output size
    pub max_output: usize,
    /// Ceiling applied to the requested count before curation
    pub max_requested: usize,
    /// Node cap for graph recipes
    pub graph_node_cap: usize,
    /// Ceiling on generated sequence lengths
    pub max_sequence_len: usize,
    /// Event-stream window width
    pub window_ms: i64,
    /// Per-category quota
    pub quotas: BTreeMap<String, usize>,
    /// Quota entries replaced for graph-tagged problems
    pub graph_quota_overrides: BTreeMap<String, usize>,
    /// Category walk order, which is also the output order
    pub category_priority: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_output: 50,
            max_requested: 100,
            graph_node_cap: 5,
            max_sequence_len: 100_000,
            window_ms: 60_000,
            quotas: table(&[
                ("degenerate", 1),
                ("boundary", 2),
                ("connectivity", 2),
                ("duplicates", 1),
                ("ordering", 1),
                ("performance", 1),
                ("core", 2),
            ]),
            graph_quota_overrides: table(&[("connectivity", 2), ("performance", 1), ("core", 2)]),
            category_priority: [
                "degenerate",
                "boundary",
                "duplicates",
                "ordering",
                "connectivity",
                "performance",
                "core",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

fn table(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
    entries
        .iter()
        .map(|(name, quota)| ((*name).to_string(), *quota))
        .collect()
}

impl EngineConfig {
    /// Reject configurations that would make generation meaningless
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.max_output == 0, "max_output must be positive"),
            (self.max_requested == 0, "max_requested must be positive"),
            (self.graph_node_cap == 0, "graph_node_cap must be positive"),
            (self.max_sequence_len == 0, "max_sequence_len must be positive"),
            (self.window_ms <= 0, "window_ms must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(Error::InvalidConfig((*message).to_string())),
            None => Ok(()),
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file (YAML or JSON)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Quota table for a problem, with graph overrides applied when asked
    #[must_use]
    pub fn quotas_for(&self, graph_tagged: bool) -> BTreeMap<String, usize> {
        let mut quotas = self.quotas.clone();
        if graph_tagged {
            quotas.extend(
                self.graph_quota_overrides
                    .iter()
                    .map(|(k, v)| (k.clone(), *v)),
            );
        }
        quotas
    }

    /// Position of `category` in the priority order; unknown categories sort last
    #[must_use]
    pub fn priority_index(&self, category: &str) -> usize {
        self.category_priority
            .iter()
            .position(|c| c == category)
            .unwrap_or(self.category_priority.len())
    }

    /// Requested count clamped to `[1, max_requested]`
    #[must_use]
    pub fn requested_count(&self, options: &GenerationOptions) -> usize {
        let count = usize::try_from(options.count.max(1)).unwrap_or(usize::MAX);
        count.clamp(1, self.max_requested.max(1))
    }

    /// Final output size target, clamped to `[1, max_output]`
    #[must_use]
    pub fn desired_count(&self, options: &GenerationOptions) -> usize {
        self.requested_count(options)
            .clamp(1, self.max_output.max(1))
    }
}
