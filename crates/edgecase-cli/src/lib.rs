//! Edge-Case CLI Library
//!
//! Library functions for the `edgecase` command-line tool.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use edgecase_gen::{
    CaseLike, Engine, EngineConfig, FamilyContext, GeneratedCase, GenerationOptions, Mode,
    ProblemDefinition, ShapeKind, canonicalize_payload, family_for,
};
use std::path::Path;

/// Output format for generated cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// YAML documents separated by `---`
    Yaml,
}

/// Parse an output format name
pub fn parse_format(format: &str) -> Result<OutputFormat, String> {
    match format {
        "json" => Ok(OutputFormat::Json),
        "yaml" | "yml" => Ok(OutputFormat::Yaml),
        _ => Err(format!("Unknown output format: {format}")),
    }
}

/// Parse a curation mode name
pub fn parse_mode(mode: &str) -> Result<Mode, String> {
    mode.parse().map_err(|e| format!("{e}"))
}

/// Parse a shape kind name
pub fn parse_shape(shape: &str) -> Result<ShapeKind, String> {
    shape.parse().map_err(|e| format!("{e}"))
}

/// Load a problem definition from a JSON or YAML file
pub fn load_problem(path: &Path) -> Result<ProblemDefinition, String> {
    ProblemDefinition::from_file(path).map_err(|e| format!("Error loading problem: {e}"))
}

/// Load an engine config, or the default when no path is given
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    match path {
        Some(path) => {
            EngineConfig::from_file(path).map_err(|e| format!("Error loading config: {e}"))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Build generation options from command-line values
pub fn build_options(
    count: i64,
    seed: u32,
    mode: &str,
    exclude_randomness: bool,
) -> Result<GenerationOptions, String> {
    let options = GenerationOptions::default()
        .with_count(count)
        .with_seed(seed)
        .with_mode(parse_mode(mode)?);
    Ok(if exclude_randomness {
        options.without_randomness()
    } else {
        options
    })
}

/// Run the generator on a problem file
pub fn generate_from_file(
    problem: &Path,
    options: &GenerationOptions,
    config: Option<&Path>,
) -> Result<Vec<GeneratedCase>, String> {
    let problem = load_problem(problem)?;
    let engine = Engine::new(load_engine_config(config)?);
    Ok(engine.generate(&problem, options))
}

/// Format cases as YAML
pub fn cases_to_yaml(cases: &[GeneratedCase]) -> Result<String, String> {
    let mut output = String::new();
    for case in cases {
        match serde_yaml::to_string(case) {
            Ok(yaml) => {
                output.push_str("---\n");
                output.push_str(&yaml);
            }
            Err(e) => return Err(format!("Error serializing case: {e}")),
        }
    }
    Ok(output)
}

/// Format cases as JSON
pub fn cases_to_json(cases: &[GeneratedCase]) -> Result<String, String> {
    serde_json::to_string_pretty(cases).map_err(|e| format!("Error serializing cases: {e}"))
}

/// Format cases in the requested format
pub fn format_cases(cases: &[GeneratedCase], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => cases_to_json(cases),
        OutputFormat::Yaml => cases_to_yaml(cases),
    }
}

/// Canonicalize literal content and render `{key, normalized}` as JSON
pub fn canonicalize_content(
    content: &str,
    shape: &str,
    tags: &[String],
    directed: bool,
) -> Result<String, String> {
    let mut case = CaseLike::new(shape, content);
    if directed {
        case = case.with_param("directed", 1);
    }
    let form = canonicalize_payload(&case, tags);
    serde_json::to_string_pretty(&form).map_err(|e| format!("Error serializing key: {e}"))
}

/// Canonicalize the content of a file
///
/// One trailing line terminator is dropped, so a saved `abc\n` keys the same
/// as the generated `abc`.
pub fn canonicalize_file(
    path: &Path,
    shape: &str,
    tags: &[String],
    directed: bool,
) -> Result<String, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    canonicalize_content(strip_line_terminator(&content), shape, tags, directed)
}

fn strip_line_terminator(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}

/// Recipe names of every family for a default problem
pub fn list_families() -> Vec<(ShapeKind, Vec<String>)> {
    let problem = ProblemDefinition::default();
    let options = GenerationOptions::default();
    let config = EngineConfig::default();
    let ctx = FamilyContext::new(&problem, &options, &config);
    ShapeKind::all()
        .into_iter()
        .map(|kind| {
            let names = family_for(kind)
                .generate(&ctx)
                .into_iter()
                .map(|case| case.name)
                .collect();
            (kind, names)
        })
        .collect()
}

/// Human-readable family listing
pub fn families_report() -> String {
    let mut output = String::new();
    for (kind, names) in list_families() {
        output.push_str(&format!("{kind}\n"));
        for name in names {
            output.push_str(&format!("  - {name}\n"));
        }
    }
    output
}
