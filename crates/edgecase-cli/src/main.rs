//! Edge-Case CLI
//!
//! Command-line interface for generating and inspecting edge-case suites.

#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]

use clap::{Parser, Subcommand};
use edgecase_cli::{
    build_options, canonicalize_file, families_report, format_cases, generate_from_file,
    parse_format, parse_shape,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edgecase")]
#[command(about = "Deterministic edge-case test generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a curated suite for a problem file
    Generate {
        /// Problem definition (.json, .yaml or .yml)
        #[arg(value_name = "PROBLEM")]
        problem: PathBuf,

        /// Desired number of cases
        #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
        count: i64,

        /// Seed of the sequence generator
        #[arg(long, default_value_t = 12345)]
        seed: u32,

        /// Selection mode (balanced, raw)
        #[arg(long, default_value = "balanced")]
        mode: String,

        /// Skip the randomized recipes
        #[arg(long)]
        exclude_randomness: bool,

        /// Engine configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (json, yaml)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Print the canonical key of a test input
    Canonicalize {
        /// File holding the literal test input
        #[arg(value_name = "CONTENT_FILE")]
        content: PathBuf,

        /// Shape kind (array, string, graph, binary_search, events)
        #[arg(long)]
        shape: String,

        /// Problem tags, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Treat graph edges as ordered pairs
        #[arg(long)]
        directed: bool,
    },

    /// List every family and its recipes
    Families,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            problem,
            count,
            seed,
            mode,
            exclude_randomness,
            config,
            format,
        } => run_generate(
            problem,
            count,
            seed,
            &mode,
            exclude_randomness,
            config,
            &format,
        ),
        Commands::Canonicalize {
            content,
            shape,
            tags,
            directed,
        } => run_canonicalize(content, &shape, &tags, directed),
        Commands::Families => print!("{}", families_report()),
    }
}

fn run_generate(
    problem: PathBuf,
    count: i64,
    seed: u32,
    mode: &str,
    exclude_randomness: bool,
    config: Option<PathBuf>,
    format: &str,
) {
    let format = parse_format(format).unwrap_or_else(|e| exit_with(&e));
    let options = build_options(count, seed, mode, exclude_randomness)
        .unwrap_or_else(|e| exit_with(&e));
    debug!(problem = %problem.display(), ?options, "generating");

    let cases = generate_from_file(&problem, &options, config.as_deref())
        .unwrap_or_else(|e| exit_with(&e));
    match format_cases(&cases, format) {
        Ok(output) => println!("{output}"),
        Err(e) => exit_with(&e),
    }
}

fn run_canonicalize(content: PathBuf, shape: &str, tags: &[String], directed: bool) {
    if let Err(e) = parse_shape(shape) {
        debug!(shape, "unknown shape, falling back to a content hash: {e}");
    }
    match canonicalize_file(&content, shape, tags, directed) {
        Ok(output) => println!("{output}"),
        Err(e) => exit_with(&e),
    }
}
