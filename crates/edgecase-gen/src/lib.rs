//! Edge-Case Test Generator
//!
//! Deterministic generation of small, adversarial test inputs for
//! algorithmic problems. Given a problem definition and a seed, the engine
//! picks a shape family, runs its recipe catalog, drops structural
//! duplicates, attaches metadata and curates a quota-balanced suite.
//!
//! ```
//! use edgecase_gen::{Constraints, GenerationOptions, ProblemDefinition, generate};
//!
//! let problem = ProblemDefinition::new(
//!     ["graph"],
//!     Constraints::default(),
//! );
//! let cases = generate(&problem, &GenerationOptions::default().with_count(5));
//! assert_eq!(cases.len(), 5);
//! ```
//!
//! Same problem, same options, same bytes out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::redundant_closure_for_method_calls))]
#![cfg_attr(test, allow(clippy::redundant_clone))]
#![cfg_attr(test, allow(clippy::cast_sign_loss, clippy::cast_possible_wrap))]

pub mod canonical;
pub mod case;
pub mod config;
pub mod curator;
pub mod dedup;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod families;
pub mod problem;
pub mod proptest_impl;
pub mod rng;

pub use canonical::{CanonicalForm, CaseLike, Normalized, canonicalize, canonicalize_payload};
pub use case::{Event, Payload, RawCase, ShapeKind, preview};
pub use config::{EngineConfig, GenerationOptions, Mode};
pub use curator::curate;
pub use dedup::{KeyedCase, dedup};
pub use engine::{Engine, GeneratedCase, generate, retain_unsaved};
pub use enrich::{EnrichedCase, SizeBucket, enrich};
pub use error::{Error, Result};
pub use families::{Family, FamilyContext, family_for, select_family};
pub use problem::{Constraints, GraphConstraints, InputShape, ProblemDefinition};
pub use rng::{DEFAULT_SEED, SeededSequence};
