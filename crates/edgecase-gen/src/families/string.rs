//! String family

use super::{Family, FamilyContext};
use crate::case::{Payload, RawCase, ShapeKind};
use crate::rng::SeededSequence;

const LOWER_A: i64 = 97;
const LOWER_Z: i64 = 122;

/// Recipes over character sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFamily;

impl Family for StringFamily {
    fn kind(&self) -> ShapeKind {
        ShapeKind::String
    }

    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase> {
        let b = ctx.numeric();
        let shape = ctx.input_shape();
        let n = b.n_min;
        let mk = |slug: &str, name: &str, text: String, targets: &[&str]| {
            RawCase::from_payload(slug, name, targets, Payload::Text { text }, shape)
        };

        let alternating: String = (0..n).map(|i| if i % 2 == 0 { 'a' } else { 'z' }).collect();
        let run_then_change = format!("{}b", "a".repeat(n.saturating_sub(1).max(1)));
        let palindrome: String = "abba".chars().take(n).collect();

        let mut cases = vec![
            mk("min-length", "Empty / Min", "a".repeat(n), &["boundary"]),
            mk("single-char", "Single char", "a".to_string(), &["boundary"]),
            mk("all-same", "All same char", "z".repeat(n), &["duplicates"]),
            mk("alternating", "Alternating chars", alternating, &["ordering"]),
            mk(
                "run-then-change",
                "Long run then change",
                run_then_change,
                &["edge"],
            ),
            mk("palindrome", "Palindrome", palindrome, &["parsing"]),
        ];

        if ctx.include_random() {
            let mut seq = SeededSequence::new(ctx.seed());
            let text: String = (0..b.sample_len())
                .map(|_| to_char(seq.next_in(LOWER_A, LOWER_Z)))
                .collect();
            cases.push(mk("random", "Random string", text, &["random"]));
        }

        cases
    }
}

fn to_char(code: i64) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('a')
}
