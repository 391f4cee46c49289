//! Array family
//!
//! Size extremes, value extremes, orderings and duplicate patterns over an
//! integer sequence.

use super::{Family, FamilyContext, alternating, filled};
use crate::case::{Payload, RawCase, ShapeKind};
use crate::rng::SeededSequence;

/// Recipes over integer sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayFamily;

impl Family for ArrayFamily {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Array
    }

    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase> {
        let b = ctx.numeric();
        let shape = ctx.input_shape();
        let (vmin, vmax) = (b.values_min, b.values_max);
        let n = b.n_min;
        let mk = |slug: &str, name: &str, values: Vec<i64>, targets: &[&str]| {
            RawCase::from_payload(slug, name, targets, Payload::Array { values }, shape)
        };

        let mut cases = vec![
            mk("min-size", "Min size", filled(b.n_min, vmin), &["boundary"]),
            mk(
                "small-size",
                "Small size",
                filled((b.n_min + 1).min(b.n_max), vmin),
                &["boundary"],
            ),
            mk("max-size", "Max size", filled(b.n_max, vmax), &["performance"]),
            mk(
                "near-max",
                "Near max",
                filled(b.n_max.saturating_sub(1).max(b.n_min), vmax),
                &["performance"],
            ),
        ];

        if vmin <= 0 && vmax >= 0 {
            cases.push(mk("all-zeros", "All zeros", filled(n, 0), &["parsing", "edge"]));
        }

        cases.push(mk("all-same-min", "All same min", filled(n, vmin), &["duplicates"]));
        cases.push(mk("all-same-max", "All same max", filled(n, vmax), &["duplicates"]));
        cases.push(mk(
            "alternating",
            "Alternating min/max",
            alternating(n, vmin, vmax),
            &["ordering", "boundary"],
        ));

        let increasing = increasing(n, vmin, vmax);
        let decreasing: Vec<i64> = increasing.iter().rev().copied().collect();
        cases.push(mk(
            "increasing",
            "Strictly increasing",
            increasing,
            &["ordering"],
        ));
        cases.push(mk(
            "decreasing",
            "Strictly decreasing",
            decreasing,
            &["ordering"],
        ));

        let mut outlier = filled(n, vmin);
        outlier[n / 2] = vmax;
        cases.push(mk(
            "duplicates-outlier",
            "Many duplicates + outlier",
            outlier,
            &["duplicates", "adversarial"],
        ));

        if b.allow_negatives {
            cases.push(mk(
                "negatives-mixed",
                "Negatives mixed",
                alternating(n, vmin.min(0), vmax.max(0)),
                &["parsing", "sign"],
            ));
        }

        if ctx.include_random() {
            let mut seq = SeededSequence::new(ctx.seed());
            let values = seq.take_values(b.sample_len(), vmin, vmax);
            cases.push(mk("random-uniform", "Random uniform", values, &["random"]));
        }

        cases
    }
}

/// `len` values from `vmin` with step `max(1, (vmax - vmin) / len)`
fn increasing(len: usize, vmin: i64, vmax: i64) -> Vec<i64> {
    let divisor = i64::try_from(len.max(1)).unwrap_or(i64::MAX);
    let step = (vmax.saturating_sub(vmin) / divisor).max(1);
    (0..divisor)
        .map(|i| vmin.saturating_add(i.saturating_mul(step)))
        .collect()
}
