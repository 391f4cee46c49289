//! Sorted-array family for binary search problems
//!
//! Inputs are ascending; the recipes move the query to the edges of the
//! array and just outside the value range.

use super::{Family, FamilyContext, filled};
use crate::case::{Payload, RawCase, ShapeKind};

/// Recipes over sorted arrays with a query target
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearchFamily;

impl Family for BinarySearchFamily {
    fn kind(&self) -> ShapeKind {
        ShapeKind::BinarySearch
    }

    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase> {
        let b = ctx.numeric();
        let shape = ctx.input_shape();
        let (vmin, vmax) = (b.values_min, b.values_max);
        let mk = |slug: &str, name: &str, values: Vec<i64>, target: i64, targets: &[&str]| {
            RawCase::from_payload(
                slug,
                name,
                targets,
                Payload::BinarySearch { values, target },
                shape,
            )
        };

        let ascending: Vec<i64> = (0..b.n_min)
            .map(|i| vmin.saturating_add(i64::try_from(i).unwrap_or(i64::MAX)))
            .collect();
        let first = ascending.first().copied().unwrap_or(vmin);
        let mut last_max = ascending.clone();
        if let Some(last) = last_max.last_mut() {
            *last = vmax;
        }

        vec![
            mk(
                "target-first",
                "Target at first",
                ascending.clone(),
                first,
                &["boundary"],
            ),
            mk("target-last", "Target at last", last_max, vmax, &["boundary"]),
            mk(
                "absent-smaller",
                "Not present - smaller",
                ascending.clone(),
                vmin.saturating_sub(1),
                &["off-by-one"],
            ),
            mk(
                "absent-larger",
                "Not present - larger",
                ascending,
                vmax.saturating_add(1),
                &["off-by-one"],
            ),
            mk(
                "duplicates",
                "Many duplicates",
                filled(b.n_min, vmin),
                vmin,
                &["duplicates"],
            ),
        ]
    }
}
