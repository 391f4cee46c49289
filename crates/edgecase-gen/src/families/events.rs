//! Event-stream family
//!
//! Synthesizes `(timestamp, user, bytes)` streams for consumers that keep a
//! rolling time window and a byte budget. Every recipe draws from its own
//! sequence, started at the base seed plus a fixed per-recipe offset, so
//! adding draws to one recipe never shifts another.

use super::{Family, FamilyContext};
use crate::case::{Event, Payload, RawCase, ShapeKind};
use crate::problem::EventBounds;
use crate::rng::SeededSequence;

const BASE_TIMESTAMP: i64 = 1_000;
const GAP_MIN: i64 = 1;
const GAP_MAX: i64 = 1_000;
const SEED_STRIDE: u32 = 7_919;
const ROUTINE_BUDGET_SHARE: i64 = 4;
const MAX_INTERLEAVED_USERS: i64 = 4;

const WINDOW_BOUNDARY: u32 = 1;
const LATE_ARRIVAL: u32 = 2;
const DUPLICATE_EVENT: u32 = 3;
const BYTE_BUDGET: u32 = 4;
const MULTI_USER: u32 = 5;
const SINGLE_EVENT: u32 = 6;
const TWO_EVENTS: u32 = 7;

/// Per-recipe event synthesizer
#[derive(Debug, Clone)]
struct Synth {
    seq: SeededSequence,
    clock: i64,
    bounds: EventBounds,
}

impl Synth {
    fn new(seed: u32, recipe: u32, bounds: EventBounds) -> Self {
        Self {
            seq: SeededSequence::offset(seed, SEED_STRIDE.wrapping_mul(recipe)),
            clock: BASE_TIMESTAMP,
            bounds,
        }
    }

    /// Move the clock forward by one gap plus jitter
    fn tick(&mut self) -> i64 {
        let gap = self.seq.next_in(GAP_MIN, GAP_MAX);
        let jitter = if self.bounds.jitter_ms > 0 {
            self.seq.next_in(0, self.bounds.jitter_ms)
        } else {
            0
        };
        self.clock = self.clock.saturating_add(gap.saturating_add(jitter));
        self.clock
    }

    /// Size that keeps a short stream well inside the budget
    fn routine_bytes(&mut self) -> i64 {
        let cap = (self.bounds.max_bytes / ROUTINE_BUDGET_SHARE).max(1);
        self.seq.next_in(1, cap)
    }

    fn user(&mut self) -> i64 {
        self.seq.next_in(1, self.bounds.max_users)
    }

    fn event_for(&mut self, user: i64) -> Event {
        let timestamp = self.tick();
        let bytes = self.routine_bytes();
        Event::new(timestamp, user, bytes)
    }

    fn event(&mut self) -> Event {
        let user = self.user();
        self.event_for(user)
    }

    fn stream(&mut self, len: usize) -> Vec<Event> {
        (0..len).map(|_| self.event()).collect()
    }
}

/// Recipes over timestamped event streams
#[derive(Debug, Clone, Copy, Default)]
pub struct EventStreamFamily;

impl Family for EventStreamFamily {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Events
    }

    fn generate(&self, ctx: &FamilyContext<'_>) -> Vec<RawCase> {
        let bounds = ctx.problem.constraints.event_bounds();
        let seed = ctx.seed();
        let window = ctx.config.window_ms;
        let shape = ctx.input_shape();
        let synth = |recipe: u32| Synth::new(seed, recipe, bounds);
        let mk = |slug: &str, name: &str, events: Vec<Event>, targets: &[&str]| {
            RawCase::from_payload(slug, name, targets, Payload::Events { events }, shape)
        };

        let mut cases = Vec::new();

        let mut s = synth(WINDOW_BOUNDARY);
        let opening = s.event();
        let closing = Event::new(
            opening.timestamp.saturating_add(window),
            opening.user,
            s.routine_bytes(),
        );
        cases.push(mk(
            "window-boundary",
            "Window boundary",
            vec![opening, closing],
            &["boundary"],
        ));

        let mut s = synth(LATE_ARRIVAL);
        let mut events = s.stream(3);
        let previous = events.last().map_or(BASE_TIMESTAMP, |e| e.timestamp);
        let late = Event::new(
            previous.saturating_sub(s.seq.next_in(GAP_MIN, GAP_MAX)),
            s.user(),
            s.routine_bytes(),
        );
        events.push(late);
        cases.push(mk("late-arrival", "Late arrival", events, &["ordering"]));

        let mut s = synth(DUPLICATE_EVENT);
        let mut events = s.stream(3);
        events.insert(2, events[1]);
        cases.push(mk(
            "duplicate-event",
            "Duplicate event",
            events,
            &["duplicates"],
        ));

        let mut s = synth(BYTE_BUDGET);
        let events = budget_sizes(bounds.max_bytes.saturating_add(1))
            .into_iter()
            .map(|bytes| {
                let timestamp = s.tick();
                Event::new(timestamp, s.user(), bytes)
            })
            .collect();
        cases.push(mk(
            "byte-budget",
            "Byte budget overflow",
            events,
            &["boundary"],
        ));

        if bounds.max_users >= 2 {
            let mut s = synth(MULTI_USER);
            let users = bounds.max_users.min(MAX_INTERLEAVED_USERS);
            let events = (0..2)
                .flat_map(|_| 1..=users)
                .map(|user| s.event_for(user))
                .collect();
            cases.push(mk(
                "multi-user",
                "Multi-user interleaving",
                events,
                &["ordering", "isolation"],
            ));
        }

        let mut s = synth(SINGLE_EVENT);
        cases.push(mk(
            "single-event",
            "Single event",
            vec![s.event_for(1)],
            &["degenerate"],
        ));

        let mut s = synth(TWO_EVENTS);
        let first = s.event_for(1);
        let second = s.event_for(bounds.max_users.min(2));
        cases.push(mk(
            "two-events",
            "Two events",
            vec![first, second],
            &["degenerate"],
        ));

        cases
    }
}

/// Split `total` bytes over at most four events, remainder on the last
///
/// A budget of `i64::MAX` saturates: the stream then totals exactly the budget.
fn budget_sizes(total: i64) -> Vec<i64> {
    let total = total.max(1);
    let parts = total.min(4);
    let share = total / parts;
    let mut sizes = vec![share; usize::try_from(parts).unwrap_or(1)];
    if let Some(last) = sizes.last_mut() {
        *last += total % parts;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, GenerationOptions};
    use crate::problem::{Constraints, ProblemDefinition};

    fn run_with(constraints: Constraints, options: &GenerationOptions) -> Vec<RawCase> {
        let problem = ProblemDefinition::new(["events"], constraints);
        let config = EngineConfig::default();
        EventStreamFamily.generate(&FamilyContext::new(&problem, options, &config))
    }

    fn run() -> Vec<RawCase> {
        run_with(Constraints::default(), &GenerationOptions::default())
    }

    fn events_of(case: &RawCase) -> Vec<Event> {
        match &case.payload {
            Some(Payload::Events { events }) => events.clone(),
            other => panic!("expected events payload, got {other:?}"),
        }
    }

    fn find<'a>(cases: &'a [RawCase], name: &str) -> &'a RawCase {
        cases
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing case {name}"))
    }

    #[test]
    fn test_catalog() {
        let names: Vec<String> = run().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Window boundary",
                "Late arrival",
                "Duplicate event",
                "Byte budget overflow",
                "Multi-user interleaving",
                "Single event",
                "Two events",
            ]
        );
    }

    #[test]
    fn test_window_boundary_gap() {
        let events = events_of(find(&run(), "Window boundary"));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].timestamp - events[0].timestamp, 60_000);
        assert_eq!(events[0].user, events[1].user);
    }

    #[test]
    fn test_late_arrival_goes_backwards() {
        let events = events_of(find(&run(), "Late arrival"));
        assert_eq!(events.len(), 4);
        assert!(events[3].timestamp < events[2].timestamp);
        assert!(events[..3].windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_duplicate_adjacent() {
        let events = events_of(find(&run(), "Duplicate event"));
        assert_eq!(events.len(), 4);
        assert_eq!(events[1], events[2]);
    }

    #[test]
    fn test_byte_budget_barely_exceeded() {
        let constraints = Constraints {
            max_bytes: Some(1000),
            ..Constraints::default()
        };
        let cases = run_with(constraints, &GenerationOptions::default());
        let events = events_of(find(&cases, "Byte budget overflow"));
        let total: i64 = events.iter().map(|e| e.bytes).sum();
        assert_eq!(total, 1001);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_budget_sizes() {
        assert_eq!(budget_sizes(1025), vec![256, 256, 256, 257]);
        assert_eq!(budget_sizes(2), vec![1, 1]);
        assert_eq!(budget_sizes(1), vec![1]);
    }

    #[test]
    fn test_extreme_bounds_saturate() {
        let constraints = Constraints {
            max_users: Some(i64::MAX),
            max_bytes: Some(i64::MAX),
            jitter_ms: Some(i64::MAX),
            ..Constraints::default()
        };
        let cases = run_with(constraints, &GenerationOptions::default());
        assert_eq!(cases.len(), 7);

        let budget = events_of(find(&cases, "Byte budget overflow"));
        assert_eq!(budget.len(), 4);
        assert_eq!(budget.iter().fold(0i64, |acc, e| acc.saturating_add(e.bytes)), i64::MAX);
        assert_eq!(find(&cases, "Byte budget overflow").params["bytes"], i64::MAX);

        let window = events_of(find(&cases, "Window boundary"));
        assert!(window[1].timestamp >= window[0].timestamp);
        let stream = events_of(find(&cases, "Multi-user interleaving"));
        assert!(stream.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_multi_user_interleaving() {
        let constraints = Constraints {
            max_users: Some(3),
            ..Constraints::default()
        };
        let cases = run_with(constraints, &GenerationOptions::default());
        let users: Vec<i64> = events_of(find(&cases, "Multi-user interleaving"))
            .iter()
            .map(|e| e.user)
            .collect();
        assert_eq!(users, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_single_user_skips_interleaving() {
        let constraints = Constraints {
            max_users: Some(1),
            ..Constraints::default()
        };
        let cases = run_with(constraints, &GenerationOptions::default());
        assert!(cases.iter().all(|c| c.name != "Multi-user interleaving"));
        let two = events_of(find(&cases, "Two events"));
        assert!(two.iter().all(|e| e.user == 1));
    }

    #[test]
    fn test_single_event_golden() {
        assert_eq!(find(&run(), "Single event").content, "1435 1 184");
    }

    #[test]
    fn test_jitter_only_delays() {
        let calm = run();
        let jittery = run_with(
            Constraints {
                jitter_ms: Some(500),
                ..Constraints::default()
            },
            &GenerationOptions::default(),
        );
        let calm_first = events_of(find(&calm, "Single event"))[0].timestamp;
        let jitter_first = events_of(find(&jittery, "Single event"))[0].timestamp;
        assert!(jitter_first >= calm_first);
    }

    #[test]
    fn test_seed_changes_streams() {
        let a = run_with(Constraints::default(), &GenerationOptions::default().with_seed(1));
        let b = run_with(Constraints::default(), &GenerationOptions::default().with_seed(2));
        assert_ne!(
            find(&a, "Late arrival").content,
            find(&b, "Late arrival").content
        );
    }

    #[test]
    fn test_not_affected_by_exclude_randomness() {
        let with = run();
        let without = run_with(
            Constraints::default(),
            &GenerationOptions::default().without_randomness(),
        );
        assert_eq!(with, without);
    }
}
