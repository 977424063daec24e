#![forbid(unsafe_code)]

//! Property tests for [`History`] invariants.
//!
//! Validates:
//! - Undo yields recorded snapshots in exact reverse order.
//! - Redo immediately after undo returns the same snapshot and restores the
//!   undo stack.
//! - Record always clears redo.
//! - Depth limits are never exceeded and evict the oldest entries.
//! - The two stacks never share a snapshot.
//! - Random operation sequences match a plain two-`Vec` reference model.

use proptest::prelude::*;

use rewind::{Direction, History, HistoryConfig, HistoryError, Snapshot};

// ============================================================================
// Strategy helpers
// ============================================================================

/// Operations that can be performed on a History.
#[derive(Debug, Clone)]
enum Op {
    Record(i64),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i64>().prop_map(Op::Record),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

fn undo_values(history: &History<i64>) -> Vec<i64> {
    history.iter_undo().map(|s| *s.payload()).collect()
}

/// Reference model: newest at the back of each Vec.
#[derive(Debug, Default)]
struct Model {
    undo: Vec<i64>,
    redo: Vec<i64>,
    max_depth: usize,
}

impl Model {
    fn apply(&mut self, op: &Op) -> Option<i64> {
        match op {
            Op::Record(v) => {
                self.redo.clear();
                self.undo.push(*v);
                if self.undo.len() > self.max_depth {
                    let excess = self.undo.len() - self.max_depth;
                    self.undo.drain(..excess);
                }
                None
            }
            Op::Undo => {
                let v = self.undo.pop()?;
                self.redo.push(v);
                Some(v)
            }
            Op::Redo => {
                let v = self.redo.pop()?;
                self.undo.push(v);
                Some(v)
            }
        }
    }
}

// ============================================================================
// Invariant 1: Undo yields snapshots in LIFO order, down to empty
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn undo_is_lifo(values in prop::collection::vec(any::<i32>(), 1..50)) {
        let mut history = History::new(HistoryConfig::unlimited());
        for v in &values {
            history.record_state(*v);
        }

        for expected in values.iter().rev() {
            let undone = history.undo().unwrap();
            prop_assert_eq!(*undone.payload(), *expected);
        }

        prop_assert!(!history.can_undo());
        prop_assert_eq!(history.redo_depth(), values.len());
        prop_assert_eq!(history.undo(), Err(HistoryError::empty(Direction::Undo)));
    }
}

// ============================================================================
// Invariant 2: Redo reverses undo
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn redo_reverses_undo(
        values in prop::collection::vec(any::<i64>(), 1..30),
        undo_count in 0usize..30
    ) {
        let mut history = History::new(HistoryConfig::unlimited());
        for v in &values {
            history.record_state(*v);
        }
        for _ in 0..undo_count.min(values.len() - 1) {
            history.undo().unwrap();
        }

        let before = undo_values(&history);
        let undone = history.undo().unwrap();
        let redone = history.redo().unwrap();

        prop_assert!(Snapshot::ptr_eq(&undone, &redone));
        prop_assert_eq!(undo_values(&history), before);
    }
}

// ============================================================================
// Invariant 3: Record always clears redo
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn record_always_clears_redo(ops in ops_strategy(60)) {
        let mut history = History::new(HistoryConfig::unlimited());

        for op in &ops {
            match op {
                Op::Record(v) => {
                    history.record_state(*v);
                    prop_assert!(!history.can_redo(), "redo not cleared after record");
                }
                Op::Undo => { let _ = history.undo(); }
                Op::Redo => { let _ = history.redo(); }
            }
        }
    }
}

// ============================================================================
// Invariant 4: Depth limit bounds every stack and the total
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn depth_limit_always_enforced(
        max_depth in 1usize..20,
        ops in ops_strategy(100)
    ) {
        let mut history = History::new(HistoryConfig::new(max_depth));

        for op in &ops {
            match op {
                Op::Record(v) => history.record_state(*v),
                Op::Undo => { let _ = history.undo(); }
                Op::Redo => { let _ = history.redo(); }
            }
            prop_assert!(
                history.total_snapshots() <= max_depth,
                "total {} exceeds max_depth {} after {:?}",
                history.total_snapshots(), max_depth, op
            );
        }
    }
}

// ============================================================================
// Invariant 5: Stacks are disjoint
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn stacks_never_share_a_snapshot(ops in ops_strategy(60)) {
        let mut history = History::new(HistoryConfig::unlimited());

        for op in &ops {
            match op {
                Op::Record(v) => history.record_state(*v),
                Op::Undo => { let _ = history.undo(); }
                Op::Redo => { let _ = history.redo(); }
            }
        }

        for u in history.iter_undo() {
            for r in history.iter_redo() {
                prop_assert!(!Snapshot::ptr_eq(u, r));
            }
        }
    }
}

// ============================================================================
// Invariant 6: Matches the reference model step for step
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn matches_reference_model(
        max_depth in 1usize..12,
        ops in ops_strategy(120)
    ) {
        let mut history = History::new(HistoryConfig::new(max_depth));
        let mut model = Model { max_depth, ..Model::default() };

        for op in &ops {
            let expected = model.apply(op);
            match op {
                Op::Record(v) => history.record_state(*v),
                Op::Undo => {
                    let got = history.undo().ok().map(|s| *s.payload());
                    prop_assert_eq!(got, expected);
                }
                Op::Redo => {
                    let got = history.redo().ok().map(|s| *s.payload());
                    prop_assert_eq!(got, expected);
                }
            }

            prop_assert_eq!(history.can_undo(), !model.undo.is_empty());
            prop_assert_eq!(history.can_redo(), !model.redo.is_empty());
            let undo: Vec<i64> = model.undo.iter().rev().copied().collect();
            prop_assert_eq!(undo_values(&history), undo);
        }
    }
}

// ============================================================================
// Invariant 7: Failed steps are no-ops
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn failed_steps_leave_history_unchanged(ops in ops_strategy(40)) {
        let mut history = History::new(HistoryConfig::unlimited());
        for op in &ops {
            if let Op::Record(v) = op {
                history.record_state(*v);
            }
        }

        let before = (history.undo_depth(), history.redo_depth());
        prop_assert!(history.redo().is_err());
        prop_assert_eq!((history.undo_depth(), history.redo_depth()), before);

        while history.undo().is_ok() {}
        let drained = history.redo_depth();
        prop_assert!(history.undo().is_err());
        prop_assert_eq!(history.redo_depth(), drained);
    }
}

// ============================================================================
// Deterministic scenarios
// ============================================================================

#[test]
fn fresh_history_refuses_both_directions() {
    let mut history = History::<String>::with_default_config();
    assert_eq!(history.undo(), Err(HistoryError::empty(Direction::Undo)));
    assert_eq!(history.redo(), Err(HistoryError::empty(Direction::Redo)));
}

#[test]
fn new_edit_forks_away_from_future() {
    let mut history = History::default();
    history.record_state("a");
    history.record_state("b");
    history.undo().unwrap();
    history.record_state("c");

    assert!(!history.can_redo());
    let remaining: Vec<&str> = history.iter_undo().map(|s| *s.payload()).collect();
    assert_eq!(remaining, vec!["c", "a"]);
}

#[test]
fn single_record_drains_to_redo() {
    let mut history = History::default();
    history.record_state("x");
    assert_eq!(*history.undo().unwrap().payload(), "x");
    assert!(!history.can_undo());
    assert!(history.can_redo());
    assert_eq!(history.undo(), Err(HistoryError::empty(Direction::Undo)));
}
