#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rewind::{History, HistoryConfig, Snapshot};

#[derive(Debug, Arbitrary)]
enum Op {
    Record(u16),
    Undo,
    Redo,
    SetMaxDepth(u8),
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_depth: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut history = History::new(HistoryConfig::new(input.max_depth as usize));

    for op in input.ops.iter().take(4096) {
        let before = (history.undo_depth(), history.redo_depth());
        match op {
            Op::Record(v) => {
                history.record_state(*v);
                assert!(!history.can_redo(), "record must clear redo");
            }
            Op::Undo => match history.undo() {
                Ok(snap) => {
                    assert_eq!(history.undo_depth() + 1, before.0);
                    assert!(Snapshot::ptr_eq(&snap, history.peek_redo().expect("undone entry")));
                }
                Err(_) => assert_eq!(before.0, 0),
            },
            Op::Redo => match history.redo() {
                Ok(snap) => {
                    assert_eq!(history.redo_depth() + 1, before.1);
                    assert!(Snapshot::ptr_eq(&snap, history.peek_undo().expect("redone entry")));
                }
                Err(_) => assert_eq!(before.1, 0),
            },
            Op::SetMaxDepth(d) => history.set_max_depth(*d as usize),
            Op::Clear => history.clear(),
        }

        // Post-conditions that must always hold:
        assert!(history.total_snapshots() <= history.config().max_depth);
        assert_eq!(history.can_undo(), history.undo_depth() > 0);
        assert_eq!(history.can_redo(), history.redo_depth() > 0);
        for u in history.iter_undo() {
            assert!(history.iter_redo().all(|r| !Snapshot::ptr_eq(u, r)));
        }
    }
});
