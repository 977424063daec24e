#![forbid(unsafe_code)]

//! Rewind
//!
//! Snapshot-based undo/redo for any state that can be captured and restored.
//!
//! # Key Components
//!
//! - [`Snapshot`] - Immutable, `Arc`-shared capture of owner state
//! - [`History`] - Undo and redo stacks of snapshots, with an optional depth limit
//! - [`Owner`] - Contract for objects whose state is captured and restored
//! - [`Caretaker`] - Checkpoints an owner after every change and restores on undo/redo
//! - [`SharedHistory`] - Lock-guarded history handle for use across threads
//!
//! # Protocol
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         History                              │
//! │  ┌──────────────────┐          ┌──────────────────┐          │
//! │  │   Undo Stack     │          │   Redo Stack     │          │
//! │  │  ┌────────────┐  │  undo()  │  ┌────────────┐  │          │
//! │  │  │ SnapshotN  │  │ ──────►  │  │ Snapshot1  │  │          │
//! │  │  ├────────────┤  │          │  ├────────────┤  │          │
//! │  │  │ Snapshot2  │  │  ◄────── │  │ Snapshot2  │  │          │
//! │  │  ├────────────┤  │  redo()  │  ├────────────┤  │          │
//! │  │  │ Snapshot1  │  │          │  │ SnapshotN  │  │          │
//! │  │  └────────────┘  │          │  └────────────┘  │          │
//! │  └──────────────────┘          └──────────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recording a snapshot always clears the redo stack. `undo` and `redo` fail
//! with [`HistoryError::EmptyHistory`] when their stack is empty; that is a
//! "nothing to do" signal, not a fatal error.
//!
//! # Features
//!
//! - `history-config`: load [`HistoryConfig`] from TOML or JSON.
//! - `hamt`: re-export `im` persistent collections as [`persistent`].

#[cfg(feature = "history-config")]
pub mod config;
pub mod error;
pub mod history;
pub mod owner;
pub mod shared;
pub mod snapshot;

#[cfg(feature = "history-config")]
pub use config::HistoryConfigError;
pub use error::{Direction, HistoryError};
pub use history::{History, HistoryConfig};
pub use owner::{Caretaker, Owner};
pub use shared::SharedHistory;
pub use snapshot::Snapshot;

/// Persistent collection types for snapshot-friendly state.
///
/// When the `hamt` feature is enabled, this module re-exports types from
/// the [`im`] crate. Cloning them is O(log n) and shares structure, so
/// capturing a large state for every [`Snapshot`] stays cheap.
///
/// ```
/// use rewind::persistent;
///
/// let mut map = persistent::HashMap::new();
/// map.insert("key", 42);
/// let snapshot = rewind::Snapshot::new(map.clone());
/// map.insert("key2", 99);
///
/// assert_eq!(snapshot.payload().len(), 1);
/// assert_eq!(snapshot.payload().get("key"), Some(&42));
/// assert_eq!(map.len(), 2);
/// ```
#[cfg(feature = "hamt")]
pub mod persistent {
    pub use im::{HashMap, HashSet, OrdMap, OrdSet, Vector};
}
