#![forbid(unsafe_code)]

//! Undo/redo history over opaque snapshots.
//!
//! [`History`] keeps two stacks of [`Snapshot`]s and moves entries between
//! them. It never looks inside a snapshot.
//!
//! # Architecture
//!
//! ```text
//! record(s1), record(s2), record(s3)
//! ┌──────────────────────────────────────────────┐
//! │ Undo Stack:  [s1, s2, s3]                    │
//! │ Redo Stack:  []                              │
//! └──────────────────────────────────────────────┘
//!
//! undo() -> s3, undo() -> s2
//! ┌──────────────────────────────────────────────┐
//! │ Undo Stack:  [s1]                            │
//! │ Redo Stack:  [s3, s2]                        │
//! └──────────────────────────────────────────────┘
//!
//! record(s4): new branch, clears redo
//! ┌──────────────────────────────────────────────┐
//! │ Undo Stack:  [s1, s4]                        │
//! │ Redo Stack:  []                              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every `undo` pops, including the last entry: after `record(x); undo()` the
//! undo stack is empty and `x` sits on the redo stack.
//!
//! # Capacity
//!
//! [`HistoryConfig::max_depth`] bounds the undo stack. Recording past the
//! bound evicts the oldest entries. `record` empties the redo stack and
//! `undo`/`redo` only move entries, so the bound also caps
//! [`total_snapshots`](History::total_snapshots).

use std::collections::VecDeque;
use std::fmt;

use crate::error::{Direction, HistoryError};
use crate::snapshot::Snapshot;

const TARGET: &str = "rewind.history";

/// Configuration for a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "history-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained in the undo stack.
    /// Oldest snapshots are evicted when this limit is exceeded.
    ///
    /// In config files the unbounded value is written `"unlimited"`.
    #[cfg_attr(feature = "history-config", serde(with = "crate::config::max_depth"))]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// A single save/restore slot: each record replaces the previous one.
    #[must_use]
    pub fn single_slot() -> Self {
        Self { max_depth: 1 }
    }

    /// Whether a depth limit applies.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.max_depth != usize::MAX
    }
}

/// Undo/redo history of [`Snapshot`]s.
///
/// # Invariants
///
/// 1. The redo stack is empty after every [`record`](Self::record).
/// 2. Each recorded entry lives in at most one of the two stacks. Recording
///    clones of one [`Snapshot`] creates separate entries that share an
///    allocation, so `ptr_eq` can match across stacks.
/// 3. `undo_depth() <= config.max_depth` after any operation.
/// 4. [`undo`](Self::undo) and [`redo`](Self::redo) fail with
///    [`HistoryError::EmptyHistory`] exactly when the matching stack is empty,
///    and leave the history unchanged when they do.
pub struct History<T> {
    /// Snapshots available for undo (newest at back).
    undo_stack: VecDeque<Snapshot<T>>,
    /// Snapshots available for redo (most recently undone at back).
    redo_stack: VecDeque<Snapshot<T>>,
    config: HistoryConfig,
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl<T> History<T> {
    /// Create an empty history with the given configuration.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
        }
    }

    /// Create an empty history with default configuration.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(HistoryConfig::default())
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Record a snapshot as the newest undo entry.
    ///
    /// Always clears the redo stack: once state diverges, previously undone
    /// snapshots are unreachable. If the undo stack exceeds `max_depth`, the
    /// oldest snapshot is evicted.
    pub fn record(&mut self, snapshot: Snapshot<T>) {
        let discarded = self.redo_stack.len();
        self.redo_stack.clear();
        self.undo_stack.push_back(snapshot);
        self.enforce_depth();
        tracing::debug!(
            target: TARGET,
            undo_depth = self.undo_stack.len(),
            discarded_redo = discarded,
            "snapshot recorded"
        );
    }

    /// Capture `state` and record it.
    pub fn record_state(&mut self, state: T) {
        self.record(Snapshot::new(state));
    }

    /// Pop the newest undo entry, move it to the redo stack, and return it.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when the undo stack is empty.
    pub fn undo(&mut self) -> Result<Snapshot<T>, HistoryError> {
        let snapshot = Self::step(&mut self.undo_stack, &mut self.redo_stack, Direction::Undo)?;
        tracing::debug!(
            target: TARGET,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo"
        );
        Ok(snapshot)
    }

    /// Pop the most recently undone entry, move it back to the undo stack,
    /// and return it.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when the redo stack is empty.
    pub fn redo(&mut self) -> Result<Snapshot<T>, HistoryError> {
        let snapshot = Self::step(&mut self.redo_stack, &mut self.undo_stack, Direction::Redo)?;
        tracing::debug!(
            target: TARGET,
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        Ok(snapshot)
    }

    fn step(
        from: &mut VecDeque<Snapshot<T>>,
        to: &mut VecDeque<Snapshot<T>>,
        direction: Direction,
    ) -> Result<Snapshot<T>, HistoryError> {
        let Some(snapshot) = from.pop_back() else {
            tracing::trace!(target: TARGET, %direction, "refused: history empty");
            return Err(HistoryError::empty(direction));
        };
        to.push_back(snapshot.clone());
        Ok(snapshot)
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The snapshot the next [`undo`](Self::undo) would return.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&Snapshot<T>> {
        self.undo_stack.back()
    }

    /// The snapshot the next [`redo`](Self::redo) would return.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&Snapshot<T>> {
        self.redo_stack.back()
    }

    /// Undo entries, newest first.
    pub fn iter_undo(&self) -> impl DoubleEndedIterator<Item = &Snapshot<T>> + ExactSizeIterator {
        self.undo_stack.iter().rev()
    }

    /// Redo entries, next-to-redo first.
    pub fn iter_redo(&self) -> impl DoubleEndedIterator<Item = &Snapshot<T>> + ExactSizeIterator {
        self.redo_stack.iter().rev()
    }

    /// Number of snapshots on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of snapshots on the redo stack.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total number of snapshots across both stacks.
    #[must_use]
    pub fn total_snapshots(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    /// Check if the history holds no snapshots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty() && self.redo_stack.is_empty()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Change the depth limit, evicting immediately if it shrank.
    ///
    /// Oldest undo entries go first. If the redo stack alone still exceeds
    /// the limit, its farthest-future entries are dropped.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.config.max_depth = max_depth;
        let excess = self.total_snapshots().saturating_sub(max_depth);
        if excess == 0 {
            return;
        }
        let from_undo = excess.min(self.undo_stack.len());
        self.undo_stack.drain(..from_undo);
        self.redo_stack.drain(..excess - from_undo);
        tracing::trace!(
            target: TARGET,
            evicted_undo = from_undo,
            evicted_redo = excess - from_undo,
            max_depth,
            "depth limit lowered"
        );
    }

    /// Clear all snapshots.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Enforce the depth limit by evicting the oldest snapshots.
    fn enforce_depth(&mut self) {
        let excess = self.undo_stack.len().saturating_sub(self.config.max_depth);
        if excess > 0 {
            self.undo_stack.drain(..excess);
            tracing::trace!(
                target: TARGET,
                evicted = excess,
                max_depth = self.config.max_depth,
                "evicted oldest snapshots"
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
