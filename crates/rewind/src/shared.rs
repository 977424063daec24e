#![forbid(unsafe_code)]

//! Lock-guarded history handle for sharing across threads.
//!
//! [`SharedHistory`] is a cheap, cloneable handle around one
//! [`History`]. Each operation holds the lock for its whole duration and
//! nothing else: owner code never runs while the lock is held.
//! [`record_from`](SharedHistory::record_from) captures before locking, and
//! `undo`/`redo` return owned snapshots so the owner restores after the lock
//! is released.
//!
//! Construct one per owner and pass clones to the collaborators that need
//! it; there is no process-wide instance.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::HistoryError;
use crate::history::{History, HistoryConfig};
use crate::owner::Owner;
use crate::snapshot::Snapshot;

const TARGET: &str = "rewind.shared";

/// Cloneable, thread-safe handle to a [`History`].
pub struct SharedHistory<T> {
    inner: Arc<Mutex<History<T>>>,
}

impl<T> Clone for SharedHistory<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SharedHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.lock();
        f.debug_struct("SharedHistory")
            .field("undo_depth", &history.undo_depth())
            .field("redo_depth", &history.redo_depth())
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

impl<T> Default for SharedHistory<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T> From<History<T>> for SharedHistory<T> {
    fn from(history: History<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }
}

impl<T> SharedHistory<T> {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        History::new(config).into()
    }

    // A panic elsewhere cannot leave History half-updated: every mutation
    // completes before the guard drops.
    fn lock(&self) -> MutexGuard<'_, History<T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(target: TARGET, "recovering poisoned history lock");
                poisoned.into_inner()
            }
        }
    }

    /// See [`History::record`].
    pub fn record(&self, snapshot: Snapshot<T>) {
        self.lock().record(snapshot);
    }

    /// See [`History::record_state`].
    pub fn record_state(&self, state: T) {
        self.record(Snapshot::new(state));
    }

    /// Capture `owner` outside the lock, then record the snapshot.
    pub fn record_from<O>(&self, owner: &O) -> Snapshot<T>
    where
        O: Owner<State = T>,
    {
        let snapshot = Snapshot::new(owner.capture());
        self.record(snapshot.clone());
        snapshot
    }

    /// See [`History::undo`].
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when the undo sequence is empty.
    pub fn undo(&self) -> Result<Snapshot<T>, HistoryError> {
        self.lock().undo()
    }

    /// See [`History::redo`].
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when the redo sequence is empty.
    pub fn redo(&self) -> Result<Snapshot<T>, HistoryError> {
        self.lock().redo()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }

    /// `(undo_depth, redo_depth)` read under a single lock.
    #[must_use]
    pub fn depths(&self) -> (usize, usize) {
        let history = self.lock();
        (history.undo_depth(), history.redo_depth())
    }

    /// Clone of the entry the next undo would return.
    #[must_use]
    pub fn peek_undo(&self) -> Option<Snapshot<T>> {
        self.lock().peek_undo().cloned()
    }

    /// Clone of the entry the next redo would return.
    #[must_use]
    pub fn peek_redo(&self) -> Option<Snapshot<T>> {
        self.lock().peek_redo().cloned()
    }

    #[must_use]
    pub fn config(&self) -> HistoryConfig {
        *self.lock().config()
    }

    /// See [`History::set_max_depth`].
    pub fn set_max_depth(&self, max_depth: usize) {
        self.lock().set_max_depth(max_depth);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
