#![forbid(unsafe_code)]

//! Owner contract and the checkpointing [`Caretaker`].
//!
//! An [`Owner`] is whatever object has state worth undoing: a text buffer, a
//! form, a document tree. It only has to produce its state
//! ([`capture`](Owner::capture)) and accept a state back
//! ([`apply`](Owner::apply)).
//!
//! [`Caretaker`] binds one owner to one [`History`] and checkpoints after
//! every change. The newest undo entry is always the owner's current
//! checkpoint, so stepping back restores the entry beneath it:
//!
//! ```text
//! edit A, edit B, edit C        Undo: [A, B, C]   Redo: []       owner = C
//! undo() -> B                   Undo: [A, B]      Redo: [C]      owner = B
//! undo() -> A                   Undo: [A]         Redo: [C, B]   owner = A
//! redo() -> B                   Undo: [A, B]      Redo: [C]      owner = B
//! edit D                        Undo: [A, B, D]   Redo: []       owner = D
//! ```
//!
//! # Example
//!
//! ```
//! use rewind::{Caretaker, HistoryConfig, Owner};
//!
//! struct Editor {
//!     text: String,
//! }
//!
//! impl Owner for Editor {
//!     type State = String;
//!
//!     fn capture(&self) -> String {
//!         self.text.clone()
//!     }
//!
//!     fn apply(&mut self, state: String) {
//!         self.text = state;
//!     }
//! }
//!
//! let mut caretaker = Caretaker::new(Editor { text: "Hello C#".into() }, HistoryConfig::default());
//! caretaker.record();
//! caretaker.edit(|e| e.text = "Hello .Net".into());
//!
//! caretaker.undo().unwrap();
//! assert_eq!(caretaker.owner().text, "Hello C#");
//! caretaker.redo().unwrap();
//! assert_eq!(caretaker.owner().text, "Hello .Net");
//! ```

use std::fmt;

use crate::error::{Direction, HistoryError};
use crate::history::{History, HistoryConfig};
use crate::snapshot::Snapshot;

const TARGET: &str = "rewind.caretaker";

/// An object whose state can be captured and restored.
pub trait Owner {
    /// Everything the owner considers its full state.
    type State;

    /// Produce the current state.
    fn capture(&self) -> Self::State;

    /// Overwrite the current state.
    fn apply(&mut self, state: Self::State);
}

impl<O: Owner + ?Sized> Owner for Box<O> {
    type State = O::State;

    fn capture(&self) -> Self::State {
        (**self).capture()
    }

    fn apply(&mut self, state: Self::State) {
        (**self).apply(state);
    }
}

/// Drives an [`Owner`] through a [`History`] of its checkpoints.
pub struct Caretaker<O: Owner> {
    owner: O,
    history: History<O::State>,
}

impl<O> fmt::Debug for Caretaker<O>
where
    O: Owner + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caretaker")
            .field("owner", &self.owner)
            .field("history", &self.history)
            .finish()
    }
}

impl<O> Caretaker<O>
where
    O: Owner,
    O::State: Clone,
{
    /// Wrap `owner`. Nothing is recorded until [`record`](Self::record).
    #[must_use]
    pub fn new(owner: O, config: HistoryConfig) -> Self {
        Self {
            owner,
            history: History::new(config),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Mutable access to the owner. Call [`record`](Self::record) afterwards
    /// to checkpoint the change, or [`revert`](Self::revert) to drop it.
    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    #[must_use]
    pub fn history(&self) -> &History<O::State> {
        &self.history
    }

    /// Release the owner and its history.
    #[must_use]
    pub fn into_inner(self) -> (O, History<O::State>) {
        (self.owner, self.history)
    }

    /// Checkpoint the owner's current state. Clears the redo sequence.
    pub fn record(&mut self) -> Snapshot<O::State> {
        let snapshot = Snapshot::new(self.owner.capture());
        self.history.record(snapshot.clone());
        snapshot
    }

    /// Mutate the owner through `f`, then checkpoint the result.
    pub fn edit<F>(&mut self, f: F) -> Snapshot<O::State>
    where
        F: FnOnce(&mut O),
    {
        f(&mut self.owner);
        self.record()
    }

    /// Step back to the previous checkpoint and apply it to the owner.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] unless there is a checkpoint before the
    /// current one. The owner and history are untouched in that case.
    pub fn undo(&mut self) -> Result<Snapshot<O::State>, HistoryError> {
        if !self.can_undo() {
            tracing::trace!(
                target: TARGET,
                undo_depth = self.history.undo_depth(),
                "undo refused: no earlier checkpoint"
            );
            return Err(HistoryError::empty(Direction::Undo));
        }
        self.history.undo()?;
        let target = self
            .history
            .peek_undo()
            .cloned()
            .ok_or(HistoryError::empty(Direction::Undo))?;
        self.owner.apply(target.to_payload());
        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "restored previous checkpoint"
        );
        Ok(target)
    }

    /// Replay the most recently undone checkpoint into the owner.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when nothing has been undone since the
    /// last record.
    pub fn redo(&mut self) -> Result<Snapshot<O::State>, HistoryError> {
        let target = self.history.redo()?;
        self.owner.apply(target.to_payload());
        tracing::debug!(
            target: TARGET,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "replayed checkpoint"
        );
        Ok(target)
    }

    /// Re-apply the current checkpoint, discarding owner changes made since
    /// the last [`record`](Self::record). History is not modified.
    ///
    /// # Errors
    ///
    /// [`HistoryError::EmptyHistory`] when no checkpoint exists.
    pub fn revert(&mut self) -> Result<Snapshot<O::State>, HistoryError> {
        let target = self
            .history
            .peek_undo()
            .cloned()
            .ok_or(HistoryError::empty(Direction::Undo))?;
        self.owner.apply(target.to_payload());
        tracing::debug!(target: TARGET, "reverted to checkpoint");
        Ok(target)
    }

    /// Whether a checkpoint exists before the current one.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.undo_depth() >= 2
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
