#![forbid(unsafe_code)]

//! Immutable captures of owner state.
//!
//! A [`Snapshot`] wraps its payload in an [`Arc`]. Cloning a snapshot clones
//! the `Arc`, not the state, so a history holding many snapshots of a
//! persistent data structure (e.g. `im::HashMap`) costs barely more than a
//! single copy.
//!
//! No method hands out `&mut T`. Restoration goes through
//! [`to_payload`](Snapshot::to_payload), which copies the state out, so an
//! owner can never mutate a value that history still references.
//!
//! That guarantee only covers inherited mutability. A payload with interior
//! mutability (`Cell`, `RefCell`, `Mutex`, atomics) can still be changed
//! through [`payload`](Snapshot::payload) and would rewrite history in place,
//! so snapshot types must not contain it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An opaque, immutable capture of owner state at one instant.
///
/// Equality and hashing compare payload content; two snapshots of equal
/// state are equal even when they do not share an allocation. Use
/// [`ptr_eq`](Snapshot::ptr_eq) for identity.
pub struct Snapshot<T> {
    payload: Arc<T>,
}

impl<T> Snapshot<T> {
    /// Capture `payload` by value.
    ///
    /// `T` should be free of interior mutability; see the module docs.
    #[must_use]
    pub fn new(payload: T) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    /// Adopt a payload that is already shared.
    ///
    /// Use this when you already hold an `Arc<T>` and want to avoid
    /// double-wrapping.
    #[must_use]
    pub fn from_arc(payload: Arc<T>) -> Self {
        Self { payload }
    }

    /// Read-only view of the captured state.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// The shared allocation backing this snapshot.
    #[must_use]
    pub fn as_arc(&self) -> &Arc<T> {
        &self.payload
    }

    /// Whether both snapshots share one allocation.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.payload, &b.payload)
    }
}

impl<T: Clone> Snapshot<T> {
    /// Copy the captured state out for restoration.
    #[must_use]
    pub fn to_payload(&self) -> T {
        T::clone(&self.payload)
    }

    /// Move the state out, copying only if other handles remain.
    #[must_use]
    pub fn into_payload(self) -> T {
        Arc::try_unwrap(self.payload).unwrap_or_else(|shared| T::clone(&shared))
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            payload: Arc::clone(&self.payload),
        }
    }
}

impl<T> From<T> for Snapshot<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}

impl<T> AsRef<T> for Snapshot<T> {
    fn as_ref(&self) -> &T {
        &self.payload
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.payload == *other.payload
    }
}

impl<T: Eq> Eq for Snapshot<T> {}

impl<T: Hash> Hash for Snapshot<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.payload.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Snapshot").field(&self.payload).finish()
    }
}
