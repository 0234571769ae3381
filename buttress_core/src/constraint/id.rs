// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint and view identity types.

use core::fmt;

/// A handle to a constraint record in a
/// [`ConstraintStore`](super::ConstraintStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a record is destroyed and the slot is reused.
/// Record identity is handle identity; no two records compare equal by their
/// field values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ConstraintId {
    /// Returns the raw slot index (as found in activation batches).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstraintId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a view owned by the host hierarchy.
///
/// Views are created, destroyed, and laid out externally; this crate only
/// ever asks the host about their visibility through
/// [`ViewVisibility`](crate::backend::ViewVisibility). A constraint with
/// `None` as its second participant is a single-view constraint (e.g. a
/// fixed size).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u32);

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}
