// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation classification and batch assembly.
//!
//! Evaluation is a single synchronous pass over a caller-supplied constraint
//! list. Each record is classified independently, in input order, by an
//! exhaustive match on its [`ActivationRule`]:
//!
//! 1. **`Manual`** — Skipped entirely; the record belongs to the host.
//! 2. **`FirstInvisible`** — Queue an activate when the first participant is
//!    invisible and the record inactive; queue a deactivate when it is
//!    visible and the record active.
//! 3. **`BothVisible`** — Queue a deactivate when any present participant is
//!    invisible and the record active; queue an activate when none is and
//!    the record inactive.
//! 4. **`Delegate`** — Ask the pass's delegate; without one, skip like
//!    `Manual`.
//! 5. **`Always`** — Queue an activate when inactive; never deactivate.
//!
//! A record already in the state its rule wants contributes to neither
//! batch, so re-evaluating with unchanged visibility yields empty batches.
//! Malformed records never error: an absent participant reads as visible.
//!
//! [`ActivationChanges`] uses raw slot indices (`u32`) rather than
//! [`ConstraintId`] handles so that engines can read mirrored fields through
//! the `*_at()` accessors (e.g.
//! [`identifier_at`](super::ConstraintStore::identifier_at)) without paying
//! for generation checks on every access.

use alloc::vec::Vec;

use crate::backend::{ActivationDelegate, LayoutEngine, ViewVisibility};
use crate::rule::ActivationRule;

use super::id::ConstraintId;
use super::store::ConstraintStore;

/// The pair of batches produced by a single
/// [`ConstraintStore::evaluate`] pass.
///
/// Both lists hold raw slot indices in input order. Cross-record order
/// carries no meaning for the engine, which receives each batch whole.
#[derive(Clone, Debug, Default)]
pub struct ActivationChanges {
    /// Records to activate: currently inactive, rule wants them active.
    pub activate: Vec<u32>,
    /// Records to deactivate: currently active, rule wants them inactive.
    pub deactivate: Vec<u32>,
}

impl ActivationChanges {
    /// Clears both batches.
    pub fn clear(&mut self) {
        self.activate.clear();
        self.deactivate.clear();
    }

    /// Returns whether neither batch holds any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activate.is_empty() && self.deactivate.is_empty()
    }
}

impl ConstraintStore {
    /// Classifies `constraints` against current visibility and returns the
    /// activation batches.
    ///
    /// Read-only: no record changes state until the changes are passed to
    /// [`apply`](Self::apply). `delegate` is consulted only for
    /// [`Delegate`](ActivationRule::Delegate)-tagged records; passing `None`
    /// skips those records for this pass.
    ///
    /// # Panics
    ///
    /// Panics if any handle in `constraints` is stale.
    #[must_use]
    pub fn evaluate(
        &self,
        constraints: &[ConstraintId],
        visibility: &impl ViewVisibility,
        delegate: Option<&dyn ActivationDelegate>,
    ) -> ActivationChanges {
        let mut changes = ActivationChanges::default();
        self.evaluate_into(constraints, visibility, delegate, &mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided
    /// buffer to avoid allocation.
    ///
    /// # Panics
    ///
    /// Panics if any handle in `constraints` is stale.
    pub fn evaluate_into(
        &self,
        constraints: &[ConstraintId],
        visibility: &impl ViewVisibility,
        delegate: Option<&dyn ActivationDelegate>,
        changes: &mut ActivationChanges,
    ) {
        changes.clear();

        for &id in constraints {
            self.validate(id);
            let idx = id.idx;
            let active = self.active[idx as usize];

            match self.activation_rule(id) {
                ActivationRule::Manual => {}
                ActivationRule::FirstInvisible => {
                    // An absent participant reads as visible.
                    let invisible = self.first_item[idx as usize]
                        .is_some_and(|view| visibility.is_invisible(view));
                    if invisible && !active {
                        changes.activate.push(idx);
                    } else if !invisible && active {
                        changes.deactivate.push(idx);
                    }
                }
                ActivationRule::BothVisible => {
                    let any_invisible = self.first_item[idx as usize]
                        .is_some_and(|view| visibility.is_invisible(view))
                        || self.second_item[idx as usize]
                            .is_some_and(|view| visibility.is_invisible(view));
                    if any_invisible && active {
                        changes.deactivate.push(idx);
                    } else if !any_invisible && !active {
                        changes.activate.push(idx);
                    }
                }
                ActivationRule::Delegate => {
                    if let Some(delegate) = delegate {
                        let should = delegate.should_activate(self, id);
                        if should && !active {
                            changes.activate.push(idx);
                        } else if !should && active {
                            changes.deactivate.push(idx);
                        }
                    }
                }
                ActivationRule::Always => {
                    if !active {
                        changes.activate.push(idx);
                    }
                }
            }
        }
    }

    /// Pushes the batches to the engine and updates the mirrored flags.
    ///
    /// `deactivate_all` runs before `activate_all` so that a conflicting
    /// pair being swapped in one pass never transits through a state where
    /// both are active. Each primitive is called at most once, and not at
    /// all for an empty batch. The mirror update happens after the engine
    /// calls return; the next evaluation reads the flags fresh.
    pub fn apply(&mut self, changes: &ActivationChanges, engine: &mut impl LayoutEngine) {
        if !changes.deactivate.is_empty() {
            engine.deactivate_all(self, &changes.deactivate);
        }
        if !changes.activate.is_empty() {
            engine.activate_all(self, &changes.activate);
        }

        for &idx in &changes.deactivate {
            self.active[idx as usize] = false;
        }
        for &idx in &changes.activate {
            self.active[idx as usize] = true;
        }
    }

    /// Evaluates `constraints` and applies the result in one call.
    ///
    /// Returns the changes for inspection.
    ///
    /// # Panics
    ///
    /// Panics if any handle in `constraints` is stale.
    pub fn evaluate_and_apply(
        &mut self,
        constraints: &[ConstraintId],
        visibility: &impl ViewVisibility,
        delegate: Option<&dyn ActivationDelegate>,
        engine: &mut impl LayoutEngine,
    ) -> ActivationChanges {
        let changes = self.evaluate(constraints, visibility, delegate);
        self.apply(&changes, engine);
        changes
    }
}
