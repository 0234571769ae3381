// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable doubles for exercising the activation loop.
//!
//! Real hosts implement the [`backend`](buttress_core::backend) contracts
//! over native view and constraint objects. This crate provides in-memory
//! stand-ins for tests and demos:
//!
//! - [`ViewWorld`] — a growable set of views with per-view hidden/alpha
//!   state, implementing [`ViewVisibility`].
//! - [`RecordingEngine`] — a [`LayoutEngine`] that records every batch it
//!   receives, in call order.
//! - [`ScriptedDelegate`] — an [`ActivationDelegate`] answering from a
//!   per-record verdict map with a configurable fallback.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use buttress_core::backend::{ActivationDelegate, LayoutEngine, ViewVisibility};
use buttress_core::constraint::{ConstraintId, ConstraintStore, ViewId};

/// Per-view visibility state.
#[derive(Clone, Copy, Debug)]
struct ViewState {
    hidden: bool,
    alpha: f32,
}

/// In-memory view hierarchy double.
///
/// Views are flat; there is no ancestor chain, which matches the evaluator's
/// own-flags-only notion of visibility. Queries about views this world never
/// created read as fully visible, mirroring the evaluator's permissive
/// defaults.
#[derive(Debug, Default)]
pub struct ViewWorld {
    views: Vec<ViewState>,
}

impl ViewWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a visible, fully opaque view.
    pub fn create_view(&mut self) -> ViewId {
        let idx = self.views.len() as u32;
        self.views.push(ViewState {
            hidden: false,
            alpha: 1.0,
        });
        ViewId(idx)
    }

    /// Sets a view's hidden flag.
    ///
    /// # Panics
    ///
    /// Panics if the view was not created by this world.
    pub fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        self.state_mut(view).hidden = hidden;
    }

    /// Sets a view's alpha.
    ///
    /// # Panics
    ///
    /// Panics if the view was not created by this world.
    pub fn set_alpha(&mut self, view: ViewId, alpha: f32) {
        self.state_mut(view).alpha = alpha;
    }

    fn state_mut(&mut self, view: ViewId) -> &mut ViewState {
        let len = self.views.len();
        self.views
            .get_mut(view.0 as usize)
            .unwrap_or_else(|| panic!("unknown ViewId({}) (world has {len} views)", view.0))
    }
}

impl ViewVisibility for ViewWorld {
    fn is_hidden(&self, view: ViewId) -> bool {
        self.views
            .get(view.0 as usize)
            .is_some_and(|state| state.hidden)
    }

    fn alpha(&self, view: ViewId) -> f32 {
        self.views
            .get(view.0 as usize)
            .map_or(1.0, |state| state.alpha)
    }
}

/// Which batch primitive an engine call used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOp {
    /// The batch was passed to `activate_all`.
    Activate,
    /// The batch was passed to `deactivate_all`.
    Deactivate,
}

/// One recorded engine call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedBatch {
    /// Which primitive was invoked.
    pub op: BatchOp,
    /// The raw slot indices passed, in input order.
    pub constraints: Vec<u32>,
}

/// Layout-engine double that records every batch it is handed.
///
/// The store mirrors activation itself during `apply`, so this double does
/// nothing but observe, the way a native engine's side effects are invisible
/// to the core.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    batches: Vec<AppliedBatch>,
}

impl RecordingEngine {
    /// Creates an engine with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded call, oldest first.
    #[must_use]
    pub fn batches(&self) -> &[AppliedBatch] {
        &self.batches
    }

    /// Returns how many `activate_all` calls were recorded.
    #[must_use]
    pub fn activate_calls(&self) -> usize {
        self.batches
            .iter()
            .filter(|batch| batch.op == BatchOp::Activate)
            .count()
    }

    /// Returns how many `deactivate_all` calls were recorded.
    #[must_use]
    pub fn deactivate_calls(&self) -> usize {
        self.batches
            .iter()
            .filter(|batch| batch.op == BatchOp::Deactivate)
            .count()
    }

    /// Forgets all recorded calls.
    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl LayoutEngine for RecordingEngine {
    fn activate_all(&mut self, _store: &ConstraintStore, batch: &[u32]) {
        self.batches.push(AppliedBatch {
            op: BatchOp::Activate,
            constraints: batch.to_vec(),
        });
    }

    fn deactivate_all(&mut self, _store: &ConstraintStore, batch: &[u32]) {
        self.batches.push(AppliedBatch {
            op: BatchOp::Deactivate,
            constraints: batch.to_vec(),
        });
    }
}

/// Delegate double answering from a per-record verdict map.
#[derive(Debug)]
pub struct ScriptedDelegate {
    verdicts: HashMap<u32, bool>,
    fallback: bool,
}

impl ScriptedDelegate {
    /// Creates a delegate that answers `fallback` for unscripted records.
    #[must_use]
    pub fn new(fallback: bool) -> Self {
        Self {
            verdicts: HashMap::new(),
            fallback,
        }
    }

    /// Scripts the verdict for one record.
    pub fn set(&mut self, constraint: ConstraintId, should_activate: bool) {
        self.verdicts.insert(constraint.index(), should_activate);
    }
}

impl ActivationDelegate for ScriptedDelegate {
    fn should_activate(&self, _store: &ConstraintStore, constraint: ConstraintId) -> bool {
        self.verdicts
            .get(&constraint.index())
            .copied()
            .unwrap_or(self.fallback)
    }
}
