// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contracts for platform integrations.
//!
//! Buttress splits platform-specific work out of the core. A host platform
//! provides the following pieces:
//!
//! - **Layout engine** — Implements [`LayoutEngine`] to push activation
//!   batches into the native constraint system (e.g. a batch activate call
//!   on the platform's constraint class). Batching matters: some native
//!   engines reject one-at-a-time transitions between conflicting
//!   constraints that they accept as a batch.
//!
//! - **Visibility** — Implements [`ViewVisibility`] to answer hidden/alpha
//!   queries against the live view hierarchy.
//!
//! - **Delegate** — Optionally implements [`ActivationDelegate`] for
//!   per-record decisions that no fixed rule expresses.
//!
//! # Crate boundaries
//!
//! `buttress_core` owns the data model, rule classification, and batch
//! assembly. Host crates implement these traits over native objects and
//! re-run [`evaluate_and_apply`](crate::constraint::ConstraintStore::evaluate_and_apply)
//! whenever visibility or delegate state changes. The core assumes it runs
//! on the thread that owns the view hierarchy; it takes `&mut` exclusivity
//! but enforces no thread affinity of its own.
//!
//! # Evaluation loop pseudocode
//!
//! ```rust,ignore
//! fn on_visibility_change(store: &mut ConstraintStore) {
//!     // Classify: one pass over the declarative list, no side effects.
//!     let changes = store.evaluate(&sidebar_constraints, &hierarchy, Some(&policy));
//!
//!     // Apply: at most one deactivate batch and one activate batch.
//!     store.apply(&changes, &mut engine);
//! }
//! ```

use crate::constraint::{ConstraintId, ConstraintStore, ViewId};

/// Pushes activation batches into a native constraint system.
///
/// Both native engines and test doubles implement this trait. Each
/// [`apply`](ConstraintStore::apply) pass calls each method at most once,
/// with the full batch, after the entire input list has been classified;
/// batches are never interleaved per-record. Calls are assumed infallible:
/// any fault belongs to the host, not this crate.
pub trait LayoutEngine {
    /// Activates every constraint in `batch` (raw slot indices, in input
    /// order), reading mirrored fields from `store` as needed.
    fn activate_all(&mut self, store: &ConstraintStore, batch: &[u32]);

    /// Deactivates every constraint in `batch` (raw slot indices, in input
    /// order), reading mirrored fields from `store` as needed.
    fn deactivate_all(&mut self, store: &ConstraintStore, batch: &[u32]);
}

/// Answers visibility queries against the host view hierarchy.
pub trait ViewVisibility {
    /// Returns whether the view's own hidden flag is set.
    fn is_hidden(&self, view: ViewId) -> bool;

    /// Returns the view's own alpha in `0.0..=1.0`.
    fn alpha(&self, view: ViewId) -> f32;

    /// Returns whether the view is invisible: hidden, or fully transparent.
    ///
    /// Known gap, kept deliberately: ancestor visibility does not propagate.
    /// A view nested inside a hidden ancestor still reads as visible here
    /// unless it is itself hidden or transparent. Changing this would change
    /// observable activation behavior for existing hosts.
    fn is_invisible(&self, view: ViewId) -> bool {
        self.is_hidden(view) || self.alpha(view) <= 0.0
    }
}

/// Per-record activation decisions for
/// [`Delegate`](crate::rule::ActivationRule::Delegate)-tagged records.
///
/// Invoked synchronously, once per tagged record per evaluation pass. The
/// implementation must not re-enter evaluation. When no delegate is supplied
/// to a pass, tagged records are skipped as if tagged
/// [`Manual`](crate::rule::ActivationRule::Manual).
pub trait ActivationDelegate {
    /// Returns whether `constraint` should currently be active.
    fn should_activate(&self, store: &ConstraintStore, constraint: ConstraintId) -> bool;
}
