// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activation rule tags.

/// Policy controlling what an evaluation pass may do to a constraint record.
///
/// Each record carries exactly one rule, read through the metadata table at
/// evaluation time. A record that was never tagged evaluates as
/// [`Always`](Self::Always). Rules are mutually exclusive by construction;
/// evaluation matches on the variant exhaustively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivationRule {
    /// The host manages activation directly; evaluation never touches the
    /// record.
    Manual,
    /// Activate if inactive. Once active, evaluation never deactivates the
    /// record.
    #[default]
    Always,
    /// Active exactly while every view participant is visible. Hiding either
    /// participant deactivates; restoring both reactivates.
    BothVisible,
    /// Active exactly while the first participant is invisible. Used for
    /// fallback constraints that take over when a view disappears.
    FirstInvisible,
    /// Defer to the [`ActivationDelegate`](crate::backend::ActivationDelegate)
    /// supplied to the pass. Without a delegate the record is skipped like
    /// [`Manual`](Self::Manual).
    Delegate,
}
