// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout priority values.

use core::fmt;

/// The priority a native engine gives a constraint when resolving conflicts.
///
/// Carried on each record so builders can tag it in one expression; the
/// activation evaluator never reads it. Values follow the common native
/// convention of a `1.0..=1000.0` scale where `1000.0` is required and
/// anything lower is breakable.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    /// The constraint must be satisfied; the engine treats violation as an
    /// error.
    pub const REQUIRED: Self = Self(1000.0);

    /// High-priority breakable constraint.
    pub const DEFAULT_HIGH: Self = Self(750.0);

    /// Low-priority breakable constraint.
    pub const DEFAULT_LOW: Self = Self(250.0);

    /// Priority at which a view resists sizing away from its fitting size.
    pub const FITTING_SIZE: Self = Self(50.0);

    /// Creates a priority with an explicit raw value.
    #[must_use]
    pub const fn new(raw: f32) -> Self {
        Self(raw)
    }

    /// Returns the raw value for handing to a native engine.
    #[must_use]
    pub const fn raw(self) -> f32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}
