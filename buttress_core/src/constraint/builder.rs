// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-expression constraint construction.
//!
//! Hosts declare constraint lists in bulk, and a record is rarely useful
//! without its identifier, priority, and rule. The builder attaches all
//! three in the same expression that creates the record:
//!
//! ```rust,ignore
//! let avatar_width = store
//!     .build_between(avatar, container)
//!     .identifier("avatar-width")
//!     .priority(Priority::DEFAULT_HIGH)
//!     .rule(ActivationRule::BothVisible)
//!     .finish();
//! ```
//!
//! Pure data assembly: every tag is optional, and `finish` without tags is
//! equivalent to [`create_constraint`](ConstraintStore::create_constraint).

use alloc::string::String;

use crate::priority::Priority;
use crate::rule::ActivationRule;

use super::id::{ConstraintId, ViewId};
use super::store::ConstraintStore;

/// In-progress constraint record; call [`finish`](Self::finish) to allocate.
#[derive(Debug)]
#[must_use = "the record is not created until finish() is called"]
pub struct ConstraintBuilder<'store> {
    store: &'store mut ConstraintStore,
    first_item: Option<ViewId>,
    second_item: Option<ViewId>,
    identifier: Option<String>,
    priority: Priority,
    rule: Option<ActivationRule>,
    active: bool,
}

impl<'store> ConstraintBuilder<'store> {
    fn new(
        store: &'store mut ConstraintStore,
        first_item: Option<ViewId>,
        second_item: Option<ViewId>,
    ) -> Self {
        Self {
            store,
            first_item,
            second_item,
            identifier: None,
            priority: Priority::REQUIRED,
            rule: None,
            active: false,
        }
    }

    /// Sets the record's identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the record's layout priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Tags the record with an activation rule.
    ///
    /// An untagged record evaluates as [`ActivationRule::Always`] but
    /// carries no metadata entry.
    pub fn rule(mut self, rule: ActivationRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Marks the record as already active in the native engine.
    ///
    /// For hosts that activate a constraint at creation time and hand the
    /// mirror a matching starting state.
    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    /// Allocates the record, applies every tag, and returns its handle.
    pub fn finish(self) -> ConstraintId {
        let id = self
            .store
            .create_constraint(self.first_item, self.second_item);
        if let Some(identifier) = self.identifier {
            self.store.set_identifier(id, identifier);
        }
        self.store.set_priority(id, self.priority);
        if let Some(rule) = self.rule {
            self.store.set_rule(id, rule);
        }
        if self.active {
            self.store.set_active(id, true);
        }
        id
    }
}

impl ConstraintStore {
    /// Starts building a single-view constraint on `first`.
    pub fn build(&mut self, first: ViewId) -> ConstraintBuilder<'_> {
        ConstraintBuilder::new(self, Some(first), None)
    }

    /// Starts building a constraint relating `first` to `second`.
    pub fn build_between(&mut self, first: ViewId, second: ViewId) -> ConstraintBuilder<'_> {
        ConstraintBuilder::new(self, Some(first), Some(second))
    }
}
