// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays constraint storage with allocation and property management.

use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::meta::{ACTIVATION_RULE, MetaKey, MetaTable};
use crate::priority::Priority;
use crate::rule::ActivationRule;

use super::id::{ConstraintId, ViewId};

/// Struct-of-arrays storage for all constraint records.
///
/// Records are addressed by [`ConstraintId`] handles. Internally, each record
/// occupies a slot in parallel arrays. Destroyed records are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// New records start inactive, untagged (so they evaluate as
/// [`Always`](ActivationRule::Always)), unidentified, and at
/// [`Priority::REQUIRED`].
#[derive(Debug)]
pub struct ConstraintStore {
    // -- Participants (fixed at creation) --
    pub(crate) first_item: Vec<Option<ViewId>>,
    pub(crate) second_item: Vec<Option<ViewId>>,

    // -- Native-field mirrors --
    pub(crate) active: Vec<bool>,
    pub(crate) identifier: Vec<Option<String>>,
    pub(crate) priority: Vec<Priority>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Retrofitted metadata --
    pub(crate) meta: MetaTable,
}

impl Default for ConstraintStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintStore {
    /// Creates an empty constraint store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_item: Vec::new(),
            second_item: Vec::new(),
            active: Vec::new(),
            identifier: Vec::new(),
            priority: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            meta: MetaTable::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new record relating `first` to `second` and returns its
    /// handle.
    ///
    /// Pass `None` for `second` to describe a single-view constraint. For
    /// one-expression construction with tags, prefer
    /// [`build`](Self::build) / [`build_between`](Self::build_between).
    pub fn create_constraint(
        &mut self,
        first: Option<ViewId>,
        second: Option<ViewId>,
    ) -> ConstraintId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.first_item[idx as usize] = first;
            self.second_item[idx as usize] = second;
            self.active[idx as usize] = false;
            self.identifier[idx as usize] = None;
            self.priority[idx as usize] = Priority::REQUIRED;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.first_item.push(first);
            self.second_item.push(second);
            self.active.push(false);
            self.identifier.push(None);
            self.priority.push(Priority::REQUIRED);
            self.generation.push(0);
            idx
        };

        ConstraintId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a record, freeing its slot for reuse.
    ///
    /// All metadata attached to the record is dropped with it; the native
    /// constraint object itself belongs to the host and is not touched.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_constraint(&mut self, id: ConstraintId) {
        self.validate(id);
        let idx = id.idx;

        // Metadata lifetime is bound to the record's lifetime.
        self.meta.clear_slot(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live record.
    #[must_use]
    pub fn is_alive(&self, id: ConstraintId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Property getters --

    /// Returns the first view participant.
    #[must_use]
    pub fn first_item(&self, id: ConstraintId) -> Option<ViewId> {
        self.validate(id);
        self.first_item[id.idx as usize]
    }

    /// Returns the second view participant, absent for single-view
    /// constraints.
    #[must_use]
    pub fn second_item(&self, id: ConstraintId) -> Option<ViewId> {
        self.validate(id);
        self.second_item[id.idx as usize]
    }

    /// Returns the mirrored active flag.
    ///
    /// Reflects native state as of the last [`apply`](Self::apply) or
    /// [`set_active`](Self::set_active) call.
    #[must_use]
    pub fn is_active(&self, id: ConstraintId) -> bool {
        self.validate(id);
        self.active[id.idx as usize]
    }

    /// Returns the record's identifier.
    #[must_use]
    pub fn identifier(&self, id: ConstraintId) -> Option<&str> {
        self.validate(id);
        self.identifier[id.idx as usize].as_deref()
    }

    /// Returns the record's layout priority.
    #[must_use]
    pub fn priority(&self, id: ConstraintId) -> Priority {
        self.validate(id);
        self.priority[id.idx as usize]
    }

    /// Returns the record's activation rule.
    ///
    /// Untagged records (and records whose tag was overwritten with a value
    /// of another type) report [`ActivationRule::Always`].
    #[must_use]
    pub fn activation_rule(&self, id: ConstraintId) -> ActivationRule {
        self.validate(id);
        self.meta
            .get::<ActivationRule>(id.idx, ACTIVATION_RULE)
            .copied()
            .unwrap_or_default()
    }

    // -- Mutation API --

    /// Mirrors an activation change the host performed outside evaluation.
    ///
    /// [`Manual`](ActivationRule::Manual)-tagged records are activated and
    /// deactivated directly by host code; this keeps the mirror honest so a
    /// later rule change evaluates against true state.
    pub fn set_active(&mut self, id: ConstraintId, active: bool) {
        self.validate(id);
        self.active[id.idx as usize] = active;
    }

    /// Sets the record's identifier.
    pub fn set_identifier(&mut self, id: ConstraintId, identifier: impl Into<String>) {
        self.validate(id);
        self.identifier[id.idx as usize] = Some(identifier.into());
    }

    /// Sets the record's layout priority.
    pub fn set_priority(&mut self, id: ConstraintId, priority: Priority) {
        self.validate(id);
        self.priority[id.idx as usize] = priority;
    }

    /// Tags the record with an activation rule.
    pub fn set_rule(&mut self, id: ConstraintId, rule: ActivationRule) {
        self.validate(id);
        self.meta.set(id.idx, ACTIVATION_RULE, rule);
    }

    // -- Host metadata passthrough --

    /// Attaches an arbitrary typed value to the record under a host-owned
    /// key.
    pub fn set_meta<T: Any>(&mut self, id: ConstraintId, key: MetaKey, value: T) {
        self.validate(id);
        self.meta.set(id.idx, key, value);
    }

    /// Returns a value previously attached with [`set_meta`](Self::set_meta).
    ///
    /// `None` on a never-set key or a type mismatch.
    #[must_use]
    pub fn meta<T: Any>(&self, id: ConstraintId, key: MetaKey) -> Option<&T> {
        self.validate(id);
        self.meta.get::<T>(id.idx, key)
    }

    // -- Raw-index accessors for engines --
    //
    // These accept raw slot indices (as found in `ActivationChanges`) rather
    // than `ConstraintId` handles, skipping generation validation. Only use
    // with indices that came from an activation batch.

    /// Returns the mirrored active flag at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn active_at(&self, idx: u32) -> bool {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.active[idx as usize]
    }

    /// Returns the identifier at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn identifier_at(&self, idx: u32) -> Option<&str> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.identifier[idx as usize].as_deref()
    }

    /// Returns the layout priority at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn priority_at(&self, idx: u32) -> Priority {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.priority[idx as usize]
    }

    /// Returns the view participants at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn items_at(&self, idx: u32) -> (Option<ViewId>, Option<ViewId>) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        (self.first_item[idx as usize], self.second_item[idx as usize])
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ConstraintId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ConstraintId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(Some(ViewId(0)), None);
        assert!(store.is_alive(id));
        store.destroy_constraint(id);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn new_record_defaults() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(Some(ViewId(1)), Some(ViewId(2)));

        assert!(!store.is_active(id));
        assert_eq!(store.identifier(id), None);
        assert_eq!(store.priority(id), Priority::REQUIRED);
        assert_eq!(store.activation_rule(id), ActivationRule::Always);
        assert_eq!(store.first_item(id), Some(ViewId(1)));
        assert_eq!(store.second_item(id), Some(ViewId(2)));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ConstraintStore::new();
        let id1 = store.create_constraint(None, None);
        store.destroy_constraint(id1);
        let id2 = store.create_constraint(None, None);
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn destroy_clears_metadata_before_slot_reuse() {
        let mut store = ConstraintStore::new();
        let id1 = store.create_constraint(None, None);
        store.set_rule(id1, ActivationRule::Manual);
        store.destroy_constraint(id1);

        // The reused slot must not inherit the old record's tag.
        let id2 = store.create_constraint(None, None);
        assert_eq!(store.activation_rule(id2), ActivationRule::Always);
    }

    #[test]
    fn rule_round_trips_through_metadata() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(Some(ViewId(0)), Some(ViewId(1)));
        store.set_rule(id, ActivationRule::FirstInvisible);
        assert_eq!(store.activation_rule(id), ActivationRule::FirstInvisible);
    }

    #[test]
    fn mismatched_rule_metadata_reads_as_always() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(None, None);
        // Stomp the rule channel with a foreign type; the silent-miss policy
        // falls back to the default rule.
        store.meta.set(id.idx, ACTIVATION_RULE, "bogus");
        assert_eq!(store.activation_rule(id), ActivationRule::Always);
    }

    #[test]
    fn identifier_and_priority_round_trip() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(Some(ViewId(3)), None);
        store.set_identifier(id, "sidebar-width");
        store.set_priority(id, Priority::DEFAULT_LOW);

        assert_eq!(store.identifier(id), Some("sidebar-width"));
        assert_eq!(store.priority(id), Priority::DEFAULT_LOW);
        assert_eq!(store.identifier_at(id.idx), Some("sidebar-width"));
        assert_eq!(store.priority_at(id.idx), Priority::DEFAULT_LOW);
    }

    #[test]
    fn host_metadata_round_trips() {
        use crate::meta::MetaKey;

        let mut store = ConstraintStore::new();
        let id = store.create_constraint(None, None);
        store.set_meta(id, MetaKey::user(0), 99_u64);
        assert_eq!(store.meta::<u64>(id, MetaKey::user(0)), Some(&99));
        assert_eq!(store.meta::<u32>(id, MetaKey::user(0)), None);
    }

    #[test]
    #[should_panic(expected = "stale ConstraintId")]
    fn destroyed_handle_panics_on_is_active() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(None, None);
        store.destroy_constraint(id);
        let _ = store.is_active(id);
    }

    #[test]
    #[should_panic(expected = "stale ConstraintId")]
    fn destroyed_handle_panics_on_set_rule() {
        let mut store = ConstraintStore::new();
        let id = store.create_constraint(None, None);
        store.destroy_constraint(id);
        store.set_rule(id, ActivationRule::Manual);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn raw_accessor_panics_out_of_range() {
        let store = ConstraintStore::new();
        let _ = store.active_at(0);
    }
}
