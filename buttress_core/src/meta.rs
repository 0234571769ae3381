// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-keyed typed side table.
//!
//! Native constraint objects were not designed to carry an activation rule,
//! so the store retrofits one out-of-band: a [`MetaTable`] associates typed
//! values with constraint slots under [`MetaKey`] channels, without touching
//! the record itself.
//!
//! # Lookup semantics
//!
//! - [`set`](MetaTable::set) overwrites any prior value for the same
//!   (slot, key) pair, regardless of type.
//! - [`get`](MetaTable::get) returns `None` when nothing was set **or** when
//!   the stored value's type does not match the requested type. A type
//!   mismatch is a silent miss, never an error; callers fall back to their
//!   documented default (for the activation rule, `Always`).
//! - There is no public removal. Associations live as long as the record:
//!   the store clears a slot's entries when the constraint is destroyed.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use hashbrown::HashMap;

/// Channel under which a metadata value is stored.
///
/// Keys partition the table the way dirty channels partition invalidation:
/// each concern owns a constant. Host code embedding its own metadata should
/// allocate keys from [`MetaKey::user`] to stay clear of reserved channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MetaKey(u16);

impl MetaKey {
    const USER_BASE: u16 = 0x100;

    /// Creates a reserved-range key. Crate-internal channels only.
    pub(crate) const fn reserved(raw: u16) -> Self {
        Self(raw)
    }

    /// Creates a host-owned key. `n` is namespaced away from reserved
    /// channels, so user keys never collide with crate-internal ones.
    #[must_use]
    pub const fn user(n: u16) -> Self {
        Self(Self::USER_BASE + n)
    }
}

/// The channel carrying a record's [`ActivationRule`](crate::rule::ActivationRule).
pub const ACTIVATION_RULE: MetaKey = MetaKey::reserved(0);

/// Identity-keyed side table associating typed values with constraint slots.
#[derive(Default)]
pub struct MetaTable {
    entries: HashMap<(u32, MetaKey), Box<dyn Any>>,
}

impl MetaTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Attaches `value` to `slot` under `key`, overwriting any prior value
    /// for that pair.
    pub fn set<T: Any>(&mut self, slot: u32, key: MetaKey, value: T) {
        self.entries.insert((slot, key), Box::new(value));
    }

    /// Returns the value previously set for `(slot, key)`.
    ///
    /// `None` means never set, or set with a different type than `T`.
    #[must_use]
    pub fn get<T: Any>(&self, slot: u32, key: MetaKey) -> Option<&T> {
        self.entries
            .get(&(slot, key))
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Drops every entry attached to `slot`. Called when the record backing
    /// the slot is destroyed.
    pub(crate) fn clear_slot(&mut self, slot: u32) {
        self.entries.retain(|&(entry_slot, _), _| entry_slot != slot);
    }

    /// Returns the number of live associations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table holds no associations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MetaTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::rule::ActivationRule;

    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut table = MetaTable::new();
        table.set(3, ACTIVATION_RULE, ActivationRule::BothVisible);
        assert_eq!(
            table.get::<ActivationRule>(3, ACTIVATION_RULE),
            Some(&ActivationRule::BothVisible)
        );
    }

    #[test]
    fn unset_slot_misses() {
        let table = MetaTable::new();
        assert_eq!(table.get::<ActivationRule>(0, ACTIVATION_RULE), None);
    }

    #[test]
    fn set_overwrites_prior_value() {
        let mut table = MetaTable::new();
        table.set(0, ACTIVATION_RULE, ActivationRule::Manual);
        table.set(0, ACTIVATION_RULE, ActivationRule::FirstInvisible);
        assert_eq!(
            table.get::<ActivationRule>(0, ACTIVATION_RULE),
            Some(&ActivationRule::FirstInvisible)
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn type_mismatch_is_a_silent_miss() {
        let mut table = MetaTable::new();
        table.set(0, ACTIVATION_RULE, 7_u32);
        assert_eq!(table.get::<ActivationRule>(0, ACTIVATION_RULE), None);
        // The wrongly-typed value itself is still reachable.
        assert_eq!(table.get::<u32>(0, ACTIVATION_RULE), Some(&7));
    }

    #[test]
    fn user_keys_do_not_collide_with_reserved() {
        let mut table = MetaTable::new();
        table.set(0, ACTIVATION_RULE, ActivationRule::Manual);
        table.set(0, MetaKey::user(0), 42_u32);
        assert_eq!(
            table.get::<ActivationRule>(0, ACTIVATION_RULE),
            Some(&ActivationRule::Manual)
        );
        assert_eq!(table.get::<u32>(0, MetaKey::user(0)), Some(&42));
    }

    #[test]
    fn clear_slot_drops_only_that_slot() {
        let mut table = MetaTable::new();
        table.set(0, ACTIVATION_RULE, ActivationRule::Manual);
        table.set(0, MetaKey::user(0), 1_u8);
        table.set(1, ACTIVATION_RULE, ActivationRule::Delegate);

        table.clear_slot(0);

        assert_eq!(table.get::<ActivationRule>(0, ACTIVATION_RULE), None);
        assert_eq!(table.get::<u8>(0, MetaKey::user(0)), None);
        assert_eq!(
            table.get::<ActivationRule>(1, ACTIVATION_RULE),
            Some(&ActivationRule::Delegate)
        );
    }
}
