// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint record data model and activation evaluation.
//!
//! A *constraint record* mirrors one native layout constraint. Each record
//! has:
//!
//! - An identity ([`ConstraintId`]) — a generational handle that becomes
//!   stale when the record is destroyed, preventing use-after-free bugs at
//!   the API level.
//! - Participants — up to two [`ViewId`]s; the second is absent for
//!   single-view constraints.
//! - **Native fields** mirrored for the host engine:
//!   [`identifier`](ConstraintStore::identifier),
//!   [`priority`](ConstraintStore::priority), and the
//!   [`is_active`](ConstraintStore::is_active) flag.
//! - **An activation rule** held out-of-band in the store's
//!   [`MetaTable`](crate::meta::MetaTable); untagged records evaluate as
//!   [`Always`](crate::rule::ActivationRule::Always).
//!
//! Records are stored in struct-of-arrays layout with index-based handles.
//! They are long-lived: typical hosts build declarative constraint lists
//! once and re-evaluate them whenever visibility changes.
//!
//! # Activation state
//!
//! The `active` column is a mirror of native state, not the authority.
//! [`evaluate`](ConstraintStore::evaluate) only reads it;
//! [`apply`](ConstraintStore::apply) updates it after pushing batches to the
//! engine. A record has two states and two transitions (inactive→active via
//! the activate batch, active→inactive via the deactivate batch), and
//! neither transition is assumed to have happened until the next evaluation
//! reads the flag again.

mod builder;
mod evaluate;
mod id;
mod store;

pub use builder::ConstraintBuilder;
pub use evaluate::ActivationChanges;
pub use id::{ConstraintId, ViewId};
pub use store::ConstraintStore;
