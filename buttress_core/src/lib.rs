// Copyright 2026 the Buttress Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule-driven activation for native layout constraints.
//!
//! `buttress_core` decides which layout constraints should be active. It does
//! not solve the constraint system, compute geometry, or own the view
//! hierarchy; those belong to the host layout engine. The crate is `no_std`
//! compatible (with `alloc`) and uses array-based struct-of-arrays storage
//! with index handles, mirroring native constraint objects one slot per
//! record.
//!
//! # Architecture
//!
//! The crate is organized around an evaluation pass that turns a declarative
//! constraint list into two activation batches:
//!
//! ```text
//!   caller's constraint list
//!            │
//!            ▼
//!   ConstraintStore::evaluate() ──► ActivationChanges
//!        │        ▲                       │
//!        │        │ visibility reads      ▼
//!        │   ViewVisibility       ConstraintStore::apply()
//!        │                                │
//!        │                                ▼
//!        └──────────────────── LayoutEngine::{deactivate_all, activate_all}
//! ```
//!
//! **[`constraint`]** — Struct-of-arrays constraint storage with generational
//! handles, the fluent builder, and the activation evaluator. Participants
//! and tags are set by the caller; activation batches are computed by
//! evaluation and pushed to the engine by [`apply`].
//!
//! **[`rule`]** — The closed [`ActivationRule`](rule::ActivationRule) set
//! controlling what each evaluation pass may do to a record.
//!
//! **[`meta`]** — Identity-keyed typed side table for retrofitting data
//! (including the activation rule) onto constraint records.
//!
//! **[`priority`]** — Layout priority values carried on each record for the
//! host engine's benefit; never consulted by evaluation.
//!
//! **[`backend`]** — The [`LayoutEngine`](backend::LayoutEngine),
//! [`ViewVisibility`](backend::ViewVisibility), and
//! [`ActivationDelegate`](backend::ActivationDelegate) contracts that host
//! platforms implement.
//!
//! [`apply`]: constraint::ConstraintStore::apply

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod constraint;
pub mod meta;
pub mod priority;
pub mod rule;
