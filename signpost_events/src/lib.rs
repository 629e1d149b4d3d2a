// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signpost Events: a deterministic, `no_std` propagation router for UI signals.
//!
//! ## Overview
//!
//! This crate builds the propagation sequence (capture → target → bubble) for a signal
//! that originates at a node of some host tree, and keeps a registry of the listeners
//! that want to hear about it.
//! It does not own the tree.
//! Instead, give the [`Router`](crate::router::Router) a [`ParentLookup`](crate::types::ParentLookup)
//! and it emits a deterministic sequence of [`Dispatch`](crate::types::Dispatch) steps.
//!
//! ## Origins
//!
//! Every step carries the node the signal originated at.
//! A listener on an ancestor therefore sees bubbled signals with an origin that differs from
//! the node it is registered on, and can ignore them if it only cares about its own signals.
//!
//! ## Layering
//!
//! The router only computes the traversal order and the [`ListenerSet`](crate::listeners::ListenerSet)
//! only pairs steps with handlers. A host page invokes the handlers and decides what they receive.
//!
//! ## Example
//!
//! ```
//! use signpost_events::listeners::ListenerSet;
//! use signpost_events::router::Router;
//! use signpost_events::types::{EventKind, ListenerFlags, ParentLookup, Phase};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         if *node > 1 { Some(node - 1) } else { None }
//!     }
//! }
//!
//! let mut listeners: ListenerSet<u32, &str> = ListenerSet::new();
//! listeners.add(1, EventKind::Scroll, ListenerFlags::PASSIVE, "document");
//!
//! let router: Router<u32, Parents> = Router::with_parent(Parents);
//! let seq = router.route(3, true);
//! let out = listeners.deliveries(&seq, EventKind::Scroll);
//! assert_eq!(out.len(), 1);
//! assert_eq!(out[0].dispatch.phase, Phase::Bubble);
//! assert_eq!(out[0].dispatch.origin, 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod listeners;
pub mod router;
pub mod types;
