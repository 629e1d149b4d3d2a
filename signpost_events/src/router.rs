// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→origin path for a signal and emits dispatch steps.
//! Produces a capture → target → bubble sequence for the origin node.
//!
//! ## Sequence shape
//!
//! - Capture visits every ancestor of the origin, root first. The origin itself is not captured.
//! - Target visits the origin exactly once.
//! - Bubble visits the ancestors again, innermost first, and only for bubbling signals.
//! - Every step carries the origin, so listeners can tell their own signals
//!   from ones that bubbled up from a descendant.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Deterministic propagation router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] for flat hosts where every node is a root,
///   or with [`Router::with_parent`] to propagate through a hierarchy.
/// - Call [`Router::route`] for each signal to obtain its dispatch sequence,
///   then pair it with listeners via
///   [`ListenerSet::deliveries`](crate::listeners::ListenerSet::deliveries).
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self {
            parent: P::default(),
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Produce the propagation sequence for a signal originating at `origin`.
    ///
    /// When `bubbles` is false the sequence ends after the target step.
    pub fn route(&self, origin: K, bubbles: bool) -> Vec<Dispatch<K>> {
        let path = Self::reconstruct_path(origin, &self.parent);
        Self::emit_path(&path, origin, bubbles)
    }

    fn reconstruct_path(origin: K, parent_lookup: &impl ParentLookup<K>) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = origin;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match parent_lookup.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path(path: &[K], origin: K, bubbles: bool) -> Vec<Dispatch<K>> {
        let ancestors = &path[..path.len().saturating_sub(1)];
        let mut out = Vec::with_capacity(ancestors.len() * 2 + 1);
        // Capture: root→parent
        for &node in ancestors {
            out.push(Dispatch {
                phase: Phase::Capture,
                node,
                origin,
            });
        }
        out.push(Dispatch {
            phase: Phase::Target,
            node: origin,
            origin,
        });
        if bubbles {
            // Bubble: parent→root
            for &node in ancestors.iter().rev() {
                out.push(Dispatch {
                    phase: Phase::Bubble,
                    node,
                    origin,
                });
            }
        }
        out
    }
}
