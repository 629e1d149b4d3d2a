// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: who is subscribed to which signal on which node.
//!
//! ## Matching rules
//!
//! - [`Phase::Capture`] steps reach listeners registered with [`ListenerFlags::CAPTURE`].
//! - [`Phase::Bubble`] steps reach listeners registered without it.
//! - [`Phase::Target`] steps reach every listener on the origin, in registration order.
//!
//! Handlers are cloned out of the registry when deliveries are collected, so a
//! host can release its borrow of the registry before invoking them.

use alloc::vec::Vec;

use crate::types::{Dispatch, EventKind, ListenerFlags, ListenerId, Phase};

#[derive(Clone, Debug)]
struct Entry<K, H> {
    id: ListenerId,
    node: K,
    kind: EventKind,
    flags: ListenerFlags,
    handler: H,
}

/// One listener invocation resolved from a dispatch sequence.
#[derive(Clone, Debug)]
pub struct Delivery<K, H> {
    /// The dispatch step this delivery belongs to.
    pub dispatch: Dispatch<K>,
    /// Listener being invoked.
    pub listener: ListenerId,
    /// Flags the listener was registered with.
    pub flags: ListenerFlags,
    /// Handler to invoke.
    pub handler: H,
}

/// Registry of listeners keyed by node and [`EventKind`].
#[derive(Clone, Debug)]
pub struct ListenerSet<K, H> {
    entries: Vec<Entry<K, H>>,
    next_id: u64,
}

impl<K, H> Default for ListenerSet<K, H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K: Copy + Eq, H: Clone> ListenerSet<K, H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` signals on `node`.
    pub fn add(&mut self, node: K, kind: EventKind, flags: ListenerFlags, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            node,
            kind,
            flags,
            handler,
        });
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every listener attached to a node for which `keep` returns false.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.retain(|e| keep(&e.node));
    }

    /// Flags of a registered listener.
    pub fn flags_of(&self, id: ListenerId) -> Option<ListenerFlags> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.flags)
    }

    /// Number of listeners for `kind` on `node`.
    pub fn count_for(&self, node: K, kind: EventKind) -> usize {
        self.entries
            .iter()
            .filter(|e| e.node == node && e.kind == kind)
            .count()
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a dispatch sequence into the ordered list of listener invocations.
    pub fn deliveries(&self, seq: &[Dispatch<K>], kind: EventKind) -> Vec<Delivery<K, H>> {
        let mut out = Vec::new();
        for d in seq {
            for e in &self.entries {
                if e.node != d.node || e.kind != kind {
                    continue;
                }
                let capture = e.flags.contains(ListenerFlags::CAPTURE);
                let reached = match d.phase {
                    Phase::Capture => capture,
                    Phase::Target => true,
                    Phase::Bubble => !capture,
                };
                if reached {
                    out.push(Delivery {
                        dispatch: *d,
                        listener: e.id,
                        flags: e.flags,
                        handler: e.handler.clone(),
                    });
                }
            }
        }
        out
    }
}
