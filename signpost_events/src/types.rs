// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for signal propagation: phases, event kinds, dispatch steps, listener flags, and lookups.
//!
//! ## Overview
//!
//! These types describe the propagation protocol and its inputs/outputs.
//! They are referenced by the [`router`](crate::router) and the
//! [`listeners`](crate::listeners) registry, and used by host pages.

/// Phases of signal propagation.
///
/// Appears on each [`Dispatch`] item produced by
/// [`Router::route`](crate::router::Router::route).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-parent traversal, before the origin is reached.
    Capture,
    /// The origin node itself.
    Target,
    /// Parent-to-root traversal, after the origin has been visited.
    Bubble,
}

/// Kind of signal a listener subscribes to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// A scroll position changed.
    Scroll,
    /// Any other named signal, such as the throwaway kind used by capability probes.
    Custom(&'static str),
}

impl EventKind {
    /// Name of the signal as a host would spell it (`"scroll"`, or the custom name).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Custom(name) => name,
        }
    }
}

/// A single dispatch step.
///
/// Produced by [`Router::route`](crate::router::Router::route) and paired with
/// listeners by [`ListenerSet::deliveries`](crate::listeners::ListenerSet::deliveries).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node whose listeners are visited in this step (the "current target").
    pub node: K,
    /// Node the signal originated at. Constant across the whole sequence.
    pub origin: K,
}

/// Look up the parent of a node to reconstruct a root→origin path for propagation.
///
/// The [router](crate::router::Router) consults this for every signal, if you
/// construct it via [`Router::with_parent`](crate::router::Router::with_parent).
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every node is its own root.
///
/// Used by [`Router::new`](crate::router::Router::new). All calls to
/// [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

bitflags::bitflags! {
    /// Registration flags recorded for each listener.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerFlags: u8 {
        /// Listener runs during the capture phase instead of the bubble phase.
        const CAPTURE = 0b0000_0001;
        /// Listener promised not to block the signal pipeline.
        const PASSIVE = 0b0000_0010;
        /// Listener was registered through the legacy mechanism (no options honored).
        const LEGACY  = 0b0000_0100;
    }
}

/// Identifier of a registered listener.
///
/// Identifiers are never reused within one [`ListenerSet`](crate::listeners::ListenerSet).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Raw numeric value, useful for logging.
    pub const fn get(self) -> u64 {
        self.0
    }
}
