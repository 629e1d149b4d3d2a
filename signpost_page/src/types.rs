// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the page: node identifiers, capabilities, and local geometry.

use kurbo::{Rect, Vec2};

/// Identifier for an element of a [`Page`](crate::Page).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On create, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Page::is_alive`](crate::Page::is_alive) to check whether a `NodeId` still refers to a live element.
/// Stale `NodeId`s never alias a different live element because the generation must match.
/// Mutators ignore stale ids and queries return `None` for them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Listener mechanisms the hosting environment offers.
    ///
    /// A page built with [`Page::new`](crate::Page::new) offers all of them.
    /// Remove bits to emulate older or restricted hosts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// [`Page::add_event_listener`](crate::Page::add_event_listener) is available.
        const EVENT_LISTENER = 0b0000_0001;
        /// [`Page::attach_event`](crate::Page::attach_event) is available.
        const LEGACY_EVENTS  = 0b0000_0010;
        /// Registration reads the `passive` member of listener options.
        const PASSIVE_OPTION = 0b0000_0100;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Local geometry for an element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    /// Bounds in the parent's content coordinates.
    pub bounds: Rect,
    /// How far the element's own content is scrolled.
    ///
    /// For the document element this is the viewport scroll position.
    pub scroll_offset: Vec2,
}

impl ElementBox {
    /// A box with the given bounds and no scroll.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            scroll_offset: Vec2::ZERO,
        }
    }
}
