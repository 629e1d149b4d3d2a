// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signpost Page: a Kurbo-native, retained host page for scroll-driven UI behaviors.
//!
//! Signpost Page stands in for the document of a hosting environment.
//! It is small on purpose: just enough structure, geometry, signal plumbing and time for
//! behaviors such as scroll-tracking navigation to be built and tested without a browser.
//!
//! - Represents a tree of elements with tags, text content and class lists.
//! - Computes viewport-relative bounds from local bounds and the scroll offsets of ancestors.
//! - Registers listeners through a modern (options-aware) and a legacy mechanism, gated by
//!   [`Capabilities`], and delivers signals capture → target → bubble via [`signpost_events`].
//! - Runs one-shot timers on a virtual clock that only moves when asked to.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout. Callers place elements with [`Page::set_bounds`]
//! (or [`Page::append_element`]) and move content with [`Page::scroll_to`].
//!
//! ## API overview
//!
//! - [`Page`]: element tree, geometry, listeners and timers.
//! - [`NodeId`]: generational handle of an element.
//! - [`ElementBox`]: per-element local bounds and scroll offset.
//! - [`Capabilities`]: listener mechanisms the environment offers.
//! - [`Signal`], [`SignalHandler`], [`OptionsSource`], [`ListenerOptions`], [`ListenerError`]:
//!   listener plumbing.
//!
//! ### Minimal usage
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Rect, Vec2};
//! use signpost_page::{handler, ListenerOptions, Page};
//! use signpost_page::EventKind;
//!
//! let mut page = Page::new();
//! let doc = page.document();
//! let heading = page.append_element(doc, "h2", Rect::new(0.0, 300.0, 400.0, 330.0));
//!
//! let scrolls = Rc::new(Cell::new(0));
//! let counter = scrolls.clone();
//! page.add_event_listener(
//!     doc,
//!     EventKind::Scroll,
//!     handler(move |_, _| counter.set(counter.get() + 1)),
//!     &ListenerOptions::PASSIVE,
//! )
//! .unwrap();
//!
//! page.scroll_to(doc, Vec2::new(0.0, 250.0));
//! assert_eq!(scrolls.get(), 1);
//! assert_eq!(page.client_rect(heading).unwrap().y0, 50.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod events;
mod timers;
mod tree;
mod types;

pub use signpost_events::types::{EventKind, ListenerFlags, ListenerId, Phase};

pub use events::{
    ListenerError, ListenerOptions, Mechanism, OptionsSource, Signal, SignalHandler, handler,
};
pub use timers::TimerId;
pub use tree::{DOCUMENT_TAG, Page};
pub use types::{Capabilities, ElementBox, NodeId};
