// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signpost Nav: a scroll-tracking navigation overlay.
//!
//! ## Overview
//!
//! Given the sections of a page and a function that renders one navigation entry per
//! section, this crate builds an overlay (a container holding a list of entries) and keeps
//! exactly one entry marked active as the page scrolls: the one whose section is currently
//! nearest the top of the viewport.
//!
//! ## Pieces
//!
//! - [`FeatureProbe`]: one-time detection of passive listener support.
//! - [`PairBuilder`]: renders an entry per section and records the ordered [`Pair`]s.
//! - [`ProximityScanner`]: the scan. Measures every section once, marks the nearest entry,
//!   clears the rest. Ties go to the earliest section.
//! - [`DebounceGate`]: optional leading-edge rate limit around the scan.
//! - [`EventRouter`]: subscribes the scan to the target's scroll signals, ignoring signals
//!   from descendants, and runs it once at bind time.
//! - [`Navigator`]: validates a [`NavigatorConfig`] and wires everything together into a
//!   [`NavHandle`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Vec2};
//! use signpost_nav::{Navigator, NavigatorConfig};
//! use signpost_page::Page;
//!
//! let mut page = Page::new();
//! let doc = page.document();
//! for (i, y) in [0.0, 500.0, 1000.0].into_iter().enumerate() {
//!     let h = page.append_element(doc, "h2", Rect::new(0.0, y, 800.0, y + 40.0));
//!     page.set_text(h, &format!("Part {i}"));
//! }
//!
//! let navigator = Navigator::new(&mut page);
//! let config = NavigatorConfig::new()
//!     .sections_by_tag(None, "h2")
//!     .item_factory(|page: &mut Page, section| {
//!         let li = page.create_element("li");
//!         let label = page.text(section).unwrap_or_default().to_string();
//!         page.set_text(li, &label);
//!         li
//!     });
//! let nav = navigator.create(&mut page, config).unwrap();
//! assert_eq!(nav.active(&page), Some(0));
//!
//! page.scroll_to(doc, Vec2::new(0.0, 520.0));
//! assert_eq!(nav.active(&page), Some(1));
//! assert!(page.has_class(nav.pairs()[1].entry, "navbar-active"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod debounce;
pub mod error;
pub mod navigator;
pub mod pairs;
pub mod probe;
pub mod router;
pub mod scan;

pub use config::{NavigatorConfig, Sections};
pub use debounce::{DebounceGate, Trigger};
pub use error::NavError;
pub use navigator::{NavHandle, Navigator};
pub use pairs::{ItemFactory, Pair, PairBuilder};
pub use probe::{FeatureProbe, PassiveSupport};
pub use router::{EventRouter, Subscription};
pub use scan::{ProximityScanner, SectionHost};

use signpost_page::Page;

/// Probe `page` and build one overlay from `config`.
///
/// Shorthand for [`Navigator::new`] followed by [`Navigator::create`]. Use a
/// [`Navigator`] directly to build several overlays from a single probe.
pub fn create(page: &mut Page, config: NavigatorConfig) -> Result<NavHandle, NavError> {
    Navigator::new(page).create(page, config)
}
