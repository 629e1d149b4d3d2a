// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition root: validate, build, bind.

use alloc::rc::Rc;
use alloc::string::String;

use signpost_page::{NodeId, Page};

use crate::config::NavigatorConfig;
use crate::debounce::DebounceGate;
use crate::error::NavError;
use crate::pairs::{Pair, PairBuilder};
use crate::probe::{FeatureProbe, PassiveSupport};
use crate::router::{EventRouter, Subscription};
use crate::scan::ProximityScanner;

/// Creates navigation overlays on a page.
///
/// Passive support is probed once, when the navigator is created, and reused by every
/// overlay it builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    router: EventRouter,
}

impl Navigator {
    /// Probe `page` and create a navigator for it.
    pub fn new(page: &mut Page) -> Self {
        Self::with_passive_support(FeatureProbe::detect_passive_support(page))
    }

    /// Create a navigator with a known passive support value, skipping the probe.
    pub const fn with_passive_support(passive: PassiveSupport) -> Self {
        Self {
            router: EventRouter::new(passive),
        }
    }

    /// The passive support overlays are bound with.
    pub const fn passive_support(&self) -> PassiveSupport {
        self.router.passive_support()
    }

    /// Build an overlay from `config`.
    ///
    /// Configuration is validated before any element is created: missing sections or item
    /// factory, sections that resolve to nothing, a dead target and a page without any
    /// listener mechanism are all rejected with the page untouched.
    ///
    /// On success the container holds the list, the list holds one entry per section in
    /// section order, and exactly one entry carries the active class. The container is not
    /// attached anywhere; inserting it into the page is up to the caller.
    pub fn create(&self, page: &mut Page, config: NavigatorConfig) -> Result<NavHandle, NavError> {
        let NavigatorConfig {
            sections,
            item_factory,
            target,
            container_tag,
            list_tag,
            active_class,
            debounce_window_ms,
        } = config;

        let sections = sections.ok_or(NavError::MissingSections)?;
        let mut factory = item_factory.ok_or(NavError::MissingItemFactory)?;
        let sections = sections.resolve(page);
        if sections.is_empty() {
            return Err(NavError::NoSections);
        }
        let target = target.unwrap_or_else(|| page.document());
        if !page.is_alive(target) {
            return Err(NavError::StaleTarget(target));
        }
        EventRouter::ensure_supported(page)?;

        let container = page.create_element(&container_tag);
        let list = page.create_element(&list_tag);
        let pairs: Rc<[Pair]> =
            PairBuilder::build(page, list, Some(sections.as_slice()), Some(&mut factory))?.into();

        let scanner = ProximityScanner::new(active_class.clone());
        let scan_pairs = Rc::clone(&pairs);
        let trigger = DebounceGate::wrap(
            move |page: &mut Page| {
                scanner.scan(page, &scan_pairs[..]);
            },
            debounce_window_ms,
        );
        let subscription = self.router.bind(page, target, trigger)?;
        page.append_child(container, list);

        tracing::debug!(
            ?container,
            ?target,
            sections = pairs.len(),
            debounce_window_ms,
            "navigation overlay created"
        );
        Ok(NavHandle {
            container,
            list,
            pairs,
            active_class,
            subscription,
        })
    }
}

/// A live navigation overlay.
#[derive(Clone, Debug)]
pub struct NavHandle {
    container: NodeId,
    list: NodeId,
    pairs: Rc<[Pair]>,
    active_class: String,
    subscription: Subscription,
}

impl NavHandle {
    /// The overlay container element.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The list element holding the entries.
    pub fn list(&self) -> NodeId {
        self.list
    }

    /// Section/entry pairs in section order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// The element whose scroll signals drive the overlay.
    pub fn target(&self) -> NodeId {
        self.subscription.target()
    }

    /// The class marking the active entry.
    pub fn active_class(&self) -> &str {
        &self.active_class
    }

    /// Index of the pair whose entry currently carries the active class.
    pub fn active(&self, page: &Page) -> Option<usize> {
        self.pairs
            .iter()
            .position(|p| page.has_class(p.entry, &self.active_class))
    }

    /// Returns true until [`NavHandle::dispose`] is called.
    pub fn is_bound(&self, page: &Page) -> bool {
        self.subscription.is_bound(page)
    }

    /// Stop tracking scroll signals.
    ///
    /// Elements are left in place and keep their last marker. A debounce window that is
    /// still open expires harmlessly.
    pub fn dispose(self, page: &mut Page) -> bool {
        let removed = self.subscription.unbind(page);
        tracing::debug!(container = ?self.container, removed, "navigation overlay disposed");
        removed
    }
}
