// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll subscription for a navigation overlay.
//!
//! ## Binding
//!
//! [`EventRouter::bind`] prefers [`Page::add_event_listener`], registering passively when
//! the [`PassiveSupport`] it was built with allows it. Pages without the modern mechanism
//! fall back to [`Page::attach_event`]. A page with neither is rejected.
//!
//! Only signals whose origin is the target itself reach the trigger. Signals bubbling up
//! from scrollable descendants are ignored.
//!
//! The trigger runs once during `bind`, after registration, so the marker is correct
//! before the first scroll.

use alloc::rc::Rc;
use core::cell::RefCell;

use signpost_page::{Capabilities, EventKind, ListenerId, ListenerOptions, NodeId, Page, handler};

use crate::debounce::Trigger;
use crate::error::NavError;
use crate::probe::PassiveSupport;

/// Binds scan triggers to scroll signals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventRouter {
    passive: PassiveSupport,
}

impl EventRouter {
    /// Create a router that registers passively when `passive` says so.
    pub const fn new(passive: PassiveSupport) -> Self {
        Self { passive }
    }

    /// The passive support this router was built with.
    pub const fn passive_support(&self) -> PassiveSupport {
        self.passive
    }

    /// Check that `page` offers at least one registration mechanism.
    pub fn ensure_supported(page: &Page) -> Result<(), NavError> {
        let any = Capabilities::EVENT_LISTENER | Capabilities::LEGACY_EVENTS;
        if page.capabilities().intersects(any) {
            Ok(())
        } else {
            Err(NavError::UnsupportedEnvironment)
        }
    }

    /// Subscribe `trigger` to scroll signals originating at `target`, then run it once.
    pub fn bind(
        &self,
        page: &mut Page,
        target: NodeId,
        trigger: Trigger,
    ) -> Result<Subscription, NavError> {
        Self::ensure_supported(page)?;
        if !page.is_alive(target) {
            return Err(NavError::StaleTarget(target));
        }

        let trigger = Rc::new(RefCell::new(trigger));
        let on_scroll = {
            let trigger = Rc::clone(&trigger);
            handler(move |page, signal| {
                if signal.origin == target {
                    (&mut *trigger.borrow_mut())(page);
                }
            })
        };

        let listener = if page.capabilities().contains(Capabilities::EVENT_LISTENER) {
            let options = ListenerOptions {
                capture: false,
                passive: self.passive.get(),
            };
            let id = page.add_event_listener(target, EventKind::Scroll, on_scroll, &options)?;
            tracing::debug!(?target, passive = options.passive, "bound scroll listener");
            id
        } else {
            tracing::warn!(?target, "add_event_listener unavailable, using attach_event");
            page.attach_event(target, EventKind::Scroll, on_scroll)?
        };

        (&mut *trigger.borrow_mut())(page);
        Ok(Subscription { target, listener })
    }
}

/// Handle to a bound scroll listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    target: NodeId,
    listener: ListenerId,
}

impl Subscription {
    /// The element whose scroll signals are observed.
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// The registered listener.
    pub const fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Returns true while the listener is still registered on `page`.
    pub fn is_bound(&self, page: &Page) -> bool {
        page.listener_flags(self.listener).is_some()
    }

    /// Remove the listener. Returns false if it was already gone.
    pub fn unbind(self, page: &mut Page) -> bool {
        page.remove_event_listener(self.listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use core::cell::Cell;
    use kurbo::{Rect, Vec2};
    use signpost_page::ListenerFlags;

    fn counting_trigger() -> (Rc<Cell<u32>>, Trigger) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        (count, Box::new(move |_: &mut Page| c.set(c.get() + 1)))
    }

    #[test]
    fn bind_scans_once_and_on_target_scroll() {
        let mut page = Page::new();
        let doc = page.document();
        let (count, trigger) = counting_trigger();
        let sub = EventRouter::new(PassiveSupport::SUPPORTED)
            .bind(&mut page, doc, trigger)
            .unwrap();
        assert_eq!(count.get(), 1);
        assert_eq!(page.listener_flags(sub.listener()), Some(ListenerFlags::PASSIVE));

        page.scroll_to(doc, Vec2::new(0.0, 40.0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn descendant_scrolls_are_ignored() {
        let mut page = Page::new();
        let doc = page.document();
        let pane = page.append_element(doc, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let (count, trigger) = counting_trigger();
        EventRouter::default().bind(&mut page, doc, trigger).unwrap();
        page.scroll_to(pane, Vec2::new(0.0, 10.0));
        assert_eq!(page.dispatch_scroll(pane), 1, "the listener still sees the signal");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unsupported_passive_registers_plainly() {
        let mut page = Page::new();
        let doc = page.document();
        let (_, trigger) = counting_trigger();
        let sub = EventRouter::new(PassiveSupport::UNSUPPORTED)
            .bind(&mut page, doc, trigger)
            .unwrap();
        assert_eq!(page.listener_flags(sub.listener()), Some(ListenerFlags::empty()));
    }

    #[test]
    fn legacy_fallback() {
        let mut page = Page::with_capabilities(Capabilities::LEGACY_EVENTS);
        let doc = page.document();
        let (count, trigger) = counting_trigger();
        let sub = EventRouter::default().bind(&mut page, doc, trigger).unwrap();
        assert_eq!(page.listener_flags(sub.listener()), Some(ListenerFlags::LEGACY));
        page.dispatch_scroll(doc);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn no_mechanism_is_rejected_before_scanning() {
        let mut page = Page::with_capabilities(Capabilities::empty());
        let doc = page.document();
        let (count, trigger) = counting_trigger();
        assert_eq!(
            EventRouter::default().bind(&mut page, doc, trigger),
            Err(NavError::UnsupportedEnvironment)
        );
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn stale_target_is_rejected() {
        let mut page = Page::new();
        let doc = page.document();
        let gone = page.append_element(doc, "div", Rect::ZERO);
        page.remove(gone);
        let (_, trigger) = counting_trigger();
        assert_eq!(
            EventRouter::default().bind(&mut page, gone, trigger),
            Err(NavError::StaleTarget(gone))
        );
    }

    #[test]
    fn unbind_stops_delivery() {
        let mut page = Page::new();
        let doc = page.document();
        let (count, trigger) = counting_trigger();
        let sub = EventRouter::default().bind(&mut page, doc, trigger).unwrap();
        assert!(sub.is_bound(&page));
        assert!(sub.unbind(&mut page));
        assert!(!sub.is_bound(&page));
        assert!(!sub.unbind(&mut page));
        page.dispatch_scroll(doc);
        assert_eq!(count.get(), 1);
        assert_eq!(sub.target(), doc);
    }
}
