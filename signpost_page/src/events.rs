// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration and signal delivery.
//!
//! ## Mechanisms
//!
//! A page offers up to two registration mechanisms, selected by its [`Capabilities`]:
//!
//! - [`Page::add_event_listener`] takes an [`OptionsSource`]. The `capture` member is always
//!   read; the `passive` member is read only when the page has [`Capabilities::PASSIVE_OPTION`].
//! - [`Page::attach_event`] is the legacy mechanism. It takes no options at all.
//!
//! Calling a mechanism the page does not offer fails with [`ListenerError::Unsupported`].
//!
//! ## Delivery
//!
//! [`Page::dispatch`] routes a signal with [`signpost_events`] (capture → target → bubble)
//! and invokes every matching handler with `&mut Page`, so handlers may read geometry and
//! mutate elements. Listeners removed while a signal is in flight are skipped.

use alloc::rc::Rc;
use core::cell::RefCell;

use signpost_events::router::Router;
use signpost_events::types::{EventKind, ListenerFlags, ListenerId, ParentLookup, Phase};

use crate::tree::Page;
use crate::types::{Capabilities, NodeId};

/// Shared handler invoked for each delivered signal.
///
/// Handlers are reference counted so a page can release its registry before calling them.
/// A handler must not cause itself to be re-entered (for example by scrolling its own target).
pub type SignalHandler = Rc<RefCell<dyn FnMut(&mut Page, &Signal)>>;

/// Wrap a closure as a [`SignalHandler`].
pub fn handler(f: impl FnMut(&mut Page, &Signal) + 'static) -> SignalHandler {
    Rc::new(RefCell::new(f))
}

/// A signal as seen by one listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signal {
    /// Kind of the signal.
    pub kind: EventKind,
    /// Element the signal originated at.
    pub origin: NodeId,
    /// Element the receiving listener is registered on.
    pub current: NodeId,
    /// Propagation phase at delivery.
    pub phase: Phase,
}

/// Registration mechanism, for error reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mechanism {
    /// [`Page::add_event_listener`].
    Modern,
    /// [`Page::attach_event`].
    Legacy,
}

impl core::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Modern => "add_event_listener",
            Self::Legacy => "attach_event",
        })
    }
}

/// Errors raised by listener registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    /// The page does not offer this registration mechanism.
    #[error("this page does not support {mechanism}")]
    Unsupported {
        /// The missing mechanism.
        mechanism: Mechanism,
    },
    /// The target id does not refer to a live element.
    #[error("listener target {0:?} is not a live element")]
    StaleNode(NodeId),
}

/// Options read during [`Page::add_event_listener`].
///
/// The page reads members through these accessors, so an implementation can observe
/// which members a host understands.
pub trait OptionsSource {
    /// Deliver during the capture phase instead of the bubble phase.
    fn capture(&self) -> bool;
    /// Promise not to block the signal pipeline.
    fn passive(&self) -> bool;
}

/// Plain listener options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// See [`OptionsSource::capture`].
    pub capture: bool,
    /// See [`OptionsSource::passive`].
    pub passive: bool,
}

impl ListenerOptions {
    /// Bubble-phase, passive options.
    pub const PASSIVE: Self = Self {
        capture: false,
        passive: true,
    };
}

impl OptionsSource for ListenerOptions {
    fn capture(&self) -> bool {
        self.capture
    }

    fn passive(&self) -> bool {
        self.passive
    }
}

struct Parents<'a>(&'a Page);

impl ParentLookup<NodeId> for Parents<'_> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.0.parent(*node)
    }
}

impl Page {
    /// Register `handler` for `kind` signals on `target`.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        kind: EventKind,
        handler: SignalHandler,
        options: &dyn OptionsSource,
    ) -> Result<ListenerId, ListenerError> {
        if !self.capabilities.contains(Capabilities::EVENT_LISTENER) {
            return Err(ListenerError::Unsupported {
                mechanism: Mechanism::Modern,
            });
        }
        if !self.is_alive(target) {
            return Err(ListenerError::StaleNode(target));
        }
        let mut flags = ListenerFlags::empty();
        if options.capture() {
            flags |= ListenerFlags::CAPTURE;
        }
        if self.capabilities.contains(Capabilities::PASSIVE_OPTION) && options.passive() {
            flags |= ListenerFlags::PASSIVE;
        }
        Ok(self.listeners.add(target, kind, flags, handler))
    }

    /// Register `handler` for `kind` signals on `target` through the legacy mechanism.
    pub fn attach_event(
        &mut self,
        target: NodeId,
        kind: EventKind,
        handler: SignalHandler,
    ) -> Result<ListenerId, ListenerError> {
        if !self.capabilities.contains(Capabilities::LEGACY_EVENTS) {
            return Err(ListenerError::Unsupported {
                mechanism: Mechanism::Legacy,
            });
        }
        if !self.is_alive(target) {
            return Err(ListenerError::StaleNode(target));
        }
        Ok(self
            .listeners
            .add(target, kind, ListenerFlags::LEGACY, handler))
    }

    /// Remove a listener registered through either mechanism.
    ///
    /// Returns false if it was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Flags a listener was registered with.
    pub fn listener_flags(&self, id: ListenerId) -> Option<ListenerFlags> {
        self.listeners.flags_of(id)
    }

    /// Number of `kind` listeners on `target`.
    pub fn listener_count(&self, target: NodeId, kind: EventKind) -> usize {
        self.listeners.count_for(target, kind)
    }

    /// Route a signal from `origin` and invoke the matching handlers.
    ///
    /// Returns the number of handler invocations.
    pub fn dispatch(&mut self, origin: NodeId, kind: EventKind, bubbles: bool) -> usize {
        if !self.is_alive(origin) {
            return 0;
        }
        let seq = Router::with_parent(Parents(self)).route(origin, bubbles);
        let deliveries = self.listeners.deliveries(&seq, kind);
        let mut delivered = 0;
        for d in deliveries {
            if self.listeners.flags_of(d.listener).is_none() {
                continue;
            }
            let signal = Signal {
                kind,
                origin,
                current: d.dispatch.node,
                phase: d.dispatch.phase,
            };
            let mut f = d.handler.borrow_mut();
            (&mut *f)(self, &signal);
            delivered += 1;
        }
        tracing::trace!(?origin, kind = kind.name(), delivered, "dispatched signal");
        delivered
    }

    /// Emit a bubbling scroll signal from `origin` without changing any offset.
    pub fn dispatch_scroll(&mut self, origin: NodeId) -> usize {
        self.dispatch(origin, EventKind::Scroll, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use kurbo::{Rect, Vec2};

    fn recorder() -> (SignalHandler, Rc<RefCell<Vec<Signal>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (handler(move |_, s: &Signal| sink.borrow_mut().push(*s)), seen)
    }

    #[test]
    fn scroll_signal_bubbles_to_document_with_child_origin() {
        let mut page = Page::new();
        let doc = page.document();
        let pane = page.append_element(doc, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let (h, seen) = recorder();
        page.add_event_listener(doc, EventKind::Scroll, h, &ListenerOptions::default())
            .unwrap();

        assert_eq!(page.scroll_to(pane, Vec2::new(0.0, 5.0)), 1);
        assert_eq!(
            *seen.borrow(),
            vec![Signal {
                kind: EventKind::Scroll,
                origin: pane,
                current: doc,
                phase: Phase::Bubble,
            }]
        );

        assert_eq!(page.dispatch_scroll(doc), 1);
        assert_eq!(seen.borrow()[1].origin, doc);
        assert_eq!(seen.borrow()[1].phase, Phase::Target);
    }

    #[test]
    fn passive_member_is_read_only_when_supported() {
        struct Observed(Cell<bool>);
        impl OptionsSource for Observed {
            fn capture(&self) -> bool {
                false
            }
            fn passive(&self) -> bool {
                self.0.set(true);
                true
            }
        }

        let mut page = Page::new();
        let doc = page.document();
        let opts = Observed(Cell::new(false));
        let id = page
            .add_event_listener(doc, EventKind::Custom("test"), handler(|_, _| {}), &opts)
            .unwrap();
        assert!(opts.0.get());
        assert_eq!(page.listener_flags(id), Some(ListenerFlags::PASSIVE));

        let mut old = Page::with_capabilities(Capabilities::EVENT_LISTENER);
        let doc = old.document();
        let opts = Observed(Cell::new(false));
        let id = old
            .add_event_listener(doc, EventKind::Custom("test"), handler(|_, _| {}), &opts)
            .unwrap();
        assert!(!opts.0.get(), "host without passive support never reads it");
        assert_eq!(old.listener_flags(id), Some(ListenerFlags::empty()));
    }

    #[test]
    fn missing_mechanisms_are_reported() {
        let mut page = Page::with_capabilities(Capabilities::empty());
        let doc = page.document();
        let err = page
            .add_event_listener(
                doc,
                EventKind::Scroll,
                handler(|_, _| {}),
                &ListenerOptions::PASSIVE,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ListenerError::Unsupported {
                mechanism: Mechanism::Modern
            }
        );
        let err = page
            .attach_event(doc, EventKind::Scroll, handler(|_, _| {}))
            .unwrap_err();
        assert_eq!(
            err,
            ListenerError::Unsupported {
                mechanism: Mechanism::Legacy
            }
        );
    }

    #[test]
    fn legacy_listeners_receive_signals() {
        let mut page = Page::with_capabilities(Capabilities::LEGACY_EVENTS);
        let doc = page.document();
        let (h, seen) = recorder();
        let id = page.attach_event(doc, EventKind::Scroll, h).unwrap();
        assert_eq!(page.listener_flags(id), Some(ListenerFlags::LEGACY));
        page.dispatch_scroll(doc);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn stale_targets_are_rejected() {
        let mut page = Page::new();
        let doc = page.document();
        let gone = page.append_element(doc, "div", Rect::ZERO);
        page.remove(gone);
        let err = page
            .attach_event(gone, EventKind::Scroll, handler(|_, _| {}))
            .unwrap_err();
        assert_eq!(err, ListenerError::StaleNode(gone));
        assert_eq!(page.dispatch_scroll(gone), 0);
    }

    #[test]
    fn removing_element_drops_its_listeners() {
        let mut page = Page::new();
        let doc = page.document();
        let pane = page.append_element(doc, "div", Rect::ZERO);
        let (h, _) = recorder();
        page.attach_event(pane, EventKind::Scroll, h).unwrap();
        assert_eq!(page.listener_count(pane, EventKind::Scroll), 1);
        page.remove(pane);
        assert_eq!(page.listener_count(pane, EventKind::Scroll), 0);
    }

    #[test]
    fn listener_removed_in_flight_is_skipped() {
        let mut page = Page::new();
        let doc = page.document();
        let second: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0_u32));

        let victim = second.clone();
        let first = handler(move |page: &mut Page, _: &Signal| {
            if let Some(id) = victim.get() {
                page.remove_event_listener(id);
            }
        });
        page.add_event_listener(doc, EventKind::Scroll, first, &ListenerOptions::default())
            .unwrap();
        let counter = calls.clone();
        let id = page
            .add_event_listener(
                doc,
                EventKind::Scroll,
                handler(move |_, _| counter.set(counter.get() + 1)),
                &ListenerOptions::default(),
            )
            .unwrap();
        second.set(Some(id));

        assert_eq!(page.dispatch_scroll(doc), 1);
        assert_eq!(calls.get(), 0);
    }
}
