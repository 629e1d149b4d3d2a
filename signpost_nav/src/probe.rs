// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-time detection of passive listener support.
//!
//! The probe registers a throwaway listener whose options record whether the page read
//! their `passive` member. A page that reads it understands passive registration.
//! The listener is removed straight away. Registration failures are not errors here:
//! they simply mean "unsupported".

use core::cell::Cell;

use signpost_page::{EventKind, OptionsSource, Page, handler};

/// Kind of the throwaway signal used by the probe. Nothing ever dispatches it.
pub const PROBE_EVENT: EventKind = EventKind::Custom("test");

/// Whether scroll listeners can be registered as passive.
///
/// Produced once by [`FeatureProbe::detect_passive_support`] and handed to the
/// [`EventRouter`](crate::router::EventRouter); it never changes afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassiveSupport(bool);

impl PassiveSupport {
    /// Passive registration is available.
    pub const SUPPORTED: Self = Self(true);
    /// Passive registration is not available.
    pub const UNSUPPORTED: Self = Self(false);

    /// Returns true if passive registration is available.
    pub const fn get(self) -> bool {
        self.0
    }
}

struct ProbeOptions {
    passive_read: Cell<bool>,
}

impl OptionsSource for ProbeOptions {
    fn capture(&self) -> bool {
        false
    }

    fn passive(&self) -> bool {
        self.passive_read.set(true);
        false
    }
}

/// Capability probe for the hosting page.
#[derive(Copy, Clone, Debug, Default)]
pub struct FeatureProbe;

impl FeatureProbe {
    /// Detect whether `page` honors the `passive` listener option.
    pub fn detect_passive_support(page: &mut Page) -> PassiveSupport {
        let options = ProbeOptions {
            passive_read: Cell::new(false),
        };
        let target = page.document();
        match page.add_event_listener(target, PROBE_EVENT, handler(|_, _| {}), &options) {
            Ok(id) => {
                page.remove_event_listener(id);
            }
            Err(err) => {
                tracing::debug!(%err, "passive listener probe failed");
            }
        }
        let supported = options.passive_read.get();
        tracing::debug!(supported, "passive listener support detected");
        PassiveSupport(supported)
    }
}
