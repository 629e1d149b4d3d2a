// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge rate limiting for scan triggers.
//!
//! The first trigger runs immediately and opens a window on the page's timer queue.
//! Triggers inside the window are dropped. When the window closes nothing runs; the next
//! trigger after it simply runs again. There is no trailing call.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::time::Duration;

use signpost_page::Page;

/// A scan trigger, invoked on each accepted scroll signal.
pub type Trigger = Box<dyn FnMut(&mut Page)>;

/// Wraps triggers in a leading-edge debounce window.
#[derive(Copy, Clone, Debug, Default)]
pub struct DebounceGate;

impl DebounceGate {
    /// Interpret a window given in milliseconds.
    ///
    /// `None`, NaN and infinite values mean "no debouncing". Negative values clamp to zero.
    pub fn window(window_ms: Option<f64>) -> Option<Duration> {
        let ms = window_ms.filter(|ms| ms.is_finite())?;
        let secs = ms.max(0.0) / 1000.0;
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Wrap `scan` so that it runs at most once per window.
    ///
    /// Without a valid window, `scan` is returned as is and runs on every trigger.
    pub fn wrap(mut scan: impl FnMut(&mut Page) + 'static, window_ms: Option<f64>) -> Trigger {
        let Some(window) = Self::window(window_ms) else {
            return Box::new(scan);
        };
        let pending = Rc::new(Cell::new(false));
        Box::new(move |page: &mut Page| {
            if pending.get() {
                tracing::trace!("scan trigger debounced");
                return;
            }
            scan(page);
            pending.set(true);
            let gate = Rc::clone(&pending);
            page.set_timeout(window, move |_| gate.set(false));
        })
    }
}
