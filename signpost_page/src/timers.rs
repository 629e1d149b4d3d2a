// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual clock and one-shot timers.
//!
//! The page never reads a wall clock. Time moves only when [`Page::advance`] is called,
//! which fires due timers in deadline order (registration order among equal deadlines),
//! handing each callback `&mut Page`.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use crate::tree::Page;

/// Identifier of a scheduled timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    due: Duration,
    callback: Box<dyn FnOnce(&mut Page)>,
}

#[derive(Default)]
pub(crate) struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }

    fn push(&mut self, due: Duration, callback: Box<dyn FnOnce(&mut Page)>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer { id, due, callback });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Remove and return the earliest timer due at or before `deadline`.
    fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        let (pos, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id))?;
        Some(self.timers.remove(pos))
    }
}

impl Page {
    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `callback` once, `delay` after the current virtual time.
    pub fn set_timeout(
        &mut self,
        delay: Duration,
        callback: impl FnOnce(&mut Page) + 'static,
    ) -> TimerId {
        let due = self.now.saturating_add(delay);
        self.timers.push(due, Box::new(callback))
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock forward by `by`, firing every timer that falls due on the way.
    ///
    /// While a callback runs, [`Page::now`] reports that timer's deadline. Timers scheduled
    /// by callbacks fire in the same call if they fall due before the new time.
    /// Returns the number of timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.now.saturating_add(by);
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(deadline) {
            self.now = self.now.max(timer.due);
            (timer.callback)(self);
            fired += 1;
        }
        self.now = deadline;
        if fired > 0 {
            tracing::trace!(fired, now = ?self.now, "timers fired");
        }
        fired
    }
}
