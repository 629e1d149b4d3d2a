// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proximity scan: pick the section nearest the viewport top and move the marker to its entry.
//!
//! ## Selection
//!
//! - Distance is the absolute vertical offset of a section from the viewport top.
//! - One pass over the pairs, one measurement per pair.
//! - A pair takes the lead only when strictly nearer than the current leader, so on
//!   equal distance the earliest pair (topmost in section order) keeps the lead.
//! - The first pair always leads initially, so exactly one entry ends up marked even when
//!   measurements are not finite.
//!
//! Entries that lose are cleared as the pass goes; the marker is set on the winner last.

use alloc::string::String;

use signpost_page::{NodeId, Page};

use crate::pairs::Pair;

/// What the scan needs from its host: measurements and markers.
pub trait SectionHost {
    /// Node handle type.
    type Node: Copy;

    /// Signed vertical offset of a section's top edge from the viewport top.
    fn top_offset(&self, node: Self::Node) -> f64;

    /// Add (`present = true`) or remove the `marker` on an entry. Must be idempotent.
    fn set_marker(&mut self, node: Self::Node, marker: &str, present: bool);
}

impl SectionHost for Page {
    type Node = NodeId;

    fn top_offset(&self, node: NodeId) -> f64 {
        self.client_rect(node).map_or(f64::INFINITY, |r| r.y0)
    }

    fn set_marker(&mut self, node: NodeId, marker: &str, present: bool) {
        if present {
            self.add_class(node, marker);
        } else {
            self.remove_class(node, marker);
        }
    }
}

/// Moves an activation marker to the entry whose section is nearest the viewport top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProximityScanner {
    marker: String,
}

impl ProximityScanner {
    /// Create a scanner that marks the active entry with `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The marker this scanner toggles.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Run one scan over `pairs`, returning the index of the entry left active.
    ///
    /// Returns `None` only for an empty slice.
    pub fn scan<H: SectionHost>(&self, host: &mut H, pairs: &[Pair<H::Node>]) -> Option<usize> {
        let mut leader: Option<usize> = None;
        let mut closest = f64::INFINITY;

        for (i, pair) in pairs.iter().enumerate() {
            let distance = host.top_offset(pair.source).abs();
            let leads = match leader {
                None => true,
                Some(_) => distance < closest,
            };
            if !leads {
                host.set_marker(pair.entry, &self.marker, false);
                continue;
            }
            if let Some(prev) = leader {
                host.set_marker(pairs[prev].entry, &self.marker, false);
            }
            leader = Some(i);
            closest = distance;
        }

        let i = leader?;
        host.set_marker(pairs[i].entry, &self.marker, true);
        tracing::trace!(active = i, distance = closest, "proximity scan");
        Some(i)
    }
}
