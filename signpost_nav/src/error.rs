// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building a navigation overlay.

use signpost_page::{ListenerError, NodeId};

/// Why a navigation overlay could not be created.
///
/// Every variant is raised synchronously by
/// [`Navigator::create`](crate::navigator::Navigator::create) before any element is created,
/// except when the factory itself yields nothing to pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// No sections were configured.
    #[error("sections and an item factory must be provided: sections are missing")]
    MissingSections,
    /// No item factory was configured.
    #[error("sections and an item factory must be provided: item factory is missing")]
    MissingItemFactory,
    /// The configured sections resolved to nothing.
    #[error("no navigation items for the given sections")]
    NoSections,
    /// The scroll target is not a live element.
    #[error("scroll target {0:?} is not a live element")]
    StaleTarget(NodeId),
    /// The page offers no way to subscribe to scroll signals.
    #[error("this page supports neither add_event_listener nor attach_event")]
    UnsupportedEnvironment,
}

impl NavError {
    /// Returns true for errors the caller fixes at the call site (the configuration class).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::UnsupportedEnvironment)
    }
}

impl From<ListenerError> for NavError {
    fn from(err: ListenerError) -> Self {
        match err {
            ListenerError::Unsupported { .. } => Self::UnsupportedEnvironment,
            ListenerError::StaleNode(node) => Self::StaleTarget(node),
        }
    }
}
