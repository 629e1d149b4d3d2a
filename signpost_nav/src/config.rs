// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay configuration.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use signpost_page::{NodeId, Page};

use crate::pairs::ItemFactory;

/// Default tag of the overlay container.
pub const DEFAULT_CONTAINER_TAG: &str = "nav";
/// Default tag of the entry list inside the container.
pub const DEFAULT_LIST_TAG: &str = "ul";
/// Default class marking the active entry.
pub const DEFAULT_ACTIVE_CLASS: &str = "navbar-active";

/// The sections an overlay tracks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sections {
    /// An explicit, ordered list of elements.
    Nodes(Vec<NodeId>),
    /// Every descendant of `root` (the document when `None`) with a matching tag,
    /// in document order.
    Tag {
        /// Element to search under.
        root: Option<NodeId>,
        /// Tag to match, ASCII case-insensitive.
        tag: String,
    },
}

impl Sections {
    /// Resolve to the ordered section list on `page`.
    pub fn resolve(&self, page: &Page) -> Vec<NodeId> {
        match self {
            Self::Nodes(nodes) => nodes.clone(),
            Self::Tag { root, tag } => {
                page.elements_by_tag(root.unwrap_or_else(|| page.document()), tag)
            }
        }
    }
}

impl From<Vec<NodeId>> for Sections {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for Sections {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

/// Configuration for one navigation overlay.
///
/// `sections` and `item_factory` are required; everything else has a default.
///
/// ```
/// use signpost_nav::NavigatorConfig;
/// use signpost_page::Page;
///
/// let config = NavigatorConfig::new()
///     .sections_by_tag(None, "h2")
///     .item_factory(|page: &mut Page, _section| page.create_element("li"))
///     .debounce_window_ms(100.0);
/// assert_eq!(config.container_tag_str(), "nav");
/// ```
pub struct NavigatorConfig {
    pub(crate) sections: Option<Sections>,
    pub(crate) item_factory: Option<ItemFactory>,
    pub(crate) target: Option<NodeId>,
    pub(crate) container_tag: String,
    pub(crate) list_tag: String,
    pub(crate) active_class: String,
    pub(crate) debounce_window_ms: Option<f64>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            sections: None,
            item_factory: None,
            target: None,
            container_tag: DEFAULT_CONTAINER_TAG.into(),
            list_tag: DEFAULT_LIST_TAG.into(),
            active_class: DEFAULT_ACTIVE_CLASS.into(),
            debounce_window_ms: None,
        }
    }
}

impl fmt::Debug for NavigatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorConfig")
            .field("sections", &self.sections)
            .field("item_factory", &self.item_factory.as_ref().map(|_| "<fn>"))
            .field("target", &self.target)
            .field("container_tag", &self.container_tag)
            .field("list_tag", &self.list_tag)
            .field("active_class", &self.active_class)
            .field("debounce_window_ms", &self.debounce_window_ms)
            .finish()
    }
}

impl NavigatorConfig {
    /// An empty configuration with default tags and marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track these sections.
    pub fn sections(mut self, sections: impl Into<Sections>) -> Self {
        self.sections = Some(sections.into());
        self
    }

    /// Track every descendant of `root` (the document when `None`) tagged `tag`.
    pub fn sections_by_tag(mut self, root: Option<NodeId>, tag: impl Into<String>) -> Self {
        self.sections = Some(Sections::Tag {
            root,
            tag: tag.into(),
        });
        self
    }

    /// Render entries with `factory`.
    pub fn item_factory(
        mut self,
        factory: impl FnMut(&mut Page, NodeId) -> NodeId + 'static,
    ) -> Self {
        self.item_factory = Some(Box::new(factory));
        self
    }

    /// Observe scroll signals on `target` instead of the document.
    pub fn target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Tag of the overlay container.
    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into();
        self
    }

    /// Tag of the entry list.
    pub fn list_tag(mut self, tag: impl Into<String>) -> Self {
        self.list_tag = tag.into();
        self
    }

    /// Class that marks the active entry.
    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Run at most one scan per `window_ms` milliseconds (leading edge).
    ///
    /// NaN and infinite values disable debouncing.
    pub fn debounce_window_ms(mut self, window_ms: f64) -> Self {
        self.debounce_window_ms = Some(window_ms);
        self
    }

    /// The configured container tag.
    pub fn container_tag_str(&self) -> &str {
        &self.container_tag
    }

    /// The configured list tag.
    pub fn list_tag_str(&self) -> &str {
        &self.list_tag
    }

    /// The configured active marker class.
    pub fn active_class_str(&self) -> &str {
        &self.active_class
    }
}
