// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core page implementation: structure, class lists, geometry, scrolling.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;
use kurbo::{Affine, Rect, Vec2};
use signpost_events::listeners::ListenerSet;
use signpost_events::types::EventKind;

use crate::events::SignalHandler;
use crate::timers::TimerQueue;
use crate::types::{Capabilities, ElementBox, NodeId};

/// Tag of the element created by [`Page::new`] to stand for the whole document.
pub const DOCUMENT_TAG: &str = "#document";

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// A retained page: an element tree with geometry, listeners and timers.
///
/// The page always has a document element (see [`Page::document`]) whose scroll offset
/// is the viewport scroll position. Elements created with [`Page::create_element`] start
/// detached and become part of the document once appended under it.
pub struct Page {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    document: NodeId,
    pub(crate) capabilities: Capabilities,
    pub(crate) listeners: ListenerSet<NodeId, SignalHandler>,
    pub(crate) timers: TimerQueue,
    pub(crate) now: Duration,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Page")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("capabilities", &self.capabilities)
            .field("listeners", &self.listeners.len())
            .field("pending_timers", &self.timers.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    text: String,
    classes: Vec<String>,
    local: ElementBox,
}

impl Node {
    fn new(generation: u32, tag: &str) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: tag.to_string(),
            text: String::new(),
            classes: Vec::new(),
            local: ElementBox::default(),
        }
    }
}

impl Page {
    /// Create a page holding only the document element, with every [`Capabilities`] bit.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::default())
    }

    /// Create a page whose environment only offers `capabilities`.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let mut page = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            document: NodeId::new(0, 0),
            capabilities,
            listeners: ListenerSet::new(),
            timers: TimerQueue::default(),
            now: Duration::ZERO,
        };
        page.document = page.create_element(DOCUMENT_TAG);
        page
    }

    /// The document element. It is the default scroll target and the root of the page.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Listener mechanisms this page offers.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Change the offered listener mechanisms. Existing listeners stay registered.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, tag));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, tag)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create an element with `bounds` and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, bounds: Rect) -> NodeId {
        let id = self.create_element(tag);
        self.set_bounds(id, bounds);
        self.append_child(parent, id);
        id
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns false, and changes nothing, if either id is stale, if `child` is the
    /// document, or if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.document {
            return false;
        }
        if self.path_to_root(parent).contains(&child) {
            return false;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        true
    }

    /// Remove an element (and its subtree) together with the listeners attached to it.
    ///
    /// The document element cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.document {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.remove_subtree(child);
        }
        self.listeners.retain_nodes(|n| *n != id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live elements, attached or not, including the document.
    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Parent of an element, if it is attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element in order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Tag of an element, as given at creation.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.tag.as_str())
    }

    /// Text content of an element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.text.as_str())
    }

    /// Replace the text content of an element.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.text.clear();
            n.text.push_str(text);
        }
    }

    /// Descendants of `root` whose tag matches `tag` (ASCII case-insensitive), in document order.
    ///
    /// `root` itself is never included.
    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.tag.eq_ignore_ascii_case(tag) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // --- class lists ---

    /// Space-separated class attribute of an element.
    pub fn class_name(&self, id: NodeId) -> Option<String> {
        self.node_opt(id).map(|n| n.classes.join(" "))
    }

    /// Replace the whole class list from a whitespace-separated string.
    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.classes = class_name.split_whitespace().map(ToString::to_string).collect();
        }
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Add `class` unless already present. Other classes are kept in place.
    ///
    /// Returns true if the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        if n.classes.iter().any(|c| c == class) {
            return false;
        }
        n.classes.push(class.to_string());
        true
    }

    /// Remove every occurrence of `class`. Other classes keep their order.
    ///
    /// Returns true if the class list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        let before = n.classes.len();
        n.classes.retain(|c| c != class);
        n.classes.len() != before
    }

    // --- geometry ---

    /// Local geometry of an element.
    pub fn element_box(&self, id: NodeId) -> Option<ElementBox> {
        self.node_opt(id).map(|n| n.local)
    }

    /// Update the bounds of an element, in its parent's content coordinates.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.bounds = bounds;
        }
    }

    /// Current scroll offset of an element's content.
    pub fn scroll_offset(&self, id: NodeId) -> Option<Vec2> {
        self.node_opt(id).map(|n| n.local.scroll_offset)
    }

    /// Bounds of an element relative to the viewport's top-left corner.
    ///
    /// Ancestors' positions and scroll offsets are applied. The document element itself
    /// moves with the viewport scroll, so its rect starts at the negated scroll offset.
    pub fn client_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        let tf = match node.parent {
            Some(p) => self.content_transform(p),
            None => Affine::translate(-node.local.scroll_offset),
        };
        Some(tf.transform_rect_bbox(node.local.bounds))
    }

    /// Set an element's scroll offset without emitting a signal.
    pub fn set_scroll_offset(&mut self, id: NodeId, offset: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.scroll_offset = offset;
        }
    }

    /// Scroll an element's content to `offset` and emit a bubbling scroll signal from it.
    ///
    /// Returns the number of listener invocations. Offsets are not clamped.
    pub fn scroll_to(&mut self, id: NodeId, offset: Vec2) -> usize {
        if !self.is_alive(id) {
            return 0;
        }
        self.set_scroll_offset(id, offset);
        self.dispatch(id, EventKind::Scroll, true)
    }

    /// Scroll an element's content by `delta` and emit a bubbling scroll signal from it.
    pub fn scroll_by(&mut self, id: NodeId, delta: Vec2) -> usize {
        match self.scroll_offset(id) {
            Some(offset) => self.scroll_to(id, offset + delta),
            None => 0,
        }
    }

    // --- internals ---

    /// Maps an element's content coordinates to viewport coordinates.
    fn content_transform(&self, id: NodeId) -> Affine {
        let mut tf = Affine::IDENTITY;
        for n in self.path_to_root(id) {
            let local = self.node(n).local;
            tf = tf * Affine::translate(local.bounds.origin().to_vec2() - local.scroll_offset);
        }
        tf
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    pub(crate) fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            let parent = self.node(id).parent;
            match parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn headings(page: &mut Page, tops: &[f64]) -> Vec<NodeId> {
        let doc = page.document();
        tops.iter()
            .map(|&y| page.append_element(doc, "h2", Rect::new(0.0, y, 100.0, y + 20.0)))
            .collect()
    }

    #[test]
    fn document_is_root_and_alive() {
        let page = Page::new();
        let doc = page.document();
        assert!(page.is_alive(doc));
        assert_eq!(page.parent(doc), None);
        assert_eq!(page.tag(doc), Some(DOCUMENT_TAG));
        assert_eq!(page.capabilities(), Capabilities::all());
    }

    #[test]
    fn append_child_reparents_and_rejects_cycles() {
        let mut page = Page::new();
        let doc = page.document();
        let a = page.create_element("div");
        let b = page.create_element("div");
        assert!(page.append_child(doc, a));
        assert!(page.append_child(a, b));
        assert!(!page.append_child(b, a), "ancestor cannot become a child");
        assert!(!page.append_child(a, a));
        assert!(!page.append_child(a, doc), "document stays the root");
        assert!(page.append_child(doc, b));
        assert_eq!(page.children(doc), &[a, b]);
        assert!(page.children(a).is_empty());
        assert_eq!(page.parent(b), Some(doc));
    }

    #[test]
    fn liveness_remove_reuse() {
        let mut page = Page::new();
        let doc = page.document();
        let a = page.append_element(doc, "section", Rect::ZERO);
        let inner = page.append_element(a, "p", Rect::ZERO);
        assert_eq!(page.element_count(), 3);
        page.remove(a);
        assert_eq!(page.element_count(), 1);
        assert!(!page.is_alive(a));
        assert!(!page.is_alive(inner), "subtree goes with its root");
        assert!(page.children(doc).is_empty());

        let b = page.create_element("section");
        assert!(page.is_alive(b));
        assert!(!page.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        // Stale ids are ignored by mutators and queries.
        page.set_text(a, "ignored");
        assert_eq!(page.text(a), None);
        assert!(!page.add_class(a, "x"));
    }

    #[test]
    fn document_cannot_be_removed() {
        let mut page = Page::new();
        let doc = page.document();
        page.remove(doc);
        assert!(page.is_alive(doc));
    }

    #[test]
    fn elements_by_tag_is_document_order() {
        let mut page = Page::new();
        let doc = page.document();
        let s1 = page.append_element(doc, "section", Rect::ZERO);
        let h1 = page.append_element(s1, "H2", Rect::ZERO);
        let s2 = page.append_element(doc, "section", Rect::ZERO);
        let h2 = page.append_element(s2, "h2", Rect::ZERO);
        let h3 = page.append_element(doc, "h2", Rect::ZERO);
        let detached = page.create_element("h2");
        assert_eq!(page.elements_by_tag(doc, "h2"), vec![h1, h2, h3]);
        assert_eq!(page.elements_by_tag(s2, "h2"), vec![h2]);
        assert!(!page.elements_by_tag(doc, "h2").contains(&detached));
        assert!(page.elements_by_tag(doc, "h3").is_empty());
    }

    #[test]
    fn class_helpers_keep_other_classes() {
        let mut page = Page::new();
        let li = page.create_element("li");
        assert_eq!(page.class_name(li).as_deref(), Some(""));
        assert!(page.add_class(li, "navbar-active"));
        assert_eq!(page.class_name(li).as_deref(), Some("navbar-active"));

        page.set_class_name(li, "  user   navbar-active other ");
        assert!(!page.add_class(li, "navbar-active"), "already present");
        assert!(page.remove_class(li, "navbar-active"));
        assert_eq!(page.class_name(li).as_deref(), Some("user other"));
        assert!(!page.remove_class(li, "navbar-active"));
        assert!(page.add_class(li, "navbar-active"));
        assert_eq!(page.class_name(li).as_deref(), Some("user other navbar-active"));
        assert!(page.has_class(li, "user"));
    }

    #[test]
    fn client_rect_follows_viewport_scroll() {
        let mut page = Page::new();
        let doc = page.document();
        let hs = headings(&mut page, &[0.0, 100.0, 200.0]);
        assert_eq!(page.client_rect(hs[1]).map(|r| r.y0), Some(100.0));

        page.set_scroll_offset(doc, Vec2::new(0.0, 150.0));
        let tops: Vec<f64> = hs.iter().map(|&h| page.client_rect(h).unwrap().y0).collect();
        assert_eq!(tops, vec![-150.0, -50.0, 50.0]);
        assert_eq!(page.client_rect(doc).map(|r| r.y0), Some(-150.0));
    }

    #[test]
    fn nested_scroller_offsets_compose() {
        let mut page = Page::new();
        let doc = page.document();
        let pane = page.append_element(doc, "div", Rect::new(0.0, 50.0, 300.0, 350.0));
        let h = page.append_element(pane, "h2", Rect::new(0.0, 120.0, 100.0, 140.0));
        assert_eq!(page.client_rect(h).map(|r| r.y0), Some(170.0));

        page.set_scroll_offset(pane, Vec2::new(0.0, 100.0));
        assert_eq!(page.client_rect(h).map(|r| r.y0), Some(70.0));
        // The pane's own box does not move when its content scrolls.
        assert_eq!(page.client_rect(pane).map(|r| r.y0), Some(50.0));

        page.set_scroll_offset(doc, Vec2::new(0.0, 30.0));
        assert_eq!(page.client_rect(h).map(|r| r.y0), Some(40.0));
        assert_eq!(page.client_rect(pane).map(|r| r.y0), Some(20.0));
    }

    #[test]
    fn scroll_by_accumulates() {
        let mut page = Page::new();
        let doc = page.document();
        page.scroll_by(doc, Vec2::new(0.0, 10.0));
        page.scroll_by(doc, Vec2::new(0.0, 15.0));
        assert_eq!(page.scroll_offset(doc), Some(Vec2::new(0.0, 25.0)));
    }
}
