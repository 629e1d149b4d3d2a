// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairing sections with their navigation entries.

use alloc::boxed::Box;
use alloc::vec::Vec;

use signpost_page::{NodeId, Page};

use crate::error::NavError;

/// Renders one navigation entry for a section.
///
/// Called once per section, in order, with the section's id. The returned element is
/// appended to the navigation list.
pub type ItemFactory = Box<dyn FnMut(&mut Page, NodeId) -> NodeId>;

/// A section and the navigation entry rendered for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pair<K = NodeId> {
    /// The section being tracked.
    pub source: K,
    /// The navigation entry that carries the active marker.
    pub entry: K,
}

/// Builds the ordered pair list for an overlay.
#[derive(Copy, Clone, Debug, Default)]
pub struct PairBuilder;

impl PairBuilder {
    /// Render an entry for each section in order and append it into `list`.
    ///
    /// Fails if either input is absent, or if there is nothing to pair.
    pub fn build(
        page: &mut Page,
        list: NodeId,
        sections: Option<&[NodeId]>,
        factory: Option<&mut ItemFactory>,
    ) -> Result<Vec<Pair>, NavError> {
        let sections = sections.ok_or(NavError::MissingSections)?;
        let factory = factory.ok_or(NavError::MissingItemFactory)?;

        let mut pairs = Vec::with_capacity(sections.len());
        for &source in sections {
            let entry = factory(page, source);
            page.append_child(list, entry);
            pairs.push(Pair { source, entry });
        }

        if pairs.is_empty() {
            return Err(NavError::NoSections);
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::ToOwned;
    use kurbo::Rect;

    fn list_item_factory() -> ItemFactory {
        Box::new(|page: &mut Page, source: NodeId| {
            let li = page.create_element("li");
            let text = page.text(source).unwrap_or_default().to_owned();
            page.set_text(li, &text);
            li
        })
    }

    #[test]
    fn pairs_follow_input_order() {
        let mut page = Page::new();
        let doc = page.document();
        let mut sections = Vec::new();
        for (i, label) in ["zero", "one", "two"].into_iter().enumerate() {
            let y = i as f64 * 10.0;
            let h = page.append_element(doc, "h2", Rect::new(0.0, y, 10.0, y + 5.0));
            page.set_text(h, label);
            sections.push(h);
        }
        let list = page.create_element("ul");
        let mut factory = list_item_factory();

        let pairs = PairBuilder::build(&mut page, list, Some(sections.as_slice()), Some(&mut factory))
            .unwrap();

        assert_eq!(pairs.len(), 3);
        let sources: Vec<NodeId> = pairs.iter().map(|p| p.source).collect();
        assert_eq!(sources, sections);
        let entries: Vec<NodeId> = pairs.iter().map(|p| p.entry).collect();
        assert_eq!(page.children(list), entries.as_slice());
        assert_eq!(page.text(pairs[1].entry), Some("one"));
    }

    #[test]
    fn missing_inputs_are_configuration_errors() {
        let mut page = Page::new();
        let list = page.create_element("ul");
        let mut factory = list_item_factory();
        assert_eq!(
            PairBuilder::build(&mut page, list, None, Some(&mut factory)),
            Err(NavError::MissingSections)
        );
        let doc = page.document();
        let h = page.append_element(doc, "h2", Rect::ZERO);
        assert_eq!(
            PairBuilder::build(&mut page, list, Some(&[h][..]), None),
            Err(NavError::MissingItemFactory)
        );
        assert!(page.children(list).is_empty());
    }

    #[test]
    fn empty_sections_are_rejected() {
        let mut page = Page::new();
        let list = page.create_element("ul");
        let mut factory = list_item_factory();
        assert_eq!(
            PairBuilder::build(&mut page, list, Some(&[][..]), Some(&mut factory)),
            Err(NavError::NoSections)
        );
    }
}
