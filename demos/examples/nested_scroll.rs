// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested scroller.
//!
//! Tracks sections inside a scrollable pane instead of the document. Scrolling the
//! document or an unrelated child does not move the marker; scrolling the pane does.
//! Also shows the legacy registration fallback on a page without the modern mechanism.
//!
//! Run:
//! - `cargo run -p signpost_demos --example nested_scroll`

use kurbo::{Rect, Vec2};
use signpost_nav::NavigatorConfig;
use signpost_page::{Capabilities, NodeId, Page};
use tracing_subscriber::EnvFilter;

fn build(page: &mut Page) -> (NodeId, NodeId, Vec<NodeId>) {
    let doc = page.document();
    let pane = page.append_element(doc, "main", Rect::new(200.0, 80.0, 1000.0, 680.0));
    let sections = (0..4)
        .map(|i| {
            let y = f64::from(i) * 400.0;
            let s = page.append_element(pane, "section", Rect::new(0.0, y, 800.0, y + 360.0));
            page.set_text(s, &format!("Chapter {}", i + 1));
            s
        })
        .collect();
    let aside = page.append_element(pane, "aside", Rect::new(0.0, 1600.0, 800.0, 1800.0));
    (pane, aside, sections)
}

fn run(capabilities: Capabilities) {
    let mut page = Page::with_capabilities(capabilities);
    let (pane, aside, sections) = build(&mut page);
    let doc = page.document();

    let config = NavigatorConfig::new()
        .sections(sections)
        .target(pane)
        .active_class("current")
        .item_factory(|page: &mut Page, section| {
            let li = page.create_element("li");
            let label = page.text(section).unwrap_or_default().to_owned();
            page.set_text(li, &label);
            li
        });
    let nav = match signpost_nav::create(&mut page, config) {
        Ok(nav) => nav,
        Err(err) => {
            println!("{capabilities:?}: {err}");
            return;
        }
    };

    let report = |page: &Page, what: &str| {
        let active = nav
            .active(page)
            .and_then(|i| page.text(nav.pairs()[i].source))
            .unwrap_or("none");
        println!("{capabilities:?} {what:>16}: {active}");
    };

    report(&page, "initial");
    page.scroll_to(pane, Vec2::new(0.0, 420.0));
    report(&page, "pane 420");
    page.scroll_to(doc, Vec2::new(0.0, 900.0));
    report(&page, "document 900");
    page.scroll_to(aside, Vec2::new(0.0, 50.0));
    report(&page, "aside 50");
    page.scroll_to(pane, Vec2::new(0.0, 1200.0));
    report(&page, "pane 1200");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run(Capabilities::all());
    run(Capabilities::LEGACY_EVENTS);
    run(Capabilities::empty());
}
