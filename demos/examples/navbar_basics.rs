// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navbar basics.
//!
//! Builds a long page of headings, attaches a navigation overlay with a debounce window,
//! then scrolls through the document and prints which entry is active after each step.
//!
//! Run:
//! - `cargo run -p signpost_demos --example navbar_basics`
//! - `RUST_LOG=signpost_nav=trace cargo run -p signpost_demos --example navbar_basics`

use std::time::Duration;

use kurbo::{Rect, Vec2};
use signpost_nav::{NavHandle, Navigator, NavigatorConfig};
use signpost_page::{NodeId, Page};
use tracing_subscriber::EnvFilter;

const TITLES: [&str; 6] = [
    "Introduction",
    "Installation",
    "Configuration",
    "Scrolling",
    "Debouncing",
    "Appendix",
];

fn entry_for(page: &mut Page, section: NodeId) -> NodeId {
    let li = page.create_element("li");
    let label = page.text(section).unwrap_or_default().to_owned();
    page.set_text(li, &label);
    page.set_class_name(li, "nav-item");
    li
}

fn print_state(page: &Page, nav: &NavHandle, label: &str) {
    let active = nav.active(page).map(|i| nav.pairs()[i].entry);
    let line: Vec<String> = page
        .children(nav.list())
        .iter()
        .map(|&li| {
            let text = page.text(li).unwrap_or_default();
            if Some(li) == active {
                format!("[{text}]")
            } else {
                text.to_owned()
            }
        })
        .collect();
    println!("{label:>14}: {}", line.join("  "));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut page = Page::new();
    let doc = page.document();
    page.set_bounds(doc, Rect::new(0.0, 0.0, 1024.0, 768.0));
    for (i, title) in TITLES.iter().enumerate() {
        let y = i as f64 * 700.0;
        let h = page.append_element(doc, "h2", Rect::new(0.0, y, 1024.0, y + 48.0));
        page.set_text(h, title);
    }

    let navigator = Navigator::new(&mut page);
    println!("passive listeners: {}", navigator.passive_support().get());

    let config = NavigatorConfig::new()
        .sections_by_tag(None, "h2")
        .item_factory(entry_for)
        .debounce_window_ms(50.0);
    let nav = match navigator.create(&mut page, config) {
        Ok(nav) => nav,
        Err(err) => {
            eprintln!("could not build the overlay: {err}");
            return;
        }
    };
    page.append_child(doc, nav.container());
    tracing::info!(entries = nav.pairs().len(), "overlay attached");
    print_state(&page, &nav, "initial");

    for offset in [680.0, 1500.0, 2050.0, 3400.0] {
        // Let the previous debounce window close before the next scroll.
        page.advance(Duration::from_millis(60));
        page.scroll_to(doc, Vec2::new(0.0, offset));
        print_state(&page, &nav, &format!("scroll {offset}"));
    }

    // Two scrolls inside one window: the second is dropped.
    page.advance(Duration::from_millis(60));
    page.scroll_to(doc, Vec2::new(0.0, 0.0));
    page.scroll_to(doc, Vec2::new(0.0, 2800.0));
    print_state(&page, &nav, "burst");

    nav.dispose(&mut page);
}
