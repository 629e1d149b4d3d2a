// Copyright 2025 the Signpost Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use signpost_nav::{NavHandle, NavigatorConfig, Pair, ProximityScanner, SectionHost};
use signpost_page::Page;

/// Offsets only, no page.
struct Flat {
    tops: Vec<f64>,
    marked: Vec<bool>,
}

impl SectionHost for Flat {
    type Node = usize;

    fn top_offset(&self, node: usize) -> f64 {
        self.tops[node]
    }

    fn set_marker(&mut self, node: usize, _marker: &str, present: bool) {
        self.marked[node] = present;
    }
}

fn flat_host(n: usize) -> (Flat, Vec<Pair<usize>>) {
    let tops = (0..n).map(|i| i as f64 * 120.0 - 3000.0).collect();
    let pairs = (0..n)
        .map(|i| Pair {
            source: i,
            entry: i,
        })
        .collect();
    (
        Flat {
            tops,
            marked: vec![false; n],
        },
        pairs,
    )
}

fn page_with_overlay(n: usize, depth: usize) -> (Page, NavHandle) {
    let mut page = Page::new();
    let mut parent = page.document();
    for _ in 0..depth {
        parent = page.append_element(parent, "div", Rect::new(0.0, 10.0, 1000.0, 1e6));
    }
    for i in 0..n {
        let y = i as f64 * 120.0;
        page.append_element(parent, "h2", Rect::new(0.0, y, 1000.0, y + 40.0));
    }
    let nav = signpost_nav::create(
        &mut page,
        NavigatorConfig::new()
            .sections_by_tag(None, "h2")
            .item_factory(|page: &mut Page, _| page.create_element("li")),
    )
    .expect("valid overlay");
    (page, nav)
}

fn bench_scan_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_flat");
    for &n in &[16usize, 256, 4096] {
        let (mut host, pairs) = flat_host(n);
        let scanner = ProximityScanner::new("navbar-active");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{n}"), |b| {
            b.iter(|| black_box(scanner.scan(&mut host, &pairs)));
        });
    }
    group.finish();
}

fn bench_scan_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_page");
    for &(n, depth) in &[(64usize, 0usize), (64, 8), (512, 2)] {
        let (mut page, nav) = page_with_overlay(n, depth);
        let scanner = ProximityScanner::new(nav.active_class());
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{n}_depth{depth}"), |b| {
            b.iter(|| black_box(scanner.scan(&mut page, nav.pairs())));
        });
    }
    group.finish();
}

fn bench_scroll_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_dispatch");
    let (mut page, _nav) = page_with_overlay(256, 2);
    let doc = page.document();
    let mut offset = 0.0;
    group.bench_function("document_scroll_n256", |b| {
        b.iter(|| {
            offset = (offset + 37.0) % 30_000.0;
            black_box(page.scroll_to(doc, Vec2::new(0.0, offset)))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_scan_flat, bench_scan_page, bench_scroll_dispatch);
criterion_main!(benches);
