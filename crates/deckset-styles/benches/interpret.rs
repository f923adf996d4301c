//! Benchmarks for slide interpretation.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use deckset_styles::{MemoryStyleRegistry, Slide, SlideInterpreter};

/// A slide with a background image, a few annotations and a list.
fn generate_slide(index: usize, items: usize) -> String {
    let mut html = String::with_capacity(256 + items * 40);
    html.push_str(&format!("<p><img alt=\"fit\" src=\"bg-{index}.jpg\"></p>\n"));
    html.push_str("<p>[.header: Avenir Next, #ffcc00, text-scale(2)]</p>\n");
    html.push_str("<p>[.list: #666666, bullet-character(square)]</p>\n");
    html.push_str("<p>[.background-color: #1e1e1e]</p>\n");
    html.push_str("<p>[.build-lists: true]</p>\n");
    html.push_str(&format!("<h1>Slide {index}</h1>\n<ul>\n"));
    for i in 0..items {
        html.push_str(&format!("<li>Point {i}</li>\n"));
    }
    html.push_str("</ul>");
    html
}

fn generate_deck(slides: usize) -> Vec<Slide> {
    (0..slides)
        .map(|i| Slide::new(format!("slide-{i}"), generate_slide(i, 5)))
        .collect()
}

fn bench_interpret_plain(c: &mut Criterion) {
    let interpreter = SlideInterpreter::default();
    let registry = MemoryStyleRegistry::new();
    let content = "<h1>Hello</h1>\n<p>No annotations here.</p>";

    c.bench_function("interpret_plain_slide", |b| {
        b.iter(|| interpreter.interpret(content, "plain", &registry));
    });
}

fn bench_interpret_annotated(c: &mut Criterion) {
    let interpreter = SlideInterpreter::default();
    let content = generate_slide(0, 10);

    c.bench_function("interpret_annotated_slide", |b| {
        b.iter(|| {
            let registry = MemoryStyleRegistry::new();
            interpreter.interpret(&content, "annotated", &registry)
        });
    });
}

fn bench_interpret_deck(c: &mut Criterion) {
    let interpreter = SlideInterpreter::default();
    let mut group = c.benchmark_group("interpret_deck");

    for slides in [10, 50, 200] {
        let deck = generate_deck(slides);
        let size: usize = deck.iter().map(|slide| slide.content.len()).sum();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("slides", slides), &deck, |b, deck| {
            b.iter(|| {
                let registry = MemoryStyleRegistry::new();
                interpreter.interpret_deck(deck.clone(), &registry)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_interpret_plain,
    bench_interpret_annotated,
    bench_interpret_deck
);
criterion_main!(benches);
