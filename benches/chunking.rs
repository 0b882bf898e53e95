//! Chunk-building benchmarks
//!
//! Measures snapshot parsing and chunk aggregation over a synthetic layout
//! shaped like a dense report page (8 blocks x 10 lines x 6 spans).
//!
//! Run with: `cargo bench --bench chunking`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use subraya::{
    build_chunks, pages_from_json, Block, BoundingBox, ChunkOptions, Granularity, Line,
    NullLexicon, Page, Span, TextExtractionSettings,
};

const WORDS: [&str; 6] = ["annual", "report", "of", "the", "filtered", "quarter"];

fn synthetic_pages(page_count: u32) -> Vec<Page> {
    (1..=page_count)
        .map(|page_number| {
            let blocks = (0..8u32)
                .map(|block_index| {
                    let top = 740.0 - block_index as f64 * 80.0;
                    let lines = (0..10)
                        .map(|line_index| {
                            let y0 = top - line_index as f64 * 7.0;
                            let spans = (0..6)
                                .map(|span_index| {
                                    let x0 = 72.0 + span_index as f64 * 78.0;
                                    Span::new(
                                        BoundingBox::from_corners(x0, y0, x0 + 70.0, y0 + 6.0),
                                        WORDS[span_index % WORDS.len()],
                                    )
                                })
                                .collect();
                            Line {
                                bounding_box: BoundingBox::from_corners(72.0, y0, 540.0, y0 + 6.0),
                                spans,
                            }
                        })
                        .collect();
                    Block {
                        bounding_box: BoundingBox::from_corners(72.0, top - 70.0, 540.0, top + 6.0),
                        index: block_index,
                        lines,
                    }
                })
                .collect();
            Page {
                height: 792.0,
                width: 612.0,
                page_number,
                blocks,
            }
        })
        .collect()
}

/// Engine-format snapshot JSON for the same synthetic layout
fn synthetic_snapshot(page_count: u32) -> String {
    fn corner_list(bounds: &BoundingBox) -> [f64; 4] {
        [
            bounds.bottom_left.x,
            bounds.bottom_left.y,
            bounds.top_right.x,
            bounds.top_right.y,
        ]
    }

    let pages: Vec<Value> = synthetic_pages(page_count)
        .iter()
        .map(|page| {
            json!({
                "height": page.height,
                "width": page.width,
                "blocks": page.blocks.iter().map(|block| json!({
                    "bbox": corner_list(&block.bounding_box),
                    "number": block.index,
                    "lines": block.lines.iter().map(|line| json!({
                        "bbox": corner_list(&line.bounding_box),
                        "spans": line.spans.iter().map(|span| json!({
                            "bbox": corner_list(&span.bounding_box),
                            "text": span.text,
                        })).collect::<Vec<_>>(),
                    })).collect::<Vec<_>>(),
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    Value::Array(pages).to_string()
}

fn bench_granularities(c: &mut Criterion) {
    let pages = synthetic_pages(20);

    let mut group = c.benchmark_group("build_chunks");
    for granularity in [Granularity::Span, Granularity::Line, Granularity::Block] {
        let options = ChunkOptions {
            granularity,
            ..Default::default()
        };
        group.bench_function(granularity.as_str(), |b| {
            b.iter(|| build_chunks(black_box(&pages), &options, &NullLexicon))
        });
    }
    group.finish();
}

fn bench_cleaning(c: &mut Criterion) {
    let pages = synthetic_pages(20);
    let lexicon = |word: &str| if word.len() > 3 { 5.0 } else { 1.0 };

    let options = ChunkOptions {
        granularity: Granularity::Line,
        settings: Some(TextExtractionSettings {
            filter_by_dictionary_frequency: true,
            min_dictionary_frequency: 3.0,
            min_word_length: 2,
            require_alphabetic: true,
        }),
        ..Default::default()
    };

    c.bench_function("build_chunks/line_with_cleaning", |b| {
        b.iter(|| build_chunks(black_box(&pages), &options, &lexicon))
    });
}

fn bench_snapshot_parsing(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(20);

    let mut group = c.benchmark_group("snapshot_parsing");
    group.throughput(Throughput::Bytes(snapshot.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("pages_from_json", snapshot.len()),
        &snapshot,
        |b, data| b.iter(|| pages_from_json(black_box(data)).unwrap()),
    );
    group.finish();
}

criterion_group!(
    benches,
    bench_granularities,
    bench_cleaning,
    bench_snapshot_parsing
);
criterion_main!(benches);
