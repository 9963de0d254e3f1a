// benches/render_bench.rs
//! Benchmarks for normalization and Markdown rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notion2md::formatting::{normalize, render_body, BlockNode, RenderContext};
use notion2md::model::Block;
use serde_json::{json, Value};

fn rich_text(text: String) -> Value {
    json!({
        "rich_text": [
            { "type": "text", "plain_text": text, "annotations": { "bold": true } },
            { "type": "text", "plain_text": " trailing", "href": "https://example.com/a%20b" }
        ]
    })
}

/// A page-like sibling sequence: headings, paragraphs and nested lists.
fn create_sample_nodes(breadth: usize, depth: usize) -> Vec<BlockNode> {
    fn list_item(level: usize, index: usize, max_depth: usize, breadth: usize) -> BlockNode {
        let block_type = if level % 2 == 0 {
            "bulleted_list_item"
        } else {
            "numbered_list_item"
        };
        let block = Block::new(
            format!("item-{}-{}", level, index),
            block_type,
            level < max_depth,
            rich_text(format!("Item {} at level {}", index, level)),
        );
        if level >= max_depth {
            return BlockNode::leaf(block);
        }
        let children = (0..breadth)
            .map(|i| list_item(level + 1, i, max_depth, breadth))
            .collect();
        BlockNode::with_children(block, normalize(children))
    }

    let nodes = (0..breadth)
        .flat_map(|i| {
            [
                BlockNode::leaf(Block::new(
                    format!("h-{}", i),
                    "heading_2",
                    false,
                    rich_text(format!("Section {}", i)),
                )),
                BlockNode::leaf(Block::new(
                    format!("p-{}", i),
                    "paragraph",
                    false,
                    rich_text(format!("Paragraph {} with some content to make it realistic", i)),
                )),
                list_item(0, i, depth, breadth),
                list_item(0, i + breadth, depth, breadth),
            ]
        })
        .collect();
    normalize(nodes)
}

fn bench_render_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_body");
    let ctx = RenderContext::default();

    for (breadth, depth) in [(5, 2), (10, 3)] {
        let nodes = create_sample_nodes(breadth, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", breadth, depth)),
            &nodes,
            |b, nodes| b.iter(|| render_body(black_box(nodes), &ctx)),
        );
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_flat_siblings", |b| {
        b.iter_batched(
            || {
                (0..500)
                    .map(|i| {
                        let block_type = ["bulleted_list_item", "to_do", "paragraph"][i % 3];
                        BlockNode::leaf(Block::new(
                            i.to_string(),
                            block_type,
                            false,
                            rich_text(i.to_string()),
                        ))
                    })
                    .collect::<Vec<_>>()
            },
            |nodes| normalize(black_box(nodes)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_render_body, bench_normalize);
criterion_main!(benches);
