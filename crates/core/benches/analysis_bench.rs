use boardlens_core::{BoundingBox, ClusterGrouper, DensityRefiner, MatchBox, Side, Word};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn word_grid(cols: i32, rows: i32) -> Vec<Word> {
    let mut words = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = 100 + col * 25;
            let y = 100 + row * 25;
            words.push(Word {
                bbox: BoundingBox { x0: x, y0: y, x1: x + 18, y1: y + 12 },
                text: "R10".into(),
            });
        }
    }
    words
}

fn match_scatter(count: u32) -> Vec<MatchBox> {
    (0..count)
        .map(|i| {
            // Deterministic scatter over a 2000x1500 page.
            let x = ((i * 379) % 1980) as i32;
            let y = ((i * 547) % 1480) as i32;
            MatchBox {
                bbox: BoundingBox { x0: x, y0: y, x1: x + 20, y1: y + 12 },
                text: format!("C{i}"),
                block_no: i,
                side: if i % 2 == 0 { Side::Front } else { Side::Back },
                matched_keywords: vec![format!("C{i}")],
            }
        })
        .collect()
}

fn bench_density_refine(c: &mut Criterion) {
    let refiner = DensityRefiner::default();
    let words = word_grid(40, 30);
    let coarse = BoundingBox { x0: 0, y0: 0, x1: 2000, y1: 1500 };
    c.bench_function("density_refine_1200_words", |b| {
        b.iter(|| refiner.refine(black_box(coarse), black_box(&words), 2000, 1500))
    });
}

fn bench_cluster_group(c: &mut Criterion) {
    let grouper = ClusterGrouper::default();
    let matches = match_scatter(200);
    c.bench_function("cluster_group_200_matches", |b| {
        b.iter(|| grouper.group(black_box(&matches)))
    });
}

criterion_group!(benches, bench_density_refine, bench_cluster_group);
criterion_main!(benches);
