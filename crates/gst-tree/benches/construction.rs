use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gst_tree::Tree;
use rand::{thread_rng, Rng};

const TERMS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn random_words(count: usize, total: usize) -> Vec<String> {
    let mut rng = thread_rng();
    (0..count)
        .map(|_| {
            (0..total / count)
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect()
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for total in [1_000, 10_000, 100_000] {
        let words = random_words(10, total);
        group.bench_function(format!("random/{total}"), |b| {
            b.iter(|| Tree::build(black_box(&words), TERMS).unwrap())
        });
    }

    // Worst case for tree depth: one long run of a single symbol.
    let run = ["a".repeat(5_000)];
    group.bench_function("repetitive/5000", |b| {
        b.iter(|| Tree::build(black_box(&run), TERMS).unwrap())
    });

    group.finish();
}

fn bench_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrays");

    let words = random_words(10, 10_000);
    let tree = Tree::build(&words, TERMS).unwrap();
    group.bench_function("string_suffixes/10000", |b| {
        b.iter(|| black_box(tree.string_suffixes()))
    });
    group.bench_function("verify/10000", |b| b.iter(|| tree.verify().unwrap()));

    group.finish();
}

criterion_group!(benches, bench_construction, bench_arrays);
criterion_main!(benches);
