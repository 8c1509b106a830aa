use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pxrdrs::{merge, splice, DataSet};

/// A scan of `n` samples at 0.00375 degree spacing with two detector gaps.
fn scan(name: &str, n: usize, offset: f64) -> DataSet {
    let angle: Vec<f64> = (0..n)
        .map(|i| {
            let gaps = (i * 3 / n) as f64;
            offset + i as f64 * 0.00375 + gaps * 0.5
        })
        .collect();
    let intensity: Vec<f64> = angle.iter().map(|x| 100.0 + (x * 7.0).sin() * 20.0).collect();
    let stdev = intensity.iter().map(|y| y.sqrt()).collect();
    DataSet::new(name, angle, intensity, stdev).unwrap()
}

fn bench_combine(c: &mut Criterion) {
    let p1 = scan("bench_p1_0000", 30_000, 5.0);
    let p2 = scan("bench_p2_0000", 30_000, 5.3);

    c.bench_function("merge_30k", |b| b.iter(|| merge(black_box(&p1), black_box(&p2))));
    c.bench_function("splice_30k", |b| {
        b.iter(|| splice(black_box(&p1), black_box(&p2)).unwrap())
    });
}

criterion_group!(benches, bench_combine);
criterion_main!(benches);
