use chunked_deque::ChunkedDeque;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::VecDeque;

fn bench_deque(c: &mut Criterion) {
    let n = 4096;
    {
        let mut group = c.benchmark_group("VecDeque vs ChunkedDeque (PushBack 4096)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                }
                d
            })
        });

        group.bench_function("ChunkedDeque<i32>", |b| {
            b.iter(|| {
                let mut d: ChunkedDeque<i32> = ChunkedDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs ChunkedDeque (Get 4096)");
        let mut d_std = VecDeque::new();
        let mut d_chunked: ChunkedDeque<i32> = ChunkedDeque::new();
        for i in 0..n {
            d_std.push_back(i as i32);
            d_chunked.push_back(i as i32);
        }

        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                for i in 0..n {
                    black_box(d_std.get(black_box(i)));
                }
            })
        });

        group.bench_function("ChunkedDeque<i32>", |b| {
            b.iter(|| {
                for i in 0..n {
                    black_box(d_chunked.get(black_box(i)));
                }
            })
        });
        group.finish();
    }
}

fn bench_mixed_ends(c: &mut Criterion) {
    let n = 2048;
    let mut group = c.benchmark_group("Mixed Ends (PushFront+PushBack 2048)");

    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..n {
                d.push_back(black_box(i as i32));
                d.push_front(black_box(-(i as i32)));
            }
            d
        })
    });

    group.bench_function("ChunkedDeque<i32>", |b| {
        b.iter(|| {
            let mut d: ChunkedDeque<i32> = ChunkedDeque::new();
            for i in 0..n {
                d.push_back(black_box(i as i32));
                d.push_front(black_box(-(i as i32)));
            }
            d
        })
    });
    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let n = 8192;
    let mut group = c.benchmark_group("Drain With Shrink (PopFront 8192)");

    group.bench_function("std::collections::VecDeque", |b| {
        b.iter(|| {
            let mut d: VecDeque<i32> = (0..n).collect();
            while let Some(v) = d.pop_front() {
                black_box(v);
            }
        })
    });

    group.bench_function("ChunkedDeque<i32>", |b| {
        b.iter(|| {
            let mut d: ChunkedDeque<i32> = (0..n).collect();
            while let Some(v) = d.pop_front() {
                black_box(v);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_deque, bench_mixed_ends, bench_drain);
criterion_main!(benches);
