//! Search throughput across batch sizes, plus the scalar-multiplication
//! baseline it replaces.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;

use vanity25519::{derive_public_key, has_prefix_bits, search};

fn bench_search(c: &mut Criterion) {
    let start_public_key = derive_public_key(&[0x11u8; 32]).unwrap();
    let accept = has_prefix_bits(b"GoodLuckWithThisPrefix", 176);

    let mut group = c.benchmark_group("search");
    for batch_size in [256usize, 1024, 4096, 16384] {
        group.throughput(Throughput::Elements(batch_size as u64 + 1));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter_custom(|iters| {
                    let cancel = AtomicBool::new(false);
                    let evaluated = Cell::new(0u64);
                    let target = iters * (batch_size as u64 + 1);

                    let start = Instant::now();
                    search(
                        &start_public_key,
                        &BigUint::from(0u32),
                        batch_size,
                        |candidate| {
                            let _ = accept(candidate);
                            let n = evaluated.get() + 1;
                            evaluated.set(n);
                            if n >= target {
                                cancel.store(true, Ordering::Relaxed);
                            }
                            false
                        },
                        |_, _| {},
                        &cancel,
                    );
                    start.elapsed()
                })
            },
        );
    }
    group.finish();
}

fn bench_derive_public_key(c: &mut Criterion) {
    c.bench_function("derive_public_key", |b| {
        b.iter(|| derive_public_key(&[0x11u8; 32]).unwrap())
    });
}

criterion_group!(benches, bench_search, bench_derive_public_key);
criterion_main!(benches);
