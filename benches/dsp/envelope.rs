//! Benchmarks for the decay envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use hat606::dsp::DecayEnvelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Decaying phase (one division per sample)
        let mut env = DecayEnvelope::new(usize::MAX / 2);
        group.bench_with_input(BenchmarkId::new("decaying", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Silent phase (gate closed)
        let mut env = DecayEnvelope::new(0);
        env.next_sample();
        group.bench_with_input(BenchmarkId::new("silent", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
