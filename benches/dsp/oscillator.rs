//! Benchmarks for the square oscillator bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use hat606::dsp::OscillatorBank;
use hat606::voices::hat606::BASE_FREQS;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Six sin() calls per sample dominate
        let mut bank = OscillatorBank::new(BASE_FREQS, 48_000.0);
        group.bench_with_input(BenchmarkId::new("bank", size), &size, |b, _| {
            b.iter(|| {
                bank.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
