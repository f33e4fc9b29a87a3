//! Benchmarks for a complete hi-hat render, as the CLI runs it.

use std::hint::black_box;

use criterion::Criterion;
use hat606::io::wav::{self, WavSpec};
use hat606::{render_hat, HatParams, RenderConfig};

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let config = RenderConfig::default();

    // Closed and open hats cost the same: the buffer length is fixed.
    group.bench_function("closed", |b| {
        b.iter(|| render_hat(black_box(HatParams::new(0.5, 0.0, 1.0, 0.0)), &config))
    });
    group.bench_function("open", |b| {
        b.iter(|| render_hat(black_box(HatParams::new(0.5, 1.0, 1.0, 1.0)), &config))
    });

    let samples = render_hat(HatParams::default(), &config).unwrap();
    let mut bytes = Vec::with_capacity(wav::HEADER_LEN + samples.len() * 3);
    group.bench_function("encode_wav24", |b| {
        b.iter(|| {
            bytes.clear();
            wav::write_wav24(&mut bytes, WavSpec::new(48_000), black_box(&samples)).unwrap();
        })
    });

    group.finish();
}
