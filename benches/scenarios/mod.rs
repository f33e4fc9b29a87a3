//! Real-world scenario benchmarks.

mod render;

pub use render::bench_render;
