//! hat606 - render one 606-style hi-hat to a 24-bit WAV
//!
//! Run with: cargo run -- 0.5 0.3 1.0 0.0 -o hat.wav
//!
//! Without `-o` the WAV is written to stdout, so it can be piped:
//!
//!     hat606 0.5 0.3 1.0 0.0 | aplay

mod app;

use std::path::PathBuf;

use clap::Parser;
use hat606::{HatParams, RenderConfig, DURATION_SECS, SAMPLE_RATE};

/// Procedural 606-style hi-hat synthesizer.
#[derive(Parser, Debug)]
#[command(name = "hat606", version, about)]
struct Cli {
    /// Shifts all oscillator frequencies, 0..1 (0.8x to 1.2x)
    #[arg(value_parser = parse_knob, allow_negative_numbers = true)]
    tune: f32,

    /// Decay length, 0..1 (40 ms to 400 ms)
    #[arg(value_parser = parse_knob, allow_negative_numbers = true)]
    decay: f32,

    /// Output level, 0..1; above 1 clips
    #[arg(value_parser = parse_knob, allow_negative_numbers = true)]
    level: f32,

    /// Closed (0) to open (1); stretches the decay up to 2.5x
    #[arg(value_parser = parse_knob, allow_negative_numbers = true)]
    open: f32,

    /// Output WAV file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long, default_value_t = SAMPLE_RATE as u32)]
    sample_rate: u32,

    /// Buffer length in seconds
    #[arg(long, default_value_t = DURATION_SECS)]
    duration: f32,
}

fn parse_knob(value: &str) -> Result<f32, String> {
    let knob: f32 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if knob.is_finite() {
        Ok(knob)
    } else {
        Err(format!("`{value}` is not a finite number"))
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let params = HatParams::new(cli.tune, cli.decay, cli.level, cli.open);
    let config = RenderConfig::new(cli.sample_rate as f32, cli.duration);

    app::run(params, config, cli.output.as_deref())
}
