//! Render pipeline: open the destination, synthesize, serialize.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::{info, warn};

use hat606::{
    io::wav::{self, WavSpec},
    render_hat, HatParams, RenderConfig,
};

/// Warn about every knob that clamping changed and return the clamped set.
fn clamp_with_warnings(params: HatParams) -> HatParams {
    let clamped = params.clamped();
    for (name, given, used) in [
        ("tune", params.tune, clamped.tune),
        ("decay", params.decay, clamped.decay),
        ("level", params.level, clamped.level),
        ("open", params.open, clamped.open),
    ] {
        if given != used {
            warn!("{name} {given} is out of range, using {used}");
        }
    }
    clamped
}

/// Open the output before any synthesis work so a bad path fails fast.
fn open_destination(output: Option<&Path>) -> EyreResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to open output file '{}'", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Remove a half-written output file when anything after opening it failed.
fn discard_on_error(output: Option<&Path>, result: EyreResult<()>) -> EyreResult<()> {
    if result.is_err() {
        if let Some(path) = output {
            if let Err(err) = fs::remove_file(path) {
                warn!("failed to remove partial output '{}': {err}", path.display());
            }
        }
    }
    result
}

fn render_and_write<W: Write>(
    params: HatParams,
    config: &RenderConfig,
    spec: WavSpec,
    destination: W,
) -> EyreResult<()> {
    let samples = render_hat(params, config).wrap_err("failed to render hi-hat")?;
    info!(
        "rendered {} samples at {} Hz ({:?})",
        samples.len(),
        config.sample_rate,
        params
    );

    let mut writer = BufWriter::new(destination);
    wav::write_wav24(&mut writer, spec, &samples).wrap_err("failed to write WAV data")?;
    writer.flush().wrap_err("failed to flush WAV output")?;
    Ok(())
}

pub fn run(params: HatParams, config: RenderConfig, output: Option<&Path>) -> EyreResult<()> {
    config.validate()?;
    if config.sample_count() == 0 {
        return Err(eyre!("duration {}s is shorter than one sample", config.duration));
    }
    let spec = WavSpec::new(config.sample_rate as u32);
    spec.byte_rate()?;
    let params = clamp_with_warnings(params);

    let destination = open_destination(output)?;
    discard_on_error(output, render_and_write(params, &config, spec, destination))?;

    if let Some(path) = output {
        info!("wrote {}", path.display());
    }
    Ok(())
}
