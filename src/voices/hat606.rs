//! 606-style hi-hat voice.
//!
//! Six detuned square oscillators through a linear decay envelope. This is
//! the same trick the classic analog drum machines use: no noise source at
//! all, just enough inharmonic squares that the result reads as metal.
//!
//! # How It Works
//!
//! 1. Four 0..1 knobs are turned into physical quantities (`HatShape`)
//! 2. The oscillator bank runs at the base frequencies times the tune scale
//! 3. The averaged squares are multiplied by the envelope and the level
//!
//! # Knobs
//!
//! - `tune`  shifts every oscillator together, 0.8x to 1.2x
//! - `decay` sets the ramp length, 40 ms to 400 ms
//! - `level` output gain; values above 1 clip when written to disk
//! - `open`  stretches the decay by up to 2.5x (closed to open hat)

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{DecayEnvelope, OscillatorBank, OSCILLATOR_COUNT},
    Error, RenderConfig, Result,
};

/// Oscillator frequencies in Hz before tuning.
pub const BASE_FREQS: [f32; OSCILLATOR_COUNT] = [452.0, 539.0, 645.0, 750.0, 851.0, 946.0];

/// Decay time with `decay = 0`.
pub const MIN_DECAY_SECS: f32 = 0.04;
/// Decay time with `decay = 1`, before the open stretch.
pub const MAX_DECAY_SECS: f32 = 0.4;
/// Extra decay multiple added at `open = 1`.
pub const OPEN_DECAY_SCALE: f32 = 1.5;
/// Frequency multiplier at `tune = 0`.
pub const TUNE_MIN_SCALE: f32 = 0.8;
/// Span of the frequency multiplier across the tune knob.
pub const TUNE_SCALE_RANGE: f32 = 0.4;
/// Highest oscillator frequency a clamped tune knob can reach.
pub const MAX_TUNED_FREQ: f32 =
    BASE_FREQS[OSCILLATOR_COUNT - 1] * (TUNE_MIN_SCALE + TUNE_SCALE_RANGE);

/// The four hi-hat knobs, each nominally in 0..1.
///
/// Values are stored as given. Use [`HatParams::clamped`] to pull them back
/// into range before rendering.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatParams {
    pub tune: f32,
    pub decay: f32,
    pub level: f32,
    pub open: f32,
}

impl Default for HatParams {
    fn default() -> Self {
        Self {
            tune: 0.5,
            decay: 0.5,
            level: 1.0,
            open: 0.0,
        }
    }
}

fn unit_knob(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl HatParams {
    pub fn new(tune: f32, decay: f32, level: f32, open: f32) -> Self {
        Self {
            tune,
            decay,
            level,
            open,
        }
    }

    /// Clamp `tune`, `decay` and `open` into 0..1 and floor `level` at 0.
    ///
    /// `level` keeps anything above 1 so hot settings still clip at
    /// serialization. Non-finite knobs become 0.
    pub fn clamped(self) -> Self {
        Self {
            tune: unit_knob(self.tune),
            decay: unit_knob(self.decay),
            level: if self.level.is_finite() {
                self.level.max(0.0)
            } else {
                0.0
            },
            open: unit_knob(self.open),
        }
    }
}

/// Physical quantities derived from the knobs for one sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatShape {
    /// Decay time in seconds from the `decay` knob alone.
    pub decay_time: f32,
    /// Decay time after the `open` stretch.
    pub final_decay_time: f32,
    /// Length of the envelope ramp in samples.
    pub decay_samples: usize,
    /// Amplitude drop per sample along the ramp.
    pub decrement: f32,
    /// Multiplier applied to every base frequency.
    pub freq_scale: f32,
}

impl HatShape {
    pub fn derive(params: &HatParams, sample_rate: f32) -> Self {
        let decay_time = MIN_DECAY_SECS + (MAX_DECAY_SECS - MIN_DECAY_SECS) * params.decay;
        let final_decay_time = decay_time * (1.0 + OPEN_DECAY_SCALE * params.open);

        // Saturating cast: negative and NaN decay lengths floor at 0.
        let decay_samples = (final_decay_time * sample_rate) as usize;
        let decrement = if decay_samples > 0 {
            1.0 / decay_samples as f32
        } else {
            1.0
        };

        let freq_scale = TUNE_MIN_SCALE + TUNE_SCALE_RANGE * params.tune;

        Self {
            decay_time,
            final_decay_time,
            decay_samples,
            decrement,
            freq_scale,
        }
    }

    /// Tuned oscillator frequencies in Hz.
    pub fn frequencies(&self) -> [f32; OSCILLATOR_COUNT] {
        BASE_FREQS.map(|freq| freq * self.freq_scale)
    }
}

/// One struck hi-hat: oscillator bank, envelope and output level.
pub struct Hat606 {
    shape: HatShape,
    bank: OscillatorBank,
    envelope: DecayEnvelope,
    level: f32,
}

impl Hat606 {
    /// Build a freshly struck hat.
    ///
    /// Parameters are used as given; out-of-range values flow straight into
    /// the derivation.
    pub fn new(params: HatParams, sample_rate: f32) -> Self {
        let shape = HatShape::derive(&params, sample_rate);
        debug!(
            "hat606 shape: decay {:.4}s (open {:.4}s), {} ramp samples, freq scale {:.3}",
            shape.decay_time, shape.final_decay_time, shape.decay_samples, shape.freq_scale
        );

        Self {
            shape,
            bank: OscillatorBank::new(shape.frequencies(), sample_rate),
            envelope: DecayEnvelope::new(shape.decay_samples),
            level: params.level,
        }
    }

    /// Produce the next output sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mix = self.bank.next_sample();
        let amp = self.envelope.next_sample();
        mix * amp * self.level
    }

    /// Write consecutive samples into every slot of the buffer, in order.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn shape(&self) -> &HatShape {
        &self.shape
    }

    pub fn envelope(&self) -> &DecayEnvelope {
        &self.envelope
    }

    /// Check if the hat is still ringing.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }
}

/// Fill a caller-owned buffer with one hi-hat strike.
pub fn render_into(params: HatParams, sample_rate: f32, buffer: &mut [f32]) {
    Hat606::new(params, sample_rate).render(buffer);
}

/// Render one hi-hat into a new buffer sized by `config`.
///
/// Parameters are clamped first. Allocation failure is reported as
/// [`Error::Allocation`] instead of aborting.
pub fn render_hat(params: HatParams, config: &RenderConfig) -> Result<Vec<f32>> {
    config.validate()?;

    let samples = config.sample_count();
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(samples)
        .map_err(|source| Error::Allocation { samples, source })?;
    buffer.resize(samples, 0.0);
    trace!("allocated {samples} sample buffer");

    render_into(params.clamped(), config.sample_rate, &mut buffer);
    Ok(buffer)
}
