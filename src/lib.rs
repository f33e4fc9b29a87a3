//! Procedural 606-style hi-hat synthesis.
//!
//! A swarm of six detuned square oscillators is averaged and shaped by a
//! linear decay envelope, then serialized as a 24-bit mono WAV.
//!
//! ```
//! use hat606::{io::wav, render_hat, HatParams, RenderConfig};
//!
//! let config = RenderConfig::default();
//! let samples = render_hat(HatParams::new(0.5, 0.3, 1.0, 0.0), &config).unwrap();
//!
//! let mut bytes = Vec::new();
//! wav::write_wav24(&mut bytes, wav::WavSpec::new(48_000), &samples).unwrap();
//! assert_eq!(bytes.len(), wav::HEADER_LEN + samples.len() * 3);
//! ```

pub mod dsp;
pub mod error;
pub mod io;
pub mod voices; // The hi-hat voice and its parameter derivation

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use voices::hat606::{render_hat, render_into, Hat606, HatParams, HatShape, MAX_TUNED_FREQ};

/// Default output sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48_000.0;
/// Length of every rendered buffer in seconds. Long enough for a fully open hat.
pub const DURATION_SECS: f32 = 2.0;

/// Buffer geometry for one render.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub sample_rate: f32,
    pub duration: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            duration: DURATION_SECS,
        }
    }
}

impl RenderConfig {
    pub fn new(sample_rate: f32, duration: f32) -> Self {
        Self {
            sample_rate,
            duration,
        }
    }

    /// Number of samples in the output buffer, `floor(sample_rate * duration)`.
    ///
    /// Independent of the hat parameters.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate * self.duration) as usize
    }

    /// Check the geometry before any buffer is allocated.
    ///
    /// The sample rate must sit above the highest tuned oscillator, so every
    /// phase wraps in a single step, and low enough that the WAV byte rate
    /// fits its 32-bit field.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "sample rate must be a positive number of Hz, got {}",
                self.sample_rate
            )));
        }
        if self.sample_rate <= MAX_TUNED_FREQ {
            return Err(Error::InvalidConfig(format!(
                "sample rate must exceed the highest oscillator frequency ({MAX_TUNED_FREQ} Hz), got {}",
                self.sample_rate
            )));
        }
        if self.sample_rate > io::wav::MAX_SAMPLE_RATE as f32 {
            return Err(Error::InvalidConfig(format!(
                "sample rate must be at most {} Hz, got {}",
                io::wav::MAX_SAMPLE_RATE,
                self.sample_rate
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}
