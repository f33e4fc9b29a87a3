//! Low-level DSP primitives used by the hi-hat voice.
//!
//! These components are allocation-free and own all of their state, so a
//! voice can embed them directly. They stay focused on the per-sample math;
//! the voice layer decides frequencies, decay length and output level.

/// Linear decay envelope with a hard gate.
pub mod envelope;
/// Bank of detuned square oscillators.
pub mod oscillator;

pub use envelope::{DecayEnvelope, EnvelopeState};
pub use oscillator::{OscillatorBank, OSCILLATOR_COUNT};
