use std::f32::consts::TAU;

/*
Square Oscillator Bank
======================

A metallic hi-hat is not a single pitch. Analog drum machines get their
"tss" from a cluster of square oscillators at closely spaced, non-harmonic
frequencies. Summed together the partials beat against each other and the
ear hears an inharmonic, cymbal-like wash instead of a chord.

Vocabulary
----------

  phase       Where an oscillator is within its cycle, in radians [0, 2π).

  increment   How far the phase moves per sample:
                  increment = 2π * frequency / sample_rate

  square      The bipolar square value for a phase: +1 when sin(phase) >= 0,
              otherwise -1. The first half of the cycle is high, the second
              half low.

  mixdown     The arithmetic mean of all square values. Six unit squares
              averaged can never leave [-1, 1].


Phase Wrapping
--------------

Each sample the phase advances by one increment and, once it passes 2π,
drops back by exactly 2π:

    phase += increment
    if phase >= 2π { phase -= 2π }

A single subtraction is enough as long as increment < 2π, i.e. every
frequency stays below the sample rate. Audio-rate hats at 48kHz are
nowhere near that.


Possible Mixdown Values
-----------------------

With six oscillators the sum is always even, so the mean only takes the
values {-1, -2/3, -1/3, 0, 1/3, 2/3, 1}. The signal is "stepped" and full
of aliasing, which is a large part of the gritty character.
*/

/// Number of oscillators in the bank.
pub const OSCILLATOR_COUNT: usize = 6;

pub struct OscillatorBank {
    frequencies: [f32; OSCILLATOR_COUNT],
    increments: [f32; OSCILLATOR_COUNT],
    phases: [f32; OSCILLATOR_COUNT],
}

/// Bipolar square value for a phase in radians.
#[inline]
pub fn square(phase: f32) -> f32 {
    if phase.sin() >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

impl OscillatorBank {
    /// Create a bank with all phases at zero.
    pub fn new(frequencies: [f32; OSCILLATOR_COUNT], sample_rate: f32) -> Self {
        let increments = frequencies.map(|freq| TAU * freq / sample_rate);
        debug_assert!(
            increments.iter().all(|inc| *inc < TAU),
            "oscillator frequency must stay below the sample rate"
        );

        Self {
            frequencies,
            increments,
            phases: [0.0; OSCILLATOR_COUNT],
        }
    }

    /// Advance every oscillator by one sample and return the averaged square.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut sum = 0.0;
        for (phase, increment) in self.phases.iter_mut().zip(&self.increments) {
            *phase += increment;
            // Wrap at exactly 2π too, keeping phases in [0, 2π).
            if *phase >= TAU {
                *phase -= TAU;
            }
            sum += square(*phase);
        }
        sum / OSCILLATOR_COUNT as f32
    }

    /// Fill a buffer with consecutive mixdown samples.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Return every phase to zero.
    pub fn reset(&mut self) {
        self.phases = [0.0; OSCILLATOR_COUNT];
    }

    pub fn frequencies(&self) -> &[f32; OSCILLATOR_COUNT] {
        &self.frequencies
    }

    pub fn phases(&self) -> &[f32; OSCILLATOR_COUNT] {
        &self.phases
    }
}
