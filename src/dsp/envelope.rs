/*
Decay Envelope
==============

A hi-hat has no sustain. It starts at full level the instant it is struck
and dies away. This envelope models that with the simplest possible shape:
a straight line from 1.0 down to 0.0, followed by silence.

Vocabulary
----------

  level          The envelope's current output value (0.0 to 1.0). This
                 multiplies the audio signal to control its amplitude.

  decay_samples  How many samples the ramp lasts. Derived from the decay
                 time in seconds: floor(decay_time * sample_rate).

  decrement      How much the level drops per sample: 1 / decay_samples,
                 or 1 when decay_samples is 0.

  elapsed        Samples consumed since the strike.


The Shape
---------

  Level
    1.0 ┐╲
        │ ╲
        │  ╲
        │   ╲
    0.0 └────╲______________________→ Time
         Decaying     Silent
        |<- decay ->|

There is no attack stage: the first output sample is always 1.0.


The State Machine
-----------------

    ┌──────────┐  elapsed == decay_samples  ┌────────┐
    │ Decaying │ ─────────────────────────→ │ Silent │
    └──────────┘                            └────────┘

Silent is terminal. Once entered the level is pinned at exactly 0.0 - it
is a hard gate, not an asymptote - and nothing moves back to Decaying
short of `reset()`.


Implementation Notes
--------------------

The level for the next sample is interpolated from the elapsed count:

    level = 1 - elapsed / decay_samples

rather than by subtracting the decrement over and over. Repeated f32
subtraction drifts, and a drifted ramp can leave a tiny positive level at
the moment the gate closes. Interpolation lands on 0.0 exactly.

Because the level is a closed-form function of the sample index,
`level_at(n)` gives the same answer as stepping the state machine n times.
*/

/// The current stage of the decay envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Decaying, // Ramping down from 1.0
    Silent,   // Level pinned at 0.0 for the rest of the buffer
}

pub struct DecayEnvelope {
    decay_samples: usize,

    // Runtime state
    stage: EnvelopeState,
    level: f32,
    elapsed: usize,
}

impl DecayEnvelope {
    /// Create an envelope struck at full level.
    pub fn new(decay_samples: usize) -> Self {
        Self {
            decay_samples,
            stage: EnvelopeState::Decaying,
            level: 1.0,
            elapsed: 0,
        }
    }

    /// Per-sample amplitude drop along the ramp.
    pub fn decrement(&self) -> f32 {
        if self.decay_samples > 0 {
            1.0 / self.decay_samples as f32
        } else {
            1.0
        }
    }

    /// Return the current level, then advance the envelope by one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let current = self.level;

        match self.stage {
            EnvelopeState::Decaying => {
                if self.elapsed < self.decay_samples {
                    self.elapsed += 1;
                    let progress = self.elapsed as f32 / self.decay_samples as f32;
                    self.level = (1.0 - progress).max(0.0);
                }

                if self.elapsed >= self.decay_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Silent;
                }
            }

            EnvelopeState::Silent => {
                self.level = 0.0;
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        current
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Closed-form level at sample `n` since the strike.
    pub fn level_at(&self, n: usize) -> f32 {
        if n == 0 {
            1.0
        } else if n < self.decay_samples {
            (1.0 - n as f32 / self.decay_samples as f32).max(0.0)
        } else {
            0.0
        }
    }

    /// Returns true while the ramp is still audible.
    pub fn is_active(&self) -> bool {
        matches!(self.stage, EnvelopeState::Decaying)
    }

    /// Strike again from full level.
    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Decaying;
        self.level = 1.0;
        self.elapsed = 0;
    }

    pub fn decay_samples(&self) -> usize {
        self.decay_samples
    }

    /// Level the next call to `next_sample` will return.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(env: &mut DecayEnvelope, samples: usize) -> Vec<f32> {
        let mut buffer = vec![0.0; samples];
        env.render(&mut buffer);
        buffer
    }

    #[test]
    fn ramps_linearly_then_gates() {
        let mut env = DecayEnvelope::new(4);
        let levels = collect(&mut env, 8);

        assert_eq!(levels, vec![1.0, 0.75, 0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(env.state(), EnvelopeState::Silent);
    }

    #[test]
    fn enters_silent_exactly_at_decay_samples() {
        let decay_samples = 1_920;
        let mut env = DecayEnvelope::new(decay_samples);

        for n in 0..decay_samples {
            assert!(env.is_active(), "still decaying before sample {n}");
            let level = env.next_sample();
            if n > 0 {
                assert!(level > 0.0, "level at {n} should still be audible");
            }
        }
        assert_eq!(env.state(), EnvelopeState::Silent);
        assert_eq!(env.next_sample(), 0.0);
    }

    #[test]
    fn zero_length_decay_plays_one_sample() {
        let mut env = DecayEnvelope::new(0);
        assert_eq!(env.decrement(), 1.0);

        let levels = collect(&mut env, 4);
        assert_eq!(levels, vec![1.0, 0.0, 0.0, 0.0]);
        assert!(!env.is_active());
    }

    #[test]
    fn level_never_rises() {
        let mut env = DecayEnvelope::new(777);
        let levels = collect(&mut env, 2_000);

        for pair in levels.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        let first_zero = levels.iter().position(|l| *l == 0.0).unwrap();
        assert!(levels[first_zero..].iter().all(|l| *l == 0.0));
    }

    #[test]
    fn closed_form_matches_stepping() {
        for decay_samples in [0, 1, 2, 5, 1_000] {
            let mut env = DecayEnvelope::new(decay_samples);
            let probe = DecayEnvelope::new(decay_samples);
            for n in 0..decay_samples + 10 {
                assert_eq!(env.next_sample(), probe.level_at(n), "n = {n}");
            }
        }
    }

    #[test]
    fn reset_strikes_again() {
        let mut env = DecayEnvelope::new(10);
        collect(&mut env, 20);
        assert!(!env.is_active());

        env.reset();
        assert!(env.is_active());
        assert_eq!(env.level(), 1.0);
    }
}
