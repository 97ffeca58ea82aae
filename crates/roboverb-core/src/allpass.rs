//! Fixed-coefficient allpass diffuser.
//!
//! Four of these run in series after the comb bank to smear the comb
//! echoes into a dense tail.
//!
//! ```text
//! delay_in = input + delayed · g
//! output   = delayed − input · g        (g = 0.5)
//! ```
//!
//! Like [`CombFilter`](crate::CombFilter), a disabled allpass passes its
//! input through and keeps writing it into the delay line.

use crate::DelayLine;
use crate::flush_denormal;

/// Feedback coefficient shared by every allpass in the engine.
pub const ALLPASS_FEEDBACK: f32 = 0.5;

/// Allpass diffuser with a fixed 0.5 coefficient.
///
/// # Example
///
/// ```rust
/// use roboverb_core::AllPassFilter;
///
/// let mut allpass = AllPassFilter::new(556);
/// let output = allpass.process(1.0);
/// assert_eq!(output, -0.5);
/// ```
#[derive(Debug, Clone)]
pub struct AllPassFilter {
    delay: DelayLine,
    enabled: bool,
}

impl AllPassFilter {
    /// Creates an enabled allpass with `delay_samples` of delay.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: DelayLine::new(delay_samples),
            enabled: true,
        }
    }

    /// Switches between diffusion and clean pass-through.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the allpass is currently diffusing.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read();

        if self.enabled {
            self.delay
                .write(flush_denormal(input + delayed * ALLPASS_FEEDBACK));
            delayed - input * ALLPASS_FEEDBACK
        } else {
            self.delay.write(input);
            input
        }
    }

    /// Clears the delay line.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Delay length in samples.
    pub fn len(&self) -> usize {
        self.delay.len()
    }

    /// Always false; see [`DelayLine::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.delay.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allpass_impulse_response() {
        let mut allpass = AllPassFilter::new(10);

        assert_eq!(allpass.process(1.0), -0.5);
        for _ in 0..9 {
            assert_eq!(allpass.process(0.0), 0.0);
        }
        // First echo: the stored input.
        assert_eq!(allpass.process(0.0), 1.0);
        for _ in 0..9 {
            allpass.process(0.0);
        }
        // Second echo: recirculated at half level.
        assert_eq!(allpass.process(0.0), 0.5);
    }

    #[test]
    fn test_allpass_decays() {
        let mut allpass = AllPassFilter::new(50);
        allpass.process(1.0);
        let mut tail = 0.0f32;
        for i in 0..2000 {
            let out = allpass.process(0.0);
            assert!(out.is_finite());
            if i >= 1500 {
                tail = tail.max(out.abs());
            }
        }
        assert!(tail < 1e-6, "tail should have died out, got {tail}");
    }

    #[test]
    fn test_allpass_disabled_passes_input() {
        let mut allpass = AllPassFilter::new(7);
        allpass.set_enabled(false);
        for i in 0..40 {
            let x = libm::cosf(i as f32 * 0.1);
            assert_eq!(allpass.process(x), x);
        }
    }

    #[test]
    fn test_allpass_disabled_keeps_circulating() {
        let mut allpass = AllPassFilter::new(3);
        allpass.set_enabled(false);
        for x in [0.1, 0.2, 0.3] {
            allpass.process(x);
        }
        allpass.set_enabled(true);
        // delayed (0.1) minus half the (silent) input
        assert_eq!(allpass.process(0.0), 0.1);
    }

    #[test]
    fn test_allpass_clear() {
        let mut allpass = AllPassFilter::new(10);
        for _ in 0..20 {
            allpass.process(1.0);
        }
        allpass.clear();
        for _ in 0..20 {
            assert_eq!(allpass.process(0.0), 0.0, "should be silent after clear");
        }
    }

    #[test]
    fn test_no_denormals_after_silence() {
        let mut allpass = AllPassFilter::new(100);
        for _ in 0..1000 {
            allpass.process(0.5);
        }
        for i in 0..100_000 {
            let out = allpass.process(0.0);
            assert!(
                out == 0.0 || out.abs() > f32::MIN_POSITIVE,
                "Denormal detected at sample {}: {:.2e}",
                i,
                out
            );
        }
    }
}
