//! Damped feedback comb filter.
//!
//! One resonant reflection path of the reverb. The feedback path includes a
//! one-pole lowpass that absorbs high frequencies a little more on every
//! round trip, which is what makes the tail darken as it decays.
//!
//! ## DSP Structure
//!
//! ```text
//! input ─→ (+) ─→ [delay line, N samples] ─┬─→ output
//!           ↑                               │
//!           └── feedback × [one-pole LP] ←──┘
//! ```
//!
//! ## Bypass
//!
//! A disabled comb outputs its input unchanged but keeps writing that input
//! into the delay line and keeps running the damping state. The buffer never
//! goes stale, so re-enabling picks up from recent history instead of
//! replaying whatever was frozen when the filter was switched off.

use crate::DelayLine;
use crate::flush_denormal;

/// Feedback comb filter with a one-pole damping lowpass.
///
/// # Example
///
/// ```rust
/// use roboverb_core::CombFilter;
///
/// let mut comb = CombFilter::new(1116);
/// comb.set_coefficients(0.84, 0.2);
///
/// let output = comb.process(1.0);
/// assert_eq!(output, 0.0); // nothing has travelled the delay yet
/// ```
#[derive(Debug, Clone)]
pub struct CombFilter {
    delay: DelayLine,
    feedback: f32,
    damp1: f32,
    damp2: f32,
    filterstore: f32,
    enabled: bool,
}

impl CombFilter {
    /// Creates an enabled comb with `delay_samples` of delay.
    ///
    /// Coefficients start at feedback 0.5 / damping 0.2 until
    /// [`set_coefficients`](Self::set_coefficients) is called.
    pub fn new(delay_samples: usize) -> Self {
        let mut comb = Self {
            delay: DelayLine::new(delay_samples),
            feedback: 0.5,
            damp1: 0.0,
            damp2: 1.0,
            filterstore: 0.0,
            enabled: true,
        };
        comb.set_coefficients(0.5, 0.2);
        comb
    }

    /// Sets the feedback gain and the damping coefficient together.
    ///
    /// `feedback` is clamped to `[0, 0.99]` and `damp` to `[0, 1]`
    /// (0 = bright, 1 = fully damped).
    #[inline]
    pub fn set_coefficients(&mut self, feedback: f32, damp: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
        self.damp1 = damp.clamp(0.0, 1.0);
        self.damp2 = 1.0 - self.damp1;
    }

    /// Current feedback gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Current damping coefficient.
    #[inline]
    pub fn damp(&self) -> f32 {
        self.damp1
    }

    /// Switches between coloring the signal and clean pass-through.
    ///
    /// Never touches the delay contents.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the comb is currently coloring its input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Processes one sample.
    ///
    /// Enabled, the output is the delayed sample before damping; the damped
    /// copy is what gets scaled and fed back.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read();

        // filterstore = delayed * (1 - damp) + filterstore * damp
        self.filterstore = flush_denormal(delayed * self.damp2 + self.filterstore * self.damp1);

        if self.enabled {
            self.delay
                .write(flush_denormal(input + self.filterstore * self.feedback));
            delayed
        } else {
            self.delay.write(input);
            input
        }
    }

    /// Clears the delay line and the damping state. Coefficients and the
    /// enabled flag are kept.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.filterstore = 0.0;
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
    fn test_comb_echo_after_delay() {
        let mut comb = CombFilter::new(100);
        comb.set_coefficients(0.5, 0.2);

        assert_eq!(comb.process(1.0), 0.0);
        for _ in 0..99 {
            assert_eq!(comb.process(0.0), 0.0);
        }

        // The impulse comes back out exactly `len` samples later.
        let echo = comb.process(0.0);
        assert_eq!(echo, 1.0);
    }

    #[test]
    fn test_comb_second_echo_is_damped_and_scaled() {
        let mut comb = CombFilter::new(10);
        comb.set_coefficients(0.5, 0.0);

        comb.process(1.0);
        for _ in 0..9 {
            comb.process(0.0);
        }
        assert_eq!(comb.process(0.0), 1.0);
        for _ in 0..9 {
            comb.process(0.0);
        }
        // No damping: second pass is exactly feedback * first pass.
        let second = comb.process(0.0);
        assert!((second - 0.5).abs() < 1e-6, "got {second}");
    }

    #[test]
    fn test_comb_feedback_decay() {
        let mut comb = CombFilter::new(10);
        comb.set_coefficients(0.8, 0.0);
        comb.process(1.0);

        let mut last_peak = f32::MAX;
        for _ in 0..20 {
            let mut peak = 0.0f32;
            for _ in 0..10 {
                peak = peak.max(comb.process(0.0).abs());
            }
            assert!(peak <= last_peak, "echo grew: {peak} > {last_peak}");
            last_peak = peak;
        }
        assert!(last_peak < 0.02);
    }

    #[test]
    fn test_comb_damping_removes_energy() {
        let mut bright = CombFilter::new(20);
        bright.set_coefficients(0.8, 0.0);
        let mut dark = CombFilter::new(20);
        dark.set_coefficients(0.8, 0.8);

        bright.process(1.0);
        dark.process(1.0);

        let mut bright_sum = 0.0f32;
        let mut dark_sum = 0.0f32;
        for _ in 0..200 {
            bright_sum += bright.process(0.0).abs();
            dark_sum += dark.process(0.0).abs();
        }
        assert!(
            dark_sum < bright_sum,
            "dark {dark_sum} >= bright {bright_sum}"
        );
    }

    #[test]
    fn test_comb_disabled_passes_input() {
        let mut comb = CombFilter::new(8);
        comb.set_enabled(false);
        for i in 0..32 {
            let x = libm::sinf(i as f32 * 0.3);
            assert_eq!(comb.process(x), x);
        }
    }

    #[test]
    fn test_comb_disabled_keeps_circulating() {
        let mut comb = CombFilter::new(4);
        comb.set_coefficients(0.5, 0.0);
        comb.set_enabled(false);
        for x in [1.0, 2.0, 3.0, 4.0] {
            comb.process(x);
        }
        comb.set_enabled(true);
        // The delay holds the raw bypassed input, oldest first.
        assert_eq!(comb.process(0.0), 1.0);
        assert_eq!(comb.process(0.0), 2.0);
    }

    #[test]
    fn test_comb_toggle_keeps_contents() {
        let mut comb = CombFilter::new(4);
        comb.process(1.0);
        comb.set_enabled(false);
        comb.set_enabled(true);
        for _ in 0..3 {
            comb.process(0.0);
        }
        assert_eq!(comb.process(0.0), 1.0);
    }

    #[test]
    fn test_comb_clear() {
        let mut comb = CombFilter::new(10);
        for _ in 0..20 {
            comb.process(1.0);
        }
        comb.clear();
        for _ in 0..20 {
            assert_eq!(comb.process(0.0), 0.0, "should be silent after clear");
        }
    }

    #[test]
    fn test_comb_coefficients_clamped() {
        let mut comb = CombFilter::new(10);
        comb.set_coefficients(1.5, -0.3);
        assert_eq!(comb.feedback(), 0.99);
        assert_eq!(comb.damp(), 0.0);
    }

    #[test]
    fn test_no_denormals_after_silence() {
        let mut comb = CombFilter::new(100);
        comb.set_coefficients(0.9, 0.3);

        for _ in 0..1000 {
            comb.process(0.5);
        }

        for i in 0..100_000 {
            let out = comb.process(0.0);
            assert!(
                out == 0.0 || out.abs() > f32::MIN_POSITIVE,
                "Denormal detected at sample {}: {:.2e}",
                i,
                out
            );
        }
    }
}
