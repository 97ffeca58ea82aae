//! One channel of the reverb: eight combs in parallel, four allpasses in
//! series.
//!
//! ```text
//!              ┌─→ comb 0 ─┐
//!              ├─→ comb 1 ─┤
//! in × 0.015 ──┼─→   ...   ─┼─→ (Σ) ─→ ap 0 ─→ ap 1 ─→ ap 2 ─→ ap 3 ─→ wet
//!              └─→ comb 7 ─┘
//! ```
//!
//! A disabled comb still adds its pass-through output to the sum; switching
//! a comb off removes its coloring, not its contribution.

use crate::math::scale_to_rate;
use crate::params::{
    ALLPASS_TUNINGS, COMB_TUNINGS, FilterToggles, INPUT_GAIN, NUM_ALLPASSES, NUM_COMBS,
    REFERENCE_RATE,
};
use crate::{AllPassFilter, CombFilter};

/// Comb bank plus allpass chain for a single audio channel.
#[derive(Debug, Clone)]
pub struct ReverbChannel {
    combs: [CombFilter; NUM_COMBS],
    all_passes: [AllPassFilter; NUM_ALLPASSES],
}

impl ReverbChannel {
    /// Allocates a channel for `sample_rate`, adding `spread` samples (at the
    /// reference rate) to every tuning before scaling.
    pub fn new(sample_rate: f32, spread: usize) -> Self {
        let scaled = |tuning: usize| scale_to_rate(tuning + spread, sample_rate, REFERENCE_RATE);
        Self {
            combs: core::array::from_fn(|i| CombFilter::new(scaled(COMB_TUNINGS[i]))),
            all_passes: core::array::from_fn(|i| AllPassFilter::new(scaled(ALLPASS_TUNINGS[i]))),
        }
    }

    /// Processes one sample and returns the wet signal.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let scaled = input * INPUT_GAIN;

        let mut sum = 0.0f32;
        for comb in &mut self.combs {
            sum += comb.process(scaled);
        }

        let mut diffused = sum;
        for all_pass in &mut self.all_passes {
            diffused = all_pass.process(diffused);
        }
        diffused
    }

    /// Applies the same feedback and damping to every comb.
    pub fn set_comb_coefficients(&mut self, feedback: f32, damp: f32) {
        for comb in &mut self.combs {
            comb.set_coefficients(feedback, damp);
        }
    }

    /// Copies every enable flag from `toggles` onto the filters.
    pub fn apply_toggles(&mut self, toggles: &FilterToggles) {
        for (comb, &on) in self.combs.iter_mut().zip(&toggles.combs) {
            comb.set_enabled(on);
        }
        for (all_pass, &on) in self.all_passes.iter_mut().zip(&toggles.all_passes) {
            all_pass.set_enabled(on);
        }
    }

    /// Clears every delay line and damping state.
    pub fn clear(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for all_pass in &mut self.all_passes {
            all_pass.clear();
        }
    }

    /// The comb bank, in order.
    pub fn combs(&self) -> &[CombFilter; NUM_COMBS] {
        &self.combs
    }

    /// Mutable access to one comb; `None` if out of range.
    pub fn comb_mut(&mut self, index: usize) -> Option<&mut CombFilter> {
        self.combs.get_mut(index)
    }

    /// The allpass chain, in order.
    pub fn all_passes(&self) -> &[AllPassFilter; NUM_ALLPASSES] {
        &self.all_passes
    }

    /// Mutable access to one allpass; `None` if out of range.
    pub fn all_pass_mut(&mut self, index: usize) -> Option<&mut AllPassFilter> {
        self.all_passes.get_mut(index)
    }

    /// Length of the shortest comb, i.e. the first sample at which the wet
    /// signal can be nonzero.
    pub fn min_comb_delay(&self) -> usize {
        self.combs.iter().map(CombFilter::len).min().unwrap_or(0)
    }
}
