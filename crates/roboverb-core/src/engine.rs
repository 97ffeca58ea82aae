//! The stereo reverb engine.
//!
//! [`Roboverb`] owns two [`ReverbChannel`]s whose delay lines differ by a
//! fixed stereo spread, the active [`Parameters`], and one set of
//! [`FilterToggles`] shared by both channels.
//!
//! ## Lifecycle
//!
//! ```text
//!  new() ──→ Unconfigured ──set_sample_rate(ok)──→ Configured ⇄ processing
//!                 ↑                                    │
//!                 └────────set_sample_rate(err)────────┘
//! ```
//!
//! While unconfigured, [`process_block`](Roboverb::process_block) leaves
//! the buffers untouched, so the host hears the dry signal instead of
//! garbage or silence.
//!
//! ## Stereo Mix
//!
//! ```text
//! out_l = wet_l · wet1 + wet_r · wet2 + in_l · dry
//! out_r = wet_r · wet1 + wet_l · wet2 + in_r · dry
//! ```
//!
//! The three gains ramp over 10 ms when they change mid-stream. Comb
//! coefficients change immediately.

use crate::channel::ReverbChannel;
use crate::error::RoboverbError;
use crate::params::{FilterKind, FilterToggles, MAX_SAMPLE_RATE, Parameters, STEREO_SPREAD};
use crate::smoothing::{LinearSmoothedParam, MIX_RAMP_MS};

#[derive(Debug, Clone)]
struct Channels {
    sample_rate: f32,
    left: ReverbChannel,
    right: ReverbChannel,
}

/// Stereo comb/allpass reverb with per-filter toggles.
///
/// # Example
///
/// ```rust
/// use roboverb_core::{FilterKind, Parameters, Roboverb};
///
/// let mut verb = Roboverb::new();
/// verb.set_sample_rate(48000.0).unwrap();
/// verb.set_parameters(Parameters {
///     room_size: 0.8,
///     wet_level: 0.5,
///     ..Parameters::default()
/// });
/// verb.set_filter_toggle(FilterKind::Comb, 2, false);
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// left[0] = 1.0;
/// right[0] = 1.0;
/// verb.process_stereo(&mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct Roboverb {
    channels: Option<Channels>,
    params: Parameters,
    toggles: FilterToggles,
    wet1: LinearSmoothedParam,
    wet2: LinearSmoothedParam,
    dry: LinearSmoothedParam,
    /// Set once a block has been processed since the last configure/reset.
    primed: bool,
}

impl Default for Roboverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Roboverb {
    /// Creates an unconfigured engine with default parameters and every
    /// filter enabled. Call [`set_sample_rate`](Self::set_sample_rate) before
    /// processing.
    pub fn new() -> Self {
        let params = Parameters::default();
        let gains = params.mix_gains();
        Self {
            channels: None,
            params,
            toggles: FilterToggles::default(),
            wet1: LinearSmoothedParam::with_config(gains.wet1, 44100.0, MIX_RAMP_MS),
            wet2: LinearSmoothedParam::with_config(gains.wet2, 44100.0, MIX_RAMP_MS),
            dry: LinearSmoothedParam::with_config(gains.dry, 44100.0, MIX_RAMP_MS),
            primed: false,
        }
    }

    /// Creates an engine already configured for `sample_rate`.
    pub fn with_sample_rate(sample_rate: f32) -> Result<Self, RoboverbError> {
        let mut verb = Self::new();
        verb.set_sample_rate(sample_rate)?;
        Ok(verb)
    }

    /// Allocates (or reallocates) every delay line for `sample_rate` and
    /// clears all state.
    ///
    /// Parameters and toggles carry over. Rates that are not finite, not
    /// positive, or above [`MAX_SAMPLE_RATE`] are rejected; the engine then
    /// drops its buffers and stays unconfigured until a valid rate is
    /// supplied.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), RoboverbError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 || sample_rate > MAX_SAMPLE_RATE {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                sample_rate,
                "roboverb: rejecting sample rate, engine unconfigured"
            );
            self.channels = None;
            return Err(RoboverbError::InvalidSampleRate(sample_rate));
        }

        let mut channels = Channels {
            sample_rate,
            left: ReverbChannel::new(sample_rate, 0),
            right: ReverbChannel::new(sample_rate, STEREO_SPREAD),
        };
        let (feedback, damp) = (self.params.comb_feedback(), self.params.comb_damp());
        for channel in [&mut channels.left, &mut channels.right] {
            channel.set_comb_coefficients(feedback, damp);
            channel.apply_toggles(&self.toggles);
        }
        self.channels = Some(channels);

        for gain in [&mut self.wet1, &mut self.wet2, &mut self.dry] {
            gain.set_sample_rate(sample_rate);
            gain.snap_to_target();
        }
        self.primed = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "roboverb: configured");
        Ok(())
    }

    /// Clears every delay line and damping state without reallocating.
    ///
    /// Parameters and toggles are kept; in-flight gain ramps finish
    /// instantly.
    pub fn reset(&mut self) {
        if let Some(channels) = self.channels.as_mut() {
            channels.left.clear();
            channels.right.clear();
        }
        for gain in [&mut self.wet1, &mut self.wet2, &mut self.dry] {
            gain.snap_to_target();
        }
        self.primed = false;

        #[cfg(feature = "tracing")]
        tracing::debug!("roboverb: reset");
    }

    /// Replaces the active parameters.
    ///
    /// Values are clamped to `[0, 1]` (NaN becomes 0). Comb coefficients are
    /// recomputed only if room size or damping changed; the mix gains ramp
    /// toward their new values, or jump there if nothing has been processed
    /// since the last configure/reset.
    pub fn set_parameters(&mut self, params: Parameters) {
        let params = params.sanitized();
        if params == self.params {
            return;
        }

        if params.affects_combs(&self.params)
            && let Some(channels) = self.channels.as_mut()
        {
            let (feedback, damp) = (params.comb_feedback(), params.comb_damp());
            channels.left.set_comb_coefficients(feedback, damp);
            channels.right.set_comb_coefficients(feedback, damp);
        }

        let gains = params.mix_gains();
        self.wet1.set_target(gains.wet1);
        self.wet2.set_target(gains.wet2);
        self.dry.set_target(gains.dry);
        if !self.primed {
            for gain in [&mut self.wet1, &mut self.wet2, &mut self.dry] {
                gain.snap_to_target();
            }
        }

        self.params = params;
    }

    /// The active parameters (as sanitized by
    /// [`set_parameters`](Self::set_parameters)).
    pub fn parameters(&self) -> Parameters {
        self.params
    }

    /// Enables or disables comb `index` in both channels. Out-of-range
    /// indices are ignored.
    pub fn set_comb_toggle(&mut self, index: usize, enabled: bool) {
        self.set_filter_toggle(FilterKind::Comb, index, enabled);
    }

    /// Enables or disables allpass `index` in both channels. Out-of-range
    /// indices are ignored.
    pub fn set_all_pass_toggle(&mut self, index: usize, enabled: bool) {
        self.set_filter_toggle(FilterKind::AllPass, index, enabled);
    }

    /// Enables or disables one filter in both channels. Out-of-range
    /// indices are ignored.
    pub fn set_filter_toggle(&mut self, kind: FilterKind, index: usize, enabled: bool) {
        if !self.toggles.set(kind, index, enabled) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                ?kind,
                index,
                "roboverb: ignoring out-of-range filter toggle"
            );
            return;
        }

        let Some(channels) = self.channels.as_mut() else {
            return;
        };
        for channel in [&mut channels.left, &mut channels.right] {
            match kind {
                FilterKind::Comb => {
                    if let Some(comb) = channel.comb_mut(index) {
                        comb.set_enabled(enabled);
                    }
                }
                FilterKind::AllPass => {
                    if let Some(all_pass) = channel.all_pass_mut(index) {
                        all_pass.set_enabled(enabled);
                    }
                }
            }
        }
    }

    /// Snapshot of every filter's enable flag.
    pub fn toggles(&self) -> FilterToggles {
        self.toggles
    }

    /// Replaces every enable flag at once.
    pub fn set_toggles(&mut self, toggles: FilterToggles) {
        self.toggles = toggles;
        if let Some(channels) = self.channels.as_mut() {
            channels.left.apply_toggles(&toggles);
            channels.right.apply_toggles(&toggles);
        }
    }

    /// Processes `min(left.len(), right.len())` samples in place.
    pub fn process_stereo(&mut self, left: &mut [f32], right: &mut [f32]) {
        let count = left.len().min(right.len());
        self.process_block(left, right, count);
    }

    /// Processes the first `count` samples of each buffer in place.
    ///
    /// `count` is clamped to the shorter buffer; samples past it are never
    /// read or written. Does nothing while unconfigured.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32], count: usize) {
        let Some(channels) = self.channels.as_mut() else {
            return;
        };
        let count = count.min(left.len()).min(right.len());
        if count == 0 {
            return;
        }
        self.primed = true;

        for (l, r) in left[..count].iter_mut().zip(right[..count].iter_mut()) {
            let dry_l = *l;
            let dry_r = *r;
            let wet_l = channels.left.process(dry_l);
            let wet_r = channels.right.process(dry_r);

            let wet1 = self.wet1.advance();
            let wet2 = self.wet2.advance();
            let dry = self.dry.advance();

            *l = wet_l * wet1 + wet_r * wet2 + dry_l * dry;
            *r = wet_r * wet1 + wet_l * wet2 + dry_r * dry;
        }
    }

    /// True once a valid sample rate has been set.
    pub fn is_configured(&self) -> bool {
        self.channels.is_some()
    }

    /// The configured sample rate, if any.
    pub fn sample_rate(&self) -> Option<f32> {
        self.channels.as_ref().map(|c| c.sample_rate)
    }

    /// Left channel filters, if configured.
    pub fn left(&self) -> Option<&ReverbChannel> {
        self.channels.as_ref().map(|c| &c.left)
    }

    /// Right channel filters, if configured.
    pub fn right(&self) -> Option<&ReverbChannel> {
        self.channels.as_ref().map(|c| &c.right)
    }
}
