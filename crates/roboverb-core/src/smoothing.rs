//! Linear parameter ramps for click-free gain changes.
//!
//! The wet and dry gains are applied to every output sample, so stepping
//! them between blocks produces audible zipper noise. [`LinearSmoothedParam`]
//! moves toward a new target at a constant rate over a fixed transition time
//! and then lands exactly on the target.

/// Default ramp length for the mix gains.
pub const MIX_RAMP_MS: f32 = 10.0;

/// A value that ramps linearly toward its target.
///
/// # Example
///
/// ```rust
/// use roboverb_core::LinearSmoothedParam;
///
/// let mut gain = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
/// gain.set_target(1.0);
/// let mut last = 0.0;
/// for _ in 0..480 {
///     last = gain.advance();
/// }
/// assert_eq!(last, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearSmoothedParam {
    current: f32,
    target: f32,
    increment: f32,
    samples_remaining: u32,
    sample_rate: f32,
    transition_time_ms: f32,
}

impl LinearSmoothedParam {
    /// Create a settled parameter with the given ramp configuration.
    pub fn with_config(initial: f32, sample_rate: f32, transition_time_ms: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            sample_rate,
            transition_time_ms,
        }
    }

    /// Start a ramp toward `target`. Re-setting the current target is a no-op.
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        let samples = (self.transition_time_ms / 1000.0 * self.sample_rate) as u32;
        if samples == 0 {
            self.snap_to_target();
        } else {
            self.increment = (target - self.current) / samples as f32;
            self.samples_remaining = samples;
        }
    }

    /// Update the sample rate used to size future ramps.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Next value (advances by one sample).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Finish the ramp immediately.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(param: &mut LinearSmoothedParam, samples: usize) -> f32 {
        let mut last = 0.0;
        for _ in 0..samples {
            last = param.advance();
        }
        last
    }

    #[test]
    fn reaches_target_exactly_on_time() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        assert!(ramp(&mut param, 479) < 1.0);
        assert_eq!(param.advance(), 1.0);
        assert_eq!(param.advance(), 1.0);
    }

    #[test]
    fn constant_rate() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        let half = ramp(&mut param, 240);
        assert!((half - 0.5).abs() < 0.01, "got {half}");
    }

    #[test]
    fn same_target_does_not_restart_ramp() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(1.0);
        let midway = ramp(&mut param, 240);
        param.set_target(1.0);
        // Still on the original slope, not a fresh 480-sample ramp.
        assert!((param.advance() - (midway + 1.0 / 480.0)).abs() < 1e-5);
    }

    #[test]
    fn zero_time_is_instant() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 0.0);
        param.set_target(0.7);
        assert_eq!(param.advance(), 0.7);
    }

    #[test]
    fn snap_finishes_ramp() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_target(2.0);
        param.advance();
        param.snap_to_target();
        assert_eq!(param.advance(), 2.0);
    }

    #[test]
    fn sample_rate_sizes_next_ramp() {
        let mut param = LinearSmoothedParam::with_config(0.0, 48000.0, 10.0);
        param.set_sample_rate(96000.0);
        param.set_target(1.0);
        assert!(ramp(&mut param, 959) < 1.0);
        assert_eq!(param.advance(), 1.0);
    }
}
