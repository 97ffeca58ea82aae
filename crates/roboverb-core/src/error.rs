//! Errors reported by the reverb engine.

use thiserror::Error;

/// Errors that can occur when configuring a [`Roboverb`](crate::Roboverb).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RoboverbError {
    /// The sample rate was not finite, not positive, or above
    /// [`MAX_SAMPLE_RATE`](crate::MAX_SAMPLE_RATE).
    #[error("invalid sample rate: {0} (must be finite, > 0 and <= 768000)")]
    InvalidSampleRate(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate alloc;
    use alloc::string::ToString;

    #[test]
    fn invalid_sample_rate_display() {
        let msg = RoboverbError::InvalidSampleRate(-1.0).to_string();
        assert_eq!(
            msg,
            "invalid sample rate: -1 (must be finite, > 0 and <= 768000)"
        );
    }
}
