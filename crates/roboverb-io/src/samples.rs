//! Planar stereo sample buffers.

/// Two equal-length channels of `f32` audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create new stereo samples from left and right channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// `len` frames of silence.
    pub fn silence(len: usize) -> Self {
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
        }
    }

    /// Create stereo samples from mono by duplicating to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Create from interleaved format (L, R, L, R, ...). A trailing odd
    /// sample is dropped.
    pub fn from_interleaved(interleaved: &[f32]) -> Self {
        let (left, right) = interleaved
            .chunks_exact(2)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }

    /// Get the number of frames.
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Check if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Duration in seconds at `sample_rate`.
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / f64::from(sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mono() {
        let stereo = StereoSamples::from_mono(vec![1.0, 2.0, 3.0]);
        assert_eq!(stereo.left, stereo.right);
        assert_eq!(stereo.len(), 3);
    }

    #[test]
    fn test_from_interleaved() {
        let stereo = StereoSamples::from_interleaved(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stereo.left, vec![1.0, 3.0]);
        assert_eq!(stereo.right, vec![2.0, 4.0]);
    }

    #[test]
    fn test_from_interleaved_drops_odd_sample() {
        let stereo = StereoSamples::from_interleaved(&[1.0, 2.0, 3.0]);
        assert_eq!(stereo.left, vec![1.0]);
        assert_eq!(stereo.right, vec![2.0]);
    }

    #[test]
    fn test_peak_and_duration() {
        let stereo = StereoSamples::new(vec![0.1, -0.7], vec![0.5, 0.2]);
        assert_eq!(stereo.peak(), 0.7);
        assert_eq!(stereo.duration_secs(2), 1.0);
        assert_eq!(stereo.duration_secs(0), 0.0);
        assert!(StereoSamples::silence(0).is_empty());
    }
}
