//! Offline rendering: feed a buffer through the engine block by block.

use roboverb_core::Roboverb;

use crate::StereoSamples;

/// Block size used when the caller has no preference.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Longest tail [`append_tail`] will add, in seconds.
pub const MAX_RENDER_SECONDS: f32 = 600.0;

/// Process `samples` in place, `block_size` frames at a time.
///
/// A `block_size` of 0 is treated as 1. An unconfigured engine leaves the
/// samples untouched.
pub fn render(engine: &mut Roboverb, samples: &mut StereoSamples, block_size: usize) {
    render_with_progress(engine, samples, block_size, |_| {});
}

/// Like [`render`], calling `on_block` with the frame count of each block
/// once it has been processed.
pub fn render_with_progress<F>(
    engine: &mut Roboverb,
    samples: &mut StereoSamples,
    block_size: usize,
    mut on_block: F,
) where
    F: FnMut(usize),
{
    if !engine.is_configured() {
        tracing::warn!("rendering through an unconfigured engine; audio passes through dry");
    }

    let block_size = block_size.max(1);
    let frames = samples.len();
    let StereoSamples { left, right } = samples;
    let blocks = left[..frames]
        .chunks_mut(block_size)
        .zip(right[..frames].chunks_mut(block_size));

    for (l, r) in blocks {
        engine.process_stereo(l, r);
        on_block(l.len());
    }

    tracing::debug!(frames, block_size, "render complete");
}

/// Append `seconds` of silence so the reverb tail can ring out.
///
/// Non-finite or negative durations append nothing, and durations above
/// [`MAX_RENDER_SECONDS`] are capped to it. Returns the number of frames
/// added.
pub fn append_tail(samples: &mut StereoSamples, seconds: f32, sample_rate: u32) -> usize {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    let seconds = seconds.min(MAX_RENDER_SECONDS);
    let extra = (f64::from(seconds) * f64::from(sample_rate)).round() as usize;
    let len = samples.len() + extra;
    samples.left.resize(len, 0.0);
    samples.right.resize(len, 0.0);
    extra
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> StereoSamples {
        let mut s = StereoSamples::silence(len);
        s.left[0] = 1.0;
        s.right[0] = 1.0;
        s
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let mut a = impulse(10_000);
        let mut b = a.clone();
        let mut verb_a = Roboverb::with_sample_rate(44100.0).unwrap();
        let mut verb_b = Roboverb::with_sample_rate(44100.0).unwrap();

        render(&mut verb_a, &mut a, 64);
        render(&mut verb_b, &mut b, 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_reports_every_frame() {
        let mut samples = impulse(1000);
        let mut verb = Roboverb::with_sample_rate(48000.0).unwrap();
        let mut blocks = Vec::new();

        render_with_progress(&mut verb, &mut samples, 300, |n| blocks.push(n));
        assert_eq!(blocks, vec![300, 300, 300, 100]);
    }

    #[test]
    fn test_zero_block_size() {
        let mut samples = impulse(10);
        let mut verb = Roboverb::with_sample_rate(48000.0).unwrap();
        let mut calls = 0;
        render_with_progress(&mut verb, &mut samples, 0, |_| calls += 1);
        assert_eq!(calls, 10);
    }

    #[test]
    fn test_unconfigured_engine_passes_through() {
        let mut samples = impulse(100);
        let original = samples.clone();
        render(&mut Roboverb::new(), &mut samples, 32);
        assert_eq!(samples, original);
    }

    #[test]
    fn test_append_tail() {
        let mut samples = impulse(10);
        assert_eq!(append_tail(&mut samples, 0.5, 100), 50);
        assert_eq!(samples.left.len(), 60);
        assert_eq!(samples.right.len(), 60);
        assert!(samples.left[10..].iter().all(|&s| s == 0.0));

        assert_eq!(append_tail(&mut samples, -1.0, 100), 0);
        assert_eq!(append_tail(&mut samples, f32::NAN, 100), 0);
        assert_eq!(samples.len(), 60);
    }

    #[test]
    fn test_append_tail_is_capped() {
        let mut samples = impulse(1);
        assert_eq!(append_tail(&mut samples, 1.0e9, 10), 6000);
        assert_eq!(samples.len(), 6001);
    }
}
