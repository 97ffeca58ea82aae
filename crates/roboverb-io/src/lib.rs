//! Offline audio I/O for the roboverb engine.
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`]
//! - **Rendering**: [`render`] drives a [`Roboverb`](roboverb_core::Roboverb)
//!   over a whole file in fixed-size blocks, the way a host callback would
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roboverb_core::Roboverb;
//! use roboverb_io::{WavSpec, append_tail, read_wav_stereo, render, write_wav_stereo};
//!
//! let (mut samples, spec) = read_wav_stereo("dry.wav")?;
//! let mut verb = Roboverb::with_sample_rate(spec.sample_rate as f32).unwrap();
//!
//! append_tail(&mut samples, 3.0, spec.sample_rate);
//! render(&mut verb, &mut samples, 512);
//!
//! write_wav_stereo("wet.wav", &samples, WavSpec::stereo(spec.sample_rate, 24))?;
//! # Ok::<(), roboverb_io::Error>(())
//! ```

mod render;
mod samples;
mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, MAX_RENDER_SECONDS};
pub use render::{append_tail, render, render_with_progress};
pub use samples::StereoSamples;
pub use wav::{SUPPORTED_BIT_DEPTHS, WavSpec, read_wav_stereo, write_wav_stereo};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Output bit depth is not one of 16, 24 or 32.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
