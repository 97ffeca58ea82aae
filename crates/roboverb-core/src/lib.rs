//! Roboverb Core - stereo reverb engine with switchable filter taps
//!
//! A Freeverb-style reverb: per channel, eight damped comb filters in
//! parallel feed four allpass diffusers in series. Every comb and allpass can
//! be switched out of the signal path at run time (identically in both
//! channels), which is where the "robo" character comes from: sparse filter
//! sets give metallic, ringing, or hollow tails that a stock reverb can't.
//!
//! # Building Blocks
//!
//! - [`DelayLine`] - Fixed-length circular buffer
//! - [`CombFilter`] - Feedback comb with one-pole damping
//! - [`AllPassFilter`] - Fixed-coefficient allpass diffuser
//! - [`ReverbChannel`] - 8 combs → Σ → 4 allpasses
//! - [`Roboverb`] - Two channels, stereo width, wet/dry mix, toggles
//!
//! # Example
//!
//! ```rust
//! use roboverb_core::{FilterKind, Parameters, Roboverb};
//!
//! let mut verb = Roboverb::with_sample_rate(44100.0)?;
//! verb.set_parameters(Parameters {
//!     room_size: 0.8,
//!     damping: 0.5,
//!     wet_level: 1.0,
//!     dry_level: 0.0,
//!     width: 1.0,
//! });
//! verb.set_filter_toggle(FilterKind::AllPass, 3, false);
//!
//! let mut left = [0.0f32; 512];
//! let mut right = [0.0f32; 512];
//! verb.process_block(&mut left, &mut right, 512);
//! # Ok::<(), roboverb_core::RoboverbError>(())
//! ```
//!
//! # no_std Support
//!
//! The crate is `no_std` + `alloc`. Delay lines are heap-allocated once, when
//! the sample rate is set; nothing allocates while processing.
//!
//! ```toml
//! [dependencies]
//! roboverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocation, locking, or panics in `process_*`
//! - **Glitch-free toggles**: Bypassed filters keep their delay lines moving
//! - **Value-semantics parameters**: [`Parameters`] in, [`Parameters`] out

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod channel;
pub mod comb;
pub mod delay;
pub mod engine;
pub mod error;
pub mod math;
pub mod params;
pub mod smoothing;

pub use allpass::{ALLPASS_FEEDBACK, AllPassFilter};
pub use channel::ReverbChannel;
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use engine::Roboverb;
pub use error::RoboverbError;
pub use math::{flush_denormal, linear_to_db, sanitize_unit, scale_to_rate};
pub use params::{
    ALLPASS_TUNINGS, COMB_TUNINGS, INPUT_GAIN, MAX_SAMPLE_RATE, NUM_ALLPASSES, NUM_COMBS,
    REFERENCE_RATE, STEREO_SPREAD,
};
pub use params::{FilterKind, FilterToggles, MixGains, Parameters};
pub use smoothing::LinearSmoothedParam;
