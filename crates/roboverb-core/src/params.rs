//! Reverb parameters and their mapping onto filter coefficients.
//!
//! [`Parameters`] is the value the host hands the engine. Everything the
//! filters actually consume is derived from it here, in one place:
//!
//! | Parameter | Feeds | Mapping |
//! |-----------|-------|---------|
//! | `room_size` | comb feedback | `room_size * 0.28 + 0.7` |
//! | `damping` | comb damping | `damping * 0.4` |
//! | `wet_level`, `width` | wet gains | `wet = wet_level * 3`, `wet1 = wet/2 * (1 + width)`, `wet2 = wet/2 * (1 - width)` |
//! | `dry_level` | dry gain | unity |

use crate::math::sanitize_unit;

/// Number of parallel comb filters per channel.
pub const NUM_COMBS: usize = 8;

/// Number of series allpass filters per channel.
pub const NUM_ALLPASSES: usize = 4;

/// Comb delay lengths at the reference rate. Mutually prime to avoid
/// coinciding resonances.
pub const COMB_TUNINGS: [usize; NUM_COMBS] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Allpass delay lengths at the reference rate.
pub const ALLPASS_TUNINGS: [usize; NUM_ALLPASSES] = [556, 441, 341, 225];

/// Extra samples added to every right-channel delay (at the reference rate).
pub const STEREO_SPREAD: usize = 23;

/// Sample rate the tunings were designed for.
pub const REFERENCE_RATE: f32 = 44100.0;

/// Highest sample rate the engine accepts. Delay lines scale with the rate,
/// so this also bounds their allocation.
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

/// Attenuation applied to each channel's input before the comb bank.
pub const INPUT_GAIN: f32 = 0.015;

const WET_SCALE: f32 = 3.0;
const ROOM_SCALE: f32 = 0.28;
const ROOM_OFFSET: f32 = 0.7;
const DAMP_SCALE: f32 = 0.4;

/// User-facing reverb controls, all normalized to `[0, 1]`.
///
/// Compared field-wise; the engine only recomputes coefficients when a new
/// value differs from the active one.
///
/// # Example
///
/// ```rust
/// use roboverb_core::Parameters;
///
/// let hall = Parameters {
///     room_size: 0.9,
///     damping: 0.3,
///     ..Parameters::default()
/// };
/// assert_ne!(hall, Parameters::default());
/// assert!((hall.comb_feedback() - 0.952).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Level of the reverberated signal.
    pub wet_level: f32,
    /// Level of the unprocessed signal.
    pub dry_level: f32,
    /// Size of the simulated room; sets comb feedback.
    pub room_size: f32,
    /// Stereo width of the tail: 0 = mono, 1 = fully decorrelated.
    pub width: f32,
    /// High-frequency absorption: 0 = bright, 1 = dark.
    pub damping: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            wet_level: 0.33,
            dry_level: 0.4,
            room_size: 0.5,
            width: 1.0,
            damping: 0.5,
        }
    }
}

impl Parameters {
    /// Copy with every field clamped to `[0, 1]` and NaN replaced by 0.
    pub fn sanitized(self) -> Self {
        Self {
            wet_level: sanitize_unit(self.wet_level),
            dry_level: sanitize_unit(self.dry_level),
            room_size: sanitize_unit(self.room_size),
            width: sanitize_unit(self.width),
            damping: sanitize_unit(self.damping),
        }
    }

    /// Comb feedback gain for this room size. Always in `[0.7, 0.98]`.
    #[inline]
    pub fn comb_feedback(&self) -> f32 {
        sanitize_unit(self.room_size) * ROOM_SCALE + ROOM_OFFSET
    }

    /// Comb damping coefficient. Always in `[0, 0.4]`.
    #[inline]
    pub fn comb_damp(&self) -> f32 {
        sanitize_unit(self.damping) * DAMP_SCALE
    }

    /// Output gains for the final stereo mix.
    pub fn mix_gains(&self) -> MixGains {
        let wet = sanitize_unit(self.wet_level) * WET_SCALE;
        let width = sanitize_unit(self.width);
        MixGains {
            wet1: 0.5 * wet * (1.0 + width),
            wet2: 0.5 * wet * (1.0 - width),
            dry: sanitize_unit(self.dry_level),
        }
    }

    /// True if the comb coefficients derived from `self` and `other` differ.
    pub fn affects_combs(&self, other: &Self) -> bool {
        self.room_size != other.room_size || self.damping != other.damping
    }
}

/// Gains applied when combining wet and dry signals.
///
/// `out_l = wet_l * wet1 + wet_r * wet2 + dry_l * dry` (and mirrored for the
/// right channel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixGains {
    /// Gain for the channel's own wet signal.
    pub wet1: f32,
    /// Gain for the opposite channel's wet signal.
    pub wet2: f32,
    /// Gain for the dry input.
    pub dry: f32,
}

/// Which bank a toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// One of the [`NUM_COMBS`] parallel comb filters.
    Comb,
    /// One of the [`NUM_ALLPASSES`] series allpass filters.
    AllPass,
}

impl FilterKind {
    /// Number of filters of this kind in each channel.
    pub const fn count(self) -> usize {
        match self {
            FilterKind::Comb => NUM_COMBS,
            FilterKind::AllPass => NUM_ALLPASSES,
        }
    }
}

/// Enable state of every filter, shared by both channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterToggles {
    /// Comb enable flags, by index.
    pub combs: [bool; NUM_COMBS],
    /// Allpass enable flags, by index.
    pub all_passes: [bool; NUM_ALLPASSES],
}

impl Default for FilterToggles {
    fn default() -> Self {
        Self {
            combs: [true; NUM_COMBS],
            all_passes: [true; NUM_ALLPASSES],
        }
    }
}

impl FilterToggles {
    /// Looks up one flag; `None` if `index` is out of range.
    pub fn get(&self, kind: FilterKind, index: usize) -> Option<bool> {
        match kind {
            FilterKind::Comb => self.combs.get(index).copied(),
            FilterKind::AllPass => self.all_passes.get(index).copied(),
        }
    }

    /// Sets one flag. Returns false (and changes nothing) if `index` is out
    /// of range.
    pub fn set(&mut self, kind: FilterKind, index: usize, enabled: bool) -> bool {
        let slot = match kind {
            FilterKind::Comb => self.combs.get_mut(index),
            FilterKind::AllPass => self.all_passes.get_mut(index),
        };
        match slot {
            Some(flag) => {
                *flag = enabled;
                true
            }
            None => false,
        }
    }

    /// Number of enabled filters across both banks.
    pub fn enabled_count(&self) -> usize {
        self.combs
            .iter()
            .chain(self.all_passes.iter())
            .filter(|&&on| on)
            .count()
    }
}
