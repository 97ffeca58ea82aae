//! Small math helpers shared by the filters and the engine.
//!
//! All functions are allocation-free and `no_std` compatible (via `libm`).

use libm::{logf, roundf};

/// Flush values small enough to become subnormal to zero.
///
/// Feedback loops that decay toward silence would otherwise spend a long time
/// in the IEEE 754 subnormal range, which is very slow on most CPUs.
///
/// # Example
/// ```rust
/// use roboverb_core::flush_denormal;
///
/// assert_eq!(flush_denormal(1e-25), 0.0);
/// assert_eq!(flush_denormal(0.5), 0.5);
/// ```
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored to -200 dB instead of `-inf`.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Scale a delay length tuned at `reference_rate` to `target_rate`.
///
/// The result is rounded to the nearest sample and never less than one.
#[inline]
pub fn scale_to_rate(samples: usize, target_rate: f32, reference_rate: f32) -> usize {
    (roundf(samples as f32 * target_rate / reference_rate) as usize).max(1)
}

/// Clamp a normalized control value to `[0, 1]`, mapping NaN to zero.
#[inline]
pub fn sanitize_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_denormal_keeps_audible_values() {
        assert_eq!(flush_denormal(1e-3), 1e-3);
        assert_eq!(flush_denormal(-1e-3), -1e-3);
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(-1e-30), 0.0);
    }

    #[test]
    fn linear_to_db_known_values() {
        assert!(linear_to_db(1.0).abs() < 1e-6);
        assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
        assert!((linear_to_db(0.001) + 60.0).abs() < 0.01);
    }

    #[test]
    fn linear_to_db_floors_silence() {
        assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
    }

    #[test]
    fn scale_to_rate_identity_at_reference() {
        assert_eq!(scale_to_rate(1116, 44100.0, 44100.0), 1116);
    }

    #[test]
    fn scale_to_rate_doubles_at_88k() {
        assert_eq!(scale_to_rate(225, 88200.0, 44100.0), 450);
    }

    #[test]
    fn scale_to_rate_never_zero() {
        assert_eq!(scale_to_rate(1, 100.0, 44100.0), 1);
    }

    #[test]
    fn sanitize_unit_clamps_and_rejects_nan() {
        assert_eq!(sanitize_unit(-0.5), 0.0);
        assert_eq!(sanitize_unit(1.5), 1.0);
        assert_eq!(sanitize_unit(0.25), 0.25);
        assert_eq!(sanitize_unit(f32::NAN), 0.0);
        assert_eq!(sanitize_unit(f32::INFINITY), 1.0);
    }
}
