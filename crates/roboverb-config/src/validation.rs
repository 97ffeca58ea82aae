//! Preset validation.
//!
//! The engine sanitizes whatever it is given, so validation is about
//! telling the user their file is wrong rather than protecting the DSP.
//! Every violation is collected, not just the first.

use roboverb_core::Parameters;
use thiserror::Error;

use crate::preset::{Preset, PresetParams};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter is NaN or infinite.
    #[error("parameter '{param}' is not a finite number")]
    NotFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Preset has an empty or whitespace-only name.
    #[error("preset name is empty")]
    EmptyName,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const PARAM_MIN: f64 = 0.0;
const PARAM_MAX: f64 = 1.0;

fn check_unit(param: &str, value: f64, errors: &mut Vec<ValidationError>) {
    if !value.is_finite() {
        errors.push(ValidationError::NotFinite {
            param: param.to_string(),
        });
    } else if !(PARAM_MIN..=PARAM_MAX).contains(&value) {
        errors.push(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min: PARAM_MIN,
            max: PARAM_MAX,
        });
    }
}

fn check_params(params: &PresetParams, errors: &mut Vec<ValidationError>) {
    for (name, value) in params.named_values() {
        check_unit(name, value, errors);
    }
}

fn collapse(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Check that every parameter is finite and within `[0, 1]`.
pub fn validate_parameters(params: &Parameters) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_params(&PresetParams::from(*params), &mut errors);
    collapse(errors)
}

/// Check a whole preset: a non-empty name and in-range parameters.
///
/// Toggle arrays need no check; their length is enforced when parsing.
///
/// ```rust
/// use roboverb_config::{Preset, ValidationError, validate_preset};
///
/// let mut preset = Preset::new("too wet");
/// preset.params.wet_level = 1.5;
/// assert!(matches!(
///     validate_preset(&preset),
///     Err(ValidationError::OutOfRange { .. })
/// ));
/// ```
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();
    if preset.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    check_params(&preset.params, &mut errors);
    collapse(errors)
}
