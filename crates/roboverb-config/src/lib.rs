//! Presets and configuration for the roboverb reverb engine.
//!
//! A preset captures everything a user can set on a [`Roboverb`]: the five
//! normalized parameters and the enable flag of every comb and allpass
//! filter. Presets are stored as TOML.
//!
//! # Features
//!
//! - **Preset files**: load and save [`Preset`]s as TOML
//! - **Validation**: reject non-finite or out-of-range values before they reach the engine
//! - **Factory presets**: a small built-in bank, looked up by name
//! - **Paths**: platform-specific user preset directory
//!
//! # Example
//!
//! ```rust,no_run
//! use roboverb_config::{Preset, get_factory_preset, validate_preset};
//! use roboverb_core::Roboverb;
//!
//! let mut engine = Roboverb::with_sample_rate(48000.0).unwrap();
//!
//! let preset = Preset::load("hall.toml")
//!     .ok()
//!     .or_else(|| get_factory_preset("large-hall"))
//!     .unwrap();
//! validate_preset(&preset).unwrap();
//! preset.apply(&mut engine);
//!
//! let snapshot = Preset::from_engine("my hall", &engine);
//! snapshot.save("my_hall.toml").unwrap();
//! ```
//!
//! [`Roboverb`]: roboverb_core::Roboverb

mod error;
pub mod factory_presets;
pub mod paths;
mod preset;
pub mod validation;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_presets_dir,
};
pub use preset::{Preset, PresetParams, PresetToggles};
pub use validation::{ValidationError, ValidationResult, validate_parameters, validate_preset};
