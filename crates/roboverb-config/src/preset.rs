//! Preset file format and operations.

use roboverb_core::{FilterToggles, NUM_ALLPASSES, NUM_COMBS, Parameters, Roboverb};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Decimal places kept when capturing parameters from a running engine.
const CAPTURE_PRECISION: f64 = 1e6;

/// A saved reverb setting: parameters plus filter enable flags.
///
/// # TOML Format
///
/// ```toml
/// name = "Robot"
/// description = "Half the combs, one allpass"
///
/// [params]
/// wet_level = 0.45
/// dry_level = 0.4
/// room_size = 0.7
/// width = 1.0
/// damping = 0.2
///
/// [toggles]
/// combs = [true, false, true, false, true, false, true, false]
/// all_passes = [true, false, false, false]
/// ```
///
/// Missing `[params]` entries take the engine defaults and a missing
/// `[toggles]` table enables every filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Normalized engine parameters.
    #[serde(default)]
    pub params: PresetParams,

    /// Per-filter enable flags.
    #[serde(default)]
    pub toggles: PresetToggles,
}

/// The five engine parameters as stored in a preset.
///
/// Stored as `f64` so values written by hand round-trip exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Wet (reverb) level, 0-1.
    pub wet_level: f64,
    /// Dry (direct) level, 0-1.
    pub dry_level: f64,
    /// Room size, 0-1.
    pub room_size: f64,
    /// Stereo width, 0-1.
    pub width: f64,
    /// High-frequency damping, 0-1.
    pub damping: f64,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from(Parameters::default()).rounded()
    }
}

impl From<Parameters> for PresetParams {
    fn from(p: Parameters) -> Self {
        Self {
            wet_level: f64::from(p.wet_level),
            dry_level: f64::from(p.dry_level),
            room_size: f64::from(p.room_size),
            width: f64::from(p.width),
            damping: f64::from(p.damping),
        }
    }
}

impl From<PresetParams> for Parameters {
    fn from(p: PresetParams) -> Self {
        Self {
            wet_level: p.wet_level as f32,
            dry_level: p.dry_level as f32,
            room_size: p.room_size as f32,
            width: p.width as f32,
            damping: p.damping as f32,
        }
    }
}

impl PresetParams {
    /// Parameter values keyed by their TOML names, in file order.
    pub fn named_values(&self) -> [(&'static str, f64); 5] {
        [
            ("wet_level", self.wet_level),
            ("dry_level", self.dry_level),
            ("room_size", self.room_size),
            ("width", self.width),
            ("damping", self.damping),
        ]
    }

    /// Drop the float noise an `f32` picks up on its way to `f64`.
    fn rounded(self) -> Self {
        let r = |x: f64| (x * CAPTURE_PRECISION).round() / CAPTURE_PRECISION;
        Self {
            wet_level: r(self.wet_level),
            dry_level: r(self.dry_level),
            room_size: r(self.room_size),
            width: r(self.width),
            damping: r(self.damping),
        }
    }
}

/// Filter enable flags as stored in a preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PresetToggles {
    /// One flag per comb filter.
    pub combs: [bool; NUM_COMBS],
    /// One flag per allpass filter.
    pub all_passes: [bool; NUM_ALLPASSES],
}

impl Default for PresetToggles {
    fn default() -> Self {
        FilterToggles::default().into()
    }
}

impl From<FilterToggles> for PresetToggles {
    fn from(t: FilterToggles) -> Self {
        Self {
            combs: t.combs,
            all_passes: t.all_passes,
        }
    }
}

impl From<PresetToggles> for FilterToggles {
    fn from(t: PresetToggles) -> Self {
        Self {
            combs: t.combs,
            all_passes: t.all_passes,
        }
    }
}

impl Preset {
    /// Create a preset with default parameters and every filter enabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::default(),
            toggles: PresetToggles::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Capture the current parameters and toggles of `engine`.
    pub fn from_engine(name: impl Into<String>, engine: &Roboverb) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::from(engine.parameters()).rounded(),
            toggles: engine.toggles().into(),
        }
    }

    /// Engine parameters described by this preset.
    pub fn parameters(&self) -> Parameters {
        self.params.into()
    }

    /// Filter toggles described by this preset.
    pub fn filter_toggles(&self) -> FilterToggles {
        self.toggles.into()
    }

    /// Push parameters and toggles into `engine`.
    ///
    /// Works on an unconfigured engine too; the values are kept until a
    /// sample rate is set.
    pub fn apply(&self, engine: &mut Roboverb) {
        engine.set_parameters(self.parameters());
        engine.set_toggles(self.filter_toggles());
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let preset = Preset::from_toml("name = \"bare\"").unwrap();
        assert_eq!(preset.name, "bare");
        assert_eq!(preset.description, None);
        assert_eq!(preset.params, PresetParams::default());
        assert_eq!(preset.filter_toggles(), FilterToggles::default());
        assert_eq!(preset.parameters(), Parameters::default());
    }

    #[test]
    fn test_partial_params_fill_in() {
        let preset = Preset::from_toml(
            r#"
name = "partial"

[params]
room_size = 0.9
"#,
        )
        .unwrap();
        assert_eq!(preset.params.room_size, 0.9);
        assert_eq!(preset.params.wet_level, PresetParams::default().wet_level);
    }

    #[test]
    fn test_toggles_parse() {
        let preset = Preset::from_toml(
            r#"
name = "sparse"

[toggles]
combs = [true, false, true, false, true, false, true, false]
all_passes = [false, true, true, true]
"#,
        )
        .unwrap();
        let toggles = preset.filter_toggles();
        assert!(!toggles.combs[1]);
        assert!(!toggles.all_passes[0]);
        assert_eq!(toggles.enabled_count(), 7);
    }

    #[test]
    fn test_wrong_toggle_length_is_rejected() {
        let result = Preset::from_toml(
            r#"
name = "short"

[toggles]
combs = [true, false]
"#,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(Preset::from_toml("[params]\nwet_level = 0.5").is_err());
    }

    #[test]
    fn test_to_toml_is_readable() {
        let toml = Preset::new("readable").with_description("d").to_toml().unwrap();
        assert!(toml.contains("name = \"readable\""), "got: {toml}");
        assert!(toml.contains("wet_level = 0.33"), "got: {toml}");
        assert!(toml.contains("[toggles]"), "got: {toml}");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut preset = Preset::new("rt").with_description("round trip");
        preset.params.damping = 0.125;
        preset.toggles.combs[7] = false;
        let back = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(back, preset);
    }

    #[test]
    fn test_apply_and_capture() {
        let mut preset = Preset::new("captured");
        preset.params.room_size = 0.8;
        preset.params.width = 0.25;
        preset.toggles.all_passes[2] = false;

        let mut engine = Roboverb::with_sample_rate(44100.0).unwrap();
        preset.apply(&mut engine);
        assert_eq!(engine.parameters().room_size, 0.8);
        assert!(!engine.toggles().all_passes[2]);

        let captured = Preset::from_engine("captured", &engine);
        assert_eq!(captured, preset);
    }

    #[test]
    fn test_apply_to_unconfigured_engine() {
        let mut preset = Preset::new("early");
        preset.toggles.combs[0] = false;
        let mut engine = Roboverb::new();
        preset.apply(&mut engine);
        engine.set_sample_rate(48000.0).unwrap();
        assert!(!engine.toggles().combs[0]);
        let left = engine.left().unwrap();
        assert!(!left.combs()[0].is_enabled());
    }
}
