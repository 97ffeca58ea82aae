//! Built-in presets, compiled into the binary.
//!
//! Each preset is kept as TOML text so it doubles as an example of the file
//! format and goes through the same parser as user files.

use crate::Preset;

/// Identifiers of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "default",
    "small-room",
    "large-hall",
    "dark-plate",
    "robot",
    "wide-wash",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("small-room", SMALL_ROOM_PRESET),
    ("large-hall", LARGE_HALL_PRESET),
    ("dark-plate", DARK_PLATE_PRESET),
    ("robot", ROBOT_PRESET),
    ("wide-wash", WIDE_WASH_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "Engine defaults, every filter enabled"

[params]
wet_level = 0.33
dry_level = 0.4
room_size = 0.5
width = 1.0
damping = 0.5
"#;

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, fairly dark ambience"

[params]
wet_level = 0.25
dry_level = 0.6
room_size = 0.2
width = 0.6
damping = 0.7
"#;

const LARGE_HALL_PRESET: &str = r#"
name = "Large Hall"
description = "Long, bright tail"

[params]
wet_level = 0.4
dry_level = 0.4
room_size = 0.9
width = 1.0
damping = 0.25
"#;

const DARK_PLATE_PRESET: &str = r#"
name = "Dark Plate"
description = "Dense and heavily damped"

[params]
wet_level = 0.35
dry_level = 0.45
room_size = 0.75
width = 0.8
damping = 0.9
"#;

const ROBOT_PRESET: &str = r#"
name = "Robot"
description = "Every other comb and a single allpass: metallic and ringing"

[params]
wet_level = 0.45
dry_level = 0.4
room_size = 0.7
width = 1.0
damping = 0.2

[toggles]
combs = [true, false, true, false, true, false, true, false]
all_passes = [true, false, false, false]
"#;

const WIDE_WASH_PRESET: &str = r#"
name = "Wide Wash"
description = "Mostly wet, full width"

[params]
wet_level = 0.8
dry_level = 0.1
room_size = 0.95
width = 1.0
damping = 0.4
"#;

/// Parse every factory preset.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by identifier or display name, ignoring case.
///
/// ```rust
/// use roboverb_config::get_factory_preset;
///
/// let hall = get_factory_preset("Large-Hall").unwrap();
/// assert_eq!(hall.name, "Large Hall");
/// assert!(get_factory_preset("large hall").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|p| p.0).collect()
}

/// True if `name` matches a factory preset identifier or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
