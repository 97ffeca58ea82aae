//! Preset management commands.

use super::common::{ReverbArgs, load_preset};
use clap::{Args, Subcommand};
use roboverb_config::{
    Preset, ensure_user_presets_dir, factory_preset_names, factory_presets, list_user_presets,
    preset_name_from_path, user_presets_dir,
};
use roboverb_core::{NUM_ALLPASSES, NUM_COMBS};
use std::path::{Path, PathBuf};

const TOTAL_FILTERS: usize = NUM_COMBS + NUM_ALLPASSES;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory and user presets
    List,

    /// Print a preset as TOML
    Show {
        /// Factory preset, user preset name, or path
        name: String,
    },

    /// Write a preset to a TOML file
    Export {
        /// Factory preset, user preset name, or path
        name: String,

        /// Destination file
        file: PathBuf,

        /// Overwrite the destination if it exists
        #[arg(long)]
        force: bool,
    },

    /// Save reverb settings as a user preset
    Save(SaveArgs),
}

#[derive(Args)]
struct SaveArgs {
    /// Name for the new preset
    name: String,

    #[command(flatten)]
    reverb: ReverbArgs,

    /// Description of the preset
    #[arg(long)]
    description: Option<String>,

    /// Overwrite if the preset already exists
    #[arg(long)]
    force: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list(),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Export { name, file, force } => export(&name, &file, force),
        PresetsCommand::Save(args) => save(&args),
    }
}

fn list() -> anyhow::Result<()> {
    println!("Factory presets:");
    for (id, preset) in factory_preset_names().into_iter().zip(factory_presets()) {
        print_entry(id, &preset);
    }

    let user = list_user_presets();
    println!("\nUser presets ({}):", user_presets_dir().display());
    if user.is_empty() {
        println!("  (none)");
    }
    for path in user {
        let id = preset_name_from_path(&path).unwrap_or_else(|| path.display().to_string());
        match Preset::load(&path) {
            Ok(preset) => print_entry(&id, &preset),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping unreadable preset"
                );
            }
        }
    }
    Ok(())
}

fn print_entry(id: &str, preset: &Preset) {
    let filters = preset.filter_toggles().enabled_count();
    let name = &preset.name;
    match &preset.description {
        Some(desc) => println!("  {id:<12} {name} - {desc} [{filters}/{TOTAL_FILTERS} filters]"),
        None => println!("  {id:<12} {name} [{filters}/{TOTAL_FILTERS} filters]"),
    }
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn export(name: &str, file: &Path, force: bool) -> anyhow::Result<()> {
    if file.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            file.display()
        );
    }
    let preset = load_preset(name)?;
    preset.save(file)?;
    println!("Exported '{}' to {}", preset.name, file.display());
    Ok(())
}

fn save(args: &SaveArgs) -> anyhow::Result<()> {
    let dir = ensure_user_presets_dir()?;
    let description = args.description.as_deref();
    let path = save_into(&dir, &args.name, &args.reverb, description, args.force)?;
    println!("Saved preset '{}' to {}", args.name, path.display());
    Ok(())
}

/// Write the preset built from `reverb` to `<dir>/<name>.toml`.
fn save_into(
    dir: &Path,
    name: &str,
    reverb: &ReverbArgs,
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<PathBuf> {
    if name.trim().is_empty() || name.contains(['/', '\\']) {
        anyhow::bail!("Invalid preset name '{name}'");
    }
    let path = dir.join(format!("{name}.toml"));
    if path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let mut preset = reverb.build_preset()?;
    preset.name = name.to_string();
    if let Some(desc) = description {
        preset.description = Some(desc.to_string());
    }
    preset.save(&path)?;
    tracing::debug!(path = %path.display(), "saved user preset");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_writes_a_loadable_preset() {
        let dir = TempDir::new().unwrap();
        let reverb = ReverbArgs {
            factory: Some("dark-plate".into()),
            room: Some(0.25),
            disable_allpass: vec![1],
            ..ReverbArgs::default()
        };

        let path = save_into(dir.path(), "my-plate", &reverb, Some("tweaked"), false).unwrap();
        assert_eq!(path, dir.path().join("my-plate.toml"));

        let loaded = Preset::load(&path).unwrap();
        assert_eq!(loaded.name, "my-plate");
        assert_eq!(loaded.description.as_deref(), Some("tweaked"));
        assert_eq!(loaded.params.room_size, 0.25);
        assert!(!loaded.toggles.all_passes[1]);
        assert!(loaded.toggles.all_passes[0]);
    }

    #[test]
    fn save_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let reverb = ReverbArgs::default();

        save_into(dir.path(), "room", &reverb, None, false).unwrap();
        assert!(save_into(dir.path(), "room", &reverb, None, false).is_err());
        assert!(save_into(dir.path(), "room", &reverb, None, true).is_ok());
    }

    #[test]
    fn save_rejects_names_that_are_not_file_names() {
        let dir = TempDir::new().unwrap();
        for name in ["", "  ", "../escape", "a/b"] {
            let result = save_into(dir.path(), name, &ReverbArgs::default(), None, false);
            assert!(result.is_err(), "accepted {name:?}");
        }
    }
}
