//! Shared CLI helpers used across multiple commands.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use roboverb_config::{Preset, find_preset, get_factory_preset, validate_preset};
use roboverb_core::{NUM_ALLPASSES, NUM_COMBS, Roboverb};
use roboverb_io::{MAX_RENDER_SECONDS, SUPPORTED_BIT_DEPTHS};

/// Reverb settings accepted by every rendering command.
///
/// A preset (file or factory) gives the starting point; individual flags
/// override it.
#[derive(Args, Debug, Clone, Default)]
pub struct ReverbArgs {
    /// Preset file, or the name of a saved user preset
    #[arg(long, conflicts_with = "factory")]
    pub preset: Option<String>,

    /// Factory preset name (see `roboverb presets list`)
    #[arg(long)]
    pub factory: Option<String>,

    /// Wet level, 0-1
    #[arg(long)]
    pub wet: Option<f32>,

    /// Dry level, 0-1
    #[arg(long)]
    pub dry: Option<f32>,

    /// Room size, 0-1
    #[arg(long)]
    pub room: Option<f32>,

    /// Stereo width, 0-1
    #[arg(long)]
    pub width: Option<f32>,

    /// High-frequency damping, 0-1
    #[arg(long)]
    pub damping: Option<f32>,

    /// Disable a comb filter by index (repeatable)
    #[arg(long = "disable-comb", value_name = "INDEX",
          value_parser = clap::value_parser!(u8).range(0..NUM_COMBS as i64))]
    pub disable_comb: Vec<u8>,

    /// Disable an allpass filter by index (repeatable)
    #[arg(long = "disable-allpass", value_name = "INDEX",
          value_parser = clap::value_parser!(u8).range(0..NUM_ALLPASSES as i64))]
    pub disable_allpass: Vec<u8>,
}

impl ReverbArgs {
    /// Resolve the starting preset and apply every override on top.
    ///
    /// The result is validated, so a bad `--wet 3` is reported instead of
    /// being silently clamped by the engine.
    pub fn build_preset(&self) -> anyhow::Result<Preset> {
        let mut preset = if let Some(name) = &self.factory {
            get_factory_preset(name).ok_or_else(|| {
                anyhow::anyhow!("Factory preset '{name}' not found. See 'roboverb presets list'.")
            })?
        } else if let Some(name) = &self.preset {
            load_preset(name)?
        } else {
            Preset::new("command line")
        };

        let overrides = [
            (self.wet, &mut preset.params.wet_level),
            (self.dry, &mut preset.params.dry_level),
            (self.room, &mut preset.params.room_size),
            (self.width, &mut preset.params.width),
            (self.damping, &mut preset.params.damping),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = f64::from(v);
            }
        }

        for &i in &self.disable_comb {
            preset.toggles.combs[usize::from(i)] = false;
        }
        for &i in &self.disable_allpass {
            preset.toggles.all_passes[usize::from(i)] = false;
        }

        validate_preset(&preset)?;
        Ok(preset)
    }

    /// Build an engine at `sample_rate` configured from these arguments.
    pub fn build_engine(&self, sample_rate: u32) -> anyhow::Result<(Roboverb, Preset)> {
        let preset = self.build_preset()?;
        let mut engine = Roboverb::with_sample_rate(sample_rate as f32)?;
        preset.apply(&mut engine);

        tracing::debug!(
            preset = %preset.name,
            enabled_filters = engine.toggles().enabled_count(),
            sample_rate,
            "engine configured"
        );
        Ok((engine, preset))
    }
}

/// Load a preset by factory name, user preset name, or file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }
    anyhow::bail!(
        "Preset '{}' not found. Use 'roboverb presets list' to see available presets.",
        name
    )
}

/// Reject bit depths the WAV writer cannot produce, before doing any work.
pub fn check_bit_depth(bits: u16) -> anyhow::Result<()> {
    if !SUPPORTED_BIT_DEPTHS.contains(&bits) {
        anyhow::bail!("Unsupported bit depth {bits}; use 16, 24, or 32");
    }
    Ok(())
}

/// Reject durations outside `0..=MAX_RENDER_SECONDS`, including NaN.
pub fn check_seconds(flag: &str, seconds: f32) -> anyhow::Result<()> {
    if !(0.0..=MAX_RENDER_SECONDS).contains(&seconds) {
        anyhow::bail!("{flag} must be between 0 and {MAX_RENDER_SECONDS} seconds, got {seconds}");
    }
    Ok(())
}

/// Progress bar counting frames.
pub fn frame_progress(frames: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Linear amplitude to dBFS, floored at -120 dB.
pub fn to_db(linear: f32) -> f32 {
    roboverb_core::linear_to_db(linear).max(-120.0)
}

/// Root-mean-square level of both channels together.
pub fn rms(left: &[f32], right: &[f32]) -> f32 {
    let n = left.len() + right.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = left.iter().chain(right.iter()).map(|s| s * s).sum();
    (sum / n as f32).sqrt()
}
