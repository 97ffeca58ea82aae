//! Engine internals: tunings, delay lengths, and parameter mapping.

use clap::Args;
use roboverb_core::{
    ALLPASS_FEEDBACK, ALLPASS_TUNINGS, COMB_TUNINGS, INPUT_GAIN, MAX_SAMPLE_RATE, Parameters,
    REFERENCE_RATE, Roboverb, STEREO_SPREAD,
};

#[derive(Args)]
pub struct InfoArgs {
    /// Sample rate used to derive delay lengths
    #[arg(long, default_value_t = 44100,
          value_parser = clap::value_parser!(u32).range(1..=MAX_SAMPLE_RATE as i64))]
    sample_rate: u32,

    /// Room size to show the comb feedback for
    #[arg(long, default_value_t = Parameters::default().room_size)]
    room: f32,

    /// Damping to show the comb damping coefficient for
    #[arg(long, default_value_t = Parameters::default().damping)]
    damping: f32,

    /// Wet level to show the mix gains for
    #[arg(long, default_value_t = Parameters::default().wet_level)]
    wet: f32,

    /// Width to show the mix gains for
    #[arg(long, default_value_t = Parameters::default().width)]
    width: f32,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let engine = Roboverb::with_sample_rate(args.sample_rate as f32)?;
    let (Some(left), Some(right)) = (engine.left(), engine.right()) else {
        anyhow::bail!("engine failed to configure at {} Hz", args.sample_rate);
    };

    println!(
        "Tunings are in samples at {} Hz; right channel adds {} samples of spread.",
        REFERENCE_RATE, STEREO_SPREAD
    );
    println!("\nComb filters at {} Hz:", args.sample_rate);
    println!("  {:<3} {:>7} {:>7} {:>7}", "#", "tuning", "left", "right");
    for (i, tuning) in COMB_TUNINGS.iter().enumerate() {
        println!(
            "  {:<3} {:>7} {:>7} {:>7}",
            i,
            tuning,
            left.combs()[i].len(),
            right.combs()[i].len()
        );
    }

    println!(
        "\nAllpass filters at {} Hz (feedback {}):",
        args.sample_rate, ALLPASS_FEEDBACK
    );
    println!("  {:<3} {:>7} {:>7} {:>7}", "#", "tuning", "left", "right");
    for (i, tuning) in ALLPASS_TUNINGS.iter().enumerate() {
        println!(
            "  {:<3} {:>7} {:>7} {:>7}",
            i,
            tuning,
            left.all_passes()[i].len(),
            right.all_passes()[i].len()
        );
    }

    let params = Parameters {
        room_size: args.room,
        damping: args.damping,
        wet_level: args.wet,
        width: args.width,
        ..Parameters::default()
    }
    .sanitized();
    let gains = params.mix_gains();

    println!("\nCoefficient mapping:");
    println!("  input gain              {INPUT_GAIN}");
    println!(
        "  room {:.3}  -> feedback {:.4}  (room * 0.28 + 0.7)",
        params.room_size,
        params.comb_feedback()
    );
    println!(
        "  damping {:.3} -> damp {:.4}  (damping * 0.4)",
        params.damping,
        params.comb_damp()
    );
    println!(
        "  wet {:.3}, width {:.3} -> wet1 {:.4}, wet2 {:.4}",
        params.wet_level, params.width, gains.wet1, gains.wet2
    );
    println!("  dry {:.3} -> dry gain {:.4}", params.dry_level, gains.dry);

    Ok(())
}
