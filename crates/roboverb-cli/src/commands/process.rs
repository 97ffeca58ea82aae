//! File-based reverb processing command.

use super::common::{ReverbArgs, check_bit_depth, check_seconds, frame_progress, rms, to_db};
use clap::Args;
use roboverb_io::{
    DEFAULT_BLOCK_SIZE, WavSpec, append_tail, read_wav_stereo, render_with_progress,
    write_wav_stereo,
};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    reverb: ReverbArgs,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value_t = 0.0)]
    tail: f32,

    /// Processing block size
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 24)]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    check_bit_depth(args.bit_depth)?;
    check_seconds("--tail", args.tail)?;
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        samples.len(),
        spec.channels,
        spec.sample_rate,
        samples.duration_secs(spec.sample_rate)
    );

    let (mut engine, preset) = args.reverb.build_engine(spec.sample_rate)?;
    println!("Preset: {}", preset.name);

    let input_rms = rms(&samples.left, &samples.right);
    let input_peak = samples.peak();

    let added = append_tail(&mut samples, args.tail, spec.sample_rate);
    if added > 0 {
        tracing::info!(frames = added, seconds = args.tail, "appended tail");
    }

    let pb = frame_progress(samples.len())?;
    render_with_progress(&mut engine, &mut samples, args.block_size, |n| {
        pb.inc(n as u64);
    });
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        to_db(input_rms),
        to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        to_db(rms(&samples.left, &samples.right)),
        to_db(samples.peak())
    );

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(
        &args.output,
        &samples,
        WavSpec::stereo(spec.sample_rate, args.bit_depth),
    )?;
    println!("Done!");

    Ok(())
}
