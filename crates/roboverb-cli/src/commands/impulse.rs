//! Impulse response rendering.

use super::common::{ReverbArgs, check_bit_depth, check_seconds, frame_progress, to_db};
use clap::Args;
use roboverb_core::MAX_SAMPLE_RATE;
use roboverb_io::{
    DEFAULT_BLOCK_SIZE, StereoSamples, WavSpec, render_with_progress, write_wav_stereo,
};
use std::path::PathBuf;

/// Level below the peak at which the tail is considered gone (-60 dB).
const DECAY_THRESHOLD: f32 = 1e-3;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    reverb: ReverbArgs,

    /// Length of the rendered response in seconds
    #[arg(long, default_value_t = 4.0)]
    seconds: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 44100,
          value_parser = clap::value_parser!(u32).range(1..=MAX_SAMPLE_RATE as i64))]
    sample_rate: u32,

    /// Processing block size
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value_t = 32)]
    bit_depth: u16,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    check_bit_depth(args.bit_depth)?;
    check_seconds("--seconds", args.seconds)?;
    if args.seconds <= 0.0 {
        anyhow::bail!("--seconds must be a positive number");
    }
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    let (mut engine, preset) = args.reverb.build_engine(args.sample_rate)?;
    let frames = (f64::from(args.seconds) * f64::from(args.sample_rate)).round() as usize;
    let mut samples = unit_impulse(frames.max(1));

    println!(
        "Rendering {:.2}s impulse response at {} Hz ({})...",
        args.seconds, args.sample_rate, preset.name
    );
    let pb = frame_progress(samples.len())?;
    render_with_progress(&mut engine, &mut samples, args.block_size, |n| {
        pb.inc(n as u64);
    });
    pb.finish_with_message("done");

    let peak = samples.peak();
    println!("  Peak: {:.1} dB", to_db(peak));
    match decay_time(&samples, peak, args.sample_rate) {
        Some(secs) => println!("  Decay to -60 dB: {secs:.2}s"),
        None => println!("  Tail still above -60 dB at the end of the render"),
    }

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(
        &args.output,
        &samples,
        WavSpec::stereo(args.sample_rate, args.bit_depth),
    )?;
    println!("Done!");

    Ok(())
}

/// A unit impulse on both channels followed by silence.
fn unit_impulse(frames: usize) -> StereoSamples {
    let mut samples = StereoSamples::silence(frames);
    if let (Some(l), Some(r)) = (samples.left.first_mut(), samples.right.first_mut()) {
        *l = 1.0;
        *r = 1.0;
    }
    samples
}

/// Time of the last sample above -60 dB relative to `peak`, or `None` if
/// that sample is the final one (the tail was cut off).
fn decay_time(samples: &StereoSamples, peak: f32, sample_rate: u32) -> Option<f32> {
    let threshold = peak * DECAY_THRESHOLD;
    let last_loud = samples
        .left
        .iter()
        .zip(samples.right.iter())
        .rposition(|(l, r)| l.abs().max(r.abs()) > threshold)?;
    if last_loud + 1 >= samples.len() {
        return None;
    }
    Some(last_loud as f32 / sample_rate as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_shape() {
        let s = unit_impulse(4);
        assert_eq!(s.left, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.right, s.left);
        assert!(unit_impulse(0).is_empty());
    }

    #[test]
    fn decay_time_finds_last_loud_sample() {
        let s = StereoSamples::new(vec![1.0, 0.5, 0.0, 0.0], vec![0.0, 0.0, 0.01, 0.0]);
        assert_eq!(decay_time(&s, 1.0, 2), Some(1.0));
    }

    #[test]
    fn decay_time_cut_off() {
        let s = StereoSamples::new(vec![1.0, 0.5], vec![0.0, 0.5]);
        assert_eq!(decay_time(&s, 1.0, 2), None);
    }
}
