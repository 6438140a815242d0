use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use zcsync::config::ResampleFactor;
use zcsync::save_capture;
use zcsync::simulation::{NoiseConfig, PilotPlacement, apply_noise, generate_capture, real_part};
use zcsync::wav::save_real_capture;

#[derive(Parser, Debug)]
#[command(name = "generate_capture")]
#[command(about = "Generate synthetic WAV captures containing a Zadoff-Chu pilot")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Pilot offsets: comma-separated (e.g., "100,2500") or range (e.g., "0-9000:1000")
    #[arg(long, default_value = "1000")]
    offsets: String,

    /// Number of trials per offset
    #[arg(short, long, default_value_t = 1)]
    trials: u32,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Zadoff-Chu root index
    #[arg(short = 'r', long, default_value_t = 5)]
    root: u32,

    /// Zadoff-Chu length before resampling
    #[arg(short = 'l', long, default_value_t = 353)]
    length: usize,

    /// Pilot-to-capture rate ratio (e.g., "2", "17/10")
    #[arg(long, default_value = "1")]
    resample: ResampleFactor,

    /// Capture length in samples
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Pilot amplitude
    #[arg(long, default_value_t = 1.0)]
    amplitude: f32,

    /// Sample rate written to the WAV header
    #[arg(long, default_value_t = 1_000_000)]
    sample_rate: u32,

    /// Write the in-phase component only (mono file)
    #[arg(long)]
    real: bool,

    /// Output filename prefix
    #[arg(long, default_value = "zc")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f32>,

    /// Carrier frequency offset in cycles per sample (CLI override)
    #[arg(long)]
    cfo: Option<f32>,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    offset: usize,
    trial: u32,
    seed: u64,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    zc_root: u32,
    zc_length: usize,
    resample: f64,
    samples: usize,
    sample_rate: u32,
    files: Vec<ManifestEntry>,
}

fn parse_offsets(s: &str) -> Result<Vec<usize>> {
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let step: usize = parts[1].parse().context("Invalid step value")?;
        if step == 0 {
            anyhow::bail!("Range step must be positive");
        }
        let range_parts: Vec<&str> = parts[0].split('-').collect();
        if range_parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let start: usize = range_parts[0].parse().context("Invalid start value")?;
        let end: usize = range_parts[1].parse().context("Invalid end value")?;

        Ok((start..=end).step_by(step).collect())
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<usize>().context("Invalid offset value"))
            .collect()
    }
}

fn load_noise_config(path: &Path) -> Result<NoiseConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(base: &NoiseConfig, args: &Args, seed: u64) -> NoiseConfig {
    let mut config = base.clone().with_seed(seed);

    if let Some(snr) = args.snr {
        config = config.with_awgn(snr);
    }
    if let Some(cfo) = args.cfo {
        let phase = config.carrier.as_ref().map_or(0.0, |c| c.phase_radians);
        config = config.with_carrier_offset(phase, cfo);
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let base_noise = match args.config {
        Some(ref path) => load_noise_config(path)?,
        None => NoiseConfig::default(),
    };

    let offsets = parse_offsets(&args.offsets)?;
    let base_seed = args.seed.unwrap_or(0);

    let mut manifest_entries = Vec::new();
    let total_files = offsets.len() * args.trials as usize;
    let mut file_count = 0;

    for &offset in &offsets {
        let placement = PilotPlacement::new(args.root, args.length, offset, args.samples)
            .with_resample(args.resample.as_f64())
            .with_amplitude(args.amplitude);
        if offset + placement.resampled_pilot().len() > args.samples {
            log::warn!("Pilot at offset {} is truncated by the capture end", offset);
        }
        let clean = generate_capture(&placement);

        for trial in 0..args.trials {
            let seed = base_seed + trial as u64 * 1_000_003 + offset as u64;
            let noise_config = build_noise_config(&base_noise, &args, seed);
            let capture = apply_noise(&clean, &noise_config, placement.pilot_power());

            let filename = format!("{}_o{:06}_t{:02}.wav", args.prefix, offset, trial);
            let filepath = args.output_dir.join(&filename);

            let written = if args.real {
                save_real_capture(&filepath, &real_part(&capture), args.sample_rate)
            } else {
                save_capture(&filepath, &capture, args.sample_rate)
            };
            written.with_context(|| format!("Failed to write {}", filepath.display()))?;

            manifest_entries.push(ManifestEntry {
                file: filename,
                offset,
                trial,
                seed,
            });

            file_count += 1;
            eprint!("\rGenerating: {}/{}", file_count, total_files);
        }
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            zc_root: args.root,
            zc_length: args.length,
            resample: args.resample.as_f64(),
            samples: args.samples,
            sample_rate: args.sample_rate,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        total_files,
        args.output_dir.display()
    );
    Ok(())
}
