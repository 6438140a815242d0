use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use zcsync::config::{EnvelopeWindow, ResampleFactor, SyncConfig, SyncParams};
use zcsync::output::{OutputFormat, SyncReport, create_formatter};
use zcsync::{Synchroniser, load_capture};

#[derive(Parser, Debug)]
#[command(name = "zcsync")]
#[command(about = "Locate a Zadoff-Chu pilot in WAV captures (mono = real, stereo = I/Q)", long_about = None)]
struct Args {
    /// WAV captures to synchronise
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Zadoff-Chu root index
    #[arg(short = 'r', long)]
    root: u32,

    /// Zadoff-Chu length before resampling
    #[arg(short = 'l', long)]
    length: usize,

    /// Pilot-to-capture rate ratio (e.g., "2", "1.7", "17/10")
    #[arg(long, default_value = "1")]
    resample: ResampleFactor,

    /// Correlate raw samples instead of magnitudes (needs phase-coherent data)
    #[arg(long)]
    no_abs: bool,

    /// Capture length divisor for the signal-fraction envelope window
    #[arg(long, default_value_t = 50)]
    ratio_approx: usize,

    /// Envelope window sizing rule (overrides the config file)
    #[arg(long, value_enum)]
    window_mode: Option<EnvelopeWindow>,

    /// Minimum correlation peak-to-mean ratio (overrides the config file)
    #[arg(long)]
    min_peak_to_mean: Option<f32>,

    /// Treat ambiguous detections as errors
    #[arg(long)]
    reject_ambiguous: bool,

    /// TOML synchroniser configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let params = SyncParams::new(args.root, args.length)
        .with_resample(args.resample.as_f64())
        .with_use_abs(!args.no_abs)
        .with_ratio_approx(args.ratio_approx);

    log::info!(
        "Pilot: root {}, length {}, resample {}, {} correlation",
        params.zc_root,
        params.zc_length,
        args.resample,
        if params.use_abs { "magnitude" } else { "coherent" }
    );

    let synchroniser = Synchroniser::new(config);
    let formatter = create_formatter(args.format, args.verbose > 0);

    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut failures = 0;
    for path in &args.files {
        let report = synchronise_file(path, &synchroniser, &params);
        if report.error.is_some() {
            failures += 1;
        }
        println!("{}", formatter.format(&report));
    }

    if failures > 0 {
        anyhow::bail!("{} of {} captures failed", failures, args.files.len());
    }
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<SyncConfig> {
    let mut config = match args.config {
        Some(ref path) => SyncConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SyncConfig::default(),
    };

    if let Some(mode) = args.window_mode {
        config.envelope.window = mode;
    }
    if let Some(min) = args.min_peak_to_mean {
        config.ambiguity.min_peak_to_mean = min;
    }
    if args.reject_ambiguous {
        config.ambiguity.reject = true;
    }

    config.validate()?;
    Ok(config)
}

fn synchronise_file(path: &Path, synchroniser: &Synchroniser, params: &SyncParams) -> SyncReport {
    let source = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = load_capture(path).and_then(|capture| {
        log::debug!(
            "Loaded {} samples at {} Hz from {}",
            capture.len(),
            capture.sample_rate(),
            path.display()
        );
        let result = capture.synchronise(synchroniser, params);
        result.map(|r| (capture.len(), r))
    });

    match outcome {
        Ok((sample_count, result)) => SyncReport {
            source,
            sample_count,
            result: Some(result),
            error: None,
        },
        Err(e) => SyncReport {
            source,
            sample_count: 0,
            result: None,
            error: Some(e.to_string()),
        },
    }
}
