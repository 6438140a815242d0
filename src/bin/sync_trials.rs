use clap::Parser;
use zcsync::Synchroniser;
use zcsync::config::ResampleFactor;
use zcsync::simulation::{MultipathComponent, NoiseConfig, TrialConfig, TrialStats, run_trials};
use zcsync::sync::NullObserver;

#[derive(Parser, Debug)]
#[command(name = "sync_trials")]
#[command(about = "Sweep channel impairments and report synchronisation accuracy as CSV")]
struct Args {
    /// Zadoff-Chu root index
    #[arg(short = 'r', long, default_value_t = 5)]
    root: u32,

    /// Zadoff-Chu length before resampling
    #[arg(short = 'l', long, default_value_t = 353)]
    length: usize,

    /// Pilot-to-capture rate ratio
    #[arg(long, default_value = "1")]
    resample: ResampleFactor,

    /// Capture length in samples
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// Trials per sweep point
    #[arg(short, long, default_value_t = 50)]
    trials: usize,

    /// Correlate raw samples instead of magnitudes
    #[arg(long)]
    no_abs: bool,

    /// Base seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

fn print_row(noise_type: &str, parameter: f32, stats: &TrialStats) {
    println!(
        "{},{},{:.3},{:.3},{},{},{},{:.2}",
        noise_type,
        parameter,
        stats.exact_rate(),
        stats.within_one_rate(),
        stats.ambiguous,
        stats.failed,
        stats.max_abs_error,
        stats.mean_abs_error
    );
}

fn run_sweeps(config: &TrialConfig) {
    let synchroniser = Synchroniser::default().with_observer(NullObserver);

    println!("noise_type,parameter,exact,within_one,ambiguous,failed,max_error,mean_error");

    // SNR sweep
    for snr_db in (-10..=20).step_by(2) {
        let snr = snr_db as f32;
        let noise = NoiseConfig::default().with_awgn(snr);
        print_row("awgn", snr, &run_trials(&synchroniser, config, &noise));
    }

    // Carrier frequency offset sweep, in units of 1e-4 cycles per sample
    for cfo_idx in 0..=20 {
        let cfo = cfo_idx as f32 * 1e-4;
        let noise = NoiseConfig::default()
            .with_awgn(10.0)
            .with_carrier_offset(0.0, cfo);
        print_row("cfo", cfo, &run_trials(&synchroniser, config, &noise));
    }

    // Multipath delay sweep
    for delay in (0..=40).step_by(4) {
        let mut noise = NoiseConfig::default().with_awgn(10.0);
        if delay > 0 {
            noise = noise.with_multipath(vec![MultipathComponent {
                delay_samples: delay,
                amplitude: 0.5,
                phase_offset: 0.0,
            }]);
        }
        print_row(
            "multipath",
            delay as f32,
            &run_trials(&synchroniser, config, &noise),
        );
    }

    // Impulse rate sweep, bursts per 10k samples
    for rate in (0..=50).step_by(5) {
        let mut noise = NoiseConfig::default().with_awgn(10.0);
        if rate > 0 {
            noise = noise.with_impulse(rate as f32 / 10_000.0, 3.0, 5);
        }
        print_row(
            "impulse",
            rate as f32,
            &run_trials(&synchroniser, config, &noise),
        );
    }
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = TrialConfig::new(args.root, args.length, args.samples, args.trials);
    config.resample = args.resample.as_f64();
    config.use_abs = !args.no_abs;
    config.seed = args.seed;

    run_sweeps(&config);
}
