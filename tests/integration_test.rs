mod test_signals;

use zcsync::config::{EnvelopeWindow, SyncConfig, SyncParams};
use zcsync::signal_processing::resampled_len;
use zcsync::sync::NullObserver;
use zcsync::{Capture, SyncError, Synchroniser, load_capture, save_capture, synchronise};

use test_signals::{capture_with_pilot, real_part};

const ROOT: u32 = 25;
const LENGTH: usize = 63;

#[test]
fn test_exact_recovery_across_resample_factors() {
    for resample in [1.0f64, 0.5, 2.0, 1.7] {
        let n = resampled_len(LENGTH, resample);
        let capture_len = 10 * n;

        for use_abs in [true, false] {
            for offset in [n, 3 * n, 5 * n + 7] {
                let signal = capture_with_pilot(ROOT, LENGTH, resample, offset, capture_len);
                let params = SyncParams::new(ROOT, LENGTH)
                    .with_resample(resample)
                    .with_use_abs(use_abs);

                let result = synchronise(&signal, &params).unwrap();
                assert_eq!(
                    result.bounds(),
                    (offset as isize, (offset + n) as isize),
                    "resample {}, use_abs {}, offset {}",
                    resample,
                    use_abs,
                    offset
                );
                assert!(!result.ambiguous);
            }
        }
    }
}

#[test]
fn test_span_matches_pilot_length() {
    for resample in [0.5f64, 1.0, 1.3, 2.0, 3.25] {
        let n = resampled_len(LENGTH, resample);
        let signal = capture_with_pilot(ROOT, LENGTH, resample, 2 * n, 8 * n);
        let params = SyncParams::new(ROOT, LENGTH).with_resample(resample);

        let result = synchronise(&signal, &params).unwrap();
        assert_eq!(result.pilot_len, n);
        assert_eq!(result.end - result.beginning, n as isize);
    }
}

#[test]
fn test_pilot_at_capture_start() {
    for use_abs in [true, false] {
        let signal = capture_with_pilot(ROOT, LENGTH, 1.0, 0, 8 * LENGTH);
        let params = SyncParams::new(ROOT, LENGTH).with_use_abs(use_abs);

        let result = synchronise(&signal, &params).unwrap();
        assert_eq!(result.bounds(), (0, LENGTH as isize));
        assert_eq!(result.search_window.start, 0);
    }
}

#[test]
fn test_pilot_at_capture_end() {
    let capture_len = 8 * LENGTH;
    let offset = capture_len - LENGTH;

    for use_abs in [true, false] {
        let signal = capture_with_pilot(ROOT, LENGTH, 1.0, offset, capture_len);
        let params = SyncParams::new(ROOT, LENGTH).with_use_abs(use_abs);

        let result = synchronise(&signal, &params).unwrap();
        assert_eq!(result.bounds(), (offset as isize, capture_len as isize));
        assert_eq!(result.search_window.end, capture_len);
    }
}

#[test]
fn test_detection_scales_with_resample() {
    let base_offset = 150;
    let base_len = 600;

    for factor in [1usize, 2, 3] {
        let resample = factor as f64;
        let signal = capture_with_pilot(
            ROOT,
            LENGTH,
            resample,
            base_offset * factor,
            base_len * factor,
        );
        let params = SyncParams::new(ROOT, LENGTH).with_resample(resample);

        let result = synchronise(&signal, &params).unwrap();
        assert_eq!(result.beginning, (base_offset * factor) as isize);
        assert_eq!(result.end, ((base_offset + LENGTH) * factor) as isize);
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let signal = capture_with_pilot(ROOT, LENGTH, 1.0, 100, 500);

    let cases = [
        (SyncParams::new(ROOT, 0), "zc_length"),
        (SyncParams::new(ROOT, LENGTH).with_resample(0.0), "resample"),
        (SyncParams::new(ROOT, LENGTH).with_resample(-1.0), "resample"),
        (SyncParams::new(ROOT, LENGTH).with_resample(f64::NAN), "resample"),
    ];
    for (params, expected) in cases {
        match synchronise(&signal, &params) {
            Err(SyncError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected invalid {}, got {:?}", expected, other),
        }
    }

    let empty: Vec<num_complex::Complex32> = Vec::new();
    match synchronise(&empty, &SyncParams::new(ROOT, LENGTH)) {
        Err(SyncError::InvalidParameter { name, .. }) => assert_eq!(name, "signal"),
        other => panic!("expected invalid signal, got {:?}", other),
    }
}

#[test]
fn test_results_are_deterministic() {
    let signal = test_signals::noisy_capture_with_pilot(ROOT, LENGTH, 321, 2000, 3.0, 9);
    let params = SyncParams::new(ROOT, LENGTH).with_use_abs(false);

    let first = synchronise(&signal, &params).unwrap();
    for _ in 0..5 {
        assert_eq!(synchronise(&signal, &params).unwrap(), first);
    }
}

#[test]
fn test_real_capture() {
    let offset = 250;
    let signal = real_part(&capture_with_pilot(ROOT, LENGTH, 1.0, offset, 1000));
    let params = SyncParams::new(ROOT, LENGTH);

    let result = synchronise(&signal, &params).unwrap();
    assert_eq!(result.beginning, offset as isize);
}

#[test]
fn test_signal_fraction_window() {
    let capture_len = 5000;
    let offset = 1234;
    let signal = capture_with_pilot(ROOT, LENGTH, 1.0, offset, capture_len);

    let mut config = SyncConfig::default();
    config.envelope.window = EnvelopeWindow::SignalFraction;
    let synchroniser = Synchroniser::new(config).with_observer(NullObserver);
    let params = SyncParams::new(ROOT, LENGTH).with_ratio_approx(50);

    let result = synchroniser.synchronise(&signal, &params).unwrap();
    assert_eq!(result.envelope_window, 100);
    assert_eq!(result.beginning, offset as isize);

    let zero_ratio = SyncParams::new(ROOT, LENGTH).with_ratio_approx(0);
    assert!(matches!(
        synchroniser.synchronise(&signal, &zero_ratio),
        Err(SyncError::InvalidParameter {
            name: "ratio_approx",
            ..
        })
    ));
}

#[test]
fn test_signal_fraction_window_on_long_capture() {
    let mut config = SyncConfig::default();
    config.envelope.window = EnvelopeWindow::SignalFraction;
    let synchroniser = Synchroniser::new(config).with_observer(NullObserver);
    let params = SyncParams::new(ROOT, LENGTH);

    for (capture_len, offset) in [(10_000, 4321), (100_000, 40_000), (200_000, 123_456)] {
        let signal = capture_with_pilot(ROOT, LENGTH, 1.0, offset, capture_len);

        let result = synchroniser.synchronise(&signal, &params).unwrap();
        assert_eq!(result.envelope_window, capture_len / 50);
        assert_eq!(
            result.bounds(),
            (offset as isize, (offset + LENGTH) as isize),
            "capture_len {}",
            capture_len
        );
    }
}

#[test]
fn test_signal_fraction_window_covering_whole_capture() {
    let mut config = SyncConfig::default();
    config.envelope.window = EnvelopeWindow::SignalFraction;
    let synchroniser = Synchroniser::new(config).with_observer(NullObserver);

    for ratio_approx in [1, 2, 3] {
        for offset in [100, 600] {
            let signal = capture_with_pilot(ROOT, LENGTH, 1.0, offset, 1000);
            let params = SyncParams::new(ROOT, LENGTH).with_ratio_approx(ratio_approx);

            let result = synchroniser.synchronise(&signal, &params).unwrap();
            assert_eq!(
                result.beginning, offset as isize,
                "ratio_approx {}, offset {}",
                ratio_approx, offset
            );
        }
    }
}

#[test]
fn test_config_file_drives_synchroniser() {
    let config = SyncConfig::from_toml_str(
        r#"
        [correlation]
        search_span = 3

        [ambiguity]
        min_peak_to_mean = 100.0
        reject = true
        "#,
    )
    .unwrap();
    assert_eq!(config.correlation.search_span, 3);
    assert_eq!(config.ambiguity.min_peak_to_mean, 100.0);
    assert!(config.ambiguity.reject);

    let signal = capture_with_pilot(ROOT, LENGTH, 1.0, 400, 2000);
    let synchroniser = Synchroniser::new(config).with_observer(NullObserver);
    assert!(matches!(
        synchroniser.synchronise(&signal, &SyncParams::new(ROOT, LENGTH)),
        Err(SyncError::AmbiguousResult { .. })
    ));
}

#[test]
fn test_wav_capture_round_trip() {
    let offset = 777;
    let samples = capture_with_pilot(ROOT, LENGTH, 2.0, offset, 3000);
    let path = std::env::temp_dir().join(format!("zcsync_integration_{}.wav", std::process::id()));

    save_capture(&path, &samples, 2_000_000).unwrap();
    let capture = load_capture(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(matches!(capture, Capture::Complex { .. }));
    assert_eq!(capture.len(), 3000);

    let synchroniser = Synchroniser::default().with_observer(NullObserver);
    let params = SyncParams::new(ROOT, LENGTH).with_resample(2.0);
    let result = capture.synchronise(&synchroniser, &params).unwrap();
    assert_eq!(result.bounds(), (offset as isize, (offset + 126) as isize));
}
