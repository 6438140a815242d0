use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use num_complex::Complex32;

use crate::config::SyncParams;
use crate::error::{Result, SyncError};
use crate::sync::{SyncResult, Synchroniser};

/// Samples of a recorded capture
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    /// Mono file: real-valued samples
    Real { sample_rate: u32, samples: Vec<f32> },
    /// Stereo file: left = I, right = Q
    Complex {
        sample_rate: u32,
        samples: Vec<Complex32>,
    },
}

impl Capture {
    pub fn sample_rate(&self) -> u32 {
        match self {
            Capture::Real { sample_rate, .. } | Capture::Complex { sample_rate, .. } => *sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Capture::Real { samples, .. } => samples.len(),
            Capture::Complex { samples, .. } => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `synchroniser` on the capture's samples
    pub fn synchronise(&self, synchroniser: &Synchroniser, params: &SyncParams) -> Result<SyncResult> {
        match self {
            Capture::Real { samples, .. } => synchroniser.synchronise(samples, params),
            Capture::Complex { samples, .. } => synchroniser.synchronise(samples, params),
        }
    }
}

/// Load a mono (real) or stereo (I/Q) WAV capture
///
/// Integer formats are scaled to [-1, 1).
pub fn load_capture<P: AsRef<Path>>(path: P) -> Result<Capture> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let samples = read_samples(reader, &spec)?;

    match spec.channels {
        1 => Ok(Capture::Real {
            sample_rate: spec.sample_rate,
            samples,
        }),
        2 => Ok(Capture::Complex {
            sample_rate: spec.sample_rate,
            samples: samples
                .chunks_exact(2)
                .map(|iq| Complex32::new(iq[0], iq[1]))
                .collect(),
        }),
        n => Err(SyncError::UnsupportedCapture(format!(
            "expected mono or stereo WAV file, got {} channels",
            n
        ))),
    }
}

fn read_samples(mut reader: WavReader<BufReader<File>>, spec: &WavSpec) -> Result<Vec<f32>> {
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Save a complex capture as a 32-bit float stereo (I/Q) WAV file
pub fn save_capture<P: AsRef<Path>>(path: P, samples: &[Complex32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for s in samples {
        writer.write_sample(s.re)?;
        writer.write_sample(s.im)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Save a real capture as a 32-bit float mono WAV file
pub fn save_real_capture<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}
