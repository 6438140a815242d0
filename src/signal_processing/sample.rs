use num_complex::Complex32;

/// A capture sample: real baseband or complex I/Q
///
/// The synchroniser only needs a sample's magnitude (envelope and
/// phase-agnostic correlation) and its complex value (coherent correlation).
pub trait Sample: Copy + Send + Sync {
    fn magnitude(self) -> f32;

    fn to_complex(self) -> Complex32;
}

impl Sample for f32 {
    fn magnitude(self) -> f32 {
        self.abs()
    }

    fn to_complex(self) -> Complex32 {
        Complex32::new(self, 0.0)
    }
}

impl Sample for Complex32 {
    fn magnitude(self) -> f32 {
        self.norm()
    }

    fn to_complex(self) -> Complex32 {
        self
    }
}

/// Magnitude of every sample
pub fn magnitudes<S: Sample>(samples: &[S]) -> Vec<f32> {
    samples.iter().map(|&s| s.magnitude()).collect()
}
