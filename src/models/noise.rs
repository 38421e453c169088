//! Noise sources for the heuristic model

use rand_distr::{Distribution, StandardNormal};

/// Source of the random perturbation added to heuristic scores.
///
/// Production uses Gaussian noise; tests substitute deterministic values.
pub trait NoiseSource: Send + Sync {
    /// Draw one noise sample.
    fn sample(&self) -> f64;
}

/// Zero-mean Gaussian noise.
pub struct GaussianNoise {
    std_dev: f64,
}

impl GaussianNoise {
    /// Create a source with the given standard deviation.
    pub fn new(std_dev: f64) -> Self {
        Self { std_dev }
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&self) -> f64 {
        let unit: f64 = StandardNormal.sample(&mut rand::thread_rng());
        self.std_dev * unit
    }
}
