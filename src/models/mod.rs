//! Scoring model components

pub mod heuristic;
pub mod noise;

pub use heuristic::{HeuristicModel, FEATURE_NAMES};
pub use noise::{GaussianNoise, NoiseSource};
