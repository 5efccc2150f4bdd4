//! Simulation configuration.
//!
//! Defaults are the illustrative values the visualisations use: 2000 points,
//! seed 12345, six clustering levels, a 16-node frontier window and a 25%
//! expansion share.

use crate::error::ConfigError;
use crate::frontier::{FrontierSimulator, DEFAULT_CAPACITY, DEFAULT_EXPANSION_FRACTION, MIN_CAPACITY};
use crate::tree::builder::{BuildConfig, DEFAULT_ITERATIONS, DEFAULT_MAX_DEPTH};

/// Default point cloud size.
pub const DEFAULT_POINT_COUNT: usize = 2000;

/// Default generator seed.
pub const DEFAULT_SEED: i64 = 12_345;

/// Everything needed to reproduce one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of synthetic points.  Default: 2000.
    pub point_count: usize,
    /// Generator seed.  Default: 12345.
    pub seed: i64,
    /// Number of clustering levels.  Default: 6.
    pub max_depth: usize,
    /// k-means refinement rounds per bisection.  Default: 12.
    pub iterations: usize,
    /// Frontier window size, at least 2.  Default: 16.
    pub frontier_capacity: usize,
    /// Share of the active set a ranked step may expand.  Default: 0.25.
    pub expansion_fraction: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            seed: DEFAULT_SEED,
            max_depth: DEFAULT_MAX_DEPTH,
            iterations: DEFAULT_ITERATIONS,
            frontier_capacity: DEFAULT_CAPACITY,
            expansion_fraction: DEFAULT_EXPANSION_FRACTION,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the simulator cannot honour.
    ///
    /// Checks run in field order; the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.point_count == 0 {
            return Err(ConfigError::NonPositivePointCount(self.point_count));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::NonPositiveDepth(self.max_depth));
        }
        if self.iterations == 0 {
            return Err(ConfigError::NonPositiveIterations(self.iterations));
        }
        if self.frontier_capacity < MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall(self.frontier_capacity));
        }
        if !(self.expansion_fraction > 0.0 && self.expansion_fraction <= 1.0) {
            return Err(ConfigError::InvalidExpansionFraction(self.expansion_fraction));
        }
        Ok(())
    }

    /// Clustering half of the configuration.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            max_depth: self.max_depth,
            iterations: self.iterations,
        }
    }

    /// Frontier half of the configuration.
    pub fn frontier(&self) -> FrontierSimulator {
        FrontierSimulator::new(self.frontier_capacity, self.expansion_fraction)
    }
}
