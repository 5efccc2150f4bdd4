//! Configuration errors.
//!
//! The simulator favours total functions: empty inputs, degenerate geometry and
//! exhausted trees all have defined fallback results. The only failures a
//! caller ever sees are rejected configurations at the [`crate::Simulation`]
//! entry point.

/// Errors raised when validating a [`crate::config::SimulationConfig`].
///
/// A relevance predicate that is not a pure function of its inputs is also a
/// caller error, but it cannot be detected at runtime and therefore has no
/// variant here. See [`crate::frontier::Relevance`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The point cloud must contain at least one point.
    #[error("point count must be positive, got {0}")]
    NonPositivePointCount(usize),

    /// Clustering needs at least one level.
    #[error("maximum clustering depth must be positive, got {0}")]
    NonPositiveDepth(usize),

    /// The frontier window must hold both roots of the forest.
    #[error("frontier capacity must be at least 2, got {0}")]
    CapacityTooSmall(usize),

    /// Expansion fraction outside `(0.0, 1.0]` (or NaN).
    #[error("expansion fraction must lie in (0, 1], got {0}")]
    InvalidExpansionFraction(f64),

    /// k-means refinement needs at least one iteration.
    #[error("refinement iteration count must be positive, got {0}")]
    NonPositiveIterations(usize),
}

impl ConfigError {
    /// Name of the configuration field that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositivePointCount(_) => "point_count",
            Self::NonPositiveDepth(_) => "max_depth",
            Self::CapacityTooSmall(_) => "frontier_capacity",
            Self::InvalidExpansionFraction(_) => "expansion_fraction",
            Self::NonPositiveIterations(_) => "iterations",
        }
    }
}
