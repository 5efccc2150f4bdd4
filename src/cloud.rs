//! Synthetic 2D point cloud with weak radial and angular structure.
//!
//! Points are placed on a noisy annulus around the origin. The radius is
//! modulated by a three-lobed angular term so the cloud is not rotationally
//! uniform, and roughly 30% of points receive a small secondary offset that
//! forms loose local clumps. The structure is deliberately weak: the
//! clusterer built on top still has to do real partitioning work.
//!
//! Every draw comes from [`SeededSequence`], and the trigonometry goes through
//! `libm`, so `generate(count, seed)` is bit-identical across runs and targets.

use alloc::vec::Vec;

use crate::sequence::SeededSequence;

/// Stable identifier of a point. `generate` assigns `0..count`.
pub type PointId = u32;

/// Mean annulus radius.
const BASE_RADIUS: f64 = 1.0;

/// Radial noise half-width around the modulated radius.
const RADIAL_JITTER: f64 = 0.25;

/// Amplitude of the three-lobed angular modulation.
const LOBE_AMPLITUDE: f64 = 0.15;

/// Probability that a point receives a clumping offset.
const CLUMP_PROBABILITY: f64 = 0.3;

/// Maximum clumping offset along each axis.
const CLUMP_SPREAD: f64 = 0.12;

/// A 2D point with its clustering route.
///
/// `path[d]` is the partition index (0 or 1) the point fell into at depth `d`.
/// Freshly generated points have an empty path; [`crate::tree::ClusterTree`]
/// returns copies with the route filled in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Stable identifier.
    pub id: PointId,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Per-depth partition choices, root first.
    pub path: Vec<u8>,
}

impl Point {
    /// Unclustered point (empty path).
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self { id, x, y, path: Vec::new() }
    }

    /// `(x, y)` as a tuple.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Squared Euclidean distance to a coordinate pair.
    pub fn distance_sq(&self, to: (f64, f64)) -> f64 {
        let dx = self.x - to.0;
        let dy = self.y - to.1;
        dx * dx + dy * dy
    }
}

/// Generate `count` points from `seed`.
///
/// Ids are sequential `0..count`, paths are empty. `count == 0` yields an
/// empty vector.
pub fn generate(count: usize, seed: i64) -> Vec<Point> {
    let mut rng = SeededSequence::new(seed);
    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        let angle = rng.next() * core::f64::consts::TAU;
        let lobe = LOBE_AMPLITUDE * libm::sin(3.0 * angle);
        let radius = BASE_RADIUS + lobe + rng.next_range(-RADIAL_JITTER, RADIAL_JITTER);

        let mut x = radius * libm::cos(angle);
        let mut y = radius * libm::sin(angle);

        if rng.next() < CLUMP_PROBABILITY {
            x += rng.next_range(-CLUMP_SPREAD, CLUMP_SPREAD);
            y += rng.next_range(-CLUMP_SPREAD, CLUMP_SPREAD);
        }

        points.push(Point::new(i as PointId, x, y));
    }

    tracing::debug!(count, seed, "generated point cloud");
    points
}
