//! Validated end-to-end pipeline: generator → point cloud → cluster tree.
//!
//! [`Simulation::new`] is the one place configuration errors surface. Once
//! built, a simulation is immutable and every query on it is total, so it can
//! be shared freely between readers.

use alloc::vec::Vec;

use crate::cloud::{generate, Point, PointId};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::frontier::{FrontierSnapshot, PathRelevance};
use crate::tree::{ClusterNode, ClusterTree};

/// A generated point cloud and the cluster tree built over it.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    tree: ClusterTree,
}

impl Simulation {
    /// Validate `config`, generate the cloud and build the tree.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let points = generate(config.point_count, config.seed);
        let tree = ClusterTree::build_with(&points, &config.build_config());
        tracing::info!(
            points = config.point_count,
            seed = config.seed,
            nodes = tree.len(),
            leaves = tree.leaves().count(),
            "simulation ready"
        );
        Ok(Self { config, tree })
    }

    /// Configuration this simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The cluster tree.
    pub fn tree(&self) -> &ClusterTree {
        &self.tree
    }

    /// Clustered points, paths set.
    pub fn points(&self) -> &[Point] {
        self.tree.points()
    }

    /// Nodes at depth `d`.
    pub fn depth_slice(&self, d: usize) -> Vec<&ClusterNode> {
        self.tree.nodes_at_depth(d)
    }

    /// Route of a point through the configured depth range; `None` for an
    /// unknown id.
    pub fn centroid_path_of(&self, id: PointId) -> Option<Vec<Option<(f64, f64)>>> {
        let point = self.tree.point(id)?;
        Some(self.tree.centroid_path(point, self.config.max_depth))
    }

    /// Frontier evolution towards `query`, also opening routes to `related`.
    ///
    /// Uses the capacity-bounded ranked policy: the query route outranks the
    /// related routes, and the window never grows past the configured
    /// capacity. Unknown related ids are skipped; an unknown query id yields
    /// `None`.
    pub fn frontier_for(&self, query: PointId, related: &[PointId]) -> Option<Vec<FrontierSnapshot>> {
        let query = self.tree.point(query)?;
        let related: Vec<&Point> = related.iter().filter_map(|&id| self.tree.point(id)).collect();
        let relevance = PathRelevance::new(&self.tree, query, &related);
        // every recorded step expands at least one internal node
        let max_steps = self.tree.len();
        Some(
            self.config
                .frontier()
                .run_ranked(&self.tree, |n| relevance.score(n), max_steps),
        )
    }
}
