//! Python FFI bindings via PyO3.
//!
//! Exposes a built simulation to Python-side renderers: points with their
//! routes, depth slices, centroid trails, hull outlines and frontier
//! snapshots. Node and point handles cross the boundary as plain integers.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from frontier_core import Simulation
//!
//! sim = Simulation(point_count=2000, seed=12345, max_depth=6)
//! for node_id, depth, centroid, members in sim.nodes_at_depth(2):
//!     print(node_id, centroid, len(members))
//! trail = sim.centroid_path(42)          # [(x, y) | None] per depth
//! for depth, active, expanded, retained in sim.frontier(42, [7, 99]):
//!     print(depth, len(active))
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::geometry::{member_hull, normalize, smooth_polygon, Bounds};
use crate::simulation::Simulation as RustSimulation;
use crate::tree::{ClusterNode, NodeId};

type PyNode = (u32, usize, (f64, f64), Vec<u32>);
type PyFrontier = (usize, Vec<u32>, Vec<u32>, Vec<u32>);

fn node_tuple(n: &ClusterNode) -> PyNode {
    (n.id.0, n.depth, n.centroid, n.members.clone())
}

fn ids(v: &[NodeId]) -> Vec<u32> {
    v.iter().map(|id| id.0).collect()
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Deterministic point cloud, cluster tree and frontier simulator.
#[pyclass(name = "Simulation", frozen)]
pub struct PySimulation {
    inner: RustSimulation,
}

impl PySimulation {
    fn node(&self, node_id: u32) -> PyResult<&ClusterNode> {
        self.inner
            .tree()
            .get(NodeId(node_id))
            .ok_or_else(|| PyKeyError::new_err(format!("unknown node id {node_id}")))
    }
}

#[pymethods]
impl PySimulation {
    /// Generate the cloud and build the tree.
    ///
    /// Raises ValueError for a non-positive count, depth, capacity or
    /// iteration count, or an expansion fraction outside (0, 1].
    #[new]
    #[pyo3(signature = (
        point_count=2000,
        seed=12345,
        max_depth=6,
        frontier_capacity=16,
        expansion_fraction=0.25,
        iterations=12
    ))]
    pub fn new(
        point_count: usize,
        seed: i64,
        max_depth: usize,
        frontier_capacity: usize,
        expansion_fraction: f64,
        iterations: usize,
    ) -> PyResult<Self> {
        let config = SimulationConfig {
            point_count,
            seed,
            max_depth,
            iterations,
            frontier_capacity,
            expansion_fraction,
        };
        RustSimulation::new(config)
            .map(|inner| Self { inner })
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// All points as `(id, x, y, path)`.
    pub fn points(&self) -> Vec<(u32, f64, f64, Vec<u8>)> {
        self.inner
            .points()
            .iter()
            .map(|p| (p.id, p.x, p.y, p.path.clone()))
            .collect()
    }

    /// Points min-max scaled into the unit square, as `(id, x, y)`.
    pub fn normalized_points(&self) -> Vec<(u32, f64, f64)> {
        let pts = self.inner.points();
        match Bounds::of(pts) {
            Some(b) => normalize(pts, &b).iter().map(|p| (p.id, p.x, p.y)).collect(),
            None => Vec::new(),
        }
    }

    /// Nodes at `depth` as `(node_id, depth, (cx, cy), members)`.
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<PyNode> {
        self.inner.depth_slice(depth).into_iter().map(node_tuple).collect()
    }

    /// Centroid trail of a point, one entry per depth (None past its leaf).
    pub fn centroid_path(&self, point_id: u32) -> PyResult<Vec<Option<(f64, f64)>>> {
        self.inner
            .centroid_path_of(point_id)
            .ok_or_else(|| PyKeyError::new_err(format!("unknown point id {point_id}")))
    }

    /// Whether a point is routed through a node as far as `depth`.
    pub fn is_on_path(&self, node_id: u32, point_id: u32, depth: usize) -> PyResult<bool> {
        let node = self.node(node_id)?;
        let point = self
            .inner
            .tree()
            .point(point_id)
            .ok_or_else(|| PyKeyError::new_err(format!("unknown point id {point_id}")))?;
        Ok(self.inner.tree().is_on_path(node, point, depth))
    }

    /// Smoothed convex outline of a node's members.
    #[pyo3(signature = (node_id, tension=crate::geometry::DEFAULT_TENSION))]
    pub fn hull(&self, node_id: u32, tension: f64) -> PyResult<Vec<(f64, f64)>> {
        let node = self.node(node_id)?;
        let tree = self.inner.tree();
        let outline = member_hull(node.members.iter().filter_map(|&m| tree.point(m)));
        Ok(smooth_polygon(&outline, tension))
    }

    /// Frontier evolution towards `query` as `(depth, active, expanded, retained)`.
    #[pyo3(signature = (query, related=Vec::new()))]
    pub fn frontier(&self, query: u32, related: Vec<u32>) -> PyResult<Vec<PyFrontier>> {
        let snaps = self
            .inner
            .frontier_for(query, &related)
            .ok_or_else(|| PyKeyError::new_err(format!("unknown point id {query}")))?;
        Ok(snaps
            .iter()
            .map(|s| (s.depth, ids(&s.active), ids(&s.expanded), ids(&s.retained)))
            .collect())
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let c = self.inner.config();
        format!(
            "Simulation(point_count={}, seed={}, max_depth={}, nodes={})",
            c.point_count,
            c.seed,
            c.max_depth,
            self.inner.tree().len(),
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Deterministic hierarchical clustering and frontier traversal.
#[pymodule]
pub fn frontier_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimulation>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_CAPACITY", crate::frontier::DEFAULT_CAPACITY)?;
    Ok(())
}
