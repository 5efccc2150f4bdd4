//! Binary hierarchical cluster tree.
//!
//! A [`ClusterTree`] is a forest of [`ClusterNode`]s built once from a point
//! set by [`ClusterTree::build`] and read-only afterwards. The tree owns every
//! node in a flat arena; children and the parent back-reference are
//! [`NodeId`] indices into that arena, so there are no ownership cycles and
//! dropping the tree frees everything.
//!
//! # Shape
//!
//! The clusterer at depth `d` splits its input into (at most) two nodes *at
//! depth `d`*. The top-level call therefore produces the depth-0 nodes, which
//! are the roots of the forest, normally two of them; one for degenerate
//! input (all points identical) and none for fewer than two points.
//!
//! # Invariants
//!
//! - roots have `depth == 0` and no parent
//! - every non-root node has `depth == parent.depth + 1`
//! - a node's children partition its members exactly
//! - `centroid` is the mean of the members' coordinates
//! - a point in a leaf at depth `L` carries a path of length `L + 1`

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::cloud::{Point, PointId};

pub mod builder;
pub mod query;

pub use builder::{BuildConfig, DEFAULT_ITERATIONS};

/// Index of a node inside its [`ClusterTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena position.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One cluster in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterNode {
    /// Position in the owning tree's arena.
    pub id: NodeId,
    /// Distance from the root level (roots are 0).
    pub depth: usize,
    /// Partition index (0 or 1) this node came from in its parent's split.
    ///
    /// Usually equal to the node's position among its siblings, but not when
    /// an empty partition was dropped.
    pub branch: u8,
    /// Member point ids, sorted ascending. Never empty.
    pub members: Vec<PointId>,
    /// Mean of the members' coordinates.
    pub centroid: (f64, f64),
    /// Zero (leaf), one (degenerate split) or two children.
    pub children: Vec<NodeId>,
    /// Non-owning back-reference; `None` for roots.
    pub parent: Option<NodeId>,
}

impl ClusterNode {
    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True if `point` is one of this node's members.
    pub fn contains(&self, point: PointId) -> bool {
        self.members.binary_search(&point).is_ok()
    }

    /// Number of member points.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for nodes produced by the clusterer.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Forest of cluster nodes plus the clustered copies of the input points.
#[derive(Clone, Debug, Default)]
pub struct ClusterTree {
    pub(crate) nodes: Vec<ClusterNode>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) points: Vec<Point>,
    pub(crate) point_index: HashMap<PointId, usize>,
    pub(crate) max_depth: usize,
}

impl ClusterTree {
    /// Build a tree with the default refinement iteration count.
    ///
    /// Total for any input: fewer than two points or `max_depth == 0` give an
    /// empty forest. Validation of the configuration happens at
    /// [`crate::Simulation::new`].
    pub fn build(points: &[Point], max_depth: usize) -> Self {
        Self::build_with(points, &BuildConfig { max_depth, ..BuildConfig::default() })
    }

    /// Build a tree with explicit clustering parameters.
    pub fn build_with(points: &[Point], config: &BuildConfig) -> Self {
        builder::TreeBuilder::new(points, config).build()
    }

    /// Root nodes (all at depth 0), in partition order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node. Panics on an id from a different tree.
    pub fn node(&self, id: NodeId) -> &ClusterNode {
        &self.nodes[id.index()]
    }

    /// Look up a node without panicking.
    pub fn get(&self, id: NodeId) -> Option<&ClusterNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in arena (pre-order construction) order.
    pub fn nodes(&self) -> &[ClusterNode] {
        &self.nodes
    }

    /// Resolve a slice of ids to nodes.
    pub fn resolve<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = &'a ClusterNode> + 'a {
        ids.iter().map(move |id| self.node(*id))
    }

    /// Clustered copies of the input points, in input order, with paths set.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Clustered copy of a point by id.
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.point_index.get(&id).map(|&i| &self.points[i])
    }

    /// Depth limit the tree was built with.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Deepest depth that actually holds a node, or `None` for an empty forest.
    pub fn max_realized_depth(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.depth).max()
    }

    /// Leaf nodes in arena order.
    pub fn leaves(&self) -> impl Iterator<Item = &ClusterNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True for an empty forest.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::generate;

    #[test]
    fn test_node_helpers() {
        let tree = ClusterTree::build(&generate(40, 3), 3);
        let root = tree.node(tree.roots()[0]);
        assert_eq!(root.depth, 0);
        assert!(root.parent.is_none());
        assert!(!root.is_empty());
        for &m in &root.members {
            assert!(root.contains(m));
        }
        assert!(tree.get(NodeId(u32::MAX)).is_none());
    }

    #[test]
    fn test_point_lookup_returns_clustered_copy() {
        let pts = generate(30, 11);
        let tree = ClusterTree::build(&pts, 4);
        let p = tree.point(5).expect("point 5 was clustered");
        assert_eq!(p.x, pts[5].x);
        assert!(!p.path.is_empty());
        assert!(tree.point(999).is_none());
    }

    #[test]
    fn test_max_realized_depth_bounded() {
        let tree = ClusterTree::build(&generate(500, 1), 5);
        let d = tree.max_realized_depth().expect("non-empty tree");
        assert!(d < 5);
        assert_eq!(tree.max_depth(), 5);
    }

    #[test]
    fn test_empty_forest() {
        let tree = ClusterTree::build(&[], 4);
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert_eq!(tree.max_realized_depth(), None);
    }
}
