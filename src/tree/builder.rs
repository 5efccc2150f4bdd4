//! Recursive k = 2 clusterer.
//!
//! At each level the input is bisected by a fixed number of k-means
//! refinement rounds:
//!
//! ```text
//! seeds     c₀ = p[0],  c₁ = p[n / 2]
//! repeat    assign every point to the nearer centroid (ties → 0)
//!           cᵢ = mean(cluster i)          (empty cluster keeps cᵢ)
//! final     assign once more → two partitions, empty ones dropped
//! ```
//!
//! Index-based seeds make the tree shape a pure function of the point order.
//! A partition with more than two points recurses while `depth + 1 < max_depth`;
//! everything else becomes a leaf.
//!
//! Route bookkeeping never touches the caller's points: partition choices are
//! appended to a side table keyed by point id and written onto the tree's own
//! point copies once the recursion has finished.

use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{ClusterNode, ClusterTree, NodeId};
use crate::cloud::{Point, PointId};

/// Default number of refinement rounds per bisection.
pub const DEFAULT_ITERATIONS: usize = 12;

/// Default depth limit.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Clustering parameters for [`ClusterTree::build_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Number of node levels. Nodes exist at depths `0..max_depth`.
    pub max_depth: usize,
    /// k-means refinement rounds before the final assignment.  Default: 12.
    pub iterations: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// One-shot construction state. Consumed by [`TreeBuilder::build`].
pub(crate) struct TreeBuilder<'a> {
    points: &'a [Point],
    config: &'a BuildConfig,
    nodes: Vec<ClusterNode>,
    paths: HashMap<PointId, Vec<u8>>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(points: &'a [Point], config: &'a BuildConfig) -> Self {
        Self {
            points,
            config,
            nodes: Vec::new(),
            paths: HashMap::with_capacity(points.len()),
        }
    }

    pub(crate) fn build(mut self) -> ClusterTree {
        let all: Vec<usize> = (0..self.points.len()).collect();
        let roots = self.split(&all, 0, None);

        let mut paths = self.paths;
        let mut point_index = HashMap::with_capacity(self.points.len());
        let points: Vec<Point> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                point_index.insert(p.id, i);
                Point {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                    path: paths.remove(&p.id).unwrap_or_default(),
                }
            })
            .collect();

        tracing::debug!(
            points = points.len(),
            nodes = self.nodes.len(),
            roots = roots.len(),
            max_depth = self.config.max_depth,
            "cluster tree built"
        );

        ClusterTree {
            nodes: self.nodes,
            roots,
            points,
            point_index,
            max_depth: self.config.max_depth,
        }
    }

    /// Bisect `members` (positions into `self.points`) into nodes at `depth`.
    fn split(&mut self, members: &[usize], depth: usize, parent: Option<NodeId>) -> Vec<NodeId> {
        if members.len() < 2 || depth >= self.config.max_depth {
            return Vec::new();
        }

        let partitions = self.bisect(members);
        let mut created = Vec::with_capacity(2);

        for (branch, part) in partitions.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            for &i in part {
                self.paths
                    .entry(self.points[i].id)
                    .or_default()
                    .push(branch as u8);
            }

            let id = NodeId(self.nodes.len() as u32);
            let mut ids: Vec<PointId> = part.iter().map(|&i| self.points[i].id).collect();
            ids.sort_unstable();
            self.nodes.push(ClusterNode {
                id,
                depth,
                branch: branch as u8,
                members: ids,
                centroid: self.mean(part),
                children: Vec::new(),
                parent,
            });
            created.push(id);

            if part.len() > 2 && depth + 1 < self.config.max_depth {
                let children = self.split(part, depth + 1, Some(id));
                self.nodes[id.index()].children = children;
            }
        }

        tracing::trace!(depth, size = members.len(), created = created.len(), "bisected");
        created
    }

    /// Two-centroid refinement followed by a final assignment pass.
    fn bisect(&self, members: &[usize]) -> [Vec<usize>; 2] {
        let mut centroids = [
            self.points[members[0]].position(),
            self.points[members[members.len() / 2]].position(),
        ];
        let mut assignment = alloc::vec![0u8; members.len()];

        for _ in 0..self.config.iterations {
            for (slot, &i) in assignment.iter_mut().zip(members) {
                *slot = nearer(&self.points[i], &centroids);
            }
            for (c, centroid) in centroids.iter_mut().enumerate() {
                let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
                for (&a, &i) in assignment.iter().zip(members) {
                    if a as usize == c {
                        sx += self.points[i].x;
                        sy += self.points[i].y;
                        n += 1;
                    }
                }
                // An emptied cluster keeps its previous centroid.
                if n > 0 {
                    *centroid = (sx / n as f64, sy / n as f64);
                }
            }
        }

        let mut partitions = [Vec::new(), Vec::new()];
        for &i in members {
            partitions[nearer(&self.points[i], &centroids) as usize].push(i);
        }
        partitions
    }

    fn mean(&self, part: &[usize]) -> (f64, f64) {
        let (sx, sy) = part.iter().fold((0.0, 0.0), |(sx, sy), &i| {
            (sx + self.points[i].x, sy + self.points[i].y)
        });
        let n = part.len() as f64;
        (sx / n, sy / n)
    }
}

/// Index of the nearer centroid; ties go to the lower index.
fn nearer(p: &Point, centroids: &[(f64, f64); 2]) -> u8 {
    if p.distance_sq(centroids[1]) < p.distance_sq(centroids[0]) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::generate;

    fn line(n: u32) -> Vec<Point> {
        (0..n).map(|i| Point::new(i, i as f64, 0.0)).collect()
    }

    #[test]
    fn test_two_separated_groups_split_cleanly() {
        let mut pts: Vec<Point> = (0..5).map(|i| Point::new(i, i as f64 * 0.01, 0.0)).collect();
        pts.extend((5..10).map(|i| Point::new(i, 10.0 + i as f64 * 0.01, 0.0)));
        let tree = ClusterTree::build(&pts, 1);
        assert_eq!(tree.roots().len(), 2);
        let a = tree.node(tree.roots()[0]);
        let b = tree.node(tree.roots()[1]);
        assert_eq!(a.members, [0, 1, 2, 3, 4]);
        assert_eq!(b.members, [5, 6, 7, 8, 9]);
        assert!((a.centroid.0 - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_identical_points_give_single_child_chain() {
        let pts: Vec<Point> = (0..6).map(|i| Point::new(i, 1.0, 1.0)).collect();
        let tree = ClusterTree::build(&pts, 3);
        assert_eq!(tree.roots().len(), 1, "empty partition must be dropped");
        let root = tree.node(tree.roots()[0]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.len(), 6);
        for p in tree.points() {
            assert_eq!(p.path, [0, 0, 0]);
        }
    }

    #[test]
    fn test_fewer_than_two_points_is_empty() {
        assert!(ClusterTree::build(&line(1), 4).is_empty());
        let tree = ClusterTree::build(&line(1), 4);
        assert!(tree.points()[0].path.is_empty());
    }

    #[test]
    fn test_zero_depth_is_empty() {
        assert!(ClusterTree::build(&line(10), 0).is_empty());
    }

    #[test]
    fn test_small_partitions_become_leaves() {
        let tree = ClusterTree::build(&line(4), 6);
        for n in tree.nodes() {
            if n.len() <= 2 {
                assert!(n.is_leaf(), "node {:?} with {} members has children", n.id, n.len());
            }
        }
    }

    #[test]
    fn test_zero_iterations_still_partitions() {
        let config = BuildConfig { max_depth: 2, iterations: 0 };
        let tree = ClusterTree::build_with(&line(8), &config);
        let total: usize = tree.resolve(tree.roots()).map(|n| n.len()).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_input_points_untouched() {
        let pts = generate(64, 5);
        let _tree = ClusterTree::build(&pts, 4);
        assert!(pts.iter().all(|p| p.path.is_empty()));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let pts = generate(300, 12_345);
        let a = ClusterTree::build(&pts, 5);
        let b = ClusterTree::build(&pts, 5);
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_nearer_breaks_ties_low() {
        let p = Point::new(0, 0.0, 0.0);
        assert_eq!(nearer(&p, &[(1.0, 0.0), (-1.0, 0.0)]), 0);
        assert_eq!(nearer(&p, &[(2.0, 0.0), (-1.0, 0.0)]), 1);
    }
}
