//! Read-only queries over a built [`ClusterTree`].
//!
//! All queries are total: unknown depths, unclustered points and exhausted
//! branches produce empty results or `None` entries rather than errors.

use alloc::vec::Vec;

use super::{ClusterNode, ClusterTree, NodeId};
use crate::cloud::Point;

impl ClusterTree {
    /// Every node at depth `d`, in depth-first order.
    ///
    /// The traversal stops descending at depth `d`. Returns an empty vector
    /// when `d` is deeper than the deepest realized node.
    pub fn nodes_at_depth(&self, d: usize) -> Vec<&ClusterNode> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.depth == d {
                out.push(node);
            } else if node.depth < d {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Is `point` routed through `node` as far as `depth`?
    ///
    /// True when the point is a member of `node`, or when some member shares
    /// the point's path prefix `path[0..=depth]`. The second clause lets a
    /// query relate to clusters that lie on its route without containing it.
    /// False when the point has not committed to a branch at `depth` yet.
    pub fn is_on_path(&self, node: &ClusterNode, point: &Point, depth: usize) -> bool {
        if node.contains(point.id) {
            return true;
        }
        if point.path.len() <= depth {
            return false;
        }
        let prefix = &point.path[..=depth];
        node.members.iter().any(|&m| {
            self.point(m)
                .map(|member| member.path.len() > depth && member.path[..=depth] == *prefix)
                .unwrap_or(false)
        })
    }

    /// The node at `depth` whose members include `point`, if any.
    pub fn node_containing(&self, point: &Point, depth: usize) -> Option<&ClusterNode> {
        let mut candidates: &[NodeId] = &self.roots;
        for level in 0..=depth {
            let node = self
                .resolve(candidates)
                .find(|n| n.contains(point.id))?;
            if level == depth {
                return Some(node);
            }
            candidates = &node.children;
        }
        None
    }

    /// Centroids of the nodes containing `point` at depths `0..max_depth`.
    ///
    /// Entries past the point's deepest node are `None`. This is the polyline
    /// the presentation layer animates as the point's route.
    pub fn centroid_path(&self, point: &Point, max_depth: usize) -> Vec<Option<(f64, f64)>> {
        let mut out = Vec::with_capacity(max_depth);
        let mut candidates: &[NodeId] = &self.roots;
        for _ in 0..max_depth {
            match self.resolve(candidates).find(|n| n.contains(point.id)) {
                Some(node) => {
                    out.push(Some(node.centroid));
                    candidates = &node.children;
                }
                None => {
                    out.push(None);
                    candidates = &[];
                }
            }
        }
        out
    }

    /// Ancestors of `id`, nearest first, ending at its root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(id).and_then(|n| n.parent);
        while let Some(p) = cursor {
            out.push(p);
            cursor = self.node(p).parent;
        }
        out
    }
}
