//! Serialisable snapshots of a cluster tree and its frontier evolution.
//!
//! These records are what a rendering layer consumes: flat node tables with
//! integer links instead of arena handles, optional hull outlines per node,
//! and one [`FrontierRecord`] per traversal depth. Any serde format works;
//! the tests use JSON.
//!
//! # no_std
//!
//! This module requires the `serde` feature and only needs `alloc`.

use alloc::vec::Vec;

use crate::cloud::Point;
use crate::frontier::FrontierSnapshot;
use crate::geometry::{member_hull, smooth_polygon, DEFAULT_TENSION};
use crate::tree::{ClusterNode, ClusterTree, NodeId};

/// Current record format version.
pub const RECORD_VERSION: u16 = 1;

/// Serialisable form of a whole [`ClusterTree`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct TreeRecord {
    /// Always [`RECORD_VERSION`] for newly created records.
    pub version: u16,
    /// Depth limit the tree was built with.
    pub max_depth: usize,
    /// Ids of the depth-0 nodes.
    pub roots: Vec<u32>,
    /// Every node, indexed by id.
    pub nodes: Vec<NodeRecord>,
    /// Clustered points with their paths.
    pub points: Vec<Point>,
}

/// Serialisable form of one [`ClusterNode`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct NodeRecord {
    /// Node id (position in [`TreeRecord::nodes`]).
    pub id: u32,
    /// Depth below the root level.
    pub depth: usize,
    /// Partition index in the parent's split.
    pub branch: u8,
    /// Parent id, absent for roots.
    pub parent: Option<u32>,
    /// Child ids.
    pub children: Vec<u32>,
    /// Mean member coordinate.
    pub centroid: (f64, f64),
    /// Member point ids, ascending.
    pub members: Vec<u32>,
    /// Smoothed convex outline; empty unless requested.
    pub hull: Vec<(f64, f64)>,
}

impl NodeRecord {
    fn from_node(node: &ClusterNode) -> Self {
        Self {
            id: node.id.0,
            depth: node.depth,
            branch: node.branch,
            parent: node.parent.map(|p| p.0),
            children: node.children.iter().map(|c| c.0).collect(),
            centroid: node.centroid,
            members: node.members.clone(),
            hull: Vec::new(),
        }
    }
}

impl TreeRecord {
    /// Capture `tree`. With `with_hulls`, every node also carries a smoothed
    /// convex outline of its members.
    pub fn from_tree(tree: &ClusterTree, with_hulls: bool) -> Self {
        let nodes = tree
            .nodes()
            .iter()
            .map(|node| {
                let mut record = NodeRecord::from_node(node);
                if with_hulls {
                    let hull = member_hull(node.members.iter().filter_map(|&m| tree.point(m)));
                    record.hull = smooth_polygon(&hull, DEFAULT_TENSION);
                }
                record
            })
            .collect();

        Self {
            version: RECORD_VERSION,
            max_depth: tree.max_depth(),
            roots: tree.roots().iter().map(|r| r.0).collect(),
            nodes,
            points: tree.points().to_vec(),
        }
    }

    /// Number of node records.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node record by id.
    pub fn find_node(&self, id: u32) -> Option<&NodeRecord> {
        self.nodes.get(id as usize).filter(|n| n.id == id)
    }
}

/// Serialisable form of a [`FrontierSnapshot`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FrontierRecord {
    /// Depth the active set represents.
    pub depth: usize,
    /// Active node ids.
    pub active: Vec<u32>,
    /// Ids expanded in the step that produced this set.
    pub expanded: Vec<u32>,
    /// Ids retained in the step that produced this set.
    pub retained: Vec<u32>,
}

fn raw(ids: &[NodeId]) -> Vec<u32> {
    ids.iter().map(|id| id.0).collect()
}

impl From<&FrontierSnapshot> for FrontierRecord {
    fn from(s: &FrontierSnapshot) -> Self {
        Self {
            depth: s.depth,
            active: raw(&s.active),
            expanded: raw(&s.expanded),
            retained: raw(&s.retained),
        }
    }
}

impl From<&FrontierRecord> for FrontierSnapshot {
    fn from(r: &FrontierRecord) -> Self {
        let ids = |v: &[u32]| -> Vec<NodeId> { v.iter().map(|&i| NodeId(i)).collect() };
        Self {
            depth: r.depth,
            active: ids(&r.active),
            expanded: ids(&r.expanded),
            retained: ids(&r.retained),
        }
    }
}
