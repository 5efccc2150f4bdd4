//! Integration tests for point generation, tree construction and tree queries.
//!
//! Every check runs against trees built from the seeded generator, so a
//! failure here is reproducible bit-for-bit.

use frontier_core::{generate, ClusterTree, NodeId, Point};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

/// Trees over a spread of sizes and depths.
fn sample_trees() -> Vec<ClusterTree> {
    let mut out = Vec::new();
    for (count, seed, depth) in [(10, 42, 3), (64, 1, 4), (500, 12_345, 6), (2000, 12_345, 6)] {
        out.push(ClusterTree::build(&generate(count, seed), depth));
    }
    out
}

// ─── construction ────────────────────────────────────────────────────────────

/// Ten points, depth three: roots at depth 0, leaves no deeper than 3, and
/// every point lands in exactly one leaf.
#[test]
fn test_ten_points_depth_three() {
    let tree = ClusterTree::build(&generate(10, 42), 3);
    assert!(!tree.roots().is_empty());
    for &r in tree.roots() {
        assert_eq!(tree.node(r).depth, 0);
    }
    assert!(tree.leaves().all(|l| l.depth <= 3));
    let leaf_members: usize = tree.leaves().map(|l| l.len()).sum();
    assert_eq!(leaf_members, 10);
}

#[test]
fn test_children_partition_parent() {
    for tree in sample_trees() {
        for node in tree.nodes() {
            if node.is_leaf() {
                continue;
            }
            let union: Vec<u32> = tree
                .resolve(&node.children)
                .flat_map(|c| c.members.iter().copied())
                .collect();
            assert_eq!(
                sorted(union),
                node.members,
                "children of {:?} do not partition it",
                node.id
            );
        }
    }
}

#[test]
fn test_depth_invariant() {
    for tree in sample_trees() {
        for node in tree.nodes() {
            let expected = node.parent.map_or(0, |p| tree.node(p).depth + 1);
            assert_eq!(node.depth, expected, "node {:?}", node.id);
        }
    }
}

#[test]
fn test_children_point_back_to_parent() {
    for tree in sample_trees() {
        for node in tree.nodes() {
            for child in tree.resolve(&node.children) {
                assert_eq!(child.parent, Some(node.id));
            }
        }
    }
}

#[test]
fn test_centroid_is_member_mean() {
    let tree = ClusterTree::build(&generate(500, 9), 5);
    for node in tree.nodes() {
        let n = node.len() as f64;
        let (sx, sy) = node.members.iter().fold((0.0, 0.0), |(sx, sy), &m| {
            let p = tree.point(m).expect("member point");
            (sx + p.x, sy + p.y)
        });
        assert!((node.centroid.0 - sx / n).abs() < 1e-12);
        assert!((node.centroid.1 - sy / n).abs() < 1e-12);
    }
}

/// Path length is one more than the depth of the point's leaf and never
/// exceeds the depth limit.
#[test]
fn test_path_length_matches_leaf_depth() {
    for tree in sample_trees() {
        for leaf in tree.leaves() {
            for &m in &leaf.members {
                let p = tree.point(m).expect("member point");
                assert_eq!(p.path.len(), leaf.depth + 1);
                assert!(p.path.len() <= tree.max_depth());
            }
        }
    }
}

#[test]
fn test_path_entries_match_branches() {
    let tree = ClusterTree::build(&generate(500, 12_345), 6);
    for node in tree.nodes() {
        for &m in &node.members {
            let p = tree.point(m).expect("member point");
            assert_eq!(p.path[node.depth], node.branch);
        }
    }
}

#[test]
fn test_every_point_in_exactly_one_leaf() {
    let tree = ClusterTree::build(&generate(2000, 12_345), 6);
    let mut seen = vec![0u32; 2000];
    for leaf in tree.leaves() {
        for &m in &leaf.members {
            seen[m as usize] += 1;
        }
    }
    assert!(seen.iter().all(|&c| c == 1));
}

#[test]
fn test_clustering_does_real_work() {
    // The weak structure must not collapse into a single chain.
    let tree = ClusterTree::build(&generate(2000, 12_345), 6);
    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.max_realized_depth(), Some(5));
    assert!(tree.nodes_at_depth(5).len() > 16);
}

#[test]
fn test_custom_ids_survive() {
    let pts: Vec<Point> = (0..20u32)
        .map(|i| Point::new(1000 + i * 3, (i % 5) as f64, (i / 5) as f64))
        .collect();
    let tree = ClusterTree::build(&pts, 3);
    for p in &pts {
        let clustered = tree.point(p.id).expect("same id");
        assert_eq!(clustered.position(), p.position());
        assert!(!clustered.path.is_empty());
    }
}

// ─── queries ─────────────────────────────────────────────────────────────────

#[test]
fn test_nodes_at_depth_covers_all_nodes_once() {
    for tree in sample_trees() {
        let max = tree.max_realized_depth().unwrap_or(0);
        let total: usize = (0..=max).map(|d| tree.nodes_at_depth(d).len()).sum();
        assert_eq!(total, tree.len());
        assert!(tree.nodes_at_depth(max + 1).is_empty());
    }
}

#[test]
fn test_member_always_on_path() {
    let tree = ClusterTree::build(&generate(500, 3), 6);
    for node in tree.nodes() {
        for &m in &node.members {
            let p = tree.point(m).expect("member point");
            for depth in 0..p.path.len() {
                assert!(tree.is_on_path(node, p, depth));
            }
        }
    }
}

/// A point is on the path of the ancestors of its own leaf, and of no other
/// node at the same depth.
#[test]
fn test_on_path_exactly_one_node_per_depth() {
    let tree = ClusterTree::build(&generate(500, 3), 6);
    let p = tree.point(123).expect("point 123");
    for depth in 0..p.path.len() {
        let hits = tree
            .nodes_at_depth(depth)
            .into_iter()
            .filter(|n| tree.is_on_path(n, p, n.depth))
            .count();
        assert_eq!(hits, 1, "depth {}", depth);
    }
}

#[test]
fn test_unclustered_point_is_nowhere() {
    let tree = ClusterTree::build(&generate(100, 3), 4);
    let stray = Point::new(77_777, 0.0, 0.0);
    assert!(tree.nodes().iter().all(|n| !tree.is_on_path(n, &stray, n.depth)));
    assert!(tree.centroid_path(&stray, 4).iter().all(Option::is_none));
}

#[test]
fn test_centroid_path_follows_ancestors() {
    let tree = ClusterTree::build(&generate(500, 12_345), 6);
    let p = tree.point(250).expect("point 250");
    let trail = tree.centroid_path(p, 6);
    let leaf = tree.node_containing(p, p.path.len() - 1).expect("leaf");
    let mut chain: Vec<NodeId> = tree.ancestors(leaf.id);
    chain.reverse();
    chain.push(leaf.id);
    for (d, id) in chain.iter().enumerate() {
        assert_eq!(trail[d], Some(tree.node(*id).centroid));
    }
    for entry in &trail[chain.len()..] {
        assert!(entry.is_none());
    }
}
