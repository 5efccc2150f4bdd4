//! Bounded attention frontier over a [`ClusterTree`].
//!
//! The frontier is the set of cluster nodes under consideration at one
//! traversal depth. Each [`step`] classifies the previous active set:
//!
//! - **expanded**: relevant *and* has children; replaced by its children
//! - **retained**: everything else; carried over unchanged
//!
//! and the next active set is `retained ++ children(expanded)`. The rule itself
//! never truncates. Keeping the window at a fixed size is a policy chosen by
//! the caller through the [`Relevance`] it supplies, or delegated to
//! [`FrontierSimulator::run_ranked`], which ranks candidates by score and only
//! expands as many as the capacity allows.
//!
//! Traversal halts at a fixed point: every active node is a leaf, or a step
//! expanded nothing and so reproduced its input.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::cloud::Point;
use crate::tree::{ClusterNode, ClusterTree, NodeId};

/// Default frontier window size.
pub const DEFAULT_CAPACITY: usize = 16;

/// Smallest window that holds the two roots a non-degenerate tree starts with.
pub const MIN_CAPACITY: usize = 2;

/// Default share of the active set that may expand in one step.
pub const DEFAULT_EXPANSION_FRACTION: f64 = 0.25;

// ─── Relevance ───────────────────────────────────────────────────────────────

/// Decides whether an active node should expand at a given depth.
///
/// Implementations must be pure functions of `(node, depth)`: the simulator
/// may evaluate them in any order and any number of times. This cannot be
/// checked at runtime; an impure predicate makes snapshots irreproducible.
pub trait Relevance {
    /// True if `node` should be replaced by its children at `depth`.
    fn is_relevant(&self, node: &ClusterNode, depth: usize) -> bool;
}

impl<F> Relevance for F
where
    F: Fn(&ClusterNode, usize) -> bool,
{
    fn is_relevant(&self, node: &ClusterNode, depth: usize) -> bool {
        self(node, depth)
    }
}

/// "On the route to the query or to any related point."
///
/// The two signals are combined with a plain logical OR. Points must be the
/// tree's clustered copies (see [`ClusterTree::point`]) so their paths are set.
#[derive(Clone, Copy, Debug)]
pub struct PathRelevance<'a> {
    tree: &'a ClusterTree,
    query: &'a Point,
    related: &'a [&'a Point],
}

impl<'a> PathRelevance<'a> {
    /// Relevance towards `query` and `related`.
    pub fn new(tree: &'a ClusterTree, query: &'a Point, related: &'a [&'a Point]) -> Self {
        Self { tree, query, related }
    }

    /// True if `node` lies on the query's route.
    pub fn on_query_path(&self, node: &ClusterNode) -> bool {
        self.tree.is_on_path(node, self.query, node.depth)
    }

    /// True if `node` lies on the route of any related point.
    pub fn on_related_path(&self, node: &ClusterNode) -> bool {
        self.related
            .iter()
            .any(|p| self.tree.is_on_path(node, p, node.depth))
    }

    /// Numeric stand-in for the boolean rule: 2 on the query route, 1 on a
    /// related route, 0 otherwise.
    pub fn score(&self, node: &ClusterNode) -> f64 {
        if self.on_query_path(node) {
            2.0
        } else if self.on_related_path(node) {
            1.0
        } else {
            0.0
        }
    }
}

impl Relevance for PathRelevance<'_> {
    fn is_relevant(&self, node: &ClusterNode, _depth: usize) -> bool {
        self.on_query_path(node) || self.on_related_path(node)
    }
}

// ─── FrontierSnapshot ────────────────────────────────────────────────────────

/// Active set at one depth, with how it was derived from the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontierSnapshot {
    /// Depth this active set represents.
    pub depth: usize,
    /// Active nodes: retained first, then children of expanded nodes.
    pub active: Vec<NodeId>,
    /// Previous-step nodes that were replaced by their children.
    pub expanded: Vec<NodeId>,
    /// Previous-step nodes carried over unchanged.
    pub retained: Vec<NodeId>,
}

impl FrontierSnapshot {
    /// Empty snapshot: the tree is exhausted.
    pub fn empty(depth: usize) -> Self {
        Self { depth, ..Self::default() }
    }

    /// True if no node is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of active nodes.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True if this step expanded nothing (its input was a fixed point).
    pub fn is_fixed_point(&self) -> bool {
        self.expanded.is_empty()
    }

    /// True if every active node is a leaf of `tree`.
    pub fn all_leaves(&self, tree: &ClusterTree) -> bool {
        tree.resolve(&self.active).all(ClusterNode::is_leaf)
    }
}

// ─── step ────────────────────────────────────────────────────────────────────

/// Starting frontier: exactly the tree's depth-0 nodes, nothing expanded yet.
pub fn initial(tree: &ClusterTree) -> FrontierSnapshot {
    FrontierSnapshot {
        depth: 0,
        active: tree.roots().to_vec(),
        expanded: Vec::new(),
        retained: Vec::new(),
    }
}

/// Derive the active set for `depth + 1` from the active set at `depth`.
///
/// An empty `active` slice yields an empty snapshot, which tells the caller
/// the traversal is exhausted.
pub fn step<R>(tree: &ClusterTree, active: &[NodeId], relevance: &R, depth: usize) -> FrontierSnapshot
where
    R: Relevance + ?Sized,
{
    if active.is_empty() {
        return FrontierSnapshot::empty(depth + 1);
    }

    let mut expanded = Vec::new();
    let mut retained = Vec::new();
    for node in tree.resolve(active) {
        if !node.is_leaf() && relevance.is_relevant(node, depth) {
            expanded.push(node.id);
        } else {
            retained.push(node.id);
        }
    }

    let mut next = retained.clone();
    for &id in &expanded {
        next.extend_from_slice(&tree.node(id).children);
    }

    tracing::trace!(
        depth,
        active = next.len(),
        expanded = expanded.len(),
        retained = retained.len(),
        "frontier step"
    );

    FrontierSnapshot {
        depth: depth + 1,
        active: next,
        expanded,
        retained,
    }
}

// ─── FrontierSimulator ───────────────────────────────────────────────────────

/// Repeated [`step`]s from the roots to a fixed point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierSimulator {
    /// Window size the ranked policy keeps the active set within.  Default: 16.
    pub capacity: usize,
    /// Maximum share of the active set expanded per ranked step.  Default: 0.25.
    pub expansion_fraction: f64,
}

impl Default for FrontierSimulator {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            expansion_fraction: DEFAULT_EXPANSION_FRACTION,
        }
    }
}

impl FrontierSimulator {
    /// Simulator with explicit window parameters.
    ///
    /// The initial snapshot always holds every root, so a `capacity` below
    /// the root count (normally [`MIN_CAPACITY`]) can never be met.
    pub fn new(capacity: usize, expansion_fraction: f64) -> Self {
        Self { capacity, expansion_fraction }
    }

    /// Step with a caller-supplied predicate until a fixed point or `max_steps`.
    ///
    /// The first snapshot is [`initial`]. A step that expands nothing is not
    /// recorded; the last snapshot is the fixed point. No capacity is
    /// enforced here.
    pub fn run<R>(&self, tree: &ClusterTree, relevance: &R, max_steps: usize) -> Vec<FrontierSnapshot>
    where
        R: Relevance + ?Sized,
    {
        self.drive(tree, max_steps, |active, depth| step(tree, active, relevance, depth))
    }

    /// Step with a ranked, capacity-bounded policy.
    ///
    /// Each step expands at most `ceil(expansion_fraction × |active|)` nodes,
    /// chosen by descending `score` (ties to the lower node id), and only
    /// while the resulting active set stays within `capacity`. Nodes scoring
    /// zero or less never expand.
    pub fn run_ranked<S>(&self, tree: &ClusterTree, score: S, max_steps: usize) -> Vec<FrontierSnapshot>
    where
        S: Fn(&ClusterNode) -> f64,
    {
        self.drive(tree, max_steps, |active, depth| {
            let chosen = self.select_expansions(tree, active, &score);
            let admitted = |node: &ClusterNode, _depth: usize| chosen.contains(&node.id);
            step(tree, active, &admitted, depth)
        })
    }

    /// Nodes the ranked policy would expand from `active`.
    pub fn select_expansions<S>(&self, tree: &ClusterTree, active: &[NodeId], score: &S) -> HashSet<NodeId>
    where
        S: Fn(&ClusterNode) -> f64,
    {
        let mut candidates: Vec<(f64, &ClusterNode)> = tree
            .resolve(active)
            .filter(|n| !n.is_leaf())
            .map(|n| (score(n), n))
            .filter(|(s, _)| *s > 0.0)
            .collect();
        candidates.sort_by(|(sa, a), (sb, b)| sb.total_cmp(sa).then(a.id.cmp(&b.id)));

        let limit = libm::ceil(self.expansion_fraction * active.len() as f64) as usize;
        let mut room = self.capacity.saturating_sub(active.len());
        let mut chosen = HashSet::new();
        for (_, node) in candidates {
            if chosen.len() >= limit {
                break;
            }
            let growth = node.children.len() - 1;
            if growth <= room {
                room -= growth;
                chosen.insert(node.id);
            }
        }
        chosen
    }

    fn drive<F>(&self, tree: &ClusterTree, max_steps: usize, mut advance: F) -> Vec<FrontierSnapshot>
    where
        F: FnMut(&[NodeId], usize) -> FrontierSnapshot,
    {
        let mut snapshots = alloc::vec![initial(tree)];
        for _ in 0..max_steps {
            let current = &snapshots[snapshots.len() - 1];
            if current.is_empty() || current.all_leaves(tree) {
                break;
            }
            let next = advance(&current.active, current.depth);
            if next.is_fixed_point() {
                break;
            }
            snapshots.push(next);
        }
        tracing::debug!(
            steps = snapshots.len(),
            capacity = self.capacity,
            "frontier simulation finished"
        );
        snapshots
    }
}
