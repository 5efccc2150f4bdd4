//! # frontier-core
//!
//! Deterministic hierarchical clustering and bounded-frontier traversal:
//! the engine behind "coarse-to-fine traversal over a semantic tree"
//! visualisations.
//!
//! ---
//!
//! A seeded generator lays out a synthetic 2D point cloud. A recursive
//! two-way k-means clusterer turns it into a forest of [`ClusterNode`]s, each
//! point remembering its route through the splits. A frontier simulator then
//! walks that forest from the roots: at every step the relevant nodes are
//! expanded into their children and the rest are retained, while a ranked
//! policy keeps the active window within a fixed capacity.
//!
//! Everything is a pure function of the configuration. Same seed, same cloud,
//! same tree and same frontier on every platform.
//!
//! ## The pipeline
//!
//! ```text
//! SeededSequence → generate() → ClusterTree::build() → nodes_at_depth / is_on_path / centroid_path
//!                                        │
//!                                        └──────────→ frontier::step / FrontierSimulator
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`sequence`] | [`SeededSequence`] | Park–Miller LCG, bit-exact stream in `[0, 1)` |
//! | [`cloud`] | [`Point`], [`generate`] | Noisy annulus point cloud with weak clumping |
//! | [`tree`] | [`ClusterTree`], [`ClusterNode`], [`NodeId`] | Recursive k = 2 clusterer and read-only queries |
//! | [`frontier`] | [`FrontierSnapshot`], [`FrontierSimulator`], [`Relevance`] | Expand / retain traversal with a capacity-bounded ranked policy |
//! | [`geometry`] | [`Bounds`], [`normalize`], [`convex_hull`], [`smooth_polygon`] | Renderer-facing normalisation and outlines |
//! | [`config`] | [`SimulationConfig`] | Illustrative defaults and validation |
//! | [`simulation`] | [`Simulation`] | Validated end-to-end pipeline |
//! | [`record`] | [`record::TreeRecord`], [`record::FrontierRecord`] | Serialisable snapshots (requires `serde` feature) |
//!
//! ## Example
//!
//! ```rust
//! use frontier_core::{Simulation, SimulationConfig};
//!
//! let sim = Simulation::new(SimulationConfig { point_count: 500, ..Default::default() })?;
//! let slice = sim.depth_slice(2);
//! assert!(slice.iter().all(|n| n.depth == 2));
//!
//! let frontier = sim.frontier_for(0, &[42]).expect("point 0 exists");
//! assert!(frontier.iter().all(|s| s.len() <= 16));
//! # Ok::<(), frontier_core::ConfigError>(())
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` + `alloc` by default. Trigonometry goes through
//! `libm`, so the generated cloud does not depend on the platform's math
//! library. Enable `std` to forward `std` to `tracing` and `thiserror`,
//! `serde` for the [`record`] module, and `python-ffi` for the PyO3 bindings.
//!
//! ## Logging
//!
//! Construction and traversal emit `tracing` events (`debug` per build and
//! run, `trace` per bisection and frontier step). The library never installs
//! a subscriber.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod cloud;
pub mod config;
pub mod error;
pub mod frontier;
pub mod geometry;
pub mod sequence;
pub mod simulation;
pub mod tree;

/// Serialisable tree and frontier snapshots.
///
/// Enabled by `features = ["serde"]`.
#[cfg(feature = "serde")]
pub mod record;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use cloud::{generate, Point, PointId};
pub use config::SimulationConfig;
pub use error::ConfigError;
pub use frontier::{step, FrontierSimulator, FrontierSnapshot, PathRelevance, Relevance};
pub use geometry::{convex_hull, normalize, smooth_polygon, Bounds};
pub use sequence::SeededSequence;
pub use simulation::Simulation;
pub use tree::{BuildConfig, ClusterNode, ClusterTree, NodeId};
