//! # Coarse-to-fine traversal demo
//!
//! Builds the illustrative simulation (2000 points, seed 12345, six levels),
//! prints the depth slices, then walks a 16-node frontier towards one query
//! point while also opening the routes to two related points.
//!
//! Run with `RUST_LOG=debug cargo run --example traversal` to see the
//! library's tracing events.

use frontier_core::{Simulation, SimulationConfig};

const QUERY: u32 = 42;
const RELATED: [u32; 2] = [640, 1337];

fn main() -> Result<(), frontier_core::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let sim = Simulation::new(SimulationConfig::default())?;
    let tree = sim.tree();

    // ── Depth slices ─────────────────────────────────────────────────────────

    println!("depth  nodes  largest  smallest");
    for depth in 0..sim.config().max_depth {
        let slice = sim.depth_slice(depth);
        let largest = slice.iter().map(|n| n.len()).max().unwrap_or(0);
        let smallest = slice.iter().map(|n| n.len()).min().unwrap_or(0);
        println!("{depth:>5}  {:>5}  {largest:>7}  {smallest:>8}", slice.len());
    }

    // ── Route of the query point ─────────────────────────────────────────────

    if let Some(trail) = sim.centroid_path_of(QUERY) {
        println!("\nroute of point {QUERY}:");
        for (depth, c) in trail.iter().enumerate() {
            match c {
                Some((x, y)) => println!("  depth {depth}: ({x:+.3}, {y:+.3})"),
                None => println!("  depth {depth}: -"),
            }
        }
    }

    // ── Frontier ─────────────────────────────────────────────────────────────

    let Some(snapshots) = sim.frontier_for(QUERY, &RELATED) else {
        return Ok(());
    };
    println!("\nfrontier (capacity {}):", sim.config().frontier_capacity);
    for s in &snapshots {
        let leaves = tree.resolve(&s.active).filter(|n| n.is_leaf()).count();
        println!(
            "  depth {:>2}: {:>2} active ({leaves} leaves)  +{} expanded  {} retained",
            s.depth,
            s.len(),
            s.expanded.len(),
            s.retained.len(),
        );
    }

    Ok(())
}
