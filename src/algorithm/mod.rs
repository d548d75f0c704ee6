/// Adjacency precompute: per-tile, per-direction compatibility bitsets
pub mod adjacency;
/// Fixed-width bitset implementation for tile domains and compatibility rows
pub mod bitset;
/// Solve control loop: collapse, propagate, surface contradictions
pub mod executor;
/// Breadth-first constraint propagation across the solve grid
pub mod propagation;
/// Weighted sampling over domains and minimum-entropy cell selection
pub mod selection;
