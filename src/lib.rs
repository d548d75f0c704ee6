//! Overlapping-model wave function collapse over pixel exemplars
//!
//! The solver extracts every N×N overlapping tile from a decoded source
//! image, precomputes pairwise adjacency bitsets, and fills a finite grid by
//! repeated minimum-entropy collapse with breadth-first constraint
//! propagation, so the output preserves the exemplar's local statistics.

#![forbid(unsafe_code)]

/// Core algorithm implementation: bitsets, adjacency precompute, propagation, and the solve loop
pub mod algorithm;
/// Input/output surface: errors, configuration, and exemplar pixel buffers
pub mod io;
/// Spatial state: tile catalog extraction and the solve grid
pub mod spatial;

pub use algorithm::executor::{SolveStatus, Solver};
pub use io::configuration::SolverConfig;
pub use io::error::{Result, SolverError};
pub use io::image::Exemplar;
