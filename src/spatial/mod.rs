//! Spatial data structures for the solve
//!
//! This module contains spatial-related functionality including:
//! - Canonical tile extraction from the exemplar
//! - Per-cell solve state (domains, entropy, display buffer)

/// Solve-grid cell state management
pub mod grid;
/// Canonical tile extraction and catalog queries
pub mod tiles;

pub use grid::CellGrid;
pub use tiles::TileCatalog;
