//! Input/output surface for the solver
//!
//! The core never touches the filesystem; these modules cover parameter
//! validation, error reporting, and decoded pixel-buffer interop.

/// Solver parameters and defaults
pub mod configuration;
/// Error types for solver construction and stepping
pub mod error;
/// Decoded exemplar pixel buffers and in-memory image interop
pub mod image;
