//! Solver parameters and defaults

use crate::io::error::{Result, invalid_parameter};
use crate::io::image::Exemplar;

/// Default size of extracted tile patterns (must be odd for center-based operations)
pub const DEFAULT_TILE_SIZE: usize = 3;

/// Default output grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 50;

/// Default output grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 50;

/// Fixed seed for reproducible solves
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for one solve
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Output grid width in cells
    pub grid_width: usize,
    /// Output grid height in cells
    pub grid_height: usize,
    /// Side length of extracted tiles (odd, no larger than the exemplar)
    pub tile_size: usize,
    /// Seed for all stochastic choices
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl SolverConfig {
    /// Validate parameters against an exemplar before any allocation
    ///
    /// Rejection is always explicit; out-of-range values are never clamped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - Either grid dimension is zero
    /// - The tile size is even (zero included)
    /// - The tile size exceeds either exemplar dimension
    pub fn validate(&self, exemplar: &Exemplar) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(invalid_parameter(
                "grid dimensions",
                &format!("{}x{}", self.grid_width, self.grid_height),
                &"both grid dimensions must be nonzero",
            ));
        }

        if self.tile_size % 2 == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be odd",
            ));
        }

        if self.tile_size > exemplar.width() || self.tile_size > exemplar.height() {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!(
                    "exceeds exemplar dimensions {}x{}",
                    exemplar.width(),
                    exemplar.height()
                ),
            ));
        }

        Ok(())
    }
}
