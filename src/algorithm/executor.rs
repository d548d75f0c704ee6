//! Solve control loop: collapse, propagate, surface contradictions

use crate::{
    algorithm::adjacency::AdjacencyTable,
    algorithm::propagation::{Propagation, propagate_from},
    algorithm::selection::{RandomSelector, blended_color, random_minimum_entropy_cell},
    io::configuration::SolverConfig,
    io::error::{Result, SolverError},
    io::image::Exemplar,
    spatial::grid::CellGrid,
    spatial::tiles::TileCatalog,
};
use ndarray::Array2;

/// Grid-level solve state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// Uncollapsed cells remain and no domain has emptied
    Running,
    /// Every cell is collapsed
    Complete,
    /// A domain emptied during propagation; recover with [`Solver::reset`]
    Contradiction,
}

/// Overlapping-model wave function collapse solver
///
/// Owns the one-shot precompute for an exemplar (tile catalog and adjacency
/// table) plus the mutable grid state of the current solve. [`Solver::step`]
/// advances by exactly one collapse and its propagation wave, a bounded unit
/// of work suitable for driving from an animation tick; [`Solver::solve`]
/// runs steps to a terminal status.
pub struct Solver {
    catalog: TileCatalog,
    adjacency: AdjacencyTable,
    grid: CellGrid,
    selector: RandomSelector,
    status: SolveStatus,
    contradiction: Option<[usize; 2]>,
    config: SolverConfig,
}

impl Solver {
    /// Validate parameters, run the precompute pass, and allocate the grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an even or oversized tile size or a
    /// zero-sized grid. Validation happens before any allocation, so a
    /// failed construction leaves nothing behind.
    pub fn new(exemplar: &Exemplar, config: SolverConfig) -> Result<Self> {
        config.validate(exemplar)?;

        let catalog = TileCatalog::from_exemplar(exemplar, config.tile_size)?;
        let adjacency = AdjacencyTable::precompute(&catalog);
        let mut grid = CellGrid::new(config.grid_width, config.grid_height, catalog.len());
        Self::paint_initial(&mut grid, &catalog);

        Ok(Self {
            catalog,
            adjacency,
            grid,
            selector: RandomSelector::new(config.seed),
            status: SolveStatus::Running,
            contradiction: None,
            config,
        })
    }

    // A fresh grid shows the catalog-wide weighted average color everywhere
    fn paint_initial(grid: &mut CellGrid, catalog: &TileCatalog) {
        if let Some(color) = grid
            .domain(0)
            .and_then(|domain| blended_color(domain, catalog))
        {
            grid.fill_display(color);
        }
    }

    /// Advance the solve by one collapse and its propagation wave
    ///
    /// No-op when the status is already terminal. Otherwise selects a
    /// minimum-entropy uncollapsed cell (uniform among ties), collapses it
    /// with a frequency-weighted draw, paints the chosen tile's exact center
    /// color, and propagates breadth-first. A contradiction surfaces as the
    /// returned status, never as a panic or a silent wrong placement.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if the chosen cell's domain carries zero
    /// total weight, which indicates a propagation bookkeeping bug.
    pub fn step(&mut self) -> Result<SolveStatus> {
        if self.status != SolveStatus::Running {
            return Ok(self.status);
        }

        let Some([row, col]) = random_minimum_entropy_cell(&self.grid, &mut self.selector) else {
            self.status = SolveStatus::Complete;
            return Ok(self.status);
        };

        let cell = self.grid.index_of(row, col);
        let Some(tile) = self
            .grid
            .domain(cell)
            .and_then(|domain| self.selector.weighted_tile(domain, self.catalog.frequencies()))
        else {
            return Err(SolverError::EmptySelection {
                position: [row, col],
            });
        };

        let color = self.catalog.centre(tile).unwrap_or([0, 0, 0, u8::MAX]);
        self.grid.collapse(row, col, tile, color);

        match propagate_from(&mut self.grid, &self.adjacency, &self.catalog, [row, col]) {
            Propagation::Settled => {}
            Propagation::ContradictionAt(position) => {
                self.status = SolveStatus::Contradiction;
                self.contradiction = Some(position);
            }
        }

        Ok(self.status)
    }

    /// Run steps until the grid completes or contradicts
    ///
    /// Bounded by one collapse per cell plus the final completion check, so
    /// the loop terminates even if the status bookkeeping were ever wrong.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Solver::step`] error.
    pub fn solve(&mut self) -> Result<SolveStatus> {
        for _ in 0..=self.grid.cell_count() {
            if self.status != SolveStatus::Running {
                break;
            }
            self.step()?;
        }
        Ok(self.status)
    }

    /// Discard the current grid and start over from full domains
    ///
    /// The only recovery from a contradiction. The precompute is untouched
    /// and the random sequence continues from where it left off, so repeated
    /// resets explore different outcomes under one seed.
    pub fn reset(&mut self) {
        self.grid.reset(self.catalog.len());
        Self::paint_initial(&mut self.grid, &self.catalog);
        self.status = SolveStatus::Running;
        self.contradiction = None;
    }

    /// Current grid-level solve state
    pub const fn status(&self) -> SolveStatus {
        self.status
    }

    /// Grid position of the most recent contradiction, if any
    pub const fn contradiction(&self) -> Option<[usize; 2]> {
        self.contradiction
    }

    /// The canonical tile catalog backing this solve
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// The precomputed adjacency table backing this solve
    pub const fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// The mutable per-cell solve state
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The configuration this solver was built with
    pub const fn config(&self) -> SolverConfig {
        self.config
    }

    /// Row-major RGBA display buffer, 4 bytes per cell
    pub fn display(&self) -> &[u8] {
        self.grid.display()
    }

    /// Cached per-cell entropy for diagnostic overlay
    pub const fn entropy(&self) -> &Array2<usize> {
        self.grid.entropy()
    }
}
