//! Solve-grid cell state management
//!
//! Parallel storage for the per-cell solve state: domain bitsets row-major,
//! collapsed flags, a cached entropy grid, and the RGBA display buffer the
//! host uploads to its renderer. The entropy cache is refreshed by every
//! mutating operation here, so `entropy == popcount(domain)` holds for all
//! cells at all times.

use crate::algorithm::bitset::TileBitset;
use crate::io::image::PIXEL_STRIDE;
use ndarray::Array2;

/// Outcome of intersecting a cell's domain with a constraint mask
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainChange {
    /// The mask removed nothing
    Unchanged,
    /// Candidates were removed and at least one remains
    Narrowed,
    /// Every candidate was removed; the cell is contradicted
    Emptied,
}

/// Per-cell state for one solve
///
/// Domains only ever lose candidates between resets; a collapsed cell always
/// holds a singleton domain with entropy zero.
pub struct CellGrid {
    width: usize,
    height: usize,
    domains: Vec<TileBitset>,
    collapsed: Array2<bool>,
    entropy: Array2<usize>,
    display: Vec<u8>,
}

impl CellGrid {
    /// Create a grid of uncollapsed cells, each holding the full domain
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        Self {
            width,
            height,
            domains: vec![TileBitset::full(tile_count); width * height],
            collapsed: Array2::from_elem((height, width), false),
            entropy: Array2::from_elem((height, width), tile_count),
            display: vec![0; width * height * PIXEL_STRIDE],
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major cell index for a grid position
    pub const fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Domain bitset of a cell by row-major index
    pub fn domain(&self, cell: usize) -> Option<&TileBitset> {
        self.domains.get(cell)
    }

    /// Test whether a cell has been collapsed
    pub fn is_collapsed(&self, row: usize, col: usize) -> bool {
        self.collapsed.get([row, col]).copied().unwrap_or(false)
    }

    /// Cached per-cell entropy (domain population counts)
    pub const fn entropy(&self) -> &Array2<usize> {
        &self.entropy
    }

    /// Row-major RGBA display buffer, 4 bytes per cell
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    /// Fix a cell to a single tile
    ///
    /// Shrinks the domain to a singleton, marks the cell collapsed, zeroes
    /// its entropy, and paints the exact color supplied by the caller.
    pub fn collapse(&mut self, row: usize, col: usize, tile: usize, color: [u8; 4]) {
        let cell = self.index_of(row, col);
        if let Some(domain) = self.domains.get_mut(cell) {
            domain.clear();
            domain.insert(tile);
        }
        if let Some(flag) = self.collapsed.get_mut([row, col]) {
            *flag = true;
        }
        if let Some(slot) = self.entropy.get_mut([row, col]) {
            *slot = 0;
        }
        self.write_color(cell, color);
    }

    /// Intersect a cell's domain with a constraint mask
    ///
    /// Refreshes the entropy cache when the domain shrinks and reports what
    /// happened so propagation can decide whether to revisit the cell.
    pub fn constrain(&mut self, row: usize, col: usize, mask: &TileBitset) -> DomainChange {
        let cell = self.index_of(row, col);
        let Some(domain) = self.domains.get_mut(cell) else {
            return DomainChange::Unchanged;
        };

        if !domain.constrain_with(mask) {
            return DomainChange::Unchanged;
        }

        let population = domain.count();
        if let Some(slot) = self.entropy.get_mut([row, col]) {
            *slot = population;
        }

        if population == 0 {
            DomainChange::Emptied
        } else {
            DomainChange::Narrowed
        }
    }

    /// Write a cell's display pixel
    pub fn write_color(&mut self, cell: usize, color: [u8; 4]) {
        let offset = cell * PIXEL_STRIDE;
        if let Some(slot) = self.display.get_mut(offset..offset + PIXEL_STRIDE) {
            slot.copy_from_slice(&color);
        }
    }

    /// Paint every cell's display pixel with one color
    pub fn fill_display(&mut self, color: [u8; 4]) {
        for cell in 0..self.cell_count() {
            self.write_color(cell, color);
        }
    }

    /// Restore every cell to the uncollapsed full domain
    pub fn reset(&mut self, tile_count: usize) {
        for domain in &mut self.domains {
            *domain = TileBitset::full(tile_count);
        }
        self.collapsed.fill(false);
        self.entropy.fill(tile_count);
    }
}
