//! Breadth-first constraint propagation across the solve grid

use crate::algorithm::adjacency::{AdjacencyTable, Direction};
use crate::algorithm::bitset::TileBitset;
use crate::algorithm::selection::blended_color;
use crate::spatial::grid::{CellGrid, DomainChange};
use crate::spatial::tiles::TileCatalog;
use std::collections::VecDeque;

/// Result of one propagation wave
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The wave reached a fixed point with every domain non-empty
    Settled,
    /// A domain emptied at this grid position (row, col)
    ContradictionAt([usize; 2]),
}

/// Propagate the restriction at `start` until no domain changes
///
/// A collapse can restrict cells several hops away: a neighbor's allowed set
/// is the union of the adjacency rows of every tile still in the current
/// cell's domain, not just the tile that was placed, so updating direct
/// neighbors alone never reaches arc consistency. Cells whose domain narrows
/// re-enter the worklist until the wave settles. The worklist is an explicit
/// deque; grids run to thousands of cells and recursion depth must not scale
/// with them.
///
/// Neighbors beyond the grid edge are skipped: unlike tile extraction, the
/// solve grid is finite and never wraps.
pub fn propagate_from(
    grid: &mut CellGrid,
    adjacency: &AdjacencyTable,
    catalog: &TileCatalog,
    start: [usize; 2],
) -> Propagation {
    let mut queue: VecDeque<[usize; 2]> = VecDeque::new();
    queue.push_back(start);

    // Scratch bitset reused across every neighbor visit
    let mut allowed = TileBitset::empty(adjacency.tile_count());

    while let Some([row, col]) = queue.pop_front() {
        for direction in Direction::ALL {
            let [row_offset, col_offset] = direction.offset();
            let next_row = row as i32 + row_offset;
            let next_col = col as i32 + col_offset;
            if next_row < 0 || next_col < 0 {
                continue;
            }

            let neighbor_row = next_row as usize;
            let neighbor_col = next_col as usize;
            if neighbor_row >= grid.height() || neighbor_col >= grid.width() {
                continue;
            }
            if grid.is_collapsed(neighbor_row, neighbor_col) {
                continue;
            }

            // Union of what every remaining candidate here permits next door
            allowed.clear();
            let Some(domain) = grid.domain(grid.index_of(row, col)) else {
                continue;
            };
            for tile in domain.iter() {
                if let Some(mask) = adjacency.compatible(tile, direction) {
                    allowed.union_with(mask);
                }
            }

            match grid.constrain(neighbor_row, neighbor_col, &allowed) {
                DomainChange::Unchanged => {}
                DomainChange::Emptied => {
                    return Propagation::ContradictionAt([neighbor_row, neighbor_col]);
                }
                DomainChange::Narrowed => {
                    let neighbor = grid.index_of(neighbor_row, neighbor_col);
                    if let Some(color) = grid
                        .domain(neighbor)
                        .and_then(|narrowed| blended_color(narrowed, catalog))
                    {
                        grid.write_color(neighbor, color);
                    }
                    queue.push_back([neighbor_row, neighbor_col]);
                }
            }
        }
    }

    Propagation::Settled
}
