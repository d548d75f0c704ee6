//! Adjacency precompute: per-tile, per-direction compatibility bitsets
//!
//! For every ordered tile pair and direction, the precompute pass compares
//! the pixels the two tiles would share if their centers sat one cell apart.
//! Results are packed into bitsets so propagation works word-at-a-time
//! instead of walking candidate lists. This O(T²·N²) pass is the dominant
//! cost of the whole pipeline.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::tiles::TileCatalog;

/// The four cardinal neighbor directions in fixed table order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Row above (index 0)
    Up,
    /// Column to the right (index 1)
    Right,
    /// Row below (index 2)
    Down,
    /// Column to the left (index 3)
    Left,
}

impl Direction {
    /// All directions in table index order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Stable index used for adjacency table addressing
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back at the origin cell
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Row/column offset of the neighboring cell
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::Up => [-1, 0],
            Self::Right => [0, 1],
            Self::Down => [1, 0],
            Self::Left => [0, -1],
        }
    }
}

/// Precomputed tile compatibility table
///
/// A flat array of bitsets indexed by `tile * 4 + direction`; bit `u` of the
/// row for `(t, d)` is set iff tile `u` may sit adjacent to `t` in direction
/// `d` without a pixel conflict on the overlap region. Immutable once built
/// and shared read-only by propagation.
pub struct AdjacencyTable {
    bitsets: Vec<TileBitset>,
    tile_count: usize,
}

impl AdjacencyTable {
    /// Build the table by comparing every ordered tile pair in each direction
    pub fn precompute(catalog: &TileCatalog) -> Self {
        let tile_count = catalog.len();
        let mut bitsets = Vec::with_capacity(tile_count * 4);

        for first in 0..tile_count {
            for direction in Direction::ALL {
                let mut compatible = TileBitset::empty(tile_count);
                for second in 0..tile_count {
                    if overlap_matches(catalog, first, second, direction) {
                        compatible.insert(second);
                    }
                }
                bitsets.push(compatible);
            }
        }

        Self {
            bitsets,
            tile_count,
        }
    }

    /// Assemble a table from explicit rows, in `tile * 4 + direction` order
    ///
    /// Intended for synthetic constraint sets and tests; `precompute` is the
    /// production path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the row count is not a multiple of four
    /// or any row's capacity disagrees with the implied tile count.
    pub fn from_bitsets(bitsets: Vec<TileBitset>) -> Result<Self> {
        if bitsets.len() % 4 != 0 {
            return Err(invalid_parameter(
                "bitsets",
                &bitsets.len(),
                &"expected four directional rows per tile",
            ));
        }

        let tile_count = bitsets.len() / 4;
        if bitsets.iter().any(|row| row.capacity() != tile_count) {
            return Err(invalid_parameter(
                "bitsets",
                &bitsets.len(),
                &format!("every row must cover {tile_count} tiles"),
            ));
        }

        Ok(Self {
            bitsets,
            tile_count,
        })
    }

    /// Bitset of tiles that may sit in `direction` from `tile`
    pub fn compatible(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.bitsets.get(tile * 4 + direction.index())
    }

    /// Number of tiles the table covers
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }
}

// Two tiles whose centers sit one cell apart share an (N-1)-wide pixel band;
// compatibility requires exact RGB equality across it (alpha ignored). With
// N=1 the band is empty and every pair is compatible.
fn overlap_matches(
    catalog: &TileCatalog,
    first: usize,
    second: usize,
    direction: Direction,
) -> bool {
    let size = catalog.tile_size() as i32;
    let [row_offset, col_offset] = direction.offset();

    for y in row_offset.max(0)..(size + row_offset.min(0)) {
        for x in col_offset.max(0)..(size + col_offset.min(0)) {
            let first_pixel = catalog.tile_pixel(first, x as usize, y as usize);
            let second_pixel =
                catalog.tile_pixel(second, (x - col_offset) as usize, (y - row_offset) as usize);

            match (first_pixel, second_pixel) {
                (Some([r1, g1, b1, _]), Some([r2, g2, b2, _])) => {
                    if r1 != r2 || g1 != g2 || b1 != b2 {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    true
}
