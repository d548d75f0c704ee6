//! Weighted sampling over domains and minimum-entropy cell selection

use crate::algorithm::bitset::TileBitset;
use crate::spatial::grid::CellGrid;
use crate::spatial::tiles::TileCatalog;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded source for every stochastic choice in a solve
///
/// The tie-break draw and the weighted tile draw share one generator, so a
/// fixed seed replays an identical solve over the same catalog.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice of one index in `0..len`
    pub fn uniform_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }

    /// Frequency-weighted choice of one tile from a domain
    ///
    /// Draws a value in `[0, total_weight)` and walks the cumulative weight
    /// intervals, so each candidate tile is picked with probability
    /// proportional to its source frequency. A uniform pick over set bits
    /// would bias toward rare tiles. Returns `None` when the total weight is
    /// zero, which callers must treat as a bookkeeping failure.
    pub fn weighted_tile(&mut self, domain: &TileBitset, frequencies: &[u32]) -> Option<usize> {
        let total: u64 = domain
            .iter()
            .map(|tile| u64::from(frequencies.get(tile).copied().unwrap_or(0)))
            .sum();
        if total == 0 {
            return None;
        }

        let mut draw = self.rng.random_range(0..total);
        for tile in domain.iter() {
            let weight = u64::from(frequencies.get(tile).copied().unwrap_or(0));
            if draw < weight {
                return Some(tile);
            }
            draw -= weight;
        }

        None
    }
}

/// Find an uncollapsed cell with minimum entropy, breaking ties uniformly
///
/// The tie-break is uniform over the tied positions, not frequency-weighted;
/// weighting belongs to the tile draw, never to the cell choice. Returns
/// `None` when every cell is collapsed.
pub fn random_minimum_entropy_cell(
    grid: &CellGrid,
    selector: &mut RandomSelector,
) -> Option<[usize; 2]> {
    let mut minimum = usize::MAX;
    let mut tied: Vec<[usize; 2]> = Vec::new();

    for ((row, col), &value) in grid.entropy().indexed_iter() {
        if grid.is_collapsed(row, col) {
            continue;
        }
        if value < minimum {
            minimum = value;
            tied.clear();
            tied.push([row, col]);
        } else if value == minimum {
            tied.push([row, col]);
        }
    }

    if tied.is_empty() {
        return None;
    }

    let pick = selector.uniform_index(tied.len());
    tied.get(pick).copied()
}

/// Frequency-weighted average of the domain members' center colors
///
/// Returns `None` for an empty domain: the contradiction state must surface,
/// never be painted over with a stand-in color.
pub fn blended_color(domain: &TileBitset, catalog: &TileCatalog) -> Option<[u8; 4]> {
    let mut total_r: u64 = 0;
    let mut total_g: u64 = 0;
    let mut total_b: u64 = 0;
    let mut total_weight: u64 = 0;

    for tile in domain.iter() {
        let weight = u64::from(catalog.frequencies().get(tile).copied().unwrap_or(0));
        let Some([r, g, b, _]) = catalog.centre(tile) else {
            continue;
        };

        total_r += u64::from(r) * weight;
        total_g += u64::from(g) * weight;
        total_b += u64::from(b) * weight;
        total_weight += weight;
    }

    if total_weight == 0 {
        return None;
    }

    let round = |channel: u64| ((channel + total_weight / 2) / total_weight) as u8;
    Some([round(total_r), round(total_g), round(total_b), u8::MAX])
}
