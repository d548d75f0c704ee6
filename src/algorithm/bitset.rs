use bitvec::prelude::*;
use std::fmt;

/// Fixed-width bitset over canonical tile indices
///
/// Backed by 32-bit words, so a domain or adjacency row costs
/// `ceil(tile_count / 32)` words however large the catalog grows, and the
/// hot intersection/union paths run word-at-a-time. Indices are the 0-based
/// canonical indices assigned during extraction.
#[derive(Clone, Debug)]
pub struct TileBitset {
    bits: BitVec<u32, Lsb0>,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn empty(tile_count: usize) -> Self {
        Self {
            bits: bitvec![u32, Lsb0; 0; tile_count],
        }
    }

    /// Create a bitset containing every tile
    pub fn full(tile_count: usize) -> Self {
        // Filling through the slice view keeps the final word's padding bits
        // zero, which the word-level change detection relies on
        let mut bits = bitvec![u32, Lsb0; 0; tile_count];
        bits.fill(true);
        Self { bits }
    }

    /// Create a bitset holding exactly one tile
    pub fn singleton(tile_count: usize, tile: usize) -> Self {
        let mut bitset = Self::empty(tile_count);
        bitset.insert(tile);
        bitset
    }

    /// Insert a tile index; out-of-range indices are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect with a mask in place, reporting whether any bit was cleared
    ///
    /// Word-level so the cost stays proportional to the packed width, not
    /// the tile count.
    pub fn constrain_with(&mut self, mask: &Self) -> bool {
        let mut changed = false;
        for (word, &mask_word) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(mask.bits.as_raw_slice())
        {
            let next = *word & mask_word;
            changed |= next != *word;
            *word = next;
        }
        changed
    }

    /// Merge another bitset into this one in place
    pub fn union_with(&mut self, other: &Self) {
        for (word, &other_word) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *word |= other_word;
        }
    }

    /// Remove every tile
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Width of the index space this bitset covers
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Iterate set tile indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all set tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
