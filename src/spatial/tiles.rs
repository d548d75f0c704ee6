//! Canonical tile extraction and catalog queries
//!
//! Every source pixel position yields one N×N tile read with toroidal
//! wraparound, so tiles are well-defined at the image borders. Tiles are
//! deduplicated by exact pixel content; the surviving canonical tiles carry
//! an occurrence count used as the sampling weight throughout the solve.

use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Exemplar, PIXEL_STRIDE};
use ndarray::Array2;
use std::collections::HashMap;

/// Canonical tile catalog extracted from an exemplar image
///
/// Canonical indices follow the row-major scan order of the source, so two
/// runs over the same exemplar always produce identical catalogs. This
/// ordering underlies the reproducibility of every later seeded choice.
pub struct TileCatalog {
    tile_size: usize,
    pixels: Vec<u8>,
    frequencies: Vec<u32>,
    centres: Vec<[u8; 4]>,
    position_map: Array2<usize>,
}

impl TileCatalog {
    /// Extract and canonicalize all overlapping tiles from the exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `tile_size` is even (zero included) or
    /// exceeds either exemplar dimension.
    pub fn from_exemplar(exemplar: &Exemplar, tile_size: usize) -> Result<Self> {
        if tile_size % 2 == 0 {
            return Err(invalid_parameter("tile_size", &tile_size, &"must be odd"));
        }
        if tile_size > exemplar.width() || tile_size > exemplar.height() {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!(
                    "exceeds exemplar dimensions {}x{}",
                    exemplar.width(),
                    exemplar.height()
                ),
            ));
        }

        let width = exemplar.width();
        let height = exemplar.height();
        let bytes_per_tile = tile_size * tile_size * PIXEL_STRIDE;
        let centre_offset = tile_size / 2;

        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut pixels = Vec::new();
        let mut frequencies: Vec<u32> = Vec::new();
        let mut centres = Vec::new();
        let mut position_map = Array2::zeros((height, width));

        let mut block = vec![0u8; bytes_per_tile];
        for y in 0..height {
            for x in 0..width {
                fill_block(&mut block, exemplar, x, y, tile_size);

                let index = if let Some(&existing) = seen.get(&block) {
                    if let Some(count) = frequencies.get_mut(existing) {
                        *count += 1;
                    }
                    existing
                } else {
                    let fresh = frequencies.len();
                    seen.insert(block.clone(), fresh);
                    pixels.extend_from_slice(&block);
                    frequencies.push(1);

                    let [r, g, b, _] =
                        exemplar.pixel_wrapped(x + centre_offset, y + centre_offset);
                    centres.push([r, g, b, u8::MAX]);
                    fresh
                };

                if let Some(slot) = position_map.get_mut([y, x]) {
                    *slot = index;
                }
            }
        }

        Ok(Self {
            tile_size,
            pixels,
            frequencies,
            centres,
            position_map,
        })
    }

    /// Number of canonical tiles
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Test whether the catalog holds no tiles
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Side length of every tile
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Occurrence counts indexed by canonical tile, used as sampling weights
    pub fn frequencies(&self) -> &[u32] {
        &self.frequencies
    }

    /// Sum of all tile frequencies (equals the exemplar's pixel count)
    pub fn total_weight(&self) -> u64 {
        self.frequencies.iter().map(|&count| u64::from(count)).sum()
    }

    /// Center pixel color of a canonical tile
    pub fn centre(&self, tile: usize) -> Option<[u8; 4]> {
        self.centres.get(tile).copied()
    }

    /// RGBA pixel at local tile coordinates (x, y)
    pub fn tile_pixel(&self, tile: usize, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.tile_size || y >= self.tile_size {
            return None;
        }

        let offset = (tile * self.tile_size * self.tile_size + y * self.tile_size + x)
            * PIXEL_STRIDE;
        self.pixels
            .get(offset..offset + PIXEL_STRIDE)
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
    }

    /// Canonical tile index at each source position (diagnostics view)
    pub const fn position_map(&self) -> &Array2<usize> {
        &self.position_map
    }
}

// Reads one wrapped N×N block into the reused scratch buffer, alpha forced opaque
fn fill_block(block: &mut [u8], exemplar: &Exemplar, x: usize, y: usize, tile_size: usize) {
    for tile_y in 0..tile_size {
        for tile_x in 0..tile_size {
            let [r, g, b, _] = exemplar.pixel_wrapped(x + tile_x, y + tile_y);
            let offset = (tile_y * tile_size + tile_x) * PIXEL_STRIDE;
            if let Some(slot) = block.get_mut(offset..offset + PIXEL_STRIDE) {
                slot.copy_from_slice(&[r, g, b, u8::MAX]);
            }
        }
    }
}
