//! Validates tile extraction: wraparound, deduplication, and scan-order determinism

use overweave::SolverError;
use overweave::io::image::Exemplar;
use overweave::spatial::tiles::TileCatalog;

fn exemplar_from_pixels(width: usize, height: usize, pixels: &[[u8; 4]]) -> Exemplar {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    Exemplar::from_rgba8(width, height, data).expect("valid test buffer")
}

// Nine distinct colors laid out 3x3, so every extracted tile is unique
fn distinct_3x3() -> Exemplar {
    let mut pixels = Vec::with_capacity(9);
    for y in 0..3u8 {
        for x in 0..3u8 {
            pixels.push([x * 60, y * 60, 255 - x * 30 - y * 30, 255]);
        }
    }
    exemplar_from_pixels(3, 3, &pixels)
}

#[test]
fn test_four_distinct_unit_tiles() {
    let pixels = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 255, 255],
    ];
    let exemplar = exemplar_from_pixels(2, 2, &pixels);
    let catalog = TileCatalog::from_exemplar(&exemplar, 1).expect("valid catalog");

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.frequencies(), &[1, 1, 1, 1]);
    assert_eq!(catalog.total_weight(), 4);

    // Canonical indices follow row-major scan order of the source
    let map = catalog.position_map();
    assert_eq!(map[[0, 0]], 0);
    assert_eq!(map[[0, 1]], 1);
    assert_eq!(map[[1, 0]], 2);
    assert_eq!(map[[1, 1]], 3);

    for (index, &pixel) in pixels.iter().enumerate() {
        assert_eq!(catalog.centre(index), Some(pixel));
    }
}

#[test]
fn test_uniform_exemplar_collapses_to_one_tile() {
    let pixels = vec![[90, 120, 150, 255]; 16];
    let exemplar = exemplar_from_pixels(4, 4, &pixels);
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.frequencies(), &[16]);
    assert!(catalog.position_map().iter().all(|&index| index == 0));
}

#[test]
fn test_degenerate_single_pixel_exemplar() {
    let exemplar = exemplar_from_pixels(1, 1, &[[5, 6, 7, 255]]);
    let catalog = TileCatalog::from_exemplar(&exemplar, 1).expect("valid catalog");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.frequencies(), &[1]);
    assert_eq!(catalog.centre(0), Some([5, 6, 7, 255]));
}

#[test]
fn test_extraction_wraps_at_borders() {
    let exemplar = distinct_3x3();
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");

    // Every shifted window is distinct, so nothing deduplicates
    assert_eq!(catalog.len(), 9);
    assert!(catalog.frequencies().iter().all(|&count| count == 1));

    // The tile anchored at (2, 2) reads its far corner from (1, 1)
    let tile = catalog.position_map()[[2, 2]];
    let far_corner = catalog.tile_pixel(tile, 2, 2).expect("in range");
    assert_eq!(far_corner, exemplar.pixel_wrapped(1, 1));
}

#[test]
fn test_centre_color_sits_at_block_middle() {
    let exemplar = distinct_3x3();
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");

    // Block anchored at (0, 0) has its centre pixel at source (1, 1)
    let tile = catalog.position_map()[[0, 0]];
    assert_eq!(catalog.centre(tile), Some(exemplar.pixel_wrapped(1, 1)));
}

#[test]
fn test_catalog_is_deterministic() {
    let exemplar = distinct_3x3();
    let first = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");
    let second = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");

    assert_eq!(first.len(), second.len());
    assert_eq!(first.frequencies(), second.frequencies());
    assert_eq!(first.position_map(), second.position_map());
    for tile in 0..first.len() {
        assert_eq!(first.centre(tile), second.centre(tile));
    }
}

#[test]
fn test_even_tile_size_rejected() {
    let exemplar = distinct_3x3();
    let err = TileCatalog::from_exemplar(&exemplar, 2).unwrap_err();
    assert!(matches!(err, SolverError::InvalidParameter { .. }));
}

#[test]
fn test_oversized_tile_rejected() {
    let exemplar = distinct_3x3();
    let err = TileCatalog::from_exemplar(&exemplar, 5).unwrap_err();
    assert!(matches!(err, SolverError::InvalidParameter { .. }));
}

#[test]
fn test_malformed_pixel_buffer_rejected() {
    let err = Exemplar::from_rgba8(2, 2, vec![0; 7]).unwrap_err();
    assert!(matches!(err, SolverError::InvalidSourceData { .. }));

    let err = Exemplar::from_rgba8(0, 3, Vec::new()).unwrap_err();
    assert!(matches!(err, SolverError::InvalidSourceData { .. }));
}

#[test]
fn test_tile_pixel_bounds() {
    let exemplar = distinct_3x3();
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");

    assert!(catalog.tile_pixel(0, 2, 2).is_some());
    assert!(catalog.tile_pixel(0, 3, 0).is_none());
    assert!(catalog.tile_pixel(99, 0, 0).is_none());
}
