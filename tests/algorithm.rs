//! Validates bitset operations, adjacency precompute, and propagation behavior

use overweave::algorithm::adjacency::{AdjacencyTable, Direction};
use overweave::algorithm::bitset::TileBitset;
use overweave::algorithm::propagation::{Propagation, propagate_from};
use overweave::io::image::Exemplar;
use overweave::spatial::grid::CellGrid;
use overweave::spatial::tiles::TileCatalog;

fn exemplar_from_pixels(width: usize, height: usize, pixels: &[[u8; 4]]) -> Exemplar {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    Exemplar::from_rgba8(width, height, data).expect("valid test buffer")
}

// Two vertical stripes, enough tile variety to exercise the precompute
fn striped_exemplar(width: usize, height: usize) -> Exemplar {
    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            if (x / 2) % 2 == 0 {
                pixels.push([200, 40, 40, 255]);
            } else {
                pixels.push([40, 40, 200, 255]);
            }
        }
    }
    exemplar_from_pixels(width, height, &pixels)
}

#[test]
fn test_bitset_insert_contains_count() {
    let mut set = TileBitset::empty(40);
    assert!(set.is_empty());

    set.insert(0);
    set.insert(7);
    set.insert(39);
    set.insert(99); // out of range, ignored

    assert_eq!(set.count(), 3);
    assert!(set.contains(0));
    assert!(set.contains(39));
    assert!(!set.contains(1));
    assert!(!set.contains(99));
    assert_eq!(set.to_vec(), vec![0, 7, 39]);
}

#[test]
fn test_bitset_constrain_reports_change() {
    let mut domain = TileBitset::full(10);

    let unchanged = domain.constrain_with(&TileBitset::full(10));
    assert!(!unchanged);
    assert_eq!(domain.count(), 10);

    let mut mask = TileBitset::empty(10);
    mask.insert(2);
    mask.insert(5);

    assert!(domain.constrain_with(&mask));
    assert_eq!(domain.to_vec(), vec![2, 5]);

    // Same mask again removes nothing
    assert!(!domain.constrain_with(&mask));
}

#[test]
fn test_bitset_constrain_to_empty() {
    let mut domain = TileBitset::singleton(8, 3);
    let mask = TileBitset::singleton(8, 4);

    assert!(domain.constrain_with(&mask));
    assert!(domain.is_empty());
    assert_eq!(domain.count(), 0);
}

#[test]
fn test_bitset_union_and_clear() {
    let mut combined = TileBitset::empty(64);
    combined.union_with(&TileBitset::singleton(64, 1));
    combined.union_with(&TileBitset::singleton(64, 33));
    assert_eq!(combined.to_vec(), vec![1, 33]);

    combined.clear();
    assert!(combined.is_empty());
}

#[test]
fn test_direction_opposites() {
    for direction in Direction::ALL {
        assert_eq!(direction.opposite().opposite(), direction);
    }
    assert_eq!(Direction::Up.opposite(), Direction::Down);
    assert_eq!(Direction::Right.opposite(), Direction::Left);
    assert_eq!(Direction::Up.index(), 0);
    assert_eq!(Direction::Left.index(), 3);
}

#[test]
fn test_adjacency_symmetry() {
    let exemplar = striped_exemplar(8, 8);
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");
    let table = AdjacencyTable::precompute(&catalog);

    for first in 0..catalog.len() {
        for direction in Direction::ALL {
            let forward = table.compatible(first, direction).expect("row exists");
            for second in 0..catalog.len() {
                let backward = table
                    .compatible(second, direction.opposite())
                    .expect("row exists");
                assert_eq!(
                    forward.contains(second),
                    backward.contains(first),
                    "asymmetry between tiles {first} and {second}"
                );
            }
        }
    }
}

#[test]
fn test_adjacency_unconstrained_for_unit_tiles() {
    // With 1x1 tiles there is no overlap region, so nothing can conflict
    let pixels = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [255, 255, 0, 255],
    ];
    let exemplar = exemplar_from_pixels(2, 2, &pixels);
    let catalog = TileCatalog::from_exemplar(&exemplar, 1).expect("valid catalog");
    assert_eq!(catalog.len(), 4);

    let table = AdjacencyTable::precompute(&catalog);
    for tile in 0..4 {
        for direction in Direction::ALL {
            let row = table.compatible(tile, direction).expect("row exists");
            assert_eq!(row.count(), 4);
        }
    }
}

#[test]
fn test_adjacency_accepts_source_neighbors() {
    // Tiles cut from neighboring source positions always share their overlap
    let exemplar = striped_exemplar(8, 8);
    let catalog = TileCatalog::from_exemplar(&exemplar, 3).expect("valid catalog");
    let table = AdjacencyTable::precompute(&catalog);

    let map = catalog.position_map();
    for y in 0..7 {
        for x in 0..7 {
            let here = map[[y, x]];
            let right = map[[y, x + 1]];
            let below = map[[y + 1, x]];

            let right_row = table.compatible(here, Direction::Right).expect("row");
            assert!(right_row.contains(right));
            let down_row = table.compatible(here, Direction::Down).expect("row");
            assert!(down_row.contains(below));
        }
    }
}

#[test]
fn test_propagation_surfaces_contradiction() {
    let pixels = [[10, 10, 10, 255], [240, 240, 240, 255]];
    let exemplar = exemplar_from_pixels(2, 1, &pixels);
    let catalog = TileCatalog::from_exemplar(&exemplar, 1).expect("valid catalog");
    assert_eq!(catalog.len(), 2);

    // Horizontal adjacency deliberately impossible for both tiles
    let mut rows = Vec::new();
    for _ in 0..2 {
        rows.push(TileBitset::full(2)); // Up
        rows.push(TileBitset::empty(2)); // Right
        rows.push(TileBitset::full(2)); // Down
        rows.push(TileBitset::empty(2)); // Left
    }
    let table = AdjacencyTable::from_bitsets(rows).expect("well-formed rows");

    let mut grid = CellGrid::new(2, 1, 2);
    grid.collapse(0, 0, 0, [10, 10, 10, 255]);

    let outcome = propagate_from(&mut grid, &table, &catalog, [0, 0]);
    assert_eq!(outcome, Propagation::ContradictionAt([0, 1]));

    let emptied = grid.domain(grid.index_of(0, 1)).expect("cell exists");
    assert!(emptied.is_empty());
    assert_eq!(grid.entropy()[[0, 1]], 0);
}

#[test]
fn test_propagation_skips_grid_boundary() {
    let pixels = [[77, 0, 77, 255]];
    let exemplar = exemplar_from_pixels(1, 1, &pixels);
    let catalog = TileCatalog::from_exemplar(&exemplar, 1).expect("valid catalog");
    let table = AdjacencyTable::precompute(&catalog);

    let mut grid = CellGrid::new(1, 1, 1);
    grid.collapse(0, 0, 0, [77, 0, 77, 255]);

    // All four neighbors are outside the grid; the wave settles immediately
    let outcome = propagate_from(&mut grid, &table, &catalog, [0, 0]);
    assert_eq!(outcome, Propagation::Settled);
}

#[test]
fn test_from_bitsets_rejects_ragged_rows() {
    let rows = vec![TileBitset::full(2), TileBitset::full(2)];
    assert!(AdjacencyTable::from_bitsets(rows).is_err());

    let mismatched = vec![
        TileBitset::full(3),
        TileBitset::full(3),
        TileBitset::full(3),
        TileBitset::full(3),
    ];
    assert!(AdjacencyTable::from_bitsets(mismatched).is_err());
}
