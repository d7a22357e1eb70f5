//! Board properties checked over seeded random grids

use fruit_drop::core::{find_matches, resolve_all, Grid, SimpleRng};
use fruit_drop::types::{FruitType, BOARD_HEIGHT, BOARD_WIDTH, MIN_MATCH_SIZE};

/// Fill roughly `percent`% of the board with random fruits, ignoring gravity
fn random_grid(seed: u32, percent: u32) -> Grid {
    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if rng.next_range(100) < percent {
                let fruit = rng.pick(&FruitType::ALL).unwrap();
                grid.place(x, y, fruit);
            }
        }
    }
    grid
}

#[test]
fn test_gravity_is_idempotent() {
    for seed in 1..=50 {
        let mut grid = random_grid(seed, 40);
        while grid.collapse_columns() {}
        let settled = grid.clone();

        assert!(!grid.collapse_columns(), "seed {seed}: settled grid moved");
        assert_eq!(grid, settled);
    }
}

#[test]
fn test_gravity_preserves_cell_count() {
    for seed in 1..=20 {
        let mut grid = random_grid(seed, 30);
        let before = grid.occupied_count();
        while grid.collapse_columns() {}
        assert_eq!(grid.occupied_count(), before);
    }
}

#[test]
fn test_every_match_has_minimum_size() {
    for seed in 1..=50 {
        let grid = random_grid(seed, 70);
        for group in find_matches(&grid) {
            assert!(group.len() >= MIN_MATCH_SIZE, "seed {seed}: {group:?}");
            for &(x, y) in &group.cells {
                assert_eq!(grid.get(x as i8, y as i8), Some(Some(group.fruit)));
            }
        }
    }
}

#[test]
fn test_region_of_three_is_never_cleared() {
    let mut grid = Grid::from_rows(&["B..", "BB.", "CPO"]);
    let before = grid.occupied_count();
    assert!(resolve_all(&mut grid, 1).is_empty());
    assert_eq!(grid.occupied_count(), before);
}

#[test]
fn test_chain_terminates_within_occupied_cells() {
    for seed in 1..=50 {
        let mut grid = random_grid(seed, 80);
        let occupied = grid.occupied_count() as u32;
        let reports = resolve_all(&mut grid, 1);

        assert!(reports.len() as u32 <= occupied);
        let cleared: u32 = reports.iter().map(|r| r.cleared).sum();
        assert_eq!(grid.occupied_count() as u32, occupied - cleared);
        // Nothing left to clear once the sequence settles.
        assert!(find_matches(&grid).is_empty());
    }
}

#[test]
fn test_chain_indices_are_consecutive() {
    for seed in 1..=30 {
        let mut grid = random_grid(seed, 80);
        let reports = resolve_all(&mut grid, 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.chain, i as u32 + 1);
            assert_eq!(report.cells.len() as u32, report.cleared);
        }
    }
}

#[test]
fn test_l_shaped_region_scores_first_pass() {
    // Four cherries in an L at column 0.
    let mut grid = Grid::from_rows(&["C.", "C.", "CC"]);
    let reports = resolve_all(&mut grid, 1);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].cleared, 4);
    assert_eq!(reports[0].score_delta, 4 * 10 * 2);
    assert!(grid.is_empty());
}
