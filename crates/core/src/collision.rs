//! Collision module - does a piece fit the grid
//!
//! Cells above the visible board (`y < 0`) are allowed as long as their column is
//! in range; everything else must be on the board and land on an empty cell.

use crate::grid::Grid;
use crate::pieces::ActivePiece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if every occupied cell of `piece` is in bounds and free on `grid`.
pub fn fits(piece: &ActivePiece, grid: &Grid) -> bool {
    piece.cells().iter().all(|&(x, y, _)| {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !grid.is_occupied(x, y)
    })
}

/// True if `piece` fits after translating it by (dx, dy)
pub fn fits_at(piece: &ActivePiece, grid: &Grid, dx: i8, dy: i8) -> bool {
    fits(&piece.translated(dx, dy), grid)
}

/// Rows the piece can still fall before it is blocked
pub fn drop_distance(piece: &ActivePiece, grid: &Grid) -> u8 {
    let mut distance = 0u8;
    while fits_at(piece, grid, 0, distance as i8 + 1) {
        distance += 1;
    }
    distance
}
