//! Pieces module - polyomino shapes, fruit assignment and rotation
//!
//! Each [`ShapeKind`] owns a fixed table of rotation states; a state is a row-major
//! occupancy matrix. Consecutive states are exactly the 90° clockwise transform of each
//! other (`new[c][N-1-r] = old[r][c]` for an N×M source), so the fruit grid of a piece
//! can be co-rotated with the same transform and read back in row-major order.
//!
//! Kicks: when a rotation does not fit at the current origin, [`KICK_OFFSETS`] are
//! tried in order and the first fitting translation wins.

use crate::types::{FruitType, ShapeKind, BOARD_WIDTH};

/// Row-major occupancy matrix of one rotation state (1 = occupied)
pub type ShapeMatrix = &'static [&'static [u8]];

/// Every shape has exactly four occupied cells
pub const PIECE_CELLS: usize = 4;

/// Largest row/column extent of any rotation state
const MAX_EXTENT: usize = 4;

const I_STATES: &[ShapeMatrix] = &[&[&[1, 1, 1, 1]], &[&[1], &[1], &[1], &[1]]];

const O_STATES: &[ShapeMatrix] = &[&[&[1, 1], &[1, 1]]];

const T_STATES: &[ShapeMatrix] = &[
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

const L_STATES: &[ShapeMatrix] = &[
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

const J_STATES: &[ShapeMatrix] = &[
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const S_STATES: &[ShapeMatrix] = &[&[&[0, 1, 1], &[1, 1, 0]], &[&[1, 0], &[1, 1], &[0, 1]]];

const Z_STATES: &[ShapeMatrix] = &[&[&[1, 1, 0], &[0, 1, 1]], &[&[0, 1], &[1, 1], &[1, 0]]];

/// Rotation states of a shape kind, in clockwise order
pub fn rotation_states(kind: ShapeKind) -> &'static [ShapeMatrix] {
    match kind {
        ShapeKind::I => I_STATES,
        ShapeKind::O => O_STATES,
        ShapeKind::T => T_STATES,
        ShapeKind::L => L_STATES,
        ShapeKind::J => J_STATES,
        ShapeKind::S => S_STATES,
        ShapeKind::Z => Z_STATES,
    }
}

/// Occupancy matrix for a rotation index (taken modulo the state count)
pub fn get_shape(kind: ShapeKind, rotation: u8) -> ShapeMatrix {
    let states = rotation_states(kind);
    states[rotation as usize % states.len()]
}

/// Kick offsets tried, in order, after a rotation fails at the current origin
pub const KICK_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-2, 0),
    (2, 0),
    (0, -2),
    (0, 2),
];

/// Per-cell fruit layout of a piece, in the coordinate frame of its occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruitGrid {
    rows: usize,
    cols: usize,
    cells: [[Option<FruitType>; MAX_EXTENT]; MAX_EXTENT],
}

impl FruitGrid {
    /// Lay `fruits` over the occupied cells of `matrix` in row-major order
    pub fn from_matrix(matrix: ShapeMatrix, fruits: &[FruitType; PIECE_CELLS]) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, |row| row.len());
        let mut cells = [[None; MAX_EXTENT]; MAX_EXTENT];
        let mut next = fruits.iter();

        for (r, row) in matrix.iter().enumerate() {
            for (c, &occupied) in row.iter().enumerate() {
                if occupied != 0 {
                    cells[r][c] = next.next().copied();
                }
            }
        }

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<FruitType> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row][col]
    }

    /// 90° clockwise transform: `new[c][N-1-r] = old[r][c]`
    pub fn rotate_cw(&self) -> Self {
        let n = self.rows;
        let mut cells = [[None; MAX_EXTENT]; MAX_EXTENT];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// True if the occupied cells line up exactly with `matrix`
    pub fn matches(&self, matrix: ShapeMatrix) -> bool {
        let cols = matrix.first().map_or(0, |row| row.len());
        if matrix.len() != self.rows || cols != self.cols {
            return false;
        }
        matrix.iter().enumerate().all(|(r, row)| {
            row.iter()
                .enumerate()
                .all(|(c, &occupied)| (occupied != 0) == self.cells[r][c].is_some())
        })
    }

    /// Fruits of the occupied cells in row-major order
    pub fn fruits(&self) -> [FruitType; PIECE_CELLS] {
        let mut out = [FruitType::Cherry; PIECE_CELLS];
        let mut i = 0usize;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if let Some(fruit) = self.cells[r][c] {
                    if i < PIECE_CELLS {
                        out[i] = fruit;
                    }
                    i += 1;
                }
            }
        }
        out
    }
}

/// Active falling piece
///
/// `fruits` holds one fruit per occupied cell of the current rotation state, in
/// row-major order. It is fixed at spawn and only ever co-rotated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub fruits: [FruitType; PIECE_CELLS],
}

impl ActivePiece {
    /// Create a piece at the spawn position: horizontally centered on row 0, rotation 0
    pub fn spawn(kind: ShapeKind, fruits: [FruitType; PIECE_CELLS]) -> Self {
        let width = get_shape(kind, 0)[0].len() as i8;
        Self {
            kind,
            rotation: 0,
            x: (BOARD_WIDTH as i8 - width) / 2,
            y: 0,
            fruits,
        }
    }

    /// Occupancy matrix of the current rotation state
    pub fn matrix(&self) -> ShapeMatrix {
        get_shape(self.kind, self.rotation)
    }

    pub fn width(&self) -> u8 {
        self.matrix().first().map_or(0, |row| row.len() as u8)
    }

    pub fn height(&self) -> u8 {
        self.matrix().len() as u8
    }

    /// Absolute `(x, y, fruit)` of every occupied cell, row-major
    pub fn cells(&self) -> [(i8, i8, FruitType); PIECE_CELLS] {
        let mut out = [(0, 0, FruitType::Cherry); PIECE_CELLS];
        let mut i = 0usize;
        for (r, row) in self.matrix().iter().enumerate() {
            for (c, &occupied) in row.iter().enumerate() {
                if occupied != 0 && i < PIECE_CELLS {
                    out[i] = (self.x + c as i8, self.y + r as i8, self.fruits[i]);
                    i += 1;
                }
            }
        }
        out
    }

    /// Same shape and fruits, origin shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rotate 90° clockwise around the origin, co-rotating the fruit assignment.
    ///
    /// The O shape has a single rotation state and is returned unchanged.
    pub fn rotated_cw(&self) -> Self {
        if self.kind == ShapeKind::O {
            return *self;
        }

        let states = rotation_states(self.kind);
        let rotation = ((self.rotation as usize + 1) % states.len()) as u8;
        let rotated = FruitGrid::from_matrix(self.matrix(), &self.fruits).rotate_cw();
        debug_assert!(rotated.matches(get_shape(self.kind, rotation)));

        Self {
            rotation,
            fruits: rotated.fruits(),
            ..*self
        }
    }
}

/// Rotate clockwise with kicks.
///
/// Tries the rotated piece at its current origin, then each of [`KICK_OFFSETS`].
/// Returns the first fitting piece and the kick that was applied, or `None` if the
/// rotation is rejected.
pub fn try_rotate(
    piece: &ActivePiece,
    fits: impl Fn(&ActivePiece) -> bool,
) -> Option<(ActivePiece, (i8, i8))> {
    let rotated = piece.rotated_cw();
    if fits(&rotated) {
        return Some((rotated, (0, 0)));
    }

    KICK_OFFSETS.iter().find_map(|&(dx, dy)| {
        let kicked = rotated.translated(dx, dy);
        fits(&kicked).then_some((kicked, (dx, dy)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FruitType::*;

    fn count_occupied(matrix: ShapeMatrix) -> usize {
        matrix.iter().flat_map(|row| row.iter()).filter(|&&v| v != 0).count()
    }

    #[test]
    fn test_rotation_state_counts() {
        assert_eq!(rotation_states(ShapeKind::O).len(), 1);
        assert_eq!(rotation_states(ShapeKind::I).len(), 2);
        assert_eq!(rotation_states(ShapeKind::S).len(), 2);
        assert_eq!(rotation_states(ShapeKind::Z).len(), 2);
        assert_eq!(rotation_states(ShapeKind::T).len(), 4);
        assert_eq!(rotation_states(ShapeKind::L).len(), 4);
        assert_eq!(rotation_states(ShapeKind::J).len(), 4);
    }

    #[test]
    fn test_every_state_has_four_cells() {
        for kind in ShapeKind::ALL {
            for state in rotation_states(kind) {
                assert_eq!(count_occupied(state), PIECE_CELLS, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_state_table_follows_clockwise_transform() {
        for kind in ShapeKind::ALL {
            let states = rotation_states(kind);
            for (i, state) in states.iter().enumerate() {
                let next = states[(i + 1) % states.len()];
                let rotated = FruitGrid::from_matrix(state, &[Cherry; 4]).rotate_cw();
                assert!(rotated.matches(next), "{:?} state {}", kind, i);
            }
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(ActivePiece::spawn(ShapeKind::I, [Cherry; 4]).x, 3);
        assert_eq!(ActivePiece::spawn(ShapeKind::O, [Cherry; 4]).x, 4);
        assert_eq!(ActivePiece::spawn(ShapeKind::T, [Cherry; 4]).x, 3);
        assert_eq!(ActivePiece::spawn(ShapeKind::T, [Cherry; 4]).y, 0);
    }

    #[test]
    fn test_l_rotation_moves_fruits_with_cells() {
        // State 0: [[0,0,1],[1,1,1]] -> fruits A at (2,0); B,C,D along row 1.
        let piece = ActivePiece::spawn(ShapeKind::L, [Grape, Cherry, Peach, Orange]);
        let rotated = piece.rotated_cw();

        // State 1: [[1,0],[1,0],[1,1]]; the row-1 fruits now run down column 0 and the
        // top-right fruit sits at the bottom-right.
        assert_eq!(rotated.rotation, 1);
        assert_eq!(rotated.fruits, [Cherry, Peach, Orange, Grape]);
    }

    #[test]
    fn test_o_rotation_is_fixed_point() {
        let piece = ActivePiece::spawn(ShapeKind::O, [Cherry, Peach, Melon, Grape]);
        let mut rotated = piece;
        for _ in 0..5 {
            rotated = rotated.rotated_cw();
        }
        assert_eq!(rotated, piece);
    }

    #[test]
    fn test_translated_keeps_shape_and_fruits() {
        let piece = ActivePiece::spawn(ShapeKind::S, [Cherry, Peach, Melon, Grape]);
        let moved = piece.translated(-2, 3);
        assert_eq!(moved.x, piece.x - 2);
        assert_eq!(moved.y, piece.y + 3);
        assert_eq!(moved.fruits, piece.fruits);
        assert_eq!(moved.rotation, piece.rotation);
    }

    #[test]
    fn test_try_rotate_prefers_current_origin() {
        let piece = ActivePiece::spawn(ShapeKind::T, [Cherry; 4]);
        let (rotated, kick) = try_rotate(&piece, |_| true).unwrap();
        assert_eq!(kick, (0, 0));
        assert_eq!(rotated.x, piece.x);
        assert_eq!(rotated.rotation, 1);
    }

    #[test]
    fn test_try_rotate_walks_kicks_in_order() {
        let piece = ActivePiece::spawn(ShapeKind::T, [Cherry; 4]);
        // Only accept a piece shifted right by two.
        let target_x = piece.x + 2;
        let (rotated, kick) = try_rotate(&piece, |p| p.x == target_x && p.y == piece.y).unwrap();
        assert_eq!(kick, (2, 0));
        assert_eq!(rotated.x, target_x);
    }

    #[test]
    fn test_try_rotate_rejects_when_nothing_fits() {
        let piece = ActivePiece::spawn(ShapeKind::J, [Cherry; 4]);
        assert!(try_rotate(&piece, |_| false).is_none());
    }
}
