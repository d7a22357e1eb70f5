//! Grid module - the 10x20 cell matrix landed fruit live in
//!
//! Each cell is empty or holds one fruit. Uses a flat array for cache locality and
//! zero-allocation gravity.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Row 0 is the spawn row.

use crate::types::{Cell, FruitType, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

/// The fruit grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Put a fruit at (x, y)
    pub fn place(&mut self, x: i8, y: i8, fruit: FruitType) -> bool {
        self.set(x, y, Some(fruit))
    }

    /// Empty the cell at (x, y)
    pub fn clear(&mut self, x: i8, y: i8) -> bool {
        self.set(x, y, None)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Compact every column downward.
    ///
    /// Non-empty cells keep their top-to-bottom order; vacated cells at the top become
    /// empty. Returns true if any cell moved. Uses a two-pointer pass per column with
    /// zero allocation.
    pub fn collapse_columns(&mut self) -> bool {
        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;
        let mut moved = false;

        for x in 0..width {
            let mut write_y = height;

            // Scan from bottom to top
            for read_y in (0..height).rev() {
                let cell = self.cells[read_y * width + x];
                if cell.is_none() {
                    continue;
                }
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * width + x] = cell;
                    self.cells[read_y * width + x] = None;
                    moved = true;
                }
            }
        }

        moved
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// True if no cell holds a fruit
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid row by row into a fixed 2D array (snapshot export)
    pub fn write_rows(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Clear the entire grid
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from text rows, aligned to the bottom of the board.
    ///
    /// Each row is up to 10 characters; `.` or space is empty, a fruit letter (see
    /// [`FruitType::letter`]) is that fruit. Rows beyond the board height and unknown
    /// characters are ignored.
    ///
    /// ```
    /// use fruit_drop_core::Grid;
    /// use fruit_drop_core::types::FruitType;
    ///
    /// let grid = Grid::from_rows(&["C...", "CCC."]);
    /// assert_eq!(grid.get(0, 18), Some(Some(FruitType::Cherry)));
    /// assert_eq!(grid.get(2, 19), Some(Some(FruitType::Cherry)));
    /// assert_eq!(grid.occupied_count(), 4);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let height = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);

        for (dy, row) in rows.iter().skip(skip).enumerate() {
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if let Some(fruit) = FruitType::from_letter(ch) {
                    grid.place(x as i8, (top + dy) as i8, fruit);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();

        grid.place(0, 0, FruitType::Cherry);
        grid.place(5, 10, FruitType::Grape);

        assert_eq!(grid.get(0, 0), Some(Some(FruitType::Cherry)));
        assert_eq!(grid.get(5, 10), Some(Some(FruitType::Grape)));

        assert_eq!(grid.cells[0], Some(FruitType::Cherry));
        assert_eq!(grid.cells[10 * 10 + 5], Some(FruitType::Grape));
    }

    #[test]
    fn test_collapse_keeps_column_order() {
        let mut grid = Grid::new();
        grid.place(3, 2, FruitType::Cherry);
        grid.place(3, 7, FruitType::Peach);
        grid.place(3, 15, FruitType::Melon);

        assert!(grid.collapse_columns());

        assert_eq!(grid.get(3, 17), Some(Some(FruitType::Cherry)));
        assert_eq!(grid.get(3, 18), Some(Some(FruitType::Peach)));
        assert_eq!(grid.get(3, 19), Some(Some(FruitType::Melon)));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let mut grid = Grid::new();
        grid.place(0, 0, FruitType::Banana);
        grid.place(0, 4, FruitType::Orange);
        grid.place(9, 10, FruitType::Grape);
        grid.place(4, 19, FruitType::Cherry);
        grid.place(4, 12, FruitType::Cherry);

        grid.collapse_columns();
        let once = grid.clone();

        assert!(!grid.collapse_columns());
        assert_eq!(grid, once);
    }

    #[test]
    fn test_collapse_on_settled_grid_reports_no_movement() {
        let mut grid = Grid::from_rows(&["C.........", "CP........"]);
        assert!(!grid.collapse_columns());
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let grid = Grid::from_rows(&["G", "..M"]);
        assert_eq!(grid.get(0, 18), Some(Some(FruitType::Grape)));
        assert_eq!(grid.get(2, 19), Some(Some(FruitType::Melon)));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_write_rows_matches_cells() {
        let mut grid = Grid::new();
        grid.place(7, 3, FruitType::Peach);
        let mut rows = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        grid.write_rows(&mut rows);
        assert_eq!(rows[3][7], Some(FruitType::Peach));
        assert_eq!(rows[3][6], None);
    }
}
