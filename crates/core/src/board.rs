//! Board module - the 10x20 playfield
//!
//! The board is a flat, row-major array of cells. It is `Copy`: every
//! operation that changes it returns a new board, so a snapshot taken before
//! a transition can never observe the transition.
//!
//! Coordinates are (x, y) with x in 0..10 left to right and y in 0..20 top to
//! bottom. Pieces may hang above the top edge (negative y); those cells are
//! exempt from occupancy checks and are dropped on placement.

use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from a grid of cell codes (see `PieceKind::to_u8`)
    pub fn from_grid(grid: &[[u8; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = PieceKind::from_u8(v);
            }
        }
        board
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
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

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells; `y` must be in range
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Whether `piece` fits: every occupied cell is inside the side walls,
    /// above the floor, and not on top of a locked cell. Cells above the top
    /// edge only need to be inside the side walls.
    pub fn is_valid_position(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// New board with `piece` baked in as its kind.
    ///
    /// Cells that fall outside the board are skipped.
    pub fn place_tetromino(&self, piece: &Tetromino) -> Board {
        let mut next = *self;
        for (x, y) in piece.cells() {
            next.set(x, y, Some(piece.kind));
        }
        next
    }

    /// Remove every full row, returning the compacted board and the number of
    /// rows removed.
    ///
    /// Rows are scanned bottom to top. When a row is removed everything above
    /// it shifts down by one and the same index is examined again.
    pub fn clear_completed_lines(&self) -> (Board, usize) {
        let mut next = *self;
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            if next.is_row_full(y - 1) {
                next.collapse_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        (next, cleared)
    }

    /// Drop row `y`, shift rows `0..y` down by one, and empty the top row
    fn collapse_row(&mut self, y: usize) {
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }
        self.cells[..WIDTH].fill(None);
    }

    /// True iff any cell of the top row is occupied
    pub fn is_game_over(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_some())
    }

    /// Export as a grid of cell codes (0 = empty)
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * WIDTH + x].map_or(0, PieceKind::to_u8);
            }
        }
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
