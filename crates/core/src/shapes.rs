//! Shape library - spawn masks and display colors for the seven pieces
//!
//! Every piece kind owns one square bounding-box mask in its spawn
//! orientation: I is 4x4 (bar on row 1), O is 2x2, and T/S/Z/J/L are 3x3 with
//! the bottom row empty. Rotation never looks these up again; it transforms
//! whatever mask the active piece currently carries (see [`ShapeMask::rotate`]).

use crate::types::{PieceKind, Rgb};

/// Largest bounding box side any mask can have
pub const MAX_MASK_SIDE: usize = 4;

/// Rectangular occupancy grid of a piece, `rows x cols`, row-major.
///
/// Cells outside `rows x cols` are always `false`, so derived equality only
/// compares the meaningful area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeMask {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_MASK_SIDE]; MAX_MASK_SIDE],
}

impl ShapeMask {
    /// Build a mask from a literal grid.
    ///
    /// Panics if either side exceeds [`MAX_MASK_SIDE`].
    pub fn from_grid<const R: usize, const C: usize>(grid: [[bool; C]; R]) -> Self {
        assert!(
            R <= MAX_MASK_SIDE && C <= MAX_MASK_SIDE,
            "mask {}x{} exceeds {}x{}",
            R,
            C,
            MAX_MASK_SIDE,
            MAX_MASK_SIDE
        );
        let mut bits = [[false; MAX_MASK_SIDE]; MAX_MASK_SIDE];
        for (r, row) in grid.iter().enumerate() {
            bits[r][..C].copy_from_slice(row);
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether local cell (row, col) is occupied; out of range is `false`
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    /// Occupied cells as (row, col) in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols()).filter_map(move |c| self.bits[r][c].then_some((r, c)))
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.occupied().count()
    }

    /// Rotate 90° clockwise.
    ///
    /// An `R x C` mask becomes `C x R`; the cell at (i, j) moves to
    /// (j, R - 1 - i).
    pub fn rotate(&self) -> Self {
        let r = self.rows();
        let mut bits = [[false; MAX_MASK_SIDE]; MAX_MASK_SIDE];
        for (i, j) in self.occupied() {
            bits[j][r - 1 - i] = true;
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

const X: bool = true;
const O: bool = false;

/// Spawn-orientation mask for a piece kind
pub fn shape(kind: PieceKind) -> ShapeMask {
    match kind {
        PieceKind::I => ShapeMask::from_grid([
            [O, O, O, O],
            [X, X, X, X],
            [O, O, O, O],
            [O, O, O, O],
        ]),
        PieceKind::O => ShapeMask::from_grid([[X, X], [X, X]]),
        PieceKind::T => ShapeMask::from_grid([[O, X, O], [X, X, X], [O, O, O]]),
        PieceKind::S => ShapeMask::from_grid([[O, X, X], [X, X, O], [O, O, O]]),
        PieceKind::Z => ShapeMask::from_grid([[X, X, O], [O, X, X], [O, O, O]]),
        PieceKind::J => ShapeMask::from_grid([[X, O, O], [X, X, X], [O, O, O]]),
        PieceKind::L => ShapeMask::from_grid([[O, O, X], [X, X, X], [O, O, O]]),
    }
}

/// Display color for a piece kind
pub fn color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x00, 0xf5, 0xff),
        PieceKind::O => Rgb::new(0xff, 0xff, 0x00),
        PieceKind::T => Rgb::new(0xa0, 0x00, 0xf0),
        PieceKind::S => Rgb::new(0x00, 0xf0, 0x00),
        PieceKind::Z => Rgb::new(0xf0, 0x00, 0x00),
        PieceKind::J => Rgb::new(0x00, 0x00, 0xf0),
        PieceKind::L => Rgb::new(0xff, 0x7f, 0x00),
    }
}
