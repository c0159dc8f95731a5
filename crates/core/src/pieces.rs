//! Pieces module - the active tetromino and its transforms
//!
//! A [`Tetromino`] is a small `Copy` value: kind, current mask and the
//! top-left anchor of that mask on the board. Moving or rotating never edits
//! a piece; it builds the candidate and the caller keeps it only if it fits.
//! There is no kick table: a rotation that collides is simply rejected.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::rng::PieceGenerator;
use crate::shapes::{shape, ShapeMask, MAX_MASK_SIDE};
use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Absolute (x, y) board coordinates of a piece's occupied cells
pub type PieceCells = ArrayVec<(i8, i8), { MAX_MASK_SIDE * MAX_MASK_SIDE }>;

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// A piece on (or above) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub mask: ShapeMask,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece with its spawn mask at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            mask: shape(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Occupied cells projected onto board coordinates
    pub fn cells(&self) -> PieceCells {
        self.mask
            .occupied()
            .map(|(r, c)| (self.x + c as i8, self.y + r as i8))
            .collect()
    }

    /// Same piece with its anchor moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece and anchor with the mask turned 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            mask: rotate(&self.mask),
            ..*self
        }
    }

    /// Check if all cells are at valid positions on the board
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(self)
    }

    /// Lowest anchor row this piece can fall to from where it is.
    ///
    /// Returns `None` when the piece does not fit where it is.
    pub fn landing_y(&self, board: &Board) -> Option<i8> {
        if !self.is_valid(board) {
            return None;
        }
        let mut probe = *self;
        while probe.shifted(0, 1).is_valid(board) {
            probe = probe.shifted(0, 1);
        }
        Some(probe.y)
    }
}

/// Rotate a mask 90° clockwise (R x C becomes C x R)
pub fn rotate(mask: &ShapeMask) -> ShapeMask {
    mask.rotate()
}

/// Draw a uniformly random kind and place it at the spawn anchor
pub fn random_piece(gen: &mut PieceGenerator) -> Tetromino {
    Tetromino::new(gen.next_kind())
}
