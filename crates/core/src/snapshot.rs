use crate::pieces::Tetromino;
use crate::shapes::{shape, ShapeMask};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Read-only view of the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub mask: ShapeMask,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            mask: value.mask,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Occupied cells in board coordinates (may include rows above the top)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.mask
            .occupied()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }
}

/// Everything a renderer needs after a transition.
///
/// Plain `Copy` data; holding one never borrows the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    /// Locked cells as codes (0 = empty, 1..=7 = I,O,T,S,Z,J,L)
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Gravity interval for the current level
    pub drop_interval_ms: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Spawn mask of the preview piece
    pub fn next_mask(&self) -> Option<ShapeMask> {
        self.next.map(shape)
    }

    /// Board codes with the active piece drawn on top (cells above the
    /// top edge are skipped)
    pub fn composited_board(&self) -> [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let mut grid = self.board;
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    grid[y as usize][x as usize] = active.kind.to_u8();
                }
            }
        }
        grid
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            level: crate::types::STARTING_LEVEL,
            lines: 0,
            paused: false,
            game_over: false,
            drop_interval_ms: crate::types::BASE_DROP_MS,
            seed: 0,
        }
    }
}
