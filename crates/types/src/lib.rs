//! Shared types and game constants.
//!
//! Everything in this crate is plain data: piece kinds, board cells, the
//! abstract player actions, and the fixed numbers the rules are built from.
//! It has no dependencies (serde derives are behind the `serde` feature), so
//! the rules engine, the terminal front end and any other consumer can agree
//! on the same vocabulary.
//!
//! # Board
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (3, 0), the top-left corner of the piece's bounding box
//!
//! # Scoring and speed
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORES` | `[0, 100, 300, 500, 800]` | Points per lines cleared in one lock, times level |
//! | `HARD_DROP_POINTS_PER_CELL` | 2 | Flat bonus per cell of hard-drop distance |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level step |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_MS_PER_LEVEL` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 50 | Fastest gravity |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_u8(PieceKind::T.to_u8()), Some(PieceKind::T));
//! assert_eq!(GameAction::HardDrop.as_str(), "hardDrop");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column for every new piece
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row for every new piece
pub const SPAWN_Y: i8 = 0;

/// Level of a fresh game
pub const STARTING_LEVEL: u32 = 1;

/// Lines cleared per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_MS_PER_LEVEL: u32 = 100;

/// Fastest gravity interval
pub const DROP_INTERVAL_MIN_MS: u32 = 50;

/// Line clear scoring table, indexed by lines cleared in a single lock.
///
/// The value is multiplied by the level in effect *before* the lock.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Hard drop bonus per cell of drop distance
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each kind maps to exactly one spawn mask and one display color (see
/// `blockfall_core::shapes`):
/// - **I**: cyan bar
/// - **O**: yellow square
/// - **T**: purple T
/// - **S**: green S
/// - **Z**: red Z
/// - **J**: blue J
/// - **L**: orange L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Compact cell code used by snapshot grids (0 is reserved for empty)
    pub fn to_u8(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::to_u8`]; any other value is an empty cell
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Abstract player actions
///
/// The input collaborator emits one of these per gesture; the game state
/// machine decides what each one means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Shift the active piece one row down (locks it if blocked)
    MoveDown,
    /// Rotate the active piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop the active piece to the lowest valid row and lock it
    HardDrop,
    /// Set the paused flag
    Pause,
    /// Clear the paused flag
    Resume,
    /// Reset to an empty board and spawn a new piece
    Restart,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Restart => "restart",
        }
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
