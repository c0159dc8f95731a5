//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It has no
//! dependencies on timers, terminals or threads, so every transition can be
//! driven directly from tests.
//!
//! # Module Structure
//!
//! - [`shapes`]: spawn masks, mask rotation and piece colors
//! - [`board`]: 10x20 board with collision checks and line clearing
//! - [`pieces`]: the falling tetromino and its candidate transforms
//! - [`rng`]: seeded uniform piece generation
//! - [`scoring`]: line clear points, hard drop bonus, level and gravity speed
//! - [`game_state`]: the action-driven state machine
//! - [`snapshot`]: plain-data views for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random (no bag).
//! - Rotation is clockwise only and never kicks; a blocked rotation is
//!   rejected.
//! - A piece locks the moment a downward move is blocked. There is no lock
//!   delay.
//! - The game ends when a lock leaves anything in the top row, or when a new
//!   piece cannot be placed.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.dispatch(GameAction::MoveRight);
//! game.dispatch(GameAction::Rotate);
//! game.dispatch(GameAction::HardDrop);
//!
//! // Hard drop awards 2 points per cell
//! assert!(game.score() > 0);
//! assert!(game.active().is_some());
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, GravityKey, LockEvent};
pub use pieces::{random_piece, rotate, Tetromino};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{clear_score, drop_speed_ms, hard_drop_score, level_for_lines};
pub use shapes::{color, shape, ShapeMask};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
