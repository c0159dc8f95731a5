//! Terminal rendering.
//!
//! A small game-oriented layer: [`GameView`] draws a snapshot into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes framebuffers to the
//! terminal with crossterm, sending only what changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{group_thousands, GameView, Status, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
