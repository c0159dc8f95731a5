//! Game state module - the transition engine
//!
//! [`GameState`] owns the board, the falling piece, the preview piece and the
//! counters. It behaves as a small state machine whose states are encoded in
//! flags rather than an enum:
//!
//! - **spawn needed**: no active piece, not over
//! - **falling**: active piece present, not paused, not over
//! - **paused**: `paused` set; movement, rotation and drops are ignored
//! - **over**: `game_over` set; only `Restart` does anything
//!
//! [`GameState::apply_action`] is the raw transition for one action.
//! [`GameState::dispatch`] runs an action to completion, which includes the
//! spawn that follows a lock. [`GameState::apply`] is the value-returning form
//! for callers that keep old states around.

use crate::board::Board;
use crate::pieces::{random_piece, Tetromino};
use crate::rng::PieceGenerator;
use crate::scoring::{clear_score, drop_speed_ms, hard_drop_score, level_for_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, STARTING_LEVEL};

/// What happened when a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points from the line clear alone
    pub line_clear_score: u32,
    /// Hard drop distance (0 for a gravity or soft lock)
    pub drop_distance: u32,
    /// The lock filled the top row
    pub topped_out: bool,
}

/// The inputs that decide whether and how fast gravity runs.
///
/// Whenever this changes, a running gravity timer must be cancelled and
/// re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GravityKey {
    pub paused: bool,
    pub game_over: bool,
    pub has_active: bool,
    pub level: u32,
}

impl GravityKey {
    /// Interval to arm the timer with, or `None` when gravity is off
    pub fn interval_ms(&self) -> Option<u32> {
        if self.paused || self.game_over || !self.has_active {
            None
        } else {
            Some(drop_speed_ms(self.level))
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: Option<Tetromino>,
    generator: PieceGenerator,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create an empty game with the given RNG seed; call [`start`](Self::start)
    /// to spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::with_generator(PieceGenerator::new(seed))
    }

    fn with_generator(generator: PieceGenerator) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            generator,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            paused: false,
            game_over: false,
            last_event: None,
        }
    }

    /// Spawn the first piece
    pub fn start(&mut self) {
        self.spawn_piece();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next(&self) -> Option<Tetromino> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn gravity_key(&self) -> GravityKey {
        GravityKey {
            paused: self.paused,
            game_over: self.game_over,
            has_active: self.active.is_some(),
            level: self.level,
        }
    }

    /// Current gravity interval for the level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_speed_ms(self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Replace the board (test setups and puzzle starts)
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Replace the active piece (test setups and puzzle starts)
    pub fn with_active(mut self, piece: Option<Tetromino>) -> Self {
        self.active = piece;
        self
    }

    /// Promote the preview piece (or a fresh one) to active and draw a new
    /// preview.
    ///
    /// Does nothing if a piece is already active or the game is over. If the
    /// promoted piece does not fit, the game is over and the board is left
    /// as it was. Returns true if a piece was placed.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over || self.active.is_some() {
            return false;
        }

        let piece = match self.next.take() {
            Some(next) => next,
            None => random_piece(&mut self.generator),
        };
        self.next = Some(random_piece(&mut self.generator));

        if !piece.is_valid(&self.board) {
            self.game_over = true;
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Whether movement, rotation and drops are currently accepted
    fn accepts_piece_input(&self) -> Option<Tetromino> {
        if self.paused || self.game_over {
            return None;
        }
        self.active
    }

    /// Shift the active piece by (dx, dy).
    ///
    /// A blocked downward move locks the piece where it is. A blocked
    /// sideways move changes nothing. Returns true if the state changed.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.accepts_piece_input() else {
            return false;
        };

        let candidate = active.shifted(dx, dy);
        if candidate.is_valid(&self.board) {
            self.active = Some(candidate);
            return true;
        }

        if dy > 0 {
            self.lock_piece(active, 0);
            return true;
        }

        false
    }

    /// Rotate the active piece clockwise in place, if the result fits
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.accepts_piece_input() else {
            return false;
        };

        let candidate = active.rotated();
        if candidate.is_valid(&self.board) {
            self.active = Some(candidate);
            return true;
        }

        false
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// The distance counts every valid position probed from the current
    /// anchor down, so the piece locks at `y + distance - 1`. Returns the
    /// distance, or `None` if the drop was ignored.
    pub fn hard_drop(&mut self) -> Option<u32> {
        let active = self.accepts_piece_input()?;

        let mut distance: u32 = 0;
        let mut probe = active;
        while probe.is_valid(&self.board) {
            probe = probe.shifted(0, 1);
            distance += 1;
        }

        let landed = active.shifted(0, distance.saturating_sub(1) as i8);
        self.lock_piece(landed, distance);
        Some(distance)
    }

    /// Bake `piece` into the board, clear lines and update the counters.
    ///
    /// The active piece is cleared; the next spawn happens in
    /// [`spawn_piece`](Self::spawn_piece).
    fn lock_piece(&mut self, piece: Tetromino, drop_distance: u32) {
        let placed = self.board.place_tetromino(&piece);
        let (cleared, lines_cleared) = placed.clear_completed_lines();

        let line_clear_score = clear_score(lines_cleared, self.level);
        self.board = cleared;
        self.lines += lines_cleared as u32;
        self.level = level_for_lines(self.lines);
        self.score = self
            .score
            .saturating_add(line_clear_score)
            .saturating_add(hard_drop_score(drop_distance));
        self.active = None;

        let topped_out = self.board.is_game_over();
        if topped_out {
            self.game_over = true;
        }

        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            line_clear_score,
            drop_distance,
            topped_out,
        });
    }

    /// Reset to an empty board with zeroed counters and spawn.
    ///
    /// The piece generator keeps running, so a restart does not replay the
    /// previous game's pieces.
    pub fn restart(&mut self) {
        let generator = self.generator.clone();
        *self = Self::with_generator(generator);
        self.spawn_piece();
    }

    /// Apply one action. Returns true if the state changed.
    ///
    /// This is the raw transition: after a lock the active piece is left
    /// empty. Use [`dispatch`](Self::dispatch) to also spawn the next piece.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::MoveDown => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Pause => !std::mem::replace(&mut self.paused, true),
            GameAction::Resume => std::mem::replace(&mut self.paused, false),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Apply one action and then spawn if the board needs a piece.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let changed = self.apply_action(action);
        let spawned = self.spawn_piece();
        changed || spawned
    }

    /// One gravity step: the same as a downward move.
    pub fn gravity_tick(&mut self) -> bool {
        self.dispatch(GameAction::MoveDown)
    }

    /// Value form of [`dispatch`](Self::dispatch): `self` is untouched.
    pub fn apply(&self, action: GameAction) -> GameState {
        let mut next = self.clone();
        next.dispatch(action);
        next
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.map(|p| p.kind);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.drop_interval_ms = self.drop_interval_ms();
        out.seed = self.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
