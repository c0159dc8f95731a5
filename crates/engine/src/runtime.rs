//! Engine runtime.
//!
//! One task owns the [`GameState`]. Everything that changes it, player
//! actions and gravity ticks alike, arrives as an [`EngineCommand`] on a single
//! bounded channel and is applied in arrival order. After each transition
//! that changed something, the task publishes a fresh [`GameSnapshot`] on a
//! watch channel.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use blockfall_core::{GameSnapshot, GameState, GravityKey};
use blockfall_types::GameAction;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Message delivered to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Player action
    Action(GameAction),
    /// Timer expiry; ignored unless `generation` matches the live timer
    Gravity { generation: u64 },
    /// Spawn the first piece
    Start,
    /// Stop the loop and hand back the final state
    Shutdown,
}

/// The single gravity timer.
///
/// Arming always aborts the previous task and bumps the generation, so a tick
/// that was already queued by an old timer is recognised as stale.
#[derive(Debug, Default)]
struct GravityTimer {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl GravityTimer {
    fn arm(&mut self, interval_ms: Option<u32>, tx: &mpsc::WeakSender<EngineCommand>) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let Some(ms) = interval_ms else {
            debug!(generation = self.generation, "gravity timer stopped");
            return;
        };

        debug!(generation = self.generation, interval_ms = ms, "gravity timer armed");
        let generation = self.generation;
        let tx = tx.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms as u64)).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(EngineCommand::Gravity { generation }).await;
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

struct Engine {
    state: GameState,
    timer: GravityTimer,
    /// Key the timer was last armed for
    armed_for: Option<GravityKey>,
    ticks: mpsc::WeakSender<EngineCommand>,
    snapshots: watch::Sender<GameSnapshot>,
}

impl Engine {
    async fn run(mut self, mut rx: mpsc::Receiver<EngineCommand>) -> GameState {
        info!(seed = self.state.seed(), "engine started");
        self.sync_timer(false);

        while let Some(cmd) = rx.recv().await {
            match cmd {
                EngineCommand::Action(action) => {
                    trace!(action = action.as_str(), "action");
                    let changed = self.state.dispatch(action);
                    // A restart spawns a fresh piece that gets a full interval.
                    self.after_transition(changed, changed && action == GameAction::Restart);
                }
                EngineCommand::Gravity { generation } => {
                    if !self.timer.is_current(generation) {
                        trace!(generation, "stale gravity tick ignored");
                        continue;
                    }
                    let changed = self.state.gravity_tick();
                    self.after_transition(changed, true);
                }
                EngineCommand::Start => {
                    let changed = self.state.spawn_piece();
                    self.after_transition(changed, false);
                }
                EngineCommand::Shutdown => break,
            }
        }

        self.timer.cancel();
        info!(
            score = self.state.score(),
            lines = self.state.lines(),
            "engine stopped"
        );
        self.state
    }

    fn after_transition(&mut self, changed: bool, rearm: bool) {
        let event = self.state.take_last_event();
        if let Some(event) = event {
            if event.lines_cleared > 0 {
                info!(
                    lines = event.lines_cleared,
                    points = event.line_clear_score,
                    level = self.state.level(),
                    "lines cleared"
                );
            }
            debug!(drop_distance = event.drop_distance, "piece locked");
        }

        if changed {
            if self.state.game_over() {
                info!(score = self.state.score(), "game over");
            }
            let state = &self.state;
            self.snapshots.send_modify(|snap| state.snapshot_into(snap));
        }

        // A lock respawns within the same transition, so the gravity key can
        // read the same before and after. The new piece starts a full interval.
        self.sync_timer(rearm || event.is_some());
    }

    /// Re-arm the timer if the gravity inputs moved, or unconditionally when
    /// `force` is set.
    fn sync_timer(&mut self, force: bool) {
        let key = self.state.gravity_key();
        if force || self.armed_for != Some(key) {
            self.timer.arm(key.interval_ms(), &self.ticks);
            self.armed_for = Some(key);
        }
    }
}

/// Cloneable sender for player actions.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<EngineCommand>,
}

impl Dispatcher {
    /// Queue an action, waiting for room if the queue is full.
    pub async fn dispatch(&self, action: GameAction) -> Result<(), EngineError> {
        self.send(EngineCommand::Action(action)).await
    }

    /// Blocking form of [`dispatch`](Self::dispatch) for threads outside the
    /// runtime.
    pub fn dispatch_blocking(&self, action: GameAction) -> Result<(), EngineError> {
        self.tx
            .blocking_send(EngineCommand::Action(action))
            .map_err(|_| EngineError::Stopped)
    }

    pub(crate) async fn send(&self, cmd: EngineCommand) -> Result<(), EngineError> {
        self.tx.send(cmd).await.map_err(|_| EngineError::Stopped)
    }
}

/// Owner's handle to a running engine.
#[derive(Debug)]
pub struct EngineHandle {
    dispatcher: Dispatcher,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<GameState>,
}

impl EngineHandle {
    /// Spawn the dispatch loop for `state` on the current runtime.
    ///
    /// Must be called from within a tokio runtime context.
    pub fn spawn(state: GameState, config: &EngineConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.max_pending.max(1));
        let (snap_tx, snap_rx) = watch::channel(state.snapshot());

        let engine = Engine {
            state,
            timer: GravityTimer::default(),
            armed_for: None,
            ticks: tx.downgrade(),
            snapshots: snap_tx,
        };
        let task = tokio::spawn(engine.run(rx));

        Self {
            dispatcher: Dispatcher { tx },
            snapshots: snap_rx,
            task,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub async fn dispatch(&self, action: GameAction) -> Result<(), EngineError> {
        self.dispatcher.dispatch(action).await
    }

    pub fn dispatch_blocking(&self, action: GameAction) -> Result<(), EngineError> {
        self.dispatcher.dispatch_blocking(action)
    }

    /// Spawn the first piece and start gravity
    pub async fn start(&self) -> Result<(), EngineError> {
        self.dispatcher.send(EngineCommand::Start).await
    }

    pub fn start_blocking(&self) -> Result<(), EngineError> {
        self.dispatcher
            .tx
            .blocking_send(EngineCommand::Start)
            .map_err(|_| EngineError::Stopped)
    }

    /// A receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        *self.snapshots.borrow()
    }

    /// Stop the loop after everything already queued and return the final
    /// state.
    pub async fn shutdown(self) -> Result<GameState, EngineError> {
        // The loop may already be gone; the join below reports how it ended.
        let _ = self.dispatcher.send(EngineCommand::Shutdown).await;
        Ok(self.task.await?)
    }

    #[cfg(test)]
    async fn send(&self, cmd: EngineCommand) -> Result<(), EngineError> {
        self.dispatcher.send(cmd).await
    }
}
