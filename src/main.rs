//! Terminal Blockfall runner (default binary).
//!
//! The game itself runs on the engine task; this thread polls the keyboard,
//! forwards actions, and redraws whenever a new snapshot is published.
//! Configuration comes from the `BLOCKFALL_*` environment variables.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn, Level};
use tracing_subscriber::util::SubscriberInitExt;

use blockfall::core::GameState;
use blockfall::engine::{EngineConfig, EngineHandle};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Logs go to a file; the terminal belongs to the game.
fn setup_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .finish()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;
    setup_logging(config.log_path.as_deref())?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    let engine = {
        let _guard = rt.enter();
        EngineHandle::spawn(GameState::new(seed), &config)
    };
    engine.start_blocking()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &engine, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    match rt.block_on(engine.shutdown()) {
        Ok(state) => info!(score = state.score(), lines = state.lines(), "finished"),
        Err(err) => warn!(%err, "engine did not shut down cleanly"),
    }
    result
}

fn run(term: &mut TerminalRenderer, engine: &EngineHandle, config: &EngineConfig) -> Result<()> {
    let view = GameView::default();
    let mut snapshots = engine.subscribe();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        if dirty || snapshots.has_changed()? {
            let snap = *snapshots.borrow_and_update();
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if !event::poll(config.frame_duration())? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                let snap = *snapshots.borrow();
                if let Some(action) = handle_key_event(key, &snap) {
                    engine.dispatch_blocking(action)?;
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
