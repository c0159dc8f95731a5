//! Blockfall engine - the single-writer dispatch loop
//!
//! [`EngineHandle::spawn`] moves a [`GameState`](blockfall_core::GameState)
//! into a tokio task. Player actions and gravity ticks are queued on one
//! channel and applied in order; snapshots come back on a watch channel.
//!
//! ```no_run
//! use blockfall_core::GameState;
//! use blockfall_engine::{EngineConfig, EngineHandle};
//! use blockfall_types::GameAction;
//!
//! # async fn demo() -> Result<(), blockfall_engine::EngineError> {
//! let config = EngineConfig::from_env()?;
//! let engine = EngineHandle::spawn(GameState::new(config.seed_or(1)), &config);
//! engine.start().await?;
//! engine.dispatch(GameAction::HardDrop).await?;
//! println!("score: {}", engine.snapshot().score);
//! engine.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod runtime;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError};
pub use runtime::{Dispatcher, EngineCommand, EngineHandle};
