use thiserror::Error;

/// An environment variable held a value the engine cannot use
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid number")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be at least {min}, got {value}")]
    TooSmall {
        var: &'static str,
        value: u64,
        min: u64,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The dispatch loop has exited and no longer accepts commands
    #[error("engine is stopped")]
    Stopped,

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("engine task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
