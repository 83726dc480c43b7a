use thiserror::Error;

/// Top-level error type for Standup.
#[derive(Debug, Error)]
pub enum StandupError {
    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}
