use crate::{
    error::StandupError,
    message::{IncomingMessage, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging Channel trait — the delivery side of the bot.
///
/// Every messaging platform implements this trait to receive reports and
/// send the rendered announcements back.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, StandupError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), StandupError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), StandupError>;
}
