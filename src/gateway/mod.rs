//! Gateway — the event loop connecting channels to the report renderer.
//!
//! Each message is handled on its own task. A panicking handler is logged
//! and answered with a fixed apology; it never takes the loop down.

mod pipeline;
mod replies;


use standup_core::{
    message::{IncomingMessage, OutgoingMessage},
    report::ReportFormatter,
    traits::Channel,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// The central gateway that routes reports from channels through the
/// renderer and back.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) formatter: ReportFormatter,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(channels: HashMap<String, Arc<dyn Channel>>, formatter: ReportFormatter) -> Self {
        Self {
            channels,
            formatter,
        }
    }

    /// Run until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until `shutdown` resolves or every channel has closed.
    pub async fn run_until<F>(self: Arc<Self>, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Standup gateway running | channels: {}",
            self.channels
                .values()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for channel in self.channels.values() {
            let name = channel.name();
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.to_string();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                incoming = rx.recv() => match incoming {
                    Some(incoming) => {
                        let gw = self.clone();
                        in_flight.spawn(async move {
                            gw.dispatch_message(incoming).await;
                        });
                    }
                    None => {
                        info!("All channels closed");
                        break;
                    }
                },
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        while in_flight.join_next().await.is_some() {}

        self.shutdown().await;
        Ok(())
    }

    /// Run the handler for one message on its own task and answer with the
    /// critical apology if that task panics.
    async fn dispatch_message(self: Arc<Self>, incoming: IncomingMessage) {
        let gw = self.clone();
        let message = incoming.clone();
        let handle = tokio::spawn(async move {
            gw.handle_message(message).await;
        });

        if let Err(e) = handle.await {
            error!(
                "critical error handling message {} from {} (ID: {}): {e}",
                incoming.id,
                incoming.sender_name.as_deref().unwrap_or("unknown"),
                incoming.sender_id
            );
            let reply = OutgoingMessage::markdown_reply(&incoming, replies::CRITICAL_ERROR);
            if let Err(e) = self.deliver(&incoming, reply).await {
                error!("failed to deliver critical error notice: {e}");
            }
        }
    }

    /// Send a message through the channel the incoming message came from.
    pub(super) async fn deliver(
        &self,
        incoming: &IncomingMessage,
        message: OutgoingMessage,
    ) -> anyhow::Result<()> {
        let channel = self
            .channels
            .get(&incoming.channel)
            .ok_or_else(|| anyhow::anyhow!("unknown channel {}", incoming.channel))?;
        channel.send(message).await?;
        Ok(())
    }

    /// Stop all channels.
    async fn shutdown(&self) {
        info!("Shutting down...");

        for channel in self.channels.values() {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {}: {e}", channel.name());
            }
        }

        info!("Shutdown complete.");
    }
}
