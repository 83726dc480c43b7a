//! Long-polling update loop and Channel trait implementation.

use super::types::{TgMessage, TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use standup_core::{
    error::StandupError,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const MAX_BACKOFF_SECS: u64 = 60;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, StandupError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let allowed_users = self.config.allowed_users.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!("{base_url}/getUpdates?timeout=30");
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(msg) = update.message else {
                        continue;
                    };
                    let Some(incoming) = to_incoming(msg, &allowed_users) else {
                        continue;
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), StandupError> {
        let chat_id_str = message
            .reply_target
            .as_deref()
            .ok_or_else(|| StandupError::Channel("no reply_target on outgoing message".into()))?;

        let chat_id: i64 = chat_id_str.parse().map_err(|e| {
            StandupError::Channel(format!("invalid telegram chat_id '{chat_id_str}': {e}"))
        })?;

        self.send_text(chat_id, &message).await
    }

    async fn stop(&self) -> Result<(), StandupError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Convert a Telegram message into an [`IncomingMessage`].
///
/// Returns `None` for non-text messages, messages without a sender, and
/// senders outside a non-empty `allowed_users` list.
pub(crate) fn to_incoming(msg: TgMessage, allowed_users: &[i64]) -> Option<IncomingMessage> {
    let Some(text) = msg.text else {
        debug!("telegram: skipping non-text message in chat {}", msg.chat.id);
        return None;
    };

    let user = msg.from?;

    // Auth check.
    if !allowed_users.is_empty() && !allowed_users.contains(&user.id) {
        warn!("ignoring message from unauthorized user {}", user.id);
        return None;
    }

    let is_group = matches!(msg.chat.chat_type.as_str(), "group" | "supergroup");

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        sender_name: Some(user.first_name),
        text,
        reply_target: Some(msg.chat.id.to_string()),
        source_message_id: Some(msg.message_id.to_string()),
        is_group,
    })
}
