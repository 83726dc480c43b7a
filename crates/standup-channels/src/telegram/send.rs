//! Message sending and command registration.

use super::TelegramChannel;
use crate::utils::split_message;
use standup_core::{error::StandupError, message::OutgoingMessage};
use tracing::{info, warn};

/// Telegram's per-message text limit.
const MAX_MESSAGE_LEN: usize = 4096;

/// Build the `sendMessage` request body for one chunk of `message`.
///
/// Only the first chunk quotes the source message.
pub(crate) fn send_body(
    chat_id: i64,
    chunk: &str,
    message: &OutgoingMessage,
    first: bool,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "text": chunk,
    });

    if let Some(mode) = message.markup.parse_mode() {
        body["parse_mode"] = mode.into();
    }
    if message.disable_link_preview {
        body["link_preview_options"] = serde_json::json!({ "is_disabled": true });
    }
    if first {
        if let Some(id) = message
            .reply_to_message
            .as_deref()
            .and_then(|id| id.parse::<i64>().ok())
        {
            body["reply_parameters"] = serde_json::json!({
                "message_id": id,
                "allow_sending_without_reply": true,
            });
        }
    }

    body
}

impl TelegramChannel {
    /// Send a text message to a specific chat.
    ///
    /// Any non-success response is an error; MarkdownV2 entity errors are
    /// not retried as plain text.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        message: &OutgoingMessage,
    ) -> Result<(), StandupError> {
        let url = format!("{}/sendMessage", self.base_url);

        for (i, chunk) in split_message(&message.text, MAX_MESSAGE_LEN)
            .into_iter()
            .enumerate()
        {
            let body = send_body(chat_id, chunk, message, i == 0);

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| StandupError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(StandupError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "How to send a work report" },
                { "command": "help", "description": "Expected report format" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}
