//! Message processing pipeline — the handle_message flow.

use super::replies;
use super::Gateway;
use standup_core::message::{IncomingMessage, OutgoingMessage};
use tracing::{debug, error, info, warn};

/// What an incoming text asks for.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Request<'a> {
    /// `/start` or `/help`.
    Help,
    /// Any other bot command; not handled.
    UnknownCommand(&'a str),
    /// Free text to be rendered as a report.
    Report,
}

/// Classify a message. Commands may carry a `@botname` suffix and arguments.
pub(super) fn classify(text: &str) -> Request<'_> {
    let Some(rest) = text.strip_prefix('/') else {
        return Request::Report;
    };
    let command = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .split('@')
        .next()
        .unwrap_or("");
    match command {
        "start" | "help" => Request::Help,
        other => Request::UnknownCommand(other),
    }
}

impl Gateway {
    /// Process a single incoming message.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let sender_name = incoming.sender_name.as_deref().unwrap_or("unknown");
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!(
            "[{}] {} says ({}): {}",
            incoming.channel, sender_name, incoming.id, preview
        );

        let reply = match classify(&incoming.text) {
            Request::Help => OutgoingMessage::markdown_reply(&incoming, replies::HELP),
            Request::UnknownCommand(command) => {
                debug!("ignoring command /{command} from {}", incoming.sender_id);
                return;
            }
            Request::Report => {
                let rendered = self.formatter.render(&incoming.text);
                if !rendered.succeeded {
                    warn!(
                        "no tasks recognized in report from {} (ID: {})",
                        sender_name, incoming.sender_id
                    );
                }
                let mut reply = OutgoingMessage::markdown_reply(&incoming, rendered.text);
                reply.disable_link_preview = true;
                reply
            }
        };

        if let Err(e) = self.deliver(&incoming, reply).await {
            error!(
                "error processing message {} from {} (ID: {}): {e}",
                incoming.id, sender_name, incoming.sender_id
            );
            let apology = OutgoingMessage::markdown_reply(&incoming, replies::PROCESSING_ERROR);
            if let Err(e) = self.deliver(&incoming, apology).await {
                error!("failed to deliver error notice to {}: {e}", incoming.sender_id);
            }
        }
    }
}
