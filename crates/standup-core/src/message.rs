use uuid::Uuid;

/// An incoming message from a channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Unique ID used to correlate log lines for one message.
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific user ID.
    pub sender_id: String,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    /// Platform-specific target for routing the response (e.g. Telegram chat_id).
    pub reply_target: Option<String>,
    /// Platform-specific ID of this message, used to quote it in replies.
    pub source_message_id: Option<String>,
    /// Whether this message comes from a group chat.
    pub is_group: bool,
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    pub text: String,
    pub markup: Markup,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    pub reply_target: Option<String>,
    /// Platform-specific message ID to quote.
    pub reply_to_message: Option<String>,
    pub disable_link_preview: bool,
}

impl OutgoingMessage {
    /// A MarkdownV2 reply routed back to the sender of `incoming`.
    ///
    /// Group replies quote the source message; private replies do not.
    pub fn markdown_reply(incoming: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::MarkdownV2,
            reply_target: incoming.reply_target.clone(),
            reply_to_message: if incoming.is_group {
                incoming.source_message_id.clone()
            } else {
                None
            },
            disable_link_preview: false,
        }
    }
}

/// Text markup dialect of an outgoing message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Markup {
    #[default]
    Plain,
    MarkdownV2,
}

impl Markup {
    /// Telegram `parse_mode` value, `None` for plain text.
    pub fn parse_mode(&self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::MarkdownV2 => Some("MarkdownV2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming(is_group: bool) -> IncomingMessage {
        IncomingMessage {
            id: Uuid::new_v4(),
            channel: "telegram".to_string(),
            sender_id: "42".to_string(),
            sender_name: Some("Anna".to_string()),
            text: "hi".to_string(),
            reply_target: Some("-100500".to_string()),
            source_message_id: Some("7".to_string()),
            is_group,
        }
    }

    #[test]
    fn test_markdown_reply_private_does_not_quote() {
        let msg = OutgoingMessage::markdown_reply(&incoming(false), "ok");
        assert_eq!(msg.markup, Markup::MarkdownV2);
        assert_eq!(msg.reply_target.as_deref(), Some("-100500"));
        assert!(msg.reply_to_message.is_none());
    }

    #[test]
    fn test_markdown_reply_group_quotes_source() {
        let msg = OutgoingMessage::markdown_reply(&incoming(true), "ok");
        assert_eq!(msg.reply_to_message.as_deref(), Some("7"));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(Markup::Plain.parse_mode(), None);
        assert_eq!(Markup::MarkdownV2.parse_mode(), Some("MarkdownV2"));
    }
}
