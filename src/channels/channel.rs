//! Channel abstraction for message I/O.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// Stream of inbound messages produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A text message received from a user.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Channel the message arrived on.
    pub channel: String,
    /// Chat identifier replies are keyed by.
    pub chat_id: String,
    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    pub fn new(channel: &str, chat_id: &str, text: &str) -> Self {
        Self {
            channel: channel.to_string(),
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        }
    }

    /// If the text is a bot command (`/name` or `/name@SomeBot`), return the
    /// bare command name.
    pub fn command(&self) -> Option<&str> {
        let rest = self.text.trim().strip_prefix('/')?;
        let cmd = rest.split_whitespace().next().unwrap_or("");
        let cmd = cmd.split('@').next().unwrap_or("");
        (!cmd.is_empty()).then_some(cmd)
    }
}

/// A reply to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingResponse {
    /// Reply text.
    pub content: String,
    /// Also remove any reply-keyboard UI on the user's side.
    pub clear_keyboard: bool,
}

impl OutgoingResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            clear_keyboard: false,
        }
    }

    /// Mark the reply to also clear the reply keyboard.
    pub fn with_keyboard_cleared(mut self) -> Self {
        self.clear_keyboard = true;
        self
    }
}

/// A messaging transport the bot can converse over.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel identifier for logs.
    fn name(&self) -> &str;

    /// Start listening and return the stream of inbound messages.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send a reply to the chat the message came from.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Verify the channel can reach its transport.
    async fn health_check(&self) -> Result<(), ChannelError>;
}
