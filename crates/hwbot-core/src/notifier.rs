use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::{domain::ChatId, formatting::split_message, messaging::port::MessagingPort};

/// Sends text to the single configured chat.
///
/// Delivery failures are logged and swallowed, never returned as errors.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, chat_id: ChatId) -> Self {
        Self { messenger, chat_id }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// `true` when every chunk reached the chat.
    #[instrument(skip_all)]
    pub async fn notify(&self, message: &str) -> bool {
        let limit = self.messenger.capabilities().max_message_len;
        let mut delivered = true;

        for chunk in split_message(message, limit) {
            match self.messenger.send_text(self.chat_id, &chunk).await {
                Ok(()) => info!(chat_id = %self.chat_id, "message sent: {chunk}"),
                Err(e) => {
                    error!(chat_id = %self.chat_id, "failed to send message: {e}");
                    delivered = false;
                }
            }
        }

        delivered
    }
}
