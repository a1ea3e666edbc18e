use async_trait::async_trait;

use crate::{domain::ChatId, messaging::types::MessagingCapabilities, Result};

/// Cross-messenger port.
///
/// Only plain-text delivery is needed; adapters report their length limit via
/// capabilities so callers can split long reports.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
