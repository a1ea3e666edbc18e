/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub max_message_len: usize,
}

impl Default for MessagingCapabilities {
    fn default() -> Self {
        // Telegram Bot API `sendMessage` limit.
        Self {
            max_message_len: 4096,
        }
    }
}
