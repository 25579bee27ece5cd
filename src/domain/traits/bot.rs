use async_trait::async_trait;
use crate::domain::entities::{InboundEvent, OutboundReply};
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Prepare the adapter before the first poll
    async fn start(&mut self) -> Result<(), BotError>;

    /// Wait for the next batch of inbound events (long poll).
    ///
    /// Events come back in arrival order. An empty batch means the wait window expired.
    async fn poll(&mut self) -> Result<Vec<InboundEvent>, BotError>;

    /// Send a reply, returning the platform message id
    async fn send(&self, reply: &OutboundReply) -> Result<String, BotError>;

    /// Answer a callback query so the client stops its loading indicator
    async fn acknowledge(&self, callback_id: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub username: String,
}
