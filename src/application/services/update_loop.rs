use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::Dispatcher;
use crate::domain::traits::{Bot, Store};

/// Drives the bot: pulls events from the transport and dispatches them one at a time
pub struct UpdateLoop<B: Bot, S: Store> {
    bot: B,
    dispatcher: Dispatcher<S>,
    retry_delay: Duration,
}

impl<B: Bot, S: Store> UpdateLoop<B, S> {
    pub fn new(bot: B, dispatcher: Dispatcher<S>, retry_delay: Duration) -> Self {
        Self {
            bot,
            dispatcher,
            retry_delay,
        }
    }

    #[cfg(test)]
    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// One poll cycle. Returns how many events were dispatched.
    pub async fn poll_once(&mut self) -> Result<usize, BotError> {
        let events = self.bot.poll().await?;
        if !events.is_empty() {
            tracing::debug!("Received {} updates", events.len());
        }

        for event in &events {
            self.dispatcher.handle(&self.bot, event).await;
        }

        Ok(events.len())
    }

    /// Poll forever. A failed cycle is logged and retried after the configured delay.
    pub async fn run(mut self) {
        let info = self.bot.bot_info();
        tracing::info!("Bot started: @{}", info.username);
        tracing::info!("Starting message loop...");

        loop {
            if let Err(e) = self.poll_once().await {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }
}
